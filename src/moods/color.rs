//! Hex color helpers

use std::sync::OnceLock;

use regex::Regex;

/// Share of the distance to white applied when deriving a glow
const GLOW_LIGHTEN: f64 = 0.3;

/// Glow used when the primary color cannot be parsed
pub const FALLBACK_GLOW: &str = "#E0E0E0";

fn hex_regex() -> &'static Regex {
    static HEX: OnceLock<Regex> = OnceLock::new();
    HEX.get_or_init(|| Regex::new(r"^#([0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").expect("Invalid regex"))
}

/// `#RGB` or `#RRGGBB`, either case
pub fn is_valid_hex_color(value: &str) -> bool {
    hex_regex().is_match(value.trim())
}

/// Parse a hex color into RGB channels
pub fn parse_hex_color(value: &str) -> Option<(u8, u8, u8)> {
    let value = value.trim();
    if !is_valid_hex_color(value) {
        return None;
    }

    let digits = &value[1..];
    let expanded: String = if digits.len() == 3 {
        digits.chars().flat_map(|c| [c, c]).collect()
    } else {
        digits.to_string()
    };

    let channel = |i: usize| u8::from_str_radix(&expanded[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

pub fn format_hex_color(r: u8, g: u8, b: u8) -> String {
    format!("#{:02X}{:02X}{:02X}", r, g, b)
}

/// Derive the glow accent for a primary color by lightening it toward white.
///
/// Deterministic: the same input always yields the same uppercase `#RRGGBB`.
/// White cannot be lightened, so it gets [`FALLBACK_GLOW`] instead.
pub fn generate_glow_color(color: &str) -> String {
    let Some((r, g, b)) = parse_hex_color(color) else {
        log::debug!("Cannot derive glow from {:?}, using fallback", color);
        return FALLBACK_GLOW.to_string();
    };

    let lighten = |c: u8| {
        let c = c as f64;
        (c + (255.0 - c) * GLOW_LIGHTEN).round().min(255.0) as u8
    };

    let glow = (lighten(r), lighten(g), lighten(b));
    if glow == (r, g, b) {
        return FALLBACK_GLOW.to_string();
    }

    format_hex_color(glow.0, glow.1, glow.2)
}
