use innerhue_lib::history::MoodDistributionItem;
use innerhue_lib::moods::color::parse_hex_color;

/// ANSI color codes
pub struct Color;

impl Color {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
}

const BAR_WIDTH: usize = 30;

/// A colored block for a hex color, or the hex string itself without color
pub fn swatch(hex: &str, use_color: bool) -> String {
    match parse_hex_color(hex) {
        Some((r, g, b)) if use_color => {
            format!("\x1b[38;2;{};{};{}m\u{2588}\u{2588}{}", r, g, b, Color::RESET)
        }
        _ => hex.to_string(),
    }
}

pub fn bold(text: &str, use_color: bool) -> String {
    styled(text, Color::BOLD, use_color)
}

pub fn dim(text: &str, use_color: bool) -> String {
    styled(text, Color::DIM, use_color)
}

fn styled(text: &str, code: &str, use_color: bool) -> String {
    if use_color {
        format!("{}{}{}", code, text, Color::RESET)
    } else {
        text.to_string()
    }
}

/// Horizontal bar chart, one line per mood, scaled to the largest count
pub fn render_distribution(items: &[MoodDistributionItem], use_color: bool) -> Vec<String> {
    let max = items.iter().map(|i| i.count).max().unwrap_or(0);
    let name_width = items.iter().map(|i| i.name.chars().count()).max().unwrap_or(0);

    items
        .iter()
        .map(|item| {
            let len = if max == 0 {
                0
            } else {
                (item.count * BAR_WIDTH).div_ceil(max)
            };
            let bar = "\u{2588}".repeat(len);
            let bar = match parse_hex_color(&item.color) {
                Some((r, g, b)) if use_color => {
                    format!("\x1b[38;2;{};{};{}m{}{}", r, g, b, bar, Color::RESET)
                }
                _ => bar,
            };
            format!("  {:<width$}  {} {}", item.name, bar, item.count, width = name_width)
        })
        .collect()
}
