//! Mood history storage implementation

use std::collections::HashMap;

use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use uuid::Uuid;

use super::models::*;
use crate::moods::{MoodCatalog, MoodDefinition};
use crate::storage::{KvStore, Subscription, MOOD_HISTORY_KEY};

/// Color used in the distribution view for moods missing from the catalog
pub const FALLBACK_CHART_COLOR: &str = "#8B5CF6";

/// Length of the "this week" window
const WEEK_WINDOW_HOURS: i64 = 7 * 24;

/// Storage for the mood selection log
#[derive(Clone)]
pub struct MoodHistory {
    store: KvStore,
}

impl MoodHistory {
    pub fn new(store: KvStore) -> Self {
        Self { store }
    }

    // ===== CRUD Operations =====

    /// All entries in chronological (insertion) order
    pub fn entries(&self) -> Vec<MoodEntry> {
        self.store.read(MOOD_HISTORY_KEY, Vec::new())
    }

    fn save_entries(&self, entries: &[MoodEntry]) {
        self.store.write(MOOD_HISTORY_KEY, entries);
    }

    /// Append an entry for `mood_id`, stamped now unless a timestamp is given
    pub fn add_entry(&self, mood_id: &str, timestamp: Option<DateTime<Utc>>) -> MoodEntry {
        self.append(MoodEntry {
            id: Uuid::new_v4().to_string(),
            mood_id: Some(mood_id.to_string()),
            emotion: None,
            color: None,
            timestamp: timestamp.unwrap_or_else(Utc::now),
        })
    }

    /// Append an entry that also snapshots the mood's name and color
    pub fn add_entry_for(
        &self,
        mood: &MoodDefinition,
        timestamp: Option<DateTime<Utc>>,
    ) -> MoodEntry {
        self.append(MoodEntry {
            id: Uuid::new_v4().to_string(),
            mood_id: Some(mood.id.clone()),
            emotion: Some(mood.name.clone()),
            color: Some(mood.color.clone()),
            timestamp: timestamp.unwrap_or_else(Utc::now),
        })
    }

    fn append(&self, entry: MoodEntry) -> MoodEntry {
        let mut entries = self.entries();
        entries.push(entry.clone());
        self.save_entries(&entries);
        log::debug!("Recorded mood {} ({})", entry.mood_key(), entry.id);
        entry
    }

    /// Delete an entry by id. Unknown ids are a no-op.
    pub fn delete_entry(&self, id: &str) -> bool {
        let mut entries = self.entries();
        let len_before = entries.len();
        entries.retain(|e| e.id != id);

        if entries.len() == len_before {
            return false;
        }

        self.save_entries(&entries);
        true
    }

    /// Remove every entry
    pub fn clear_history(&self) {
        self.save_entries(&[]);
        log::info!("Cleared mood history");
    }

    /// Newest `limit` entries, newest first
    pub fn recent_entries(&self, limit: usize) -> Vec<MoodEntry> {
        self.entries().into_iter().rev().take(limit).collect()
    }

    /// Listen for changes to the history log
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.store.subscribe(move |key| {
            if key == MOOD_HISTORY_KEY {
                listener();
            }
        })
    }

    // ===== Analytics =====

    /// Statistics relative to the local clock
    pub fn get_stats(&self) -> MoodStats {
        self.get_stats_at(Local::now())
    }

    /// Statistics relative to `now`; "today" is the calendar day in `now`'s zone
    pub fn get_stats_at<Tz: TimeZone>(&self, now: DateTime<Tz>) -> MoodStats {
        compute_stats(&self.entries(), now)
    }

    /// Per-mood counts sorted by count descending, names resolved via the catalog.
    ///
    /// Keys missing from the catalog keep the raw key as their name and use
    /// the entry's snapshot color if it has one.
    pub fn mood_distribution(
        &self,
        catalog: &MoodCatalog,
        limit: usize,
    ) -> Vec<MoodDistributionItem> {
        let moods = catalog.get_all_moods();
        let entries = self.entries();

        ordered_counts(&entries)
            .into_iter()
            .take(limit)
            .map(|(key, count)| {
                let (name, color) = match moods.iter().find(|m| m.id == key) {
                    Some(mood) => (mood.name.clone(), mood.color.clone()),
                    None => {
                        let snapshot_color = entries
                            .iter()
                            .filter(|e| e.mood_key() == key)
                            .find_map(|e| e.color.clone());
                        (
                            key.clone(),
                            snapshot_color.unwrap_or_else(|| FALLBACK_CHART_COLOR.to_string()),
                        )
                    }
                };
                MoodDistributionItem {
                    mood_id: key,
                    name,
                    color,
                    count,
                }
            })
            .collect()
    }
}

/// Counts per mood in order of first appearance
fn counts_in_first_seen_order(entries: &[MoodEntry]) -> Vec<(String, usize)> {
    let mut order: Vec<(String, usize)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for entry in entries {
        let key = entry.mood_key();
        match index.get(key) {
            Some(&i) => order[i].1 += 1,
            None => {
                index.insert(key, order.len());
                order.push((key.to_string(), 1));
            }
        }
    }

    order
}

/// Counts sorted descending; equal counts keep first-seen order
fn ordered_counts(entries: &[MoodEntry]) -> Vec<(String, usize)> {
    let mut counts = counts_in_first_seen_order(entries);
    // Stable sort keeps the first-seen tie break
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// Recompute statistics from scratch over the full log
pub fn compute_stats<Tz: TimeZone>(entries: &[MoodEntry], now: DateTime<Tz>) -> MoodStats {
    let today = now.date_naive();
    let now_utc = now.with_timezone(&Utc);
    let week_start = now_utc - Duration::hours(WEEK_WINDOW_HOURS);
    let zone = now.timezone();

    let today_entries = entries
        .iter()
        .filter(|e| e.timestamp.with_timezone(&zone).date_naive() == today)
        .count();

    let week_entries = entries
        .iter()
        .filter(|e| e.timestamp >= week_start && e.timestamp <= now_utc)
        .count();

    let ordered = ordered_counts(entries);
    let most_common_mood = ordered.first().map(|(id, _)| id.clone());

    MoodStats {
        total_entries: entries.len(),
        today_entries,
        week_entries,
        most_common_mood,
        mood_counts: ordered.into_iter().collect(),
    }
}

/// Short human label for how long ago `timestamp` was
pub fn relative_time_label(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - timestamp).num_seconds();

    if seconds < 60 {
        return "Just now".to_string();
    }
    let minutes = seconds / 60;
    if minutes < 60 {
        return format!("{}m ago", minutes);
    }
    let hours = minutes / 60;
    if hours < 24 {
        return format!("{}h ago", hours);
    }
    let days = hours / 24;
    if days < 7 {
        return format!("{}d ago", days);
    }

    timestamp
        .with_timezone(&Local)
        .date_naive()
        .format("%Y-%m-%d")
        .to_string()
}
