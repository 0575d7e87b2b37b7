//! Activity log presentation in a fixed timezone

use chrono::{DateTime, NaiveDateTime, Utc};
use chrono_tz::Tz;
use salesdesk_domain::constants::DISPLAY_TIMESTAMP_FORMAT;
use salesdesk_domain::{ActivityLogEntry, Record};

/// Activity entry with its timestamp rendered in the display timezone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityRow {
    pub timestamp: String,
    pub opportunity_name: String,
    pub old_value: String,
    pub new_value: String,
    instant: Option<DateTime<Utc>>,
}

impl ActivityRow {
    pub const fn instant(&self) -> Option<DateTime<Utc>> {
        self.instant
    }

    pub fn to_record(&self) -> Record {
        Record::new()
            .with("Timestamp", self.timestamp.clone())
            .with("OpportunityName", self.opportunity_name.clone())
            .with("OldValue", self.old_value.clone())
            .with("NewValue", self.new_value.clone())
    }
}

/// Parse a backend timestamp. RFC 3339 is preferred; naive
/// `YYYY-MM-DD HH:MM:SS` (optionally with `T`) is taken as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| naive.and_utc())
}

/// Renders activity entries in one timezone, newest first.
#[derive(Debug, Clone, Copy)]
pub struct ActivityFormatter {
    tz: Tz,
}

impl Default for ActivityFormatter {
    fn default() -> Self {
        Self { tz: chrono_tz::Asia::Jakarta }
    }
}

impl ActivityFormatter {
    pub const fn new(tz: Tz) -> Self {
        Self { tz }
    }

    pub const fn timezone(&self) -> Tz {
        self.tz
    }

    pub fn localize(&self, raw: &str) -> String {
        parse_timestamp(raw).map_or_else(
            || raw.to_string(),
            |instant| instant.with_timezone(&self.tz).format(DISPLAY_TIMESTAMP_FORMAT).to_string(),
        )
    }

    /// Convert and sort; unparsable timestamps keep their text and sink to
    /// the bottom in their original order.
    pub fn rows(&self, entries: Vec<ActivityLogEntry>) -> Vec<ActivityRow> {
        let mut rows: Vec<ActivityRow> = entries
            .into_iter()
            .map(|entry| {
                let instant = parse_timestamp(&entry.timestamp);
                ActivityRow {
                    timestamp: self.localize(&entry.timestamp),
                    opportunity_name: entry.opportunity_name,
                    old_value: entry.old_value,
                    new_value: entry.new_value,
                    instant,
                }
            })
            .collect();
        rows.sort_by(|a, b| b.instant.cmp(&a.instant));
        rows
    }
}
