use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// One dated quiz/review tally reported by the backend.
///
/// `date` is `None` when the backend sent something that is not a date; the
/// tally itself is still kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressEntry {
    #[serde(default, deserialize_with = "lenient_date")]
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub correct: u32,
    #[serde(default)]
    pub total: u32,
}

/// Aggregate study progress for the signed-in user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressReport {
    #[serde(default)]
    pub total_reviewed: u32,
    #[serde(default)]
    pub correct_answers: u32,
    #[serde(default)]
    pub by_date: Vec<ProgressEntry>,
}

// Accepts RFC 3339, a zone-less date-time (read as UTC), or a bare date at midnight UTC.
fn lenient_date<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().map(str::trim).and_then(parse_date))
}

fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Some(at.with_timezone(&Utc));
    }
    if let Ok(at) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(at.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|day| day.and_hms_opt(0, 0, 0))
        .map(|at| at.and_utc())
}

impl ProgressReport {
    /// Dated entries, most recent report first (the backend appends).
    pub fn entries_newest_first(&self) -> impl Iterator<Item = &ProgressEntry> {
        self.by_date.iter().rev()
    }

    #[must_use]
    pub fn has_history(&self) -> bool {
        !self.by_date.is_empty()
    }
}
