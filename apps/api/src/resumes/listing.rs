use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::resume::StoredResume;

const PREVIEW_CHARS: usize = 100;
const UNTITLED: &str = "Untitled Resume";

/// One card in the saved-resumes list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeSummary {
    pub id: Uuid,
    pub title: String,
    pub summary_preview: String,
    pub last_edited: DateTime<Utc>,
    /// e.g. `Oct 3, 2026`
    pub last_edited_date: String,
    /// `today`, `yesterday` or `N days ago`
    pub last_edited_label: String,
}

impl ResumeSummary {
    pub fn from_stored(doc: &StoredResume, now: DateTime<Utc>) -> Self {
        let last_edited = doc.last_edited();
        let title = match doc.record.personal_info.full_name.trim() {
            "" => UNTITLED.to_string(),
            name => name.to_string(),
        };
        Self {
            id: doc.id,
            title,
            summary_preview: preview(&doc.record.summary),
            last_edited,
            last_edited_date: last_edited.format("%b %-d, %Y").to_string(),
            last_edited_label: relative_label(last_edited, now),
        }
    }
}

/// First 100 characters of `text`, with an ellipsis only when something was cut.
pub fn preview(text: &str) -> String {
    let text = text.trim();
    match text.char_indices().nth(PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}...", text[..cut].trim_end()),
        None => text.to_string(),
    }
}

/// Whole days between `then` and `now` as a short label. Future times count as today.
pub fn relative_label(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    match (now - then).num_days() {
        d if d <= 0 => "today".to_string(),
        1 => "yesterday".to_string(),
        d => format!("{d} days ago"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    use crate::models::resume::ResumeRecord;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[test]
    fn test_relative_label() {
        let now = at(2026, 10, 16, 12);
        assert_eq!(relative_label(now, now), "today");
        assert_eq!(relative_label(now - Duration::hours(23), now), "today");
        assert_eq!(relative_label(now - Duration::hours(25), now), "yesterday");
        assert_eq!(relative_label(now - Duration::days(9), now), "9 days ago");
        assert_eq!(relative_label(now + Duration::hours(2), now), "today");
    }

    #[test]
    fn test_preview_truncates_at_100_chars() {
        let short = "Engineer";
        assert_eq!(preview(short), "Engineer");

        let exact = "a".repeat(100);
        assert_eq!(preview(&exact), exact);

        let long = "é".repeat(150);
        let cut = preview(&long);
        assert!(cut.ends_with("..."));
        assert_eq!(cut.chars().count(), 103);
    }

    #[test]
    fn test_summary_falls_back_to_untitled() {
        let now = at(2026, 10, 16, 12);
        let doc = StoredResume {
            id: Uuid::new_v4(),
            owner_id: "u1".to_string(),
            record: ResumeRecord::default(),
            created_at: at(2026, 10, 3, 9),
            updated_at: None,
        };
        let summary = ResumeSummary::from_stored(&doc, now);
        assert_eq!(summary.title, "Untitled Resume");
        assert_eq!(summary.summary_preview, "");
        assert_eq!(summary.last_edited_date, "Oct 3, 2026");
        assert_eq!(summary.last_edited_label, "13 days ago");
    }

    #[test]
    fn test_updated_at_wins_over_created_at() {
        let now = at(2026, 10, 16, 12);
        let mut record = ResumeRecord::default();
        record.personal_info.full_name = "Jane Doe".to_string();
        let doc = StoredResume {
            id: Uuid::new_v4(),
            owner_id: "u1".to_string(),
            record,
            created_at: at(2026, 9, 1, 9),
            updated_at: Some(at(2026, 10, 15, 9)),
        };
        let summary = ResumeSummary::from_stored(&doc, now);
        assert_eq!(summary.title, "Jane Doe");
        assert_eq!(summary.last_edited_label, "yesterday");
    }
}
