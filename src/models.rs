use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One activity, normalized for display.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct EventRecord {
    pub title: String,
    #[schema(value_type = String, format = "date", example = "2024-07-01")]
    pub start_date: NaiveDate,
    #[schema(value_type = String, format = "date", example = "2024-07-04")]
    pub end_date: NaiveDate,
    pub url: String,
    pub description: String,
}

impl EventRecord {
    pub fn is_multi_day(&self) -> bool {
        self.end_date != self.start_date
    }

    /// "Jul 1, 2024" or "Jul 1, 2024 – Jul 4, 2024".
    pub fn date_label(&self) -> String {
        let start = self.start_date.format("%b %-d, %Y");
        if self.is_multi_day() {
            format!("{start} – {}", self.end_date.format("%b %-d, %Y"))
        } else {
            start.to_string()
        }
    }
}
