use chrono::{Days, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;
use tracing::{debug, warn};

use crate::envelope::{DecodeError, RawActivity, decode_activities};
use crate::fetcher::RawResponse;
use crate::models::EventRecord;

static ISO_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("regex compiles"));

#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error("Invalid date in {field}: {value:?} (expected YYYY-MM-DD)")]
    Format { field: &'static str, value: String },
}

#[derive(Clone, Debug)]
pub struct EventNormalizer {
    activity_base_url: String,
}

impl EventNormalizer {
    pub fn new(activity_base_url: impl Into<String>) -> Self {
        Self {
            activity_base_url: activity_base_url.into(),
        }
    }

    pub fn normalize(&self, response: &RawResponse) -> Result<Vec<EventRecord>, NormalizeError> {
        let activities = decode_activities(&response.body)?;
        debug!(count = activities.len(), "decoded activities");
        activities
            .iter()
            .map(|activity| self.normalize_activity(activity))
            .collect()
    }

    fn normalize_activity(&self, activity: &RawActivity) -> Result<EventRecord, NormalizeError> {
        let start_date = parse_date("Start_Date__c", &activity.start_date)?;
        let raw_end = parse_date("End_Date__c", &activity.end_date)?;

        if raw_end < start_date {
            warn!(id = %activity.id, %start_date, end_date = %raw_end, "activity ends before it starts");
        }

        // Multi-day ranges gain one day on the end boundary; single-day events stay as-is.
        let end_date = if raw_end != start_date {
            raw_end
                .checked_add_days(Days::new(1))
                .ok_or_else(|| NormalizeError::Format {
                    field: "End_Date__c",
                    value: activity.end_date.clone(),
                })?
        } else {
            raw_end
        };

        Ok(EventRecord {
            title: activity.name.clone(),
            start_date,
            end_date,
            url: format!("{}{}", self.activity_base_url, activity.id),
            description: flatten_lines(&activity.description),
        })
    }
}

fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate, NormalizeError> {
    let invalid = || NormalizeError::Format {
        field,
        value: value.to_string(),
    };
    if !ISO_DATE.is_match(value) {
        return Err(invalid());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| invalid())
}

fn flatten_lines(text: &str) -> String {
    text.replace("\r\n", " ").replace(['\n', '\r'], " ")
}
