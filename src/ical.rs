use chrono::Days;
use icalendar::{Calendar, Component, Event, EventLike};

use crate::models::EventRecord;

#[derive(Clone)]
pub struct ICalExporter {
    activity_base_url: String,
}

impl ICalExporter {
    pub fn new(activity_base_url: impl Into<String>) -> Self {
        Self {
            activity_base_url: activity_base_url.into(),
        }
    }

    /// Unique per list position, so repeated activities stay separate events.
    fn uid(&self, position: usize, record: &EventRecord) -> String {
        let id = record
            .url
            .strip_prefix(self.activity_base_url.as_str())
            .unwrap_or(record.url.as_str());
        format!(
            "{position}-{}-{id}@outdoors-activities",
            record.start_date.format("%Y%m%d")
        )
    }

    /// All-day events; DTEND is exclusive, so single-day events end on the next day.
    pub fn generate(&self, events: &[EventRecord]) -> Vec<u8> {
        let mut calendar = Calendar::new();
        calendar.name("outdoors.org Activities");

        for (position, record) in events.iter().enumerate() {
            let end = if record.is_multi_day() {
                record.end_date
            } else {
                record
                    .start_date
                    .checked_add_days(Days::new(1))
                    .unwrap_or(record.start_date)
            };

            let mut event = Event::new();
            event.summary(&record.title);
            event.starts(record.start_date);
            event.ends(end);
            event.description(&record.description);
            event.add_property("URL", record.url.as_str());
            event.uid(&self.uid(position, record));
            calendar.push(event);
        }

        calendar.to_string().into_bytes()
    }
}
