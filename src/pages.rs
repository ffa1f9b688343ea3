use askama::Template;

use crate::models::EventRecord;

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexPage<'a> {
    pub events: &'a [EventRecord],
}

#[derive(Template)]
#[template(path = "events.html")]
pub struct EventsPage<'a> {
    pub events: &'a [EventRecord],
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn events() -> Vec<EventRecord> {
        vec![
            EventRecord {
                title: "Sunrise Hike".to_string(),
                start_date: NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
                end_date: NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
                url: "https://activities.outdoors.org/s/oc-activity/a0X1".to_string(),
                description: "Meet at 5am".to_string(),
            },
            EventRecord {
                title: "Hut <Trip> & Stay".to_string(),
                start_date: NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
                end_date: NaiveDate::from_ymd_opt(2024, 7, 4).unwrap(),
                url: "https://activities.outdoors.org/s/oc-activity/a0X2".to_string(),
                description: "Three nights".to_string(),
            },
        ]
    }

    #[test]
    fn test_index_page_lists_events() {
        let events = events();
        let html = IndexPage { events: &events }.render().unwrap();
        assert!(html.contains("Sunrise Hike"));
        assert!(html.contains("a0X1"));
        assert!(html.contains("Jul 1, 2024 – Jul 4, 2024"));
        assert!(html.contains("/events"));
    }

    #[test]
    fn test_events_page_escapes_html() {
        let events = events();
        let html = EventsPage { events: &events }.render().unwrap();
        assert!(html.contains("Hut "));
        assert!(html.contains("Trip"));
        assert!(!html.contains("<Trip>"));
        assert!(html.contains("Three nights"));
    }

    #[test]
    fn test_pages_render_empty_list() {
        let html = IndexPage { events: &[] }.render().unwrap();
        assert!(html.contains("No activities"));
        let html = EventsPage { events: &[] }.render().unwrap();
        assert!(html.contains("No activities"));
    }
}
