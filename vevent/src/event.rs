use std::{collections::BTreeMap, fmt};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One VEVENT block of a calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Start of the event (DTSTART), timezone dropped
    pub start: NaiveDateTime,
    /// End of the event (DTEND)
    pub end: Option<NaiveDateTime>,
    /// DTSTART was a plain date (`VALUE=DATE`)
    pub all_day: bool,
    /// SUMMARY, unescaped
    pub summary: Option<String>,
    /// DESCRIPTION, unescaped
    pub description: Option<String>,
    /// LOCATION, unescaped
    pub location: Option<String>,
    /// Other date-time properties, keyed by lowercased name without the `DT` prefix
    pub timestamps: BTreeMap<String, NaiveDateTime>,
    /// Other text properties, keyed by lowercased name
    pub properties: BTreeMap<String, String>,
}

impl Event {
    /// An event starting at `start` with every other field empty.
    pub fn new(start: NaiveDateTime) -> Self {
        Self {
            start,
            end: None,
            all_day: false,
            summary: None,
            description: None,
            location: None,
            timestamps: BTreeMap::new(),
            properties: BTreeMap::new(),
        }
    }

    /// Look up a text property such as `uid` or `STATUS`.
    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Look up a date-time property such as `stamp` or `last-modified`.
    pub fn timestamp(&self, name: &str) -> Option<NaiveDateTime> {
        self.timestamps.get(&name.to_ascii_lowercase()).copied()
    }

    /// `HH:MM - HH:MM`, or only the start time when the event has no end.
    pub fn time_string(&self) -> String {
        match self.end {
            Some(end) => format!(
                "{} - {}",
                self.start.format("%H:%M"),
                end.format("%H:%M")
            ),
            None => self.start.format("%H:%M").to_string(),
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\n{}\n{}",
            self.time_string(),
            self.summary.as_deref().unwrap_or(""),
            self.location.as_deref().unwrap_or("")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2017, 1, 18)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    #[test]
    fn test_time_string() {
        let mut event = Event::new(at(9, 0));
        assert_eq!(event.time_string(), "09:00");

        event.end = Some(at(10, 30));
        assert_eq!(event.time_string(), "09:00 - 10:30");
    }

    #[test]
    fn test_display() {
        let mut event = Event::new(at(14, 5));
        event.end = Some(at(15, 0));
        event.summary = Some("Lecture".to_string());
        event.location = Some("Room 101".to_string());
        assert_eq!(event.to_string(), "14:05 - 15:00\nLecture\nRoom 101");

        let bare = Event::new(at(8, 0));
        assert_eq!(bare.to_string(), "08:00\n\n");
    }

    #[test]
    fn test_lookups_ignore_case() {
        let mut event = Event::new(at(9, 0));
        event
            .properties
            .insert("uid".to_string(), "abc@example.com".to_string());
        event.timestamps.insert("stamp".to_string(), at(7, 0));

        assert_eq!(event.property("UID"), Some("abc@example.com"));
        assert_eq!(event.property("status"), None);
        assert_eq!(event.timestamp("Stamp"), Some(at(7, 0)));
        assert_eq!(event.timestamp("created"), None);
    }
}
