use std::io::Read;

use chrono::{Datelike, Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::{Event, EventIndex, Result, parser};


/// Events of an iCalendar file, indexed by start date.
///
/// Built once from the calendar text and read-only afterwards:
///
/// ```text
/// events = {2017: {1: {18: [Event, Event, Event]}}}
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Calendar {
    events: EventIndex,
}

impl Calendar {
    /// Parse calendar text.
    ///
    /// Parsing is best-effort: an event block that cannot be read (no DTSTART,
    /// never closed, ...) is logged and skipped, and text without any VEVENT
    /// gives an empty calendar.
    pub fn new(contents: &str) -> Self {
        let mut events = EventIndex::default();
        let mut skipped = 0usize;

        for block in parser::parse_events(contents) {
            match block {
                Ok(event) => events.insert(event),
                Err(err) => {
                    skipped += 1;
                    tracing::warn!("Skipping VEVENT block: {}", err);
                }
            }
        }

        tracing::debug!(events = events.len(), skipped, "Calendar parsed");

        Self { events }
    }

    /// Read a whole UTF-8 calendar from `reader` and parse it.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        let contents = String::from_utf8(bytes)?;
        Ok(Self::new(&contents))
    }

    /// Year → month → day index; missing keys index to empty values.
    pub fn events(&self) -> &EventIndex {
        &self.events
    }

    /// Events starting on the day of `date`, in the order they were listed.
    pub fn get_events_on_day<D: Datelike>(&self, date: D) -> &[Event] {
        &self.events[date.year()][date.month()][date.day()]
    }

    /// The event on `now`'s day that has started and not yet ended.
    /// Events without an end time are never current.
    pub fn get_current_event(&self, now: NaiveDateTime) -> Option<&Event> {
        self.get_events_on_day(now)
            .iter()
            .find(|event| event.start < now && event.end.is_some_and(|end| end > now))
    }

    /// The first event listed on `now`'s day that starts after `now`.
    ///
    /// The day is scanned front to back and `end` is not consulted, so this is
    /// the earliest upcoming event in listing order. A reverse scan of the day
    /// would give the last upcoming one instead.
    pub fn get_next_event(&self, now: NaiveDateTime) -> Option<&Event> {
        self.get_events_on_day(now)
            .iter()
            .find(|event| event.start > now)
    }

    /// [`get_current_event`](Self::get_current_event) at local wall-clock time.
    pub fn current_event(&self) -> Option<&Event> {
        self.get_current_event(Local::now().naive_local())
    }

    /// [`get_next_event`](Self::get_next_event) at local wall-clock time.
    pub fn next_event(&self) -> Option<&Event> {
        self.get_next_event(Local::now().naive_local())
    }

    /// All events ordered by start date, source order within a day.
    pub fn iter(&self) -> impl Iterator<Item = &Event> {
        self.events.iter()
    }

    /// Number of events that were indexed.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// True when no event could be read.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
