//! Year → month → day lookup of events.
//!
//! Every level can be indexed with a key that is not present; the result is
//! an empty level instead of a panic, so `index[2017][1][18]` is always safe.

use std::{collections::BTreeMap, ops::Index};

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::Event;

static NO_MONTHS: YearEvents = YearEvents {
    months: BTreeMap::new(),
};
static NO_DAYS: MonthEvents = MonthEvents {
    days: BTreeMap::new(),
};

/// All events of a calendar, keyed by year.
///
/// Serialized as the flat, date-ordered list of events. Deserializing files
/// every event again under its own start date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Event>", into = "Vec<Event>")]
pub struct EventIndex {
    years: BTreeMap<i32, YearEvents>,
}

/// Events of one year, keyed by month (1-12).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct YearEvents {
    months: BTreeMap<u32, MonthEvents>,
}

/// Events of one month, keyed by day of month (1-31).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MonthEvents {
    days: BTreeMap<u32, Vec<Event>>,
}

impl EventIndex {
    /// Append an event under the date it starts on.
    pub(crate) fn insert(&mut self, event: Event) {
        let date = event.start.date();
        self.years
            .entry(date.year())
            .or_default()
            .months
            .entry(date.month())
            .or_default()
            .days
            .entry(date.day())
            .or_default()
            .push(event);
    }

    /// Events of `year`, if it has any.
    pub fn get(&self, year: i32) -> Option<&YearEvents> {
        self.years.get(&year)
    }

    /// Years that have at least one event, in ascending order.
    pub fn years(&self) -> impl Iterator<Item = (i32, &YearEvents)> {
        self.years.iter().map(|(year, events)| (*year, events))
    }

    /// Every event, ordered by date and then by position in the source.
    pub fn iter(&self) -> impl Iterator<Item = &Event> {
        self.years.values().flat_map(|year| year.iter_events())
    }

    /// Number of events in the index.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// True when the index holds no event.
    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

impl From<Vec<Event>> for EventIndex {
    fn from(events: Vec<Event>) -> Self {
        let mut index = Self::default();
        for event in events {
            index.insert(event);
        }
        index
    }
}

impl From<EventIndex> for Vec<Event> {
    fn from(index: EventIndex) -> Self {
        index.iter().cloned().collect()
    }
}

impl YearEvents {
    /// Events of `month`, if it has any.
    pub fn get(&self, month: u32) -> Option<&MonthEvents> {
        self.months.get(&month)
    }

    /// Months that have at least one event, in ascending order.
    pub fn months(&self) -> impl Iterator<Item = (u32, &MonthEvents)> {
        self.months.iter().map(|(month, events)| (*month, events))
    }

    fn iter_events(&self) -> impl Iterator<Item = &Event> {
        self.months.values().flat_map(|month| month.iter_events())
    }
}

impl MonthEvents {
    /// Events of `day`, if it has any.
    pub fn get(&self, day: u32) -> Option<&[Event]> {
        self.days.get(&day).map(Vec::as_slice)
    }

    /// Days that have at least one event, in ascending order.
    pub fn days(&self) -> impl Iterator<Item = (u32, &[Event])> {
        self.days.iter().map(|(day, events)| (*day, events.as_slice()))
    }

    fn iter_events(&self) -> impl Iterator<Item = &Event> {
        self.days.values().flatten()
    }
}

impl Index<i32> for EventIndex {
    type Output = YearEvents;

    fn index(&self, year: i32) -> &YearEvents {
        self.years.get(&year).unwrap_or(&NO_MONTHS)
    }
}

impl Index<u32> for YearEvents {
    type Output = MonthEvents;

    fn index(&self, month: u32) -> &MonthEvents {
        self.months.get(&month).unwrap_or(&NO_DAYS)
    }
}

impl Index<u32> for MonthEvents {
    type Output = [Event];

    fn index(&self, day: u32) -> &[Event] {
        self.get(day).unwrap_or(&[])
    }
}
