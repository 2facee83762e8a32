//! vevent
//!
//! Extracts basic information on every event of an iCalendar (.ics) file and
//! indexes the events by the date they start on.
//!
//! ```
//! use chrono::NaiveDate;
//! use vevent::Calendar;
//!
//! let calendar = Calendar::new(
//!     "BEGIN:VCALENDAR\r\n\
//!      BEGIN:VEVENT\r\n\
//!      DTSTART:20170118T090000\r\n\
//!      SUMMARY:Standup\r\n\
//!      END:VEVENT\r\n\
//!      END:VCALENDAR\r\n",
//! );
//!
//! let events = &calendar.events()[2017][1][18];
//! assert_eq!(events[0].summary.as_deref(), Some("Standup"));
//!
//! let day = NaiveDate::from_ymd_opt(2017, 1, 18).unwrap();
//! assert_eq!(calendar.get_events_on_day(day).len(), 1);
//! ```
//!
//! Timezones are ignored: the start date of an event is always used as the key.

/// The parsed calendar and its date queries.
pub mod calendar;
/// Error handling.
pub mod error;
/// The event record.
pub mod event;
/// Year → month → day lookup.
pub mod index;
mod parser;

pub use calendar::Calendar;
pub use error::{Error, Result};
pub use event::Event;
pub use index::{EventIndex, MonthEvents, YearEvents};
