use thiserror::Error;

/// Errors raised while reading a calendar.
#[derive(Error, Debug)]
pub enum Error {
    /// Reading the input failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The input is not UTF-8
    #[error("Calendar is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),

    /// A DTSTART/DTEND or other date-time value did not parse
    #[error("Date/time parsing failed: {0}")]
    DateTime(#[from] chrono::ParseError),

    /// The VEVENT block has no readable DTSTART
    #[error("Event has no usable DTSTART")]
    MissingStart,

    /// BEGIN:VEVENT was never matched by END:VEVENT
    #[error("Event block was not closed by END:VEVENT")]
    Unterminated,
}

/// Result type alias for vevent operations.
pub type Result<T> = std::result::Result<T, Error>;
