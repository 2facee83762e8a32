use std::{collections::BTreeMap, sync::LazyLock};

use chrono::{NaiveDate, NaiveDateTime};
use ical::property::{Property, PropertyParser};
use regex::Regex;

use crate::{Error, Event, Result};

/// iCalendar basic date-time, e.g. `20170118T090000` or `20170118T090000Z`.
static TIMESTAMP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]{8}T[0-9]{6})Z?$").expect("valid timestamp pattern"));

/// Walk the unfolded properties of `contents` and cut them into VEVENT blocks.
///
/// Each block yields either the parsed event or the reason it was dropped, in
/// the order the blocks appear in the text.
pub(crate) fn parse_events(contents: &str) -> Vec<Result<Event>> {
    let mut blocks = Vec::new();
    let mut current: Option<EventBuilder> = None;

    for property in PropertyParser::from_reader(contents.as_bytes()) {
        let property = match property {
            Ok(property) => property,
            Err(err) => {
                tracing::debug!("Skipping unreadable line: {}", err);
                continue;
            }
        };

        if is_marker(&property, "BEGIN") {
            if current.replace(EventBuilder::default()).is_some() {
                blocks.push(Err(Error::Unterminated));
            }
        } else if is_marker(&property, "END") {
            match current.take() {
                Some(builder) => blocks.push(builder.build()),
                None => tracing::debug!("END:VEVENT without a matching BEGIN:VEVENT"),
            }
        } else if let Some(builder) = current.as_mut() {
            builder.apply(&property);
        }
    }

    if current.is_some() {
        blocks.push(Err(Error::Unterminated));
    }

    blocks
}

fn is_marker(property: &Property, keyword: &str) -> bool {
    property.name.eq_ignore_ascii_case(keyword)
        && property
            .value
            .as_deref()
            .is_some_and(|value| value.trim().eq_ignore_ascii_case("VEVENT"))
}

#[derive(Default)]
struct EventBuilder {
    start: Option<(NaiveDateTime, bool)>,
    end: Option<NaiveDateTime>,
    summary: Option<String>,
    description: Option<String>,
    location: Option<String>,
    timestamps: BTreeMap<String, NaiveDateTime>,
    properties: BTreeMap<String, String>,
    /// Sub-components (VALARM, ...) currently open inside the event
    nested: Vec<String>,
}

impl EventBuilder {
    fn apply(&mut self, property: &Property) {
        let name = property.name.to_ascii_uppercase();
        let Some(value) = property
            .value
            .as_deref()
            .map(|value| value.trim_end_matches(['\r', '\n']))
            .filter(|value| !value.is_empty())
        else {
            return;
        };

        match name.as_str() {
            "BEGIN" => {
                self.nested.push(value.to_ascii_uppercase());
                return;
            }
            "END" => {
                if let Some(pos) = self
                    .nested
                    .iter()
                    .rposition(|component| component.eq_ignore_ascii_case(value))
                {
                    self.nested.truncate(pos);
                }
                return;
            }
            _ if !self.nested.is_empty() => return,
            _ => {}
        }

        if let Err(err) = self.set(&name, value) {
            tracing::debug!("Ignoring {} property: {}", name, err);
        }
    }

    fn set(&mut self, name: &str, value: &str) -> Result<()> {
        match name {
            "DTSTART" => self.start = Some(parse_moment(value)?),
            "DTEND" => self.end = Some(parse_moment(value)?.0),
            "SUMMARY" => self.summary = Some(unescape_text(value)),
            "DESCRIPTION" => self.description = Some(unescape_text(value)),
            "LOCATION" => self.location = Some(unescape_text(value)),
            _ => {
                if let Some(captures) = TIMESTAMP.captures(value) {
                    let stamp = parse_timestamp(&captures[1])?;
                    self.timestamps.insert(timestamp_key(name), stamp);
                } else {
                    self.properties
                        .insert(name.to_ascii_lowercase(), unescape_text(value));
                }
            }
        }
        Ok(())
    }

    fn build(self) -> Result<Event> {
        let (start, all_day) = self.start.ok_or(Error::MissingStart)?;

        Ok(Event {
            start,
            end: self.end,
            all_day,
            summary: self.summary,
            description: self.description,
            location: self.location,
            timestamps: self.timestamps,
            properties: self.properties,
        })
    }
}

/// `DTSTAMP` → `stamp`, `LAST-MODIFIED` → `last-modified`.
fn timestamp_key(name: &str) -> String {
    name.strip_prefix("DT")
        .filter(|rest| !rest.is_empty())
        .unwrap_or(name)
        .to_ascii_lowercase()
}

/// A DTSTART/DTEND value: a date-time, or a plain date taken as midnight.
/// The flag is set for plain dates.
fn parse_moment(value: &str) -> Result<(NaiveDateTime, bool)> {
    if let Some(captures) = TIMESTAMP.captures(value) {
        return Ok((parse_timestamp(&captures[1])?, false));
    }

    let date = NaiveDate::parse_from_str(value.trim(), "%Y%m%d")?;
    Ok((date.and_time(chrono::NaiveTime::MIN), true))
}

fn parse_timestamp(value: &str) -> Result<NaiveDateTime> {
    let stamp = value.strip_suffix('Z').unwrap_or(value);
    Ok(NaiveDateTime::parse_from_str(stamp, "%Y%m%dT%H%M%S")?)
}

/// Undo iCalendar TEXT escaping. Unknown escapes are kept as written.
fn unescape_text(value: &str) -> String {
    let mut text = String::with_capacity(value.len());
    let mut chars = value.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            text.push(c);
            continue;
        }
        match chars.next() {
            Some('n' | 'N') => text.push('\n'),
            Some(escaped @ (',' | ';' | '\\')) => text.push(escaped),
            Some(other) => {
                text.push('\\');
                text.push(other);
            }
            None => text.push('\\'),
        }
    }

    text
}
