//! ICS/iCalendar reader
//!
//! Parses `.ics` files back into plain event records using the `ical`
//! crate, so written calendars can be inspected and checked.
//!
//! ## Example
//!
//! ```no_run
//! use classcal_calendar::parse_ics;
//!
//! let calendar = parse_ics("calendar_with_event.ics")?;
//! println!("Found {} events", calendar.events.len());
//! # Ok::<(), classcal_calendar::CalendarError>(())
//! ```

use crate::error::{CalendarError, Result};
use chrono::NaiveDateTime;
use ical::parser::ical::component::{IcalAlarm, IcalCalendar, IcalEvent};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

const DATETIME_FORMAT: &str = "%Y%m%dT%H%M%S";

/// Information about an ICS calendar file
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct IcsInfo {
    /// Calendar version (usually "2.0")
    pub version: Option<String>,

    /// Product identifier (PRODID)
    pub prodid: Option<String>,

    /// List of calendar events
    pub events: Vec<ParsedEvent>,
}

/// A calendar event (VEVENT)
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct ParsedEvent {
    /// Event summary/title
    pub summary: String,

    /// Event location
    pub location: Option<String>,

    /// Event start (floating local time)
    pub start: Option<NaiveDateTime>,

    /// Event end (floating local time)
    pub end: Option<NaiveDateTime>,

    /// Event alarms/reminders (VALARM)
    pub alarms: Vec<ParsedAlarm>,
}

/// A calendar alarm/reminder (VALARM)
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct ParsedAlarm {
    /// Alarm action (e.g., DISPLAY, AUDIO, EMAIL)
    pub action: Option<String>,

    /// Alarm trigger (e.g., -PT15M for 15 minutes before)
    pub trigger: Option<String>,

    /// Alarm description
    pub description: Option<String>,
}

impl ParsedAlarm {
    /// Lead time of a relative trigger, in whole minutes before start
    ///
    /// Understands the duration spellings calendar tools emit for the same
    /// offset (`-PT15M`, `-PT900S`, `-P0DT0H15M0S`). A zero offset may be
    /// unsigned (`P0D`). Returns `None` for absolute, after-start or
    /// out-of-range triggers.
    #[must_use]
    pub fn minutes_before(&self) -> Option<u32> {
        let trigger = self.trigger.as_deref()?.trim();
        let (before, body) = match trigger.strip_prefix("-P") {
            Some(body) => (true, body),
            None => (false, trigger.strip_prefix("+P").or_else(|| trigger.strip_prefix('P'))?),
        };

        let seconds = duration_seconds(body)?;
        if seconds % 60 != 0 || (!before && seconds != 0) {
            return None;
        }
        u32::try_from(seconds / 60).ok()
    }
}

/// Seconds in an ISO-8601 duration body (the part after `P`)
fn duration_seconds(body: &str) -> Option<u64> {
    let mut seconds: u64 = 0;
    let mut number = String::new();
    let mut in_time = false;
    for c in body.chars() {
        match c {
            '0'..='9' => number.push(c),
            'T' => in_time = true,
            unit => {
                let value: u64 = number.parse().ok()?;
                number.clear();
                let scale = match (unit, in_time) {
                    ('W', false) => 7 * 86_400,
                    ('D', false) => 86_400,
                    ('H', true) => 3_600,
                    ('M', true) => 60,
                    ('S', true) => 1,
                    _ => return None,
                };
                seconds = seconds.checked_add(value.checked_mul(scale)?)?;
            }
        }
    }
    number.is_empty().then_some(seconds)
}

/// Parse ICS file and extract calendar information
///
/// # Errors
///
/// Returns `CalendarError` if:
/// - File cannot be read
/// - File is not a valid ICS file
pub fn parse_ics<P: AsRef<Path>>(path: P) -> Result<IcsInfo> {
    let path = path.as_ref();

    let file = File::open(path).map_err(|e| CalendarError::read_error(path, e))?;
    parse_reader(BufReader::new(file))
        .map_err(|message| CalendarError::invalid_format(path, message))
}

/// Parse ICS text held in memory
///
/// # Errors
///
/// Returns [`CalendarError::ParseError`] if the text is not valid iCalendar.
pub fn parse_ics_str(content: &str) -> Result<IcsInfo> {
    parse_reader(content.as_bytes()).map_err(CalendarError::ParseError)
}

fn parse_reader<B: BufRead>(reader: B) -> std::result::Result<IcsInfo, String> {
    let mut ics_info = IcsInfo::default();

    for calendar_result in ical::IcalParser::new(reader) {
        let calendar = calendar_result.map_err(|e| format!("ICS parse error: {e}"))?;
        collect_calendar(&calendar, &mut ics_info);
    }

    log::debug!("Parsed {} events", ics_info.events.len());
    Ok(ics_info)
}

fn collect_calendar(calendar: &IcalCalendar, ics_info: &mut IcsInfo) {
    for property in &calendar.properties {
        match property.name.as_str() {
            "VERSION" => {
                ics_info.version.clone_from(&property.value);
            }
            "PRODID" => {
                ics_info.prodid.clone_from(&property.value);
            }
            _ => {}
        }
    }

    ics_info
        .events
        .extend(calendar.events.iter().filter_map(parse_event));
}

/// Parse a VEVENT component
fn parse_event(event: &IcalEvent) -> Option<ParsedEvent> {
    let mut parsed = ParsedEvent::default();

    for property in &event.properties {
        let value = property.value.as_deref();
        match property.name.as_str() {
            "SUMMARY" => {
                parsed.summary = value.map(unescape_text).unwrap_or_default();
            }
            "LOCATION" => {
                parsed.location = value.map(unescape_text);
            }
            "DTSTART" => {
                parsed.start = value.and_then(parse_datetime);
            }
            "DTEND" => {
                parsed.end = value.and_then(parse_datetime);
            }
            _ => {}
        }
    }

    parsed.alarms = event.alarms.iter().filter_map(parse_alarm).collect();

    // Only return events with a summary
    (!parsed.summary.is_empty()).then_some(parsed)
}

/// Parse a VALARM component
fn parse_alarm(alarm: &IcalAlarm) -> Option<ParsedAlarm> {
    let mut parsed = ParsedAlarm::default();

    for property in &alarm.properties {
        match property.name.as_str() {
            "ACTION" => {
                parsed.action.clone_from(&property.value);
            }
            "TRIGGER" => {
                parsed.trigger.clone_from(&property.value);
            }
            "DESCRIPTION" => {
                parsed.description = property.value.as_deref().map(unescape_text);
            }
            _ => {}
        }
    }

    // Return alarm if it has at least a trigger or action
    (parsed.trigger.is_some() || parsed.action.is_some()).then_some(parsed)
}

fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    let value = value.strip_suffix('Z').unwrap_or(value);
    NaiveDateTime::parse_from_str(value, DATETIME_FORMAT).ok()
}

/// Undo RFC 5545 TEXT escaping
fn unescape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n' | 'N') => out.push('\n'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_nonexistent_ics() {
        let result = parse_ics("nonexistent.ics");
        assert!(matches!(result, Err(CalendarError::ReadError { .. })));
    }

    /// Helper to create a temp ICS file with given content
    fn create_temp_ics(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_parse_class_event() {
        let ics_content = r"BEGIN:VCALENDAR
VERSION:2.0
PRODID:-//My Calendar//example.com//
BEGIN:VEVENT
SUMMARY:Algebra
LOCATION:Rm 5
DTSTART:20240304T073000
DTEND:20240304T083000
BEGIN:VALARM
ACTION:DISPLAY
DESCRIPTION:Reminder: Algebra
TRIGGER:-PT15M
END:VALARM
END:VEVENT
END:VCALENDAR";

        let temp_file = create_temp_ics(ics_content);
        let result = parse_ics(temp_file.path()).unwrap();

        assert_eq!(result.version, Some("2.0".to_string()));
        assert_eq!(
            result.prodid,
            Some("-//My Calendar//example.com//".to_string())
        );
        assert_eq!(result.events.len(), 1);

        let event = &result.events[0];
        assert_eq!(event.summary, "Algebra");
        assert_eq!(event.location, Some("Rm 5".to_string()));
        assert_eq!(
            event.start.unwrap().to_string(),
            "2024-03-04 07:30:00"
        );
        assert_eq!(event.end.unwrap().to_string(), "2024-03-04 08:30:00");

        let alarm = &event.alarms[0];
        assert_eq!(alarm.action, Some("DISPLAY".to_string()));
        assert_eq!(alarm.description, Some("Reminder: Algebra".to_string()));
        assert_eq!(alarm.minutes_before(), Some(15));
    }

    #[test]
    fn test_utc_and_date_only_values() {
        let ics_content = r"BEGIN:VCALENDAR
VERSION:2.0
BEGIN:VEVENT
SUMMARY:Assembly
DTSTART:20240304T140000Z
DTEND;VALUE=DATE:20240305
END:VEVENT
END:VCALENDAR";

        let result = parse_ics_str(ics_content).unwrap();
        let event = &result.events[0];
        assert_eq!(event.start.unwrap().to_string(), "2024-03-04 14:00:00");
        assert_eq!(event.end, None);
    }

    #[test]
    fn test_skip_event_without_summary() {
        let ics_content = r"BEGIN:VCALENDAR
VERSION:2.0
BEGIN:VEVENT
DTSTART:20251208T100000
END:VEVENT
BEGIN:VEVENT
SUMMARY:Valid Event
END:VEVENT
END:VCALENDAR";

        let result = parse_ics_str(ics_content).unwrap();
        assert_eq!(result.events.len(), 1);
        assert_eq!(result.events[0].summary, "Valid Event");
    }

    #[test]
    fn test_escaped_text() {
        let ics_content = "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nBEGIN:VEVENT\r\n\
SUMMARY:Art\\, Studio\r\nLOCATION:Bldg A\\; Rm 2\r\nEND:VEVENT\r\nEND:VCALENDAR\r\n";

        let result = parse_ics_str(ics_content).unwrap();
        assert_eq!(result.events[0].summary, "Art, Studio");
        assert_eq!(result.events[0].location, Some("Bldg A; Rm 2".to_string()));
    }

    #[test]
    fn test_empty_calendar() {
        let result = parse_ics_str("BEGIN:VCALENDAR\nVERSION:2.0\nEND:VCALENDAR").unwrap();
        assert!(result.events.is_empty());
    }

    #[test]
    fn test_trigger_spellings() {
        let alarm = |t: &str| ParsedAlarm {
            trigger: Some(t.to_string()),
            ..ParsedAlarm::default()
        };
        assert_eq!(alarm("-PT15M").minutes_before(), Some(15));
        assert_eq!(alarm("-PT900S").minutes_before(), Some(15));
        assert_eq!(alarm("-P0DT0H15M0S").minutes_before(), Some(15));
        assert_eq!(alarm("-PT1H").minutes_before(), Some(60));
        assert_eq!(alarm("-P1D").minutes_before(), Some(1440));
        assert_eq!(alarm("PT15M").minutes_before(), None);
        assert_eq!(alarm("-PT30S").minutes_before(), None);
        assert_eq!(alarm("19980101T050000Z").minutes_before(), None);
        assert_eq!(ParsedAlarm::default().minutes_before(), None);
    }

    #[test]
    fn test_zero_trigger_spellings() {
        let alarm = |t: &str| ParsedAlarm {
            trigger: Some(t.to_string()),
            ..ParsedAlarm::default()
        };
        assert_eq!(alarm("P0D").minutes_before(), Some(0));
        assert_eq!(alarm("PT0S").minutes_before(), Some(0));
        assert_eq!(alarm("+PT0M").minutes_before(), Some(0));
        assert_eq!(alarm("-PT0S").minutes_before(), Some(0));
        assert_eq!(alarm("P1D").minutes_before(), None);
    }

    #[test]
    fn test_huge_trigger_is_rejected() {
        let alarm = |t: &str| ParsedAlarm {
            trigger: Some(t.to_string()),
            ..ParsedAlarm::default()
        };
        assert_eq!(alarm("-P999999999999999W").minutes_before(), None);
        assert_eq!(alarm("-P99999999999999999999D").minutes_before(), None);
        assert_eq!(alarm("-P18446744073709551615DT1S").minutes_before(), None);
        // Fits in u64 seconds but not in u32 minutes.
        assert_eq!(alarm("-P10000000W").minutes_before(), None);
    }

    #[test]
    fn test_huge_trigger_in_file() {
        let ics_content = "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nBEGIN:VEVENT\r\n\
SUMMARY:Algebra\r\nBEGIN:VALARM\r\nACTION:DISPLAY\r\n\
TRIGGER:-P999999999999999W\r\nEND:VALARM\r\nEND:VEVENT\r\nEND:VCALENDAR\r\n";

        let result = parse_ics_str(ics_content).unwrap();
        let alarm = &result.events[0].alarms[0];
        assert_eq!(alarm.trigger.as_deref(), Some("-P999999999999999W"));
        assert_eq!(alarm.minutes_before(), None);
    }
}
