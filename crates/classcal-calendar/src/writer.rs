//! iCalendar writer
//!
//! Serializes [`CalendarEvent`]s with the `icalendar` crate. Every event
//! carries a `DISPLAY` alarm and floating (timezone-less) local times.
//!
//! Besides the RFC 5545 `CLASS` and `TRANSP` properties, each VEVENT also
//! gets the `PRIVATE`, `SENSITIVITY` and `SHOWAS` properties that desktop
//! clients importing class schedules look for.

use crate::error::{CalendarError, Result};
use chrono::Duration;
use classcal_core::{BusyStatus, CalendarEvent, Sensitivity};
use icalendar::{Alarm, Calendar, Component, Event, EventLike, Property};
use std::io::Write;
use std::path::Path;

/// Default product identifier
pub const DEFAULT_PRODID: &str = "-//My Calendar//example.com//";

/// iCalendar version written to every file
pub const DEFAULT_VERSION: &str = "2.0";

/// Calendar-level properties
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct CalendarMeta {
    /// Product identifier (PRODID)
    pub prodid: String,
    /// Calendar version (VERSION)
    pub version: String,
}

impl Default for CalendarMeta {
    fn default() -> Self {
        Self {
            prodid: DEFAULT_PRODID.to_string(),
            version: DEFAULT_VERSION.to_string(),
        }
    }
}

/// Build the `icalendar` representation of the events
#[must_use]
pub fn build_calendar(events: &[CalendarEvent], meta: &CalendarMeta) -> Calendar {
    let mut calendar = Calendar::empty();
    calendar.append_property(Property::new("PRODID", &meta.prodid));
    calendar.append_property(Property::new("VERSION", &meta.version));

    for event in events {
        calendar.push(to_vevent(event));
    }
    calendar
}

/// Render events as iCalendar text
///
/// # Examples
///
/// ```
/// use classcal_calendar::{render_calendar, CalendarMeta};
///
/// let ics = render_calendar(&[], &CalendarMeta::default());
/// assert!(ics.starts_with("BEGIN:VCALENDAR"));
/// ```
#[must_use]
pub fn render_calendar(events: &[CalendarEvent], meta: &CalendarMeta) -> String {
    build_calendar(events, meta).to_string()
}

/// Write events to an `.ics` file
///
/// The calendar is rendered into a temporary file next to `path` and then
/// moved into place, so the destination is either fully written or left
/// untouched. An existing file at `path` is replaced.
///
/// Returns the number of bytes written.
///
/// # Errors
///
/// Returns [`CalendarError::WriteError`] if the temporary file cannot be
/// created, written or persisted.
pub fn write_calendar<P: AsRef<Path>>(
    path: P,
    events: &[CalendarEvent],
    meta: &CalendarMeta,
) -> Result<usize> {
    let path = path.as_ref();
    let rendered = render_calendar(events, meta);

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = tempfile::NamedTempFile::new_in(dir)
        .map_err(|e| CalendarError::write_error(path, e))?;
    tmp.write_all(rendered.as_bytes())
        .and_then(|()| tmp.flush())
        .map_err(|e| CalendarError::write_error(path, e))?;
    tmp.persist(path)
        .map_err(|e| CalendarError::write_error(path, e.error))?;

    log::info!(
        "Wrote {} events ({} bytes) to {}",
        events.len(),
        rendered.len(),
        path.display()
    );
    Ok(rendered.len())
}

fn to_vevent(event: &CalendarEvent) -> Event {
    let reminder = Alarm::display(
        &format!("Reminder: {}", event.summary),
        -Duration::minutes(i64::from(event.reminder_minutes_before)),
    );

    Event::new()
        .summary(&event.summary)
        .location(&event.location)
        .priority(u32::from(event.priority))
        .starts(event.start)
        .ends(event.end)
        .add_property("CLASS", class_value(event.sensitivity))
        .add_property("TRANSP", transp_value(event.busy_status))
        .add_property("PRIVATE", if event.private { "TRUE" } else { "FALSE" })
        .add_property("SENSITIVITY", event.sensitivity.as_str())
        .add_property("SHOWAS", event.busy_status.as_str())
        .alarm(reminder)
        .done()
}

const fn class_value(sensitivity: Sensitivity) -> &'static str {
    match sensitivity {
        Sensitivity::Public => "PUBLIC",
        Sensitivity::Private => "PRIVATE",
        Sensitivity::Confidential => "CONFIDENTIAL",
    }
}

const fn transp_value(status: BusyStatus) -> &'static str {
    match status {
        BusyStatus::Busy => "OPAQUE",
        BusyStatus::Free => "TRANSPARENT",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S").unwrap()
    }

    fn algebra() -> CalendarEvent {
        CalendarEvent {
            summary: "Algebra".to_string(),
            location: "Rm 5".to_string(),
            start: at("2024-03-04T07:30:00"),
            end: at("2024-03-04T08:30:00"),
            reminder_minutes_before: 15,
            private: false,
            sensitivity: Sensitivity::Public,
            busy_status: BusyStatus::Busy,
            priority: 0,
        }
    }

    #[test]
    fn test_render_calendar_header() {
        let ics = render_calendar(&[], &CalendarMeta::default());
        assert!(ics.contains("PRODID:-//My Calendar//example.com//"));
        assert!(ics.contains("VERSION:2.0"));
        assert!(!ics.contains("BEGIN:VEVENT"));
        assert!(ics.trim_end().ends_with("END:VCALENDAR"));
    }

    #[test]
    fn test_render_event_properties() {
        let ics = render_calendar(&[algebra()], &CalendarMeta::default());
        assert_eq!(ics.matches("BEGIN:VEVENT").count(), 1);
        assert!(ics.contains("SUMMARY:Algebra"));
        assert!(ics.contains("LOCATION:Rm 5"));
        assert!(ics.contains("DTSTART:20240304T073000"));
        assert!(ics.contains("DTEND:20240304T083000"));
        assert!(ics.contains("CLASS:PUBLIC"));
        assert!(ics.contains("TRANSP:OPAQUE"));
        assert!(ics.contains("PRIVATE:FALSE"));
        assert!(ics.contains("SENSITIVITY:Public"));
        assert!(ics.contains("SHOWAS:Busy"));
        assert!(ics.contains("BEGIN:VALARM"));
        assert!(ics.contains("ACTION:DISPLAY"));
        assert!(ics.contains("Reminder: Algebra"));
    }

    #[test]
    fn test_custom_meta() {
        let meta = CalendarMeta {
            prodid: "-//Westside High//classcal//EN".to_string(),
            version: "2.0".to_string(),
        };
        let ics = render_calendar(&[], &meta);
        assert!(ics.contains("PRODID:-//Westside High//classcal//EN"));
    }

    #[test]
    fn test_write_calendar_replaces_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.ics");
        std::fs::write(&path, "stale").unwrap();

        let bytes = write_calendar(&path, &[algebra()], &CalendarMeta::default()).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(bytes, written.len());
        assert!(written.contains("SUMMARY:Algebra"));
    }

    #[test]
    fn test_write_calendar_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no-such-dir").join("out.ics");
        let err = write_calendar(&path, &[], &CalendarMeta::default()).unwrap_err();
        assert!(matches!(err, CalendarError::WriteError { .. }));
        assert!(!path.exists());
    }
}
