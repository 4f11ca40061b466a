//! # classcal-calendar
//!
//! iCalendar output for classcal, plus a reader to check what was written.
//!
//! ## Writing
//!
//! ```no_run
//! use classcal_calendar::{write_calendar, CalendarMeta};
//! use classcal_core::{load_schedule, Bucket, EventBuilder, Period, WeekPlan};
//!
//! let rows = load_schedule("Spring 2024 M-T Day Calendar.CSV")?;
//! let plan = WeekPlan::new().with(Bucket::A, Period::new(1)?, "Algebra", "Rm 5");
//! let events = EventBuilder::default().build(&rows, &plan);
//!
//! write_calendar("calendar_with_event.ics", &events, &CalendarMeta::default())?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Each event becomes a VEVENT with floating local `DTSTART`/`DTEND` and a
//! `DISPLAY` alarm that fires `reminder_minutes_before` the start.
//!
//! ## Reading
//!
//! ```no_run
//! use classcal_calendar::parse_ics;
//!
//! let calendar = parse_ics("calendar_with_event.ics")?;
//! for event in &calendar.events {
//!     println!("{} {:?} - {:?} @ {:?}", event.summary, event.start, event.end, event.location);
//! }
//! # Ok::<(), classcal_calendar::CalendarError>(())
//! ```

pub mod error;
pub mod reader;
pub mod writer;

pub use error::{CalendarError, Result};
pub use reader::{parse_ics, parse_ics_str, IcsInfo, ParsedAlarm, ParsedEvent};
pub use writer::{
    build_calendar, render_calendar, write_calendar, CalendarMeta, DEFAULT_PRODID,
    DEFAULT_VERSION,
};
