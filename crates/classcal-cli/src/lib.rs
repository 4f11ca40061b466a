//! Command-line interface for classcal
//!
//! This crate provides the `classcal` command-line tool, which turns a
//! class-day schedule export into an iCalendar file of class meetings.
//!
//! # Quick Start
//!
//! ```bash
//! # Fill in the interactive form, write calendar_with_event.ics
//! classcal convert "Spring 2024 M-T Day Calendar.CSV"
//!
//! # Non-interactive, from a period plan
//! classcal convert schedule.csv --plan week.toml -o classes.ics
//!
//! # See which rows count as class days
//! classcal categorize schedule.csv
//!
//! # Check a written calendar
//! classcal inspect classes.ics
//! ```
//!
//! # Commands
//!
//! ## `convert`
//!
//! Loads the schedule, collects the week's classes, builds one event per
//! class per day and writes the calendar. Existing output is kept unless
//! `--force` is given. `--dry-run` stops before writing.
//!
//! ## `categorize`
//!
//! Lists kept rows with their category code (`M`, `T`, `SM`, `ST`).
//!
//! ## `inspect`
//!
//! Re-reads an `.ics` file and lists its events.
//!
//! ## `completions`
//!
//! Generates shell completion scripts.
//!
//! # Configuration
//!
//! Defaults come from `.classcal.toml` in the home and working directories
//! (see [`config`]):
//!
//! ```toml
//! [paths]
//! input = "Spring 2024 M-T Day Calendar.CSV"
//! output = "classes.ics"
//! plan = "week.toml"
//!
//! [calendar]
//! prodid = "-//Westside High//classcal//EN"
//! reminder_minutes = 10
//! ```
//!
//! # Exit Codes
//!
//! - `0` - Success
//! - `1` - General error
//! - `2` - Invalid arguments
//! - `3` - Form cancelled, nothing written

pub mod config;
pub mod form;

pub use config::Config;
pub use form::{describe_bucket, FormOutcome, PeriodInputSource, PlanFile, PromptForm};
