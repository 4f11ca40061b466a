//! # classcal-core
//!
//! Turns a class-day schedule export into concrete class meetings.
//!
//! ## Pipeline
//!
//! 1. [`load_schedule`] reads the CSV export and keeps class days, each
//!    tagged with a [`Category`] by [`categorize`].
//! 2. The user supplies a [`WeekPlan`]: class name and location for each of
//!    the seven periods of an A-day (`M`) and a B-day (`T`).
//! 3. [`EventBuilder::build`] combines each day with the matching bell
//!    schedule from [`PeriodTables`] and emits [`CalendarEvent`]s.
//!
//! Serialization to iCalendar lives in `classcal-calendar`.
//!
//! ## Quick Start
//!
//! ```no_run
//! use classcal_core::{load_schedule, Bucket, EventBuilder, Period, WeekPlan};
//!
//! let rows = load_schedule("Spring 2024 M-T Day Calendar.CSV")?;
//! let plan = WeekPlan::new()
//!     .with(Bucket::A, Period::new(1)?, "Algebra", "Rm 5")
//!     .with(Bucket::B, Period::new(1)?, "Biology", "Lab 2");
//!
//! let events = EventBuilder::default().build(&rows, &plan);
//! println!("{} class meetings", events.len());
//! # Ok::<(), classcal_core::ClasscalError>(())
//! ```
//!
//! ## Categories
//!
//! | Code | Category | Bucket | Bell schedule |
//! |------|----------|--------|---------------|
//! | `M` | `WeekdayA` | A | regular |
//! | `T` | `WeekdayB` | B | regular |
//! | `SM` | `SpecialWeekdayA` | A | special |
//! | `ST` | `SpecialWeekdayB` | B | special |
//! | `Other` | `Excluded` | - | - |

pub mod builder;
pub mod categorize;
pub mod error;
pub mod loader;
pub mod model;
pub mod periods;

pub use builder::{EventBuilder, DEFAULT_REMINDER_MINUTES};
pub use categorize::{categorize, categorize_cell};
pub use error::{ClasscalError, Result};
pub use loader::{load_schedule, read_schedule, CategorizedRow};
pub use model::{
    Bucket, BusyStatus, CalendarEvent, Category, Period, PeriodInput, PeriodSlot, ScheduleKind,
    ScheduleRow, Sensitivity, WeekPlan, PERIODS_PER_DAY,
};
pub use periods::{parse_clock, ClockSlot, PeriodTable, PeriodTables};
