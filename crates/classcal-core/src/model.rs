//! Schedule and calendar data model

use crate::error::{ClasscalError, Result};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of class periods in a school day
pub const PERIODS_PER_DAY: u8 = 7;

/// One row of the schedule export
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScheduleRow {
    /// Subject text as exported (e.g. `"M1 Day"`)
    pub subject: String,
    /// Calendar date of the row
    pub date: NaiveDate,
}

/// Day pattern a subject belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// A-day on the regular bell schedule
    WeekdayA,
    /// B-day on the regular bell schedule
    WeekdayB,
    /// A-day on the special bell schedule
    SpecialWeekdayA,
    /// B-day on the special bell schedule
    SpecialWeekdayB,
    /// Not a class day
    Excluded,
}

impl Category {
    /// Input bucket whose classes run on this day
    #[must_use]
    pub const fn bucket(self) -> Option<Bucket> {
        match self {
            Self::WeekdayA | Self::SpecialWeekdayA => Some(Bucket::A),
            Self::WeekdayB | Self::SpecialWeekdayB => Some(Bucket::B),
            Self::Excluded => None,
        }
    }

    /// Bell schedule used on this day
    #[must_use]
    pub const fn schedule_kind(self) -> Option<ScheduleKind> {
        match self {
            Self::WeekdayA | Self::WeekdayB => Some(ScheduleKind::Regular),
            Self::SpecialWeekdayA | Self::SpecialWeekdayB => Some(ScheduleKind::Special),
            Self::Excluded => None,
        }
    }

    /// Short code used in listings (`M`, `T`, `SM`, `ST`, `Other`)
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::WeekdayA => "M",
            Self::WeekdayB => "T",
            Self::SpecialWeekdayA => "SM",
            Self::SpecialWeekdayB => "ST",
            Self::Excluded => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.code())
    }
}

/// Which bell schedule applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScheduleKind {
    /// Regular bell schedule
    Regular,
    /// Compressed special schedule
    Special,
}

/// Weekday bucket (A/B alternating days)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Bucket {
    /// A-days, labelled `M`
    A,
    /// B-days, labelled `T`
    B,
}

impl Bucket {
    /// Both buckets, in form order
    pub const ALL: [Self; 2] = [Self::A, Self::B];

    /// Label used on forms and in plan files
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::A => "M",
            Self::B => "T",
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Class period number, always within `1..=7`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Period(u8);

impl Period {
    /// Create a period, rejecting numbers outside `1..=7`
    ///
    /// # Errors
    ///
    /// Returns [`ClasscalError::InvalidPeriod`] when `n` is out of range.
    pub fn new(n: u8) -> Result<Self> {
        if (1..=PERIODS_PER_DAY).contains(&n) {
            Ok(Self(n))
        } else {
            Err(ClasscalError::InvalidPeriod(n))
        }
    }

    /// Period number
    #[inline]
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Zero-based slot index
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        (self.0 - 1) as usize
    }

    /// All periods of the day, first to last
    pub fn all() -> impl Iterator<Item = Self> {
        (1..=PERIODS_PER_DAY).map(Self)
    }
}

impl TryFrom<u8> for Period {
    type Error = ClasscalError;

    fn try_from(n: u8) -> Result<Self> {
        Self::new(n)
    }
}

impl From<Period> for u8 {
    fn from(p: Period) -> Self {
        p.0
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Clock boundaries of one period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PeriodSlot {
    pub period: Period,
    pub start: NaiveTime,
    pub end: NaiveTime,
}

/// User-entered class and location for one bucket/period
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PeriodInput {
    pub bucket: Bucket,
    pub period: Period,
    /// Empty means no class this period
    pub class_name: String,
    pub location: String,
}

impl PeriodInput {
    /// Whether this period produces an event
    #[inline]
    #[must_use]
    pub fn has_class(&self) -> bool {
        !self.class_name.is_empty()
    }
}

/// Everything the user entered for one run: seven periods per bucket
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct WeekPlan {
    a: Vec<PeriodInput>,
    b: Vec<PeriodInput>,
}

impl Default for WeekPlan {
    fn default() -> Self {
        let blank = |bucket| {
            Period::all()
                .map(|period| PeriodInput {
                    bucket,
                    period,
                    class_name: String::new(),
                    location: String::new(),
                })
                .collect()
        };
        Self {
            a: blank(Bucket::A),
            b: blank(Bucket::B),
        }
    }
}

impl WeekPlan {
    /// Plan with every period empty
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set class and location for one bucket/period
    pub fn set(
        &mut self,
        bucket: Bucket,
        period: Period,
        class_name: impl Into<String>,
        location: impl Into<String>,
    ) {
        let input = &mut self.bucket_mut(bucket)[period.index()];
        input.class_name = class_name.into();
        input.location = location.into();
    }

    /// Builder form of [`WeekPlan::set`]
    #[must_use]
    pub fn with(
        mut self,
        bucket: Bucket,
        period: Period,
        class_name: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        self.set(bucket, period, class_name, location);
        self
    }

    /// Entry for one bucket/period
    #[must_use]
    pub fn get(&self, bucket: Bucket, period: Period) -> &PeriodInput {
        &self.bucket(bucket)[period.index()]
    }

    /// The seven entries of a bucket, in period order
    #[must_use]
    pub fn bucket(&self, bucket: Bucket) -> &[PeriodInput] {
        match bucket {
            Bucket::A => &self.a,
            Bucket::B => &self.b,
        }
    }

    fn bucket_mut(&mut self, bucket: Bucket) -> &mut [PeriodInput] {
        match bucket {
            Bucket::A => &mut self.a,
            Bucket::B => &mut self.b,
        }
    }

    /// Number of periods with a class entered, across both buckets
    #[must_use]
    pub fn class_count(&self) -> usize {
        self.a.iter().chain(&self.b).filter(|p| p.has_class()).count()
    }
}

/// Event sensitivity (maps to iCalendar `CLASS`)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sensitivity {
    #[default]
    Public,
    Private,
    Confidential,
}

impl Sensitivity {
    /// Display name as written by desktop calendar clients
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Public => "Public",
            Self::Private => "Private",
            Self::Confidential => "Confidential",
        }
    }
}

/// Free/busy status shown for the event
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BusyStatus {
    #[default]
    Busy,
    Free,
}

impl BusyStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Busy => "Busy",
            Self::Free => "Free",
        }
    }
}

/// A concrete class meeting to be written to the calendar
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub summary: String,
    pub location: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub reminder_minutes_before: u32,
    pub private: bool,
    pub sensitivity: Sensitivity,
    pub busy_status: BusyStatus,
    pub priority: u8,
}
