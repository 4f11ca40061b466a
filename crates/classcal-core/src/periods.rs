//! Period time tables
//!
//! Each bell schedule is a fixed mapping from period 1..=7 to clock
//! boundaries. Tables are plain values handed to the
//! [`EventBuilder`](crate::EventBuilder); nothing here is global or mutable.

use crate::error::{ClasscalError, Result};
use crate::model::{Category, Period, PeriodSlot, ScheduleKind, PERIODS_PER_DAY};
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

const fn clock(hour: u32, min: u32) -> NaiveTime {
    match NaiveTime::from_hms_opt(hour, min, 0) {
        Some(t) => t,
        None => panic!("invalid clock time in built-in period table"),
    }
}

const REGULAR: [(NaiveTime, NaiveTime); 7] = [
    (clock(7, 30), clock(8, 30)),
    (clock(8, 30), clock(9, 30)),
    (clock(9, 30), clock(10, 30)),
    (clock(10, 30), clock(11, 30)),
    (clock(12, 45), clock(13, 45)),
    (clock(13, 45), clock(14, 45)),
    (clock(14, 45), clock(15, 45)),
];

const SPECIAL: [(NaiveTime, NaiveTime); 7] = [
    (clock(7, 30), clock(8, 20)),
    (clock(8, 27), clock(9, 17)),
    (clock(9, 24), clock(10, 14)),
    (clock(10, 21), clock(11, 11)),
    (clock(13, 22), clock(14, 12)),
    (clock(14, 19), clock(15, 9)),
    (clock(15, 16), clock(16, 6)),
];

/// Clock times accepted in configuration, most specific first
const CLOCK_FORMATS: [&str; 2] = ["%I:%M:%S %p", "%I:%M %p"];

/// Parse a 12-hour clock literal such as `"7:30:00 AM"` or `"1:45 PM"`
///
/// # Errors
///
/// Returns [`ClasscalError::InvalidClockTime`] if no accepted format matches.
pub fn parse_clock(value: &str) -> Result<NaiveTime> {
    let trimmed = value.trim();
    CLOCK_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(trimmed, fmt).ok())
        .ok_or_else(|| ClasscalError::InvalidClockTime {
            value: value.to_string(),
        })
}

/// One slot as written in configuration (`{ start = "7:30 AM", end = "8:30 AM" }`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClockSlot {
    pub start: String,
    pub end: String,
}

/// Bell schedule: seven consecutive period slots
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PeriodTable {
    slots: [(NaiveTime, NaiveTime); 7],
}

impl PeriodTable {
    /// The regular bell schedule
    #[must_use]
    pub const fn regular() -> Self {
        Self { slots: REGULAR }
    }

    /// The compressed special schedule
    #[must_use]
    pub const fn special() -> Self {
        Self { slots: SPECIAL }
    }

    /// Build a table from configured clock strings
    ///
    /// # Errors
    ///
    /// Returns an error if there are not exactly seven slots, a time does not
    /// parse, or a slot does not end after it starts.
    pub fn from_clock_slots(slots: &[ClockSlot]) -> Result<Self> {
        if slots.len() != usize::from(PERIODS_PER_DAY) {
            return Err(ClasscalError::invalid_table(format!(
                "expected {PERIODS_PER_DAY} slots, found {}",
                slots.len()
            )));
        }

        let mut table = Self::regular();
        for (i, slot) in slots.iter().enumerate() {
            let start = parse_clock(&slot.start)?;
            let end = parse_clock(&slot.end)?;
            if end <= start {
                return Err(ClasscalError::invalid_table(format!(
                    "period {} ends ({}) before it starts ({})",
                    i + 1,
                    slot.end,
                    slot.start
                )));
            }
            table.slots[i] = (start, end);
        }
        Ok(table)
    }

    /// Clock boundaries of a period
    #[must_use]
    pub const fn slot(&self, period: Period) -> PeriodSlot {
        let (start, end) = self.slots[period.index()];
        PeriodSlot { period, start, end }
    }

    /// All slots in period order
    pub fn slots(&self) -> impl Iterator<Item = PeriodSlot> + '_ {
        Period::all().map(|p| self.slot(p))
    }
}

/// The two bell schedules, chosen per row by category
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PeriodTables {
    pub regular: PeriodTable,
    pub special: PeriodTable,
}

impl Default for PeriodTables {
    fn default() -> Self {
        Self {
            regular: PeriodTable::regular(),
            special: PeriodTable::special(),
        }
    }
}

impl PeriodTables {
    /// Table for a schedule kind
    #[must_use]
    pub const fn get(&self, kind: ScheduleKind) -> &PeriodTable {
        match kind {
            ScheduleKind::Regular => &self.regular,
            ScheduleKind::Special => &self.special,
        }
    }

    /// Table used by rows of `category`, `None` for excluded rows
    #[must_use]
    pub fn for_category(&self, category: Category) -> Option<&PeriodTable> {
        category.schedule_kind().map(|kind| self.get(kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(n: u8) -> Period {
        Period::new(n).unwrap()
    }

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_regular_period_5_spans_lunch() {
        let slot = PeriodTable::regular().slot(p(5));
        assert_eq!(slot.start, t(12, 45));
        assert_eq!(slot.end, t(13, 45));
    }

    #[test]
    fn test_regular_table() {
        let table = PeriodTable::regular();
        assert_eq!(table.slot(p(1)).start, t(7, 30));
        assert_eq!(table.slot(p(4)).end, t(11, 30));
        assert_eq!(table.slot(p(7)).end, t(15, 45));
    }

    #[test]
    fn test_special_table() {
        let table = PeriodTable::special();
        assert_eq!(table.slot(p(1)).end, t(8, 20));
        assert_eq!(table.slot(p(2)).start, t(8, 27));
        assert_eq!(table.slot(p(5)).start, t(13, 22));
        assert_eq!(table.slot(p(6)).end, t(15, 9));
        assert_eq!(table.slot(p(7)).end, t(16, 6));
    }

    #[test]
    fn test_slots_are_ordered() {
        for table in [PeriodTable::regular(), PeriodTable::special()] {
            let slots: Vec<_> = table.slots().collect();
            assert_eq!(slots.len(), 7);
            for pair in slots.windows(2) {
                assert!(pair[0].start < pair[0].end);
                assert!(pair[0].end <= pair[1].start);
            }
        }
    }

    #[test]
    fn test_selection_by_category() {
        let tables = PeriodTables::default();
        assert_eq!(
            tables.for_category(Category::WeekdayB),
            Some(&PeriodTable::regular())
        );
        assert_eq!(
            tables.for_category(Category::SpecialWeekdayA),
            Some(&PeriodTable::special())
        );
        assert_eq!(tables.for_category(Category::Excluded), None);
    }

    #[test]
    fn test_parse_clock_formats() {
        assert_eq!(parse_clock("7:30:00 AM").unwrap(), t(7, 30));
        assert_eq!(parse_clock("12:45:00 PM").unwrap(), t(12, 45));
        assert_eq!(parse_clock(" 1:45 PM ").unwrap(), t(13, 45));
        assert!(parse_clock("13:45").is_err());
        assert!(parse_clock("noon").is_err());
    }

    fn clock_slots(pairs: &[(&str, &str)]) -> Vec<ClockSlot> {
        pairs
            .iter()
            .map(|(s, e)| ClockSlot {
                start: (*s).to_string(),
                end: (*e).to_string(),
            })
            .collect()
    }

    #[test]
    fn test_table_from_config() {
        let slots = clock_slots(&[
            ("8:00 AM", "8:45 AM"),
            ("8:50 AM", "9:35 AM"),
            ("9:40 AM", "10:25 AM"),
            ("10:30 AM", "11:15 AM"),
            ("12:00 PM", "12:45 PM"),
            ("12:50 PM", "1:35 PM"),
            ("1:40 PM", "2:25 PM"),
        ]);
        let table = PeriodTable::from_clock_slots(&slots).unwrap();
        assert_eq!(table.slot(p(1)).start, t(8, 0));
        assert_eq!(table.slot(p(7)).end, t(14, 25));
    }

    #[test]
    fn test_table_from_config_rejects_bad_shapes() {
        let short = clock_slots(&[("8:00 AM", "8:45 AM")]);
        assert!(matches!(
            PeriodTable::from_clock_slots(&short),
            Err(ClasscalError::InvalidPeriodTable { .. })
        ));

        let mut backwards = clock_slots(&[("8:00 AM", "8:45 AM"); 7]);
        backwards[3] = ClockSlot {
            start: "11:00 AM".to_string(),
            end: "10:00 AM".to_string(),
        };
        assert!(matches!(
            PeriodTable::from_clock_slots(&backwards),
            Err(ClasscalError::InvalidPeriodTable { .. })
        ));

        let mut garbled = clock_slots(&[("8:00 AM", "8:45 AM"); 7]);
        garbled[0].end = "later".to_string();
        assert!(matches!(
            PeriodTable::from_clock_slots(&garbled),
            Err(ClasscalError::InvalidClockTime { .. })
        ));
    }
}
