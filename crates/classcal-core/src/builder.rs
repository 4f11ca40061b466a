//! Event builder
//!
//! Joins categorized schedule rows with the user's [`WeekPlan`] and the bell
//! schedules to produce concrete [`CalendarEvent`]s.

use crate::loader::CategorizedRow;
use crate::model::{BusyStatus, CalendarEvent, Sensitivity, WeekPlan};
use crate::periods::PeriodTables;

/// Default reminder lead time in minutes
pub const DEFAULT_REMINDER_MINUTES: u32 = 15;

/// Builds calendar events from schedule rows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventBuilder {
    tables: PeriodTables,
    reminder_minutes: u32,
}

impl Default for EventBuilder {
    fn default() -> Self {
        Self::new(PeriodTables::default())
    }
}

impl EventBuilder {
    /// Create a builder over the given bell schedules
    #[must_use]
    pub const fn new(tables: PeriodTables) -> Self {
        Self {
            tables,
            reminder_minutes: DEFAULT_REMINDER_MINUTES,
        }
    }

    /// Set how many minutes before start each reminder fires
    #[must_use]
    pub const fn with_reminder_minutes(mut self, minutes: u32) -> Self {
        self.reminder_minutes = minutes;
        self
    }

    /// Bell schedules in use
    #[must_use]
    pub const fn tables(&self) -> &PeriodTables {
        &self.tables
    }

    /// Produce one event per class-bearing period of every kept row
    ///
    /// Events come out in row order, then period order. Excluded rows and
    /// periods with an empty class name produce nothing.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use classcal_core::{Bucket, CategorizedRow, Category, EventBuilder, Period, ScheduleRow, WeekPlan};
    ///
    /// let rows = vec![CategorizedRow {
    ///     row: ScheduleRow {
    ///         subject: "M101".to_string(),
    ///         date: NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
    ///     },
    ///     category: Category::WeekdayA,
    /// }];
    /// let plan = WeekPlan::new().with(Bucket::A, Period::new(1)?, "Algebra", "Rm 5");
    ///
    /// let events = EventBuilder::default().build(&rows, &plan);
    /// assert_eq!(events.len(), 1);
    /// assert_eq!(events[0].start.to_string(), "2024-03-04 07:30:00");
    /// # Ok::<(), classcal_core::ClasscalError>(())
    /// ```
    #[must_use]
    pub fn build(&self, rows: &[CategorizedRow], plan: &WeekPlan) -> Vec<CalendarEvent> {
        let mut events = Vec::new();

        for entry in rows {
            let (Some(bucket), Some(table)) = (
                entry.category.bucket(),
                self.tables.for_category(entry.category),
            ) else {
                continue;
            };

            for input in plan.bucket(bucket).iter().filter(|p| p.has_class()) {
                let slot = table.slot(input.period);
                events.push(CalendarEvent {
                    summary: input.class_name.clone(),
                    location: input.location.clone(),
                    start: entry.row.date.and_time(slot.start),
                    end: entry.row.date.and_time(slot.end),
                    reminder_minutes_before: self.reminder_minutes,
                    private: false,
                    sensitivity: Sensitivity::Public,
                    busy_status: BusyStatus::Busy,
                    priority: 0,
                });
            }
        }

        log::info!(
            "Built {} events from {} schedule rows",
            events.len(),
            rows.len()
        );
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Bucket, Category, Period, ScheduleRow};
    use chrono::{NaiveDate, NaiveDateTime};

    fn p(n: u8) -> Period {
        Period::new(n).unwrap()
    }

    fn row(subject: &str, y: i32, m: u32, d: u32, category: Category) -> CategorizedRow {
        CategorizedRow {
            row: ScheduleRow {
                subject: subject.to_string(),
                date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            },
            category,
        }
    }

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S").unwrap()
    }

    #[test]
    fn test_single_event() {
        let rows = [row("M101", 2024, 3, 4, Category::WeekdayA)];
        let plan = WeekPlan::new().with(Bucket::A, p(1), "Algebra", "Rm 5");

        let events = EventBuilder::default().build(&rows, &plan);
        assert_eq!(events.len(), 1);

        let event = &events[0];
        assert_eq!(event.summary, "Algebra");
        assert_eq!(event.location, "Rm 5");
        assert_eq!(event.start, at("2024-03-04T07:30:00"));
        assert_eq!(event.end, at("2024-03-04T08:30:00"));
        assert_eq!(event.reminder_minutes_before, 15);
        assert!(!event.private);
        assert_eq!(event.sensitivity, Sensitivity::Public);
        assert_eq!(event.busy_status, BusyStatus::Busy);
        assert_eq!(event.priority, 0);
    }

    #[test]
    fn test_empty_class_is_skipped() {
        let rows = [row("M1", 2024, 3, 4, Category::WeekdayA)];
        let plan = WeekPlan::new()
            .with(Bucket::A, p(2), "", "Rm 9")
            .with(Bucket::A, p(3), "History", "");

        let events = EventBuilder::default().build(&rows, &plan);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].summary, "History");
        assert_eq!(events[0].location, "");
        assert_eq!(events[0].start, at("2024-03-04T09:30:00"));
    }

    #[test]
    fn test_bucket_selection() {
        let rows = [
            row("M1", 2024, 3, 4, Category::WeekdayA),
            row("T1", 2024, 3, 5, Category::WeekdayB),
        ];
        let plan = WeekPlan::new()
            .with(Bucket::A, p(1), "Algebra", "Rm 5")
            .with(Bucket::B, p(7), "Band", "Music Hall");

        let events = EventBuilder::default().build(&rows, &plan);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].summary, "Algebra");
        assert_eq!(events[1].summary, "Band");
        assert_eq!(events[1].start, at("2024-03-05T14:45:00"));
        assert_eq!(events[1].end, at("2024-03-05T15:45:00"));
    }

    #[test]
    fn test_special_schedule_times() {
        let rows = [
            row("M2 - ECDT SSOC", 2024, 4, 1, Category::SpecialWeekdayA),
            row("T2 - ECDT SSOC", 2024, 4, 2, Category::SpecialWeekdayB),
        ];
        let plan = WeekPlan::new()
            .with(Bucket::A, p(5), "Biology", "Lab 1")
            .with(Bucket::B, p(2), "Spanish", "Rm 12");

        let events = EventBuilder::default().build(&rows, &plan);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].start, at("2024-04-01T13:22:00"));
        assert_eq!(events[0].end, at("2024-04-01T14:12:00"));
        assert_eq!(events[1].start, at("2024-04-02T08:27:00"));
        assert_eq!(events[1].end, at("2024-04-02T09:17:00"));
    }

    #[test]
    fn test_excluded_rows_produce_nothing() {
        let rows = [row("Holiday", 2024, 3, 4, Category::Excluded)];
        let plan = WeekPlan::new().with(Bucket::A, p(1), "Algebra", "Rm 5");
        assert!(EventBuilder::default().build(&rows, &plan).is_empty());
    }

    #[test]
    fn test_one_event_per_row_and_filled_period() {
        let rows = [
            row("M1", 2024, 3, 4, Category::WeekdayA),
            row("T1", 2024, 3, 5, Category::WeekdayB),
            row("M2", 2024, 3, 6, Category::WeekdayA),
            row("T2 - ECDT SSOC", 2024, 3, 7, Category::SpecialWeekdayB),
        ];
        let mut plan = WeekPlan::new();
        for period in Period::all() {
            plan.set(Bucket::A, period, format!("A{period}"), "");
        }
        plan.set(Bucket::B, p(1), "B1", "");
        plan.set(Bucket::B, p(4), "B4", "");

        let events = EventBuilder::default().build(&rows, &plan);
        assert_eq!(events.len(), 7 + 2 + 7 + 2);

        // Row order first, then period order.
        let summaries: Vec<_> = events.iter().map(|e| e.summary.as_str()).collect();
        assert_eq!(&summaries[..3], ["A1", "A2", "A3"]);
        assert_eq!(&summaries[7..9], ["B1", "B4"]);
    }

    #[test]
    fn test_custom_reminder() {
        let rows = [row("M1", 2024, 3, 4, Category::WeekdayA)];
        let plan = WeekPlan::new().with(Bucket::A, p(1), "Algebra", "Rm 5");
        let events = EventBuilder::default()
            .with_reminder_minutes(5)
            .build(&rows, &plan);
        assert_eq!(events[0].reminder_minutes_before, 5);
    }
}
