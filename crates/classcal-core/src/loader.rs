//! Schedule table loader
//!
//! Reads the calendar export (one row per day, at least `Subject` and
//! `Start Date` columns), categorizes each row and keeps the class days.
//! Rows are filtered before their dates are parsed, so junk dates on
//! non-class rows (holidays, notes) never fail a run.

use crate::categorize::{categorize, normalize_subject};
use crate::error::{ClasscalError, Result};
use crate::model::{Category, ScheduleRow};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Header of the subject column
pub const SUBJECT_COLUMN: &str = "Subject";

/// Header of the date column
pub const START_DATE_COLUMN: &str = "Start Date";

/// Date format of the `Start Date` column (month/day/year)
pub const START_DATE_FORMAT: &str = "%m/%d/%Y";

/// A schedule row together with its category
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CategorizedRow {
    #[serde(flatten)]
    pub row: ScheduleRow,
    pub category: Category,
}

/// Load and categorize a schedule CSV file
///
/// Only rows whose category is not [`Category::Excluded`] are returned, in
/// file order.
///
/// # Errors
///
/// Returns an error if the file cannot be opened, the CSV is malformed, a
/// required column is missing, or a kept row has an unparseable date.
///
/// # Examples
///
/// ```no_run
/// use classcal_core::load_schedule;
///
/// let rows = load_schedule("Spring 2024 M-T Day Calendar.CSV")?;
/// for r in &rows {
///     println!("{} {} {}", r.row.date, r.category, r.row.subject);
/// }
/// # Ok::<(), classcal_core::ClasscalError>(())
/// ```
pub fn load_schedule<P: AsRef<Path>>(path: P) -> Result<Vec<CategorizedRow>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| ClasscalError::io(path, e))?;
    log::info!("Loading schedule from {}", path.display());
    read_schedule(file)
}

/// Categorize schedule rows from any reader
///
/// # Errors
///
/// See [`load_schedule`].
pub fn read_schedule<R: Read>(reader: R) -> Result<Vec<CategorizedRow>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let subject_idx = column_index(&headers, SUBJECT_COLUMN)?;
    let date_idx = column_index(&headers, START_DATE_COLUMN)?;

    let mut rows = Vec::new();
    let mut counts: BTreeMap<&'static str, usize> = BTreeMap::new();

    for (i, record) in csv_reader.records().enumerate() {
        let record = record?;
        let row_number = i + 1;

        let subject = normalize_subject(record.get(subject_idx));
        let category = categorize(subject);
        *counts.entry(category.code()).or_default() += 1;

        if category == Category::Excluded {
            log::debug!("Row {row_number}: skipping {subject:?}");
            continue;
        }

        let raw_date = record.get(date_idx).unwrap_or_default();
        let date = parse_start_date(raw_date, row_number)?;
        log::debug!("Row {row_number}: {date} {category} {subject:?}");

        rows.push(CategorizedRow {
            row: ScheduleRow {
                subject: subject.to_string(),
                date,
            },
            category,
        });
    }

    log::info!("Categorized schedule rows: {counts:?}");
    Ok(rows)
}

fn column_index(headers: &csv::StringRecord, column: &'static str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h == column)
        .ok_or(ClasscalError::MissingColumn { column })
}

fn parse_start_date(value: &str, row: usize) -> Result<NaiveDate> {
    let trimmed = value.trim();
    let date_error = |source| ClasscalError::DateParse {
        row,
        value: value.to_string(),
        source,
    };

    // `%Y` alone would take `3/4/24` as the year 24.
    if !has_four_digit_year(trimmed) {
        return Err(date_error(None));
    }
    NaiveDate::parse_from_str(trimmed, START_DATE_FORMAT).map_err(|e| date_error(Some(e)))
}

fn has_four_digit_year(value: &str) -> bool {
    value
        .rsplit('/')
        .next()
        .is_some_and(|year| year.len() == 4 && year.bytes().all(|b| b.is_ascii_digit()))
}
