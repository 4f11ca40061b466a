//! Subject categorizer
//!
//! Maps the free-text `Subject` of a schedule row to the day pattern it
//! represents. Matching is plain substring containment on the capital
//! letters `M` and `T`, so any subject that happens to contain one of them
//! (plus a digit) counts. Subjects tagged `- ECDT SSOC` run on the special
//! bell schedule.

use crate::model::Category;

/// Marker that moves a day onto the special bell schedule
pub const SPECIAL_MARKER: &str = "- ECDT SSOC";

/// Stand-in subject for rows whose `Subject` cell is blank
pub const MISSING_SUBJECT: &str = "Other";

/// Categorize a subject string
///
/// Rules are checked in order, first match wins:
///
/// | Contains `M` | Contains `T` | Special marker | Result |
/// |---|---|---|---|
/// | yes | - | no | `WeekdayA` |
/// | - | yes | no | `WeekdayB` |
/// | yes | - | yes | `SpecialWeekdayA` |
/// | - | yes | yes | `SpecialWeekdayB` |
///
/// A subject without any ASCII digit is always `Excluded`.
///
/// # Examples
///
/// ```
/// use classcal_core::{categorize, Category};
///
/// assert_eq!(categorize("MATH 101"), Category::WeekdayA);
/// assert_eq!(categorize("Staff Workday"), Category::Excluded);
/// ```
#[must_use]
pub fn categorize(subject: &str) -> Category {
    if !subject.chars().any(|c| c.is_ascii_digit()) {
        return Category::Excluded;
    }

    let special = subject.contains(SPECIAL_MARKER);
    let has_m = subject.contains('M');
    let has_t = subject.contains('T');

    match (has_m, has_t, special) {
        (true, _, false) => Category::WeekdayA,
        (false, true, false) => Category::WeekdayB,
        (true, _, true) => Category::SpecialWeekdayA,
        (false, true, true) => Category::SpecialWeekdayB,
        (false, false, _) => Category::Excluded,
    }
}

/// Categorize an optional subject cell; blank cells become [`MISSING_SUBJECT`]
#[must_use]
pub fn categorize_cell(subject: Option<&str>) -> Category {
    categorize(normalize_subject(subject))
}

/// Replace a blank subject with [`MISSING_SUBJECT`]
#[must_use]
pub fn normalize_subject(subject: Option<&str>) -> &str {
    match subject {
        Some(s) if !s.trim().is_empty() => s,
        _ => MISSING_SUBJECT,
    }
}
