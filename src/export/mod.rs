//! Renders generated weeks for download.
//!
//! Both exporters share the same column layout: `Year`, `Date`, `Week`, then
//! one column per batch in config order. Batch cells carry the status label
//! from [`WeekStatus::label`](crate::status::WeekStatus::label).

pub mod csv_file;
pub mod xlsx;

pub use csv_file::{save_csv, write_csv};
pub use xlsx::{export_xlsx, save_xlsx};

use crate::config::CalendarConfig;
use chrono::NaiveDate;

pub(crate) const FIXED_HEADERS: [&str; 3] = ["Year", "Date", "Week"];

/// `Academic_Calendar_{academicYear}.xlsx`, with path separators and other
/// reserved characters replaced.
pub fn export_file_name(config: &CalendarConfig) -> String {
    let year: String = config
        .academic_year
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '-',
            other => other,
        })
        .collect();
    format!("Academic_Calendar_{year}.xlsx")
}

pub(crate) fn date_range_label(start: NaiveDate, end: NaiveDate) -> String {
    format!("{} - {}", start.format("%d %b"), end.format("%d %b"))
}

pub(crate) fn title(config: &CalendarConfig) -> String {
    let mut title = format!("Academic Calendar {}", config.academic_year.trim());
    let origin: Vec<&str> = [config.faculty.trim(), config.university.trim()]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect();
    if !origin.is_empty() {
        title.push_str(" - ");
        title.push_str(&origin.join(", "));
    }
    title
}
