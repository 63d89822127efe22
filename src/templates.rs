use crate::config::{CalendarConfig, SemesterConfig};
use chrono::{Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Named presets that prefill a [`CalendarConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalendarTemplate {
    TwoSemesterIndustrial,
    UkThreeTerm,
    UsSemester,
    AustralianSemester,
}

const DEFAULT_BATCH_COUNT: i32 = 4;

struct Counts {
    weeks: u32,
    dead: u32,
    exam: u32,
    vacation: u32,
}

impl CalendarTemplate {
    const ALL: [CalendarTemplate; 4] = [
        CalendarTemplate::TwoSemesterIndustrial,
        CalendarTemplate::UkThreeTerm,
        CalendarTemplate::UsSemester,
        CalendarTemplate::AustralianSemester,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            CalendarTemplate::TwoSemesterIndustrial => "two_semester_it",
            CalendarTemplate::UkThreeTerm => "uk_three_term",
            CalendarTemplate::UsSemester => "us_semester",
            CalendarTemplate::AustralianSemester => "au_semester",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            CalendarTemplate::TwoSemesterIndustrial => {
                "Two semesters, industrial training for the graduating batch"
            }
            CalendarTemplate::UkThreeTerm => "UK-style autumn, spring and summer terms",
            CalendarTemplate::UsSemester => "US fall and spring semesters",
            CalendarTemplate::AustralianSemester => "Australian two-semester year from February",
        }
    }

    pub fn variants() -> Vec<(&'static str, &'static str)> {
        Self::ALL
            .iter()
            .map(|template| (template.key(), template.description()))
            .collect()
    }

    fn start_month(&self) -> u32 {
        match self {
            CalendarTemplate::TwoSemesterIndustrial | CalendarTemplate::UsSemester => 8,
            CalendarTemplate::UkThreeTerm => 9,
            CalendarTemplate::AustralianSemester => 2,
        }
    }

    fn semester_counts(&self) -> (Counts, Counts) {
        let c = |weeks, dead, exam, vacation| Counts {
            weeks,
            dead,
            exam,
            vacation,
        };
        match self {
            CalendarTemplate::TwoSemesterIndustrial => (c(15, 1, 3, 3), c(15, 1, 3, 3)),
            CalendarTemplate::UkThreeTerm => (c(12, 1, 2, 4), c(12, 1, 3, 4)),
            CalendarTemplate::UsSemester => (c(15, 1, 1, 4), c(15, 1, 1, 0)),
            CalendarTemplate::AustralianSemester => (c(13, 1, 3, 4), c(13, 1, 3, 0)),
        }
    }

    /// Builds a config for the academic year starting in `start_year`.
    ///
    /// The first semester opens on the first Monday of the preset's start
    /// month. The second semester's start date follows the first semester's
    /// lecture, dead, exam and vacation weeks.
    pub fn build(&self, start_year: i32) -> CalendarConfig {
        let start_date = first_monday(start_year, self.start_month());
        let (first_counts, second_counts) = self.semester_counts();

        let first_semester = semester(start_date, first_counts, true);
        let second_start = start_date
            .checked_add_days(Days::new(7 * u64::from(first_semester.total_weeks())))
            .unwrap_or(NaiveDate::MAX);
        let second_semester = semester(second_start, second_counts, false);

        let academic_year = if self.start_month() <= 2 {
            start_year.to_string()
        } else {
            format!("{}/{}", start_year, start_year.saturating_add(1))
        };

        CalendarConfig {
            academic_year,
            faculty: String::new(),
            university: String::new(),
            batches: default_batches(start_year),
            first_semester,
            second_semester,
            include_industrial_training: matches!(self, CalendarTemplate::TwoSemesterIndustrial),
            graduation_date: None,
        }
    }
}

impl fmt::Display for CalendarTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown calendar template '{0}'")]
pub struct UnknownTemplate(pub String);

impl FromStr for CalendarTemplate {
    type Err = UnknownTemplate;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|template| template.key() == key)
            .ok_or_else(|| UnknownTemplate(s.to_string()))
    }
}

fn semester(start_date: NaiveDate, counts: Counts, include_orientation: bool) -> SemesterConfig {
    SemesterConfig {
        start_date,
        weeks_count: counts.weeks,
        include_orientation,
        dead_weeks: counts.dead,
        exam_weeks: counts.exam,
        vacation_weeks: counts.vacation,
    }
}

fn first_monday(year: i32, month: u32) -> NaiveDate {
    NaiveDate::from_weekday_of_month_opt(year, month, Weekday::Mon, 1).unwrap_or_default()
}

// Intake years, oldest first: the batch that entered four years ago graduates.
fn default_batches(start_year: i32) -> Vec<String> {
    (0..DEFAULT_BATCH_COUNT)
        .rev()
        .map(|years_back| format!("Batch {}", start_year - years_back))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn keys_round_trip_through_from_str() {
        for (key, _) in CalendarTemplate::variants() {
            let template = CalendarTemplate::from_str(key).unwrap();
            assert_eq!(template.key(), key);
        }
        assert!(CalendarTemplate::from_str(" US_Semester ").is_ok());
        assert_eq!(
            CalendarTemplate::from_str("quarters"),
            Err(UnknownTemplate("quarters".into()))
        );
    }

    #[test]
    fn build_starts_on_first_monday() {
        let config = CalendarTemplate::UkThreeTerm.build(2025);
        assert_eq!(
            config.first_semester.start_date,
            NaiveDate::from_ymd_opt(2025, 9, 1).unwrap()
        );
        assert_eq!(config.first_semester.start_date.weekday(), Weekday::Mon);
        assert_eq!(config.academic_year, "2025/2026");
        assert_eq!(
            config.batches,
            vec!["Batch 2022", "Batch 2023", "Batch 2024", "Batch 2025"]
        );
    }

    #[test]
    fn australian_year_is_single_calendar_year() {
        let config = CalendarTemplate::AustralianSemester.build(2026);
        assert_eq!(config.academic_year, "2026");
        assert_eq!(config.first_semester.start_date.month(), 2);
    }
}
