use crate::calendar::WEEKS_PER_CALENDAR;
use crate::error::ConfigError;
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs::File;
use std::path::Path;

// Days from the first week start to the last graduation day checked in week 52.
const CALENDAR_SPAN_DAYS: u64 = 7 * (WEEKS_PER_CALENDAR as u64 - 1) + 6;

/// Week counts for one semester. All counts are whole weeks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SemesterConfig {
    pub start_date: NaiveDate,
    pub weeks_count: u32,
    #[serde(default)]
    pub include_orientation: bool,
    #[serde(default)]
    pub dead_weeks: u32,
    #[serde(default)]
    pub exam_weeks: u32,
    #[serde(default)]
    pub vacation_weeks: u32,
}

impl SemesterConfig {
    pub fn new(start_date: NaiveDate, weeks_count: u32) -> Self {
        Self {
            start_date,
            weeks_count,
            include_orientation: false,
            dead_weeks: 0,
            exam_weeks: 0,
            vacation_weeks: 0,
        }
    }

    /// Lecture, dead, exam and vacation weeks added together, saturating at `u32::MAX`.
    pub fn total_weeks(&self) -> u32 {
        self.weeks_count
            .saturating_add(self.dead_weeks)
            .saturating_add(self.exam_weeks)
            .saturating_add(self.vacation_weeks)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarConfig {
    pub academic_year: String,
    #[serde(default)]
    pub faculty: String,
    #[serde(default)]
    pub university: String,
    /// Oldest (graduating) batch first, newest (incoming) batch last.
    pub batches: Vec<String>,
    pub first_semester: SemesterConfig,
    pub second_semester: SemesterConfig,
    #[serde(default)]
    pub include_industrial_training: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub graduation_date: Option<NaiveDate>,
}

impl CalendarConfig {
    /// Checks the structural invariants and resolves each batch's role.
    pub fn validate(&self) -> Result<ValidatedConfig<'_>, ConfigError> {
        if self.batches.is_empty() {
            return Err(ConfigError::EmptyBatches);
        }
        let mut seen = HashSet::with_capacity(self.batches.len());
        for (index, batch) in self.batches.iter().enumerate() {
            if batch.trim().is_empty() {
                return Err(ConfigError::BlankBatch { index });
            }
            if !seen.insert(batch.as_str()) {
                return Err(ConfigError::DuplicateBatch(batch.clone()));
            }
        }
        if self.first_semester.weeks_count == 0 {
            return Err(ConfigError::ZeroLectureWeeks { semester: 1 });
        }
        if self.second_semester.weeks_count == 0 {
            return Err(ConfigError::ZeroLectureWeeks { semester: 2 });
        }
        let start = self.first_semester.start_date;
        if start.checked_add_days(Days::new(CALENDAR_SPAN_DAYS)).is_none() {
            return Err(ConfigError::StartDateOutOfRange(start));
        }

        let len = self.batches.len();
        let roles = (0..len)
            .map(|index| BatchRole::for_position(index, len))
            .collect();
        Ok(ValidatedConfig {
            config: self,
            roles,
        })
    }

    /// Incoming batches get an orientation week when either semester asks for one.
    pub fn orientation_enabled(&self) -> bool {
        self.first_semester.include_orientation || self.second_semester.include_orientation
    }
}

/// A batch's position in the cohort, resolved once from list order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchRole {
    Graduating,
    Continuing,
    Incoming,
    /// The only batch in the list; both graduating and incoming.
    Sole,
}

impl BatchRole {
    pub fn for_position(index: usize, len: usize) -> Self {
        match (index, len) {
            (_, 1) => BatchRole::Sole,
            (0, _) => BatchRole::Graduating,
            (i, n) if i + 1 == n => BatchRole::Incoming,
            _ => BatchRole::Continuing,
        }
    }

    pub fn is_graduating(self) -> bool {
        matches!(self, BatchRole::Graduating | BatchRole::Sole)
    }

    pub fn is_incoming(self) -> bool {
        matches!(self, BatchRole::Incoming | BatchRole::Sole)
    }
}

/// A config that passed [`CalendarConfig::validate`], with roles attached.
#[derive(Debug, Clone)]
pub struct ValidatedConfig<'a> {
    config: &'a CalendarConfig,
    roles: Vec<BatchRole>,
}

impl<'a> ValidatedConfig<'a> {
    pub fn config(&self) -> &'a CalendarConfig {
        self.config
    }

    pub fn batches(&self) -> impl Iterator<Item = (&'a str, BatchRole)> + '_ {
        self.config
            .batches
            .iter()
            .map(String::as_str)
            .zip(self.roles.iter().copied())
    }
}

pub fn load_config_from_json<P: AsRef<Path>>(path: P) -> Result<CalendarConfig, ConfigError> {
    let file = File::open(path)?;
    let config: CalendarConfig = serde_json::from_reader(file)?;
    config.validate()?;
    Ok(config)
}

pub fn save_config_to_json<P: AsRef<Path>>(
    config: &CalendarConfig,
    path: P,
) -> Result<(), ConfigError> {
    config.validate()?;
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, config)?;
    Ok(())
}
