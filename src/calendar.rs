use crate::config::{BatchRole, CalendarConfig, ValidatedConfig};
use crate::error::ConfigError;
use crate::phase::{PhaseKind, PhasePlan};
use crate::status::WeekStatus;
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The generator always emits exactly this many weeks.
pub const WEEKS_PER_CALENDAR: u32 = 52;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarWeek {
    pub week_number: u32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: BTreeMap<String, WeekStatus>,
}

impl CalendarWeek {
    pub fn status_for(&self, batch: &str) -> Option<&WeekStatus> {
        self.status.get(batch)
    }
}

/// Start of week `week_number` (1-based), counted from the first semester start.
pub fn week_start(first_start: NaiveDate, week_number: u32) -> NaiveDate {
    first_start + Duration::days(7 * (i64::from(week_number) - 1))
}

pub fn generate(config: &CalendarConfig) -> Result<Vec<CalendarWeek>, ConfigError> {
    let validated = config.validate()?;
    Ok(generate_validated(&validated))
}

pub fn generate_validated(validated: &ValidatedConfig<'_>) -> Vec<CalendarWeek> {
    let config = validated.config();
    let plan = PhasePlan::build(config);
    if plan.overflow_weeks() > 0 {
        tracing::warn!(
            configured = plan.configured_weeks(),
            dropped = plan.overflow_weeks(),
            "configured phases overrun the calendar; trailing weeks are dropped"
        );
    }

    let weeks: Vec<CalendarWeek> = (1..=WEEKS_PER_CALENDAR)
        .map(|week_number| {
            let start_date = week_start(config.first_semester.start_date, week_number);
            let status = validated
                .batches()
                .map(|(batch, role)| {
                    let status = classify(&plan, config, week_number, start_date, role);
                    (batch.to_string(), status)
                })
                .collect();
            CalendarWeek {
                week_number,
                start_date,
                end_date: start_date + Duration::days(4),
                status,
            }
        })
        .collect();

    tracing::debug!(
        academic_year = %config.academic_year,
        batches = config.batches.len(),
        second_semester_start = plan.second_semester_start(),
        "generated academic calendar"
    );
    weeks
}

fn classify(
    plan: &PhasePlan,
    config: &CalendarConfig,
    week: u32,
    start_date: NaiveDate,
    role: BatchRole,
) -> WeekStatus {
    let Some(phase) = plan.phase_at(week) else {
        return if role.is_graduating() && graduation_falls_in(config.graduation_date, start_date) {
            WeekStatus::graduation()
        } else {
            WeekStatus::Vacation
        };
    };

    let relative_week = week - phase.start + 1;
    match phase.kind {
        PhaseKind::Lecture
            if phase.semester == 2
                && week == plan.second_semester_start()
                && role.is_incoming()
                && config.orientation_enabled() =>
        {
            WeekStatus::Orientation
        }
        PhaseKind::Lecture
            if phase.semester == 2
                && config.include_industrial_training
                && role.is_graduating() =>
        {
            WeekStatus::IndustrialTraining {
                week_number: relative_week,
            }
        }
        PhaseKind::Lecture => WeekStatus::Lecture {
            semester_number: phase.semester,
            week_number: relative_week,
        },
        PhaseKind::DeadWeek => WeekStatus::DeadWeek,
        PhaseKind::Exam if phase.is_last_week(week) && role.is_graduating() => WeekStatus::ExamEnd,
        PhaseKind::Exam => WeekStatus::Exam,
        PhaseKind::Vacation => WeekStatus::Vacation,
    }
}

fn graduation_falls_in(graduation: Option<NaiveDate>, week_start: NaiveDate) -> bool {
    graduation.is_some_and(|date| date >= week_start && date <= week_start + Duration::days(6))
}

/// A generated calendar kept together with the config it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AcademicCalendar {
    config: CalendarConfig,
    weeks: Vec<CalendarWeek>,
}

impl AcademicCalendar {
    pub fn new(config: CalendarConfig) -> Result<Self, ConfigError> {
        let weeks = generate(&config)?;
        Ok(Self { config, weeks })
    }

    pub fn config(&self) -> &CalendarConfig {
        &self.config
    }

    pub fn weeks(&self) -> &[CalendarWeek] {
        &self.weeks
    }

    pub fn week(&self, week_number: u32) -> Option<&CalendarWeek> {
        self.weeks
            .get(usize::try_from(week_number).ok()?.checked_sub(1)?)
    }
}
