use academic_calendar::{
    AcademicCalendar, CalendarConfig, CalendarWeek, ConfigError, PhasePlan, SemesterConfig,
    WEEKS_PER_CALENDAR, WeekStatus, generate,
};
use chrono::{Duration, NaiveDate};
use proptest::prelude::*;

fn d(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn semester(
    start: NaiveDate,
    weeks: u32,
    dead: u32,
    exam: u32,
    vacation: u32,
    orientation: bool,
) -> SemesterConfig {
    SemesterConfig {
        start_date: start,
        weeks_count: weeks,
        include_orientation: orientation,
        dead_weeks: dead,
        exam_weeks: exam,
        vacation_weeks: vacation,
    }
}

fn fas_config() -> CalendarConfig {
    CalendarConfig {
        academic_year: "2025/2026".into(),
        faculty: "Faculty of Applied Sciences".into(),
        university: "Rajarata University".into(),
        batches: ["FAS/21", "FAS/22", "FAS/23", "FAS/24", "FAS/25"]
            .iter()
            .map(|b| b.to_string())
            .collect(),
        first_semester: semester(d(2025, 8, 15), 15, 1, 3, 3, true),
        second_semester: semester(d(2026, 1, 15), 15, 1, 3, 3, false),
        include_industrial_training: true,
        graduation_date: Some(d(2026, 6, 15)),
    }
}

fn status<'a>(weeks: &'a [CalendarWeek], week: u32, batch: &str) -> &'a WeekStatus {
    weeks[(week - 1) as usize]
        .status_for(batch)
        .unwrap_or_else(|| panic!("week {week} has no status for {batch}"))
}

#[test]
fn fas_scenario_first_semester() {
    let weeks = generate(&fas_config()).unwrap();
    assert_eq!(weeks.len(), 52);

    for batch in &fas_config().batches {
        assert_eq!(
            status(&weeks, 1, batch),
            &WeekStatus::Lecture {
                semester_number: 1,
                week_number: 1
            }
        );
        assert_eq!(
            status(&weeks, 15, batch),
            &WeekStatus::Lecture {
                semester_number: 1,
                week_number: 15
            }
        );
        assert_eq!(status(&weeks, 16, batch), &WeekStatus::DeadWeek);
        assert_eq!(status(&weeks, 17, batch), &WeekStatus::Exam);
        for vacation_week in 20..=22 {
            assert_eq!(status(&weeks, vacation_week, batch), &WeekStatus::Vacation);
        }
    }

    assert_eq!(status(&weeks, 19, "FAS/21"), &WeekStatus::ExamEnd);
    for batch in ["FAS/22", "FAS/23", "FAS/24", "FAS/25"] {
        assert_eq!(status(&weeks, 19, batch), &WeekStatus::Exam);
    }
}

#[test]
fn fas_scenario_second_semester_start() {
    let config = fas_config();
    assert_eq!(PhasePlan::build(&config).second_semester_start(), 23);
    let weeks = generate(&config).unwrap();

    assert_eq!(
        status(&weeks, 23, "FAS/21"),
        &WeekStatus::IndustrialTraining { week_number: 1 }
    );
    for batch in ["FAS/22", "FAS/23", "FAS/24"] {
        assert_eq!(
            status(&weeks, 23, batch),
            &WeekStatus::Lecture {
                semester_number: 2,
                week_number: 1
            }
        );
    }
    assert_eq!(status(&weeks, 23, "FAS/25"), &WeekStatus::Orientation);

    // orientation only covers S2; the incoming batch lectures afterwards
    assert_eq!(
        status(&weeks, 24, "FAS/25"),
        &WeekStatus::Lecture {
            semester_number: 2,
            week_number: 2
        }
    );
    assert_eq!(
        status(&weeks, 37, "FAS/21"),
        &WeekStatus::IndustrialTraining { week_number: 15 }
    );
}

#[test]
fn fas_scenario_second_semester_exams_and_graduation() {
    let weeks = generate(&fas_config()).unwrap();

    assert_eq!(status(&weeks, 38, "FAS/23"), &WeekStatus::DeadWeek);
    assert_eq!(status(&weeks, 39, "FAS/21"), &WeekStatus::Exam);
    assert_eq!(status(&weeks, 41, "FAS/21"), &WeekStatus::ExamEnd);
    assert_eq!(status(&weeks, 41, "FAS/25"), &WeekStatus::Exam);

    // week 44 runs 2026-06-12..=2026-06-18 and holds the graduation date
    assert_eq!(weeks[43].start_date, d(2026, 6, 12));
    assert_eq!(status(&weeks, 44, "FAS/21"), &WeekStatus::graduation());
    assert_eq!(status(&weeks, 44, "FAS/22"), &WeekStatus::Vacation);
    assert_eq!(status(&weeks, 43, "FAS/21"), &WeekStatus::Vacation);
    assert_eq!(status(&weeks, 45, "FAS/21"), &WeekStatus::Vacation);
}

#[test]
fn weeks_are_contiguous_five_day_windows() {
    let weeks = generate(&fas_config()).unwrap();
    assert_eq!(weeks[0].start_date, d(2025, 8, 15));
    assert_eq!(weeks[0].end_date, d(2025, 8, 19));
    for (idx, pair) in weeks.windows(2).enumerate() {
        assert_eq!(pair[0].week_number, idx as u32 + 1);
        assert_eq!(pair[1].start_date, pair[0].start_date + Duration::days(7));
    }
    assert_eq!(weeks[51].week_number, 52);
}

#[test]
fn minimal_semesters_default_to_vacation() {
    let start = d(2025, 9, 1);
    let config = CalendarConfig {
        academic_year: "2025".into(),
        faculty: String::new(),
        university: String::new(),
        batches: vec!["A".into(), "B".into()],
        first_semester: semester(start, 1, 0, 1, 0, false),
        second_semester: semester(start, 1, 0, 1, 0, false),
        include_industrial_training: false,
        graduation_date: None,
    };
    let weeks = generate(&config).unwrap();
    assert_eq!(weeks.len(), 52);
    assert_eq!(
        status(&weeks, 1, "B"),
        &WeekStatus::Lecture {
            semester_number: 1,
            week_number: 1
        }
    );
    assert_eq!(status(&weeks, 2, "A"), &WeekStatus::ExamEnd);
    assert_eq!(status(&weeks, 2, "B"), &WeekStatus::Exam);
    assert_eq!(
        status(&weeks, 3, "A"),
        &WeekStatus::Lecture {
            semester_number: 2,
            week_number: 1
        }
    );
    assert_eq!(status(&weeks, 4, "A"), &WeekStatus::ExamEnd);
    for week in 5..=52 {
        assert_eq!(status(&weeks, week, "A"), &WeekStatus::Vacation);
        assert_eq!(status(&weeks, week, "B"), &WeekStatus::Vacation);
    }
}

#[test]
fn overlong_phases_are_truncated_to_52_weeks() {
    let mut config = fas_config();
    config.first_semester.weeks_count = 40;
    let plan = PhasePlan::build(&config);
    assert!(plan.overflow_weeks() > 0);

    let weeks = generate(&config).unwrap();
    assert_eq!(weeks.len(), 52);
    // the second semester lectures start at week 48 and run off the end
    assert_eq!(
        status(&weeks, 52, "FAS/22"),
        &WeekStatus::Lecture {
            semester_number: 2,
            week_number: 5
        }
    );
    assert!(
        weeks
            .iter()
            .all(|w| w.status_for("FAS/21") != Some(&WeekStatus::graduation()))
    );
}

#[test]
fn graduation_outside_the_tail_is_ignored() {
    let mut config = fas_config();
    // falls inside the first-semester lectures
    config.graduation_date = Some(d(2025, 9, 1));
    let weeks = generate(&config).unwrap();
    assert!(weeks.iter().all(|w| {
        !matches!(w.status_for("FAS/21"), Some(WeekStatus::Graduation { .. }))
    }));
}

#[test]
fn orientation_follows_second_semester_flag_too() {
    let mut config = fas_config();
    config.first_semester.include_orientation = false;
    config.second_semester.include_orientation = true;
    let weeks = generate(&config).unwrap();
    assert_eq!(status(&weeks, 23, "FAS/25"), &WeekStatus::Orientation);

    config.second_semester.include_orientation = false;
    let weeks = generate(&config).unwrap();
    assert_eq!(
        status(&weeks, 23, "FAS/25"),
        &WeekStatus::Lecture {
            semester_number: 2,
            week_number: 1
        }
    );
}

#[test]
fn industrial_training_off_keeps_graduating_batch_in_lectures() {
    let mut config = fas_config();
    config.include_industrial_training = false;
    let weeks = generate(&config).unwrap();
    assert_eq!(
        status(&weeks, 23, "FAS/21"),
        &WeekStatus::Lecture {
            semester_number: 2,
            week_number: 1
        }
    );
}

#[test]
fn generation_is_idempotent() {
    let first = generate(&fas_config()).unwrap();
    let second = generate(&fas_config()).unwrap();
    assert_eq!(first, second);

    let calendar = AcademicCalendar::new(fas_config()).unwrap();
    assert_eq!(calendar.weeks(), first.as_slice());
}

#[test]
fn invalid_configs_are_rejected_before_generation() {
    let mut config = fas_config();
    config.batches.clear();
    assert!(matches!(generate(&config), Err(ConfigError::EmptyBatches)));

    let mut config = fas_config();
    config.first_semester.weeks_count = 0;
    assert!(matches!(
        generate(&config),
        Err(ConfigError::ZeroLectureWeeks { semester: 1 })
    ));
}

#[test]
fn maximal_week_counts_still_yield_52_weeks() {
    let mut config = fas_config();
    config.first_semester.weeks_count = u32::MAX;
    config.second_semester.exam_weeks = u32::MAX;
    let weeks = generate(&config).unwrap();
    assert_eq!(weeks.len(), 52);
    for batch in &config.batches {
        assert_eq!(
            status(&weeks, 52, batch),
            &WeekStatus::Lecture {
                semester_number: 1,
                week_number: 52
            }
        );
    }

    let mut config = fas_config();
    config.second_semester.weeks_count = u32::MAX;
    let weeks = generate(&config).unwrap();
    assert_eq!(PhasePlan::build(&config).second_semester_start(), 23);
    assert_eq!(
        status(&weeks, 52, "FAS/22"),
        &WeekStatus::Lecture {
            semester_number: 2,
            week_number: 30
        }
    );
}

#[test]
fn start_dates_near_the_end_of_time_are_rejected() {
    let mut config = fas_config();
    config.first_semester.start_date = NaiveDate::MAX - Duration::days(10);
    assert!(matches!(
        generate(&config),
        Err(ConfigError::StartDateOutOfRange(_))
    ));
}

#[test]
fn weeks_serialize_with_camel_case_and_tagged_status() {
    let weeks = generate(&fas_config()).unwrap();
    let value = serde_json::to_value(&weeks[22]).unwrap();
    assert_eq!(value["weekNumber"], 23);
    assert_eq!(value["startDate"], "2026-01-16");
    assert_eq!(value["status"]["FAS/25"]["type"], "orientation");
    assert_eq!(value["status"]["FAS/21"]["type"], "industrialTraining");
    assert_eq!(value["status"]["FAS/21"]["weekNumber"], 1);
}

prop_compose! {
    fn arb_semester()(
        weeks in 1u32..=30,
        dead in 0u32..=3,
        exam in 0u32..=4,
        vacation in 0u32..=8,
        orientation in any::<bool>(),
    ) -> SemesterConfig {
        semester(d(2025, 8, 18), weeks, dead, exam, vacation, orientation)
    }
}

prop_compose! {
    fn arb_config()(
        first in arb_semester(),
        second in arb_semester(),
        batch_count in 1usize..=6,
        industrial in any::<bool>(),
        graduation_offset in proptest::option::of(0i64..400),
    ) -> CalendarConfig {
        CalendarConfig {
            academic_year: "2025/2026".into(),
            faculty: String::new(),
            university: String::new(),
            batches: (0..batch_count).map(|i| format!("B{i}")).collect(),
            first_semester: first,
            second_semester: second,
            include_industrial_training: industrial,
            graduation_date: graduation_offset.map(|days| d(2025, 8, 18) + Duration::days(days)),
        }
    }
}

proptest! {
    #[test]
    fn every_config_yields_52_gapless_fully_classified_weeks(config in arb_config()) {
        let weeks = generate(&config).unwrap();
        prop_assert_eq!(weeks.len() as u32, WEEKS_PER_CALENDAR);
        for (idx, week) in weeks.iter().enumerate() {
            prop_assert_eq!(week.week_number, idx as u32 + 1);
            prop_assert_eq!(
                week.start_date,
                config.first_semester.start_date + Duration::days(7 * idx as i64)
            );
            prop_assert_eq!(week.end_date, week.start_date + Duration::days(4));
            prop_assert_eq!(week.status.len(), config.batches.len());
        }
    }

    #[test]
    fn special_statuses_respect_batch_position(config in arb_config()) {
        let weeks = generate(&config).unwrap();
        let s2 = PhasePlan::build(&config).second_semester_start();
        let last = config.batches.len() - 1;
        for week in &weeks {
            for (idx, batch) in config.batches.iter().enumerate() {
                match week.status_for(batch).unwrap() {
                    WeekStatus::ExamEnd
                    | WeekStatus::IndustrialTraining { .. }
                    | WeekStatus::Graduation { .. } => {
                        prop_assert_eq!(idx, 0);
                    }
                    WeekStatus::Orientation => {
                        prop_assert_eq!(idx, last);
                        prop_assert_eq!(week.week_number, s2);
                    }
                    _ => {}
                }
            }
        }
    }

    #[test]
    fn generation_is_deterministic(config in arb_config()) {
        let again = config.clone();
        prop_assert_eq!(generate(&config).unwrap(), generate(&again).unwrap());
    }
}
