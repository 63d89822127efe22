use crate::calendar::CalendarWeek;
use chrono::NaiveDate;
use polars::prelude::*;

/// Lays the generated weeks out as a table: one row per week, one label column per batch.
pub fn calendar_frame(weeks: &[CalendarWeek], batches: &[String]) -> PolarsResult<DataFrame> {
    let mut columns: Vec<Column> = Vec::with_capacity(3 + batches.len());

    let week_numbers: Vec<i32> = weeks
        .iter()
        .map(|w| i32::try_from(w.week_number).unwrap_or(i32::MAX))
        .collect();
    columns.push(Series::new(PlSmallStr::from_static("week"), week_numbers).into_column());

    let starts: Vec<i32> = weeks.iter().map(|w| date_to_i32(w.start_date)).collect();
    columns.push(
        Series::new(PlSmallStr::from_static("start_date"), starts)
            .cast(&DataType::Date)?
            .into_column(),
    );
    let ends: Vec<i32> = weeks.iter().map(|w| date_to_i32(w.end_date)).collect();
    columns.push(
        Series::new(PlSmallStr::from_static("end_date"), ends)
            .cast(&DataType::Date)?
            .into_column(),
    );

    for batch in batches {
        let labels: Vec<Option<String>> = weeks
            .iter()
            .map(|w| w.status_for(batch).map(|s| s.label()))
            .collect();
        columns.push(Series::new(batch.as_str().into(), labels).into_column());
    }

    DataFrame::new(columns)
}

fn date_to_i32(date: NaiveDate) -> i32 {
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap_or_default();
    (date - epoch).num_days() as i32
}
