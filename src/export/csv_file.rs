use super::{FIXED_HEADERS, date_range_label};
use crate::calendar::CalendarWeek;
use crate::config::CalendarConfig;
use crate::error::ExportError;
use chrono::Datelike;
use std::fs::File;
use std::io::Write;
use std::path::Path;

pub fn write_csv<W: Write>(
    weeks: &[CalendarWeek],
    config: &CalendarConfig,
    sink: W,
) -> Result<(), ExportError> {
    let mut writer = csv::Writer::from_writer(sink);

    let header: Vec<&str> = FIXED_HEADERS
        .iter()
        .copied()
        .chain(config.batches.iter().map(String::as_str))
        .collect();
    writer.write_record(&header)?;

    for week in weeks {
        let mut record = vec![
            week.start_date.year().to_string(),
            date_range_label(week.start_date, week.end_date),
            week.week_number.to_string(),
        ];
        record.extend(config.batches.iter().map(|batch| {
            week.status_for(batch)
                .map(|status| status.label())
                .unwrap_or_default()
        }));
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn save_csv<P: AsRef<Path>>(
    weeks: &[CalendarWeek],
    config: &CalendarConfig,
    path: P,
) -> Result<(), ExportError> {
    let file = File::create(path)?;
    write_csv(weeks, config, file)?;
    tracing::info!(
        academic_year = %config.academic_year,
        weeks = weeks.len(),
        "exported calendar csv"
    );
    Ok(())
}
