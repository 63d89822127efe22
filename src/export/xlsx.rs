use super::{FIXED_HEADERS, date_range_label, title};
use crate::calendar::CalendarWeek;
use crate::config::CalendarConfig;
use crate::error::ExportError;
use crate::status::{LEGEND, Rgb, StatusStyle};
use chrono::Datelike;
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook, Worksheet};
use std::path::Path;

const SHEET_NAME: &str = "Academic Calendar";
const TITLE_ROW: u32 = 0;
const HEADER_ROW: u32 = 1;
const FIRST_WEEK_ROW: u32 = 2;
const FIRST_BATCH_COL: u16 = FIXED_HEADERS.len() as u16;

struct CalendarFormats {
    title: Format,
    header: Format,
    text: Format,
    legend_heading: Format,
}

impl CalendarFormats {
    fn new() -> Self {
        let title = Format::new()
            .set_bold()
            .set_font_size(14)
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter);

        let header = Format::new()
            .set_bold()
            .set_align(FormatAlign::Center)
            .set_background_color(Color::RGB(0xD9D9D9))
            .set_border(FormatBorder::Thin);

        let text = Format::new()
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter)
            .set_border(FormatBorder::Thin);

        let legend_heading = Format::new().set_bold();

        Self {
            title,
            header,
            text,
            legend_heading,
        }
    }
}

fn coloured(background: Rgb, text: Rgb) -> Format {
    Format::new()
        .set_align(FormatAlign::Center)
        .set_border(FormatBorder::Thin)
        .set_background_color(Color::RGB(background.0))
        .set_font_color(Color::RGB(text.0))
}

fn status_format(style: &StatusStyle) -> Format {
    coloured(style.background, style.text_color)
}

/// Encodes the calendar as an OOXML workbook held in memory.
pub fn export_xlsx(weeks: &[CalendarWeek], config: &CalendarConfig) -> Result<Vec<u8>, ExportError> {
    let mut workbook = Workbook::new();
    let formats = CalendarFormats::new();

    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    let last_col = (FIRST_BATCH_COL + config.batches.len() as u16).saturating_sub(1);
    write_title_and_headers(sheet, config, &formats, last_col)?;
    write_year_column(sheet, weeks, &formats)?;
    write_week_rows(sheet, weeks, config, &formats)?;
    write_legend(sheet, FIRST_WEEK_ROW + weeks.len() as u32 + 1, &formats)?;

    let buffer = workbook.save_to_buffer()?;
    tracing::info!(
        academic_year = %config.academic_year,
        weeks = weeks.len(),
        bytes = buffer.len(),
        "exported calendar spreadsheet"
    );
    Ok(buffer)
}

/// Encodes the workbook fully before touching `path`.
pub fn save_xlsx<P: AsRef<Path>>(
    weeks: &[CalendarWeek],
    config: &CalendarConfig,
    path: P,
) -> Result<(), ExportError> {
    let buffer = export_xlsx(weeks, config)?;
    std::fs::write(path, buffer)?;
    Ok(())
}

fn write_title_and_headers(
    sheet: &mut Worksheet,
    config: &CalendarConfig,
    formats: &CalendarFormats,
    last_col: u16,
) -> Result<(), ExportError> {
    sheet.merge_range(TITLE_ROW, 0, TITLE_ROW, last_col, &title(config), &formats.title)?;
    sheet.set_row_height(TITLE_ROW, 24)?;

    for (col, header) in FIXED_HEADERS.iter().enumerate() {
        sheet.write_with_format(HEADER_ROW, col as u16, *header, &formats.header)?;
    }
    for (offset, batch) in config.batches.iter().enumerate() {
        let col = FIRST_BATCH_COL + offset as u16;
        sheet.write_with_format(HEADER_ROW, col, batch.as_str(), &formats.header)?;
        sheet.set_column_width(col, 16)?;
    }

    sheet.set_column_width(0, 8)?;
    sheet.set_column_width(1, 18)?;
    sheet.set_column_width(2, 6)?;
    sheet.set_freeze_panes(FIRST_WEEK_ROW, FIRST_BATCH_COL)?;
    Ok(())
}

// Consecutive weeks starting in the same calendar year share one merged cell.
fn write_year_column(
    sheet: &mut Worksheet,
    weeks: &[CalendarWeek],
    formats: &CalendarFormats,
) -> Result<(), ExportError> {
    let mut run_start = 0usize;
    while run_start < weeks.len() {
        let year = weeks[run_start].start_date.year();
        let run_len = weeks[run_start..]
            .iter()
            .take_while(|w| w.start_date.year() == year)
            .count();
        let first_row = FIRST_WEEK_ROW + run_start as u32;
        let last_row = first_row + run_len as u32 - 1;
        if run_len > 1 {
            // merge_range only takes text; the year goes over its first cell as a number
            sheet.merge_range(first_row, 0, last_row, 0, "", &formats.text)?;
        }
        sheet.write_with_format(first_row, 0, f64::from(year), &formats.text)?;
        run_start += run_len;
    }
    Ok(())
}

fn write_week_rows(
    sheet: &mut Worksheet,
    weeks: &[CalendarWeek],
    config: &CalendarConfig,
    formats: &CalendarFormats,
) -> Result<(), ExportError> {
    for (idx, week) in weeks.iter().enumerate() {
        let row = FIRST_WEEK_ROW + idx as u32;
        let dates = date_range_label(week.start_date, week.end_date);
        sheet.write_with_format(row, 1, dates.as_str(), &formats.text)?;
        sheet.write_with_format(row, 2, f64::from(week.week_number), &formats.text)?;

        for (offset, batch) in config.batches.iter().enumerate() {
            let col = FIRST_BATCH_COL + offset as u16;
            match week.status_for(batch) {
                Some(status) => {
                    let style = status.style();
                    let format = status_format(&style);
                    sheet.write_with_format(row, col, style.label.as_str(), &format)?;
                }
                None => {
                    sheet.write_blank(row, col, &formats.text)?;
                }
            }
        }
    }
    Ok(())
}

fn write_legend(
    sheet: &mut Worksheet,
    first_row: u32,
    formats: &CalendarFormats,
) -> Result<(), ExportError> {
    sheet.write_with_format(first_row, 0, "Legend", &formats.legend_heading)?;
    for (idx, entry) in LEGEND.iter().enumerate() {
        let row = first_row + 1 + idx as u32;
        let format = coloured(entry.background, entry.text_color);
        sheet.write_with_format(row, 0, entry.abbreviation, &format)?;
        sheet.write(row, 1, entry.meaning)?;
    }
    Ok(())
}
