pub mod calendar;
pub mod config;
pub mod error;
pub mod export;
pub mod grid;
#[cfg(feature = "http_api")]
pub mod http_api;
pub mod phase;
pub mod status;
pub mod templates;

pub use calendar::{
    AcademicCalendar, CalendarWeek, WEEKS_PER_CALENDAR, generate, generate_validated, week_start,
};
pub use config::{
    BatchRole, CalendarConfig, SemesterConfig, ValidatedConfig, load_config_from_json,
    save_config_to_json,
};
pub use error::{ConfigError, ExportError};
pub use export::{export_file_name, export_xlsx, save_csv, save_xlsx, write_csv};
pub use grid::calendar_frame;
pub use phase::{PhaseKind, PhasePlan, PhaseRange};
pub use status::{LEGEND, LegendEntry, Rgb, StatusStyle, WeekStatus};
pub use templates::{CalendarTemplate, UnknownTemplate};
