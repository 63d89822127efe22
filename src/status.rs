use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// The academic state of one batch during one week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum WeekStatus {
    #[serde(rename_all = "camelCase")]
    Lecture { semester_number: u8, week_number: u32 },
    Orientation,
    DeadWeek,
    Exam,
    ExamEnd,
    #[serde(rename_all = "camelCase")]
    IndustrialTraining { week_number: u32 },
    Vacation,
    Graduation { label: String },
}

/// A 24-bit colour, serialized as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u32);

impl Rgb {
    pub const WHITE: Rgb = Rgb(0xFFFFFF);
    pub const BLACK: Rgb = Rgb(0x000000);
    pub const YELLOW: Rgb = Rgb(0xFFFF00);
    pub const ORANGE: Rgb = Rgb(0xFF6600);
    pub const BLUE: Rgb = Rgb(0x3366FF);
    pub const RED: Rgb = Rgb(0xFF0000);
    pub const LIGHT_GREEN: Rgb = Rgb(0xCCFFCC);
    pub const PURPLE: Rgb = Rgb(0xB2A1C7);
    pub const PINK: Rgb = Rgb(0xFF00FF);

    pub fn hex(self) -> String {
        format!("#{:06x}", self.0)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06x}", self.0)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.hex())
    }
}

/// How a status is drawn in the table view and the spreadsheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusStyle {
    pub label: String,
    pub background: Rgb,
    pub text_color: Rgb,
}

impl WeekStatus {
    pub fn graduation() -> Self {
        WeekStatus::Graduation {
            label: "Graduation".to_string(),
        }
    }

    pub fn label(&self) -> String {
        match self {
            WeekStatus::Lecture {
                semester_number,
                week_number,
            } => format!("L{semester_number}, S{semester_number} - {week_number}"),
            WeekStatus::Orientation => "Orientation".to_string(),
            WeekStatus::DeadWeek => "DW".to_string(),
            WeekStatus::Exam => "EX".to_string(),
            WeekStatus::ExamEnd => "EX-END".to_string(),
            WeekStatus::IndustrialTraining { week_number } => format!("IT - {week_number}"),
            WeekStatus::Vacation => "Vaca.".to_string(),
            WeekStatus::Graduation { .. } => "Graduation".to_string(),
        }
    }

    pub fn background(&self) -> Rgb {
        match self {
            WeekStatus::Lecture { .. } => Rgb::WHITE,
            WeekStatus::Orientation => Rgb::YELLOW,
            WeekStatus::DeadWeek => Rgb::ORANGE,
            WeekStatus::Exam => Rgb::BLUE,
            WeekStatus::ExamEnd => Rgb::RED,
            WeekStatus::Vacation => Rgb::LIGHT_GREEN,
            WeekStatus::IndustrialTraining { .. } => Rgb::PURPLE,
            WeekStatus::Graduation { .. } => Rgb::PINK,
        }
    }

    pub fn text_color(&self) -> Rgb {
        match self {
            WeekStatus::Exam | WeekStatus::ExamEnd => Rgb::WHITE,
            _ => Rgb::BLACK,
        }
    }

    pub fn style(&self) -> StatusStyle {
        StatusStyle {
            label: self.label(),
            background: self.background(),
            text_color: self.text_color(),
        }
    }
}

impl fmt::Display for WeekStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// One abbreviation shown in the legend block under an exported calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegendEntry {
    pub abbreviation: &'static str,
    pub meaning: &'static str,
    pub background: Rgb,
    pub text_color: Rgb,
}

pub const LEGEND: [LegendEntry; 5] = [
    LegendEntry {
        abbreviation: "DW",
        meaning: "Dead Week",
        background: Rgb::ORANGE,
        text_color: Rgb::BLACK,
    },
    LegendEntry {
        abbreviation: "EX",
        meaning: "Examination",
        background: Rgb::BLUE,
        text_color: Rgb::WHITE,
    },
    LegendEntry {
        abbreviation: "Vaca",
        meaning: "Vacation",
        background: Rgb::LIGHT_GREEN,
        text_color: Rgb::BLACK,
    },
    LegendEntry {
        abbreviation: "IT",
        meaning: "Industrial Training",
        background: Rgb::PURPLE,
        text_color: Rgb::BLACK,
    },
    LegendEntry {
        abbreviation: "EX-END",
        meaning: "End of Examination (graduating batch)",
        background: Rgb::RED,
        text_color: Rgb::WHITE,
    },
];
