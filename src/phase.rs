//! Reduces the semester week counts into absolute week ranges.
//!
//! Each semester contributes an ordered list of `(PhaseKind, length)`
//! segments. The lists are folded once into contiguous `[start, end)` ranges
//! over 1-based week numbers, so classifying a week is a single lookup.

use crate::calendar::WEEKS_PER_CALENDAR;
use crate::config::{CalendarConfig, SemesterConfig};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseKind {
    Lecture,
    DeadWeek,
    Exam,
    Vacation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Segment {
    pub semester: u8,
    pub kind: PhaseKind,
    pub length: u32,
}

/// A phase placed on the week line. `end` is exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PhaseRange {
    pub semester: u8,
    pub kind: PhaseKind,
    pub start: u32,
    pub end: u32,
}

impl PhaseRange {
    pub fn contains(&self, week: u32) -> bool {
        self.start <= week && week < self.end
    }

    pub fn is_last_week(&self, week: u32) -> bool {
        week + 1 == self.end
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhasePlan {
    ranges: Vec<PhaseRange>,
    second_semester_start: u32,
    configured_weeks: u32,
}

impl PhasePlan {
    pub fn build(config: &CalendarConfig) -> Self {
        let mut segments = semester_segments(1, &config.first_semester, true);
        let second = semester_segments(2, &config.second_semester, false);
        let second_semester_start = segments
            .iter()
            .fold(1u32, |acc, s| acc.saturating_add(s.length));
        segments.extend(second);
        Self::from_segments(&segments, second_semester_start)
    }

    fn from_segments(segments: &[Segment], second_semester_start: u32) -> Self {
        let mut ranges = Vec::with_capacity(segments.len());
        let mut cursor = 1u32;
        for segment in segments.iter().filter(|s| s.length > 0) {
            let end = cursor.saturating_add(segment.length);
            if end == cursor {
                break;
            }
            ranges.push(PhaseRange {
                semester: segment.semester,
                kind: segment.kind,
                start: cursor,
                end,
            });
            cursor = end;
        }
        Self {
            ranges,
            second_semester_start,
            configured_weeks: cursor - 1,
        }
    }

    pub fn ranges(&self) -> &[PhaseRange] {
        &self.ranges
    }

    /// First week of the second semester (`S2`).
    pub fn second_semester_start(&self) -> u32 {
        self.second_semester_start
    }

    /// Weeks covered by configured phases, before truncation to the calendar length.
    /// Saturates at `u32::MAX - 1`.
    pub fn configured_weeks(&self) -> u32 {
        self.configured_weeks
    }

    /// Configured phase weeks that fall past the end of the calendar and are dropped.
    pub fn overflow_weeks(&self) -> u32 {
        self.configured_weeks.saturating_sub(WEEKS_PER_CALENDAR)
    }

    /// The phase containing `week`, or `None` once the configured phases are exhausted.
    pub fn phase_at(&self, week: u32) -> Option<&PhaseRange> {
        let idx = self.ranges.partition_point(|range| range.end <= week);
        self.ranges.get(idx).filter(|range| range.contains(week))
    }
}

// The second semester's vacation is not a phase: whatever follows its exams
// is the open tail of the year, where graduation can land.
fn semester_segments(semester: u8, config: &SemesterConfig, with_vacation: bool) -> Vec<Segment> {
    let mut segments = vec![
        Segment {
            semester,
            kind: PhaseKind::Lecture,
            length: config.weeks_count,
        },
        Segment {
            semester,
            kind: PhaseKind::DeadWeek,
            length: config.dead_weeks,
        },
        Segment {
            semester,
            kind: PhaseKind::Exam,
            length: config.exam_weeks,
        },
    ];
    if with_vacation {
        segments.push(Segment {
            semester,
            kind: PhaseKind::Vacation,
            length: config.vacation_weeks,
        });
    }
    segments
}
