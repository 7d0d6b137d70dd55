use crate::core::ClockTime;
use crate::error::{TimegridError, TimegridResult};

/// First hour shown on the grid. Rows cover 08:00 up to 08:00 + slot_count.
pub const WINDOW_START_HOUR: u8 = 8;

/// One scheduled activity. `day` is 1-based, Monday = 1.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct CourseRecord {
    pub name: String,
    pub day: u8,
    pub start: ClockTime,
    pub end: ClockTime,
    pub location: String,
}

/// Canvas constants with the stock timetable defaults. All overridable from
/// the request's `canvas` field.
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub width: u32,
    pub height: u32,
    pub padding: u32,
    pub header_height: u32,
    pub axis_width: u32,
    pub day_count: u32,
    pub slot_count: u32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 1200,
            padding: 20,
            header_height: 40,
            axis_width: 60,
            day_count: 7,
            slot_count: 14,
        }
    }
}

/// Input contract from the (excluded) web glue: a style name, the course
/// list, optional canvas overrides, and an optional shuffle seed for
/// reproducible output.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct RenderRequest {
    pub style: String,
    pub courses: Vec<CourseRecord>,
    #[serde(default)]
    pub canvas: Option<CanvasConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

/// Output contract: filename plus the base64 text of the PNG byte stream.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct RenderOutput {
    pub filename: String,
    pub filedata_encoded: String,
}

impl RenderRequest {
    pub fn validate(&self) -> TimegridResult<()> {
        let config = self.canvas.unwrap_or_default();
        if config.day_count == 0 || config.slot_count == 0 {
            return Err(TimegridError::validation(
                "day_count and slot_count must be > 0",
            ));
        }

        for course in &self.courses {
            if course.day == 0 || u32::from(course.day) > config.day_count {
                return Err(TimegridError::validation(format!(
                    "course '{}' has day {} outside 1..={}",
                    course.name, course.day, config.day_count
                )));
            }
            if course.name.trim().is_empty() {
                return Err(TimegridError::validation("course name must be non-empty"));
            }
        }
        Ok(())
    }
}
