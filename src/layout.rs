use crate::error::{TimegridError, TimegridResult};
use crate::model::CanvasConfig;

/// Upper bound on canvas area. A request past this is a configuration
/// mistake, not a renderable size.
pub const MAX_CANVAS_PIXELS: u64 = 100_000_000;

/// Derived pixel geometry for one render. Columns and rows are f64 so the
/// grid divides evenly; every drawing call rounds once, at the raster
/// boundary, so headers and rule lines computed from the same boundary land
/// on the same pixel row.
#[derive(Clone, Copy, Debug)]
pub struct GridGeometry {
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub padding: f64,
    pub header_height: f64,
    pub axis_width: f64,
    /// Left edge of the day columns (right of the time gutter).
    pub grid_x: f64,
    /// Top edge of the time rows (below the header band).
    pub grid_y: f64,
    pub grid_width: f64,
    pub grid_height: f64,
    pub col_width: f64,
    pub row_height: f64,
    pub day_count: u32,
    pub slot_count: u32,
}

impl GridGeometry {
    pub fn compute(config: &CanvasConfig) -> TimegridResult<Self> {
        if config.day_count == 0 || config.slot_count == 0 {
            return Err(TimegridError::configuration(
                "day_count and slot_count must be > 0",
            ));
        }

        let pixels = u64::from(config.width) * u64::from(config.height);
        if pixels > MAX_CANVAS_PIXELS {
            return Err(TimegridError::configuration(format!(
                "canvas {}x{} exceeds the {MAX_CANVAS_PIXELS}-pixel area limit",
                config.width, config.height
            )));
        }

        let width = f64::from(config.width);
        let height = f64::from(config.height);
        let padding = f64::from(config.padding);
        let header_height = f64::from(config.header_height);
        let axis_width = f64::from(config.axis_width);

        let grid_width = width - padding * 2.0 - axis_width;
        let grid_height = height - padding * 2.0 - header_height;
        if grid_width <= 0.0 || grid_height <= 0.0 {
            return Err(TimegridError::configuration(format!(
                "canvas {}x{} leaves a non-positive grid ({grid_width}x{grid_height}) \
                 after padding/axis/header",
                config.width, config.height
            )));
        }

        Ok(Self {
            canvas_width: config.width,
            canvas_height: config.height,
            padding,
            header_height,
            axis_width,
            grid_x: padding + axis_width,
            grid_y: padding + header_height,
            grid_width,
            grid_height,
            col_width: grid_width / f64::from(config.day_count),
            row_height: grid_height / f64::from(config.slot_count),
            day_count: config.day_count,
            slot_count: config.slot_count,
        })
    }

    /// Left boundary of 0-based day column `i` (i == day_count is the right
    /// edge of the grid).
    pub fn col_x(&self, i: u32) -> f64 {
        self.grid_x + f64::from(i) * self.col_width
    }

    /// Top boundary of 0-based time row `i` (i == slot_count is the bottom
    /// edge of the grid).
    pub fn row_y(&self, i: u32) -> f64 {
        self.grid_y + f64::from(i) * self.row_height
    }
}
