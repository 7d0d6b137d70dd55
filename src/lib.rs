#![forbid(unsafe_code)]

pub mod blur;
pub mod canvas;
pub mod composite;
pub mod core;
pub mod draw;
pub mod encode;
pub mod error;
pub mod font;
pub mod layout;
pub mod model;
pub mod palette;
pub mod render;
pub mod theme;

pub use canvas::Canvas;
pub use core::{ClockTime, Rgba8, Rgba8Premul};
pub use error::{TimegridError, TimegridResult};
pub use font::{FontFace, FontSet};
pub use layout::GridGeometry;
pub use model::{CanvasConfig, CourseRecord, RenderOutput, RenderRequest, WINDOW_START_HOUR};
pub use palette::{ColorAssignment, SplitMix64};
pub use render::{render_png, render_timetable};
pub use theme::{Style, Theme};
