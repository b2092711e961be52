pub mod chart;
pub mod content;
pub mod map;
pub mod matrix;
pub mod stats;
pub mod title;

/// Horizontal padding shared by the full-width layouts, at scale 1.
pub const SIDE_PADDING: f32 = 160.0;
/// Vertical padding shared by the full-width layouts, at scale 1.
pub const TOP_PADDING: f32 = 90.0;
