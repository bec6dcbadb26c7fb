//! Scene exporters.
//!
//! Each exporter turns a [`Scene`](crate::scene::Scene) into text for some
//! display surface. They only read the scene; swapping one for another never
//! changes what gets drawn.

pub mod json;
pub mod svg;

/// Settings shared by the exporters.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportConfig {
    /// Indent JSON output
    pub pretty_print: bool,
    /// Target canvas width in pixels
    pub width: u32,
    /// Target canvas height in pixels
    pub height: u32,
    /// Padding around the scene bounds, in plane units
    pub margin: f64,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            pretty_print: false,
            width: 800,
            height: 800,
            margin: 6.0,
        }
    }
}
