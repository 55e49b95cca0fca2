// File: crates/chart-core/src/lib.rs
// Summary: Core library entry point; exports the line chart model, rendering and HTML export.

pub mod chart;
pub mod series;
pub mod axis;
pub mod grid;
pub mod types;
pub mod geometry;
pub mod view;
pub mod theme;
pub mod html;

pub use chart::{Chart, RenderOptions};
pub use series::{Series, SeriesType};
pub use axis::Axis;
pub use view::ViewState;
pub use theme::Theme;
pub use html::{render_to_html, write_html};
