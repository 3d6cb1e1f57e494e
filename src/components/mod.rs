//! Reusable widgets shared by the viewer pages.

pub mod figure_canvas;
mod multi_select;

pub use multi_select::{LayoutSelect, MultiSelect};
