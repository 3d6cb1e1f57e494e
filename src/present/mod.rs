//! Turning a positioned graph into something to look at.
//!
//! [`RasterScene`] and [`Figure`] are plain data computed from the graph and its
//! layout; painting them onto a canvas is the only browser-bound step.

mod figure;
mod palette;
mod raster;
mod scene;

pub use figure::{Figure, ImageOverlay, LineTrace, ScatterTrace};
pub use palette::{ALLY_COLOR, FOE_COLOR, degree_color};
pub use raster::paint_to_data_url;
pub use scene::{EdgeSprite, NodeSprite, RasterScene};

use crate::layout::Positions;

/// Affine map from layout space (y up) to canvas pixels (y down).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
	/// Pixels per layout unit.
	pub scale: f64,
	/// Horizontal offset in pixels.
	pub offset_x: f64,
	/// Vertical offset in pixels.
	pub offset_y: f64,
}

impl Viewport {
	/// Fit every position inside `width` x `height` keeping `margin` pixels free.
	pub fn fit(positions: &Positions, width: f64, height: f64, margin: f64) -> Self {
		let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
		let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
		for &(x, y) in positions.values() {
			min_x = min_x.min(x);
			max_x = max_x.max(x);
			min_y = min_y.min(y);
			max_y = max_y.max(y);
		}
		if !min_x.is_finite() {
			return Self {
				scale: 1.0,
				offset_x: width / 2.0,
				offset_y: height / 2.0,
			};
		}

		let span_x = (max_x - min_x).max(f64::EPSILON);
		let span_y = (max_y - min_y).max(f64::EPSILON);
		let scale = if max_x == min_x && max_y == min_y {
			1.0
		} else {
			((width - 2.0 * margin) / span_x).min((height - 2.0 * margin) / span_y)
		};
		let (cx, cy) = ((min_x + max_x) / 2.0, (min_y + max_y) / 2.0);
		Self {
			scale,
			offset_x: width / 2.0 - cx * scale,
			offset_y: height / 2.0 + cy * scale,
		}
	}

	/// Map a layout point to canvas pixels.
	pub fn to_canvas(&self, (x, y): (f64, f64)) -> (f64, f64) {
		(self.offset_x + x * self.scale, self.offset_y - y * self.scale)
	}
}
