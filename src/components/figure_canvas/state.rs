use std::collections::HashMap;

use web_sys::HtmlImageElement;

use crate::config::DataSources;
use crate::present::{Figure, Viewport};

/// Hover and click radius around a node marker, in screen pixels.
pub const HIT_RADIUS: f64 = 12.0;
/// Distance from an edge that still counts as hovering it, in screen pixels.
pub const EDGE_HIT: f64 = 5.0;
const MARGIN: f64 = 40.0;

#[derive(Clone, Debug)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

impl Default for ViewTransform {
	fn default() -> Self {
		Self { x: 0.0, y: 0.0, k: 1.0 }
	}
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

/// What the pointer is over.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HoverTarget {
	Node(usize),
	Edge(usize),
}

#[derive(Clone, Debug, Default)]
pub struct HoverState {
	pub target: Option<HoverTarget>,
	pub x: f64,
	pub y: f64,
}

pub struct FigureState {
	pub figure: Figure,
	pub viewport: Viewport,
	pub transform: ViewTransform,
	pub pan: PanState,
	pub hover: HoverState,
	pub images: HashMap<String, HtmlImageElement>,
	pub width: f64,
	pub height: f64,
}

impl FigureState {
	pub fn new(figure: Figure, sources: &DataSources, width: f64, height: f64) -> Self {
		let positions = figure
			.nodes
			.names
			.iter()
			.cloned()
			.zip(figure.nodes.points.iter().copied())
			.collect();
		let viewport = Viewport::fit(&positions, width, height, MARGIN);

		let mut images = HashMap::new();
		for overlay in &figure.overlays {
			if images.contains_key(&overlay.key) {
				continue;
			}
			if let Ok(img) = HtmlImageElement::new() {
				img.set_src(&sources.image_url(&overlay.key));
				images.insert(overlay.key.clone(), img);
			}
		}

		Self {
			figure,
			viewport,
			transform: ViewTransform::default(),
			pan: PanState::default(),
			hover: HoverState::default(),
			images,
			width,
			height,
		}
	}

	/// Layout coordinates to screen pixels, pan and zoom included.
	pub fn to_screen(&self, p: (f64, f64)) -> (f64, f64) {
		let (cx, cy) = self.viewport.to_canvas(p);
		(
			self.transform.x + cx * self.transform.k,
			self.transform.y + cy * self.transform.k,
		)
	}

	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<usize> {
		let mut found = None;
		for (i, &p) in self.figure.nodes.points.iter().enumerate() {
			let (x, y) = self.to_screen(p);
			if ((x - sx).powi(2) + (y - sy).powi(2)).sqrt() < HIT_RADIUS {
				found = Some(i);
			}
		}
		found
	}

	pub fn edge_at_position(&self, sx: f64, sy: f64) -> Option<usize> {
		self.figure.edges.iter().position(|edge| {
			let (x0, y0) = self.to_screen(edge.from);
			let (x1, y1) = self.to_screen(edge.to);
			let (dx, dy) = (x1 - x0, y1 - y0);
			let len2 = dx * dx + dy * dy;
			if len2 == 0.0 {
				return false;
			}
			let t = (((sx - x0) * dx + (sy - y0) * dy) / len2).clamp(0.0, 1.0);
			let (px, py) = (x0 + t * dx, y0 + t * dy);
			((px - sx).powi(2) + (py - sy).powi(2)).sqrt() < EDGE_HIT
		})
	}

	pub fn set_hover(&mut self, sx: f64, sy: f64) {
		self.hover.x = sx;
		self.hover.y = sy;
		self.hover.target = self
			.node_at_position(sx, sy)
			.map(HoverTarget::Node)
			.or_else(|| self.edge_at_position(sx, sy).map(HoverTarget::Edge));
	}

	pub fn clear_hover(&mut self) {
		self.hover.target = None;
	}

	pub fn hover_text(&self) -> Option<&str> {
		match self.hover.target? {
			HoverTarget::Node(i) => self.figure.nodes.hover.get(i).map(String::as_str),
			HoverTarget::Edge(i) => self.figure.edges.get(i).map(|e| e.hover.as_str()),
		}
	}

	/// Zoom by `factor` around the screen point `(sx, sy)`.
	pub fn zoom_at(&mut self, sx: f64, sy: f64, factor: f64) {
		let new_k = (self.transform.k * factor).clamp(0.1, 10.0);
		let ratio = new_k / self.transform.k;
		self.transform.x = sx - (sx - self.transform.x) * ratio;
		self.transform.y = sy - (sy - self.transform.y) * ratio;
		self.transform.k = new_k;
	}
}
