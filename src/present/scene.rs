use log::debug;

use super::Viewport;
use crate::config::TypePalette;
use crate::graph::RelationGraph;
use crate::layout::Positions;

/// Bend of every edge, as a fraction of its length.
pub const CURVATURE: f64 = 0.2;
/// Perpendicular offset of an edge label from the edge midpoint, as a fraction of its length.
pub const LABEL_OFFSET: f64 = 0.2;
/// Node disc radius in pixels.
pub const NODE_RADIUS: f64 = 24.0;
const MARGIN: f64 = 40.0;

/// A node disc in canvas pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeSprite {
	/// Name.
	pub name: String,
	/// Canvas x.
	pub x: f64,
	/// Canvas y.
	pub y: f64,
	/// CSS color.
	pub color: String,
}

/// One drawn arc per ordered node pair; parallel labels are joined.
#[derive(Clone, Debug, PartialEq)]
pub struct EdgeSprite {
	/// Start point.
	pub from: (f64, f64),
	/// End point.
	pub to: (f64, f64),
	/// Quadratic curve control point.
	pub control: (f64, f64),
	/// CSS color.
	pub color: String,
	/// Relationship label.
	pub label: String,
	/// Label anchor.
	pub label_at: (f64, f64),
}

/// Everything the raster painter needs, in canvas pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct RasterScene {
	/// Canvas width.
	pub width: f64,
	/// Canvas height.
	pub height: f64,
	/// Disc radius in pixels.
	pub node_radius: f64,
	/// Node layer.
	pub nodes: Vec<NodeSprite>,
	/// Edge layer.
	pub edges: Vec<EdgeSprite>,
}

impl RasterScene {
	/// Lay sprites out for a `width` x `height` canvas. Self loops are dropped.
	pub fn compose(
		graph: &RelationGraph,
		positions: &Positions,
		palette: &TypePalette,
		width: f64,
		height: f64,
	) -> Self {
		let viewport = Viewport::fit(positions, width, height, MARGIN);
		let at = |name: &str| positions.get(name).copied();

		let nodes = graph
			.nodes
			.iter()
			.filter_map(|node| {
				let (x, y) = viewport.to_canvas(at(&node.name)?);
				Some(NodeSprite {
					name: node.name.clone(),
					x,
					y,
					color: palette.color(&node.kind).to_string(),
				})
			})
			.collect();

		let mut edges: Vec<(String, String, EdgeSprite)> = Vec::new();
		for link in graph.links.iter().filter(|l| !l.is_self_loop()) {
			let (Some(p0), Some(p1)) = (at(&link.source), at(&link.target)) else {
				continue;
			};
			if let Some((_, _, sprite)) = edges
				.iter_mut()
				.find(|(s, t, _)| *s == link.source && *t == link.target)
			{
				sprite.label = format!("{}, {}", sprite.label, link.label);
				continue;
			}

			let color = graph
				.kind_of(&link.target)
				.map(|kind| palette.color(kind))
				.unwrap_or(crate::config::UNKNOWN_KIND_COLOR)
				.to_string();
			let (mx, my) = ((p0.0 + p1.0) / 2.0, (p0.1 + p1.1) / 2.0);
			let (dx, dy) = (p1.0 - p0.0, p1.1 - p0.1);

			edges.push((
				link.source.clone(),
				link.target.clone(),
				EdgeSprite {
					from: viewport.to_canvas(p0),
					to: viewport.to_canvas(p1),
					control: viewport.to_canvas((mx + CURVATURE * dy, my - CURVATURE * dx)),
					color,
					label: link.label.clone(),
					label_at: viewport.to_canvas((mx + LABEL_OFFSET * dy, my - LABEL_OFFSET * dx)),
				},
			));
		}

		let scene = Self {
			width,
			height,
			node_radius: NODE_RADIUS,
			nodes,
			edges: edges.into_iter().map(|(_, _, sprite)| sprite).collect(),
		};
		debug!(
			"raster scene: {} nodes, {} edges",
			scene.nodes.len(),
			scene.edges.len()
		);
		scene
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::GraphLink;

	fn sample() -> (RelationGraph, Positions) {
		let mut g = RelationGraph::default();
		g.add_node("Alice", "Human");
		g.add_node("Rex", "Pet");
		g.links.push(GraphLink::new("Alice", "Rex", "owns"));
		g.links.push(GraphLink::new("Alice", "Rex", "feeds"));
		g.links.push(GraphLink::new("Alice", "Alice", "knows"));
		g.links.push(GraphLink::new("Rex", "Alice", "licks"));
		let positions = Positions::from([
			("Alice".to_string(), (-1.0, 0.0)),
			("Rex".to_string(), (1.0, 0.0)),
		]);
		(g, positions)
	}

	#[test]
	fn self_loops_are_never_drawn() {
		let (g, positions) = sample();
		let scene = RasterScene::compose(&g, &positions, &TypePalette::default(), 400.0, 300.0);
		assert_eq!(scene.edges.len(), 2);
		assert!(scene.edges.iter().all(|e| e.from != e.to));
		assert!(scene.edges.iter().all(|e| !e.label.contains("knows")));
	}

	#[test]
	fn edges_take_the_target_color() {
		let (g, positions) = sample();
		let scene = RasterScene::compose(&g, &positions, &TypePalette::default(), 400.0, 300.0);
		assert_eq!(scene.edges[0].color, "orange");
		assert_eq!(scene.edges[0].label, "owns, feeds");
		assert_eq!(scene.edges[1].color, "red");
		assert_eq!(scene.nodes[1].color, "orange");
	}

	#[test]
	fn labels_sit_off_the_chord() {
		let (g, positions) = sample();
		let scene = RasterScene::compose(&g, &positions, &TypePalette::default(), 400.0, 300.0);
		let forward = &scene.edges[0];
		let backward = &scene.edges[1];
		let mid_y = (forward.from.1 + forward.to.1) / 2.0;
		assert!((forward.label_at.1 - mid_y).abs() > 1.0);
		// opposite directions bend to opposite sides
		assert!((forward.control.1 - mid_y) * (backward.control.1 - mid_y) < 0.0);
	}
}
