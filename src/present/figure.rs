use log::debug;

use super::palette::{ALLY_COLOR, FOE_COLOR, degree_color};
use crate::graph::{ARTIFACT_KIND, DescriptionSource, RelationGraph};
use crate::layout::Positions;
use crate::model::RenderError;

/// Marker radius of every node, in pixels.
pub const MARKER_SIZE: f64 = 10.0;
/// Side of a node thumbnail, in pixels.
pub const NODE_THUMBNAIL: f64 = 36.0;
/// Side of an edge thumbnail, in pixels.
pub const EDGE_THUMBNAIL: f64 = 22.0;

/// All nodes as one trace; coordinates stay in layout space.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScatterTrace {
	/// Node names, parallel to `points`.
	pub names: Vec<String>,
	/// Layout coordinates.
	pub points: Vec<(f64, f64)>,
	/// Marker fill per node.
	pub colors: Vec<String>,
	/// Hover text per node.
	pub hover: Vec<String>,
	/// Marker diameter in pixels.
	pub marker_size: f64,
}

/// A single edge drawn as a straight segment.
#[derive(Clone, Debug, PartialEq)]
pub struct LineTrace {
	/// Start point.
	pub from: (f64, f64),
	/// End point.
	pub to: (f64, f64),
	/// CSS color.
	pub color: String,
	/// Hover text.
	pub hover: String,
}

/// A thumbnail drawn centred on `at`; `key` names the image, e.g. `heroes/aria`.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageOverlay {
	/// Image key.
	pub key: String,
	/// Centre point.
	pub at: (f64, f64),
	/// Side length in pixels.
	pub size: f64,
}

/// The interactive view of an artifact graph.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Figure {
	/// Node layer.
	pub nodes: ScatterTrace,
	/// Edge layer.
	pub edges: Vec<LineTrace>,
	/// Thumbnail layer.
	pub overlays: Vec<ImageOverlay>,
}

impl Figure {
	/// Build traces and overlays. A node or edge whose description is missing
	/// fails the whole figure.
	pub fn compose(
		graph: &RelationGraph,
		positions: &Positions,
		descriptions: &impl DescriptionSource,
	) -> Result<Self, RenderError> {
		let degrees = graph.degrees();
		let max_degree = degrees.values().copied().max().unwrap_or(0);
		let mut figure = Figure {
			nodes: ScatterTrace {
				marker_size: MARKER_SIZE,
				..ScatterTrace::default()
			},
			..Figure::default()
		};

		for node in &graph.nodes {
			let Some(&at) = positions.get(&node.name) else {
				continue;
			};
			let is_artifact = node.kind == ARTIFACT_KIND;
			let hover = if is_artifact {
				descriptions.node_description(&node.name)?
			} else {
				node.name.clone()
			};
			let folder = if is_artifact { "artifacts" } else { "heroes" };

			figure.nodes.names.push(node.name.clone());
			figure.nodes.points.push(at);
			figure
				.nodes
				.colors
				.push(degree_color(degrees[node.name.as_str()], max_degree));
			figure.nodes.hover.push(hover);
			figure.overlays.push(ImageOverlay {
				key: format!("{folder}/{}", node.name),
				at,
				size: NODE_THUMBNAIL,
			});
		}

		for link in graph.links.iter().filter(|l| !l.is_self_loop()) {
			let (Some(&from), Some(&to)) = (positions.get(&link.source), positions.get(&link.target))
			else {
				continue;
			};
			let ally = link
				.allegiance
				.as_deref()
				.is_some_and(|a| a.eq_ignore_ascii_case("ally"));
			figure.edges.push(LineTrace {
				from,
				to,
				color: if ally { ALLY_COLOR } else { FOE_COLOR }.to_string(),
				hover: descriptions.edge_description(link)?,
			});
			figure.overlays.push(ImageOverlay {
				key: format!("artifacts/{}", link.label),
				at: ((from.0 + to.0) / 2.0, (from.1 + to.1) / 2.0),
				size: EDGE_THUMBNAIL,
			});
		}

		debug!(
			"figure: {} nodes, {} edges, {} overlays",
			figure.nodes.points.len(),
			figure.edges.len(),
			figure.overlays.len()
		);
		Ok(figure)
	}
}
