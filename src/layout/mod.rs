//! Geometric layouts: graph topology to 2D coordinates.
//!
//! All algorithms return coordinates centred on the origin and scaled so the
//! farthest node sits at distance 1 along some axis. None of them keeps state
//! between calls; the spring layout is deterministic for a given seed.

mod shell;
mod spectral;
mod spring;
mod stress;

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use log::{debug, warn};

use crate::graph::RelationGraph;

/// Node name to `(x, y)`.
pub type Positions = HashMap<String, (f64, f64)>;

/// The layouts offered in the viewers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LayoutAlgorithm {
	/// Force-directed.
	Spring,
	/// Concentric rings, one per partition.
	#[default]
	Shell,
	/// Every node on one circle.
	Circular,
	/// Laplacian eigenvectors.
	Spectral,
	/// Stress majorization over hop distances.
	KamadaKawai,
}

impl LayoutAlgorithm {
	/// Every layout, in picker order.
	pub const ALL: [LayoutAlgorithm; 5] = [
		Self::Shell,
		Self::Spring,
		Self::Circular,
		Self::Spectral,
		Self::KamadaKawai,
	];

	/// Name shown in the picker.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Spring => "spring",
			Self::Shell => "shell",
			Self::Circular => "circular",
			Self::Spectral => "spectral",
			Self::KamadaKawai => "kamada_kawai",
		}
	}

	/// Parse a layout name, falling back to shell for anything unknown.
	pub fn parse_or_default(name: &str) -> Self {
		name.parse().unwrap_or_else(|_| {
			warn!("unknown layout {name:?}, using shell");
			Self::default()
		})
	}
}

impl fmt::Display for LayoutAlgorithm {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for LayoutAlgorithm {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
			"spring" | "force" => Ok(Self::Spring),
			"shell" => Ok(Self::Shell),
			"circular" | "circle" => Ok(Self::Circular),
			"spectral" => Ok(Self::Spectral),
			"kamada_kawai" | "kamadakawai" | "stress" => Ok(Self::KamadaKawai),
			other => Err(format!("unknown layout: {other}")),
		}
	}
}

/// Lay out `graph` with `algorithm`.
///
/// `partitions` only matters for the shell layout; without it every node kind
/// gets its own ring.
pub fn compute_layout(
	graph: &RelationGraph,
	algorithm: LayoutAlgorithm,
	partitions: Option<&[Vec<String>]>,
	seed: u64,
) -> Positions {
	let positions = match graph.nodes.len() {
		0 => Positions::new(),
		1 => Positions::from([(graph.nodes[0].name.clone(), (0.0, 0.0))]),
		_ => match algorithm {
			LayoutAlgorithm::Spring => spring::layout(graph, seed),
			LayoutAlgorithm::Shell => match partitions {
				Some(shells) => shell::shell(graph, shells),
				None => shell::shell(graph, &graph.partitions_by_kind()),
			},
			LayoutAlgorithm::Circular => shell::circular(graph),
			LayoutAlgorithm::Spectral => spectral::layout(graph),
			LayoutAlgorithm::KamadaKawai => stress::layout(graph),
		},
	};
	debug!("{} layout placed {} nodes", algorithm, positions.len());
	positions
}

/// Centre on the mean and scale so the largest coordinate magnitude is `scale`.
pub(crate) fn rescale(points: &mut [(f64, f64)], scale: f64) {
	if points.is_empty() {
		return;
	}
	let n = points.len() as f64;
	let (cx, cy) = points
		.iter()
		.fold((0.0, 0.0), |(sx, sy), &(x, y)| (sx + x / n, sy + y / n));
	let mut lim: f64 = 0.0;
	for p in points.iter_mut() {
		p.0 -= cx;
		p.1 -= cy;
		lim = lim.max(p.0.abs()).max(p.1.abs());
	}
	if lim > 0.0 {
		for p in points.iter_mut() {
			p.0 *= scale / lim;
			p.1 *= scale / lim;
		}
	}
}

/// Zip node names with computed points.
pub(crate) fn collect(graph: &RelationGraph, points: Vec<(f64, f64)>) -> Positions {
	graph
		.nodes
		.iter()
		.map(|n| n.name.clone())
		.zip(points)
		.collect()
}

/// Undirected, loop-free adjacency lists in node order.
pub(crate) fn adjacency(graph: &RelationGraph) -> Vec<Vec<usize>> {
	let index = graph.index();
	let mut adj = vec![Vec::new(); graph.nodes.len()];
	for link in &graph.links {
		let (Some(&a), Some(&b)) = (index.get(link.source.as_str()), index.get(link.target.as_str()))
		else {
			continue;
		};
		if a != b && !adj[a].contains(&b) {
			adj[a].push(b);
			adj[b].push(a);
		}
	}
	adj
}

/// 32-bit FNV-1a; stable across runs and platforms.
pub fn stable_hash(name: &str) -> u32 {
	name.bytes().fold(0x811c_9dc5_u32, |h, b| {
		(h ^ u32::from(b)).wrapping_mul(0x0100_0193)
	})
}

/// Move every node of `kind` onto a circle of `radius`, at an angle derived
/// from its name.
pub fn pin_kind_to_ring(positions: &mut Positions, graph: &RelationGraph, kind: &str, radius: f64) {
	for node in graph.nodes.iter().filter(|n| n.kind == kind) {
		let angle = f64::from(stable_hash(&node.name) % 360).to_radians();
		positions.insert(node.name.clone(), (radius * angle.cos(), radius * angle.sin()));
	}
}
