use std::collections::HashSet;
use std::f64::consts::TAU;

use super::{Positions, collect};
use crate::graph::RelationGraph;

/// Nodes evenly spaced on the unit circle, in node order.
pub fn circular(graph: &RelationGraph) -> Positions {
	let n = graph.nodes.len() as f64;
	let points = (0..graph.nodes.len())
		.map(|i| {
			let theta = TAU * i as f64 / n;
			(theta.cos(), theta.sin())
		})
		.collect();
	collect(graph, points)
}

/// Concentric rings, one per shell, innermost first.
///
/// Names missing from the graph are ignored; nodes missing from every shell
/// form an extra outer ring. A first shell holding a single node sits at the
/// centre.
pub fn shell(graph: &RelationGraph, shells: &[Vec<String>]) -> Positions {
	let mut seen: HashSet<&str> = HashSet::new();
	let mut rings: Vec<Vec<&str>> = Vec::new();
	for names in shells {
		let ring: Vec<&str> = names
			.iter()
			.map(String::as_str)
			.filter(|name| graph.contains(name) && seen.insert(*name))
			.collect();
		if !ring.is_empty() {
			rings.push(ring);
		}
	}
	let rest: Vec<&str> = graph
		.nodes
		.iter()
		.map(|n| n.name.as_str())
		.filter(|name| !seen.contains(name))
		.collect();
	if !rest.is_empty() {
		rings.push(rest);
	}

	let bump = 1.0 / rings.len() as f64;
	let rotate = std::f64::consts::PI / rings.len() as f64;
	let mut radius = if rings[0].len() == 1 { 0.0 } else { bump };
	let mut first_theta = rotate;

	let mut positions = Positions::new();
	for ring in &rings {
		let n = ring.len() as f64;
		for (i, name) in ring.iter().enumerate() {
			let theta = TAU * i as f64 / n + first_theta;
			positions.insert(name.to_string(), (radius * theta.cos(), radius * theta.sin()));
		}
		radius += bump;
		first_theta += rotate;
	}
	positions
}
