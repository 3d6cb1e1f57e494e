use std::collections::HashSet;
use std::f64::consts::TAU;

use force_graph::{EdgeData, ForceGraph, NodeData, SimulationParameters};

use super::{Positions, adjacency, collect, rescale, shell};
use crate::graph::RelationGraph;

const ITERATIONS: usize = 300;
const TIME_STEP: f32 = 0.016;
const INITIAL_RADIUS: f64 = 100.0;

/// Deterministic generator for the initial jitter.
fn split_mix(state: &mut u64) -> f64 {
	*state = state.wrapping_add(0x9e37_79b9_7f4a_7c15);
	let mut z = *state;
	z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
	z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
	z ^= z >> 31;
	(z >> 11) as f64 / (1u64 << 53) as f64
}

/// Force-directed placement, run to a fixed number of ticks.
pub fn layout(graph: &RelationGraph, seed: u64) -> Positions {
	let mut sim: ForceGraph<usize, ()> = ForceGraph::new(SimulationParameters {
		force_charge: 150.0,
		force_spring: 0.05,
		force_max: 100.0,
		node_speed: 3000.0,
		damping_factor: 0.9,
	});

	let n = graph.nodes.len();
	let mut state = seed;
	let idx: Vec<_> = (0..n)
		.map(|i| {
			let angle = TAU * i as f64 / n as f64 + split_mix(&mut state) * 0.5;
			let r = INITIAL_RADIUS * (0.75 + 0.5 * split_mix(&mut state));
			sim.add_node(NodeData {
				x: (r * angle.cos()) as f32,
				y: (r * angle.sin()) as f32,
				mass: 10.0,
				is_anchor: false,
				user_data: i,
			})
		})
		.collect();

	let mut springs: HashSet<(usize, usize)> = HashSet::new();
	for (a, neighbours) in adjacency(graph).iter().enumerate() {
		for &b in neighbours.iter().filter(|&&b| a < b) {
			if springs.insert((a, b)) {
				sim.add_edge(idx[a], idx[b], EdgeData::default());
			}
		}
	}

	for _ in 0..ITERATIONS {
		sim.update(TIME_STEP);
	}

	let mut points = vec![(0.0, 0.0); n];
	sim.visit_nodes(|node| {
		points[node.data.user_data] = (node.x() as f64, node.y() as f64);
	});

	if points.iter().any(|(x, y)| !x.is_finite() || !y.is_finite()) {
		log::warn!("spring simulation diverged, using circular layout");
		return shell::circular(graph);
	}
	rescale(&mut points, 1.0);
	collect(graph, points)
}
