use std::collections::VecDeque;

use super::{Positions, adjacency, collect, rescale, shell};
use crate::graph::RelationGraph;

const MAX_ITERATIONS: usize = 300;
const TOLERANCE: f64 = 1e-6;

/// Hop distances from every node; unreachable pairs get `None`.
fn all_pairs_hops(adj: &[Vec<usize>]) -> Vec<Vec<Option<usize>>> {
	let n = adj.len();
	(0..n)
		.map(|source| {
			let mut dist = vec![None; n];
			dist[source] = Some(0);
			let mut queue = VecDeque::from([source]);
			while let Some(u) = queue.pop_front() {
				let d = dist[u].unwrap_or(0);
				for &v in &adj[u] {
					if dist[v].is_none() {
						dist[v] = Some(d + 1);
						queue.push_back(v);
					}
				}
			}
			dist
		})
		.collect()
}

/// Kamada-Kawai style layout by stress majorization.
///
/// Target distances are hop counts of the undirected graph; pairs in
/// different components are treated as one hop further than the longest
/// path. Starts from the circular layout.
pub fn layout(graph: &RelationGraph) -> Positions {
	let n = graph.nodes.len();
	let hops = all_pairs_hops(&adjacency(graph));
	let longest = hops
		.iter()
		.flatten()
		.filter_map(|d| *d)
		.max()
		.unwrap_or(0);
	let dist: Vec<Vec<f64>> = hops
		.iter()
		.map(|row| {
			row.iter()
				.map(|d| d.unwrap_or(longest + 1) as f64)
				.collect()
		})
		.collect();

	let circle = shell::circular(graph);
	let mut points: Vec<(f64, f64)> = graph.nodes.iter().map(|node| circle[&node.name]).collect();

	for _ in 0..MAX_ITERATIONS {
		let mut moved: f64 = 0.0;
		for i in 0..n {
			let (mut sx, mut sy, mut sw) = (0.0, 0.0, 0.0);
			let (xi, yi) = points[i];
			for j in (0..n).filter(|&j| j != i) {
				let d = dist[i][j];
				let w = 1.0 / (d * d);
				let (xj, yj) = points[j];
				let (dx, dy) = (xi - xj, yi - yj);
				let norm = (dx * dx + dy * dy).sqrt();
				let (tx, ty) = if norm > 0.0 {
					(xj + d * dx / norm, yj + d * dy / norm)
				} else {
					(xj, yj)
				};
				sx += w * tx;
				sy += w * ty;
				sw += w;
			}
			let next = (sx / sw, sy / sw);
			moved = moved.max((next.0 - xi).abs()).max((next.1 - yi).abs());
			points[i] = next;
		}
		if moved < TOLERANCE {
			break;
		}
	}

	rescale(&mut points, 1.0);
	collect(graph, points)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::GraphLink;

	#[test]
	fn hop_distances() {
		let adj = vec![vec![1], vec![0, 2], vec![1], vec![]];
		let hops = all_pairs_hops(&adj);
		assert_eq!(hops[0], vec![Some(0), Some(1), Some(2), None]);
		assert_eq!(hops[3][3], Some(0));
	}

	#[test]
	fn path_ends_are_farthest_apart() {
		let mut g = RelationGraph::default();
		for name in ["a", "b", "c", "d"] {
			g.add_node(name, "X");
		}
		for (s, t) in [("a", "b"), ("b", "c"), ("c", "d")] {
			g.links.push(GraphLink::new(s, t, "next"));
		}
		let positions = layout(&g);
		let dist = |p: &str, q: &str| {
			let ((x1, y1), (x2, y2)) = (positions[p], positions[q]);
			((x1 - x2).powi(2) + (y1 - y2).powi(2)).sqrt()
		};
		assert!(dist("a", "d") > dist("a", "b"));
		assert!(dist("a", "d") > dist("b", "c"));
	}
}
