use super::{Positions, adjacency, collect, rescale, shell};
use crate::graph::RelationGraph;

const MAX_SWEEPS: usize = 100;
const EPSILON: f64 = 1e-12;

/// Eigen-decomposition of a symmetric matrix by cyclic Jacobi rotations.
///
/// Returns eigenvalues and the matching eigenvectors as columns of the
/// returned matrix.
pub(crate) fn jacobi_eigen(mut a: Vec<Vec<f64>>) -> (Vec<f64>, Vec<Vec<f64>>) {
	let n = a.len();
	let mut v = vec![vec![0.0; n]; n];
	for (i, row) in v.iter_mut().enumerate() {
		row[i] = 1.0;
	}

	for _ in 0..MAX_SWEEPS {
		let off: f64 = (0..n)
			.flat_map(|p| (0..n).filter(move |&q| q != p).map(move |q| (p, q)))
			.map(|(p, q)| a[p][q] * a[p][q])
			.sum();
		if off < EPSILON {
			break;
		}

		for p in 0..n {
			for q in p + 1..n {
				if a[p][q].abs() < EPSILON {
					continue;
				}
				let theta = (a[q][q] - a[p][p]) / (2.0 * a[p][q]);
				let t = theta.signum() / (theta.abs() + (theta * theta + 1.0).sqrt());
				let t = if theta == 0.0 { 1.0 } else { t };
				let c = 1.0 / (t * t + 1.0).sqrt();
				let s = t * c;

				for k in 0..n {
					let (akp, akq) = (a[k][p], a[k][q]);
					a[k][p] = c * akp - s * akq;
					a[k][q] = s * akp + c * akq;
				}
				for k in 0..n {
					let (apk, aqk) = (a[p][k], a[q][k]);
					a[p][k] = c * apk - s * aqk;
					a[q][k] = s * apk + c * aqk;
				}
				for row in v.iter_mut() {
					let (vkp, vkq) = (row[p], row[q]);
					row[p] = c * vkp - s * vkq;
					row[q] = s * vkp + c * vkq;
				}
			}
		}
	}

	((0..n).map(|i| a[i][i]).collect(), v)
}

/// Coordinates from the two smallest non-trivial Laplacian eigenvectors.
pub fn layout(graph: &RelationGraph) -> Positions {
	let n = graph.nodes.len();
	if n < 3 {
		return shell::circular(graph);
	}

	let adj = adjacency(graph);
	let mut laplacian = vec![vec![0.0; n]; n];
	for (i, neighbours) in adj.iter().enumerate() {
		laplacian[i][i] = neighbours.len() as f64;
		for &j in neighbours {
			laplacian[i][j] = -1.0;
		}
	}

	let (values, vectors) = jacobi_eigen(laplacian);
	let mut order: Vec<usize> = (0..n).collect();
	order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));
	let (ex, ey) = (order[1], order[2]);

	let mut points: Vec<(f64, f64)> = (0..n).map(|i| (vectors[i][ex], vectors[i][ey])).collect();
	rescale(&mut points, 1.0);
	collect(graph, points)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn diagonalises_symmetric_matrix() {
		let (mut values, _) = jacobi_eigen(vec![
			vec![2.0, -1.0, 0.0],
			vec![-1.0, 2.0, -1.0],
			vec![0.0, -1.0, 2.0],
		]);
		values.sort_by(f64::total_cmp);
		let expected = [2.0 - 2f64.sqrt(), 2.0, 2.0 + 2f64.sqrt()];
		for (got, want) in values.iter().zip(expected) {
			assert!((got - want).abs() < 1e-9, "{got} vs {want}");
		}
	}

	#[test]
	fn eigenvectors_satisfy_definition() {
		let m = vec![vec![4.0, 1.0], vec![1.0, 3.0]];
		let (values, vectors) = jacobi_eigen(m.clone());
		for k in 0..2 {
			for i in 0..2 {
				let mv: f64 = (0..2).map(|j| m[i][j] * vectors[j][k]).sum();
				assert!((mv - values[k] * vectors[i][k]).abs() < 1e-9);
			}
		}
	}
}
