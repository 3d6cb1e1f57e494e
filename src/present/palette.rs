/// Edge color for ally targets.
pub const ALLY_COLOR: &str = "#2ca02c";
/// Edge color for everything else.
pub const FOE_COLOR: &str = "#d62728";

// YlGnBu, low to high
const SCALE: &[(u8, u8, u8)] = &[
	(255, 255, 217),
	(237, 248, 177),
	(199, 233, 180),
	(127, 205, 187),
	(65, 182, 196),
	(29, 145, 192),
	(34, 94, 168),
	(37, 52, 148),
	(8, 29, 88),
];

/// Color for a node of `degree` when the busiest node has `max_degree`.
pub fn degree_color(degree: usize, max_degree: usize) -> String {
	let t = if max_degree == 0 {
		0.0
	} else {
		(degree as f64 / max_degree as f64).clamp(0.0, 1.0)
	};
	let pos = t * (SCALE.len() - 1) as f64;
	let lo = pos.floor() as usize;
	let hi = (lo + 1).min(SCALE.len() - 1);
	let frac = pos - lo as f64;
	let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * frac).round() as u8;
	let (a, b) = (SCALE[lo], SCALE[hi]);
	format!("rgb({}, {}, {})", mix(a.0, b.0), mix(a.1, b.1), mix(a.2, b.2))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn ends_of_the_scale() {
		assert_eq!(degree_color(0, 4), "rgb(255, 255, 217)");
		assert_eq!(degree_color(4, 4), "rgb(8, 29, 88)");
		assert_eq!(degree_color(3, 0), "rgb(255, 255, 217)");
	}

	#[test]
	fn midpoint_interpolates() {
		assert_eq!(degree_color(1, 2), "rgb(65, 182, 196)");
	}
}
