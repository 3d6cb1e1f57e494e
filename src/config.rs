//! Data locations, palettes and presentation constants.

use std::collections::HashMap;

/// Canvas size used by both viewers, in pixels.
pub const CANVAS_WIDTH: f64 = 1000.0;
/// Canvas height, in pixels.
pub const CANVAS_HEIGHT: f64 = 600.0;

/// Node kind pinned to a fixed ring after a spring layout.
pub const RING_KIND: &str = "Human";
/// Radius of that ring in layout units.
pub const RING_RADIUS: f64 = 2.0;

/// Seed for layouts that need an initial placement.
pub const LAYOUT_SEED: u64 = 42;

/// Fallback color for kinds missing from the palette.
pub const UNKNOWN_KIND_COLOR: &str = "gray";

/// Where the source tables and thumbnails are served from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataSources {
	/// Participants table URL.
	pub participants: String,
	/// Relationship rules table URL.
	pub relationships: String,
	/// Heroes table URL.
	pub heroes: String,
	/// Artifacts table URL.
	pub artifacts: String,
	/// Base URL of the thumbnail images.
	pub images: String,
}

impl Default for DataSources {
	fn default() -> Self {
		Self {
			participants: "data/participants.csv".into(),
			relationships: "data/relationships.csv".into(),
			heroes: "data/heroes.csv".into(),
			artifacts: "data/artifacts.csv".into(),
			images: "images".into(),
		}
	}
}

impl DataSources {
	/// Thumbnail URL for an overlay key such as `heroes/aria`.
	pub fn image_url(&self, key: &str) -> String {
		format!("{}/{}.png", self.images.trim_end_matches('/'), key)
	}
}

/// Maps a node kind to a CSS color.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypePalette {
	colors: HashMap<String, String>,
}

impl Default for TypePalette {
	fn default() -> Self {
		Self::from_pairs([
			("Human", "red"),
			("Food", "yellow"),
			("Animal", "blue"),
			("Pet", "orange"),
			("Toy", "green"),
			("Vehicle", "purple"),
		])
	}
}

impl TypePalette {
	/// Palette with only the given kind/color pairs.
	pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
		Self {
			colors: pairs
				.into_iter()
				.map(|(kind, color)| (kind.to_string(), color.to_string()))
				.collect(),
		}
	}

	/// Color for `kind`, gray when the kind is unknown.
	pub fn color(&self, kind: &str) -> &str {
		self.colors
			.get(kind)
			.map(String::as_str)
			.unwrap_or(UNKNOWN_KIND_COLOR)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn unknown_kinds_are_gray() {
		let palette = TypePalette::default();
		assert_eq!(palette.color("Human"), "red");
		assert_eq!(palette.color("Dragon"), "gray");
	}

	#[test]
	fn image_url_joins_base_and_key() {
		let sources = DataSources {
			images: "assets/img/".into(),
			..DataSources::default()
		};
		assert_eq!(sources.image_url("heroes/aria"), "assets/img/heroes/aria.png");
	}
}
