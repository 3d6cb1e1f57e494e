//! Load once, then filter, lay out and compose on every interaction.

use std::collections::BTreeSet;

use log::info;

use crate::config::{
	CANVAS_HEIGHT, CANVAS_WIDTH, DataSources, LAYOUT_SEED, RING_KIND, RING_RADIUS, TypePalette,
};
use crate::graph::{ArtifactGraph, RelationSnapshot, Selection, induced_subgraph};
use crate::layout::{LayoutAlgorithm, compute_layout, pin_kind_to_ring};
use crate::model::{
	LoadError, RenderError, fetch_text, merge_heroes, parse_artifacts, parse_heroes,
	parse_participants, parse_rules,
};
use crate::present::{Figure, RasterScene};

/// Read the participants and relationships tables and expand them.
pub async fn load_relation_snapshot(sources: &DataSources) -> Result<RelationSnapshot, LoadError> {
	let participants = parse_participants(&fetch_text(&sources.participants).await?)?;
	let rules = parse_rules(&fetch_text(&sources.relationships).await?)?;
	Ok(RelationSnapshot::build(&participants, &rules))
}

/// Read the heroes and artifacts tables and join them.
pub async fn load_artifact_graph(sources: &DataSources) -> Result<ArtifactGraph, LoadError> {
	let heroes = parse_heroes(&fetch_text(&sources.heroes).await?)?;
	let artifacts = parse_artifacts(&fetch_text(&sources.artifacts).await?)?;
	let links = merge_heroes(&heroes, &artifacts);
	info!("Merged {} hero rows into {} artifact links", heroes.len(), links.len());
	Ok(ArtifactGraph::from_links(&links, &artifacts))
}

/// The raster scene for the current relationship selection.
///
/// Kinds get their own shell; after a spring layout the ring kind is pinned to
/// its circle.
pub fn relationship_scene(
	snapshot: &RelationSnapshot,
	selection: &Selection,
	algorithm: LayoutAlgorithm,
	palette: &TypePalette,
) -> RasterScene {
	let graph = induced_subgraph(&snapshot.graph(), selection);
	let mut positions = compute_layout(&graph, algorithm, None, LAYOUT_SEED);
	if algorithm == LayoutAlgorithm::Spring {
		pin_kind_to_ring(&mut positions, &graph, RING_KIND, RING_RADIUS);
	}
	RasterScene::compose(&graph, &positions, palette, CANVAS_WIDTH, CANVAS_HEIGHT)
}

/// Render the current relationship selection to a PNG data URL.
pub fn render_relationships(
	snapshot: &RelationSnapshot,
	selection: &Selection,
	algorithm: LayoutAlgorithm,
	palette: &TypePalette,
) -> Result<String, RenderError> {
	crate::present::paint_to_data_url(&relationship_scene(snapshot, selection, algorithm, palette))
}

/// The interactive figure for the chosen nodes and artifacts.
pub fn artifact_figure(
	data: &ArtifactGraph,
	nodes: &BTreeSet<String>,
	artifacts: &BTreeSet<String>,
	algorithm: LayoutAlgorithm,
) -> Result<Figure, RenderError> {
	let selection = Selection {
		entities: nodes.clone(),
		relationships: artifacts.clone(),
	};
	let graph = induced_subgraph(data.graph(), &selection);
	let positions = compute_layout(&graph, algorithm, None, LAYOUT_SEED);
	Figure::compose(&graph, &positions, data)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::{Participant, RelationRule};

	fn snapshot() -> RelationSnapshot {
		let participants = [("Alice", "Human"), ("Bob", "Human"), ("Rex", "Pet")]
			.map(|(name, kind)| Participant {
				name: name.into(),
				kind: kind.into(),
			});
		let rules = [("Human", "owns", "Pet"), ("Human", "knows", "Human")].map(|(s, l, o)| {
			RelationRule {
				subject_type: s.into(),
				label: l.into(),
				object_type: o.into(),
				relation_type: None,
			}
		});
		RelationSnapshot::build(&participants, &rules)
	}

	#[test]
	fn scene_follows_selection() {
		let snapshot = snapshot();
		let palette = TypePalette::default();
		let all = Selection::new(snapshot.entity_names(), snapshot.labels().to_vec());
		let scene = relationship_scene(&snapshot, &all, LayoutAlgorithm::Shell, &palette);
		assert_eq!(scene.nodes.len(), 3);
		// owns: 2, knows: 2 non-self of 4
		assert_eq!(scene.edges.len(), 4);

		let alice_only = Selection::new(["Alice"], snapshot.labels().to_vec());
		let scene = relationship_scene(&snapshot, &alice_only, LayoutAlgorithm::Spring, &palette);
		assert_eq!(scene.nodes.len(), 1);
		assert!(scene.edges.is_empty());
	}

	#[test]
	fn figure_respects_artifact_filter() {
		let heroes = parse_heroes(
			"HeroId,ArtifactId,UnlockLevel,TargetId,TargetType,TargetUser,EquippedTiers\n\
			 aria,flame,10,borin,hero,ally,2\n\
			 aria,frost,10,borin,hero,enemy,1\n",
		)
		.unwrap();
		let artifacts = parse_artifacts(
			"ArtifactId,EffectSize,EffectDescription\n\
			 flame,{1|2|3},Deals {} damage\n\
			 frost,{4|5},Slows by {}%\n",
		)
		.unwrap();
		let data = ArtifactGraph::from_links(&merge_heroes(&heroes, &artifacts), &artifacts);
		let nodes: BTreeSet<String> = ["aria".to_string(), "borin".to_string()].into();
		let only_frost: BTreeSet<String> = ["frost".to_string()].into();

		let figure = artifact_figure(&data, &nodes, &only_frost, LayoutAlgorithm::KamadaKawai).unwrap();
		assert_eq!(figure.edges.len(), 1);
		assert_eq!(figure.edges[0].hover, "frost (aria): Slows by 4%");
	}
}
