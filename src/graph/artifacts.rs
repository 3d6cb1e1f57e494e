use std::collections::HashMap;

use log::debug;

use super::{GraphLink, RelationGraph};
use crate::model::{ArtifactLink, ArtifactRow, RenderError, parse_effect_sizes, resolve_effect};

/// Node kind of heroes.
pub const HERO_KIND: &str = "hero";
/// Node kind of artifacts used as targets.
pub const ARTIFACT_KIND: &str = "artifact";
/// Tier used when describing an artifact on its own.
pub const BASE_TIER: u32 = 1;

/// Heroes, their targets and the artifacts linking them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ArtifactGraph {
	graph: RelationGraph,
	artifact_descriptions: HashMap<String, String>,
}

impl ArtifactGraph {
	/// One edge hero -> target per merged row, labelled with the artifact id and
	/// carrying that row's description.
	pub fn from_links(links: &[ArtifactLink], artifacts: &[ArtifactRow]) -> Self {
		let mut graph = RelationGraph::default();

		for link in links {
			graph.add_node(&link.hero_id, HERO_KIND);
			graph.add_node(&link.target_id, &link.target_type);
			graph.links.push(GraphLink {
				allegiance: Some(link.target_user.clone()),
				weight: f64::from(link.unlock_level),
				description: Some(link.description.clone()),
				..GraphLink::new(&link.hero_id, &link.target_id, &link.artifact_id)
			});
		}

		let artifact_descriptions = artifacts
			.iter()
			.map(|a| {
				let groups = parse_effect_sizes(&a.effect_size);
				(
					a.artifact_id.clone(),
					resolve_effect(&a.effect_description, &groups, BASE_TIER),
				)
			})
			.collect();

		debug!(
			"artifact graph: {} nodes, {} edges",
			graph.nodes.len(),
			graph.links.len()
		);

		Self {
			graph,
			artifact_descriptions,
		}
	}

	/// The underlying hero/target graph.
	pub fn graph(&self) -> &RelationGraph {
		&self.graph
	}

	/// Artifact ids in order of first use.
	pub fn artifact_ids(&self) -> Vec<String> {
		let mut ids: Vec<String> = Vec::new();
		for link in &self.graph.links {
			if !ids.contains(&link.label) {
				ids.push(link.label.clone());
			}
		}
		ids
	}
}

/// Looks up the description shown when hovering a node or an edge.
pub trait DescriptionSource {
	/// Hover text for a node.
	fn node_description(&self, name: &str) -> Result<String, RenderError>;
	/// Hover text for an edge.
	fn edge_description(&self, link: &GraphLink) -> Result<String, RenderError>;
}

impl DescriptionSource for ArtifactGraph {
	fn node_description(&self, name: &str) -> Result<String, RenderError> {
		self.artifact_descriptions
			.get(name)
			.cloned()
			.ok_or_else(|| RenderError::MissingRow {
				table: "artifacts",
				key: name.to_string(),
			})
	}

	fn edge_description(&self, link: &GraphLink) -> Result<String, RenderError> {
		link.description
			.as_ref()
			.map(|d| format!("{} ({}): {}", link.label, link.source, d))
			.ok_or_else(|| RenderError::MissingRow {
				table: "heroes",
				key: format!("{} -> {} via {}", link.source, link.target, link.label),
			})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::{merge_heroes, parse_artifacts, parse_heroes};

	const HEROES: &str = "HeroId,ArtifactId,UnlockLevel,TargetId,TargetType,TargetUser,EquippedTiers\n\
		aria,flame,10,borin,hero,ally,2\n\
		aria,frost,20,orb,artifact,enemy,1\n";
	const ARTIFACTS: &str = "ArtifactId,EffectSize,EffectDescription\n\
		flame,{1|2|3},Deals {} damage\n\
		frost,{10|15},Slows by {}%\n\
		orb,{7|9},Burns for {} damage\n";

	fn sample() -> ArtifactGraph {
		let heroes = parse_heroes(HEROES).unwrap();
		let artifacts = parse_artifacts(ARTIFACTS).unwrap();
		ArtifactGraph::from_links(&merge_heroes(&heroes, &artifacts), &artifacts)
	}

	#[test]
	fn heroes_link_to_targets_through_artifacts() {
		let g = sample();
		let graph = g.graph();
		assert_eq!(graph.kind_of("aria"), Some(HERO_KIND));
		assert_eq!(graph.kind_of("orb"), Some(ARTIFACT_KIND));
		assert!(graph.has_link("aria", "borin", "flame"));
		assert_eq!(graph.links[0].allegiance.as_deref(), Some("ally"));
		assert_eq!(graph.links[1].weight, 20.0);
		assert_eq!(g.artifact_ids(), vec!["flame", "frost"]);
	}

	#[test]
	fn descriptions_resolve_by_key() {
		let g = sample();
		assert_eq!(g.node_description("orb").unwrap(), "Burns for 7 damage");
		let link = &g.graph().links[0];
		assert_eq!(g.edge_description(link).unwrap(), "flame (aria): Deals 2 damage");
	}

	#[test]
	fn repeated_rows_keep_their_own_tier() {
		let heroes = parse_heroes(
			"HeroId,ArtifactId,UnlockLevel,TargetId,TargetType,TargetUser,EquippedTiers\n\
			aria,flame,10,borin,hero,ally,1\n\
			aria,flame,20,borin,hero,ally,3\n",
		)
		.unwrap();
		let artifacts = parse_artifacts(ARTIFACTS).unwrap();
		let g = ArtifactGraph::from_links(&merge_heroes(&heroes, &artifacts), &artifacts);
		let hovers: Vec<String> = g
			.graph()
			.links
			.iter()
			.map(|l| g.edge_description(l).unwrap())
			.collect();
		assert_eq!(
			hovers,
			vec!["flame (aria): Deals 1 damage", "flame (aria): Deals 3 damage"]
		);
	}

	#[test]
	fn missing_description_is_an_error() {
		let g = sample();
		assert!(matches!(
			g.node_description("borin"),
			Err(RenderError::MissingRow { table: "artifacts", .. })
		));
		let stray = GraphLink::new("aria", "nobody", "flame");
		assert!(g.edge_description(&stray).is_err());
	}
}
