use std::collections::BTreeSet;

use log::debug;

use super::RelationGraph;
use crate::model::RelationRule;

/// Current state of the entity and relationship pickers.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
	/// Entity names to keep.
	pub entities: BTreeSet<String>,
	/// Relationship labels to keep.
	pub relationships: BTreeSet<String>,
}

impl Selection {
	/// Selection from any two collections of names.
	pub fn new<E, R>(entities: E, relationships: R) -> Self
	where
		E: IntoIterator,
		E::Item: Into<String>,
		R: IntoIterator,
		R::Item: Into<String>,
	{
		Self {
			entities: entities.into_iter().map(Into::into).collect(),
			relationships: relationships.into_iter().map(Into::into).collect(),
		}
	}

	/// Every node and every label of `graph`.
	pub fn all(graph: &RelationGraph) -> Self {
		Self::new(
			graph.nodes.iter().map(|n| n.name.clone()),
			graph.links.iter().map(|l| l.label.clone()),
		)
	}
}

/// Restrict `graph` to the selected nodes and to edges whose label is selected
/// and whose endpoints both survive.
pub fn induced_subgraph(graph: &RelationGraph, selection: &Selection) -> RelationGraph {
	let nodes = graph
		.nodes
		.iter()
		.filter(|n| selection.entities.contains(&n.name))
		.cloned()
		.collect();

	let links = graph
		.links
		.iter()
		.filter(|l| {
			selection.relationships.contains(&l.label)
				&& selection.entities.contains(&l.source)
				&& selection.entities.contains(&l.target)
		})
		.cloned()
		.collect();

	let sub = RelationGraph { nodes, links };
	debug!(
		"filtered to {} of {} nodes, {} of {} edges",
		sub.nodes.len(),
		graph.nodes.len(),
		sub.links.len(),
		graph.links.len()
	);
	sub
}

/// Lookup from `RelationType` groupings to relationship labels.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RelationTypeIndex {
	all_labels: Vec<String>,
	rows: Vec<(Option<String>, String)>,
}

impl RelationTypeIndex {
	/// Index `rules` by relation type; `all_labels` is offered when no type is picked.
	pub fn new(rules: &[RelationRule], all_labels: Vec<String>) -> Self {
		Self {
			all_labels,
			rows: rules
				.iter()
				.map(|r| (r.relation_type.clone(), r.label.clone()))
				.collect(),
		}
	}

	/// Labels offered for the chosen groupings; no grouping offers every label.
	pub fn labels_for(&self, groups: &BTreeSet<String>) -> Vec<String> {
		if groups.is_empty() {
			return self.all_labels.clone();
		}
		let mut labels: Vec<String> = Vec::new();
		for (group, label) in &self.rows {
			let matches = group.as_ref().is_some_and(|g| groups.contains(g));
			if matches && !labels.contains(label) {
				labels.push(label.clone());
			}
		}
		labels
	}
}
