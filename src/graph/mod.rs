//! In-memory relationship graphs and the queries over them.

mod artifacts;
mod builder;
mod filter;

use std::collections::HashMap;

pub use artifacts::{ARTIFACT_KIND, ArtifactGraph, BASE_TIER, DescriptionSource, HERO_KIND};
pub use builder::{Entity, RelationSnapshot};
pub use filter::{RelationTypeIndex, Selection, induced_subgraph};

/// A typed node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GraphNode {
	/// Unique node name.
	pub name: String,
	/// Node type, used for coloring and shells.
	pub kind: String,
}

/// A directed, labelled edge.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphLink {
	/// Subject node name.
	pub source: String,
	/// Object node name.
	pub target: String,
	/// Relationship label or artifact id.
	pub label: String,
	/// `TargetUser` of artifact links; `None` for rule-derived edges.
	pub allegiance: Option<String>,
	/// Edge weight; the unlock level for artifact links.
	pub weight: f64,
	/// Resolved effect text of the row this edge came from.
	pub description: Option<String>,
}

impl GraphLink {
	/// Unweighted edge with no allegiance or description.
	pub fn new(source: impl Into<String>, target: impl Into<String>, label: impl Into<String>) -> Self {
		Self {
			source: source.into(),
			target: target.into(),
			label: label.into(),
			allegiance: None,
			weight: 1.0,
			description: None,
		}
	}

	/// Whether both ends are the same node.
	pub fn is_self_loop(&self) -> bool {
		self.source == self.target
	}
}

/// Directed multigraph. Nodes keep insertion order, names are unique.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RelationGraph {
	/// Nodes in insertion order.
	pub nodes: Vec<GraphNode>,
	/// Edges in insertion order.
	pub links: Vec<GraphLink>,
}

impl RelationGraph {
	/// Add a node unless one with the same name already exists.
	pub fn add_node(&mut self, name: impl Into<String>, kind: impl Into<String>) {
		let name = name.into();
		if !self.contains(&name) {
			self.nodes.push(GraphNode {
				name,
				kind: kind.into(),
			});
		}
	}

	/// Whether a node called `name` exists.
	pub fn contains(&self, name: &str) -> bool {
		self.nodes.iter().any(|n| n.name == name)
	}

	/// Node called `name`.
	pub fn node(&self, name: &str) -> Option<&GraphNode> {
		self.nodes.iter().find(|n| n.name == name)
	}

	/// Kind of the node called `name`.
	pub fn kind_of(&self, name: &str) -> Option<&str> {
		self.node(name).map(|n| n.kind.as_str())
	}

	/// Whether an edge `source -> target` with `label` exists.
	pub fn has_link(&self, source: &str, target: &str, label: &str) -> bool {
		self.links
			.iter()
			.any(|l| l.source == source && l.target == target && l.label == label)
	}

	/// Node name to position in `nodes`.
	pub fn index(&self) -> HashMap<&str, usize> {
		self.nodes
			.iter()
			.enumerate()
			.map(|(i, n)| (n.name.as_str(), i))
			.collect()
	}

	/// In + out degree per node; self loops count twice, as in networkx.
	pub fn degrees(&self) -> HashMap<&str, usize> {
		let mut degrees: HashMap<&str, usize> =
			self.nodes.iter().map(|n| (n.name.as_str(), 0)).collect();
		for link in &self.links {
			for end in [link.source.as_str(), link.target.as_str()] {
				if let Some(d) = degrees.get_mut(end) {
					*d += 1;
				}
			}
		}
		degrees
	}

	/// Node kinds in order of first appearance.
	pub fn kinds(&self) -> Vec<&str> {
		let mut kinds: Vec<&str> = Vec::new();
		for node in &self.nodes {
			if !kinds.contains(&node.kind.as_str()) {
				kinds.push(&node.kind);
			}
		}
		kinds
	}

	/// Node names grouped by kind, in order of first appearance.
	pub fn partitions_by_kind(&self) -> Vec<Vec<String>> {
		self.kinds()
			.into_iter()
			.map(|kind| {
				self.nodes
					.iter()
					.filter(|n| n.kind == kind)
					.map(|n| n.name.clone())
					.collect()
			})
			.collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn triangle() -> RelationGraph {
		let mut g = RelationGraph::default();
		g.add_node("a", "X");
		g.add_node("b", "Y");
		g.add_node("c", "X");
		g.links.push(GraphLink::new("a", "b", "r"));
		g.links.push(GraphLink::new("b", "c", "r"));
		g.links.push(GraphLink::new("c", "c", "self"));
		g
	}

	#[test]
	fn add_node_keeps_names_unique() {
		let mut g = triangle();
		g.add_node("a", "Z");
		assert_eq!(g.nodes.len(), 3);
		assert_eq!(g.kind_of("a"), Some("X"));
	}

	#[test]
	fn degrees_count_both_ends() {
		let g = triangle();
		let d = g.degrees();
		assert_eq!(d["a"], 1);
		assert_eq!(d["b"], 2);
		assert_eq!(d["c"], 3);
	}

	#[test]
	fn partitions_follow_first_appearance() {
		let g = triangle();
		assert_eq!(g.kinds(), vec!["X", "Y"]);
		assert_eq!(
			g.partitions_by_kind(),
			vec![vec!["a".to_string(), "c".to_string()], vec!["b".to_string()]]
		);
	}
}
