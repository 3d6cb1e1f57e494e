use std::collections::BTreeMap;

use log::{debug, info};

use super::filter::RelationTypeIndex;
use super::{GraphLink, RelationGraph};
use crate::model::{Participant, RelationRule};

/// A named, typed participant and its expanded relations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entity {
	/// Participant name.
	pub name: String,
	/// Participant type.
	pub kind: String,
	/// Relationship label to targets, targets in insertion order without repeats.
	pub relations: BTreeMap<String, Vec<String>>,
}

impl Entity {
	/// An entity with no relations yet.
	pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			kind: kind.into(),
			relations: BTreeMap::new(),
		}
	}

	/// Record `label` towards `target`, ignoring repeats.
	pub fn add_relation(&mut self, label: &str, target: &str) {
		let targets = self.relations.entry(label.to_string()).or_default();
		if !targets.iter().any(|t| t == target) {
			targets.push(target.to_string());
		}
	}
}

/// Everything the relationship viewer needs, built once from the two tables.
#[derive(Clone, Debug, PartialEq)]
pub struct RelationSnapshot {
	entities: Vec<Entity>,
	labels: Vec<String>,
	relation_types: Vec<String>,
	type_index: RelationTypeIndex,
}

impl RelationSnapshot {
	/// Expand every rule against every pair of entities whose kinds match.
	pub fn build(participants: &[Participant], rules: &[RelationRule]) -> Self {
		let mut entities: Vec<Entity> = Vec::with_capacity(participants.len());
		for p in participants {
			// a repeated name keeps its first slot and takes the later kind
			match entities.iter_mut().find(|e| e.name == p.name) {
				Some(existing) => existing.kind = p.kind.clone(),
				None => entities.push(Entity::new(&p.name, &p.kind)),
			}
		}

		for rule in rules {
			let targets: Vec<String> = entities
				.iter()
				.filter(|e| e.kind == rule.object_type)
				.map(|e| e.name.clone())
				.collect();
			if targets.is_empty() {
				continue;
			}
			for subject in entities.iter_mut().filter(|e| e.kind == rule.subject_type) {
				for target in &targets {
					subject.add_relation(&rule.label, target);
				}
			}
		}

		let mut labels: Vec<String> = entities
			.iter()
			.flat_map(|e| e.relations.keys().cloned())
			.collect();
		labels.sort();
		labels.dedup();

		let mut relation_types: Vec<String> = Vec::new();
		for ty in rules.iter().filter_map(|r| r.relation_type.as_ref()) {
			if !relation_types.contains(ty) {
				relation_types.push(ty.clone());
			}
		}

		let type_index = RelationTypeIndex::new(rules, labels.clone());

		info!(
			"Built {} entities with {} relationship labels from {} rules",
			entities.len(),
			labels.len(),
			rules.len()
		);

		Self {
			entities,
			labels,
			relation_types,
			type_index,
		}
	}

	/// Entities in participants-table order.
	pub fn entities(&self) -> &[Entity] {
		&self.entities
	}

	/// Look up an entity by name.
	pub fn entity(&self, name: &str) -> Option<&Entity> {
		self.entities.iter().find(|e| e.name == name)
	}

	/// Entity names in table order.
	pub fn entity_names(&self) -> Vec<String> {
		self.entities.iter().map(|e| e.name.clone()).collect()
	}

	/// Every label that produced at least one edge, sorted.
	pub fn labels(&self) -> &[String] {
		&self.labels
	}

	/// Distinct `RelationType` values in table order.
	pub fn relation_types(&self) -> &[String] {
		&self.relation_types
	}

	/// Relation-type groups of the loaded rules.
	pub fn type_index(&self) -> &RelationTypeIndex {
		&self.type_index
	}

	/// The unfiltered graph.
	pub fn graph(&self) -> RelationGraph {
		let mut graph = RelationGraph::default();
		for entity in &self.entities {
			graph.add_node(&entity.name, &entity.kind);
		}
		for entity in &self.entities {
			for (label, targets) in &entity.relations {
				for target in targets {
					graph.links.push(GraphLink::new(&entity.name, target, label));
				}
			}
		}
		debug!(
			"relation graph: {} nodes, {} edges",
			graph.nodes.len(),
			graph.links.len()
		);
		graph
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn participant(name: &str, kind: &str) -> Participant {
		Participant {
			name: name.into(),
			kind: kind.into(),
		}
	}

	fn rule(subject: &str, label: &str, object: &str, group: Option<&str>) -> RelationRule {
		RelationRule {
			subject_type: subject.into(),
			label: label.into(),
			object_type: object.into(),
			relation_type: group.map(Into::into),
		}
	}

	#[test]
	fn owner_owns_pet() {
		let snapshot = RelationSnapshot::build(
			&[participant("Alice", "Human"), participant("Rex", "Pet")],
			&[rule("Human", "owns", "Pet", Some("Ownership"))],
		);
		let graph = snapshot.graph();
		assert_eq!(graph.links, vec![GraphLink::new("Alice", "Rex", "owns")]);
		assert_eq!(snapshot.labels(), ["owns".to_string()]);
	}

	#[test]
	fn expansion_fans_out_to_every_matching_entity() {
		let snapshot = RelationSnapshot::build(
			&[
				participant("Alice", "Human"),
				participant("Bob", "Human"),
				participant("Rex", "Pet"),
				participant("Tom", "Pet"),
			],
			&[rule("Human", "owns", "Pet", None)],
		);
		let graph = snapshot.graph();
		assert_eq!(graph.links.len(), 4);
		for (s, t) in [("Alice", "Rex"), ("Alice", "Tom"), ("Bob", "Rex"), ("Bob", "Tom")] {
			assert!(graph.has_link(s, t, "owns"));
		}
	}

	#[test]
	fn same_kind_rules_include_self_edges() {
		let snapshot = RelationSnapshot::build(
			&[participant("Alice", "Human"), participant("Bob", "Human")],
			&[rule("Human", "knows", "Human", None)],
		);
		let graph = snapshot.graph();
		assert!(graph.has_link("Alice", "Alice", "knows"));
		assert_eq!(graph.links.len(), 4);
	}

	#[test]
	fn duplicate_rules_do_not_duplicate_targets() {
		let snapshot = RelationSnapshot::build(
			&[participant("Alice", "Human"), participant("Rex", "Pet")],
			&[
				rule("Human", "owns", "Pet", None),
				rule("Human", "owns", "Pet", Some("Ownership")),
			],
		);
		assert_eq!(snapshot.entity("Alice").unwrap().relations["owns"], vec!["Rex".to_string()]);
		assert_eq!(snapshot.graph().links.len(), 1);
	}

	#[test]
	fn unmatched_types_produce_nothing() {
		let snapshot = RelationSnapshot::build(
			&[participant("Alice", "Human")],
			&[rule("Human", "drives", "Vehicle", Some("Ownership"))],
		);
		assert!(snapshot.graph().links.is_empty());
		assert!(snapshot.labels().is_empty());
		assert_eq!(snapshot.relation_types(), ["Ownership".to_string()]);
	}

	#[test]
	fn repeated_participant_keeps_position_and_takes_later_kind() {
		let snapshot = RelationSnapshot::build(
			&[
				participant("Rex", "Animal"),
				participant("Alice", "Human"),
				participant("Rex", "Pet"),
			],
			&[],
		);
		assert_eq!(snapshot.entity_names(), vec!["Rex", "Alice"]);
		assert_eq!(snapshot.entity("Rex").unwrap().kind, "Pet");
	}
}
