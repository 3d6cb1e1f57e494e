use std::collections::{BTreeSet, HashSet};

use proptest::prelude::*;
use relationship_viewer::config::TypePalette;
use relationship_viewer::graph::{RelationSnapshot, Selection, induced_subgraph};
use relationship_viewer::layout::{LayoutAlgorithm, compute_layout};
use relationship_viewer::model::{Participant, RelationRule};
use relationship_viewer::present::RasterScene;

const KINDS: &[&str] = &["Human", "Pet", "Food", "Toy"];
const LABELS: &[&str] = &["owns", "eats", "likes", "knows"];
const GROUPS: &[&str] = &["Ownership", "Consumption", "Social"];

fn participants() -> impl Strategy<Value = Vec<Participant>> {
	proptest::collection::vec(proptest::sample::select(KINDS), 0..8).prop_map(|kinds| {
		kinds
			.into_iter()
			.enumerate()
			.map(|(i, kind)| Participant {
				name: format!("e{i}"),
				kind: kind.to_string(),
			})
			.collect()
	})
}

fn rules() -> impl Strategy<Value = Vec<RelationRule>> {
	let rule = (
		proptest::sample::select(KINDS),
		proptest::sample::select(LABELS),
		proptest::sample::select(KINDS),
		proptest::option::of(proptest::sample::select(GROUPS)),
	)
		.prop_map(|(s, l, o, g)| RelationRule {
			subject_type: s.to_string(),
			label: l.to_string(),
			object_type: o.to_string(),
			relation_type: g.map(str::to_string),
		});
	proptest::collection::vec(rule, 0..6)
}

fn subset(names: Vec<String>) -> impl Strategy<Value = BTreeSet<String>> {
	let n = names.len();
	proptest::collection::vec(any::<bool>(), n).prop_map(move |keep| {
		names
			.iter()
			.zip(keep)
			.filter(|(_, k)| *k)
			.map(|(name, _)| name.clone())
			.collect()
	})
}

fn scenario() -> impl Strategy<Value = (RelationSnapshot, Selection)> {
	(participants(), rules()).prop_flat_map(|(p, r)| {
		let snapshot = RelationSnapshot::build(&p, &r);
		let names = snapshot.entity_names();
		let labels: Vec<String> = LABELS.iter().map(|l| l.to_string()).collect();
		(Just(snapshot), subset(names), subset(labels)).prop_map(|(snapshot, entities, relationships)| {
			(
				snapshot,
				Selection {
					entities,
					relationships,
				},
			)
		})
	})
}

proptest! {
	#[test]
	fn edge_exists_iff_a_rule_matches_both_kinds(p in participants(), r in rules()) {
		let graph = RelationSnapshot::build(&p, &r).graph();
		for source in &p {
			for target in &p {
				for label in LABELS {
					let expected = r.iter().any(|rule| {
						rule.label == *label
							&& rule.subject_type == source.kind
							&& rule.object_type == target.kind
					});
					prop_assert_eq!(graph.has_link(&source.name, &target.name, label), expected);
				}
			}
		}
		let unique: HashSet<_> = graph.links.iter().map(|l| (&l.source, &l.target, &l.label)).collect();
		prop_assert_eq!(unique.len(), graph.links.len());
	}

	#[test]
	fn filtering_is_idempotent_and_never_adds((snapshot, selection) in scenario()) {
		let graph = snapshot.graph();
		let once = induced_subgraph(&graph, &selection);
		prop_assert_eq!(&induced_subgraph(&once, &selection), &once);

		for node in &once.nodes {
			prop_assert!(graph.nodes.contains(node));
			prop_assert!(selection.entities.contains(&node.name));
		}
		for link in &once.links {
			prop_assert!(graph.links.contains(link));
			prop_assert!(selection.relationships.contains(&link.label));
			prop_assert!(once.contains(&link.source) && once.contains(&link.target));
		}
	}

	#[test]
	fn self_loops_are_never_rendered((snapshot, selection) in scenario()) {
		let graph = induced_subgraph(&snapshot.graph(), &selection);
		let positions = compute_layout(&graph, LayoutAlgorithm::Circular, None, 1);
		let scene = RasterScene::compose(&graph, &positions, &TypePalette::default(), 800.0, 600.0);

		let pairs: HashSet<(&str, &str)> = graph
			.links
			.iter()
			.filter(|l| l.source != l.target)
			.map(|l| (l.source.as_str(), l.target.as_str()))
			.collect();
		prop_assert_eq!(scene.edges.len(), pairs.len());
		prop_assert!(scene.edges.iter().all(|e| !e.label.is_empty()));
	}

	#[test]
	fn grouping_selection_picks_matching_labels(
		r in rules(),
		groups in proptest::collection::btree_set(proptest::sample::select(GROUPS).prop_map(str::to_string), 0..3),
	) {
		let p: Vec<Participant> = KINDS
			.iter()
			.map(|k| Participant { name: format!("one {k}"), kind: k.to_string() })
			.collect();
		let snapshot = RelationSnapshot::build(&p, &r);
		let offered: BTreeSet<String> = snapshot.type_index().labels_for(&groups).into_iter().collect();

		let expected: BTreeSet<String> = if groups.is_empty() {
			snapshot.labels().iter().cloned().collect()
		} else {
			r.iter()
				.filter(|rule| rule.relation_type.as_ref().is_some_and(|g| groups.contains(g)))
				.map(|rule| rule.label.clone())
				.collect()
		};
		prop_assert_eq!(offered, expected);
	}
}
