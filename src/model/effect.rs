//! Effect text resolution for artifacts.
//!
//! An artifact stores its effect sizes as one or more per-tier groups, e.g.
//! `{1|2|3}` or `{10|15|20},{5|8|12}`, and a description template with `{}`
//! placeholders. The equipped tier count (1-based) picks one value out of every
//! group. When the number of picked values matches the number of placeholders
//! they are substituted in order; otherwise every placeholder gets the first
//! picked value.

use log::warn;

const PLACEHOLDER: &str = "{}";

/// Per-tier effect values, one inner list per group.
pub type EffectGroups = Vec<Vec<String>>;

/// Split a raw `EffectSize` cell into its per-tier groups.
pub fn parse_effect_sizes(raw: &str) -> EffectGroups {
	let mut groups = Vec::new();
	let mut rest = raw.trim();

	while let Some(start) = rest.find('{') {
		let Some(len) = rest[start..].find('}') else {
			break;
		};
		let body = &rest[start + 1..start + len];
		groups.push(body.split('|').map(|v| v.trim().to_string()).collect());
		rest = &rest[start + len + 1..];
	}

	// bare values without braces, e.g. `5` or `1|2|3`
	if groups.is_empty() && !raw.trim().is_empty() {
		groups.push(raw.split('|').map(|v| v.trim().to_string()).collect());
	}
	groups
}

/// Pick the value of every group for the given tier.
fn values_for_tier(groups: &[Vec<String>], equipped_tiers: u32) -> Vec<&str> {
	groups
		.iter()
		.filter(|group| !group.is_empty())
		.map(|group| {
			let idx = (equipped_tiers.max(1) as usize - 1).min(group.len() - 1);
			group[idx].as_str()
		})
		.collect()
}

/// Fill the description template for an artifact at `equipped_tiers`.
pub fn resolve_effect(template: &str, groups: &[Vec<String>], equipped_tiers: u32) -> String {
	let slots = template.matches(PLACEHOLDER).count();
	if slots == 0 {
		return template.to_string();
	}

	let values = values_for_tier(groups, equipped_tiers);
	let first = values.first().copied().unwrap_or_default();
	let positional = values.len() == slots;
	if !positional {
		warn!(
			"effect text {template:?} has {slots} placeholder(s) but {} value(s); using the first value",
			values.len()
		);
	}

	let mut out = String::with_capacity(template.len());
	let mut pieces = template.split(PLACEHOLDER);
	if let Some(head) = pieces.next() {
		out.push_str(head);
	}
	for (i, piece) in pieces.enumerate() {
		out.push_str(if positional { values[i] } else { first });
		out.push_str(piece);
	}
	out
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_single_and_multiple_groups() {
		assert_eq!(parse_effect_sizes("{1|2|3}"), vec![vec!["1", "2", "3"]]);
		assert_eq!(
			parse_effect_sizes("{10|15|20},{5|8|12}"),
			vec![vec!["10", "15", "20"], vec!["5", "8", "12"]]
		);
		assert_eq!(parse_effect_sizes("7"), vec![vec!["7"]]);
		assert!(parse_effect_sizes("").is_empty());
	}

	#[test]
	fn tier_selects_value() {
		let groups = parse_effect_sizes("{1|2|3}");
		assert_eq!(resolve_effect("Deals {} damage", &groups, 2), "Deals 2 damage");
		assert_eq!(resolve_effect("Deals {} damage", &groups, 1), "Deals 1 damage");
	}

	#[test]
	fn tier_is_clamped() {
		let groups = parse_effect_sizes("{1|2|3}");
		assert_eq!(resolve_effect("Deals {} damage", &groups, 9), "Deals 3 damage");
		assert_eq!(resolve_effect("Deals {} damage", &groups, 0), "Deals 1 damage");
	}

	#[test]
	fn matching_counts_substitute_in_order() {
		let groups = parse_effect_sizes("{10|15|20},{5|8|12}");
		assert_eq!(
			resolve_effect("Slows by {}% for {} seconds", &groups, 3),
			"Slows by 20% for 12 seconds"
		);
	}

	#[test]
	fn mismatched_counts_repeat_first_value() {
		let groups = parse_effect_sizes("{4|6|8}");
		assert_eq!(
			resolve_effect("Grants {} armor to {} allies", &groups, 2),
			"Grants 6 armor to 6 allies"
		);
	}

	#[test]
	fn template_without_placeholders_is_untouched() {
		let groups = parse_effect_sizes("{1|2}");
		assert_eq!(resolve_effect("Passive aura", &groups, 2), "Passive aura");
	}

	#[test]
	fn no_values_leaves_placeholders_empty() {
		assert_eq!(resolve_effect("Deals {} damage", &[], 1), "Deals  damage");
	}
}
