use serde::Deserialize;

/// One row of the participants table.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct Participant {
	/// Name.
	#[serde(rename = "Name")]
	pub name: String,
	/// Type.
	#[serde(rename = "Type")]
	pub kind: String,
}

/// A type-to-type rule from the relationships table.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct RelationRule {
	/// Subject type.
	#[serde(rename = "SubjectType")]
	pub subject_type: String,
	/// Relationship label.
	#[serde(rename = "Relationship")]
	pub label: String,
	/// Object type.
	#[serde(rename = "ObjectType")]
	pub object_type: String,
	/// Optional grouping used by the relation-type picker.
	#[serde(rename = "RelationType", default)]
	pub relation_type: Option<String>,
}

/// One row of the heroes table.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct HeroRow {
	/// Hero id.
	#[serde(rename = "HeroId")]
	pub hero_id: String,
	/// Artifact id.
	#[serde(rename = "ArtifactId")]
	pub artifact_id: String,
	/// Level at which the artifact unlocks.
	#[serde(rename = "UnlockLevel")]
	pub unlock_level: u32,
	/// Target id.
	#[serde(rename = "TargetId")]
	pub target_id: String,
	/// Target type.
	#[serde(rename = "TargetType")]
	pub target_type: String,
	/// `ally` or anything else.
	#[serde(rename = "TargetUser")]
	pub target_user: String,
	/// 1-based tier into the effect sizes.
	#[serde(rename = "EquippedTiers")]
	pub equipped_tiers: u32,
}

/// One row of the artifacts table, effect sizes still in their raw form.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct ArtifactRow {
	/// Artifact id.
	#[serde(rename = "ArtifactId")]
	pub artifact_id: String,
	/// Raw `{a|b|c}` groups.
	#[serde(rename = "EffectSize")]
	pub effect_size: String,
	/// Template with `{}` placeholders.
	#[serde(rename = "EffectDescription")]
	pub effect_description: String,
}

/// A hero row joined with its artifact, description already resolved.
#[derive(Clone, Debug, PartialEq)]
pub struct ArtifactLink {
	/// Hero id.
	pub hero_id: String,
	/// Artifact id.
	pub artifact_id: String,
	/// Level at which the artifact unlocks.
	pub unlock_level: u32,
	/// Target id.
	pub target_id: String,
	/// Target type.
	pub target_type: String,
	/// `ally` or anything else.
	pub target_user: String,
	/// 1-based equipped tier.
	pub equipped_tiers: u32,
	/// Effect description resolved for `equipped_tiers`.
	pub description: String,
}

impl ArtifactLink {
	/// Whether the target is on the hero's side.
	pub fn is_ally(&self) -> bool {
		self.target_user.eq_ignore_ascii_case("ally")
	}
}
