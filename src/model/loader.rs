use std::collections::HashMap;

use log::{info, warn};
use serde::de::DeserializeOwned;

use super::effect::{parse_effect_sizes, resolve_effect};
use super::error::LoadError;
use super::records::{ArtifactLink, ArtifactRow, HeroRow, Participant, RelationRule};

fn parse_table<T: DeserializeOwned>(table: &'static str, content: &str) -> Result<Vec<T>, LoadError> {
	let mut reader = csv::ReaderBuilder::new()
		.trim(csv::Trim::All)
		.from_reader(content.as_bytes());

	let rows = reader
		.deserialize()
		.collect::<Result<Vec<T>, _>>()
		.map_err(|e| LoadError::Csv {
			table,
			message: e.to_string(),
		})?;

	info!("Loaded {} {} rows", rows.len(), table);
	Ok(rows)
}

/// Parse the participants table (`Name`, `Type`).
pub fn parse_participants(content: &str) -> Result<Vec<Participant>, LoadError> {
	parse_table("participants", content)
}

/// Parse the relationships table (`SubjectType`, `Relationship`, `ObjectType`, `RelationType`).
pub fn parse_rules(content: &str) -> Result<Vec<RelationRule>, LoadError> {
	parse_table("relationships", content)
}

/// Parse the heroes table.
pub fn parse_heroes(content: &str) -> Result<Vec<HeroRow>, LoadError> {
	parse_table("heroes", content)
}

/// Parse the artifacts table.
pub fn parse_artifacts(content: &str) -> Result<Vec<ArtifactRow>, LoadError> {
	parse_table("artifacts", content)
}

/// Join hero rows with their artifact on `ArtifactId` and resolve each description.
pub fn merge_heroes(heroes: &[HeroRow], artifacts: &[ArtifactRow]) -> Vec<ArtifactLink> {
	let by_id: HashMap<&str, &ArtifactRow> = artifacts
		.iter()
		.map(|a| (a.artifact_id.as_str(), a))
		.collect();

	heroes
		.iter()
		.filter_map(|hero| {
			let Some(artifact) = by_id.get(hero.artifact_id.as_str()) else {
				warn!("hero {} references unknown artifact {}", hero.hero_id, hero.artifact_id);
				return None;
			};
			let groups = parse_effect_sizes(&artifact.effect_size);
			Some(ArtifactLink {
				hero_id: hero.hero_id.clone(),
				artifact_id: hero.artifact_id.clone(),
				unlock_level: hero.unlock_level,
				target_id: hero.target_id.clone(),
				target_type: hero.target_type.clone(),
				target_user: hero.target_user.clone(),
				equipped_tiers: hero.equipped_tiers,
				description: resolve_effect(&artifact.effect_description, &groups, hero.equipped_tiers),
			})
		})
		.collect()
}

/// Fetch a text resource relative to the page.
pub async fn fetch_text(url: &str) -> Result<String, LoadError> {
	use wasm_bindgen::JsCast;
	use wasm_bindgen_futures::JsFuture;
	use web_sys::{Request, RequestInit, RequestMode, Response};

	let fetch_err = |e: wasm_bindgen::JsValue| LoadError::Fetch {
		url: url.to_string(),
		message: format!("{:?}", e),
	};

	let opts = RequestInit::new();
	opts.set_method("GET");
	opts.set_mode(RequestMode::SameOrigin);

	let request = Request::new_with_str_and_init(url, &opts).map_err(fetch_err)?;
	let window = web_sys::window().ok_or_else(|| LoadError::Fetch {
		url: url.to_string(),
		message: "no window".into(),
	})?;
	let resp: Response = JsFuture::from(window.fetch_with_request(&request))
		.await
		.map_err(fetch_err)?
		.dyn_into()
		.map_err(fetch_err)?;

	if !resp.ok() {
		return Err(LoadError::Http {
			url: url.to_string(),
			status: resp.status(),
		});
	}

	let text = JsFuture::from(resp.text().map_err(fetch_err)?)
		.await
		.map_err(fetch_err)?;
	text.as_string().ok_or_else(|| LoadError::Fetch {
		url: url.to_string(),
		message: "response body is not text".into(),
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	const RULES: &str = "SubjectType,Relationship,ObjectType,RelationType\n\
		Human,owns,Pet,Ownership\n\
		Pet,eats,Food,\n";

	#[test]
	fn parses_rules_with_optional_relation_type() {
		let rules = parse_rules(RULES).unwrap();
		assert_eq!(rules.len(), 2);
		assert_eq!(rules[0].relation_type.as_deref(), Some("Ownership"));
		assert_eq!(rules[1].label, "eats");
		assert_eq!(rules[1].relation_type, None);
	}

	#[test]
	fn rules_without_relation_type_column() {
		let rules = parse_rules("SubjectType,Relationship,ObjectType\nHuman,owns,Pet\n").unwrap();
		assert_eq!(rules[0].relation_type, None);
	}

	#[test]
	fn participants_are_trimmed() {
		let rows = parse_participants("Name,Type\n Alice , Human\n").unwrap();
		assert_eq!(rows[0].name, "Alice");
		assert_eq!(rows[0].kind, "Human");
	}

	#[test]
	fn malformed_row_is_an_error() {
		let err = parse_heroes(
			"HeroId,ArtifactId,UnlockLevel,TargetId,TargetType,TargetUser,EquippedTiers\n\
			 aria,flame,ten,borin,hero,ally,2\n",
		)
		.unwrap_err();
		assert!(matches!(err, LoadError::Csv { table: "heroes", .. }));
	}

	#[test]
	fn merge_joins_on_artifact_id() {
		let heroes = parse_heroes(
			"HeroId,ArtifactId,UnlockLevel,TargetId,TargetType,TargetUser,EquippedTiers\n\
			 aria,flame,10,borin,hero,ally,2\n\
			 aria,missing,10,borin,hero,ally,2\n",
		)
		.unwrap();
		let artifacts = parse_artifacts(
			"ArtifactId,EffectSize,EffectDescription\nflame,{1|2|3},Deals {} damage\n",
		)
		.unwrap();

		let links = merge_heroes(&heroes, &artifacts);
		assert_eq!(links.len(), 1);
		assert_eq!(links[0].description, "Deals 2 damage");
		assert!(links[0].is_ally());
	}
}
