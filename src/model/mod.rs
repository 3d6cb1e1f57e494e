//! Source tables: typed rows, loading and the artifact join.

mod effect;
mod error;
mod loader;
mod records;

pub use effect::{EffectGroups, parse_effect_sizes, resolve_effect};
pub use error::{LoadError, RenderError};
pub use loader::{fetch_text, merge_heroes, parse_artifacts, parse_heroes, parse_participants, parse_rules};
pub use records::{ArtifactLink, ArtifactRow, HeroRow, Participant, RelationRule};
