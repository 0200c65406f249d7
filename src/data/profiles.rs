use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::audio::{SoundBank, SoundId, SoundToggles};
use crate::components::actor::{ActorKind, DeathAction};

/// One editor-style parameter set an actor spawns from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorProfile {
    pub id: String,
    pub name: String,
    pub kind: ActorKind,
    pub on_death: DeathAction,
    pub max_health: f32,
    #[serde(default)]
    pub regeneration: OvertimeSpec,
    #[serde(default)]
    pub decay: OvertimeSpec,
    #[serde(default)]
    pub sounds: SoundToggles,
    #[serde(default)]
    pub sound_bank: SoundBank,
}

/// Amount-times-rate step applied by the per-frame evaluator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OvertimeSpec {
    pub enabled: bool,
    pub amount: f32,
    pub rate: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileCatalog {
    pub schema_version: u32,
    pub profiles: Vec<ActorProfile>,
}

#[derive(Debug)]
pub enum ProfileDataError {
    Io { path: String, source: std::io::Error },
    Json { path: String, source: serde_json::Error },
    Validation(String),
}

impl std::fmt::Display for ProfileDataError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProfileDataError::Io { path, source } => {
                write!(f, "failed to read {}: {}", path, source)
            }
            ProfileDataError::Json { path, source } => {
                write!(f, "failed to parse {}: {}", path, source)
            }
            ProfileDataError::Validation(message) => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for ProfileDataError {}

pub fn load_profile_catalog(path: impl AsRef<Path>) -> Result<ProfileCatalog, ProfileDataError> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).map_err(|source| ProfileDataError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let catalog: ProfileCatalog =
        serde_json::from_str(&raw).map_err(|source| ProfileDataError::Json {
            path: path.display().to_string(),
            source,
        })?;
    catalog.validate()?;
    Ok(catalog)
}

impl ProfileCatalog {
    pub fn validate(&self) -> Result<(), ProfileDataError> {
        let mut ids = HashSet::new();
        for profile in &self.profiles {
            if profile.id.trim().is_empty() {
                return Err(ProfileDataError::Validation(
                    "profile id cannot be empty".to_string(),
                ));
            }
            if !ids.insert(profile.id.clone()) {
                return Err(ProfileDataError::Validation(format!(
                    "duplicate profile id {}",
                    profile.id
                )));
            }
            if profile.max_health <= 0.0 {
                return Err(ProfileDataError::Validation(format!(
                    "profile {} needs max_health above zero",
                    profile.id
                )));
            }
            validate_overtime(&profile.id, "regeneration", &profile.regeneration)?;
            validate_overtime(&profile.id, "decay", &profile.decay)?;
        }
        Ok(())
    }

    /// Built-in roster used when no data file is available.
    pub fn demo() -> Self {
        let sound = |name: &str| Some(SoundId(name.to_string()));
        Self {
            schema_version: 1,
            profiles: vec![
                ActorProfile {
                    id: "player".to_string(),
                    name: "Player".to_string(),
                    kind: ActorKind::Player,
                    on_death: DeathAction::Respawn,
                    max_health: 100.0,
                    regeneration: OvertimeSpec {
                        enabled: false,
                        amount: 4.0,
                        rate: 0.5,
                    },
                    decay: OvertimeSpec::default(),
                    sounds: SoundToggles::default(),
                    sound_bank: SoundBank {
                        cure: sound("sfx/health_cure"),
                        hit: sound("sfx/health_hit"),
                        shield_hit: sound("sfx/shield_hit"),
                        death: sound("sfx/player_death"),
                        stamina_low: sound("sfx/stamina_low"),
                        ..SoundBank::default()
                    },
                },
                ActorProfile {
                    id: "street_thug".to_string(),
                    name: "Street Thug".to_string(),
                    kind: ActorKind::Enemy,
                    on_death: DeathAction::Respawn,
                    max_health: 40.0,
                    regeneration: OvertimeSpec::default(),
                    decay: OvertimeSpec::default(),
                    sounds: SoundToggles::default(),
                    sound_bank: SoundBank {
                        hit: sound("sfx/thug_hit"),
                        death: sound("sfx/thug_death"),
                        ..SoundBank::default()
                    },
                },
                ActorProfile {
                    id: "bystander".to_string(),
                    name: "Bystander".to_string(),
                    kind: ActorKind::Npc,
                    on_death: DeathAction::Pause,
                    max_health: 30.0,
                    regeneration: OvertimeSpec::default(),
                    decay: OvertimeSpec {
                        enabled: false,
                        amount: 1.0,
                        rate: 0.5,
                    },
                    sounds: SoundToggles::default(),
                    sound_bank: SoundBank::default(),
                },
            ],
        }
    }
}

fn validate_overtime(
    profile_id: &str,
    label: &str,
    spec: &OvertimeSpec,
) -> Result<(), ProfileDataError> {
    if !(0.0..=10.0).contains(&spec.amount) {
        return Err(ProfileDataError::Validation(format!(
            "profile {} has {} amount {} outside 0..=10",
            profile_id, label, spec.amount
        )));
    }
    if !(0.0..=1.0).contains(&spec.rate) {
        return Err(ProfileDataError::Validation(format!(
            "profile {} has {} rate {} outside 0..=1",
            profile_id, label, spec.rate
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_roster_validates() {
        assert!(ProfileCatalog::demo().validate().is_ok());
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let mut catalog = ProfileCatalog::demo();
        let copy = catalog.profiles[0].clone();
        catalog.profiles.push(copy);
        assert!(catalog.validate().is_err());
    }

    #[test]
    fn out_of_range_rate_is_rejected() {
        let mut catalog = ProfileCatalog::demo();
        catalog.profiles[0].regeneration.rate = 1.5;
        assert!(catalog.validate().is_err());
    }

    #[test]
    fn nonpositive_max_health_is_rejected() {
        let mut catalog = ProfileCatalog::demo();
        catalog.profiles[0].max_health = 0.0;
        assert!(catalog.validate().is_err());
    }

    #[test]
    fn minimal_json_parses_with_defaults() {
        let raw = r#"{
            "schema_version": 1,
            "profiles": [
                {
                    "id": "dummy",
                    "name": "Training Dummy",
                    "kind": "NPC",
                    "on_death": "MENU",
                    "max_health": 25.0
                }
            ]
        }"#;
        let catalog: ProfileCatalog = serde_json::from_str(raw).unwrap();
        assert!(catalog.validate().is_ok());
        let profile = &catalog.profiles[0];
        assert_eq!(profile.kind, ActorKind::Npc);
        assert_eq!(profile.on_death, DeathAction::Menu);
        assert!(!profile.regeneration.enabled);
        assert!(profile.sounds.play_hit_sound);
        assert!(profile.sound_bank.hit.is_none());
    }
}
