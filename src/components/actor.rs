use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};

/// Stable identifier for addressing actors externally.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActorId(pub u32);

/// Display name carried over from the actor's profile.
#[derive(Component, Debug, Clone)]
pub struct ActorName(pub String);

/// Which death handling an actor participates in.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActorKind {
    Player,
    Enemy,
    Npc,
}

/// Follow-up requested from the consumer when the actor dies. Inert data:
/// forwarded with the death notification, never interpreted here.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeathAction {
    Respawn,
    Restart,
    Pause,
    Menu,
}
