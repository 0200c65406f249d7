use bevy_ecs::prelude::*;

use crate::audio::{AudioChannels, AudioSlot, CueQueue, SoundBank, SoundToggles};
use crate::components::actor::{ActorId, ActorKind, DeathAction};
use crate::components::health::LifeState;
use crate::core::world::{ActionIntent, ActionQueue};

/// Notification payload raised when an actor's death sequence runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeathTriggered {
    pub actor_id: u32,
    pub action: DeathAction,
}

/// Resource capturing the tick's death notifications.
#[derive(Resource, Default, Debug)]
pub struct DeathEventLog(pub Vec<DeathTriggered>);

/// System: processes kill intents by running the death sequence directly.
pub fn kill_system(
    mut commands: Commands,
    intents: Res<ActionQueue>,
    mut log: ResMut<DeathEventLog>,
    mut cues: ResMut<CueQueue>,
    mut query: Query<(
        Entity,
        &ActorId,
        &ActorKind,
        &DeathAction,
        &mut LifeState,
        &SoundToggles,
        &SoundBank,
        &mut AudioChannels,
    )>,
) {
    for intent in intents.0.iter() {
        if let ActionIntent::Kill { actor_id } = intent {
            for (entity, id, kind, action, mut life, toggles, bank, mut channels) in
                query.iter_mut()
            {
                if id.0 == *actor_id {
                    trigger_death(
                        &mut commands,
                        entity,
                        id.0,
                        *kind,
                        *action,
                        &mut life,
                        toggles,
                        bank,
                        &mut channels,
                        &mut log,
                        &mut cues,
                    );
                }
            }
        }
    }
}

/// The death sequence: notify, cue the death sound, then either mark a player
/// dead or hand the actor to the object-lifecycle collaborator for removal.
///
/// Players keep their entity so the consumer can still drive respawn logic;
/// enemies and NPCs are removed from the world.
pub fn trigger_death(
    commands: &mut Commands,
    entity: Entity,
    actor_id: u32,
    kind: ActorKind,
    action: DeathAction,
    life: &mut LifeState,
    toggles: &SoundToggles,
    bank: &SoundBank,
    channels: &mut AudioChannels,
    log: &mut DeathEventLog,
    cues: &mut CueQueue,
) {
    log.0.push(DeathTriggered { actor_id, action });

    if toggles.play_death_sound {
        channels.cue(AudioSlot::Health, bank.death.as_ref(), actor_id, cues);
    }

    match kind {
        ActorKind::Player => life.alive = false,
        ActorKind::Enemy | ActorKind::Npc => {
            commands.entity(entity).despawn();
        }
    }
}
