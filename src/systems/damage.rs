use bevy_ecs::prelude::*;
use bevy_utils::tracing::warn;

use crate::audio::{AudioChannels, AudioSlot, CueQueue, SoundBank, SoundToggles};
use crate::components::actor::ActorId;
use crate::components::health::{Health, LifeState};
use crate::core::world::{ActionIntent, ActionQueue};
use crate::systems::WarningLog;

/// Notification payload raised after a damage command lands.
#[derive(Debug, Clone, PartialEq)]
pub struct DamageApplied {
    pub actor_id: u32,
    pub remaining: f32,
}

/// Resource capturing the tick's damage notifications.
#[derive(Resource, Default, Debug)]
pub struct DamageEventLog(pub Vec<DamageApplied>);

/// System: processes damage and heal intents.
pub fn damage_system(
    intents: Res<ActionQueue>,
    mut log: ResMut<DamageEventLog>,
    mut warnings: ResMut<WarningLog>,
    mut cues: ResMut<CueQueue>,
    mut query: Query<(
        &ActorId,
        &mut Health,
        &LifeState,
        &SoundToggles,
        &SoundBank,
        &mut AudioChannels,
    )>,
) {
    for intent in intents.0.iter() {
        match intent {
            ActionIntent::Damage { actor_id, amount } => {
                for (id, mut health, life, toggles, bank, mut channels) in query.iter_mut() {
                    if id.0 == *actor_id {
                        deal_damage(
                            id.0,
                            *amount,
                            &mut health,
                            life,
                            toggles,
                            bank,
                            &mut channels,
                            &mut log,
                            &mut warnings,
                            &mut cues,
                        );
                    }
                }
            }
            ActionIntent::Heal { actor_id, amount } => {
                for (id, mut health, _life, toggles, bank, mut channels) in query.iter_mut() {
                    if id.0 == *actor_id {
                        restore_health(
                            id.0,
                            *amount,
                            &mut health,
                            toggles,
                            bank,
                            &mut channels,
                            &mut cues,
                        );
                    }
                }
            }
            _ => {}
        }
    }
}

/// The guarded damage path: dead actors ignore it, and a missing health
/// channel aborts the whole call before any state changes.
pub fn deal_damage(
    actor_id: u32,
    amount: f32,
    health: &mut Health,
    life: &LifeState,
    toggles: &SoundToggles,
    bank: &SoundBank,
    channels: &mut AudioChannels,
    log: &mut DamageEventLog,
    warnings: &mut WarningLog,
    cues: &mut CueQueue,
) {
    if !life.alive {
        return;
    }
    if !channels.is_bound(AudioSlot::Health) {
        warn!(actor_id, "damage dropped: no health audio channel bound");
        warnings.0.push(format!(
            "actor {}: damage dropped, no health audio channel bound",
            actor_id
        ));
        return;
    }

    if toggles.play_hit_sound {
        channels.cue(AudioSlot::Health, bank.hit.as_ref(), actor_id, cues);
    }

    let remaining = health.damage(amount);
    log.0.push(DamageApplied {
        actor_id,
        remaining,
    });
}

/// The add-side modify path, shared by heal commands and regeneration.
pub fn restore_health(
    actor_id: u32,
    amount: f32,
    health: &mut Health,
    toggles: &SoundToggles,
    bank: &SoundBank,
    channels: &mut AudioChannels,
    cues: &mut CueQueue,
) {
    if toggles.play_cure_sound {
        channels.cue(AudioSlot::Health, bank.cure.as_ref(), actor_id, cues);
    }
    health.heal(amount);
}

/// The subtract-side modify path, shared by the decay drain. Unlike the
/// damage command it carries no liveness or channel guard and raises no
/// notification.
pub fn drain_health(
    actor_id: u32,
    amount: f32,
    health: &mut Health,
    toggles: &SoundToggles,
    bank: &SoundBank,
    channels: &mut AudioChannels,
    cues: &mut CueQueue,
) {
    if toggles.play_hit_sound {
        channels.cue(AudioSlot::Health, bank.hit.as_ref(), actor_id, cues);
    }
    health.damage(amount);
}
