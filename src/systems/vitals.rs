use bevy_ecs::prelude::*;

use crate::audio::{AudioChannels, CueQueue, SoundBank, SoundToggles};
use crate::components::actor::{ActorId, ActorKind, DeathAction};
use crate::components::health::{Decay, Health, LifeState, Regeneration};
use crate::core::world::{ActionIntent, ActionQueue};
use crate::systems::damage::{drain_health, restore_health};
use crate::systems::death::{trigger_death, DeathEventLog};

/// System: processes regeneration and decay toggle intents.
pub fn overtime_toggle_system(
    intents: Res<ActionQueue>,
    mut query: Query<(&ActorId, &mut Regeneration, &mut Decay)>,
) {
    for intent in intents.0.iter() {
        match intent {
            ActionIntent::SetRegeneration { actor_id, enabled } => {
                for (id, mut regen, _decay) in query.iter_mut() {
                    if id.0 == *actor_id {
                        regen.enabled = *enabled;
                    }
                }
            }
            ActionIntent::SetDecay { actor_id, enabled } => {
                for (id, _regen, mut decay) in query.iter_mut() {
                    if id.0 == *actor_id {
                        decay.enabled = *enabled;
                    }
                }
            }
            _ => {}
        }
    }
}

/// System: the per-frame evaluator. Depleted living actors go through the
/// death sequence; everyone else gets one single-shot regeneration step if
/// armed. An active decay then drains the pool independently.
pub fn vitals_tick_system(
    mut commands: Commands,
    mut deaths: ResMut<DeathEventLog>,
    mut cues: ResMut<CueQueue>,
    mut query: Query<(
        Entity,
        &ActorId,
        &ActorKind,
        &DeathAction,
        &mut Health,
        &mut LifeState,
        &mut Regeneration,
        &mut Decay,
        &SoundToggles,
        &SoundBank,
        &mut AudioChannels,
    )>,
) {
    for (
        entity,
        id,
        kind,
        action,
        mut health,
        mut life,
        mut regen,
        mut decay,
        toggles,
        bank,
        mut channels,
    ) in query.iter_mut()
    {
        if health.is_depleted() && life.alive {
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
                &mut deaths,
                &mut cues,
            );
        } else if regen.enabled {
            restore_health(
                id.0,
                regen.step(),
                &mut health,
                toggles,
                bank,
                &mut channels,
                &mut cues,
            );
            // one step per arming
            regen.enabled = false;
        }

        if decay.enabled {
            drain_health(
                id.0,
                decay.step(),
                &mut health,
                toggles,
                bank,
                &mut channels,
                &mut cues,
            );
        }
    }
}
