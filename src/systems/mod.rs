pub mod damage;
pub mod death;
pub mod vitals;

use bevy_ecs::prelude::*;

use crate::audio::{AudioChannels, CueQueue, SoundBank};
use crate::components::actor::ActorId;
use crate::core::world::{ActionIntent, ActionQueue};
use damage::DamageEventLog;
use death::DeathEventLog;

/// Resource collecting warnings for the caller's log sink.
#[derive(Resource, Default, Debug)]
pub struct WarningLog(pub Vec<String>);

/// System: clears the per-tick logs and the cue queue before the frame's work.
pub fn begin_tick_system(
    mut damage_log: ResMut<DamageEventLog>,
    mut death_log: ResMut<DeathEventLog>,
    mut warnings: ResMut<WarningLog>,
    mut cues: ResMut<CueQueue>,
) {
    damage_log.0.clear();
    death_log.0.clear();
    warnings.0.clear();
    cues.0.clear();
}

/// System: attaches host audio channels from bind intents and pre-loads the
/// resting sounds.
pub fn bind_audio_system(
    intents: Res<ActionQueue>,
    mut query: Query<(&ActorId, &SoundBank, &mut AudioChannels)>,
) {
    for intent in intents.0.iter() {
        if let ActionIntent::BindAudio {
            actor_id,
            health_channel,
            shield_channel,
            stamina_channel,
        } = intent
        {
            for (id, bank, mut channels) in query.iter_mut() {
                if id.0 == *actor_id {
                    channels.bind(*health_channel, *shield_channel, *stamina_channel, bank);
                }
            }
        }
    }
}
