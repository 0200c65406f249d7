use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};

/// Logical playback slot on the host audio subsystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioSlot {
    Health,
    Shield,
    Stamina,
}

/// Opaque sound asset handle, resolved by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SoundId(pub String);

/// Host-owned playback channel handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelId(pub u32);

/// Per-actor configured sounds. Unset entries cue silence.
#[derive(Component, Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SoundBank {
    pub cure: Option<SoundId>,
    pub hit: Option<SoundId>,
    pub shield_hit: Option<SoundId>,
    pub health_low: Option<SoundId>,
    pub shield_low: Option<SoundId>,
    pub death: Option<SoundId>,
    pub shield_break: Option<SoundId>,
    pub stamina_low: Option<SoundId>,
}

/// Per-actor cue gates, all on by default. The low/break toggles are carried
/// configuration that no cue selection reads yet.
#[derive(Component, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SoundToggles {
    pub play_cure_sound: bool,
    pub play_hit_sound: bool,
    pub play_shield_hit_sound: bool,
    pub play_health_low_sound: bool,
    pub play_shield_low_sound: bool,
    pub play_death_sound: bool,
    pub play_shield_break_sound: bool,
    pub play_stamina_low_sound: bool,
}

impl Default for SoundToggles {
    fn default() -> Self {
        Self {
            play_cure_sound: true,
            play_hit_sound: true,
            play_shield_hit_sound: true,
            play_health_low_sound: true,
            play_shield_low_sound: true,
            play_death_sound: true,
            play_shield_break_sound: true,
            play_stamina_low_sound: true,
        }
    }
}

/// A channel bound to one slot, remembering the sound it was last cued with.
#[derive(Debug, Clone)]
pub struct AudioChannel {
    pub id: ChannelId,
    pub sound: Option<SoundId>,
}

/// The actor's bound playback channels. Unbound until the host attaches them.
#[derive(Component, Debug, Clone, Default)]
pub struct AudioChannels {
    pub health: Option<AudioChannel>,
    pub shield: Option<AudioChannel>,
    pub stamina: Option<AudioChannel>,
}

impl AudioChannels {
    /// Attach all three channels and pre-load each slot's resting sound.
    pub fn bind(
        &mut self,
        health: ChannelId,
        shield: ChannelId,
        stamina: ChannelId,
        bank: &SoundBank,
    ) {
        self.health = Some(AudioChannel {
            id: health,
            sound: bank.hit.clone(),
        });
        self.shield = Some(AudioChannel {
            id: shield,
            sound: bank.shield_hit.clone(),
        });
        self.stamina = Some(AudioChannel {
            id: stamina,
            sound: bank.stamina_low.clone(),
        });
    }

    pub fn is_bound(&self, slot: AudioSlot) -> bool {
        self.channel(slot).is_some()
    }

    fn channel(&self, slot: AudioSlot) -> Option<&AudioChannel> {
        match slot {
            AudioSlot::Health => self.health.as_ref(),
            AudioSlot::Shield => self.shield.as_ref(),
            AudioSlot::Stamina => self.stamina.as_ref(),
        }
    }

    fn channel_mut(&mut self, slot: AudioSlot) -> Option<&mut AudioChannel> {
        match slot {
            AudioSlot::Health => self.health.as_mut(),
            AudioSlot::Shield => self.shield.as_mut(),
            AudioSlot::Stamina => self.stamina.as_mut(),
        }
    }

    /// Select a cue on a slot: set the channel's current sound, then request
    /// playback. An unbound slot is a no-op; an unset sound cues silence.
    pub fn cue(
        &mut self,
        slot: AudioSlot,
        sound: Option<&SoundId>,
        actor_id: u32,
        queue: &mut CueQueue,
    ) {
        let channel = match self.channel_mut(slot) {
            Some(channel) => channel,
            None => return,
        };
        channel.sound = sound.cloned();
        if let Some(sound) = &channel.sound {
            queue.0.push(CueRequest {
                actor_id,
                channel: channel.id,
                sound: sound.clone(),
            });
        }
    }
}

/// One fire-and-forget playback request for the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CueRequest {
    pub actor_id: u32,
    pub channel: ChannelId,
    pub sound: SoundId,
}

/// Resource collecting the tick's playback requests, drained via the snapshot.
#[derive(Resource, Default, Debug)]
pub struct CueQueue(pub Vec<CueRequest>);

#[cfg(test)]
mod tests {
    use super::*;

    fn bank() -> SoundBank {
        SoundBank {
            hit: Some(SoundId("sfx/hit".to_string())),
            cure: Some(SoundId("sfx/cure".to_string())),
            shield_hit: Some(SoundId("sfx/shield".to_string())),
            stamina_low: Some(SoundId("sfx/stamina".to_string())),
            ..SoundBank::default()
        }
    }

    #[test]
    fn cue_on_unbound_slot_is_dropped() {
        let mut channels = AudioChannels::default();
        let mut queue = CueQueue::default();
        channels.cue(AudioSlot::Health, bank().hit.as_ref(), 7, &mut queue);
        assert!(queue.0.is_empty());
    }

    #[test]
    fn binding_preloads_resting_sounds() {
        let mut channels = AudioChannels::default();
        channels.bind(ChannelId(1), ChannelId(2), ChannelId(3), &bank());
        assert_eq!(
            channels.health.as_ref().unwrap().sound,
            Some(SoundId("sfx/hit".to_string()))
        );
        assert_eq!(
            channels.stamina.as_ref().unwrap().sound,
            Some(SoundId("sfx/stamina".to_string()))
        );
    }

    #[test]
    fn cue_requests_carry_the_bound_channel() {
        let mut channels = AudioChannels::default();
        let mut queue = CueQueue::default();
        channels.bind(ChannelId(1), ChannelId(2), ChannelId(3), &bank());
        channels.cue(AudioSlot::Health, bank().cure.as_ref(), 7, &mut queue);
        assert_eq!(
            queue.0,
            vec![CueRequest {
                actor_id: 7,
                channel: ChannelId(1),
                sound: SoundId("sfx/cure".to_string()),
            }]
        );
    }

    #[test]
    fn unset_sound_cues_silence() {
        let mut channels = AudioChannels::default();
        let mut queue = CueQueue::default();
        channels.bind(ChannelId(1), ChannelId(2), ChannelId(3), &bank());
        channels.cue(AudioSlot::Health, None, 7, &mut queue);
        assert!(queue.0.is_empty());
        assert!(channels.health.as_ref().unwrap().sound.is_none());
    }
}
