use bevy_ecs::prelude::*;

use crate::audio::{AudioChannels, ChannelId, CueQueue, CueRequest};
use crate::components::actor::{ActorId, ActorKind, ActorName, DeathAction};
use crate::components::health::{Decay, Health, LifeState, Regeneration};
use crate::core::ecs::{create_schedule, create_world};
use crate::data::profiles::ActorProfile;
use crate::systems::damage::{DamageApplied, DamageEventLog};
use crate::systems::death::{DeathTriggered, DeathEventLog};
use crate::systems::WarningLog;

/// Commands fed into the simulation each tick.
#[derive(Debug, Clone)]
pub enum ActionIntent {
    Damage {
        actor_id: u32,
        amount: f32,
    },
    Heal {
        actor_id: u32,
        amount: f32,
    },
    SetRegeneration {
        actor_id: u32,
        enabled: bool,
    },
    SetDecay {
        actor_id: u32,
        enabled: bool,
    },
    BindAudio {
        actor_id: u32,
        health_channel: ChannelId,
        shield_channel: ChannelId,
        stamina_channel: ChannelId,
    },
    Kill {
        actor_id: u32,
    },
    Wait,
}

/// Resource storing the intents for the next tick.
#[derive(Resource, Default, Debug)]
pub struct ActionQueue(pub Vec<ActionIntent>);

/// Resource tracking the frames handed in by the external scheduler.
#[derive(Resource, Debug, Default, Clone)]
pub struct FrameClock {
    pub tick: u64,
    pub elapsed: f32,
    pub last_delta: f32,
}

/// System: advances the clock with the caller's delta.
pub fn advance_clock_system(mut clock: ResMut<FrameClock>) {
    clock.tick += 1;
    clock.elapsed += clock.last_delta;
}

/// Hands out stable actor ids.
#[derive(Resource, Debug)]
pub struct IdAllocator {
    next: u32,
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl IdAllocator {
    pub fn alloc(&mut self) -> u32 {
        let id = self.next;
        self.next += 1;
        id
    }
}

/// Data snapshot returned to the caller after each tick.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub tick: u64,
    pub actors: Vec<ActorSummary>,
    pub damage_events: Vec<DamageApplied>,
    pub death_events: Vec<DeathTriggered>,
    pub cue_requests: Vec<CueRequest>,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct ActorSummary {
    pub id: u32,
    pub name: String,
    pub kind: ActorKind,
    pub health: (f32, f32),
    pub alive: bool,
    pub regenerating: bool,
}

/// Wrapper around the ECS world and schedule.
pub struct Simulation {
    world: World,
    schedule: Schedule,
}

impl Simulation {
    pub fn new() -> Self {
        Self {
            world: create_world(),
            schedule: create_schedule(),
        }
    }

    /// Spawn and activate an actor from its profile. Activation fills the
    /// health pool and marks the actor alive. Returns the actor id.
    pub fn spawn_actor(&mut self, profile: &ActorProfile) -> u32 {
        let uid = {
            let mut alloc = self.world.resource_mut::<IdAllocator>();
            alloc.alloc()
        };

        let mut health = Health::new(profile.max_health);
        health.activate();

        self.world.spawn((
            ActorId(uid),
            ActorName(profile.name.clone()),
            profile.kind,
            profile.on_death,
            health,
            LifeState { alive: true },
            Regeneration {
                enabled: profile.regeneration.enabled,
                amount: profile.regeneration.amount,
                rate: profile.regeneration.rate,
            },
            Decay {
                enabled: profile.decay.enabled,
                amount: profile.decay.amount,
                rate: profile.decay.rate,
            },
            profile.sounds.clone(),
            profile.sound_bank.clone(),
            AudioChannels::default(),
        ));

        uid
    }

    /// Run one simulation frame with the provided intents and return a
    /// snapshot of the resulting state.
    pub fn tick(&mut self, delta: f32, intents: Vec<ActionIntent>) -> Snapshot {
        {
            let mut queue = self.world.resource_mut::<ActionQueue>();
            queue.0 = intents;
        }
        {
            let mut clock = self.world.resource_mut::<FrameClock>();
            clock.last_delta = delta;
        }

        self.schedule.run(&mut self.world);
        Snapshot::capture(&self.world)
    }

    /// Read the current state without advancing the simulation.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.world)
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new()
    }
}

impl Snapshot {
    fn capture(world: &World) -> Self {
        let tick = world.resource::<FrameClock>().tick;

        let actors = world
            .iter_entities()
            .filter_map(|e| {
                let id = e.get::<ActorId>()?.0;
                let name = e.get::<ActorName>().map(|n| n.0.clone()).unwrap_or_default();
                let kind = *e.get::<ActorKind>()?;
                let health = e
                    .get::<Health>()
                    .map(|hp| (hp.current, hp.max))
                    .unwrap_or((0.0, 0.0));
                let alive = e.get::<LifeState>().map(|l| l.alive).unwrap_or(false);
                let regenerating = e.get::<Regeneration>().map(|r| r.enabled).unwrap_or(false);
                Some(ActorSummary {
                    id,
                    name,
                    kind,
                    health,
                    alive,
                    regenerating,
                })
            })
            .collect();

        let damage_events = world
            .get_resource::<DamageEventLog>()
            .map(|log| log.0.clone())
            .unwrap_or_default();
        let death_events = world
            .get_resource::<DeathEventLog>()
            .map(|log| log.0.clone())
            .unwrap_or_default();
        let cue_requests = world
            .get_resource::<CueQueue>()
            .map(|queue| queue.0.clone())
            .unwrap_or_default();
        let warnings = world
            .get_resource::<WarningLog>()
            .map(|log| log.0.clone())
            .unwrap_or_default();

        Snapshot {
            tick,
            actors,
            damage_events,
            death_events,
            cue_requests,
            warnings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{SoundBank, SoundId, SoundToggles};
    use crate::data::profiles::OvertimeSpec;

    const DT: f32 = 1.0 / 60.0;

    fn profile(kind: ActorKind, max_health: f32) -> ActorProfile {
        ActorProfile {
            id: "test".to_string(),
            name: "Test Actor".to_string(),
            kind,
            on_death: DeathAction::Respawn,
            max_health,
            regeneration: OvertimeSpec {
                enabled: false,
                amount: 4.0,
                rate: 0.5,
            },
            decay: OvertimeSpec {
                enabled: false,
                amount: 1.0,
                rate: 1.0,
            },
            sounds: SoundToggles::default(),
            sound_bank: SoundBank {
                cure: Some(SoundId("sfx/cure".to_string())),
                hit: Some(SoundId("sfx/hit".to_string())),
                death: Some(SoundId("sfx/death".to_string())),
                ..SoundBank::default()
            },
        }
    }

    fn bind(sim: &mut Simulation, actor_id: u32) -> Snapshot {
        sim.tick(
            DT,
            vec![ActionIntent::BindAudio {
                actor_id,
                health_channel: ChannelId(1),
                shield_channel: ChannelId(2),
                stamina_channel: ChannelId(3),
            }],
        )
    }

    fn find(snapshot: &Snapshot, id: u32) -> Option<ActorSummary> {
        snapshot.actors.iter().find(|a| a.id == id).cloned()
    }

    #[test]
    fn spawn_activates_at_full_health() {
        let mut sim = Simulation::new();
        let id = sim.spawn_actor(&profile(ActorKind::Player, 100.0));
        let actor = find(&sim.snapshot(), id).unwrap();
        assert_eq!(actor.health, (100.0, 100.0));
        assert!(actor.alive);
    }

    #[test]
    fn damage_lands_and_notifies() {
        let mut sim = Simulation::new();
        let id = sim.spawn_actor(&profile(ActorKind::Player, 100.0));
        bind(&mut sim, id);

        let snap = sim.tick(
            DT,
            vec![ActionIntent::Damage {
                actor_id: id,
                amount: 30.0,
            }],
        );

        assert_eq!(find(&snap, id).unwrap().health.0, 70.0);
        assert_eq!(
            snap.damage_events,
            vec![DamageApplied {
                actor_id: id,
                remaining: 70.0,
            }]
        );
        assert!(snap
            .cue_requests
            .iter()
            .any(|cue| cue.sound == SoundId("sfx/hit".to_string())));
        assert!(snap.warnings.is_empty());
    }

    #[test]
    fn unbound_audio_drops_the_whole_damage_call() {
        let mut sim = Simulation::new();
        let id = sim.spawn_actor(&profile(ActorKind::Player, 100.0));

        let snap = sim.tick(
            DT,
            vec![ActionIntent::Damage {
                actor_id: id,
                amount: 30.0,
            }],
        );

        assert_eq!(find(&snap, id).unwrap().health.0, 100.0);
        assert!(snap.damage_events.is_empty());
        assert_eq!(snap.warnings.len(), 1);
    }

    #[test]
    fn damage_is_a_noop_once_dead() {
        let mut sim = Simulation::new();
        let id = sim.spawn_actor(&profile(ActorKind::Player, 100.0));
        bind(&mut sim, id);
        sim.tick(DT, vec![ActionIntent::Kill { actor_id: id }]);

        let snap = sim.tick(
            DT,
            vec![ActionIntent::Damage {
                actor_id: id,
                amount: 30.0,
            }],
        );

        let actor = find(&snap, id).unwrap();
        assert!(!actor.alive);
        assert_eq!(actor.health.0, 100.0);
        assert!(snap.damage_events.is_empty());
        assert!(snap.warnings.is_empty());
    }

    #[test]
    fn overkill_clamps_and_triggers_death_on_the_next_evaluation() {
        let mut sim = Simulation::new();
        let id = sim.spawn_actor(&profile(ActorKind::Player, 10.0));
        bind(&mut sim, id);

        let snap = sim.tick(
            DT,
            vec![ActionIntent::Damage {
                actor_id: id,
                amount: 50.0,
            }],
        );

        assert_eq!(snap.damage_events[0].remaining, 0.0);
        assert_eq!(snap.death_events.len(), 1);
        assert_eq!(snap.death_events[0].action, DeathAction::Respawn);

        // the player entity survives its own death
        let actor = find(&snap, id).unwrap();
        assert!(!actor.alive);
        assert_eq!(actor.health.0, 0.0);
    }

    #[test]
    fn enemy_death_requests_removal() {
        let mut sim = Simulation::new();
        let id = sim.spawn_actor(&profile(ActorKind::Enemy, 10.0));
        bind(&mut sim, id);

        let snap = sim.tick(
            DT,
            vec![ActionIntent::Damage {
                actor_id: id,
                amount: 50.0,
            }],
        );

        assert_eq!(snap.death_events.len(), 1);
        assert!(find(&snap, id).is_none());
    }

    #[test]
    fn heal_clamps_at_max_and_stays_silent() {
        let mut sim = Simulation::new();
        let id = sim.spawn_actor(&profile(ActorKind::Player, 100.0));
        bind(&mut sim, id);
        sim.tick(
            DT,
            vec![ActionIntent::Damage {
                actor_id: id,
                amount: 30.0,
            }],
        );

        let snap = sim.tick(
            DT,
            vec![ActionIntent::Heal {
                actor_id: id,
                amount: 50.0,
            }],
        );

        assert_eq!(find(&snap, id).unwrap().health.0, 100.0);
        assert!(snap.damage_events.is_empty());
        assert!(snap
            .cue_requests
            .iter()
            .any(|cue| cue.sound == SoundId("sfx/cure".to_string())));
    }

    #[test]
    fn regeneration_applies_one_step_then_disarms() {
        let mut sim = Simulation::new();
        let id = sim.spawn_actor(&profile(ActorKind::Player, 100.0));
        bind(&mut sim, id);
        sim.tick(
            DT,
            vec![ActionIntent::Damage {
                actor_id: id,
                amount: 30.0,
            }],
        );

        let snap = sim.tick(
            DT,
            vec![ActionIntent::SetRegeneration {
                actor_id: id,
                enabled: true,
            }],
        );
        let actor = find(&snap, id).unwrap();
        assert_eq!(actor.health.0, 72.0); // 70 + 4.0 * 0.5
        assert!(!actor.regenerating);

        let snap = sim.tick(DT, vec![]);
        assert_eq!(find(&snap, id).unwrap().health.0, 72.0);
    }

    #[test]
    fn decay_drains_until_death_without_damage_notifications() {
        let mut sim = Simulation::new();
        let id = sim.spawn_actor(&profile(ActorKind::Enemy, 2.0));
        bind(&mut sim, id);

        let snap = sim.tick(
            DT,
            vec![ActionIntent::SetDecay {
                actor_id: id,
                enabled: true,
            }],
        );
        assert_eq!(find(&snap, id).unwrap().health.0, 1.0);
        assert!(snap.damage_events.is_empty());

        let snap = sim.tick(DT, vec![]);
        assert_eq!(find(&snap, id).unwrap().health.0, 0.0);

        let snap = sim.tick(DT, vec![]);
        assert_eq!(snap.death_events.len(), 1);
        assert!(find(&snap, id).is_none());
    }

    #[test]
    fn death_is_monotonic() {
        let mut sim = Simulation::new();
        let id = sim.spawn_actor(&profile(ActorKind::Player, 100.0));
        bind(&mut sim, id);
        sim.tick(DT, vec![ActionIntent::Kill { actor_id: id }]);

        let snap = sim.tick(
            DT,
            vec![
                ActionIntent::Heal {
                    actor_id: id,
                    amount: 50.0,
                },
                ActionIntent::SetRegeneration {
                    actor_id: id,
                    enabled: true,
                },
            ],
        );
        assert!(!find(&snap, id).unwrap().alive);

        let snap = sim.tick(DT, vec![]);
        assert!(!find(&snap, id).unwrap().alive);
    }

    #[test]
    fn hit_cue_respects_the_toggle() {
        let mut sim = Simulation::new();
        let mut quiet = profile(ActorKind::Player, 100.0);
        quiet.sounds.play_hit_sound = false;
        let id = sim.spawn_actor(&quiet);
        bind(&mut sim, id);

        let snap = sim.tick(
            DT,
            vec![ActionIntent::Damage {
                actor_id: id,
                amount: 30.0,
            }],
        );

        assert_eq!(find(&snap, id).unwrap().health.0, 70.0);
        assert_eq!(snap.damage_events.len(), 1);
        assert!(snap.cue_requests.is_empty());
    }

    #[test]
    fn intents_for_unknown_actors_are_skipped() {
        let mut sim = Simulation::new();
        let id = sim.spawn_actor(&profile(ActorKind::Player, 100.0));
        bind(&mut sim, id);

        let snap = sim.tick(
            DT,
            vec![
                ActionIntent::Damage {
                    actor_id: 999,
                    amount: 30.0,
                },
                ActionIntent::Wait,
            ],
        );

        assert_eq!(find(&snap, id).unwrap().health.0, 100.0);
        assert!(snap.damage_events.is_empty());
        assert!(snap.warnings.is_empty());
    }

    #[test]
    fn clock_advances_per_tick() {
        let mut sim = Simulation::new();
        sim.tick(DT, vec![]);
        let snap = sim.tick(DT, vec![]);
        assert_eq!(snap.tick, 2);
    }
}
