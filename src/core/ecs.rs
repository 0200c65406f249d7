use bevy_ecs::prelude::*;
use bevy_ecs::schedule::SystemSet;

use crate::audio::CueQueue;
use crate::core::world::{advance_clock_system, ActionQueue, FrameClock, IdAllocator};
use crate::systems::damage::{damage_system, DamageEventLog};
use crate::systems::death::{kill_system, DeathEventLog};
use crate::systems::vitals::{overtime_toggle_system, vitals_tick_system};
use crate::systems::{begin_tick_system, bind_audio_system, WarningLog};

/// Canonical tick ordering for the simulation.
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub enum TickSet {
    Intake,
    Commands,
    Evaluate,
    Time,
}

/// Build the ECS world with baseline resources.
pub fn create_world() -> World {
    let mut world = World::new();
    world.insert_resource(FrameClock::default());
    world.insert_resource(ActionQueue::default());
    world.insert_resource(IdAllocator::default());
    world.insert_resource(DamageEventLog::default());
    world.insert_resource(DeathEventLog::default());
    world.insert_resource(WarningLog::default());
    world.insert_resource(CueQueue::default());
    world
}

/// Build the system schedule in the canonical order. Command processing runs
/// in a fixed sequence so binds land before the damage they gate.
pub fn create_schedule() -> Schedule {
    let mut schedule = Schedule::default();

    schedule.configure_sets(
        (
            TickSet::Intake,
            TickSet::Commands,
            TickSet::Evaluate,
            TickSet::Time,
        )
            .chain(),
    );

    schedule.add_systems((
        begin_tick_system.in_set(TickSet::Intake),
        (
            bind_audio_system,
            overtime_toggle_system,
            damage_system,
            kill_system,
        )
            .chain()
            .in_set(TickSet::Commands),
        vitals_tick_system.in_set(TickSet::Evaluate),
        advance_clock_system.in_set(TickSet::Time),
    ));

    schedule
}
