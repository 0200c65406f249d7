use bevy_ecs::prelude::*;

/// Health pool for a single actor.
///
/// A freshly constructed pool is empty; activation fills it. `max` does not
/// change afterwards.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Health {
    pub current: f32,
    pub max: f32,
}

impl Health {
    pub fn new(max: f32) -> Self {
        Self { current: 0.0, max }
    }

    /// Called once when the actor enters the world.
    pub fn activate(&mut self) {
        self.current = self.max;
    }

    /// Clamped subtract. Returns the remaining health.
    pub fn damage(&mut self, amount: f32) -> f32 {
        self.current = (self.current - amount).max(0.0);
        self.current
    }

    /// Clamped add. Returns the new health.
    pub fn heal(&mut self, amount: f32) -> f32 {
        self.current = (self.current + amount).min(self.max);
        self.current
    }

    pub fn is_depleted(&self) -> bool {
        self.current <= 0.0
    }
}

/// Alive flag. Cleared at most once; nothing sets it back.
#[derive(Component, Debug, Clone, Copy)]
pub struct LifeState {
    pub alive: bool,
}

/// Single-shot passive recovery. The evaluator applies one step of
/// `amount * rate`, then clears `enabled`; it must be re-armed externally.
#[derive(Component, Debug, Clone)]
pub struct Regeneration {
    pub enabled: bool,
    pub amount: f32,
    pub rate: f32,
}

impl Regeneration {
    pub fn step(&self) -> f32 {
        self.amount * self.rate
    }
}

/// Continuous per-tick drain. Stays on until toggled off.
#[derive(Component, Debug, Clone)]
pub struct Decay {
    pub enabled: bool,
    pub amount: f32,
    pub rate: f32,
}

impl Decay {
    pub fn step(&self) -> f32 {
        self.amount * self.rate
    }
}
