pub mod actor;
pub mod health;

pub use actor::{ActorId, ActorKind, ActorName, DeathAction};
pub use health::{Decay, Health, LifeState, Regeneration};
