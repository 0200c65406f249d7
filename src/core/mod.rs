pub mod ecs;
pub mod world;

pub use world::{ActionIntent, ActorSummary, Simulation, Snapshot};
