// Re-export core modules for use by the binary or other consumers
pub mod audio;
pub mod components;
pub mod core;
pub mod data;
pub mod systems;

// Expose the simulation wrapper and the types needed to drive it
pub use crate::core::world::{ActionIntent, ActorSummary, Simulation, Snapshot};
pub use crate::data::profiles::{load_profile_catalog, ActorProfile, ProfileCatalog};
