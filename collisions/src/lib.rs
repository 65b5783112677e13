pub mod elastic;
pub mod error;
pub mod particle;
pub mod simulation;
pub mod walls;

pub use error::{CollisionError, CollisionResult};
pub use particle::{Particle, ParticleId};
pub use simulation::{advance_tick, Simulation, TickReport};
