//src/model/mod.rs
pub mod cell;
pub mod particle;
pub mod solution;

// Re-exports for cleaner imports
pub use cell::Cell;
pub use particle::{Particle, ParticleKind};
pub use solution::Solution;
