//! # slitsim - double-slit photon simulation
//!
//! A small CPU particle engine that fires photons through a two-slit barrier
//! onto a detection screen, in either of two regimes:
//!
//! - **Interference**: photons that pass a slit get a sinusoidal lateral kick
//!   from a random phase, spreading into a fringed pattern.
//! - **Observation**: a which-path detector is watching; photons get
//!   independent uniform kicks and the pattern collapses to two bands.
//!
//! The engine owns no window and no GPU. A host calls
//! [`Simulation::frame`] once per rendered frame and uploads
//! [`Simulation::snapshot`] to whatever renderer it uses.
//!
//! ## Quick Start
//!
//! ```ignore
//! use slitsim::prelude::*;
//! use std::time::Duration;
//!
//! let mut sim = Simulation::new(ExperimentConfig::default());
//! sim.start();
//!
//! for _ in 0..600 {
//!     sim.frame(Duration::from_millis(16));
//! }
//!
//! sim.set_observing(true);
//! sim.reset();
//! ```
//!
//! ## Core Concepts
//!
//! | Type | Role |
//! |------|------|
//! | [`Photon`] | Per-particle state |
//! | [`SlitGeometry`] | Pass/block test at the barrier |
//! | [`PhysicsMode`] | Velocity kick for photons that pass |
//! | [`Emitter`] | Bounded-rate photon source |
//! | [`Simulation`] | Owns the population and runs each tick |
//! | [`DetectionScreen`] | Landing histogram |
//!
//! ## Changing parameters
//!
//! Every setter on [`Simulation`] takes effect on the next tick. Colour
//! changes apply to newly emitted photons only, and a mode switch applies to
//! photons that cross the barrier afterwards. For slit geometry prefer
//! [`Simulation::apply_slits`], which also resets so no photon carries a
//! verdict made under the old slits.

pub mod color;
pub mod config;
mod emitter;
mod error;
mod photon;
mod physics;
mod screen;
mod simulation;
mod slit;
pub mod time;

pub use bytemuck;
pub use config::ExperimentConfig;
pub use emitter::Emitter;
pub use error::ConfigError;
pub use glam::Vec3;
pub use photon::{Photon, PhotonState, PhotonVertex};
pub use physics::PhysicsMode;
pub use screen::DetectionScreen;
pub use simulation::{Simulation, Stats, StepReport};
pub use slit::{Aperture, Slit, SlitGeometry};

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use slitsim::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::ExperimentConfig;
    pub use crate::photon::{Photon, PhotonVertex};
    pub use crate::physics::PhysicsMode;
    pub use crate::simulation::{Simulation, Stats, StepReport};
    pub use crate::slit::{Slit, SlitGeometry};
    pub use crate::time::EmissionTimer;
    pub use crate::Vec3;
}
