//! The two physical regimes applied at the barrier.
//!
//! A photon that makes it through a slit gets one velocity kick, chosen by
//! whether a which-path detector is watching:
//!
//! | Mode | Kick on (x, y) | Screen pattern |
//! |------|----------------|----------------|
//! | [`PhysicsMode::Interference`] | `amplitude * (sin φ, cos φ)`, `φ ~ U[0, 2π)` | fringed spread |
//! | [`PhysicsMode::Observation`] | two independent `U[-spread, spread]` | two plain bands |
//!
//! The interference kick is a qualitative stand-in for superposition, not a
//! Fraunhofer intensity profile. The forward (Z) component is never touched.

use std::f32::consts::TAU;

use glam::Vec3;
use rand::Rng;

use crate::config::PhysicsConfig;

/// Velocity perturbation applied once to each photon that passes a slit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PhysicsMode {
    /// Wave-like: one random phase drives a sinusoidal lateral kick.
    Interference {
        /// Kick magnitude.
        amplitude: f32,
    },
    /// Particle-like: independent uniform lateral kicks.
    Observation {
        /// Half-range of each uniform kick.
        spread: f32,
    },
}

impl PhysicsMode {
    /// Resolve the observing toggle into a concrete mode.
    pub fn select(observing: bool, physics: &PhysicsConfig) -> Self {
        if observing {
            PhysicsMode::Observation {
                spread: physics.observation_spread,
            }
        } else {
            PhysicsMode::Interference {
                amplitude: physics.interference_amplitude,
            }
        }
    }

    /// Short name for logs and UI labels.
    pub fn name(&self) -> &'static str {
        match self {
            PhysicsMode::Interference { .. } => "interference",
            PhysicsMode::Observation { .. } => "observation",
        }
    }

    /// Return `velocity` with this mode's lateral kick added.
    pub fn perturb<R: Rng + ?Sized>(&self, velocity: Vec3, rng: &mut R) -> Vec3 {
        match *self {
            PhysicsMode::Interference { amplitude } => {
                let phase = rng.gen_range(0.0..TAU);
                velocity + Vec3::new(phase.sin() * amplitude, phase.cos() * amplitude, 0.0)
            }
            PhysicsMode::Observation { spread } => {
                if spread <= 0.0 {
                    return velocity;
                }
                let dx = rng.gen_range(-spread..=spread);
                let dy = rng.gen_range(-spread..=spread);
                velocity + Vec3::new(dx, dy, 0.0)
            }
        }
    }
}
