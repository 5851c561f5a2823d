//! Photon state and the render snapshot record.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use crate::slit::Slit;

/// A single simulated photon.
///
/// Photons are created by the [`Emitter`](crate::Emitter), advanced by
/// [`Simulation::step`](crate::Simulation::step), and removed either when
/// the barrier absorbs them or when `remaining_life` runs out.
#[derive(Clone, Debug, PartialEq)]
pub struct Photon {
    /// World-space position.
    pub position: Vec3,
    /// Per-tick displacement.
    pub velocity: Vec3,
    /// RGB colour fixed at emission.
    pub color: Vec3,
    /// Ticks left before the photon expires.
    pub remaining_life: u32,
    /// Set once, on the tick the photon reaches the barrier plane.
    pub crossed_barrier: bool,
    /// Set together with `crossed_barrier` when an aperture admitted it.
    pub passed_slit: bool,
    /// Set once, on the tick the photon reaches the detection plane.
    pub landed: bool,
    /// Aperture the photon went through, if any.
    pub slit: Option<Slit>,
}

/// Coarse lifecycle stage of a live photon.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PhotonState {
    /// Between the source and the barrier.
    InFlight,
    /// Through a slit, still travelling.
    PassedSlit,
    /// Resting on the detection plane.
    Landed,
}

impl Photon {
    /// Create a fresh photon that has not reached the barrier.
    pub fn new(position: Vec3, velocity: Vec3, color: Vec3, remaining_life: u32) -> Self {
        Self {
            position,
            velocity,
            color,
            remaining_life,
            crossed_barrier: false,
            passed_slit: false,
            landed: false,
            slit: None,
        }
    }

    #[inline]
    pub fn state(&self) -> PhotonState {
        if self.landed {
            PhotonState::Landed
        } else if self.passed_slit {
            PhotonState::PassedSlit
        } else {
            PhotonState::InFlight
        }
    }

    /// Render record for this photon.
    #[inline]
    pub fn vertex(&self) -> PhotonVertex {
        PhotonVertex {
            position: self.position.to_array(),
            color: self.color.to_array(),
        }
    }
}

/// Per-photon data handed to the render adapter.
///
/// Laid out for direct upload into a vertex buffer:
/// `bytemuck::cast_slice(&sim.snapshot())`.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct PhotonVertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_photon_flags() {
        let p = Photon::new(Vec3::ZERO, Vec3::Z, Vec3::ONE, 10);
        assert!(!p.crossed_barrier);
        assert!(!p.passed_slit);
        assert!(!p.landed);
        assert_eq!(p.slit, None);
        assert_eq!(p.state(), PhotonState::InFlight);
    }

    #[test]
    fn test_state_progression() {
        let mut p = Photon::new(Vec3::ZERO, Vec3::Z, Vec3::ONE, 10);
        p.crossed_barrier = true;
        p.passed_slit = true;
        assert_eq!(p.state(), PhotonState::PassedSlit);
        p.landed = true;
        assert_eq!(p.state(), PhotonState::Landed);
    }

    #[test]
    fn test_vertex_layout() {
        assert_eq!(std::mem::size_of::<PhotonVertex>(), 24);

        let p = Photon::new(Vec3::new(1.0, 2.0, 3.0), Vec3::Z, Vec3::new(0.5, 0.25, 0.0), 1);
        let v = p.vertex();
        let floats: &[f32] = bytemuck::cast_slice(std::slice::from_ref(&v));
        assert_eq!(floats, &[1.0, 2.0, 3.0, 0.5, 0.25, 0.0]);
    }
}
