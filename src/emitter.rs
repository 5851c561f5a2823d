//! Photon source.
//!
//! The emitter adds a bounded batch of photons per emission tick. It never
//! pushes the population past the cap: each tick adds
//! `min(rate, max_photons - live)` photons.
//!
//! # Spawn distribution
//!
//! | Property | Distribution |
//! |----------|--------------|
//! | `position.x` | `U[-width/2, width/2]` |
//! | `position.y` | `U[-height/2, height/2]` |
//! | `position.z` | source plane |
//! | `velocity` | `(U[-jitter, jitter], U[-jitter, jitter], speed)` |
//! | `remaining_life` | `U[lifetime_min, lifetime_max]` ticks |

use glam::Vec3;
use rand::Rng;

use crate::config::SourceConfig;
use crate::photon::Photon;

/// Spawns photons at the source plane.
#[derive(Clone, Debug, PartialEq)]
pub struct Emitter {
    /// Forward coordinate of the source plane.
    pub z: f32,
    pub width: f32,
    pub height: f32,
    /// Forward speed of new photons.
    pub speed: f32,
    /// Lateral velocity jitter half-range.
    pub jitter: f32,
    /// Inclusive lifetime band in ticks.
    pub lifetime: (u32, u32),
    /// Photons per emission tick.
    pub rate: usize,
}

impl Emitter {
    pub fn new(source: &SourceConfig, rate: usize) -> Self {
        Self {
            z: source.z,
            width: source.width,
            height: source.height,
            speed: source.speed,
            jitter: source.jitter,
            lifetime: (source.lifetime_min, source.lifetime_max),
            rate,
        }
    }

    /// How many photons the next tick would add to a population of `live`.
    #[inline]
    pub fn batch_size(&self, live: usize, cap: usize) -> usize {
        self.rate.min(cap.saturating_sub(live))
    }

    /// Run one emission tick. Returns the number of photons added.
    pub fn emit<R: Rng + ?Sized>(
        &self,
        photons: &mut Vec<Photon>,
        cap: usize,
        color: Vec3,
        rng: &mut R,
    ) -> usize {
        let count = self.batch_size(photons.len(), cap);
        photons.reserve(count);
        for _ in 0..count {
            photons.push(self.spawn(color, rng));
        }
        count
    }

    /// Create a single photon at the source.
    pub fn spawn<R: Rng + ?Sized>(&self, color: Vec3, rng: &mut R) -> Photon {
        let position = Vec3::new(
            symmetric(rng, self.width / 2.0),
            symmetric(rng, self.height / 2.0),
            self.z,
        );
        let velocity = Vec3::new(
            symmetric(rng, self.jitter),
            symmetric(rng, self.jitter),
            self.speed,
        );
        let (min, max) = self.lifetime;
        let life = if min >= max { min } else { rng.gen_range(min..=max) };

        Photon::new(position, velocity, color, life)
    }
}

/// Uniform sample in `[-half, half]`; exactly 0 for a degenerate range.
fn symmetric<R: Rng + ?Sized>(rng: &mut R, half: f32) -> f32 {
    if half > 0.0 {
        rng.gen_range(-half..=half)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn emitter(rate: usize) -> Emitter {
        Emitter::new(&SourceConfig::default(), rate)
    }

    #[test]
    fn test_batch_respects_cap() {
        let e = emitter(10);
        assert_eq!(e.batch_size(0, 1000), 10);
        assert_eq!(e.batch_size(995, 1000), 5);
        assert_eq!(e.batch_size(1000, 1000), 0);
        assert_eq!(e.batch_size(1200, 1000), 0);
    }

    #[test]
    fn test_emit_adds_batch() {
        let mut rng = SmallRng::seed_from_u64(3);
        let mut photons = Vec::new();
        let e = emitter(10);

        assert_eq!(e.emit(&mut photons, 15, Vec3::ONE, &mut rng), 10);
        assert_eq!(e.emit(&mut photons, 15, Vec3::ONE, &mut rng), 5);
        assert_eq!(e.emit(&mut photons, 15, Vec3::ONE, &mut rng), 0);
        assert_eq!(photons.len(), 15);
    }

    #[test]
    fn test_spawn_within_source() {
        let mut rng = SmallRng::seed_from_u64(11);
        let source = SourceConfig::default();
        let e = Emitter::new(&source, 1);
        let color = Vec3::new(0.2, 0.4, 0.6);

        for _ in 0..200 {
            let p = e.spawn(color, &mut rng);
            assert!(p.position.x.abs() <= source.width / 2.0);
            assert!(p.position.y.abs() <= source.height / 2.0);
            assert_eq!(p.position.z, source.z);
            assert!(p.velocity.x.abs() <= source.jitter);
            assert!(p.velocity.y.abs() <= source.jitter);
            assert_eq!(p.velocity.z, source.speed);
            assert!((source.lifetime_min..=source.lifetime_max).contains(&p.remaining_life));
            assert_eq!(p.color, color);
            assert!(!p.crossed_barrier && !p.passed_slit);
        }
    }

    #[test]
    fn test_degenerate_source() {
        let mut rng = SmallRng::seed_from_u64(0);
        let source = SourceConfig {
            width: 0.0,
            height: 0.0,
            jitter: 0.0,
            lifetime_min: 40,
            lifetime_max: 40,
            ..SourceConfig::default()
        };
        let p = Emitter::new(&source, 1).spawn(Vec3::ONE, &mut rng);

        assert_eq!(p.position, Vec3::new(0.0, 0.0, source.z));
        assert_eq!(p.velocity, Vec3::new(0.0, 0.0, source.speed));
        assert_eq!(p.remaining_life, 40);
    }
}
