//! Simulation context and per-tick orchestration.
//!
//! [`Simulation`] owns everything that changes: the photon population, the
//! experiment parameters, the emission timer, the detection screen and the
//! RNG. A host drives it with one [`Simulation::frame`] call per rendered
//! frame and reads [`Simulation::snapshot`] afterwards.
//!
//! # Per-photon tick
//!
//! 1. `position += velocity`
//! 2. First tick at or past the barrier plane: run the slit test once.
//!    Blocked photons are removed immediately. Survivors get the active
//!    [`PhysicsMode`] kick.
//! 3. At or past the detection plane: clamp onto the plane and stop. The
//!    first arrival records a screen hit. Landing does not remove.
//! 4. `remaining_life -= 1`; zero removes.
//!
//! Photons never interact, so processing order does not matter.

use std::time::Duration;

use glam::Vec3;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::color::photon_color;
use crate::config::ExperimentConfig;
use crate::emitter::Emitter;
use crate::photon::{Photon, PhotonVertex};
use crate::physics::PhysicsMode;
use crate::screen::DetectionScreen;
use crate::slit::{Slit, SlitGeometry};
use crate::time::EmissionTimer;

/// What happened during a single [`Simulation::step`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepReport {
    /// Photons emitted by [`Simulation::frame`] before the step.
    pub emitted: usize,
    /// Photons absorbed by the barrier.
    pub blocked: usize,
    /// Photons that went through a slit.
    pub passed: usize,
    /// Photons that reached the detection plane.
    pub landed: usize,
    /// Photons whose lifetime ran out.
    pub expired: usize,
}

/// Running totals since the last reset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Stats {
    pub emitted: u64,
    pub blocked: u64,
    pub passed: u64,
    pub landed: u64,
    pub expired: u64,
    /// Photons through the left aperture.
    pub left: u64,
    /// Photons through the right aperture.
    pub right: u64,
}

impl Stats {
    fn absorb(&mut self, report: &StepReport) {
        self.blocked += report.blocked as u64;
        self.passed += report.passed as u64;
        self.landed += report.landed as u64;
        self.expired += report.expired as u64;
    }
}

/// A running double-slit experiment.
///
/// # Example
///
/// ```ignore
/// let mut sim = Simulation::new(ExperimentConfig::default());
/// sim.start();
/// loop {
///     sim.frame(Duration::from_millis(16));
///     renderer.upload(bytemuck::cast_slice(&sim.snapshot()));
/// }
/// ```
#[derive(Clone)]
pub struct Simulation {
    config: ExperimentConfig,
    photons: Vec<Photon>,
    slits: SlitGeometry,
    emitter: Emitter,
    timer: EmissionTimer,
    screen: DetectionScreen,
    stats: Stats,
    rng: SmallRng,
}

impl Simulation {
    /// Create a stopped simulation seeded from OS entropy.
    ///
    /// `config` must already pass [`ExperimentConfig::validate`].
    pub fn new(config: ExperimentConfig) -> Self {
        Self::with_rng(config, SmallRng::from_entropy())
    }

    /// Create a stopped simulation with a reproducible RNG.
    pub fn with_seed(config: ExperimentConfig, seed: u64) -> Self {
        Self::with_rng(config, SmallRng::seed_from_u64(seed))
    }

    fn with_rng(config: ExperimentConfig, rng: SmallRng) -> Self {
        debug_assert!(config.validate().is_ok(), "invalid experiment config");
        let slits = SlitGeometry::from(&config.barrier);
        let emitter = Emitter::new(&config.source, config.emission.rate);
        let timer = EmissionTimer::new(Duration::from_millis(config.emission.period_ms));
        let screen = DetectionScreen::from(&config.detector);

        Self {
            photons: Vec::new(),
            config,
            slits,
            emitter,
            timer,
            screen,
            stats: Stats::default(),
            rng,
        }
    }

    // =========================================================================
    // DRIVING
    // =========================================================================

    /// Begin scheduling emission ticks. Idempotent.
    pub fn start(&mut self) {
        if !self.timer.is_running() {
            tracing::info!(mode = self.active_mode().name(), "emission started");
        }
        self.timer.start();
    }

    /// Stop scheduling emission ticks. Idempotent; live photons keep moving.
    pub fn stop(&mut self) {
        if self.timer.is_running() {
            tracing::info!(live = self.photons.len(), "emission stopped");
        }
        self.timer.stop();
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.timer.is_running()
    }

    /// Advance wall-clock time by `dt`: run every emission tick that has
    /// come due, then one simulation step.
    pub fn frame(&mut self, dt: Duration) -> StepReport {
        let due = self.timer.advance(dt);
        let emitted: usize = (0..due).map(|_| self.emit()).sum();

        let mut report = self.step();
        report.emitted = emitted;
        report
    }

    /// Run one emission tick regardless of the timer.
    ///
    /// Returns the number of photons added.
    pub fn emit(&mut self) -> usize {
        let color = photon_color(self.config.light.wavelength_nm, self.config.light.intensity);
        let added = self.emitter.emit(
            &mut self.photons,
            self.config.emission.max_photons,
            color,
            &mut self.rng,
        );
        self.stats.emitted += added as u64;
        tracing::trace!(added, live = self.photons.len(), "emission tick");
        added
    }

    /// Advance every live photon by one tick.
    pub fn step(&mut self) -> StepReport {
        let mut report = StepReport::default();
        let barrier_z = self.config.barrier.z;
        let detector_z = self.config.detector.z;
        let slits = self.slits;
        let mode = self.active_mode();

        let Self {
            photons,
            screen,
            stats,
            rng,
            ..
        } = self;

        photons.retain_mut(|p| {
            p.position += p.velocity;

            if !p.crossed_barrier && p.position.z >= barrier_z {
                p.crossed_barrier = true;
                match slits.aperture_at(p.position.x) {
                    None => {
                        report.blocked += 1;
                        return false;
                    }
                    Some(slit) => {
                        p.passed_slit = true;
                        p.slit = Some(slit);
                        p.velocity = mode.perturb(p.velocity, &mut *rng);
                        report.passed += 1;
                        match slit {
                            Slit::Left => stats.left += 1,
                            Slit::Right => stats.right += 1,
                        }
                    }
                }
            }

            if p.position.z >= detector_z {
                p.position.z = detector_z;
                p.velocity = Vec3::ZERO;
                if !p.landed {
                    p.landed = true;
                    screen.record(p.position.x);
                    report.landed += 1;
                }
            }

            p.remaining_life = p.remaining_life.saturating_sub(1);
            if p.remaining_life == 0 {
                report.expired += 1;
                return false;
            }
            true
        });

        self.stats.absorb(&report);
        tracing::debug!(
            live = self.photons.len(),
            blocked = report.blocked,
            passed = report.passed,
            landed = report.landed,
            expired = report.expired,
            "step"
        );
        report
    }

    /// Drop every photon, clear the screen and stats, and restart emission.
    pub fn reset(&mut self) {
        self.photons.clear();
        self.screen.clear();
        self.stats = Stats::default();
        self.timer.reset();
        self.timer.start();
        tracing::info!(
            width = self.slits.width,
            separation = self.slits.separation,
            mode = self.active_mode().name(),
            "simulation reset"
        );
    }

    // =========================================================================
    // PARAMETERS
    // =========================================================================

    /// Wavelength for photons emitted from now on.
    pub fn set_wavelength(&mut self, nm: f32) {
        self.config.light.wavelength_nm = nm;
        tracing::debug!(nm, "wavelength changed");
    }

    /// Brightness for photons emitted from now on.
    pub fn set_intensity(&mut self, intensity: f32) {
        self.config.light.intensity = intensity;
        tracing::debug!(intensity, "intensity changed");
    }

    pub fn set_emission_rate(&mut self, rate: usize) {
        self.config.emission.rate = rate;
        self.emitter.rate = rate;
        tracing::debug!(rate, "emission rate changed");
    }

    /// Change the wall-clock time between emission ticks.
    ///
    /// Zero is raised to one millisecond.
    pub fn set_emission_period(&mut self, period_ms: u64) {
        let period_ms = period_ms.max(1);
        self.config.emission.period_ms = period_ms;
        self.timer.set_period(Duration::from_millis(period_ms));
        tracing::debug!(period_ms, "emission period changed");
    }

    /// Change the population cap. Excess photons are dropped, newest first.
    pub fn set_max_photons(&mut self, max: usize) {
        self.config.emission.max_photons = max;
        if self.photons.len() > max {
            tracing::debug!(dropped = self.photons.len() - max, "population truncated to cap");
            self.photons.truncate(max);
        }
    }

    /// Toggle which-path observation for photons crossing from now on.
    pub fn set_observing(&mut self, observing: bool) {
        if self.config.observing != observing {
            self.config.observing = observing;
            tracing::info!(mode = self.active_mode().name(), "physics mode changed");
        }
    }

    /// Change the slit width without resetting.
    ///
    /// Photons already past the barrier keep their earlier verdict; use
    /// [`apply_slits`](Self::apply_slits) for a clean experiment.
    pub fn set_slit_width(&mut self, width: f32) {
        self.config.barrier.slit_width = width;
        self.slits = SlitGeometry::from(&self.config.barrier);
        tracing::info!(width, "slit width changed");
    }

    /// Change the slit separation without resetting.
    pub fn set_slit_separation(&mut self, separation: f32) {
        self.config.barrier.slit_separation = separation;
        self.slits = SlitGeometry::from(&self.config.barrier);
        tracing::info!(separation, "slit separation changed");
    }

    /// Change both slit parameters and reset.
    pub fn apply_slits(&mut self, width: f32, separation: f32) {
        self.config.barrier.slit_width = width;
        self.config.barrier.slit_separation = separation;
        self.slits = SlitGeometry::from(&self.config.barrier);
        self.reset();
    }

    // =========================================================================
    // READ-ONLY VIEWS
    // =========================================================================

    /// Live photons, in no particular order.
    #[inline]
    pub fn photons(&self) -> &[Photon] {
        &self.photons
    }

    /// Position and colour of every live photon, ready for upload.
    pub fn snapshot(&self) -> Vec<PhotonVertex> {
        self.photons.iter().map(Photon::vertex).collect()
    }

    #[inline]
    pub fn slits(&self) -> SlitGeometry {
        self.slits
    }

    #[inline]
    pub fn screen(&self) -> &DetectionScreen {
        &self.screen
    }

    #[inline]
    pub fn stats(&self) -> Stats {
        self.stats
    }

    #[inline]
    pub fn config(&self) -> &ExperimentConfig {
        &self.config
    }

    #[inline]
    pub fn is_observing(&self) -> bool {
        self.config.observing
    }

    /// Perturbation that photons crossing the barrier now will receive.
    pub fn active_mode(&self) -> PhysicsMode {
        PhysicsMode::select(self.config.observing, &self.config.physics)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.photons.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.photons.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sim() -> Simulation {
        Simulation::with_seed(ExperimentConfig::default(), 42)
    }

    /// A photon that will be at `z` with lateral `x` after one step.
    fn photon_before(x: f32, z: f32, speed: f32) -> Photon {
        Photon::new(Vec3::new(x, 0.0, z - speed), Vec3::new(0.0, 0.0, speed), Vec3::ONE, 100)
    }

    #[test]
    fn test_blocked_photon_removed_same_step() {
        let mut sim = sim();
        sim.photons.push(photon_before(3.5, 0.0, 0.2));

        let report = sim.step();
        assert_eq!(report.blocked, 1);
        assert!(sim.is_empty());
        assert_eq!(sim.stats().blocked, 1);
    }

    #[test]
    fn test_passed_photon_kicked_once() {
        let mut sim = sim();
        sim.photons.push(photon_before(5.0, 0.0, 0.2));

        let report = sim.step();
        assert_eq!(report.passed, 1);
        let p = &sim.photons()[0];
        assert!(p.crossed_barrier && p.passed_slit);
        assert_eq!(p.slit, Some(Slit::Right));
        let kicked = p.velocity;
        assert!((kicked.truncate().length() - 0.05).abs() < 1e-5);

        sim.step();
        assert_eq!(sim.photons()[0].velocity, kicked);
        assert_eq!(sim.stats().passed, 1);
        assert_eq!(sim.stats().right, 1);
    }

    #[test]
    fn test_landing_clamps_and_keeps_photon() {
        let mut sim = sim();
        let mut p = Photon::new(Vec3::new(0.0, 0.0, 19.9), Vec3::new(0.01, 0.0, 0.2), Vec3::ONE, 5);
        p.crossed_barrier = true;
        p.passed_slit = true;
        sim.photons.push(p);

        let report = sim.step();
        assert_eq!(report.landed, 1);
        let p = &sim.photons()[0];
        assert_eq!(p.position.z, 20.0);
        assert_eq!(p.velocity, Vec3::ZERO);
        assert!(p.landed);

        // A resting photon is not recorded twice.
        let report = sim.step();
        assert_eq!(report.landed, 0);
        assert_eq!(sim.screen().total(), 1);
        assert_eq!(sim.len(), 1);
    }

    #[test]
    fn test_expiry() {
        let mut sim = sim();
        sim.photons.push(Photon::new(Vec3::new(0.0, 0.0, -20.0), Vec3::Z, Vec3::ONE, 2));

        assert_eq!(sim.step().expired, 0);
        assert_eq!(sim.step().expired, 1);
        assert!(sim.is_empty());
    }

    #[test]
    fn test_set_max_photons_truncates() {
        let mut sim = sim();
        for _ in 0..5 {
            sim.emit();
        }
        assert_eq!(sim.len(), 50);
        sim.set_max_photons(20);
        assert_eq!(sim.len(), 20);
        assert_eq!(sim.emit(), 0);
    }

    #[test]
    fn test_emit_uses_current_wavelength() {
        let mut sim = sim();
        sim.set_wavelength(650.0);
        sim.emit();
        assert!(sim.photons().iter().all(|p| p.color == photon_color(650.0, 1.0)));
    }

    #[test]
    fn test_frame_emits_due_ticks_then_steps() {
        let mut sim = sim();
        sim.start();
        let report = sim.frame(Duration::from_millis(48));
        assert_eq!(report.emitted, 30);
        assert_eq!(sim.len(), 30);
        assert!(sim.photons().iter().all(|p| p.remaining_life < 350));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "invalid experiment config")]
    fn test_invalid_config_panics_in_debug() {
        let mut config = ExperimentConfig::default();
        config.emission.period_ms = 0;
        Simulation::with_seed(config, 1);
    }

    #[test]
    fn test_set_emission_period() {
        let mut sim = sim();
        sim.set_emission_period(32);
        sim.start();

        assert_eq!(sim.frame(Duration::from_millis(16)).emitted, 0);
        assert_eq!(sim.frame(Duration::from_millis(16)).emitted, 10);
        assert_eq!(sim.config().emission.period_ms, 32);

        sim.set_emission_period(0);
        assert_eq!(sim.config().emission.period_ms, 1);
        assert_eq!(sim.frame(Duration::from_millis(3)).emitted, 30);
    }

    #[test]
    fn test_apply_slits_resets() {
        let mut sim = sim();
        sim.emit();
        sim.apply_slits(1.0, 8.0);
        assert!(sim.is_empty());
        assert!(sim.is_running());
        assert_eq!(sim.slits(), SlitGeometry::new(1.0, 8.0));
        assert_eq!(sim.stats(), Stats::default());
    }
}
