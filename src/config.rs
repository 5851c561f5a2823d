//! Experiment configuration.
//!
//! Every knob the control layer can turn lives here: wavelength, slit
//! geometry, emission rate, population cap, and the observing toggle. The
//! whole struct round-trips through JSON so a host can persist presets.
//!
//! # Coordinate frame
//!
//! Photons travel along **+Z**. Slits are offset along **X**; **Y** is the
//! slit height and is never blocked.
//!
//! ```text
//!   source.z          barrier.z            detector.z
//!      |  ----->          |  ----->             |
//!   (-20)                (0)                  (20)
//! ```
//!
//! # Example
//!
//! ```ignore
//! let config = ExperimentConfig::from_json_str(r#"{ "observing": true }"#)?;
//! assert_eq!(config.light.wavelength_nm, 532.0);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Slider bounds applied by [`ExperimentConfig::clamp_to_ui`].
pub mod bounds {
    /// Visible wavelength range in nanometres.
    pub const WAVELENGTH_NM: (f32, f32) = (380.0, 780.0);
    /// Slit width range.
    pub const SLIT_WIDTH: (f32, f32) = (0.1, 5.0);
    /// Slit separation range (centre to centre).
    pub const SLIT_SEPARATION: (f32, f32) = (1.0, 20.0);
    /// Brightness multiplier range.
    pub const INTENSITY: (f32, f32) = (0.0, 2.0);
    /// Population cap range.
    pub const MAX_PHOTONS: (usize, usize) = (1, 100_000);
    /// Photons per emission tick.
    pub const RATE: (usize, usize) = (0, 1_000);
}

/// Light source colour settings.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LightConfig {
    /// Wavelength in nanometres. Drives photon colour at emission.
    pub wavelength_nm: f32,
    /// Brightness multiplier applied to the spectrum colour.
    pub intensity: f32,
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            wavelength_nm: 532.0,
            intensity: 1.0,
        }
    }
}

/// Where and how photons are born.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SourceConfig {
    /// Forward coordinate of the source plane.
    pub z: f32,
    /// Lateral extent along X; positions are uniform over `[-width/2, width/2]`.
    pub width: f32,
    /// Lateral extent along Y.
    pub height: f32,
    /// Forward speed (units per tick).
    pub speed: f32,
    /// Maximum lateral velocity jitter per axis.
    pub jitter: f32,
    /// Shortest initial lifetime in ticks.
    pub lifetime_min: u32,
    /// Longest initial lifetime in ticks (inclusive).
    pub lifetime_max: u32,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            z: -20.0,
            width: 20.0,
            height: 2.0,
            speed: 0.2,
            jitter: 0.01,
            lifetime_min: 250,
            lifetime_max: 350,
        }
    }
}

/// The slitted barrier.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BarrierConfig {
    /// Forward coordinate of the barrier plane.
    pub z: f32,
    /// Width of each aperture.
    pub slit_width: f32,
    /// Centre-to-centre distance between the apertures.
    pub slit_separation: f32,
}

impl Default for BarrierConfig {
    fn default() -> Self {
        Self {
            z: 0.0,
            slit_width: 2.0,
            slit_separation: 10.0,
        }
    }
}

/// The landing screen.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DetectorConfig {
    /// Forward coordinate of the detection plane.
    pub z: f32,
    /// Half of the histogram's lateral extent.
    pub half_width: f32,
    /// Number of histogram bins.
    pub bins: usize,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            z: 20.0,
            half_width: 30.0,
            bins: 60,
        }
    }
}

/// Emission cadence and population control.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EmissionConfig {
    /// Photons emitted per emission tick.
    pub rate: usize,
    /// Maximum simultaneously live photons.
    pub max_photons: usize,
    /// Wall-clock period between emission ticks, in milliseconds.
    pub period_ms: u64,
}

impl Default for EmissionConfig {
    fn default() -> Self {
        Self {
            rate: 10,
            max_photons: 1000,
            period_ms: 16,
        }
    }
}

/// Strength of the two velocity perturbations.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Sinusoidal kick amplitude in interference mode.
    pub interference_amplitude: f32,
    /// Uniform kick half-range in observation mode.
    pub observation_spread: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            interference_amplitude: 0.05,
            observation_spread: 0.02,
        }
    }
}

/// Top-level experiment configuration.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ExperimentConfig {
    pub light: LightConfig,
    pub source: SourceConfig,
    pub barrier: BarrierConfig,
    pub detector: DetectorConfig,
    pub emission: EmissionConfig,
    pub physics: PhysicsConfig,
    /// Whether a which-path detector is watching the slits.
    pub observing: bool,
}

impl ExperimentConfig {
    /// Parse and validate a config from a JSON string.
    ///
    /// Missing sections and fields fall back to their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a config file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject configurations the simulation cannot run sensibly.
    ///
    /// Only structural problems are checked (inverted ranges, empty
    /// histograms, a barrier outside the flight path, a zero emission period
    /// or a photon speed that is not positive and finite). Slider ranges are
    /// the host's business; see [`clamp_to_ui`](Self::clamp_to_ui).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.source.lifetime_min == 0 || self.source.lifetime_min > self.source.lifetime_max {
            return Err(ConfigError::InvalidRange {
                field: "source.lifetime_min",
                min: 1.0,
                max: f64::from(self.source.lifetime_max),
            });
        }
        if !(self.source.z < self.barrier.z && self.barrier.z < self.detector.z) {
            return Err(ConfigError::InvalidRange {
                field: "barrier.z",
                min: f64::from(self.source.z),
                max: f64::from(self.detector.z),
            });
        }
        if self.detector.bins == 0 {
            return Err(ConfigError::InvalidRange {
                field: "detector.bins",
                min: 1.0,
                max: f64::INFINITY,
            });
        }
        if self.detector.half_width <= 0.0 {
            return Err(ConfigError::InvalidRange {
                field: "detector.half_width",
                min: f64::MIN_POSITIVE,
                max: f64::INFINITY,
            });
        }
        if self.emission.max_photons == 0 {
            return Err(ConfigError::InvalidRange {
                field: "emission.max_photons",
                min: 1.0,
                max: f64::INFINITY,
            });
        }
        if self.emission.period_ms == 0 {
            return Err(ConfigError::InvalidRange {
                field: "emission.period_ms",
                min: 1.0,
                max: f64::INFINITY,
            });
        }
        if !(self.source.speed > 0.0 && self.source.speed.is_finite()) {
            return Err(ConfigError::InvalidRange {
                field: "source.speed",
                min: f64::MIN_POSITIVE,
                max: f64::INFINITY,
            });
        }
        for (field, value) in [
            ("source.width", self.source.width),
            ("source.height", self.source.height),
            ("source.jitter", self.source.jitter),
            ("barrier.slit_width", self.barrier.slit_width),
            ("barrier.slit_separation", self.barrier.slit_separation),
            ("physics.interference_amplitude", self.physics.interference_amplitude),
            ("physics.observation_spread", self.physics.observation_spread),
        ] {
            if !(value >= 0.0 && value.is_finite()) {
                return Err(ConfigError::InvalidRange {
                    field,
                    min: 0.0,
                    max: f64::INFINITY,
                });
            }
        }
        Ok(())
    }

    /// Clamp the slider-controlled values to their UI bounds.
    pub fn clamp_to_ui(mut self) -> Self {
        use bounds::*;
        self.light.wavelength_nm = self.light.wavelength_nm.clamp(WAVELENGTH_NM.0, WAVELENGTH_NM.1);
        self.light.intensity = self.light.intensity.clamp(INTENSITY.0, INTENSITY.1);
        self.barrier.slit_width = self.barrier.slit_width.clamp(SLIT_WIDTH.0, SLIT_WIDTH.1);
        self.barrier.slit_separation = self
            .barrier
            .slit_separation
            .clamp(SLIT_SEPARATION.0, SLIT_SEPARATION.1);
        self.emission.max_photons = self.emission.max_photons.clamp(MAX_PHOTONS.0, MAX_PHOTONS.1);
        self.emission.rate = self.emission.rate.clamp(RATE.0, RATE.1);
        self
    }
}
