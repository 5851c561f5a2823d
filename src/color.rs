//! Wavelength to RGB conversion.
//!
//! Piecewise-linear approximation of the visible spectrum, good enough to
//! tint photons; not a colorimetric conversion.

use glam::Vec3;

/// Approximate display colour of monochromatic light.
///
/// Each channel is in `[0, 1]`. Wavelengths outside 380–780 nm are black.
/// Brightness rolls off towards both ends of human vision.
pub fn wavelength_to_rgb(nm: f32) -> Vec3 {
    let (r, g, b) = match nm {
        w if (380.0..440.0).contains(&w) => (-(w - 440.0) / (440.0 - 380.0), 0.0, 1.0),
        w if (440.0..490.0).contains(&w) => (0.0, (w - 440.0) / (490.0 - 440.0), 1.0),
        w if (490.0..510.0).contains(&w) => (0.0, 1.0, -(w - 510.0) / (510.0 - 490.0)),
        w if (510.0..580.0).contains(&w) => ((w - 510.0) / (580.0 - 510.0), 1.0, 0.0),
        w if (580.0..645.0).contains(&w) => (1.0, -(w - 645.0) / (645.0 - 580.0), 0.0),
        w if (645.0..=780.0).contains(&w) => (1.0, 0.0, 0.0),
        _ => return Vec3::ZERO,
    };

    let falloff = if nm < 420.0 {
        0.3 + 0.7 * (nm - 380.0) / (420.0 - 380.0)
    } else if nm > 700.0 {
        0.3 + 0.7 * (780.0 - nm) / (780.0 - 700.0)
    } else {
        1.0
    };

    Vec3::new(r, g, b) * falloff
}

/// Spectrum colour scaled by `intensity`, clamped to displayable range.
pub fn photon_color(nm: f32, intensity: f32) -> Vec3 {
    (wavelength_to_rgb(nm) * intensity.max(0.0)).clamp(Vec3::ZERO, Vec3::ONE)
}
