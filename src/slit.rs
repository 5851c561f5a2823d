//! Double-slit barrier geometry.
//!
//! Two apertures sit symmetrically at `±separation / 2` along X, each
//! `width` wide. The pass test is inclusive: a photon exactly on an aperture
//! edge gets through.
//!
//! ```text
//!          -d/2            +d/2
//!  ██████ [ L ] ██████████ [ R ] ██████
//!          <w>              <w>
//! ```

/// Which aperture a photon went through.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Slit {
    /// Aperture centred at `-separation / 2`.
    Left,
    /// Aperture centred at `+separation / 2`.
    Right,
}

/// One aperture, for drawing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aperture {
    pub slit: Slit,
    pub center: f32,
    pub half_width: f32,
}

impl Aperture {
    /// Lowest X still inside the aperture.
    #[inline]
    pub fn min(&self) -> f32 {
        self.center - self.half_width
    }

    /// Highest X still inside the aperture.
    #[inline]
    pub fn max(&self) -> f32 {
        self.center + self.half_width
    }

    #[inline]
    pub fn contains(&self, x: f32) -> bool {
        (x - self.center).abs() <= self.half_width
    }
}

/// Slit width and separation, derived from the barrier config.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SlitGeometry {
    /// Width of each aperture.
    pub width: f32,
    /// Centre-to-centre distance between the apertures.
    pub separation: f32,
}

impl SlitGeometry {
    pub fn new(width: f32, separation: f32) -> Self {
        Self { width, separation }
    }

    /// Both apertures, left first.
    pub fn apertures(&self) -> [Aperture; 2] {
        let half_width = self.width / 2.0;
        let offset = self.separation / 2.0;
        [
            Aperture {
                slit: Slit::Left,
                center: -offset,
                half_width,
            },
            Aperture {
                slit: Slit::Right,
                center: offset,
                half_width,
            },
        ]
    }

    /// The aperture admitting lateral coordinate `x`, if any.
    ///
    /// When the apertures overlap (`width > separation`) the left one wins.
    pub fn aperture_at(&self, x: f32) -> Option<Slit> {
        self.apertures()
            .into_iter()
            .find(|a| a.contains(x))
            .map(|a| a.slit)
    }

    /// Whether a photon at lateral coordinate `x` gets through the barrier.
    #[inline]
    pub fn passes(&self, x: f32) -> bool {
        self.aperture_at(x).is_some()
    }
}

impl From<&crate::config::BarrierConfig> for SlitGeometry {
    fn from(barrier: &crate::config::BarrierConfig) -> Self {
        Self::new(barrier.slit_width, barrier.slit_separation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pass_inside_right_slit() {
        let slits = SlitGeometry::new(2.0, 10.0);
        assert!(slits.passes(5.0));
        assert_eq!(slits.aperture_at(5.0), Some(Slit::Right));
    }

    #[test]
    fn test_block_between_slits() {
        let slits = SlitGeometry::new(2.0, 10.0);
        assert!(!slits.passes(3.5));
        assert!(!slits.passes(0.0));
        assert_eq!(slits.aperture_at(0.0), None);
    }

    #[test]
    fn test_block_outside_slits() {
        let slits = SlitGeometry::new(2.0, 10.0);
        assert!(!slits.passes(6.5));
        assert!(!slits.passes(-7.0));
    }

    #[test]
    fn test_left_slit_symmetric() {
        let slits = SlitGeometry::new(2.0, 10.0);
        assert!(slits.passes(-5.0));
        assert!(slits.passes(-4.5));
        assert_eq!(slits.aperture_at(-5.5), Some(Slit::Left));
    }

    #[test]
    fn test_edges_inclusive() {
        let slits = SlitGeometry::new(2.0, 10.0);
        assert!(slits.passes(4.0));
        assert!(slits.passes(6.0));
        assert!(slits.passes(-6.0));
    }

    #[test]
    fn test_apertures_bounds() {
        let [left, right] = SlitGeometry::new(2.0, 10.0).apertures();
        assert_eq!(left.slit, Slit::Left);
        assert_eq!((left.min(), left.max()), (-6.0, -4.0));
        assert_eq!((right.min(), right.max()), (4.0, 6.0));
    }

    #[test]
    fn test_zero_width_only_centres_pass() {
        let slits = SlitGeometry::new(0.0, 4.0);
        assert!(slits.passes(2.0));
        assert!(!slits.passes(2.01));
    }
}
