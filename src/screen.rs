//! Detection screen histogram.
//!
//! Each photon that reaches the detection plane leaves one hit, binned by its
//! X coordinate. Over time the histogram shows either interference fringes or
//! two plain bands, and [`DetectionScreen::contrast`] gives a single number
//! for how fringed it is.

use crate::config::DetectorConfig;

/// Landing-position histogram along X.
#[derive(Clone, Debug, PartialEq)]
pub struct DetectionScreen {
    half_width: f32,
    bins: Vec<u32>,
    /// Hits that landed outside `[-half_width, half_width]`.
    misses: u32,
}

impl DetectionScreen {
    /// Create an empty screen.
    ///
    /// `bins` is raised to at least one.
    pub fn new(half_width: f32, bins: usize) -> Self {
        Self {
            half_width,
            bins: vec![0; bins.max(1)],
            misses: 0,
        }
    }

    /// Record a landing at lateral coordinate `x`.
    pub fn record(&mut self, x: f32) {
        match self.bin_index(x) {
            Some(i) => self.bins[i] += 1,
            None => self.misses += 1,
        }
    }

    /// Bin containing `x`, or `None` if off-screen.
    pub fn bin_index(&self, x: f32) -> Option<usize> {
        if !(x >= -self.half_width && x <= self.half_width) {
            return None;
        }
        let t = (x + self.half_width) / (2.0 * self.half_width);
        let i = (t * self.bins.len() as f32) as usize;
        // x == half_width lands exactly on the upper edge
        Some(i.min(self.bins.len() - 1))
    }

    /// X coordinate of the centre of bin `i`.
    pub fn bin_center(&self, i: usize) -> f32 {
        let bin_width = 2.0 * self.half_width / self.bins.len() as f32;
        -self.half_width + (i as f32 + 0.5) * bin_width
    }

    #[inline]
    pub fn hits(&self) -> &[u32] {
        &self.bins
    }

    #[inline]
    pub fn misses(&self) -> u32 {
        self.misses
    }

    /// Hits recorded inside the screen.
    pub fn total(&self) -> u32 {
        self.bins.iter().sum()
    }

    pub fn clear(&mut self) {
        self.bins.iter_mut().for_each(|b| *b = 0);
        self.misses = 0;
    }

    /// Fringe visibility `(max - min) / (max + min)` over non-empty bins.
    ///
    /// 0 for an empty screen.
    pub fn contrast(&self) -> f32 {
        let mut filled = self.bins.iter().copied().filter(|&c| c > 0);
        let Some(first) = filled.next() else {
            return 0.0;
        };
        let (min, max) = filled.fold((first, first), |(lo, hi), c| (lo.min(c), hi.max(c)));
        (max - min) as f32 / (max + min) as f32
    }
}

impl From<&DetectorConfig> for DetectionScreen {
    fn from(detector: &DetectorConfig) -> Self {
        Self::new(detector.half_width, detector.bins)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_bins() {
        let mut screen = DetectionScreen::new(10.0, 4);
        screen.record(-9.0);
        screen.record(-1.0);
        screen.record(1.0);
        screen.record(10.0);
        screen.record(4.9);

        assert_eq!(screen.hits(), &[1, 1, 2, 1]);
        assert_eq!(screen.total(), 5);
        assert_eq!(screen.misses(), 0);
    }

    #[test]
    fn test_off_screen_counts_as_miss() {
        let mut screen = DetectionScreen::new(10.0, 4);
        screen.record(10.5);
        screen.record(f32::NAN);
        assert_eq!(screen.total(), 0);
        assert_eq!(screen.misses(), 2);
    }

    #[test]
    fn test_bin_center() {
        let screen = DetectionScreen::new(10.0, 4);
        assert_eq!(screen.bin_center(0), -7.5);
        assert_eq!(screen.bin_center(3), 7.5);
    }

    #[test]
    fn test_contrast() {
        let mut screen = DetectionScreen::new(10.0, 4);
        assert_eq!(screen.contrast(), 0.0);

        for _ in 0..3 {
            screen.record(-9.0);
        }
        screen.record(9.0);
        assert!((screen.contrast() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_clear() {
        let mut screen = DetectionScreen::new(10.0, 4);
        screen.record(0.0);
        screen.record(20.0);
        screen.clear();
        assert_eq!(screen.total(), 0);
        assert_eq!(screen.misses(), 0);
    }
}
