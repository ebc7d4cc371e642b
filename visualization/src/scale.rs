//! Linear and band scales for the bar chart
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use serde::{Deserialize, Serialize};

/// Continuous mapping from a numeric domain onto a pixel range
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    /// A zero-width or non-finite domain falls back to `[d0, d0 + 1]`
    /// so that an empty data set still yields a usable scale.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        let (d0, d1) = domain;
        let d0 = if d0.is_finite() { d0 } else { 0.0 };
        let d1 = if d1.is_finite() && d1 != d0 { d1 } else { d0 + 1.0 };
        Self {
            domain: (d0, d1),
            range,
        }
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    pub fn apply(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        r0 + (value - d0) / (d1 - d0) * (r1 - r0)
    }

    /// Round tick values covering the domain, roughly `count` of them
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (lo, hi) = if self.domain.0 <= self.domain.1 {
            self.domain
        } else {
            (self.domain.1, self.domain.0)
        };
        let step = tick_step(lo, hi, count.max(1));
        if !step.is_finite() || step <= 0.0 {
            return vec![lo];
        }

        // Sub-unit steps: divide by the integral inverse step
        if step < 1.0 {
            let inverse = (1.0 / step).round();
            let first = (lo * inverse).ceil() as i64;
            let last = (hi * inverse).floor() as i64;
            return (first..=last).map(|i| i as f64 / inverse).collect();
        }

        let first = (lo / step).ceil() as i64;
        let last = (hi / step).floor() as i64;
        (first..=last).map(|i| i as f64 * step).collect()
    }
}

/// Step of 1, 2 or 5 times a power of ten
fn tick_step(lo: f64, hi: f64, count: usize) -> f64 {
    let raw = (hi - lo) / count as f64;
    let base = 10f64.powi(raw.log10().floor() as i32);
    let error = raw / base;

    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };
    base * factor
}

/// Evenly spaced bands for a fixed number of ordinal slots
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandScale {
    slots: usize,
    start: f64,
    step: f64,
    bandwidth: f64,
}

impl BandScale {
    /// Bands over slots `0..slots` within `range`.
    ///
    /// `padding_inner` is the gap between bands as a fraction of the step.
    /// There is no outer padding and the bands are centred in the range.
    pub fn new(slots: usize, range: (f64, f64), padding_inner: f64) -> Self {
        let padding_inner = padding_inner.clamp(0.0, 1.0);
        let (r0, r1) = range;
        let span = r1 - r0;

        let step = span / (slots as f64 - padding_inner).max(1.0);
        let start = r0 + (span - step * (slots as f64 - padding_inner)) * 0.5;

        Self {
            slots,
            start,
            step,
            bandwidth: step * (1.0 - padding_inner),
        }
    }

    pub fn slots(&self) -> usize {
        self.slots
    }

    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    /// Leading edge of band `slot`, `None` outside the domain
    pub fn position(&self, slot: usize) -> Option<f64> {
        (slot < self.slots).then(|| self.start + self.step * slot as f64)
    }

    /// Band centre for an arbitrary index, wrapped into the domain
    pub fn wrapped_center(&self, index: usize) -> f64 {
        match self.slots {
            0 => self.start,
            n => self.start + self.step * (index % n) as f64 + self.bandwidth / 2.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::approx_eq;

    #[test]
    fn test_linear_maps_domain_to_range() {
        let scale = LinearScale::new((0.0, 4.0), (0.0, 600.0));

        assert!(approx_eq(scale.apply(0.0), 0.0));
        assert!(approx_eq(scale.apply(1.0), 150.0));
        assert!(approx_eq(scale.apply(4.0), 600.0));
    }

    #[test]
    fn test_degenerate_domain_falls_back() {
        let scale = LinearScale::new((0.0, 0.0), (0.0, 600.0));

        assert_eq!(scale.domain(), (0.0, 1.0));
        assert!(approx_eq(scale.apply(0.0), 0.0));
        assert!(scale.apply(1.0).is_finite());

        let nan = LinearScale::new((0.0, f64::NAN), (0.0, 600.0));
        assert_eq!(nan.domain(), (0.0, 1.0));
    }

    #[test]
    fn test_ticks_are_round() {
        let scale = LinearScale::new((0.0, 2816.0), (0.0, 600.0));
        let ticks = scale.ticks(5);

        assert_eq!(ticks.first(), Some(&0.0));
        assert_eq!(ticks.last(), Some(&2500.0));
        assert!(ticks.windows(2).all(|w| approx_eq(w[1] - w[0], 500.0)));
    }

    #[test]
    fn test_fractional_ticks_are_exact() {
        let empty = LinearScale::new((0.0, 0.0), (0.0, 600.0));

        assert_eq!(
            empty.ticks(10),
            vec![0.0, 0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9, 1.0]
        );
        assert_eq!(empty.ticks(5), vec![0.0, 0.2, 0.4, 0.6, 0.8, 1.0]);
    }

    #[test]
    fn test_band_layout() {
        let band = BandScale::new(3, (0.0, 470.0), 0.08);
        let step = 470.0 / 2.92;

        assert!(approx_eq(band.step(), step));
        assert!(approx_eq(band.bandwidth(), step * 0.92));
        assert!(approx_eq(band.position(0).unwrap(), 0.0));
        assert!(approx_eq(band.position(1).unwrap(), step));
        assert!(approx_eq(band.position(2).unwrap() + band.bandwidth(), 470.0));
        assert_eq!(band.position(3), None);
    }

    #[test]
    fn test_wrapped_center() {
        let band = BandScale::new(3, (0.0, 470.0), 0.08);
        let half = band.bandwidth() / 2.0;

        assert!(approx_eq(band.wrapped_center(0), half));
        assert!(approx_eq(band.wrapped_center(4), band.step() + half));
    }
}
