//! Chart figures and panels.
//!
//! Every chart follows the same split:
//!
//! - a pure *figure builder* turns rows and params into plotted geometry,
//! - a *renderer* plugs that builder into the view coordinator and publishes
//!   the figure through a signal,
//! - a *panel* component draws the published figure as inline SVG and feeds
//!   hover events into the brush channel.
//!
//! Geometry is computed in figure space (the SVG viewBox), so builders are
//! fully unit-testable without a DOM.

pub mod bars;
pub mod color;
pub mod heatmap;
pub mod scatter;
pub mod trend;

/// Linear mapping from a value domain onto a pixel range. A collapsed
/// domain maps every value to the middle of the range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn map(&self, value: f64) -> f64 {
        let span = self.domain.1 - self.domain.0;
        if span == 0.0 || !span.is_finite() {
            return (self.range.0 + self.range.1) / 2.0;
        }
        let t = (value - self.domain.0) / span;
        self.range.0 + t * (self.range.1 - self.range.0)
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }
}

/// Slot geometry for a categorical axis: evenly spaced bands with inner
/// padding. Returns `(offset, width)` per band across `range` pixels.
pub fn band_slots(count: usize, range: f64, padding: f64) -> Vec<(f64, f64)> {
    if count == 0 {
        return Vec::new();
    }
    let step = range / count as f64;
    let width = step * (1.0 - padding.clamp(0.0, 0.9));
    (0..count)
        .map(|index| (index as f64 * step + (step - width) / 2.0, width))
        .collect()
}

/// Round a positive value up to a friendly axis maximum. Non-finite and
/// non-positive inputs fall back to 10, which keeps an empty chart readable.
pub fn nice_max(value: f64) -> f64 {
    if !value.is_finite() || value <= 0.0 {
        return 10.0;
    }
    let base = 10f64.powf(value.log10().floor());
    (value / base).ceil() * base
}

/// `count + 1` evenly spaced tick values from zero to `max` inclusive.
pub fn ticks(max: f64, count: usize) -> Vec<f64> {
    (0..=count)
        .map(|index| max * index as f64 / count as f64)
        .collect()
}
