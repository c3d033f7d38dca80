//! Color ramps and palettes shared by the chart set.

/// Categorical palette for series and gender keys.
pub const CATEGORICAL: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

/// Fill used for cells whose bucket has rows but no usable readings.
pub const NEUTRAL_CELL: &str = "#2a3244";

pub fn series_color(index: usize) -> &'static str {
    CATEGORICAL[index % CATEGORICAL.len()]
}

/// Sequential ramps for the heatmap grids, sampled by piecewise-linear
/// interpolation between anchor stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ramp {
    Viridis,
    Magma,
}

impl Ramp {
    pub fn stops(self) -> &'static [(f64, [u8; 3])] {
        match self {
            Ramp::Viridis => &[
                (0.0, [0x44, 0x01, 0x54]),
                (0.25, [0x3b, 0x52, 0x8b]),
                (0.5, [0x21, 0x91, 0x8c]),
                (0.75, [0x5e, 0xc9, 0x62]),
                (1.0, [0xfd, 0xe7, 0x25]),
            ],
            Ramp::Magma => &[
                (0.0, [0x00, 0x00, 0x04]),
                (0.25, [0x51, 0x12, 0x7c]),
                (0.5, [0xb7, 0x37, 0x79]),
                (0.75, [0xfc, 0x89, 0x61]),
                (1.0, [0xfc, 0xfd, 0xbf]),
            ],
        }
    }

    /// Hex color at position `t` in [0, 1]; out-of-range values clamp.
    pub fn sample(self, t: f64) -> String {
        let stops = self.stops();
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };

        let mut rgb = stops[stops.len() - 1].1;
        for window in stops.windows(2) {
            let (start, start_rgb) = window[0];
            let (end, end_rgb) = window[1];
            if t <= end {
                let span = end - start;
                let local = if span == 0.0 { 0.0 } else { (t - start) / span };
                rgb = [
                    lerp_channel(start_rgb[0], end_rgb[0], local),
                    lerp_channel(start_rgb[1], end_rgb[1], local),
                    lerp_channel(start_rgb[2], end_rgb[2], local),
                ];
                break;
            }
        }

        format!("#{:02x}{:02x}{:02x}", rgb[0], rgb[1], rgb[2])
    }

    /// Light ramp ends need dark cell labels to stay readable.
    pub fn label_color(self, t: f64) -> &'static str {
        if t >= 0.55 {
            "#111827"
        } else {
            "#f5f7fb"
        }
    }
}

fn lerp_channel(start: u8, end: u8, t: f64) -> u8 {
    (start as f64 + (end as f64 - start as f64) * t).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ramp_endpoints_match_their_anchors() {
        assert_eq!(Ramp::Viridis.sample(0.0), "#440154");
        assert_eq!(Ramp::Viridis.sample(1.0), "#fde725");
        assert_eq!(Ramp::Magma.sample(0.0), "#000004");
        assert_eq!(Ramp::Magma.sample(1.0), "#fcfdbf");
    }

    #[test]
    fn interior_samples_sit_on_anchor_stops() {
        assert_eq!(Ramp::Viridis.sample(0.5), "#21918c");
        assert_eq!(Ramp::Magma.sample(0.75), "#fc8961");
    }

    #[test]
    fn out_of_range_positions_clamp() {
        assert_eq!(Ramp::Viridis.sample(-2.0), Ramp::Viridis.sample(0.0));
        assert_eq!(Ramp::Viridis.sample(7.0), Ramp::Viridis.sample(1.0));
        assert_eq!(Ramp::Viridis.sample(f64::NAN), Ramp::Viridis.sample(0.0));
    }

    #[test]
    fn series_colors_wrap_around() {
        assert_eq!(series_color(0), CATEGORICAL[0]);
        assert_eq!(series_color(10), CATEGORICAL[0]);
        assert_eq!(series_color(11), CATEGORICAL[1]);
    }
}
