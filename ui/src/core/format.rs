//! Formatting helpers for presenting survey figures.

/// Percentage readings; `NaN` (no usable observations) prints as a dash.
pub fn format_percent(value: f64) -> String {
    if value.is_nan() {
        "–".to_string()
    } else {
        format!("{value:.1}%")
    }
}

pub fn format_number(value: f64, decimals: usize) -> String {
    if value.is_nan() {
        "–".to_string()
    } else {
        format!("{value:.decimals$}")
    }
}

/// Correlation coefficients; undefined correlations print as "n/a".
pub fn format_r(value: f64) -> String {
    if value.is_nan() {
        "n/a".to_string()
    } else {
        format!("{value:.3}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nan_never_prints_as_a_number() {
        assert_eq!(format_percent(f64::NAN), "–");
        assert_eq!(format_number(f64::NAN, 2), "–");
        assert_eq!(format_r(f64::NAN), "n/a");
    }

    #[test]
    fn finite_values_keep_fixed_precision() {
        assert_eq!(format_percent(12.345), "12.3%");
        assert_eq!(format_number(12.345, 2), "12.35");
        assert_eq!(format_number(12.345, 0), "12");
        assert_eq!(format_r(0.98765), "0.988");
    }
}
