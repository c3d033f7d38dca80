//! Pairwise statistics behind the scatter view.

/// Least-squares fit of `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Linear {
    pub slope: f64,
    pub intercept: f64,
}

impl Linear {
    pub const ZERO: Linear = Linear {
        slope: 0.0,
        intercept: 0.0,
    };

    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Ordinary least squares over the finite pairs. Fewer than two usable pairs
/// or a spread-free x series cannot support a fit and yield the zero line,
/// which predicts 0 everywhere.
pub fn linear_regression(pairs: &[(f64, f64)]) -> Linear {
    let valid = finite_pairs(pairs);
    if valid.len() < 2 {
        return Linear::ZERO;
    }

    let n = valid.len() as f64;
    let mut sum_x = 0.0;
    let mut sum_y = 0.0;
    let mut sum_xy = 0.0;
    let mut sum_x2 = 0.0;
    for (x, y) in &valid {
        sum_x += x;
        sum_y += y;
        sum_xy += x * y;
        sum_x2 += x * x;
    }

    let denominator = n * sum_x2 - sum_x * sum_x;
    if denominator == 0.0 || !denominator.is_finite() {
        return Linear::ZERO;
    }

    let slope = (n * sum_xy - sum_x * sum_y) / denominator;
    let intercept = (sum_y - slope * sum_x) / n;
    if !slope.is_finite() || !intercept.is_finite() {
        return Linear::ZERO;
    }

    Linear { slope, intercept }
}

/// Pearson correlation over the finite pairs. Returns `NaN` when the
/// coefficient is undefined: fewer than two usable pairs, or a zero-variance
/// series. Callers format `NaN` as "n/a" rather than pretending at zero.
pub fn pearson(pairs: &[(f64, f64)]) -> f64 {
    let valid = finite_pairs(pairs);
    if valid.len() < 2 {
        return f64::NAN;
    }

    let n = valid.len() as f64;
    let mean_x = valid.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = valid.iter().map(|(_, y)| y).sum::<f64>() / n;

    let mut covariance = 0.0;
    let mut variance_x = 0.0;
    let mut variance_y = 0.0;
    for (x, y) in &valid {
        let dx = x - mean_x;
        let dy = y - mean_y;
        covariance += dx * dy;
        variance_x += dx * dx;
        variance_y += dy * dy;
    }

    let denominator = (variance_x * variance_y).sqrt();
    if denominator == 0.0 {
        return f64::NAN;
    }

    covariance / denominator
}

/// Plain-language reading of |r| shown on the scatter summary card.
pub fn correlation_strength(r: f64) -> &'static str {
    if r.is_nan() {
        return "n/a";
    }
    let magnitude = r.abs();
    if magnitude > 0.7 {
        "Strong"
    } else if magnitude > 0.4 {
        "Moderate"
    } else if magnitude > 0.2 {
        "Weak"
    } else {
        "Very Weak"
    }
}

fn finite_pairs(pairs: &[(f64, f64)]) -> Vec<(f64, f64)> {
    pairs
        .iter()
        .copied()
        .filter(|(x, y)| x.is_finite() && y.is_finite())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fits_an_exact_line() {
        let pairs = vec![(0.0, 1.0), (1.0, 3.0), (2.0, 5.0), (3.0, 7.0)];
        let fit = linear_regression(&pairs);
        assert!((fit.slope - 2.0).abs() < 1e-9);
        assert!((fit.intercept - 1.0).abs() < 1e-9);
        assert!((fit.predict(10.0) - 21.0).abs() < 1e-9);
    }

    #[test]
    fn too_few_pairs_fall_back_to_the_zero_line() {
        assert_eq!(linear_regression(&[]), Linear::ZERO);
        assert_eq!(linear_regression(&[(4.0, 9.0)]), Linear::ZERO);
        assert_eq!(linear_regression(&[]).predict(123.0), 0.0);
    }

    #[test]
    fn nan_pairs_are_ignored_by_the_fit() {
        let pairs = vec![
            (0.0, 1.0),
            (f64::NAN, 2.0),
            (1.0, 3.0),
            (2.0, f64::NAN),
            (2.0, 5.0),
        ];
        let fit = linear_regression(&pairs);
        assert!((fit.slope - 2.0).abs() < 1e-9);
    }

    #[test]
    fn spread_free_x_yields_the_zero_line() {
        let pairs = vec![(3.0, 1.0), (3.0, 2.0), (3.0, 9.0)];
        assert_eq!(linear_regression(&pairs), Linear::ZERO);
    }

    #[test]
    fn pearson_detects_perfect_relationships() {
        let up = vec![(1.0, 2.0), (2.0, 4.0), (3.0, 6.0)];
        assert!((pearson(&up) - 1.0).abs() < 1e-9);

        let down = vec![(1.0, 6.0), (2.0, 4.0), (3.0, 2.0)];
        assert!((pearson(&down) + 1.0).abs() < 1e-9);
    }

    #[test]
    fn pearson_is_nan_when_undefined() {
        assert!(pearson(&[]).is_nan());
        assert!(pearson(&[(1.0, 2.0)]).is_nan());

        let flat = vec![(1.0, 5.0), (2.0, 5.0), (3.0, 5.0)];
        assert!(pearson(&flat).is_nan());
    }

    #[test]
    fn strength_labels_follow_the_magnitude_bands() {
        assert_eq!(correlation_strength(0.9), "Strong");
        assert_eq!(correlation_strength(-0.71), "Strong");
        assert_eq!(correlation_strength(0.5), "Moderate");
        assert_eq!(correlation_strength(0.3), "Weak");
        assert_eq!(correlation_strength(0.1), "Very Weak");
        assert_eq!(correlation_strength(f64::NAN), "n/a");
    }
}
