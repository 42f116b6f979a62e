//! Descriptive statistics over plain `f64` slices
//!
//! Undersized inputs yield NaN rather than panicking so callers can decide
//! which degenerate cases fall back to a defined value.

/// Arithmetic mean. NaN for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample variance (divides by N-1). NaN with fewer than two values.
///
/// A constant series is exactly 0.0 even when its mean does not round-trip.
pub fn sample_variance(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return f64::NAN;
    }
    if values.iter().all(|v| *v == values[0]) {
        return 0.0;
    }
    let m = mean(values);
    values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64
}

/// Sample standard deviation
pub fn sample_std(values: &[f64]) -> f64 {
    sample_variance(values).sqrt()
}

/// Sample covariance of two equally long slices.
///
/// NaN when the lengths differ or fewer than two pairs are available.
pub fn sample_covariance(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() || a.len() < 2 {
        return f64::NAN;
    }
    let mean_a = mean(a);
    let mean_b = mean(b);
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - mean_a) * (y - mean_b))
        .sum::<f64>()
        / (a.len() - 1) as f64
}

/// Percentile with linear interpolation between order statistics.
///
/// `p` is a fraction in `[0, 1]`; the value sits at rank `p * (n - 1)` of the
/// sorted input. Returns `None` for an empty slice.
pub fn percentile(values: &[f64], p: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let rank = p.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let weight = rank - lower as f64;

    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * weight)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn test_mean() {
        assert!((mean(&[1.0, 2.0, 3.0, 4.0]) - 2.5).abs() < EPS);
        assert!(mean(&[]).is_nan());
    }

    #[test]
    fn test_sample_variance() {
        // 2, 4, 4, 4, 5, 5, 7, 9: population variance 4, sample variance 32/7
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert!((sample_variance(&values) - 32.0 / 7.0).abs() < EPS);
        assert!((sample_std(&values) - (32.0f64 / 7.0).sqrt()).abs() < EPS);
        assert!(sample_variance(&[1.0]).is_nan());
        assert_eq!(sample_variance(&[3.0, 3.0, 3.0]), 0.0);
        assert_eq!(sample_variance(&[0.1; 30]), 0.0);
        assert_eq!(sample_std(&[0.0001; 252]), 0.0);
    }

    #[test]
    fn test_sample_covariance() {
        let a = [1.0, 2.0, 3.0];
        let b = [2.0, 4.0, 6.0];
        assert!((sample_covariance(&a, &b) - 2.0).abs() < EPS);
        assert!((sample_covariance(&a, &a) - sample_variance(&a)).abs() < EPS);
        assert!(sample_covariance(&a, &b[..2]).is_nan());
    }

    #[test]
    fn test_percentile_interpolates() {
        let values = [0.03, -0.02, 0.01, 0.02, -0.01];
        // sorted: -0.02, -0.01, 0.01, 0.02, 0.03
        assert!((percentile(&values, 0.0).unwrap() + 0.02).abs() < EPS);
        assert!((percentile(&values, 1.0).unwrap() - 0.03).abs() < EPS);
        assert!((percentile(&values, 0.5).unwrap() - 0.01).abs() < EPS);
        // rank 0.2 between -0.02 and -0.01
        assert!((percentile(&values, 0.05).unwrap() + 0.018).abs() < 1e-9);
    }

    #[test]
    fn test_percentile_edge_cases() {
        assert_eq!(percentile(&[], 0.5), None);
        assert_eq!(percentile(&[7.0], 0.05), Some(7.0));
    }
}
