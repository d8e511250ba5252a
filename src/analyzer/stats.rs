/// Reusable statistical functions for the indicator engine.

/// Arithmetic mean. Returns 0.0 if the slice is empty.
pub fn media(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Percentile with linear interpolation. `p` is in [0, 100].
/// Returns 0.0 if the slice is empty.
pub fn percentil(values: &[f64], p: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }
    // Rank (0-based fractional index)
    let rank = p / 100.0 * (n - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    if lower == upper {
        sorted[lower]
    } else {
        let frac = rank - lower as f64;
        sorted[lower] * (1.0 - frac) + sorted[upper] * frac
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- media ---

    #[test]
    fn test_media_empty() {
        assert_eq!(media(&[]), 0.0);
    }

    #[test]
    fn test_media_single() {
        assert_eq!(media(&[5.0]), 5.0);
    }

    #[test]
    fn test_media_known() {
        // (2 + 4 + 6) / 3 = 4.0
        assert!((media(&[2.0, 4.0, 6.0]) - 4.0).abs() < 1e-10);
    }

    // --- percentil ---

    #[test]
    fn test_percentil_empty() {
        assert_eq!(percentil(&[], 50.0), 0.0);
    }

    #[test]
    fn test_percentil_single() {
        assert_eq!(percentil(&[42.0], 50.0), 42.0);
        assert_eq!(percentil(&[42.0], 90.0), 42.0);
    }

    #[test]
    fn test_percentil_median_odd() {
        // Sorted: [1, 2, 3, 4, 5]. Median (p50) = 3.0
        assert!((percentil(&[3.0, 1.0, 5.0, 2.0, 4.0], 50.0) - 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_percentil_median_even() {
        // Sorted: [1, 2, 3, 4]. p50 → rank = 0.5 * 3 = 1.5 → lerp(2, 3, 0.5) = 2.5
        assert!((percentil(&[4.0, 1.0, 3.0, 2.0], 50.0) - 2.5).abs() < 1e-10);
    }

    #[test]
    fn test_percentil_p0_and_p100() {
        let vals = vec![10.0, 20.0, 30.0];
        assert!((percentil(&vals, 0.0) - 10.0).abs() < 1e-10);
        assert!((percentil(&vals, 100.0) - 30.0).abs() < 1e-10);
    }
}
