//! Solution quality relative to a known reference (e.g. an optimal tour).

/// Closeness of `candidate` to `reference`, as a percentage.
///
/// Computed as `(1 - |candidate - reference| / candidate) * 100`, so a
/// candidate equal to the reference scores 100. Returns 0 for a
/// non-positive candidate.
///
/// # Examples
///
/// ```
/// use u_tsp::evaluation::closeness;
///
/// assert!((closeness(100.0, 100.0) - 100.0).abs() < 1e-12);
/// assert!((closeness(100.0, 125.0) - 80.0).abs() < 1e-12);
/// ```
pub fn closeness(reference: f64, candidate: f64) -> f64 {
    if candidate <= 0.0 {
        return 0.0;
    }
    (1.0 - ((candidate - reference) / candidate).abs()) * 100.0
}

/// Relative excess of `candidate` over `reference`, in percent.
///
/// Returns `f64::INFINITY` when the reference is not positive.
pub fn gap_percent(reference: f64, candidate: f64) -> f64 {
    if reference <= 0.0 {
        return f64::INFINITY;
    }
    (candidate - reference) / reference * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gap() {
        assert!((gap_percent(200.0, 210.0) - 5.0).abs() < 1e-12);
        assert_eq!(gap_percent(0.0, 1.0), f64::INFINITY);
        assert_eq!(gap_percent(50.0, 50.0), 0.0);
    }

    #[test]
    fn test_closeness_degenerate() {
        assert_eq!(closeness(10.0, 0.0), 0.0);
    }
}
