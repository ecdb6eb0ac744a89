/// Percentage of the total contributed by each part, in input order.
///
/// A zero total yields all zeros instead of dividing, so chart widgets
/// never see NaN or infinities:
///
/// ```rust
/// assert_eq!(stats::percentage_share(&[30.0, 70.0]), vec![30.0, 70.0]);
/// assert_eq!(stats::percentage_share(&[0.0, 0.0]), vec![0.0, 0.0]);
/// ```
pub fn percentage_share(parts: &[f64]) -> Vec<f64> {
    let total: f64 = parts.iter().sum();
    if total == 0.0 || !total.is_finite() {
        return vec![0.0; parts.len()];
    }
    parts.iter().map(|part| part / total * 100.0).collect()
}
