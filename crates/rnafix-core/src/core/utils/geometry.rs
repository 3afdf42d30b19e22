use nalgebra::Point3;

/// Relative deviation of a measured length from its ideal value.
///
/// Returns `None` when the ideal length is not a positive finite number, which
/// would make the ratio meaningless.
#[inline]
pub fn fractional_deviation(actual: f64, ideal: f64) -> Option<f64> {
    if !(ideal.is_finite() && ideal > 0.0) {
        return None;
    }
    Some((actual - ideal).abs() / ideal)
}

/// New position for `moving` so that it lies exactly `length` away from `fixed`
/// along the current `fixed -> moving` direction.
///
/// Returns `None` when the two points coincide and the direction is undefined.
pub fn place_at_distance(
    fixed: &Point3<f64>,
    moving: &Point3<f64>,
    length: f64,
) -> Option<Point3<f64>> {
    let direction = (moving - fixed).try_normalize(f64::EPSILON)?;
    Some(fixed + direction * length)
}
