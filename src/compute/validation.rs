//! Validation for planar input coordinates.

use crate::error::{Result, SkylineError};
use geo::Point;

/// Validates that a point has finite coordinates.
///
/// # Examples
///
/// ```
/// use spatial_skyline::compute::validation::validate_point;
/// use geo::Point;
///
/// assert!(validate_point(&Point::new(2.0, -3.5)).is_ok());
/// assert!(validate_point(&Point::new(f64::NAN, 0.0)).is_err());
/// ```
pub fn validate_point(point: &Point) -> Result<()> {
    let (x, y) = (point.x(), point.y());

    if !x.is_finite() {
        return Err(SkylineError::InvalidInput(format!(
            "x must be finite, got: {}",
            x
        )));
    }

    if !y.is_finite() {
        return Err(SkylineError::InvalidInput(format!(
            "y must be finite, got: {}",
            y
        )));
    }

    Ok(())
}

/// Validates multiple points.
pub fn validate_points(points: &[Point]) -> Result<()> {
    for (idx, point) in points.iter().enumerate() {
        validate_point(point)
            .map_err(|e| SkylineError::InvalidInput(format!("Point at index {}: {}", idx, e)))?;
    }
    Ok(())
}

/// Validates a reference set: non-empty, every coordinate finite.
///
/// # Examples
///
/// ```
/// use spatial_skyline::compute::validation::validate_reference_points;
/// use spatial_skyline::SkylineError;
/// use geo::Point;
///
/// assert!(matches!(
///     validate_reference_points(&[]),
///     Err(SkylineError::NoReferencePoints)
/// ));
/// assert!(validate_reference_points(&[Point::new(0.0, 0.0)]).is_ok());
/// ```
pub fn validate_reference_points(points: &[Point]) -> Result<()> {
    if points.is_empty() {
        return Err(SkylineError::NoReferencePoints);
    }
    validate_points(points)
}
