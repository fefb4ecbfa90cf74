//! Utility maths functions

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use num_traits::Float;

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Restrict a value to a closed range, saturating at the nearest bound.
pub fn clamp<T>(value: T, min: T, max: T) -> T
where
    T: PartialOrd,
{
    if value > max {
        max
    } else if value < min {
        min
    } else {
        value
    }
}

/// Return the euclidean distance between two 2-D points.
pub fn norm_2d<T>(point_0: [T; 2], point_1: [T; 2]) -> T
where
    T: Float,
{
    ((point_0[0] - point_1[0]).powi(2) + (point_0[1] - point_1[1]).powi(2)).sqrt()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_clamp() {
        assert_eq!(clamp(90, 0, 180), 90);
        assert_eq!(clamp(-10, 0, 180), 0);
        assert_eq!(clamp(200, 0, 180), 180);
        assert_eq!(clamp(0, 0, 180), 0);
        assert_eq!(clamp(180, 0, 180), 180);
        assert_eq!(clamp(0.45, 0.0, 1.0), 0.45);
    }

    #[test]
    fn test_norm_2d() {
        assert_eq!(norm_2d([0.0, 0.0], [3.0, 4.0]), 5.0);
        assert_eq!(norm_2d([1.0, 1.0], [1.0, 1.0]), 0.0);
        assert!((norm_2d([0.5, 0.5], [0.5, 0.3]) - 0.2).abs() < 1e-12);
    }
}
