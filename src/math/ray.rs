//! Ray type and operations

use crate::core::types::DVec3;

/// A ray defined by origin and unit direction
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: DVec3,
    pub direction: DVec3,
}

impl Ray {
    /// Create a new ray (direction should be normalized)
    pub fn new(origin: DVec3, direction: DVec3) -> Self {
        Self { origin, direction }
    }

    /// Ray from `from` aimed at `to`, with the distance between them.
    /// `None` when the points coincide.
    pub fn between(from: DVec3, to: DVec3) -> Option<(Self, f64)> {
        let offset = to - from;
        let distance = offset.length();
        if !(distance > 0.0 && distance.is_finite()) {
            return None;
        }
        Some((Self::new(from, offset / distance), distance))
    }

    /// Get point along ray at parameter t
    pub fn at(&self, t: f64) -> DVec3 {
        self.origin + self.direction * t
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_at() {
        let ray = Ray::new(DVec3::ZERO, DVec3::X);
        assert_eq!(ray.at(5.0), DVec3::new(5.0, 0.0, 0.0));
    }

    #[test]
    fn test_between() {
        let (ray, distance) = Ray::between(DVec3::new(1.0, 1.0, 1.0), DVec3::new(1.0, 4.0, 5.0)).unwrap();
        assert_eq!(distance, 5.0);
        assert!((ray.direction - DVec3::new(0.0, 0.6, 0.8)).length() < 1e-12);
        assert!((ray.at(distance) - DVec3::new(1.0, 4.0, 5.0)).length() < 1e-12);
    }

    #[test]
    fn test_between_same_point() {
        assert!(Ray::between(DVec3::ONE, DVec3::ONE).is_none());
    }
}
