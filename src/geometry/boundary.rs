use cgmath::{Point2, Vector2};

use super::{interpolate, Padding};

/// Legal range of translation for a draggable element.
///
/// `left..=right` bounds the horizontal translation and `top..=bottom` bounds
/// the vertical translation. Translation `(0, 0)` is the element's resting
/// position.
///
/// If the padding is too large for the element to fit in the viewport, a range
/// may be inverted (`left > right`). This is not rejected; clamping against an
/// inverted range always yields the smaller bound, pinning the element to one
/// edge.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Boundary {
    /// Minimum horizontal translation.
    pub left: f64,
    /// Minimum vertical translation.
    pub top: f64,
    /// Maximum horizontal translation.
    pub right: f64,
    /// Maximum vertical translation.
    pub bottom: f64,
}

impl Boundary {
    /// Computes the boundary for an element whose untranslated top-left
    /// corner is at `origin`, so that the translated element stays within the
    /// padded viewport.
    pub fn compute(
        origin: Point2<f64>,
        size: Vector2<f64>,
        viewport: Vector2<f64>,
        padding: Padding,
    ) -> Self {
        Self {
            left: -origin.x + padding.left,
            right: viewport.x - origin.x - size.x - padding.right,
            top: -origin.y + padding.top,
            bottom: viewport.y - origin.y - size.y - padding.bottom,
        }
    }

    /// Clamps a candidate translation into the boundary, one axis at a time.
    pub fn clamp(self, translation: Vector2<f64>) -> Vector2<f64> {
        // `max()` comes first so that inverted ranges collapse onto the
        // smaller bound.
        Vector2::new(
            translation.x.max(self.left).min(self.right),
            translation.y.max(self.top).min(self.bottom),
        )
    }

    /// Returns whether a translation lies within the boundary.
    pub fn contains(self, translation: Vector2<f64>) -> bool {
        (self.left..=self.right).contains(&translation.x)
            && (self.top..=self.bottom).contains(&translation.y)
    }
}

/// Converts a translation into a signed unit coordinate relative to a
/// boundary.
///
/// Each axis is `0` at rest, `1` when pushed fully against the right/bottom
/// edge, and `-1` when pushed fully against the left/top edge, independent of
/// element or viewport size.
pub fn compute_uv(translation: Vector2<f64>, boundary: Boundary) -> Vector2<f64> {
    let axis = |t: f64, min: f64, max: f64| {
        if t >= 0.0 {
            interpolate(t, 0.0, max, 0.0, 1.0)
        } else {
            interpolate(t, min, 0.0, -1.0, 0.0)
        }
    };
    Vector2::new(
        axis(translation.x, boundary.left, boundary.right),
        axis(translation.y, boundary.top, boundary.bottom),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario() -> Boundary {
        Boundary::compute(
            Point2::new(100.0, 100.0),
            Vector2::new(200.0, 200.0),
            Vector2::new(800.0, 600.0),
            Padding::uniform(50.0),
        )
    }

    #[test]
    fn test_compute_boundary() {
        assert_eq!(
            scenario(),
            Boundary {
                left: -50.0,
                right: 450.0,
                top: -50.0,
                bottom: 250.0,
            },
        );
    }

    #[test]
    fn test_per_side_padding() {
        let b = Boundary::compute(
            Point2::new(10.0, 20.0),
            Vector2::new(30.0, 40.0),
            Vector2::new(300.0, 200.0),
            Padding::new(1.0, 2.0, 3.0, 4.0),
        );
        assert_eq!(b.left, -9.0);
        assert_eq!(b.top, -18.0);
        assert_eq!(b.right, 257.0);
        assert_eq!(b.bottom, 136.0);
    }

    #[test]
    fn test_uv_corners() {
        let b = scenario();
        assert_eq!(compute_uv(Vector2::new(b.left, b.top), b), Vector2::new(-1.0, -1.0));
        assert_eq!(compute_uv(Vector2::new(b.right, b.bottom), b), Vector2::new(1.0, 1.0));
        assert_eq!(compute_uv(Vector2::new(0.0, 0.0), b), Vector2::new(0.0, 0.0));
        assert_eq!(compute_uv(Vector2::new(450.0, 0.0), b), Vector2::new(1.0, 0.0));
    }

    #[test]
    fn test_uv_is_asymmetric() {
        let b = scenario();
        // Halfway to each edge is ±0.5 even though the edges are at different
        // distances.
        let uv = compute_uv(Vector2::new(225.0, -25.0), b);
        assert_eq!(uv, Vector2::new(0.5, -0.5));
    }

    #[test]
    fn test_clamp() {
        let b = scenario();
        assert_eq!(b.clamp(Vector2::new(1000.0, -1000.0)), Vector2::new(450.0, -50.0));
        assert_eq!(b.clamp(Vector2::new(12.0, 34.0)), Vector2::new(12.0, 34.0));
        assert!(b.contains(b.clamp(Vector2::new(-1e6, 1e6))));
    }

    #[test]
    fn test_clamp_inverted_range() {
        // Padding larger than the viewport allows.
        let b = Boundary::compute(
            Point2::new(0.0, 0.0),
            Vector2::new(100.0, 100.0),
            Vector2::new(120.0, 120.0),
            Padding::uniform(50.0),
        );
        assert!(b.left > b.right);
        for &x in &[-500.0, 0.0, 500.0] {
            let clamped = b.clamp(Vector2::new(x, x));
            assert_eq!(clamped.x, b.right);
            assert_eq!(clamped.y, b.bottom);
        }
    }
}
