//! Drag boundary and UV geometry.

use cgmath::{Point2, Vector2};

mod boundary;
mod padding;

pub use boundary::{compute_uv, Boundary};
pub use padding::Padding;

/// Linearly remaps `value` from `min..=max` to `out_min..=out_max`.
///
/// Values outside the input range are clamped to the corresponding output
/// endpoint exactly; this never extrapolates. The caller must ensure that
/// `min < max`.
pub fn interpolate(value: f64, min: f64, max: f64, out_min: f64, out_max: f64) -> f64 {
    if value <= min {
        return out_min;
    }
    if value >= max {
        return out_max;
    }

    let progress = (value - min) / (max - min);
    out_min + progress * (out_max - out_min)
}

/// Source of the current layout of a draggable element.
///
/// Every method is queried fresh whenever a boundary is computed, so values
/// are never cached across gestures. Returning `None` means the element is not
/// mounted (or not yet sized), and the operation that needed it is skipped.
pub trait Layout {
    /// Returns the untranslated position of the element's top-left corner.
    fn element_origin(&self) -> Option<Point2<f64>>;
    /// Returns the width and height of the element.
    fn element_size(&self) -> Option<Vector2<f64>>;
    /// Returns the width and height of the viewport.
    fn viewport_size(&self) -> Option<Vector2<f64>>;

    /// Returns the legal translation rectangle for the element, or `None` if
    /// any part of the layout is unavailable.
    fn boundary(&self, padding: Padding) -> Option<Boundary> {
        Some(Boundary::compute(
            self.element_origin()?,
            self.element_size()?,
            self.viewport_size()?,
            padding,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interpolate_clamps() {
        for &v in &[-100.0, -1.0, 2.0] {
            assert_eq!(interpolate(v, 2.0, 10.0, -3.0, 7.0), -3.0);
        }
        for &v in &[10.0, 10.5, 1e9] {
            assert_eq!(interpolate(v, 2.0, 10.0, -3.0, 7.0), 7.0);
        }
    }

    #[test]
    fn test_interpolate_midpoint() {
        assert_eq!(interpolate(6.0, 2.0, 10.0, -3.0, 7.0), 2.0);
        assert_eq!(interpolate(0.0, -50.0, 50.0, 0.0, 1.0), 0.5);
        // Reversed output ranges work too.
        assert_eq!(interpolate(0.25, 0.0, 1.0, 1.0, 0.0), 0.75);
    }

    struct Unmounted;
    impl Layout for Unmounted {
        fn element_origin(&self) -> Option<Point2<f64>> {
            None
        }
        fn element_size(&self) -> Option<Vector2<f64>> {
            Some(Vector2::new(10.0, 10.0))
        }
        fn viewport_size(&self) -> Option<Vector2<f64>> {
            Some(Vector2::new(100.0, 100.0))
        }
    }

    #[test]
    fn test_boundary_needs_full_layout() {
        assert_eq!(Unmounted.boundary(Padding::default()), None);
    }
}
