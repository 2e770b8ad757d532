//! Abstract pointer input.

use cgmath::Point2;

mod dispatch;

pub use dispatch::{PointerDispatcher, Subscription};

/// Pointer event that has a position in viewport pixel coordinates.
///
/// The event itself is passed through to drag and drop callbacks untouched,
/// so hosts can carry whatever platform data they need along with it.
pub trait PointerEvent {
    /// Returns the position of the pointer.
    fn position(&self) -> Point2<f64>;
}
impl PointerEvent for Point2<f64> {
    fn position(&self) -> Point2<f64> {
        *self
    }
}
impl PointerEvent for (f64, f64) {
    fn position(&self) -> Point2<f64> {
        Point2::new(self.0, self.1)
    }
}

/// Stage of a pointer gesture.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PointerPhase {
    /// Button pressed or touch started.
    Down,
    /// Pointer moved.
    Move,
    /// Button released or touch ended.
    Up,
}
