//! Bounded draggable element that can spring back to its origin on release.
//!
//! The pipeline is: pointer movement → clamped translation within a
//! [`Boundary`] → normalized [`uv`](geometry::compute_uv) coordinate → host
//! callback. On release, a [`Draggable`] may run a recovery [`Animation`] that
//! eases the element back to its untranslated position one frame at a time.

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all)]
#![deny(clippy::correctness)]

pub mod animation;
pub mod config;
pub mod draggable;
pub mod geometry;
pub mod input;

pub use animation::{animate, Animation, Easing};
pub use config::{ConfigError, DraggableConfig};
pub use draggable::{DragState, Draggable};
pub use geometry::{interpolate, Boundary, Layout, Padding};
pub use input::{PointerDispatcher, PointerEvent, Subscription};
