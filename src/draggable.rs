//! Drag controller.

use cgmath::{InnerSpace, Point2, Vector2, Zero};
use std::cell::RefCell;
use std::f64::consts::SQRT_2;
use std::fmt;
use std::rc::{Rc, Weak};
use std::time::{Duration, Instant};

use crate::animation::{animate, Animation, Easing};
use crate::config::DraggableConfig;
use crate::geometry::{compute_uv, Boundary, Layout};
use crate::input::{PointerDispatcher, PointerEvent, PointerPhase, Subscription};

/// Duration of a recovery that starts from a corner of the boundary.
pub const RECOVERY_DURATION: Duration = Duration::from_millis(3000);
/// Largest possible length of a UV coordinate.
pub const MAX_UV_DISTANCE: f64 = SQRT_2;
/// Easing curve scaling recovery duration by starting distance.
pub const RECOVERY_DURATION_EASING: Easing = Easing::OutQuart;
/// Easing curve of the recovery motion itself.
pub const RECOVERY_EASING: Easing = Easing::OutElastic;

type DragFn<E> = Box<dyn FnMut(&E, Vector2<f64>)>;
type DropFn<E> = Box<dyn FnMut(&E)>;
type RecoverFn = Box<dyn FnMut(Vector2<f64>)>;

/// What a draggable element is doing.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DragState {
    /// At rest, wherever it was last dropped.
    Idle,
    /// Following the pointer.
    Dragging,
    /// Animating back to its origin.
    Recovering,
}

/// Recovery animation in progress.
#[derive(Debug)]
struct Recovery {
    animation: Animation,
    /// Translation when the recovery started.
    start: Vector2<f64>,
    /// Boundary when the recovery started.
    boundary: Boundary,
}

/// Controller for a single draggable element.
///
/// The host forwards pointer input to [`Draggable::pointer_down()`],
/// [`Draggable::pointer_move()`], and [`Draggable::pointer_up()`] (or uses
/// [`Draggable::mount()`] to do this through a [`PointerDispatcher`]), calls
/// [`Draggable::frame()`] once per frame, and applies [`Draggable::translate()`]
/// to the element when drawing it.
///
/// Callbacks run while the controller is borrowed, so they must not call back
/// into it.
pub struct Draggable<L, E = Point2<f64>> {
    layout: L,
    config: DraggableConfig,

    /// Translation at the end of the last gesture.
    translate_prev: Vector2<f64>,
    /// Current translation.
    translate: Vector2<f64>,
    /// Pointer position at the start of the current gesture.
    touch_start: Point2<f64>,
    dragging: bool,
    /// Active recovery animation. There is never more than one.
    recovery: Option<Recovery>,

    on_drag: Option<DragFn<E>>,
    on_drop: Option<DropFn<E>>,
    on_recover: Option<RecoverFn>,
}
impl<L: fmt::Debug, E> fmt::Debug for Draggable<L, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Draggable")
            .field("layout", &self.layout)
            .field("config", &self.config)
            .field("translate_prev", &self.translate_prev)
            .field("translate", &self.translate)
            .field("touch_start", &self.touch_start)
            .field("dragging", &self.dragging)
            .field("recovery", &self.recovery)
            .finish()
    }
}

impl<L: Layout, E: PointerEvent> Draggable<L, E> {
    /// Returns a new draggable at rest.
    pub fn new(layout: L, config: DraggableConfig) -> Self {
        Self {
            layout,
            config,

            translate_prev: Vector2::zero(),
            translate: Vector2::zero(),
            touch_start: Point2::new(0.0, 0.0),
            dragging: false,
            recovery: None,

            on_drag: None,
            on_drop: None,
            on_recover: None,
        }
    }

    /// Sets a callback invoked with the event and new UV coordinate after
    /// every accepted pointer move.
    #[must_use]
    pub fn on_drag(mut self, f: impl FnMut(&E, Vector2<f64>) + 'static) -> Self {
        self.on_drag = Some(Box::new(f));
        self
    }
    /// Sets a callback invoked once at the end of each gesture.
    #[must_use]
    pub fn on_drop(mut self, f: impl FnMut(&E) + 'static) -> Self {
        self.on_drop = Some(Box::new(f));
        self
    }
    /// Sets a callback invoked with the new UV coordinate on every frame of a
    /// recovery.
    #[must_use]
    pub fn on_recover(mut self, f: impl FnMut(Vector2<f64>) + 'static) -> Self {
        self.on_recover = Some(Box::new(f));
        self
    }

    /// Returns the layout source.
    pub fn layout(&self) -> &L {
        &self.layout
    }
    /// Returns the layout source mutably, so the host can update it.
    pub fn layout_mut(&mut self) -> &mut L {
        &mut self.layout
    }
    /// Returns the configuration.
    pub fn config(&self) -> DraggableConfig {
        self.config
    }

    /// Returns the current translation of the element from its origin.
    pub fn translate(&self) -> Vector2<f64> {
        self.translate
    }
    /// Returns the translation that the next gesture will start from.
    pub fn translate_prev(&self) -> Vector2<f64> {
        self.translate_prev
    }
    /// Returns the current UV coordinate, or `None` if the layout is
    /// unavailable.
    pub fn uv(&self) -> Option<Vector2<f64>> {
        let boundary = self.layout.boundary(self.config.padding)?;
        Some(compute_uv(self.translate, boundary))
    }

    /// Returns what the element is doing.
    pub fn state(&self) -> DragState {
        if self.dragging {
            DragState::Dragging
        } else if self.is_recovering() {
            DragState::Recovering
        } else {
            DragState::Idle
        }
    }
    /// Returns `true` if a gesture is in progress.
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }
    /// Returns `true` if a recovery animation is running.
    pub fn is_recovering(&self) -> bool {
        self.recovery
            .as_ref()
            .map_or(false, |r| r.animation.is_scheduled())
    }

    /// Returns `true` if `position` is over the element at its current
    /// translation.
    pub fn hit_test(&self, position: Point2<f64>) -> bool {
        match (self.layout.element_origin(), self.layout.element_size()) {
            (Some(origin), Some(size)) => {
                let min = origin + self.translate;
                let max = min + size;
                (min.x..=max.x).contains(&position.x) && (min.y..=max.y).contains(&position.y)
            }
            _ => false,
        }
    }

    /// Returns the element to rest, cancelling any gesture or recovery
    /// without invoking callbacks.
    pub fn reset(&mut self) {
        if let Some(mut recovery) = self.recovery.take() {
            recovery.animation.pause();
        }
        self.dragging = false;
        self.translate_prev = Vector2::zero();
        self.translate = Vector2::zero();
        self.touch_start = Point2::new(0.0, 0.0);
    }

    /// Starts a gesture at `position`, interrupting any recovery.
    pub fn pointer_down(&mut self, position: Point2<f64>) {
        self.dragging = true;
        if let Some(mut recovery) = self.recovery.take() {
            log::debug!("Interrupting recovery at {:?}", self.translate);
            recovery.animation.pause();
        }
        self.touch_start = position;
        log::debug!("Drag started at {:?}", position);
    }

    /// Moves the element with the pointer, clamped to the boundary.
    pub fn pointer_move(&mut self, event: &E) {
        if !self.dragging {
            return;
        }
        let boundary = match self.layout.boundary(self.config.padding) {
            Some(b) => b,
            None => {
                log::trace!("Ignoring pointer move; element has no layout");
                return;
            }
        };

        let diff = event.position() - self.touch_start;
        let next = boundary.clamp(self.translate_prev + diff);
        let uv = compute_uv(next, boundary);
        self.translate = next;
        log::trace!("Dragged to {:?} (uv {:?})", next, uv);

        if let Some(f) = &mut self.on_drag {
            f(event, uv);
        }
    }

    /// Ends the gesture, either leaving the element where it is or starting
    /// a recovery.
    pub fn pointer_up(&mut self, event: &E) {
        if !self.dragging {
            return;
        }
        if self.layout.boundary(self.config.padding).is_none() {
            log::trace!("Ignoring pointer up; element has no layout");
            return;
        }

        if self.config.recover_on_drop {
            self.recover();
        } else {
            self.dragging = false;
            self.translate_prev = self.translate;
            log::debug!("Dropped at {:?}", self.translate);
        }

        if let Some(f) = &mut self.on_drop {
            f(event);
        }
    }

    /// Starts animating the element back to its origin.
    fn recover(&mut self) {
        if !self.dragging {
            return;
        }
        let boundary = match self.layout.boundary(self.config.padding) {
            Some(b) => b,
            None => return,
        };
        self.dragging = false;

        let uv = compute_uv(self.translate, boundary);
        let duration = recovery_duration(uv);
        log::debug!(
            "Recovering from {:?} (uv {:?}) over {:?}",
            self.translate,
            uv,
            duration,
        );

        // `pointer_down()` has already cancelled any earlier recovery.
        debug_assert!(self.recovery.is_none());
        self.recovery = Some(Recovery {
            animation: animate(0.0, 1.0, duration, RECOVERY_EASING),
            start: self.translate,
            boundary,
        });
    }

    /// Advances the recovery animation, if any, to time `now`.
    pub fn frame(&mut self, now: Instant) {
        let recovery = match &mut self.recovery {
            Some(r) => r,
            None => return,
        };

        if let Some(latest) = recovery.animation.tick(now) {
            // Keep the gesture origin in sync so that grabbing the element
            // mid-recovery continues from where it is now.
            self.translate_prev = self.translate;
            self.translate = recovery.start - recovery.start * latest;

            let uv = compute_uv(self.translate, recovery.boundary);
            log::trace!("Recovery frame at {:?} (uv {:?})", self.translate, uv);
            if let Some(f) = &mut self.on_recover {
                f(uv);
            }
        }

        if !recovery.animation.is_scheduled() {
            log::debug!("Recovery finished");
            self.recovery = None;
        }
    }
}

impl<L: Layout + 'static, E: PointerEvent + 'static> Draggable<L, E> {
    /// Subscribes a shared draggable to pointer input.
    ///
    /// The draggable is reset to rest first. Pointer down only starts a drag
    /// over the element; move and up are handled wherever the pointer is. The
    /// listeners are removed when the returned [`Mount`] is dropped.
    pub fn mount(this: &Rc<RefCell<Self>>, dispatcher: &PointerDispatcher<E>) -> Mount<E> {
        this.borrow_mut().reset();

        let listener = |f: fn(&mut Self, &E)| {
            let weak: Weak<RefCell<Self>> = Rc::downgrade(this);
            move |event: &E| {
                if let Some(this) = weak.upgrade() {
                    match this.try_borrow_mut() {
                        Ok(mut this) => f(&mut this, event),
                        Err(_) => log::warn!("Ignoring pointer event dispatched from a callback"),
                    }
                }
            }
        };

        Mount {
            _subscriptions: vec![
                dispatcher.subscribe(
                    PointerPhase::Down,
                    listener(|this, event| {
                        let position = event.position();
                        if this.hit_test(position) {
                            this.pointer_down(position);
                        }
                    }),
                ),
                dispatcher.subscribe(PointerPhase::Move, listener(Self::pointer_move)),
                dispatcher.subscribe(PointerPhase::Up, listener(Self::pointer_up)),
            ],
        }
    }
}

/// Pointer listeners for a mounted draggable. Dropping this unmounts it.
#[derive(Debug)]
#[must_use = "dropping the mount immediately unsubscribes the draggable"]
pub struct Mount<E> {
    _subscriptions: Vec<Subscription<E>>,
}

/// Returns how long a recovery starting at `uv` takes. Recoveries from far
/// away take up to [`RECOVERY_DURATION`], and those from near the origin are
/// nearly instant.
pub fn recovery_duration(uv: Vector2<f64>) -> Duration {
    let distance = uv.magnitude();
    let multiplier = RECOVERY_DURATION_EASING.apply(distance / MAX_UV_DISTANCE);
    // `max()` comes first so that `NaN`s become `0.0`.
    RECOVERY_DURATION.mul_f64(multiplier.max(0.0).min(1.0))
}
