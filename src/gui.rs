use cgmath::{Point2, Vector2};
use glium::glutin::event::{ElementState, Event, MouseButton, StartCause, WindowEvent};
use glium::glutin::event_loop::{ControlFlow, EventLoop};
use glium::glutin::window::WindowBuilder;
use glium::glutin::ContextBuilder;
use lazy_static::lazy_static;
use send_wrapper::SendWrapper;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::{Duration, Instant};

use draggable::input::PointerPhase;
use draggable::{Draggable, DraggableConfig, Layout, PointerDispatcher, PointerEvent};

use crate::render::{self, BoxRotation};

/// Width and height of the draggable element, in pixels.
const ELEMENT_SIZE: f64 = 200.0;
/// Padding used unless overridden by the environment.
const DEFAULT_PADDING: f64 = 50.0;

lazy_static! {
    static ref EVENT_LOOP: SendWrapper<RefCell<Option<EventLoop<()>>>> =
        SendWrapper::new(RefCell::new(Some(EventLoop::new())));
    pub static ref DISPLAY: SendWrapper<glium::Display> = SendWrapper::new({
        let wb = WindowBuilder::new().with_title(crate::TITLE.to_owned());
        let cb = ContextBuilder::new().with_vsync(true).with_depth_buffer(24);
        glium::Display::new(wb, cb, EVENT_LOOP.borrow().as_ref().unwrap())
            .expect("Failed to initialize display")
    });
}

/// Layout of the demo window: a square element centered in the viewport.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct WindowLayout {
    /// Size of the window, in pixels.
    pub viewport: Vector2<f64>,
    /// Size of the draggable element, in pixels.
    pub element_size: Vector2<f64>,
}
impl WindowLayout {
    pub fn new(viewport: Vector2<f64>, element_size: f64) -> Self {
        Self {
            viewport,
            element_size: Vector2::new(element_size, element_size),
        }
    }

    /// Returns the untranslated top-left corner of the element.
    pub fn origin(&self) -> Point2<f64> {
        Point2::new(0.0, 0.0) + (self.viewport - self.element_size) / 2.0
    }
}
impl Layout for WindowLayout {
    fn element_origin(&self) -> Option<Point2<f64>> {
        Some(self.origin())
    }
    fn element_size(&self) -> Option<Vector2<f64>> {
        Some(self.element_size)
    }
    fn viewport_size(&self) -> Option<Vector2<f64>> {
        // The window is zero-sized while minimized.
        Some(self.viewport).filter(|v| v.x > 0.0 && v.y > 0.0)
    }
}

/// Mouse event in window pixel coordinates.
#[derive(Debug, Copy, Clone)]
pub struct MouseEvent {
    pub position: Point2<f64>,
    pub button: Option<MouseButton>,
}
impl PointerEvent for MouseEvent {
    fn position(&self) -> Point2<f64> {
        self.position
    }
}

/// Turns window mouse input into pointer events.
///
/// The last cursor position is kept after the cursor leaves the window, so
/// releasing the button outside the window still ends the gesture there.
#[derive(Debug, Default)]
struct MouseTracker {
    last_pos: Option<Point2<f64>>,
}
impl MouseTracker {
    fn cursor_moved(&mut self, position: Point2<f64>) -> MouseEvent {
        self.last_pos = Some(position);
        MouseEvent {
            position,
            button: None,
        }
    }

    /// Returns the event for a left button press or release, or `None` for
    /// other buttons and before the cursor position is known.
    fn mouse_input(
        &self,
        state: ElementState,
        button: MouseButton,
    ) -> Option<(PointerPhase, MouseEvent)> {
        if button != MouseButton::Left {
            return None;
        }
        let phase = match state {
            ElementState::Pressed => PointerPhase::Down,
            ElementState::Released => PointerPhase::Up,
        };
        let ev = MouseEvent {
            position: self.last_pos?,
            button: Some(button),
        };
        Some((phase, ev))
    }
}

fn load_config() -> DraggableConfig {
    let defaults = DraggableConfig::new()
        .padding(DEFAULT_PADDING)
        .recover_on_drop(true);
    match defaults.with_env() {
        Ok(config) => config,
        Err(e) => {
            log::warn!("{}; using default configuration", e);
            defaults
        }
    }
}

pub fn show_gui() -> ! {
    let display = &**DISPLAY;

    // Initialize runtime data.
    let config = load_config();
    log::info!("Starting with {:?}", config);
    let (w, h) = display.get_framebuffer_dimensions();
    let layout = WindowLayout::new(Vector2::new(w as f64, h as f64), ELEMENT_SIZE);

    let rotation = Rc::new(RefCell::new(BoxRotation::default()));
    let (drag_rotation, drop_rotation, recover_rotation) =
        (rotation.clone(), rotation.clone(), rotation.clone());
    let element = Rc::new(RefCell::new(
        Draggable::new(layout, config)
            .on_drag(move |_: &MouseEvent, uv| drag_rotation.borrow_mut().set_from_uv(uv))
            .on_drop(move |e: &MouseEvent| {
                log::debug!(
                    "{:?} released at {:?} with box at {:?} degrees",
                    e.button,
                    e.position,
                    drop_rotation.borrow().degrees(),
                )
            })
            .on_recover(move |uv| recover_rotation.borrow_mut().set_from_uv(uv)),
    ));

    let dispatcher = PointerDispatcher::new();
    let mut mount = Some(Draggable::mount(&element, &dispatcher));
    let mut mouse = MouseTracker::default();
    let mut events_buffer = VecDeque::new();

    // Main loop.
    let mut next_frame_time = Instant::now();
    let ev_loop = EVENT_LOOP.borrow_mut().take().unwrap();
    ev_loop.run(move |event, _ev_loop, control_flow| {
        // Handle events.
        let mut now = Instant::now();
        let mut do_frame = false;
        match event.to_static() {
            Some(Event::NewEvents(cause)) => match cause {
                StartCause::ResumeTimeReached {
                    start: _,
                    requested_resume,
                } => {
                    now = requested_resume;
                    do_frame = true;
                }
                StartCause::Init => {
                    next_frame_time = now;
                    do_frame = true;
                }
                _ => (),
            },

            // The program is about to exit. Unmount so that no pointer
            // listener can run after teardown.
            Some(Event::LoopDestroyed) => {
                mount.take();
                log::info!("Exiting");
            }

            // Queue the event to be handled next time we render
            // everything.
            Some(ev) => events_buffer.push_back(ev),

            // Ignore this event.
            None => (),
        }

        if do_frame && next_frame_time <= now {
            let frame_duration = Duration::from_secs_f64(1.0 / 60.0);

            next_frame_time = now + frame_duration;
            if next_frame_time < Instant::now() {
                // Skip a frame (or several).
                next_frame_time = Instant::now() + frame_duration;
            }
            *control_flow = ControlFlow::WaitUntil(next_frame_time);

            for ev in events_buffer.drain(..) {
                let event = match ev {
                    Event::WindowEvent { event, .. } => event,
                    _ => continue,
                };
                match event {
                    // Handle window close event.
                    WindowEvent::CloseRequested => *control_flow = ControlFlow::Exit,

                    // Handle window resize.
                    WindowEvent::Resized(size) => {
                        element.borrow_mut().layout_mut().viewport =
                            Vector2::new(size.width as f64, size.height as f64);
                    }

                    // Handle cursor events.
                    WindowEvent::CursorMoved { position, .. } => {
                        let ev = mouse.cursor_moved(Point2::new(position.x, position.y));
                        dispatcher.dispatch(PointerPhase::Move, &ev);
                    }

                    // Handle mouse click.
                    WindowEvent::MouseInput { state, button, .. } => {
                        if let Some((phase, ev)) = mouse.mouse_input(state, button) {
                            dispatcher.dispatch(phase, &ev);
                        }
                    }

                    _ => (),
                }
            }

            // Advance the recovery animation.
            let (layout, translate) = {
                let mut d = element.borrow_mut();
                d.frame(now);
                (*d.layout(), d.translate())
            };

            // Draw everything.
            let mut target = display.draw();
            render::draw_box(&mut target, &layout, translate, *rotation.borrow());
            target.finish().expect("Failed to swap buffers");
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use draggable::DragState;

    #[test]
    fn test_release_outside_window_ends_drag() {
        let layout = WindowLayout::new(Vector2::new(800.0, 600.0), ELEMENT_SIZE);
        let config = DraggableConfig::new().recover_on_drop(true);
        let element = Rc::new(RefCell::new(Draggable::new(layout, config)));
        let dispatcher = PointerDispatcher::new();
        let _mount = Draggable::mount(&element, &dispatcher);

        let mut mouse = MouseTracker::default();
        let ev = mouse.cursor_moved(Point2::new(400.0, 300.0));
        dispatcher.dispatch(PointerPhase::Move, &ev);
        let (phase, ev) = mouse
            .mouse_input(ElementState::Pressed, MouseButton::Left)
            .unwrap();
        dispatcher.dispatch(phase, &ev);
        assert_eq!(element.borrow().state(), DragState::Dragging);

        // The last event before leaving the window.
        let ev = mouse.cursor_moved(Point2::new(799.0, 300.0));
        dispatcher.dispatch(PointerPhase::Move, &ev);

        let (phase, ev) = mouse
            .mouse_input(ElementState::Released, MouseButton::Left)
            .unwrap();
        assert_eq!(phase, PointerPhase::Up);
        assert_eq!(ev.position, Point2::new(799.0, 300.0));
        dispatcher.dispatch(phase, &ev);
        assert_eq!(element.borrow().state(), DragState::Recovering);

        // Moving back in no longer drags the box.
        let translate = element.borrow().translate();
        let ev = mouse.cursor_moved(Point2::new(100.0, 100.0));
        dispatcher.dispatch(PointerPhase::Move, &ev);
        assert_eq!(element.borrow().translate(), translate);
    }

    #[test]
    fn test_only_left_button_with_known_position() {
        let mut mouse = MouseTracker::default();
        assert!(mouse
            .mouse_input(ElementState::Pressed, MouseButton::Left)
            .is_none());
        mouse.cursor_moved(Point2::new(5.0, 6.0));
        assert!(mouse
            .mouse_input(ElementState::Pressed, MouseButton::Right)
            .is_none());
        let (phase, ev) = mouse
            .mouse_input(ElementState::Pressed, MouseButton::Left)
            .unwrap();
        assert_eq!(phase, PointerPhase::Down);
        assert_eq!(ev.button, Some(MouseButton::Left));
    }
}
