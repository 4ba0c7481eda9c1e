// Splitter gesture handling.
// One state machine per divider: pointer-down on the divider starts a drag,
// document-level moves report signed main-axis deltas, pointer-up ends it.

mod capture;

use serde::{Deserialize, Serialize};

use sash_core::{Axis, InputEvent, MouseButton, PointerKind};

pub use capture::{Document, DocumentCapture, SharedDocument};

// ──────────────────────────────────────────────
// Settings and notifications
// ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SplitterSettings {
    /// Thickness of the divider's hit area in pixels.
    #[serde(default = "default_hit_size")]
    pub hit_size: f32,
    /// Two touch starts this close together count as a double tap.
    #[serde(default = "default_double_tap_ms")]
    pub double_tap_ms: u64,
}

fn default_hit_size() -> f32 {
    8.0
}

fn default_double_tap_ms() -> u64 {
    300
}

impl Default for SplitterSettings {
    fn default() -> Self {
        Self {
            hit_size: default_hit_size(),
            double_tap_ms: default_double_tap_ms(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SplitterEvent {
    /// First movement of a drag.
    Start,
    /// Signed delta since the previous move, and the pointer's main-axis
    /// coordinate.
    Move { distance: f32, position: f32 },
    /// Drag finished. Only sent if `Start` was.
    End,
    /// Double click or double tap.
    Reset,
}

/// Notifications produced by one input event, plus what the host should do
/// with the originating event.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Response {
    pub events: Vec<SplitterEvent>,
    pub prevent_default: bool,
    pub stop_propagation: bool,
}

impl Response {
    pub fn none() -> Self {
        Self::default()
    }

    fn prevented(events: Vec<SplitterEvent>) -> Self {
        Self {
            events,
            prevent_default: true,
            stop_propagation: false,
        }
    }
}

// ──────────────────────────────────────────────
// Splitter
// ──────────────────────────────────────────────

struct DragSession {
    last: f32,
    started: bool,
    _capture: DocumentCapture,
}

enum State {
    Idle,
    Dragging(DragSession),
}

pub struct Splitter {
    axis: Axis,
    document: SharedDocument,
    settings: SplitterSettings,
    state: State,
    last_tap_ms: Option<u64>,
}

impl Splitter {
    pub fn new(axis: Axis, document: SharedDocument, settings: SplitterSettings) -> Self {
        Self {
            axis,
            document,
            settings,
            state: State::Idle,
            last_tap_ms: None,
        }
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, State::Dragging(_))
    }

    /// True once the current drag has moved.
    pub fn has_started(&self) -> bool {
        matches!(self.state, State::Dragging(DragSession { started: true, .. }))
    }

    /// Feed one event. `PointerDown` and `DoubleClick` must already be
    /// targeted at this splitter; moves and ups are document-wide.
    pub fn handle(&mut self, event: InputEvent) -> Response {
        match event {
            InputEvent::PointerDown {
                position,
                pointer,
                time_ms,
            } => self.pointer_down(self.axis.main(position), pointer, time_ms),
            InputEvent::PointerMove { position } => self.pointer_move(self.axis.main(position)),
            InputEvent::PointerUp { .. } | InputEvent::PointerCancel => match self.release() {
                Some(events) => Response {
                    events,
                    prevent_default: false,
                    stop_propagation: true,
                },
                None => Response::none(),
            },
            InputEvent::DoubleClick { .. } => {
                if self.is_dragging() {
                    return Response::none();
                }
                Response::prevented(vec![SplitterEvent::Reset])
            }
            InputEvent::Resize { .. } => Response::none(),
        }
    }

    /// End the current drag as if the pointer was released.
    pub fn cancel(&mut self) -> Vec<SplitterEvent> {
        self.release().unwrap_or_default()
    }

    fn pointer_down(&mut self, position: f32, pointer: PointerKind, time_ms: u64) -> Response {
        if self.is_dragging() {
            return Response::none();
        }

        match pointer {
            PointerKind::Mouse(MouseButton::Left) => {}
            PointerKind::Mouse(_) => return Response::none(),
            PointerKind::Touch => {
                if let Some(prev) = self.last_tap_ms {
                    if time_ms.saturating_sub(prev) <= self.settings.double_tap_ms {
                        self.last_tap_ms = None;
                        return Response::prevented(vec![SplitterEvent::Reset]);
                    }
                }
                self.last_tap_ms = Some(time_ms);
            }
        }

        let capture = match DocumentCapture::acquire(&self.document, self.axis.resize_cursor()) {
            Ok(capture) => capture,
            Err(e) => {
                log::debug!("splitter ignored pointer down: {}", e);
                return Response::none();
            }
        };

        self.state = State::Dragging(DragSession {
            last: position,
            started: false,
            _capture: capture,
        });
        Response::prevented(Vec::new())
    }

    fn pointer_move(&mut self, position: f32) -> Response {
        let State::Dragging(session) = &mut self.state else {
            return Response::none();
        };

        let mut events = Vec::with_capacity(2);
        if !session.started {
            session.started = true;
            events.push(SplitterEvent::Start);
            self.last_tap_ms = None;
        }
        let distance = position - session.last;
        session.last = position;
        events.push(SplitterEvent::Move { distance, position });
        Response::prevented(events)
    }

    /// Leave the dragging state. The capture is dropped here, which restores
    /// the cursor and removes the document listeners. `None` if idle.
    fn release(&mut self) -> Option<Vec<SplitterEvent>> {
        match std::mem::replace(&mut self.state, State::Idle) {
            State::Dragging(session) if session.started => Some(vec![SplitterEvent::End]),
            State::Dragging(_) => Some(Vec::new()),
            State::Idle => None,
        }
    }
}
