// stepcopy -- step-through clipboard assistant for the terminal
// Copyright (C) 2026  stepcopy contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Pointer gesture classification for the floating anchor.
//!
//! One pointer session runs from down to up/cancel and resolves into exactly
//! one of three intents: a drag (stream of repositions), a long-press, or a
//! tap. Movement beats long-press -- any qualifying move before the deadline
//! permanently disarms it for the session. The long-press deadline is exposed
//! as a plain `Instant` so the owning event loop can sleep on it; clearing
//! the session clears the deadline, which makes cancellation synchronous and
//! idempotent and means a deadline can never fire for a dead session.

use crate::overlay::host::ViewFrame;
use std::time::{Duration, Instant};

/// Displacement (either axis, in pointer units) beyond which a session
/// becomes a drag.
const MOVE_THRESHOLD: f32 = 10.0;

/// How long the pointer must stay down, without qualifying movement, to
/// count as a long-press. Wall clock, measured from pointer-down.
const LONG_PRESS_DELAY: Duration = Duration::from_millis(500);

/// Thresholds share the unit of the raw pointer coordinates, so a surface
/// with coarser units (terminal cells vs. pixels) scales them down.
#[derive(Debug, Clone, Copy)]
pub struct GestureConfig {
    pub move_threshold: f32,
    pub long_press_delay: Duration,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self { move_threshold: MOVE_THRESHOLD, long_press_delay: LONG_PRESS_DELAY }
    }
}

/// Raw pointer event, surface units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down { x: f32, y: f32 },
    Move { x: f32, y: f32 },
    Up { x: f32, y: f32 },
    Cancel,
}

/// Classified intent emitted by the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureIntent {
    /// Quick press with no qualifying movement and no long-press.
    Tap,
    /// Drag: new anchor layout position (anchor start plus pointer delta).
    Reposition { x: i32, y: i32 },
    /// Pointer held still past the delay; position is the anchor's
    /// bottom-left corner, where the popup opens.
    LongPress { x: i32, y: i32 },
}

/// Per-session state, created on pointer-down and destroyed on up/cancel.
#[derive(Debug, Clone, Copy)]
struct Session {
    start_x: f32,
    start_y: f32,
    started_at: Instant,
    /// Anchor layout at pointer-down; drags reposition relative to this.
    anchor: ViewFrame,
    moved: bool,
    long_press_fired: bool,
}

/// State machine: `IDLE → DOWN → (MOVING | LONGPRESS_FIRED) → IDLE`.
#[derive(Debug)]
pub struct GestureClassifier {
    config: GestureConfig,
    session: Option<Session>,
}

impl GestureClassifier {
    #[must_use]
    pub fn new(config: GestureConfig) -> Self {
        Self { config, session: None }
    }

    /// Feed one raw pointer event. `anchor` is the anchor's current layout,
    /// snapshotted at pointer-down. Returns at most one intent; drag moves
    /// emit one `Reposition` each.
    pub fn on_event(
        &mut self,
        event: PointerEvent,
        anchor: ViewFrame,
        now: Instant,
    ) -> Option<GestureIntent> {
        match event {
            PointerEvent::Down { x, y } => {
                self.session = Some(Session {
                    start_x: x,
                    start_y: y,
                    started_at: now,
                    anchor,
                    moved: false,
                    long_press_fired: false,
                });
                None
            }
            PointerEvent::Move { x, y } => {
                let session = self.session.as_mut()?;
                let dx = x - session.start_x;
                let dy = y - session.start_y;
                if dx.abs() > self.config.move_threshold || dy.abs() > self.config.move_threshold {
                    // Movement wins: long-press stays disarmed for the rest
                    // of the session (the deadline getter checks `moved`).
                    session.moved = true;
                    return Some(GestureIntent::Reposition {
                        x: session.anchor.x + dx as i32,
                        y: session.anchor.y + dy as i32,
                    });
                }
                None
            }
            PointerEvent::Up { x, y } => {
                let session = self.session.take()?;
                let dx = (x - session.start_x).abs();
                let dy = (y - session.start_y).abs();
                if !session.moved
                    && !session.long_press_fired
                    && dx < self.config.move_threshold
                    && dy < self.config.move_threshold
                {
                    return Some(GestureIntent::Tap);
                }
                // Drag end is silent: position was committed by the
                // reposition stream. A consumed long-press stays consumed.
                None
            }
            PointerEvent::Cancel => {
                self.session = None;
                None
            }
        }
    }

    /// When the pending long-press fires, if one is armed. `None` whenever
    /// there is no session, the session moved, or it already fired.
    #[must_use]
    pub fn long_press_deadline(&self) -> Option<Instant> {
        let session = self.session.as_ref()?;
        if session.moved || session.long_press_fired {
            return None;
        }
        Some(session.started_at + self.config.long_press_delay)
    }

    /// Resolve the long-press deadline. Emits `LongPress` exactly once per
    /// session, and only if the deadline has actually passed and movement
    /// never disarmed it.
    pub fn on_long_press_deadline(&mut self, now: Instant) -> Option<GestureIntent> {
        let deadline = self.long_press_deadline()?;
        if now < deadline {
            return None;
        }
        let session = self.session.as_mut()?;
        session.long_press_fired = true;
        Some(GestureIntent::LongPress { x: session.anchor.x, y: session.anchor.bottom() })
    }

    /// Whether a pointer session is in flight (down seen, no up/cancel yet).
    #[must_use]
    pub fn session_active(&self) -> bool {
        self.session.is_some()
    }
}
