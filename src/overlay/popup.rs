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

//! Popup menu state machine: `CLOSED → OPENING → OPEN → CLOSING → CLOSED`.
//!
//! OPENING and CLOSING are explicit states rather than boolean flags so that
//! illegal transitions (`open()` while already OPEN) are rejected calls, not
//! undefined behavior. Transitions are time-driven: the controller records
//! when the phase was entered and `tick()` resolves completion; `scale()`
//! yields the eased animated value the renderer draws from.
//!
//! Any host surface failure (attach/update/detach on a torn-down surface) is
//! caught here, logged, and forces the controller to CLOSED -- it is never
//! left dangling mid-animation.

use crate::overlay::host::{Haptics, OverlayHost, ViewFrame, ViewId};
use std::time::{Duration, Instant};

/// Appearance animation, zero scale/opacity to full.
pub const OPEN_ANIMATION: Duration = Duration::from_millis(300);

/// Disappearance animation, reversed.
pub const CLOSE_ANIMATION: Duration = Duration::from_millis(200);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupPhase {
    Closed,
    Opening,
    Open,
    Closing,
}

#[derive(Debug)]
pub struct PopupController {
    phase: PopupPhase,
    frame: ViewFrame,
    size: (u16, u16),
    /// Gap between the anchor's bottom edge and the popup, surface units.
    gap: i32,
    /// First `open()` lazily constructs the view.
    built: bool,
    phase_entered: Instant,
    /// Animated value at the moment a close pre-empted an open, so the
    /// reverse animation starts from where the open animation was.
    close_from: f32,
}

impl PopupController {
    #[must_use]
    pub fn new(size: (u16, u16), gap: i32) -> Self {
        Self {
            phase: PopupPhase::Closed,
            frame: ViewFrame::new(0, 0, size.0, size.1),
            size,
            gap,
            built: false,
            phase_entered: Instant::now(),
            close_from: 1.0,
        }
    }

    #[must_use]
    pub fn phase(&self) -> PopupPhase {
        self.phase
    }

    /// Layout of the attached popup view; `None` while CLOSED.
    #[must_use]
    pub fn frame(&self) -> Option<ViewFrame> {
        (self.phase != PopupPhase::Closed).then_some(self.frame)
    }

    /// Open below the anchor: `(x, y + gap)`. Valid only from CLOSED; any
    /// other phase rejects the call. Returns whether opening began.
    pub fn open(
        &mut self,
        x: i32,
        y: i32,
        host: &mut dyn OverlayHost,
        haptics: &mut dyn Haptics,
        now: Instant,
    ) -> bool {
        if self.phase != PopupPhase::Closed {
            tracing::debug!(phase = ?self.phase, "popup open rejected");
            return false;
        }
        if !self.built {
            tracing::debug!("building popup view");
            self.built = true;
        }
        haptics.pulse();
        self.frame = ViewFrame::new(x, y + self.gap, self.size.0, self.size.1);
        if let Err(err) = host.attach(ViewId::Popup, self.frame) {
            tracing::warn!("popup attach failed: {err}");
            self.phase = PopupPhase::Closed;
            return false;
        }
        self.phase = PopupPhase::Opening;
        self.phase_entered = now;
        true
    }

    /// Track the anchor while it is dragged. Immediate, no animation. Valid
    /// only while OPENING or OPEN; ignored otherwise.
    pub fn reposition(&mut self, x: i32, y: i32, host: &mut dyn OverlayHost) {
        if !matches!(self.phase, PopupPhase::Opening | PopupPhase::Open) {
            return;
        }
        self.frame.x = x;
        self.frame.y = y + self.gap;
        if let Err(err) = host.update(ViewId::Popup, self.frame) {
            tracing::warn!("popup reposition failed: {err}");
            self.phase = PopupPhase::Closed;
        }
    }

    /// Begin the reverse animation. Valid from OPEN, or from OPENING -- which
    /// it pre-empts from the current animated value. A second `close()`
    /// while CLOSING or CLOSED is a no-op.
    pub fn close(&mut self, now: Instant) {
        match self.phase {
            PopupPhase::Open => self.close_from = 1.0,
            PopupPhase::Opening => self.close_from = self.scale(now),
            PopupPhase::Closing | PopupPhase::Closed => return,
        }
        self.phase = PopupPhase::Closing;
        self.phase_entered = now;
    }

    /// Detach immediately, skipping the animation. Used at service teardown.
    pub fn force_close(&mut self, host: &mut dyn OverlayHost) {
        if self.phase == PopupPhase::Closed {
            return;
        }
        if let Err(err) = host.detach(ViewId::Popup) {
            tracing::warn!("popup detach failed: {err}");
        }
        self.phase = PopupPhase::Closed;
    }

    /// Resolve timed transitions: OPENING completes to OPEN after 300 ms,
    /// CLOSING detaches the view and lands in CLOSED after 200 ms.
    pub fn tick(&mut self, host: &mut dyn OverlayHost, now: Instant) {
        match self.phase {
            PopupPhase::Opening => {
                if now.duration_since(self.phase_entered) >= OPEN_ANIMATION {
                    self.phase = PopupPhase::Open;
                }
            }
            PopupPhase::Closing => {
                if now.duration_since(self.phase_entered) >= CLOSE_ANIMATION {
                    if let Err(err) = host.detach(ViewId::Popup) {
                        tracing::warn!("popup detach failed: {err}");
                    }
                    self.phase = PopupPhase::Closed;
                }
            }
            PopupPhase::Closed | PopupPhase::Open => {}
        }
    }

    /// Eased scale/opacity in `[0,1]` at `now`.
    #[must_use]
    pub fn scale(&self, now: Instant) -> f32 {
        match self.phase {
            PopupPhase::Closed => 0.0,
            PopupPhase::Open => 1.0,
            PopupPhase::Opening => {
                let t = now.duration_since(self.phase_entered).as_secs_f32()
                    / OPEN_ANIMATION.as_secs_f32();
                ease_in_out(t.min(1.0))
            }
            PopupPhase::Closing => {
                let t = now.duration_since(self.phase_entered).as_secs_f32()
                    / CLOSE_ANIMATION.as_secs_f32();
                self.close_from * (1.0 - ease_in_out(t.min(1.0)))
            }
        }
    }
}

/// Accelerate-decelerate curve: slow at both ends, fastest in the middle.
fn ease_in_out(t: f32) -> f32 {
    0.5 - 0.5 * (std::f32::consts::PI * t).cos()
}
