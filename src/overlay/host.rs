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

//! Seams between the overlay state machines and whatever actually draws them.
//!
//! Attach/update/detach may fail once the surface is torn down; callers treat
//! that as non-fatal -- logged, state machine forced to its closed state.

/// The two views a floating session can attach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewId {
    Anchor,
    Popup,
}

/// Layout of one attached view, in surface units (pixels or cells).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewFrame {
    pub x: i32,
    pub y: i32,
    pub width: u16,
    pub height: u16,
}

impl ViewFrame {
    #[must_use]
    pub fn new(x: i32, y: i32, width: u16, height: u16) -> Self {
        Self { x, y, width, height }
    }

    /// Whether a surface coordinate falls inside this frame.
    #[must_use]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x
            && x < self.x + i32::from(self.width)
            && y >= self.y
            && y < self.y + i32::from(self.height)
    }

    /// Y coordinate just below the frame -- where the popup anchors.
    #[must_use]
    pub fn bottom(&self) -> i32 {
        self.y + i32::from(self.height)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HostError {
    #[error("overlay surface is gone")]
    SurfaceGone,
    #[error("view is not attached")]
    NotAttached,
    #[error("view is already attached")]
    AlreadyAttached,
}

/// Display surface the floating views live on.
pub trait OverlayHost {
    fn attach(&mut self, view: ViewId, frame: ViewFrame) -> Result<(), HostError>;
    fn update(&mut self, view: ViewId, frame: ViewFrame) -> Result<(), HostError>;
    fn detach(&mut self, view: ViewId) -> Result<(), HostError>;
}

/// Best-effort physical feedback. Implementations swallow permission or
/// environment failures; there is no error path.
pub trait Haptics {
    fn pulse(&mut self);
}

/// No-op haptics for hosts without any feedback channel.
#[derive(Debug, Default)]
pub struct NoHaptics;

impl Haptics for NoHaptics {
    fn pulse(&mut self) {}
}
