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

//! The floating overlay: a small draggable control that keeps working while
//! the main screen is elsewhere.
//!
//! Runs as its own process (`stepcopy --overlay`) sharing only the persisted
//! store with the main screen. Tap copies the current line and advances;
//! drag moves the control; long-press opens a popup menu with previous /
//! hide / disable actions.

pub mod gesture;
pub mod host;
pub mod popup;
pub mod service;
pub mod surface;

pub use gesture::{GestureClassifier, GestureConfig, GestureIntent, PointerEvent};
pub use host::{Haptics, HostError, OverlayHost, ViewFrame, ViewId};
pub use popup::{PopupController, PopupPhase};
pub use service::{FloatLabel, OverlayConfig, OverlayService, PopupAction, POLL_INTERVAL};
