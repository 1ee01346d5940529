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

//! Clipboard sink. Fire-and-forget: a missing or broken system clipboard is
//! logged and ignored, never surfaced as an error.

/// Write-only clipboard seam so the state machines stay testable.
pub trait ClipboardSink {
    fn set_text(&mut self, text: &str);
}

/// System clipboard via arboard. The handle is created per write -- keeping
/// one open pins the X11 selection owner for the process lifetime.
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl ClipboardSink for SystemClipboard {
    fn set_text(&mut self, text: &str) {
        match arboard::Clipboard::new() {
            Ok(mut clipboard) => {
                if let Err(err) = clipboard.set_text(text.to_owned()) {
                    tracing::debug!("clipboard write failed: {err}");
                }
            }
            Err(err) => tracing::debug!("clipboard unavailable: {err}"),
        }
    }
}

/// Test sink recording every write.
#[derive(Debug, Default)]
pub struct RecordingClipboard {
    pub writes: Vec<String>,
}

impl ClipboardSink for RecordingClipboard {
    fn set_text(&mut self, text: &str) {
        self.writes.push(text.to_owned());
    }
}
