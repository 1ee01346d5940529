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

use crate::clipboard::ClipboardSink;
use crate::lines::LineCursor;
use crate::store::{PrefWriter, Prefs};
use std::time::{Duration, Instant};

use super::input::InputState;

/// How long a flash message stays in the status area.
pub const FLASH_TTL: Duration = Duration::from_secs(2);

/// How often the main screen re-reads the store to converge on overlay
/// navigation. Same bound as the overlay's own poll.
pub const SYNC_INTERVAL: Duration = Duration::from_millis(500);

/// Which body the main surface shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Paste area, waiting for confirm.
    Compose,
    /// Confirmed lines, stepping and copying.
    Stepping,
}

/// Transient feedback line (the Toast equivalent).
#[derive(Debug)]
pub struct Flash {
    pub text: String,
    shown_at: Instant,
}

/// Copy-by-number dialog: digits typed so far.
#[derive(Debug, Default)]
pub struct JumpDialog {
    pub digits: String,
}

pub struct App {
    pub input: InputState,
    pub cursor: LineCursor,
    pub screen: Screen,
    pub jump: Option<JumpDialog>,
    pub flash: Option<Flash>,
    pub floating_enabled: bool,
    pub dark_mode: bool,
    pub should_quit: bool,
    /// Index persisted by a previous run, adopted at confirm when still in
    /// range so a restart resumes where the user left off.
    pub saved_index_at_start: Option<usize>,
    pub prefs: Prefs,
    pub writer: PrefWriter,
    pub clipboard: Box<dyn ClipboardSink>,
}

impl App {
    pub fn new(prefs: Prefs, writer: PrefWriter, clipboard: Box<dyn ClipboardSink>) -> Self {
        Self {
            input: InputState::new(),
            cursor: LineCursor::new(),
            screen: Screen::Compose,
            jump: None,
            flash: None,
            floating_enabled: false,
            dark_mode: false,
            should_quit: false,
            saved_index_at_start: None,
            prefs,
            writer,
            clipboard,
        }
    }

    /// Minimal app over an in-memory store. Must run inside a `LocalSet`
    /// (the pref writer spawns a local task).
    #[must_use]
    pub fn test_default() -> Self {
        let prefs = Prefs::in_memory();
        let writer = PrefWriter::spawn(prefs.clone());
        Self::new(prefs, writer, Box::new(crate::clipboard::RecordingClipboard::default()))
    }

    /// Adopt previously persisted state: raw input, lines, index, flags.
    /// Called once before the first frame.
    pub async fn restore(&mut self) {
        self.floating_enabled = self.prefs.floating_enabled().await;
        self.dark_mode = self.prefs.dark_mode().await;

        let saved_index = self.prefs.current_index().await;
        self.saved_index_at_start = Some(saved_index);

        let raw = self.prefs.raw_input().await;
        if raw.is_empty() {
            return;
        }
        self.input.insert_text(&raw);
        self.cursor.load(&raw);
        if self.cursor.is_empty() {
            return;
        }
        self.cursor.restore_index(saved_index);
        self.screen = Screen::Stepping;
    }

    /// Converge on foreign writes: the overlay advances the index and can
    /// disable itself. Pending local writes are flushed first so a stale
    /// read can never roll the cursor back.
    pub async fn sync_from_store(&mut self) {
        self.writer.flush().await;
        self.floating_enabled = self.prefs.floating_enabled().await;
        if self.screen == Screen::Stepping {
            let index = self.prefs.current_index().await;
            self.cursor.restore_index(index);
        }
    }

    pub fn show_flash(&mut self, text: impl Into<String>, now: Instant) {
        self.flash = Some(Flash { text: text.into(), shown_at: now });
    }

    pub fn expire_flash(&mut self, now: Instant) {
        if self.flash.as_ref().is_some_and(|f| now.duration_since(f.shown_at) >= FLASH_TTL) {
            self.flash = None;
        }
    }
}
