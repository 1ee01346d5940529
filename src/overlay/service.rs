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

//! The floating session: one anchor view, one popup, one gesture stream.
//!
//! Owns all mutable overlay state for the lifetime of an explicit
//! start/stop pair. The persisted store is the source of truth for lines and
//! index -- the main screen may move the cursor at any time, and this side
//! converges through a fixed-interval poll. Pointer handlers never block:
//! store writes go through the ordered writer queue.

use crate::clipboard::ClipboardSink;
use crate::overlay::gesture::{GestureClassifier, GestureConfig, GestureIntent, PointerEvent};
use crate::overlay::host::{Haptics, OverlayHost, ViewFrame, ViewId};
use crate::overlay::popup::{PopupController, PopupPhase};
use crate::store::{PrefWrite, PrefWriter, Prefs};
use std::time::{Duration, Instant};

/// How often the overlay re-reads the persisted lines and index. Convergence
/// with the main screen is eventual, bounded by this interval.
pub const POLL_INTERVAL: Duration = Duration::from_millis(500);

/// How long a transient notice stays on screen.
const NOTICE_TTL: Duration = Duration::from_secs(2);

/// What the floating button shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FloatLabel {
    /// No confirmed lines in the store.
    Empty,
    /// 1-based number of the line the next tap will copy.
    Number(usize),
    /// Every line has been copied (or the persisted index ran past the end).
    Done,
}

/// Items inside the popup menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupAction {
    Previous,
    HideMenu,
    DisableFloating,
}

/// Geometry and gesture tuning for the surface the session runs on.
#[derive(Debug, Clone, Copy)]
pub struct OverlayConfig {
    pub anchor_start: (i32, i32),
    pub anchor_size: (u16, u16),
    pub popup_size: (u16, u16),
    pub popup_gap: i32,
    pub gesture: GestureConfig,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            anchor_start: (100, 300),
            anchor_size: (48, 48),
            popup_size: (140, 96),
            popup_gap: 10,
            gesture: GestureConfig::default(),
        }
    }
}

#[derive(Debug)]
struct Notice {
    text: String,
    shown_at: Instant,
}

pub struct OverlayService<H: OverlayHost, C: ClipboardSink, V: Haptics> {
    prefs: Prefs,
    writer: PrefWriter,
    host: H,
    clipboard: C,
    haptics: V,
    gesture: GestureClassifier,
    popup: PopupController,
    anchor: ViewFrame,
    anchor_attached: bool,
    label: FloatLabel,
    /// `(index, len)` observed when the final line was copied; cleared as
    /// soon as a poll sees anything else, so an external retreat revives the
    /// number display.
    finished: Option<(usize, usize)>,
    notice: Option<Notice>,
    stop_requested: bool,
}

impl<H: OverlayHost, C: ClipboardSink, V: Haptics> OverlayService<H, C, V> {
    pub fn new(
        prefs: Prefs,
        writer: PrefWriter,
        host: H,
        clipboard: C,
        haptics: V,
        config: OverlayConfig,
    ) -> Self {
        let (x, y) = config.anchor_start;
        let (w, h) = config.anchor_size;
        Self {
            prefs,
            writer,
            host,
            clipboard,
            haptics,
            gesture: GestureClassifier::new(config.gesture),
            popup: PopupController::new(config.popup_size, config.popup_gap),
            anchor: ViewFrame::new(x, y, w, h),
            anchor_attached: false,
            label: FloatLabel::Empty,
            finished: None,
            notice: None,
            stop_requested: false,
        }
    }

    /// Attach the anchor and restore the persisted position label. An
    /// unavailable surface is logged, not fatal -- the control silently does
    /// nothing until restarted.
    pub async fn start(&mut self) {
        match self.host.attach(ViewId::Anchor, self.anchor) {
            Ok(()) => self.anchor_attached = true,
            Err(err) => tracing::warn!("anchor attach failed: {err}"),
        }
        self.poll().await;
    }

    /// Teardown, in order: drain queued writes, remove attached views,
    /// persist the disabled flag. The caller has already stopped feeding the
    /// poll and pointer streams, so nothing fires after this returns.
    pub async fn stop(&mut self) {
        self.writer.flush().await;
        self.popup.force_close(&mut self.host);
        if self.anchor_attached {
            if let Err(err) = self.host.detach(ViewId::Anchor) {
                tracing::warn!("anchor detach failed: {err}");
            }
            self.anchor_attached = false;
        }
        if let Err(err) = self.prefs.save_floating_enabled(false).await {
            tracing::warn!("failed to persist disabled flag: {err}");
        }
    }

    /// Feed one raw pointer event aimed at the anchor.
    pub async fn handle_pointer(&mut self, event: PointerEvent, now: Instant) {
        if let Some(intent) = self.gesture.on_event(event, self.anchor, now) {
            self.dispatch(intent, now).await;
        }
    }

    /// Resolve a due long-press deadline.
    pub async fn handle_long_press_due(&mut self, now: Instant) {
        if let Some(intent) = self.gesture.on_long_press_deadline(now) {
            self.dispatch(intent, now).await;
        }
    }

    async fn dispatch(&mut self, intent: GestureIntent, now: Instant) {
        match intent {
            GestureIntent::Reposition { x, y } => {
                self.anchor.x = x;
                self.anchor.y = y;
                if self.anchor_attached {
                    if let Err(err) = self.host.update(ViewId::Anchor, self.anchor) {
                        tracing::warn!("anchor reposition failed: {err}");
                    }
                }
                // keep an open menu glued to the moving anchor
                self.popup.reposition(self.anchor.x, self.anchor.bottom(), &mut self.host);
            }
            GestureIntent::Tap => self.tap(now).await,
            GestureIntent::LongPress { x, y } => {
                if matches!(self.popup.phase(), PopupPhase::Opening | PopupPhase::Open) {
                    self.popup.close(now);
                } else {
                    self.popup.open(x, y, &mut self.host, &mut self.haptics, now);
                }
            }
        }
    }

    /// Tap: copy the current line, then advance the persisted index.
    async fn tap(&mut self, now: Instant) {
        let lines = self.prefs.saved_lines().await;
        let index = self.prefs.current_index().await;
        if lines.is_empty() {
            self.set_notice("no lines loaded", now);
            self.label = FloatLabel::Empty;
            return;
        }
        if index >= lines.len() {
            // stale index from a shrunken line set
            self.label = FloatLabel::Done;
            return;
        }

        self.clipboard.set_text(&lines[index]);
        let next = (index + 1).min(lines.len() - 1);
        if next != index {
            self.set_notice(format!("copied line {}", index + 1), now);
            self.writer.send(PrefWrite::Index(next));
            self.apply_observation(lines.len(), next);
        } else {
            self.set_notice("all lines copied", now);
            self.finished = Some((index, lines.len()));
            self.label = FloatLabel::Done;
        }
    }

    /// One popup menu action. The popup background itself never reaches
    /// here -- outside taps and background presses are dropped by the
    /// surface, by design the menu only closes explicitly.
    pub async fn handle_popup_action(&mut self, action: PopupAction, now: Instant) {
        match action {
            PopupAction::Previous => {
                let lines = self.prefs.saved_lines().await;
                let index = self.prefs.current_index().await;
                if index > 0 && !lines.is_empty() {
                    let prev = index - 1;
                    self.writer.send(PrefWrite::Index(prev));
                    if let Some(line) = lines.get(prev) {
                        self.clipboard.set_text(line);
                    }
                    self.set_notice(format!("copied line {}", prev + 1), now);
                    self.apply_observation(lines.len(), prev);
                } else {
                    self.set_notice("at the start of the list", now);
                }
            }
            PopupAction::HideMenu => self.popup.close(now),
            PopupAction::DisableFloating => {
                self.popup.close(now);
                self.stop_requested = true;
            }
        }
    }

    /// Periodic store refresh; also notices when the main screen disabled
    /// the floating control.
    pub async fn poll(&mut self) {
        // Drain our own queued writes first. A poll racing a just-tapped
        // navigation would otherwise read the pre-tap index and roll the
        // label back.
        self.writer.flush().await;
        if !self.prefs.floating_enabled().await {
            self.stop_requested = true;
            return;
        }
        let lines = self.prefs.saved_lines().await;
        let index = self.prefs.current_index().await;
        self.apply_observation(lines.len(), index);
    }

    /// Single label path for both the direct post-navigation update and the
    /// periodic poll, so the two cannot disagree.
    fn apply_observation(&mut self, len: usize, index: usize) {
        if let Some(latch) = self.finished {
            if latch != (index, len) {
                self.finished = None;
            }
        }
        self.label = label_for(len, index, self.finished.is_some());
    }

    /// Advance animations and expire the notice.
    pub fn tick(&mut self, now: Instant) {
        self.popup.tick(&mut self.host, now);
        if self.notice.as_ref().is_some_and(|n| now.duration_since(n.shown_at) >= NOTICE_TTL) {
            self.notice = None;
        }
    }

    fn set_notice(&mut self, text: impl Into<String>, now: Instant) {
        self.notice = Some(Notice { text: text.into(), shown_at: now });
    }

    // --- view accessors for the surface loop and renderer ---

    #[must_use]
    pub fn anchor_frame(&self) -> ViewFrame {
        self.anchor
    }

    #[must_use]
    pub fn popup_frame(&self) -> Option<ViewFrame> {
        self.popup.frame()
    }

    #[must_use]
    pub fn popup_phase(&self) -> PopupPhase {
        self.popup.phase()
    }

    #[must_use]
    pub fn label(&self) -> FloatLabel {
        self.label
    }

    #[must_use]
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_ref().map(|n| n.text.as_str())
    }

    #[must_use]
    pub fn long_press_deadline(&self) -> Option<Instant> {
        self.gesture.long_press_deadline()
    }

    #[must_use]
    pub fn stop_requested(&self) -> bool {
        self.stop_requested
    }

    /// Ask the owning loop to wind the service down (explicit quit key).
    pub fn request_stop(&mut self) {
        self.stop_requested = true;
    }

    #[must_use]
    pub fn pointer_session_active(&self) -> bool {
        self.gesture.session_active()
    }

    /// Render snapshot, so the view layer needs no access to the service
    /// generics.
    #[must_use]
    pub fn view_model(&self, now: Instant) -> OverlayViewModel {
        OverlayViewModel {
            anchor: self.anchor,
            label: self.label,
            popup: self.popup.frame().map(|frame| (frame, self.popup.scale(now))),
            notice: self.notice.as_ref().map(|n| n.text.clone()),
        }
    }
}

/// Everything the overlay renderer draws in one frame.
#[derive(Debug, Clone)]
pub struct OverlayViewModel {
    pub anchor: ViewFrame,
    pub label: FloatLabel,
    /// Popup layout plus its animated scale, when not CLOSED.
    pub popup: Option<(ViewFrame, f32)>,
    pub notice: Option<String>,
}

fn label_for(len: usize, index: usize, finished: bool) -> FloatLabel {
    if len == 0 {
        FloatLabel::Empty
    } else if finished || index >= len {
        FloatLabel::Done
    } else {
        FloatLabel::Number(index + 1)
    }
}
