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

//! Terminal surface for the overlay process: wires crossterm mouse events
//! into the gesture classifier and draws the floating views with ratatui.
//!
//! The select loop is the service's single thread of control -- pointer
//! events, the long-press deadline, the 500 ms store poll, and the animation
//! frame tick all land here, and teardown is one loop exit (which is what
//! cancels the poll, exactly once).

use crate::clipboard::SystemClipboard;
use crate::overlay::gesture::{GestureConfig, PointerEvent};
use crate::overlay::host::{Haptics, HostError, OverlayHost, ViewFrame, ViewId};
use crate::overlay::service::{OverlayConfig, OverlayService, POLL_INTERVAL};
use crate::store::{PrefWriter, Prefs};
use crossterm::event::{
    Event, EventStream, KeyCode, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use futures::{FutureExt as _, StreamExt as _};
use std::collections::HashMap;
use std::io::Write as _;
use std::time::{Duration, Instant};

const FRAME_INTERVAL: Duration = Duration::from_millis(33);

/// Terminal geometry: cells, not pixels, so the drag threshold is one cell
/// and the views are small boxes.
fn terminal_config() -> OverlayConfig {
    OverlayConfig {
        anchor_start: (4, 2),
        anchor_size: (9, 3),
        popup_size: (18, 5),
        popup_gap: 0,
        gesture: GestureConfig { move_threshold: 1.0, ..GestureConfig::default() },
    }
}

/// View registry standing in for a window manager: the state machines go
/// through the same attach/update/detach contract an out-of-process surface
/// would enforce, and lifecycle bugs surface as errors instead of silently
/// drawing detached views.
#[derive(Debug, Default)]
pub struct TermHost {
    views: HashMap<ViewId, ViewFrame>,
}

impl OverlayHost for TermHost {
    fn attach(&mut self, view: ViewId, frame: ViewFrame) -> Result<(), HostError> {
        if self.views.contains_key(&view) {
            return Err(HostError::AlreadyAttached);
        }
        self.views.insert(view, frame);
        Ok(())
    }

    fn update(&mut self, view: ViewId, frame: ViewFrame) -> Result<(), HostError> {
        match self.views.get_mut(&view) {
            Some(slot) => {
                *slot = frame;
                Ok(())
            }
            None => Err(HostError::NotAttached),
        }
    }

    fn detach(&mut self, view: ViewId) -> Result<(), HostError> {
        match self.views.remove(&view) {
            Some(_) => Ok(()),
            None => Err(HostError::NotAttached),
        }
    }
}

/// Terminal bell as the haptic channel; write failures are swallowed.
#[derive(Debug, Default)]
pub struct TermBell;

impl Haptics for TermBell {
    fn pulse(&mut self) {
        let mut out = std::io::stdout();
        let _ = out.write_all(b"\x07");
        let _ = out.flush();
    }
}

type TermService = OverlayService<TermHost, SystemClipboard, TermBell>;

/// Run the overlay surface until disabled or quit. Running it is enabling
/// it: the flag is persisted up front so the main screen's toggle reflects
/// reality.
pub async fn run(prefs: Prefs) -> anyhow::Result<()> {
    prefs.save_floating_enabled(true).await?;
    let writer = PrefWriter::spawn(prefs.clone());
    let mut service: TermService = OverlayService::new(
        prefs,
        writer,
        TermHost::default(),
        SystemClipboard,
        TermBell,
        terminal_config(),
    );

    let mut terminal = ratatui::init();
    let _ = crossterm::execute!(std::io::stdout(), crossterm::event::EnableMouseCapture);

    service.start().await;

    let mut events = EventStream::new();
    let mut poll = tokio::time::interval(POLL_INTERVAL);
    let mut last_render = Instant::now();

    loop {
        let time_to_next = FRAME_INTERVAL.saturating_sub(last_render.elapsed());
        tokio::select! {
            Some(Ok(event)) = events.next() => {
                handle_event(&mut service, &event).await;
            }
            _ = poll.tick() => {
                service.poll().await;
            }
            () = sleep_until(service.long_press_deadline()) => {
                service.handle_long_press_due(Instant::now()).await;
            }
            () = tokio::time::sleep(time_to_next) => {}
        }

        // drain queued events before rendering
        while let Some(Some(Ok(event))) = events.next().now_or_never() {
            handle_event(&mut service, &event).await;
        }

        service.tick(Instant::now());
        if service.stop_requested() {
            break;
        }

        let view = service.view_model(Instant::now());
        if let Err(err) = terminal.draw(|f| crate::ui::overlay::render(f, &view)) {
            // terminal is gone; wind down through the normal teardown path
            tracing::warn!("overlay draw failed: {err}");
            service.request_stop();
            break;
        }
        last_render = Instant::now();
    }

    service.stop().await;

    let _ = crossterm::execute!(std::io::stdout(), crossterm::event::DisableMouseCapture);
    ratatui::restore();
    Ok(())
}

/// Sleep until a long-press deadline, or forever when none is armed -- the
/// select arm simply never wins while the timer is disarmed.
async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(tokio::time::Instant::from_std(deadline)).await,
        None => futures::future::pending().await,
    }
}

async fn handle_event(service: &mut TermService, event: &Event) {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => match key.code {
            KeyCode::Char('q') | KeyCode::Esc => service.request_stop(),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                service.request_stop();
            }
            _ => {}
        },
        Event::Mouse(mouse) => handle_mouse(service, mouse).await,
        _ => {}
    }
}

async fn handle_mouse(service: &mut TermService, mouse: &MouseEvent) {
    let now = Instant::now();
    let (x, y) = (i32::from(mouse.column), i32::from(mouse.row));
    let (fx, fy) = (f32::from(mouse.column), f32::from(mouse.row));

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if let Some(frame) = service.popup_frame() {
                if frame.contains(x, y) {
                    // an item acts; the popup background is deliberately
                    // inert -- outside-tap dismissal is suppressed
                    if let Some(action) = crate::ui::overlay::popup_item_at(frame, x, y) {
                        service.handle_popup_action(action, now).await;
                    }
                    return;
                }
            }
            if service.anchor_frame().contains(x, y) {
                service.handle_pointer(PointerEvent::Down { x: fx, y: fy }, now).await;
            }
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            if service.pointer_session_active() {
                service.handle_pointer(PointerEvent::Move { x: fx, y: fy }, now).await;
            }
        }
        MouseEventKind::Up(MouseButton::Left) => {
            if service.pointer_session_active() {
                service.handle_pointer(PointerEvent::Up { x: fx, y: fy }, now).await;
            }
        }
        _ => {}
    }
}
