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

//! Main surface: paste, confirm, step through lines.

mod events;
mod input;
mod state;

pub use events::{
    confirm, copy_all, handle_event, handle_key, jump_confirm, next_line, previous_line, reset,
    toggle_dark, toggle_floating,
};
pub use input::InputState;
pub use state::{App, Flash, JumpDialog, Screen, FLASH_TTL, SYNC_INTERVAL};

use crossterm::event::EventStream;
use futures::{FutureExt as _, StreamExt as _};
use std::time::{Duration, Instant};

const FRAME_INTERVAL: Duration = Duration::from_millis(33);

/// Event loop for the main surface. Key handling is synchronous; the store
/// sync runs on its own interval so foreign overlay writes converge within
/// one poll period.
pub async fn run_tui(app: &mut App) -> anyhow::Result<()> {
    let mut terminal = ratatui::init();
    let _ = crossterm::execute!(std::io::stdout(), crossterm::event::EnableBracketedPaste);

    app.restore().await;

    let mut events = EventStream::new();
    let mut sync = tokio::time::interval(SYNC_INTERVAL);
    let mut last_render = Instant::now();

    loop {
        let time_to_next = FRAME_INTERVAL.saturating_sub(last_render.elapsed());
        tokio::select! {
            Some(Ok(event)) = events.next() => {
                handle_event(app, &event);
            }
            _ = sync.tick() => {
                app.sync_from_store().await;
            }
            () = tokio::time::sleep(time_to_next) => {}
        }

        // drain queued input before rendering
        while let Some(Some(Ok(event))) = events.next().now_or_never() {
            handle_event(app, &event);
        }

        app.expire_flash(Instant::now());
        if app.should_quit {
            break;
        }
        terminal.draw(|f| crate::ui::render(f, app))?;
        last_render = Instant::now();
    }

    // make sure the last navigation is durable before leaving
    app.writer.flush().await;

    let _ = crossterm::execute!(std::io::stdout(), crossterm::event::DisableBracketedPaste);
    ratatui::restore();
    Ok(())
}
