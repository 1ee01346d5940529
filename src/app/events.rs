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

//! Key routing and the main-surface actions.
//!
//! Handlers are synchronous and return immediately: every store mutation
//! goes through the ordered writer queue, never awaited here.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Instant;

use super::state::{App, JumpDialog, Screen};
use crate::store::PrefWrite;

pub fn handle_event(app: &mut App, event: &Event) {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => handle_key(app, key),
        Event::Paste(text) => {
            if app.screen == Screen::Compose && app.jump.is_none() {
                app.input.insert_text(text);
            }
        }
        _ => {}
    }
}

pub fn handle_key(app: &mut App, key: &KeyEvent) {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }
    if key.code == KeyCode::Char('t') && key.modifiers.contains(KeyModifiers::CONTROL) {
        toggle_dark(app);
        return;
    }
    if app.jump.is_some() {
        handle_jump_key(app, key);
        return;
    }
    match app.screen {
        Screen::Compose => handle_compose_key(app, key),
        Screen::Stepping => handle_stepping_key(app, key),
    }
}

fn handle_compose_key(app: &mut App, key: &KeyEvent) {
    match key.code {
        KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => confirm(app),
        KeyCode::Enter => app.input.insert_newline(),
        KeyCode::Backspace => app.input.backspace(),
        KeyCode::Left => app.input.move_left(),
        KeyCode::Right => app.input.move_right(),
        KeyCode::Up => app.input.move_up(),
        KeyCode::Down => app.input.move_down(),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.input.insert_char(c);
        }
        _ => {}
    }
}

fn handle_stepping_key(app: &mut App, key: &KeyEvent) {
    match key.code {
        KeyCode::Char('n') | KeyCode::Right | KeyCode::Char(' ') => next_line(app),
        KeyCode::Char('p') | KeyCode::Left => previous_line(app),
        KeyCode::Char('a') => copy_all(app),
        KeyCode::Char('j') => app.jump = Some(JumpDialog::default()),
        KeyCode::Char('r') => reset(app),
        KeyCode::Char('f') => toggle_floating(app),
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        _ => {}
    }
}

fn handle_jump_key(app: &mut App, key: &KeyEvent) {
    match key.code {
        KeyCode::Char(c) if c.is_ascii_digit() => {
            if let Some(jump) = app.jump.as_mut() {
                jump.digits.push(c);
            }
        }
        KeyCode::Backspace => {
            if let Some(jump) = app.jump.as_mut() {
                jump.digits.pop();
            }
        }
        KeyCode::Enter => jump_confirm(app),
        KeyCode::Esc => app.jump = None,
        _ => {}
    }
}

/// Confirm the pasted text: split into lines and start stepping. Blank
/// input is ignored; input with no valid lines is the distinct
/// invalid-input condition and stays on the compose screen.
pub fn confirm(app: &mut App) {
    if app.input.is_blank() {
        return;
    }
    let raw = app.input.text();
    app.cursor.load(&raw);
    if app.cursor.is_empty() {
        app.show_flash("no valid lines found", Instant::now());
        return;
    }
    if let Some(saved) = app.saved_index_at_start.take() {
        if saved > 0 {
            app.cursor.restore_index(saved);
        }
    }
    copy_current(app);
    app.writer.send(PrefWrite::RawInput(raw));
    app.writer.send(PrefWrite::Lines(app.cursor.lines().to_vec()));
    app.writer.send(PrefWrite::Index(app.cursor.index()));
    app.screen = Screen::Stepping;
}

/// Advance and copy the new current line. Clamped at the end -- repeating
/// there just copies the last line again.
pub fn next_line(app: &mut App) {
    if app.cursor.advance().is_some() {
        copy_current(app);
        app.writer.send(PrefWrite::Index(app.cursor.index()));
    }
}

/// Retreat and copy the new current line.
pub fn previous_line(app: &mut App) {
    if app.cursor.retreat().is_some() {
        copy_current(app);
        app.writer.send(PrefWrite::Index(app.cursor.index()));
    }
}

pub fn copy_all(app: &mut App) {
    let all = app.cursor.copy_all();
    if all.is_empty() {
        app.show_flash("no lines to copy", Instant::now());
        return;
    }
    app.clipboard.set_text(&all);
    app.show_flash(format!("copied all {} lines", app.cursor.len()), Instant::now());
}

/// Resolve the jump dialog. Out-of-range numbers leave the cursor alone and
/// keep the dialog open with a rejection notice.
pub fn jump_confirm(app: &mut App) {
    let Some(jump) = app.jump.as_ref() else {
        return;
    };
    let target = jump.digits.parse::<usize>().ok();
    match target.and_then(|n| app.cursor.jump_to_number(n).map(str::to_owned)) {
        Some(line) => {
            app.clipboard.set_text(&line);
            app.show_flash(format!("copied line {}", app.cursor.index() + 1), Instant::now());
            app.writer.send(PrefWrite::Index(app.cursor.index()));
            app.jump = None;
        }
        None => app.show_flash("invalid line number", Instant::now()),
    }
}

/// Clear everything: lines, input, the whole persisted snapshot, and the
/// floating flag (the overlay exits on its next poll).
pub fn reset(app: &mut App) {
    app.cursor.reset();
    app.input.clear();
    app.screen = Screen::Compose;
    app.floating_enabled = false;
    app.saved_index_at_start = None;
    app.writer.send(PrefWrite::ClearAll);
    app.writer.send(PrefWrite::FloatingEnabled(false));
    app.show_flash("cleared", Instant::now());
}

pub fn toggle_floating(app: &mut App) {
    app.floating_enabled = !app.floating_enabled;
    app.writer.send(PrefWrite::FloatingEnabled(app.floating_enabled));
    let text = if app.floating_enabled {
        "floating control enabled — run `stepcopy --overlay`"
    } else {
        "floating control disabled"
    };
    app.show_flash(text, Instant::now());
}

pub fn toggle_dark(app: &mut App) {
    app.dark_mode = !app.dark_mode;
    app.writer.send(PrefWrite::DarkMode(app.dark_mode));
}

fn copy_current(app: &mut App) {
    if let Some(line) = app.cursor.current().map(str::to_owned) {
        app.clipboard.set_text(&line);
        app.show_flash(format!("copied line {}", app.cursor.index() + 1), Instant::now());
    }
}
