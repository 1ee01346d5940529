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

use crate::app::App;
use crate::ui::theme::Theme;
use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph};
use unicode_width::UnicodeWidthChar;

/// Paste area with a visible cursor. Scrolls vertically to keep the cursor
/// row inside the box.
pub fn render(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.dim))
        .title(" paste lines here ");
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height == 0 || inner.width == 0 {
        return;
    }

    let (row, col) = app.input.cursor();
    let visible = usize::from(inner.height);
    let scroll = row.saturating_sub(visible.saturating_sub(1));

    let lines: Vec<Line> = app
        .input
        .lines()
        .iter()
        .skip(scroll)
        .take(visible)
        .map(|l| Line::from(l.as_str()))
        .collect();
    frame.render_widget(
        Paragraph::new(lines).style(Style::default().fg(theme.text)),
        inner,
    );

    let cursor_x = display_width(app.input.lines().get(row).map_or("", String::as_str), col);
    let x = inner.x + (cursor_x as u16).min(inner.width.saturating_sub(1));
    let y = inner.y + (row - scroll) as u16;
    frame.set_cursor_position(Position::new(x, y));
}

/// Terminal columns occupied by the first `col` chars of `line`.
fn display_width(line: &str, col: usize) -> usize {
    line.chars().take(col).map(|c| c.width().unwrap_or(0)).sum()
}
