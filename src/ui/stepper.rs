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
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState};

/// Confirmed lines with the current one highlighted and kept in view.
pub fn render(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let total = app.cursor.len();
    let number_width = total.to_string().len();

    let items: Vec<ListItem> = app
        .cursor
        .lines()
        .iter()
        .enumerate()
        .map(|(i, line)| {
            let number = format!("{:>number_width$} ", i + 1);
            ListItem::new(Line::from(vec![
                Span::styled(number, Style::default().fg(theme.dim)),
                Span::styled(line.clone(), Style::default().fg(theme.text)),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.dim))
                .title(" lines "),
        )
        .highlight_style(
            Style::default()
                .bg(theme.highlight_bg)
                .fg(theme.highlight_fg)
                .add_modifier(Modifier::BOLD),
        );

    let mut state = ListState::default().with_selected(Some(app.cursor.index()));
    frame.render_stateful_widget(list, area, &mut state);
}
