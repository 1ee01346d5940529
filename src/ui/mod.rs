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

mod dialog;
mod input;
pub mod overlay;
mod stepper;
pub mod theme;

use crate::app::{App, Screen};
use crate::lines::CursorStatus;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Gauge, Paragraph};

pub fn render(frame: &mut Frame, app: &App) {
    let theme = theme::palette(app.dark_mode);
    let [title_area, title_sep, body_area, status_sep, status_area, gauge_area, footer_area] =
        Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(frame.area());

    let title = Line::from(Span::styled(
        "⚡ stepcopy — copy line by line",
        Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(Paragraph::new(title).alignment(Alignment::Center), title_area);
    render_separator(frame, title_sep, &theme);

    match app.screen {
        Screen::Compose => input::render(frame, body_area, app, &theme),
        Screen::Stepping => stepper::render(frame, body_area, app, &theme),
    }

    render_separator(frame, status_sep, &theme);
    render_status(frame, status_area, app, &theme);

    if app.screen == Screen::Stepping {
        let gauge = Gauge::default()
            .ratio(f64::from(app.cursor.progress()).clamp(0.0, 1.0))
            .gauge_style(Style::default().fg(theme.accent))
            .use_unicode(true)
            .label("");
        frame.render_widget(gauge, pad_horizontal(gauge_area, 2));
    }

    render_footer(frame, footer_area, app, &theme);

    if app.jump.is_some() {
        dialog::render(frame, body_area, app, &theme);
    }
}

fn render_status(frame: &mut Frame, area: Rect, app: &App, theme: &theme::Theme) {
    let (text, style) = match &app.flash {
        Some(flash) => (flash.text.clone(), Style::default().fg(theme.accent)),
        None => match app.cursor.status() {
            CursorStatus::Empty => ("no data".to_owned(), Style::default().fg(theme.dim)),
            status => (format!("📄 {status}"), Style::default().fg(theme.accent)),
        },
    };
    let line = Line::from(Span::styled(text, style));
    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

fn render_footer(frame: &mut Frame, area: Rect, app: &App, theme: &theme::Theme) {
    let hints = match app.screen {
        Screen::Compose => "paste text · ctrl+s confirm · ctrl+t theme · ctrl+c quit",
        Screen::Stepping => {
            "n/→ next · p/← prev · a all · j number · f float · r reset · q quit"
        }
    };
    let mut spans = vec![Span::styled(hints, Style::default().fg(theme.dim))];
    if app.floating_enabled {
        spans.push(Span::raw("  "));
        spans.push(Span::styled("[float]", Style::default().fg(theme.warn)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), pad_horizontal(area, 2));
}

fn render_separator(frame: &mut Frame, area: Rect, theme: &theme::Theme) {
    if area.height == 0 {
        return;
    }
    let sep = theme::SEPARATOR_CHAR.repeat(area.width as usize);
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(sep, Style::default().fg(theme.dim)))),
        area,
    );
}

fn pad_horizontal(area: Rect, pad: u16) -> Rect {
    Rect {
        x: area.x + pad.min(area.width / 2),
        width: area.width.saturating_sub(pad * 2),
        ..area
    }
}
