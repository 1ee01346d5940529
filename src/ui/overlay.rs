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

//! Renders the floating control surface: the draggable anchor button, the
//! popup menu (with its scale animation mapped to progressively revealed
//! rows), and the transient notice line.

use crate::overlay::service::{FloatLabel, OverlayViewModel, PopupAction};
use crate::overlay::ViewFrame;
use crate::ui::theme;
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

pub fn render(frame: &mut Frame, view: &OverlayViewModel) {
    let area = frame.area();
    let palette = theme::palette(true);

    let hint = Line::from(Span::styled(
        "stepcopy overlay — tap: copy · hold: menu · drag: move · q: quit",
        Style::default().fg(palette.dim),
    ));
    frame.render_widget(Paragraph::new(hint), area);

    if let Some(anchor) = clamp_to(view.anchor, area) {
        render_anchor(frame, anchor, view.label, &palette);
    }

    if let Some((popup_frame, scale)) = view.popup {
        let revealed = revealed_rows(popup_frame.height, scale);
        let partial = ViewFrame { height: revealed, ..popup_frame };
        if revealed > 0 {
            if let Some(popup) = clamp_to(partial, area) {
                render_popup(frame, popup, &palette);
            }
        }
    }

    if let Some(notice) = &view.notice {
        let bottom = Rect { y: area.y + area.height.saturating_sub(1), height: 1, ..area };
        let line = Line::from(Span::styled(notice.clone(), Style::default().fg(palette.accent)));
        frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), bottom);
    }
}

fn render_anchor(frame: &mut Frame, area: Rect, label: FloatLabel, palette: &theme::Theme) {
    frame.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.accent));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    let text = Line::from(Span::styled(
        label_text(label),
        Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), inner);
}

fn render_popup(frame: &mut Frame, area: Rect, palette: &theme::Theme) {
    frame.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.dim));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    let items = [
        Line::from(Span::styled("↩ previous", Style::default().fg(palette.text))),
        Line::from(Span::styled("✕ hide menu", Style::default().fg(palette.text))),
        Line::from(Span::styled("⏻ disable", Style::default().fg(palette.warn))),
    ];
    frame.render_widget(Paragraph::new(items.to_vec()), inner);
}

#[must_use]
pub fn label_text(label: FloatLabel) -> String {
    match label {
        FloatLabel::Empty => "—".to_owned(),
        FloatLabel::Number(n) => n.to_string(),
        FloatLabel::Done => "✓".to_owned(),
    }
}

/// Which menu item a press at `(x, y)` lands on. Borders and any other spot
/// inside the popup are background -- deliberately inert.
#[must_use]
pub fn popup_item_at(frame: ViewFrame, x: i32, y: i32) -> Option<PopupAction> {
    if !frame.contains(x, y) {
        return None;
    }
    if x <= frame.x || x >= frame.x + i32::from(frame.width) - 1 {
        return None;
    }
    match y - frame.y {
        1 => Some(PopupAction::Previous),
        2 => Some(PopupAction::HideMenu),
        3 => Some(PopupAction::DisableFloating),
        _ => None,
    }
}

/// Scale-to-rows mapping for the open/close animation: the menu grows
/// downward from the anchor, like a scale-Y transform.
fn revealed_rows(height: u16, scale: f32) -> u16 {
    ((f32::from(height) * scale.clamp(0.0, 1.0)).ceil()) as u16
}

/// Clip a view frame to the terminal area; `None` when fully off-screen.
fn clamp_to(view: ViewFrame, area: Rect) -> Option<Rect> {
    let x = view.x.max(i32::from(area.x));
    let y = view.y.max(i32::from(area.y));
    let right = (view.x + i32::from(view.width)).min(i32::from(area.x + area.width));
    let bottom = (view.y + i32::from(view.height)).min(i32::from(area.y + area.height));
    if x >= right || y >= bottom {
        return None;
    }
    Some(Rect {
        x: x as u16,
        y: y as u16,
        width: (right - x) as u16,
        height: (bottom - y) as u16,
    })
}
