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

use ratatui::style::Color;

pub const SEPARATOR_CHAR: &str = "─";

/// Palette switched by the persisted dark-mode flag.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub accent: Color,
    pub text: Color,
    pub dim: Color,
    pub highlight_bg: Color,
    pub highlight_fg: Color,
    pub warn: Color,
}

pub const ACCENT: Color = Color::Rgb(230, 126, 34);

#[must_use]
pub fn palette(dark: bool) -> Theme {
    if dark {
        Theme {
            accent: ACCENT,
            text: Color::White,
            dim: Color::DarkGray,
            highlight_bg: Color::Rgb(40, 44, 52),
            highlight_fg: Color::White,
            warn: Color::Yellow,
        }
    } else {
        Theme {
            accent: ACCENT,
            text: Color::Black,
            dim: Color::Gray,
            highlight_bg: Color::Rgb(222, 227, 235),
            highlight_fg: Color::Black,
            warn: Color::Rgb(150, 110, 0),
        }
    }
}
