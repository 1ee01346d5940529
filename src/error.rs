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

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AppError {
    #[error("no preferences location")]
    ConfigDirUnavailable,
    #[error("preferences location not writable")]
    PrefsUnwritable,
}

impl AppError {
    pub const CONFIG_DIR_UNAVAILABLE_EXIT_CODE: i32 = 20;
    pub const PREFS_UNWRITABLE_EXIT_CODE: i32 = 21;

    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConfigDirUnavailable => Self::CONFIG_DIR_UNAVAILABLE_EXIT_CODE,
            Self::PrefsUnwritable => Self::PREFS_UNWRITABLE_EXIT_CODE,
        }
    }

    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::ConfigDirUnavailable => {
                "No platform config directory found. Pass --prefs-file <PATH> explicitly."
            }
            Self::PrefsUnwritable => {
                "The preferences directory could not be created or written. \
Check permissions or pass --prefs-file <PATH>."
            }
        }
    }
}
