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

pub mod app;
pub mod clipboard;
pub mod error;
pub mod lines;
pub mod overlay;
pub mod store;
pub mod ui;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "stepcopy", about = "Step through pasted lines, copying each to the clipboard")]
pub struct Cli {
    /// Run the floating overlay control instead of the main screen
    #[arg(long)]
    pub overlay: bool,

    /// Preferences file (defaults to the platform config directory)
    #[arg(long)]
    pub prefs_file: Option<std::path::PathBuf>,

    /// Write diagnostics to this file (a TUI cannot log to stderr)
    #[arg(long)]
    pub log_file: Option<std::path::PathBuf>,

    /// Tracing filter directives, e.g. "stepcopy=debug" (falls back to RUST_LOG)
    #[arg(long)]
    pub log_filter: Option<String>,

    /// Append to the log file instead of truncating it
    #[arg(long)]
    pub log_append: bool,
}
