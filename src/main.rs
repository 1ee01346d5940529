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

use clap::Parser;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::rc::Rc;
use stepcopy::Cli;
use stepcopy::error::AppError;
use stepcopy::store::{FilePrefStore, PrefWriter, Prefs};

#[allow(clippy::exit)]
fn main() {
    if let Err(err) = run() {
        if let Some(app_error) = extract_app_error(&err) {
            eprintln!("{}", app_error.user_message());
            std::process::exit(app_error.exit_code());
        }
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli)?;

    let prefs_path = resolve_prefs_path(&cli)?;
    tracing::info!("prefs file: {}", prefs_path.display());

    let rt = tokio::runtime::Builder::new_current_thread().enable_all().build()?;
    let local_set = tokio::task::LocalSet::new();

    rt.block_on(local_set.run_until(async move {
        let prefs = Prefs::new(Rc::new(FilePrefStore::new(prefs_path)));
        if cli.overlay {
            stepcopy::overlay::surface::run(prefs).await
        } else {
            let writer = PrefWriter::spawn(prefs.clone());
            let clipboard = Box::new(stepcopy::clipboard::SystemClipboard);
            let mut app = stepcopy::app::App::new(prefs, writer, clipboard);
            stepcopy::app::run_tui(&mut app).await
        }
    }))
}

fn resolve_prefs_path(cli: &Cli) -> anyhow::Result<PathBuf> {
    let path = match cli.prefs_file.clone().or_else(FilePrefStore::default_path) {
        Some(path) => path,
        None => return Err(AppError::ConfigDirUnavailable.into()),
    };
    if let Some(parent) = path.parent() {
        if std::fs::create_dir_all(parent).is_err() {
            return Err(AppError::PrefsUnwritable.into());
        }
    }
    Ok(path)
}

fn extract_app_error(err: &anyhow::Error) -> Option<AppError> {
    err.chain().find_map(|cause| cause.downcast_ref::<AppError>().cloned())
}

fn init_tracing(cli: &Cli) -> anyhow::Result<()> {
    let Some(path) = cli.log_file.as_ref() else {
        if std::env::var_os("RUST_LOG").is_some() {
            eprintln!(
                "RUST_LOG is set, but tracing is disabled without --log-file <PATH>. \
Use --log-file to enable diagnostics."
            );
        }
        return Ok(());
    };

    let directives = cli
        .log_filter
        .clone()
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| "info".to_owned());
    let filter = tracing_subscriber::EnvFilter::try_new(directives.as_str())
        .map_err(|e| anyhow::anyhow!("invalid tracing filter `{directives}`: {e}"))?;

    let mut options = OpenOptions::new();
    options.create(true).write(true);
    if cli.log_append {
        options.append(true);
    } else {
        options.truncate(true);
    }
    let file = options
        .open(path)
        .map_err(|e| anyhow::anyhow!("failed to open log file {}: {e}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(file)
        .with_ansi(false)
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing subscriber: {e}"))?;

    tracing::info!(
        target: "diagnostics",
        version = env!("CARGO_PKG_VERSION"),
        log_file = %path.display(),
        overlay = cli.overlay,
        "tracing enabled"
    );

    Ok(())
}
