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

//! Ordered, fire-and-forget persistence writes.
//!
//! UI callbacks must return immediately, so navigation persists through an
//! unbounded channel into a single local task that applies writes strictly in
//! issue order. There is no completion guarantee relative to the other
//! surface's reads -- cross-surface state is eventually consistent.

use super::Prefs;
use tokio::sync::{mpsc, oneshot};

/// One persisted mutation, applied sequentially by the writer task.
#[derive(Debug)]
pub enum PrefWrite {
    RawInput(String),
    Lines(Vec<String>),
    Index(usize),
    FloatingEnabled(bool),
    DarkMode(bool),
    ClearAll,
    /// Resolves once every previously queued write has been applied.
    Flush(oneshot::Sender<()>),
}

/// Handle to the writer task. Dropping every handle ends the task after the
/// queue drains.
#[derive(Clone)]
pub struct PrefWriter {
    tx: mpsc::UnboundedSender<PrefWrite>,
}

impl PrefWriter {
    /// Spawn the writer task on the current `LocalSet`.
    pub fn spawn(prefs: Prefs) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel();
        tokio::task::spawn_local(async move {
            while let Some(write) = rx.recv().await {
                apply(&prefs, write).await;
            }
        });
        Self { tx }
    }

    /// Queue a write. Never blocks; a closed queue (surface tearing down) is
    /// logged and dropped.
    pub fn send(&self, write: PrefWrite) {
        if self.tx.send(write).is_err() {
            tracing::warn!("pref write dropped: writer task is gone");
        }
    }

    /// Wait until everything queued so far has been applied.
    pub async fn flush(&self) {
        let (tx, rx) = oneshot::channel();
        if self.tx.send(PrefWrite::Flush(tx)).is_ok() {
            let _ = rx.await;
        }
    }
}

async fn apply(prefs: &Prefs, write: PrefWrite) {
    let result = match write {
        PrefWrite::RawInput(text) => prefs.save_input(&text).await,
        PrefWrite::Lines(lines) => prefs.save_lines(&lines).await,
        PrefWrite::Index(index) => prefs.save_index(index).await,
        PrefWrite::FloatingEnabled(enabled) => prefs.save_floating_enabled(enabled).await,
        PrefWrite::DarkMode(dark) => prefs.save_dark_mode(dark).await,
        PrefWrite::ClearAll => prefs.clear_all().await,
        PrefWrite::Flush(done) => {
            let _ = done.send(());
            return;
        }
    };
    if let Err(err) = result {
        tracing::warn!("pref write failed: {err}");
    }
}
