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

//! Persisted preferences: an async key-value mapping shared by the main
//! screen and the overlay process.
//!
//! Both surfaces read and write the same keys with no transactional
//! coordination -- last write wins per key, and cross-surface reads are
//! eventually consistent (the overlay polls every 500 ms). Writes are durable
//! before the returned future resolves.

mod file;
mod writer;

pub use file::FilePrefStore;
pub use writer::{PrefWrite, PrefWriter};

use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Joins saved lines into a single stored string. Lines are trimmed and
/// non-empty, so this token cannot appear inside a valid line.
pub const LINE_SEPARATOR: &str = "§§";

/// Store keys, mirrored on both surfaces.
pub mod keys {
    pub const RAW_INPUT: &str = "raw_input";
    pub const SAVED_LINES: &str = "saved_lines";
    pub const CURRENT_INDEX: &str = "current_index";
    pub const FLOATING_ENABLED: &str = "floating_enabled";
    pub const DARK_MODE: &str = "dark_mode";
}

/// Primitive value stored under a key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PrefValue {
    Bool(bool),
    Int(i64),
    Str(String),
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("prefs file I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("prefs file is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Async key-value mapping. Reads return the last written value or `None`
/// (callers supply defaults); writes are durable before they resolve.
#[async_trait::async_trait(?Send)]
pub trait PrefStore {
    async fn get(&self, key: &str) -> Option<PrefValue>;
    async fn set(&self, key: &str, value: PrefValue) -> Result<(), StoreError>;
    async fn clear(&self) -> Result<(), StoreError>;
}

/// Typed facade over a [`PrefStore`] exposing the domain keys with their
/// defaults. Cheap to clone; both surfaces hold one.
#[derive(Clone)]
pub struct Prefs {
    store: Rc<dyn PrefStore>,
}

impl Prefs {
    pub fn new(store: Rc<dyn PrefStore>) -> Self {
        Self { store }
    }

    /// In-memory prefs for tests.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Rc::new(MemoryPrefStore::default()))
    }

    pub async fn raw_input(&self) -> String {
        match self.store.get(keys::RAW_INPUT).await {
            Some(PrefValue::Str(s)) => s,
            _ => String::new(),
        }
    }

    pub async fn saved_lines(&self) -> Vec<String> {
        match self.store.get(keys::SAVED_LINES).await {
            Some(PrefValue::Str(joined)) if !joined.is_empty() => {
                joined.split(LINE_SEPARATOR).map(str::to_owned).collect()
            }
            _ => Vec::new(),
        }
    }

    pub async fn current_index(&self) -> usize {
        match self.store.get(keys::CURRENT_INDEX).await {
            Some(PrefValue::Int(i)) if i >= 0 => i as usize,
            _ => 0,
        }
    }

    pub async fn floating_enabled(&self) -> bool {
        matches!(self.store.get(keys::FLOATING_ENABLED).await, Some(PrefValue::Bool(true)))
    }

    pub async fn dark_mode(&self) -> bool {
        matches!(self.store.get(keys::DARK_MODE).await, Some(PrefValue::Bool(true)))
    }

    pub async fn save_input(&self, text: &str) -> Result<(), StoreError> {
        self.store.set(keys::RAW_INPUT, PrefValue::Str(text.to_owned())).await
    }

    pub async fn save_lines(&self, lines: &[String]) -> Result<(), StoreError> {
        let joined = lines.join(LINE_SEPARATOR);
        self.store.set(keys::SAVED_LINES, PrefValue::Str(joined)).await
    }

    pub async fn save_index(&self, index: usize) -> Result<(), StoreError> {
        self.store.set(keys::CURRENT_INDEX, PrefValue::Int(index as i64)).await
    }

    pub async fn save_floating_enabled(&self, enabled: bool) -> Result<(), StoreError> {
        self.store.set(keys::FLOATING_ENABLED, PrefValue::Bool(enabled)).await
    }

    pub async fn save_dark_mode(&self, dark: bool) -> Result<(), StoreError> {
        self.store.set(keys::DARK_MODE, PrefValue::Bool(dark)).await
    }

    /// Remove every key -- the reset action clears the whole snapshot.
    pub async fn clear_all(&self) -> Result<(), StoreError> {
        self.store.clear().await
    }
}

/// HashMap-backed store for tests and ephemeral runs. Cloning shares the map,
/// which doubles as a second "surface" observing foreign writes.
#[derive(Clone, Default)]
pub struct MemoryPrefStore {
    values: Rc<RefCell<HashMap<String, PrefValue>>>,
}

#[async_trait::async_trait(?Send)]
impl PrefStore for MemoryPrefStore {
    async fn get(&self, key: &str) -> Option<PrefValue> {
        self.values.borrow().get(key).cloned()
    }

    async fn set(&self, key: &str, value: PrefValue) -> Result<(), StoreError> {
        self.values.borrow_mut().insert(key.to_owned(), value);
        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        self.values.borrow_mut().clear();
        Ok(())
    }
}
