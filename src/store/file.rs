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

//! JSON-file-backed preference store.
//!
//! Every read re-parses the backing file so a second process observes foreign
//! writes; every write lands via rename so a reader never sees a half-written
//! file. One flat JSON object, one key per preference.

use super::{PrefStore, PrefValue, StoreError};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

const PREFS_DIR_NAME: &str = "stepcopy";
const PREFS_FILE: &str = "prefs.json";

pub struct FilePrefStore {
    path: PathBuf,
}

impl FilePrefStore {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Platform config location: `<config_dir>/stepcopy/prefs.json`.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(PREFS_DIR_NAME).join(PREFS_FILE))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_map(&self) -> HashMap<String, PrefValue> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return HashMap::new(),
            Err(err) => {
                tracing::warn!("prefs read failed ({}): {err}", self.path.display());
                return HashMap::new();
            }
        };
        match serde_json::from_str(&content) {
            Ok(map) => map,
            Err(err) => {
                tracing::warn!("prefs file malformed, treating as empty: {err}");
                HashMap::new()
            }
        }
    }

    async fn write_map(&self, map: &HashMap<String, PrefValue>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let content = serde_json::to_vec_pretty(map)?;
        // Write-then-rename keeps the durable-before-ack contract without a
        // reader ever observing a torn file.
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, content).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait::async_trait(?Send)]
impl PrefStore for FilePrefStore {
    async fn get(&self, key: &str) -> Option<PrefValue> {
        self.read_map().await.remove(key)
    }

    async fn set(&self, key: &str, value: PrefValue) -> Result<(), StoreError> {
        let mut map = self.read_map().await;
        map.insert(key.to_owned(), value);
        self.write_map(&map).await
    }

    async fn clear(&self) -> Result<(), StoreError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
