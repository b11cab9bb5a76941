// SPDX-License-Identifier: Apache-2.0
// Copyright 2026 Joe Pearson
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! A per-file cache of decoded databases.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use log::debug;
use once_cell::sync::OnceCell;

use crate::db::ProcedureDatabase;
use crate::error::{Error, Result};

type Slot = Arc<OnceCell<Arc<ProcedureDatabase>>>;

/// Caches one decoded [`ProcedureDatabase`] per scenery file.
///
/// The cache is owned by the caller and shared explicitly; there is no
/// process-wide instance. Each file is read and decoded on first
/// request, concurrent requests for the same file block until the
/// first one finishes and then share the result. A file whose read
/// fails is not cached, so a later request tries again.
#[derive(Default)]
pub struct DatabaseCache {
    entries: Mutex<HashMap<PathBuf, Slot>>,
}

impl DatabaseCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the database decoded from the file at `path`.
    ///
    /// The first call reads and decodes the file; later calls for the
    /// same path share the decoded database without touching the
    /// filesystem again. Paths are compared verbatim, two spellings of
    /// the same file load twice.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    pub fn get_or_load(&self, path: &Path) -> Result<Arc<ProcedureDatabase>> {
        let slot = {
            let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
            Arc::clone(entries.entry(path.to_path_buf()).or_default())
        };

        // The map lock is dropped; only loaders of this very file wait
        // here while other files load in parallel.
        let database = slot.get_or_try_init(|| {
            debug!("loading procedure database from {}", path.display());
            let data = fs::read(path).map_err(|source| Error::Io {
                path: path.to_path_buf(),
                source,
            })?;
            Ok(Arc::new(ProcedureDatabase::decode(&data)))
        })?;

        Ok(Arc::clone(database))
    }

    /// Number of files with a decoded database in the cache.
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .values()
            .filter(|slot| slot.get().is_some())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::thread;

    use super::*;

    /// A minimal file with a valid header and no sections.
    fn empty_scenery_file() -> Vec<u8> {
        let mut data = vec![0u8; 56];
        data[4..8].copy_from_slice(&56u32.to_le_bytes());
        data[20..24].copy_from_slice(&1u32.to_le_bytes());
        data.extend_from_slice(&[0u8; 20]);
        data
    }

    fn scenery_file_on_disk() -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("should create a temporary file");
        file.write_all(&empty_scenery_file())
            .expect("should write the scenery file");
        file
    }

    #[test]
    fn the_second_request_shares_the_first_database() {
        let file = scenery_file_on_disk();
        let cache = DatabaseCache::new();

        let first = cache
            .get_or_load(file.path())
            .expect("should load the file");
        let second = cache
            .get_or_load(file.path())
            .expect("should hit the cache");

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn a_cached_file_is_not_read_again() {
        let file = scenery_file_on_disk();
        let cache = DatabaseCache::new();
        let path = file.path().to_path_buf();

        let first = cache.get_or_load(&path).expect("should load the file");

        // With the file gone a second read would fail, the cache must
        // answer from memory.
        file.close().expect("should remove the file");
        let second = cache
            .get_or_load(&path)
            .expect("should not touch the filesystem");

        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn a_failed_read_is_retried() {
        let directory = tempfile::tempdir().expect("should create a temporary directory");
        let path = directory.path().join("NVX15110.bgl");
        let cache = DatabaseCache::new();

        assert!(cache.get_or_load(&path).is_err());
        assert!(cache.is_empty());

        fs::write(&path, empty_scenery_file()).expect("should write the scenery file");

        assert!(cache.get_or_load(&path).is_ok());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn distinct_files_get_distinct_databases() {
        let first_file = scenery_file_on_disk();
        let second_file = scenery_file_on_disk();
        let cache = DatabaseCache::new();

        let first = cache
            .get_or_load(first_file.path())
            .expect("should load the first file");
        let second = cache
            .get_or_load(second_file.path())
            .expect("should load the second file");

        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn distinct_files_load_in_parallel() {
        let first_file = scenery_file_on_disk();
        let second_file = scenery_file_on_disk();
        let cache = Arc::new(DatabaseCache::new());

        let handles: Vec<_> = [&first_file, &second_file]
            .map(|file| {
                let cache = Arc::clone(&cache);
                let path = file.path().to_path_buf();
                thread::spawn(move || cache.get_or_load(&path).expect("should load the file"))
            })
            .into_iter()
            .collect();

        let databases: Vec<_> = handles
            .into_iter()
            .map(|handle| handle.join().expect("the loader thread should not panic"))
            .collect();

        assert!(!Arc::ptr_eq(&databases[0], &databases[1]));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn concurrent_requests_share_one_database() {
        let file = scenery_file_on_disk();
        let cache = Arc::new(DatabaseCache::new());

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let cache = Arc::clone(&cache);
                let path = file.path().to_path_buf();
                thread::spawn(move || cache.get_or_load(&path).expect("should load the file"))
            })
            .collect();

        let databases: Vec<_> = handles
            .into_iter()
            .map(|handle| handle.join().expect("the loader thread should not panic"))
            .collect();

        assert!(databases
            .windows(2)
            .all(|pair| Arc::ptr_eq(&pair[0], &pair[1])));
        assert_eq!(cache.len(), 1);
    }
}
