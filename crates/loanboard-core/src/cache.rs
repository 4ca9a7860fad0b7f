use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::types::LoadedWorkbook;
use crate::{workbook, ReportError, ReportResult};

/// Explicit memoization of a loaded workbook, keyed by path and file
/// modification time. The cache is owned by the caller (a CLI invocation,
/// a binding host), never by the pipeline itself.
#[derive(Debug, Default)]
pub struct WorkbookCache {
    entry: Option<CacheEntry>,
}

#[derive(Debug)]
struct CacheEntry {
    path: PathBuf,
    modified: SystemTime,
    loaded: LoadedWorkbook,
}

impl WorkbookCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load through the cache. A hit requires the same path and an
    /// unchanged modification time; anything else reloads from disk.
    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> ReportResult<&LoadedWorkbook> {
        self.load_with(path, |p| workbook::load_workbook(p))
    }

    /// Same as `load`, with the loader supplied by the caller. The cache
    /// itself only tracks the key; what "loading" means is not its concern.
    pub fn load_with<P, F>(&mut self, path: P, loader: F) -> ReportResult<&LoadedWorkbook>
    where
        P: AsRef<Path>,
        F: FnOnce(&Path) -> ReportResult<LoadedWorkbook>,
    {
        let path = path.as_ref();
        let modified = fs::metadata(path)
            .and_then(|meta| meta.modified())
            .map_err(|e| ReportError::Workbook {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;

        let hit = matches!(
            &self.entry,
            Some(entry) if entry.path == path && entry.modified == modified
        );
        if !hit {
            let loaded = loader(path)?;
            self.entry = Some(CacheEntry {
                path: path.to_path_buf(),
                modified,
                loaded,
            });
        }

        match &self.entry {
            Some(entry) => Ok(&entry.loaded),
            None => Err(ReportError::Workbook {
                path: path.display().to_string(),
                reason: "cache entry missing after load".to_string(),
            }),
        }
    }

    /// Drop the cached workbook, forcing the next load to hit the parser.
    pub fn clear(&mut self) {
        self.entry = None;
    }
}
