//! Per-working-copy status tracker driving the directory ref-count cache.
//!
//! One tracker owns the status state for one working copy. It is the only
//! writer of its [`DirectoryRefCountCache`]: every status transition that
//! crosses the dirty boundary issues exactly one balanced add or remove, so
//! the cache counts always equal the number of dirty files beneath each
//! directory.

use crate::cache::DirectoryRefCountCache;
use crate::status::FileStatus;
use crate::utils::paths::ensure_trailing_separator;
use anyhow::{Result, bail};
use std::collections::HashMap;
use tracing::{debug, trace};

/// Tracks per-file statuses for a working copy and maintains directory-level
/// modified state.
///
/// Paths are host-convention strings, absolute, without trailing separator;
/// the tracker enforces only that they live under its root and rejects the
/// rest up front, so the cache is never fed a path whose prefix boundary
/// would not apply.
///
/// Single-threaded by design: mutation goes through `&mut self` and callers
/// sharing a tracker across threads serialize access externally.
#[derive(Debug, Clone)]
pub struct StatusTracker {
    /// Working-copy root, normalized to a trailing separator. Used as the
    /// prefix boundary for every cache call so counting stops at the root.
    root: String,
    /// Last reported status per file path. Clean files are absent.
    statuses: HashMap<String, FileStatus>,
    /// Ref-counts of dirty descendants per directory beneath the root.
    directories: DirectoryRefCountCache,
}

impl StatusTracker {
    /// Creates a tracker for the working copy rooted at `root`, using the
    /// host path separator.
    #[must_use]
    pub fn new(root: &str) -> Self {
        Self::with_separator(root, std::path::MAIN_SEPARATOR)
    }

    /// Creates a tracker scanning for an explicit separator.
    #[must_use]
    pub fn with_separator(root: &str, separator: char) -> Self {
        Self {
            root: ensure_trailing_separator(root, separator).into_owned(),
            statuses: HashMap::new(),
            directories: DirectoryRefCountCache::with_separator(separator),
        }
    }

    /// Records the status reported for `path`, updating directory counts
    /// when the file crosses the dirty boundary.
    ///
    /// A [`FileStatus::Clean`] report drops the path from tracking; any
    /// other status is stored. Reports that leave the file on the same side
    /// of the dirty boundary (modified file reported added, clean file
    /// reported ignored) touch no directory counts.
    ///
    /// # Errors
    ///
    /// Returns an error when `path` does not lie under the tracker's root.
    /// The tracker state is untouched in that case.
    pub fn set_status(&mut self, path: &str, status: FileStatus) -> Result<()> {
        if !path.starts_with(self.root.as_str()) {
            bail!(
                "path {path} is outside the working copy rooted at {}",
                self.root
            );
        }

        let was_dirty = self
            .statuses
            .get(path)
            .is_some_and(|previous| previous.is_dirty());
        let is_dirty = status.is_dirty();

        match (was_dirty, is_dirty) {
            (false, true) => {
                debug!(path, code = %status.code(), "path became dirty, marking ancestors");
                self.directories.add_path(path, Some(&self.root));
            }
            (true, false) => {
                debug!(path, code = %status.code(), "path became clean, unmarking ancestors");
                self.directories.remove_path(path, Some(&self.root));
            }
            _ => {
                trace!(path, code = %status.code(), "status change within dirty boundary");
            }
        }

        if status == FileStatus::Clean {
            self.statuses.remove(path);
        } else {
            self.statuses.insert(path.to_owned(), status);
        }

        Ok(())
    }

    /// Drops `path` from tracking entirely, unmarking its ancestors if its
    /// last known status was dirty. Unknown paths are a no-op.
    pub fn forget(&mut self, path: &str) {
        if let Some(status) = self.statuses.remove(path)
            && status.is_dirty()
        {
            debug!(path, "forgetting dirty path, unmarking ancestors");
            self.directories.remove_path(path, Some(&self.root));
        }
    }

    /// Last reported status for `path`, if any. Clean files report `None`.
    #[must_use]
    pub fn status_of(&self, path: &str) -> Option<FileStatus> {
        self.statuses.get(path).copied()
    }

    /// True when at least one dirty file lives (transitively) beneath
    /// `directory`. Accepts the directory with or without a trailing
    /// separator.
    #[must_use]
    pub fn is_directory_modified(&self, directory: &str) -> bool {
        let separator = self.directories.separator();
        let key = ensure_trailing_separator(directory, separator);
        self.directories.contains(&key)
    }

    /// Number of currently dirty files.
    #[must_use]
    pub fn dirty_count(&self) -> usize {
        self.statuses
            .values()
            .filter(|status| status.is_dirty())
            .count()
    }

    /// Number of paths with any non-clean status.
    #[must_use]
    pub fn len(&self) -> usize {
        self.statuses.len()
    }

    /// True when no path has a non-clean status.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }

    /// Working-copy root, trailing separator included.
    #[must_use]
    pub fn root(&self) -> &str {
        &self.root
    }

    /// Read access to the directory-level counts for status rendering.
    #[must_use]
    pub const fn directory_cache(&self) -> &DirectoryRefCountCache {
        &self.directories
    }

    /// Iterates over `(path, status)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, FileStatus)> {
        self.statuses
            .iter()
            .map(|(path, status)| (path.as_str(), *status))
    }

    /// Forgets every path and empties the directory cache.
    pub fn clear(&mut self) {
        self.statuses.clear();
        self.directories.clear();
    }
}
