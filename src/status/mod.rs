//! Working-copy status tracking.
//!
//! This module ties the per-file status map to the directory ref-count
//! cache. A [`StatusTracker`] consumes `(path, status)` events from a
//! change-detection backend and keeps the cache exactly balanced across
//! status transitions, so a UI layer can ask "is anything modified beneath
//! this directory?" without scanning.

pub mod tracker;

pub use tracker::StatusTracker;

use serde::{Deserialize, Serialize};

/// Working-copy state of a single file.
///
/// Mirrors the status classes a source-control backend reports for a file
/// against its parent revision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FileStatus {
    /// Unchanged against the parent revision.
    Clean,
    /// Content changed since the parent revision.
    Modified,
    /// Scheduled for addition.
    Added,
    /// Scheduled for removal.
    Removed,
    /// Tracked but absent from the working copy.
    Missing,
    /// Matched by an ignore rule.
    Ignored,
    /// Present in the working copy but not tracked.
    Untracked,
}

impl FileStatus {
    /// True for the states that should light up ancestor directories in a
    /// status display: the file differs from the parent revision.
    #[must_use]
    pub const fn is_dirty(self) -> bool {
        matches!(
            self,
            Self::Modified | Self::Added | Self::Removed | Self::Missing
        )
    }

    /// Single-letter status code as printed by `hg status`.
    #[must_use]
    pub const fn code(self) -> char {
        match self {
            Self::Clean => 'C',
            Self::Modified => 'M',
            Self::Added => 'A',
            Self::Removed => 'R',
            Self::Missing => '!',
            Self::Ignored => 'I',
            Self::Untracked => '?',
        }
    }
}
