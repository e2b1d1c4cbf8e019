#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]
// Allow pedantic strict lints that create false positives in this codebase
#![allow(clippy::arithmetic_side_effects)] // Ref-count bumps are bounded by call balance
#![allow(clippy::indexing_slicing)] // Slice bounds come from separator scan offsets

//! # Modtree - Directory-Level Modified-Status Tracking
//!
//! Modtree keeps an incrementally maintained answer to the question "does
//! this directory transitively contain any modified file?". A status
//! backend feeds it per-file change events; a UI layer reads directory
//! state back in O(1), without ever rescanning the filesystem.
//!
//! ## Features
//!
//! - **Reference-counted ancestor cache**: every tracked file bumps each of
//!   its ancestor directories once, so counts stay exact across overlapping
//!   prefixes and repeated events
//! - **Prefix scoping**: counting can stop at a subtree boundary (a
//!   repository root), keeping state local to one working copy
//! - **Status tracking**: per-file working-copy statuses with balanced
//!   cache updates across dirty/clean transitions
//! - **No I/O**: the crate operates purely on path strings and in-memory
//!   maps; nothing here touches disk
//!
//! ## Architecture
//!
//! The codebase is organized into three modules:
//!
//! - [`cache`]: the reference-counted ancestor-directory cache
//! - [`status`]: per-file status state driving the cache
//! - [`utils`]: path string helpers (separator normalization)
//!
//! ## Example Usage
//!
//! ```
//! use modtree::{FileStatus, StatusTracker};
//!
//! # fn main() -> anyhow::Result<()> {
//! let mut tracker = StatusTracker::with_separator("/repo", '/');
//!
//! tracker.set_status("/repo/src/lib.rs", FileStatus::Modified)?;
//! assert!(tracker.is_directory_modified("/repo/src"));
//! assert!(!tracker.is_directory_modified("/repo/docs"));
//!
//! tracker.set_status("/repo/src/lib.rs", FileStatus::Clean)?;
//! assert!(!tracker.is_directory_modified("/repo/src"));
//! # Ok(())
//! # }
//! ```

/// Reference-counted ancestor-directory cache.
pub mod cache;

/// Per-file status tracking driving the directory cache.
pub mod status;

/// Utility functions and helpers.
pub mod utils;

pub use cache::DirectoryRefCountCache;
pub use status::{FileStatus, StatusTracker};

/// Current version of the modtree crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
