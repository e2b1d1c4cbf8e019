/// Reference-counted ancestor-directory cache for O(1) "modified beneath"
/// lookups.
pub mod ref_count;

pub use ref_count::DirectoryRefCountCache;
