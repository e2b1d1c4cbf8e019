//! Reference-counted ancestor-directory cache.
//!
//! Given a stream of file-path add/remove events, the cache maintains, for
//! every ancestor directory of every currently-tracked path, a count of how
//! many tracked descendants exist beneath it. A caller can then answer
//! "does directory D transitively contain any tracked file?" with a single
//! map lookup instead of rescanning the tree on every change.
//!
//! # Architecture
//!
//! Keys are canonical directory paths: they always end with the cache's
//! separator (`/A/B/` rather than `/A/B`). Absence of a key means a count
//! of zero; the map never holds a key with value 0. Both mutating
//! operations share one decomposition routine: scan the path for separator
//! occurrences past an optional prefix boundary, and bump the count of each
//! prefix-up-to-and-including-the-separator.
//!
//! The cache is a plain owned value. One status-tracking session typically
//! owns one cache per working copy; independent caches coexist freely.

use crate::utils::paths::ensure_trailing_separator;
use std::collections::HashMap;

/// Direction of a ref-count traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CacheAction {
    /// Increment each ancestor, creating entries at 1.
    Add,
    /// Decrement each ancestor, deleting entries that reach 0.
    Remove,
}

/// Yields the byte offset of every separator in `path` at or past `start`.
///
/// Each offset `i` marks an ancestor boundary: the directory is
/// `path[..i + separator.len_utf8()]`, separator included. Offsets come
/// back shallowest-first. Stateless on purpose: the scan position is an
/// explicit argument, never a shared cursor.
fn ancestor_boundaries(
    path: &str,
    separator: char,
    start: usize,
) -> impl Iterator<Item = usize> + '_ {
    path.match_indices(separator)
        .map(|(index, _)| index)
        .filter(move |&index| index >= start)
}

/// Maps canonical directory paths (trailing separator) to the number of
/// tracked paths beneath them.
///
/// The cache performs no I/O and no validation: paths are opaque strings
/// scanned for the configured separator. Counts stay correct only under the
/// caller contract that every [`Self::add_path`] is eventually matched by a
/// [`Self::remove_path`] with the same `(path, prefix_to_skip)` shape;
/// unbalanced calls silently skew the counts, they never error.
///
/// Not synchronized: all mutation goes through `&mut self`, and a caller
/// sharing a cache across threads must serialize access externally.
#[derive(Debug, Clone)]
pub struct DirectoryRefCountCache {
    /// Directory path (trailing separator) to strictly positive ref-count.
    counts: HashMap<String, usize>,
    /// Separator scanned for when decomposing paths. Defaults to the host
    /// separator; fixed per instance so every call uses one convention.
    separator: char,
}

impl DirectoryRefCountCache {
    /// Creates an empty cache using the host path separator.
    #[must_use]
    pub fn new() -> Self {
        Self::with_separator(std::path::MAIN_SEPARATOR)
    }

    /// Creates an empty cache scanning for an explicit separator.
    ///
    /// Useful when the fed paths follow a fixed convention regardless of
    /// host platform (e.g. paths from a remote repository).
    #[must_use]
    pub fn with_separator(separator: char) -> Self {
        Self {
            counts: HashMap::new(),
            separator,
        }
    }

    /// Increments the ref-count of every ancestor directory of `path`,
    /// creating entries with count 1 where absent.
    ///
    /// `path` is a file path with no trailing separator. When
    /// `prefix_to_skip` is given it is normalized to a trailing separator
    /// and ancestors at or above that boundary are left untouched: with
    /// `path` `/A/B/C/D` and prefix `/A/B` (or `/A/B/`), only `/A/B/C/` is
    /// bumped. Without a prefix every ancestor from the root down is
    /// bumped. A path with no separator past the boundary is a no-op.
    pub fn add_path(&mut self, path: &str, prefix_to_skip: Option<&str>) {
        self.apply(path, prefix_to_skip, CacheAction::Add);
    }

    /// Decrements the ref-count of every ancestor directory of `path`,
    /// deleting entries whose count reaches 0.
    ///
    /// Decomposition matches [`Self::add_path`]. Decrementing a directory
    /// that is already absent is a no-op: a count never goes negative and a
    /// deleted key is never re-created. Balance is the caller's contract:
    /// a remove must mirror a prior unmatched add with the same
    /// `(path, prefix_to_skip)` pair.
    pub fn remove_path(&mut self, path: &str, prefix_to_skip: Option<&str>) {
        self.apply(path, prefix_to_skip, CacheAction::Remove);
    }

    /// Ref-count for a canonical directory key (trailing separator), 0 when
    /// absent.
    ///
    /// The key is looked up verbatim; callers holding a bare directory path
    /// normalize it first (see
    /// [`crate::utils::paths::ensure_trailing_separator`]).
    #[must_use]
    pub fn count(&self, directory: &str) -> usize {
        self.counts.get(directory).copied().unwrap_or(0)
    }

    /// True when at least one tracked path lies beneath `directory`
    /// (canonical key, trailing separator).
    #[must_use]
    pub fn contains(&self, directory: &str) -> bool {
        self.counts.contains_key(directory)
    }

    /// Number of distinct directories currently holding a positive count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// True when no directory holds a positive count.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Separator this cache scans for.
    #[must_use]
    pub const fn separator(&self) -> char {
        self.separator
    }

    /// Iterates over `(directory, count)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(dir, count)| (dir.as_str(), *count))
    }

    /// Drops every entry.
    pub fn clear(&mut self) {
        self.counts.clear();
    }

    /// Shared walk for add and remove: bump each ancestor past the
    /// normalized prefix boundary.
    fn apply(&mut self, path: &str, prefix_to_skip: Option<&str>, action: CacheAction) {
        let separator = self.separator;
        let start = prefix_to_skip
            .map(|prefix| ensure_trailing_separator(prefix, separator).len())
            .unwrap_or(0);
        let sep_len = separator.len_utf8();

        for index in ancestor_boundaries(path, separator, start) {
            self.bump(&path[..index + sep_len], action);
        }
    }

    /// Applies a single +1/-1 delta to one directory key.
    fn bump(&mut self, directory: &str, action: CacheAction) {
        match action {
            CacheAction::Add => match self.counts.get_mut(directory) {
                Some(count) => *count += 1,
                None => {
                    self.counts.insert(directory.to_owned(), 1);
                }
            },
            CacheAction::Remove => {
                if let Some(count) = self.counts.get_mut(directory) {
                    *count -= 1;
                    if *count == 0 {
                        self.counts.remove(directory);
                    }
                }
            }
        }
    }
}

impl Default for DirectoryRefCountCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashMap;

    fn snapshot(cache: &DirectoryRefCountCache) -> HashMap<String, usize> {
        cache
            .iter()
            .map(|(dir, count)| (dir.to_owned(), count))
            .collect()
    }

    #[rstest]
    #[case("/A/B/C/D", 0, vec![0, 2, 4, 6])]
    #[case("/A/B/C/D", 5, vec![6])]
    #[case("/A/B/C/D", 7, vec![])]
    #[case("/A/B/C/D", 100, vec![])]
    #[case("no-separator", 0, vec![])]
    #[case("", 0, vec![])]
    fn test_ancestor_boundaries(
        #[case] path: &str,
        #[case] start: usize,
        #[case] expected: Vec<usize>,
    ) {
        let offsets: Vec<usize> = ancestor_boundaries(path, '/', start).collect();
        assert_eq!(offsets, expected);
    }

    #[test]
    fn test_add_path_no_prefix_touches_all_ancestors() {
        let mut cache = DirectoryRefCountCache::with_separator('/');
        cache.add_path("/A/B/C/D", None);

        let expected: HashMap<String, usize> = [("/", 1), ("/A/", 1), ("/A/B/", 1), ("/A/B/C/", 1)]
            .into_iter()
            .map(|(dir, count)| (dir.to_owned(), count))
            .collect();
        assert_eq!(snapshot(&cache), expected);
    }

    #[test]
    fn test_add_path_prefix_skips_boundary_and_above() {
        let mut cache = DirectoryRefCountCache::with_separator('/');
        cache.add_path("/A/B/C/D", Some("/A/B"));

        assert_eq!(cache.count("/A/B/C/"), 1);
        assert_eq!(cache.len(), 1);
        assert!(!cache.contains("/A/"));
        assert!(!cache.contains("/A/B/"));
    }

    #[test]
    fn test_prefix_with_trailing_separator_is_equivalent() {
        let mut bare = DirectoryRefCountCache::with_separator('/');
        let mut terminated = DirectoryRefCountCache::with_separator('/');
        bare.add_path("/A/B/C/D", Some("/A/B"));
        terminated.add_path("/A/B/C/D", Some("/A/B/"));

        assert_eq!(snapshot(&bare), snapshot(&terminated));
    }

    #[test]
    fn test_shared_ancestors_accumulate() {
        let mut cache = DirectoryRefCountCache::with_separator('/');
        cache.add_path("/A/B/X", Some("/"));
        cache.add_path("/A/B/Y", Some("/"));

        assert_eq!(cache.count("/A/"), 2);
        assert_eq!(cache.count("/A/B/"), 2);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_repeated_adds_count_up() {
        let mut cache = DirectoryRefCountCache::with_separator('/');
        for _ in 0..5 {
            cache.add_path("/A/B/C", None);
        }

        assert_eq!(cache.count("/"), 5);
        assert_eq!(cache.count("/A/"), 5);
        assert_eq!(cache.count("/A/B/"), 5);
    }

    #[test]
    fn test_balanced_add_remove_leaves_cache_empty() {
        let mut cache = DirectoryRefCountCache::with_separator('/');
        cache.add_path("/A/B/C/D", None);
        cache.remove_path("/A/B/C/D", None);

        assert!(cache.is_empty());
    }

    #[test]
    fn test_remove_to_zero_deletes_key() {
        let mut cache = DirectoryRefCountCache::with_separator('/');
        cache.add_path("/A/B/X", Some("/A"));
        cache.add_path("/A/B/Y", Some("/A"));
        cache.remove_path("/A/B/X", Some("/A"));

        // Shared ancestor stays at 1; nothing is left at 0.
        assert_eq!(cache.count("/A/B/"), 1);
        assert_eq!(cache.len(), 1);

        cache.remove_path("/A/B/Y", Some("/A"));
        assert!(!cache.contains("/A/B/"));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_remove_of_never_added_path_is_noop() {
        let mut cache = DirectoryRefCountCache::with_separator('/');
        cache.add_path("/A/B/C", Some("/"));
        let before = snapshot(&cache);

        cache.remove_path("/X/Y/Z", Some("/"));
        assert_eq!(snapshot(&cache), before);

        cache.remove_path("/X/Y/Z", None);
        assert_eq!(snapshot(&cache), before);
    }

    #[test]
    fn test_add_order_does_not_matter() {
        let mut forward = DirectoryRefCountCache::with_separator('/');
        forward.add_path("/A/B/C", None);
        forward.add_path("/A/B/D", None);

        let mut reversed = DirectoryRefCountCache::with_separator('/');
        reversed.add_path("/A/B/D", None);
        reversed.add_path("/A/B/C", None);

        assert_eq!(snapshot(&forward), snapshot(&reversed));
    }

    #[test]
    fn test_path_without_separator_past_boundary_is_noop() {
        let mut cache = DirectoryRefCountCache::with_separator('/');
        cache.add_path("/A/B/file.txt", Some("/A/B"));
        assert!(cache.is_empty());

        cache.add_path("relative-name", None);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_empty_prefix_behaves_like_none() {
        let mut with_empty = DirectoryRefCountCache::with_separator('/');
        let mut without = DirectoryRefCountCache::with_separator('/');
        with_empty.add_path("/A/B/C", Some(""));
        without.add_path("/A/B/C", None);

        assert_eq!(snapshot(&with_empty), snapshot(&without));
    }

    #[test]
    fn test_independent_caches_do_not_interact() {
        let mut first = DirectoryRefCountCache::with_separator('/');
        let mut second = DirectoryRefCountCache::with_separator('/');
        first.add_path("/A/B/C", None);

        assert!(second.is_empty());
        second.add_path("/A/B/C", None);
        first.clear();
        assert_eq!(second.count("/A/"), 1);
    }

    #[test]
    fn test_backslash_separator_convention() {
        let mut cache = DirectoryRefCountCache::with_separator('\\');
        cache.add_path("C:\\repo\\src\\lib.rs", Some("C:\\repo"));

        assert_eq!(cache.count("C:\\repo\\src\\"), 1);
        assert_eq!(cache.len(), 1);
    }
}
