use std::borrow::Cow;

/// Returns `path` guaranteed to end with `separator`, borrowing when it
/// already does.
///
/// An empty path is returned unchanged: an empty prefix means "no prefix",
/// not the filesystem root.
#[must_use]
pub fn ensure_trailing_separator(path: &str, separator: char) -> Cow<'_, str> {
    if path.is_empty() || path.ends_with(separator) {
        Cow::Borrowed(path)
    } else {
        let mut owned = String::with_capacity(path.len() + separator.len_utf8());
        owned.push_str(path);
        owned.push(separator);
        Cow::Owned(owned)
    }
}

/// Removes a single trailing `separator` from `path`, if present.
///
/// A bare root (`"/"`) is left intact so the result still names a directory.
#[must_use]
pub fn strip_trailing_separator(path: &str, separator: char) -> &str {
    if path.len() > separator.len_utf8() {
        path.strip_suffix(separator).unwrap_or(path)
    } else {
        path
    }
}
