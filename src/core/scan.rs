//! core::scan
//!
//! Whitespace scanning helpers used by the front-matter parser.
//!
//! Only the ASCII space character counts as whitespace here. Tabs and other
//! blanks are part of keys and values.

/// Byte offset of the first non-space character at or after `start`.
///
/// Returns `None` if `start` is past the end of `line` or the rest of the
/// line is spaces only.
///
/// # Example
///
/// ```
/// use frontmeta::core::scan::first_non_space;
///
/// assert_eq!(first_non_space("key:  value", 4), Some(6));
/// assert_eq!(first_non_space("key:   ", 4), None);
/// ```
pub fn first_non_space(line: &str, start: usize) -> Option<usize> {
    let rest = line.get(start..)?;
    rest.find(|c: char| c != ' ').map(|offset| start + offset)
}

/// The text from the first non-space character at or after `start`.
///
/// Returns `None` when there is nothing but spaces left.
pub fn rest_after_spaces(line: &str, start: usize) -> Option<&str> {
    first_non_space(line, start).map(|idx| &line[idx..])
}

/// Check whether `line` is a list item line (`- item`, optionally indented).
///
/// Returns the offset of the `-` marker when it is.
pub fn list_marker(line: &str) -> Option<usize> {
    let idx = first_non_space(line, 0)?;
    (line.as_bytes()[idx] == b'-').then_some(idx)
}
