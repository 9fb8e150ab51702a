//! core::frontmatter
//!
//! Front-matter codec: split, parse, serialize, assemble.
//!
//! # Format
//!
//! ```text
//! ---
//! title: Hello
//! draft:
//! tags:
//!   - a
//!   - b
//! ---
//! Body text, never parsed.
//! ```
//!
//! The block is recognised only when the document starts with a `---` line
//! at offset 0 and a later line is exactly `---`. Anything else is body.
//!
//! Every function here is pure. The body returned by [`split`] keeps the
//! newline that ends the closing marker line, so
//! `assemble(&serialize(&parse(s.metadata), style), s.body)` reproduces a
//! canonical document byte for byte.
//!
//! # Example
//!
//! ```
//! use frontmeta::core::frontmatter::{assemble, parse, serialize, split, ListStyle};
//! use frontmeta::core::types::MetaValue;
//!
//! let doc = "---\ntitle: Hello\n---\nBody\n";
//! let parts = split(doc);
//! let mut meta = parse(parts.metadata);
//! assert_eq!(meta.get("title"), Some(&MetaValue::scalar("Hello")));
//!
//! meta.insert("draft", "yes");
//! let text = assemble(&serialize(&meta, ListStyle::Block), parts.body);
//! assert_eq!(text, "---\ntitle: Hello\ndraft: yes\n---\nBody\n");
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::scan::{first_non_space, list_marker, rest_after_spaces};
use super::types::{MetaValue, Metadata};

/// Marker line delimiting the metadata block.
pub const MARKER: &str = "---";

/// Key assigned to lines without a `:` separator.
pub const UNKNOWN_KEY: &str = "unknown";

/// How list values are written back out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListStyle {
    /// `key:` followed by one indented `- item` line per item.
    ///
    /// Parses back into the same list.
    #[default]
    Block,
    /// Items comma-joined on the key line (`key: a,b`).
    ///
    /// Parses back as a single scalar.
    Inline,
}

impl std::fmt::Display for ListStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ListStyle::Block => write!(f, "block"),
            ListStyle::Inline => write!(f, "inline"),
        }
    }
}

/// A document split into its metadata text and body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Split<'a> {
    /// Text between the marker lines, without the markers and their newlines.
    pub metadata: &'a str,
    /// Everything after the closing marker, starting with its line break.
    pub body: &'a str,
    region: bool,
}

impl Split<'_> {
    /// Whether the document had a complete metadata region.
    pub fn has_region(&self) -> bool {
        self.region
    }
}

/// Split a document into metadata text and body.
///
/// A missing or unterminated block yields empty metadata and the whole
/// input as body.
pub fn split(text: &str) -> Split<'_> {
    let no_region = Split {
        metadata: "",
        body: text,
        region: false,
    };

    let opening = "---\n";
    let Some(after_open) = text.strip_prefix(opening) else {
        return no_region;
    };

    // Walk the remaining lines looking for one that is exactly the marker.
    let mut line_start = 0;
    loop {
        let rest = &after_open[line_start..];
        let line_end = rest.find('\n').map_or(after_open.len(), |i| line_start + i);
        if &after_open[line_start..line_end] == MARKER {
            // Drop the newline that precedes the closing marker, if any.
            let metadata = after_open[..line_start]
                .strip_suffix('\n')
                .unwrap_or(&after_open[..line_start]);
            let body_start = opening.len() + line_start + MARKER.len();
            return Split {
                metadata,
                body: &text[body_start..],
                region: true,
            };
        }
        if line_end >= after_open.len() {
            log::debug!("[FRONTMATTER] opening marker without closing marker, treating as body");
            return no_region;
        }
        line_start = line_end + 1;
    }
}

/// Parse metadata text into an ordered mapping.
///
/// See the module docs for the accepted format. Lines without a colon are
/// stored under [`UNKNOWN_KEY`], so several of them collapse into a single
/// entry. Duplicate keys keep their first position and their last value.
pub fn parse(metadata: &str) -> Metadata {
    let mut map = Metadata::new();
    if metadata.is_empty() {
        return map;
    }

    let lines: Vec<&str> = metadata.split('\n').collect();
    let mut i = 0;
    while i < lines.len() {
        let line = lines[i];
        let (key, value_start) = match line.find(':') {
            Some(sep) => (&line[..sep], sep + 1),
            None => {
                log::debug!("[FRONTMATTER] line {} has no ':' separator: {:?}", i + 1, line);
                (UNKNOWN_KEY, 0)
            }
        };

        let value = match rest_after_spaces(line, value_start) {
            Some(v) => MetaValue::scalar(v),
            None => {
                let (items, consumed) = collect_list(&lines[i + 1..]);
                i += consumed;
                if items.is_empty() {
                    MetaValue::Null
                } else {
                    MetaValue::List(items)
                }
            }
        };

        map.insert(key, value);
        i += 1;
    }

    map
}

/// Collect consecutive list item lines. Returns the items and how many
/// lines were consumed.
fn collect_list(lines: &[&str]) -> (Vec<String>, usize) {
    let items: Vec<String> = lines
        .iter()
        .map_while(|line| {
            let dash = list_marker(line)?;
            let item = first_non_space(line, dash + 1).map_or("", |idx| &line[idx..]);
            Some(item.to_string())
        })
        .collect();
    let consumed = items.len();
    (items, consumed)
}

/// Serialize a mapping into a full metadata block, markers included.
///
/// The block does not end with a newline; the body supplies it.
pub fn serialize(metadata: &Metadata, style: ListStyle) -> String {
    let mut lines = Vec::with_capacity(metadata.len());
    for (key, value) in metadata.iter() {
        match (value, style) {
            (MetaValue::List(items), ListStyle::Block) if !items.is_empty() => {
                lines.push(format!("{}:", key));
                lines.extend(items.iter().map(|item| format!("  - {}", item)));
            }
            (MetaValue::List(items), _) => lines.push(format!("{}: {}", key, items.join(","))),
            (MetaValue::Scalar(s), _) => lines.push(format!("{}: {}", key, s)),
            (MetaValue::Null, _) => lines.push(format!("{}: ", key)),
        }
    }

    format!("{}\n{}\n{}", MARKER, lines.join("\n"), MARKER)
}

/// Join a serialized metadata block and a body.
///
/// Bodies produced by [`split`] start with the closing marker's line break
/// (or are empty) and are appended as-is. A body from a document that had no
/// block gets a line break inserted, otherwise the closing marker would run
/// into the first body line.
pub fn assemble(metadata_block: &str, body: &str) -> String {
    let mut text = String::with_capacity(metadata_block.len() + body.len() + 1);
    text.push_str(metadata_block);
    if !body.is_empty() && !body.starts_with('\n') {
        text.push('\n');
    }
    text.push_str(body);
    text
}

/// An entry that [`serialize`] cannot write so that [`parse`] reads it back.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntryError {
    #[error("key must not be empty")]
    EmptyKey,

    #[error("key {0:?} contains ':' or a line break")]
    KeySeparator(String),

    #[error("key {0:?} starts with '-' and would read back as a list item")]
    KeyListMarker(String),

    #[error("value for key {0:?} contains a line break")]
    MultilineValue(String),
}

/// Check that an entry survives a serialize/parse cycle without leaking
/// into neighbouring keys or the body.
///
/// # Errors
///
/// - [`EntryError::EmptyKey`] for an empty key
/// - [`EntryError::KeySeparator`] if the key contains `:`, `\n` or `\r`
/// - [`EntryError::KeyListMarker`] if the key's first non-space character
///   is `-`
/// - [`EntryError::MultilineValue`] if a scalar or list item contains `\n`
pub fn check_entry(key: &str, value: &MetaValue) -> Result<(), EntryError> {
    if key.is_empty() {
        return Err(EntryError::EmptyKey);
    }
    if key.contains([':', '\n', '\r']) {
        return Err(EntryError::KeySeparator(key.to_string()));
    }
    if list_marker(key).is_some() {
        return Err(EntryError::KeyListMarker(key.to_string()));
    }

    let multiline = match value {
        MetaValue::Null => false,
        MetaValue::Scalar(s) => s.contains('\n'),
        MetaValue::List(items) => items.iter().any(|item| item.contains('\n')),
    };
    if multiline {
        return Err(EntryError::MultilineValue(key.to_string()));
    }
    Ok(())
}
