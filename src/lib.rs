//! frontmeta - Live front-matter metadata for plain-text documents
//!
//! frontmeta reads the `---` delimited metadata block at the top of a
//! document into an ordered key/value mapping, and writes the document back
//! every time the mapping changes. The document body is never modified.
//!
//! # Architecture
//!
//! The codebase is layered:
//!
//! - [`cli`] - Command-line interface layer (`fmeta` binary)
//! - [`vault`] - Lookup by root-relative path or by document handle
//! - [`store`] - Live metadata that persists on every mutation
//! - [`document`] - Host document capability (file system, in-memory)
//! - [`core`] - Codec, value types, configuration
//! - [`ui`] - User-facing output
//!
//! # Invariants
//!
//! 1. Key order is the order of first appearance
//! 2. Loading a document never writes it
//! 3. Setting a value equal to the current one performs no I/O
//! 4. Persisted text is always the regenerated block followed by the body
//!    captured at the last load

pub mod cli;
pub mod core;
pub mod document;
pub mod store;
pub mod ui;
pub mod vault;
