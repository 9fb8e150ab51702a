//! core
//!
//! Front-matter value model, codec, and configuration.
//!
//! # Modules
//!
//! - [`types`] - `MetaValue` and the ordered `Metadata` mapping
//! - [`scan`] - Whitespace scanning helpers
//! - [`frontmatter`] - Split, parse, serialize, and assemble documents
//! - [`config`] - Configuration schema and loading
//!
//! # Design Principles
//!
//! - The codec is pure: no I/O, no hidden state
//! - Bodies are never parsed and are preserved byte for byte
//! - Malformed blocks degrade to "no metadata", never to an error

pub mod config;
pub mod frontmatter;
pub mod scan;
pub mod types;
