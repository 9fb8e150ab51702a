//! document
//!
//! Host document capability.
//!
//! # Architecture
//!
//! The live store never touches the file system itself. It talks to a
//! [`Document`], which has multiple implementations:
//!
//! - [`FsDocument`]: UTF-8 file on disk with atomic writes
//! - [`mock::MockDocument`]: In-memory text for deterministic testing
//!
//! Hosts embedding the library (editors, sync daemons) implement
//! [`Document`] for their own buffers.

mod fs_document;
pub mod mock;
mod traits;

pub use fs_document::FsDocument;
pub use traits::{Document, DocumentError};
