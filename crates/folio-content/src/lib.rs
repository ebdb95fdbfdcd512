//! Content source abstraction for Folio documentation sites.
//!
//! Navigation resolution needs to know which documentation units exist
//! before it accepts a page id. This crate provides the [`ContentSource`]
//! trait for that lookup, decoupled from where documents live:
//!
//! - [`FsContent`] walks a docs directory of `.md`/`.mdx` files
//! - [`MockContent`] keeps documents in memory (behind the `mock` feature)
//!
//! # Document ids
//!
//! Ids are relative paths without extension (`installation`,
//! `guides/deploy`). A front matter `id` replaces the file stem, so
//! `guides/02-deploy.md` with `id: deploy` is known as `guides/deploy`.
//!
//! # Example
//!
//! ```ignore
//! use std::path::PathBuf;
//! use folio_content::{ContentSource, FsContent};
//!
//! let content = FsContent::new(PathBuf::from("docs"));
//! for doc in content.scan()? {
//!     println!("{}: {}", doc.id, doc.title);
//! }
//! ```

mod content;
mod front_matter;
mod fs;
#[cfg(feature = "mock")]
mod mock;

pub use content::{ContentError, ContentErrorKind, ContentSource, Document};
pub use fs::FsContent;
#[cfg(feature = "mock")]
pub use mock::MockContent;
