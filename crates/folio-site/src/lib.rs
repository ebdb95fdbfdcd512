//! Site composition for Folio.
//!
//! This crate ties the pieces together for one build:
//! - [`load_editions`]: reads the YAML sidebar file of every declared edition
//! - [`Site::compose`]: selects an edition, resolves its navigation tree and
//!   builds the [`SiteConfig`](folio_config::SiteConfig) against it
//! - [`SiteManifest`]: the serializable result handed to the rendering host
//!
//! # Quick Start
//!
//! ```ignore
//! use folio_config::Config;
//! use folio_content::FsContent;
//! use folio_site::Site;
//!
//! let config = Config::load(None, None)?;
//! let content = FsContent::new(config.docs_resolved.source_dir.clone());
//! let site = Site::compose(&config, &content, None)?;
//!
//! println!("{}", site.manifest().to_json()?);
//! ```

mod error;
mod loader;
mod manifest;
mod site;

pub use error::SiteError;
pub use loader::load_editions;
pub use manifest::{ManifestCategory, ManifestPage, SiteManifest};
pub use site::Site;
