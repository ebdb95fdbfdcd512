//! Navigation tree resolution for Folio documentation sites.
//!
//! This crate provides:
//! - [`NavigationSpec`]: author-declared categories and their ordered page ids
//! - [`Editions`]: independent, named snapshots of a navigation spec
//! - [`Resolver`]: validation against a [`ContentSource`] and tree building
//! - [`NavigationTree`]: the render-ready sidebar, with breadcrumb and
//!   previous/next lookups
//!
//! Declaration order is the sidebar order. Nothing is sorted.
//!
//! # Quick Start
//!
//! ```ignore
//! use folio_content::FsContent;
//! use folio_nav::{NavigationSpec, ResolveOptions, Resolver};
//!
//! let spec = NavigationSpec::from_yaml(
//!     "Getting Started: [installation, overview]\nFeatures: [data, metrics]\n",
//! )?;
//! let content = FsContent::new("docs".into());
//! let tree = Resolver::new(&content, ResolveOptions::default()).resolve(&spec)?;
//!
//! assert_eq!(tree.categories()[0].label, "Getting Started");
//! ```
//!
//! [`ContentSource`]: folio_content::ContentSource

mod edition;
mod error;
mod resolver;
mod spec;
mod tree;

pub use edition::{DEFAULT_EDITION, Edition, Editions};
pub use error::NavigationError;
pub use resolver::{EmptyCategories, ResolveOptions, Resolver};
pub use spec::{CategorySpec, NavigationSpec};
pub use tree::{Breadcrumb, Category, NavigationTree, Neighbors, PageRef};
