//! Catalog model and asset-directory derivation for plax.
//!
//! This crate knows nothing about HTTP. It walks a [`Catalog`] (anything that
//! can list libraries and node children) and turns each library into a flat
//! list of [`ExportableContent`] records whose directories are derived from
//! the media file paths found further down the tree.

pub mod catalog;
pub mod error;
pub mod flatten;
pub mod model;
pub mod resolver;

pub use catalog::{Catalog, matches_filter};
pub use error::CatalogError;
pub use flatten::library_contents;
pub use model::{
    AssetKind, CatalogNode, ExportableContent, Library, LibraryType, MediaItem, MediaPart,
    NodeKind,
};
