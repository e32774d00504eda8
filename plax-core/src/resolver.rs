//! Directory derivation for catalog nodes.
//!
//! The catalog's own titles are never used for paths. A node's directory is
//! derived from the media files found beneath it:
//!
//! - movie, episode, track: the directory holding the node's media file
//! - season, album: the directory of the first child that has one
//! - show, artist: the parent of the first child directory found
//!
//! The first-hit rule is deliberate and observable: a show whose first
//! season with files lives somewhere unusual gets that season's parent, and
//! later seasons are never consulted.

use std::path::{Path, PathBuf};

use crate::model::{CatalogNode, NodeKind};

/// How a node kind maps to a directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Derivation {
    /// Directory containing the node's own media file.
    MediaFile,
    /// Directory of the first child that resolves.
    FirstChild,
    /// Parent of the first child directory that resolves.
    ParentOfFirstChild,
}

impl Derivation {
    /// `None` for kinds that never own a directory.
    pub fn for_kind(kind: &NodeKind) -> Option<Self> {
        match kind {
            NodeKind::Movie | NodeKind::Episode | NodeKind::Track => Some(Self::MediaFile),
            NodeKind::Season | NodeKind::Album => Some(Self::FirstChild),
            NodeKind::Show | NodeKind::Artist => Some(Self::ParentOfFirstChild),
            NodeKind::Other(_) => None,
        }
    }
}

/// Resolve a node's directory from its children's already-resolved
/// directories.
///
/// `children` is consumed lazily and iteration stops at the first child that
/// resolves, so callers can pass `iter().map(leaf_directory)` without paying
/// for siblings after the hit. Leaf kinds ignore `children`.
pub fn resolve<I>(node: &CatalogNode, children: I) -> Option<PathBuf>
where
    I: IntoIterator<Item = Option<PathBuf>>,
{
    match Derivation::for_kind(&node.kind)? {
        Derivation::MediaFile => leaf_directory(node),
        Derivation::FirstChild => first_resolved(children),
        Derivation::ParentOfFirstChild => first_resolved(children).and_then(|d| parent_dir(&d)),
    }
}

/// Directory holding a leaf node's first media file.
pub fn leaf_directory(node: &CatalogNode) -> Option<PathBuf> {
    node.first_file().and_then(parent_dir)
}

/// First directory in `dirs` that is present.
pub fn first_resolved<I>(dirs: I) -> Option<PathBuf>
where
    I: IntoIterator<Item = Option<PathBuf>>,
{
    dirs.into_iter().flatten().next()
}

fn parent_dir(path: &Path) -> Option<PathBuf> {
    path.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
}

#[cfg(test)]
#[path = "tests/resolver_tests.rs"]
mod tests;
