use std::future::Future;

use crate::error::CatalogError;
use crate::model::{CatalogNode, Library};

/// Read-only access to a hierarchical media catalog.
///
/// The futures are `Send` so one catalog handle can be shared by library
/// workers running on a multi-threaded runtime.
pub trait Catalog {
    /// All libraries whose title matches `filter` (see [`matches_filter`]).
    fn libraries(
        &self,
        filter: &str,
    ) -> impl Future<Output = Result<Vec<Library>, CatalogError>> + Send;

    /// Top-level items of a library (movies, shows or artists).
    fn library_items(
        &self,
        library: &Library,
    ) -> impl Future<Output = Result<Vec<CatalogNode>, CatalogError>> + Send;

    /// Direct children of a show, season, artist or album.
    fn children(
        &self,
        node: &CatalogNode,
    ) -> impl Future<Output = Result<Vec<CatalogNode>, CatalogError>> + Send;
}

/// Library name filter: empty or `all` selects everything, anything else
/// must equal the title exactly.
pub fn matches_filter(filter: &str, title: &str) -> bool {
    filter.is_empty() || filter == "all" || filter == title
}
