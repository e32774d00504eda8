//! Flatten a library's node tree into exportable content.

use crate::catalog::Catalog;
use crate::error::CatalogError;
use crate::model::{CatalogNode, ExportableContent, Library, LibraryType};
use crate::resolver;

/// Labels for the two listing levels below a top-level item, used in errors.
struct Levels {
    middle: &'static str,
    leaf: &'static str,
}

const SHOW_LEVELS: Levels = Levels {
    middle: "seasons",
    leaf: "episodes",
};

const ARTIST_LEVELS: Levels = Levels {
    middle: "albums",
    leaf: "tracks",
};

/// List every exportable item of `library`, in catalog order.
///
/// Movie libraries yield one record per movie. Show and artist libraries
/// yield each season (album) followed by its show (artist) once all of its
/// children have been resolved. Episodes and tracks are only used to find
/// directories and are never emitted.
///
/// Any failed listing aborts the whole library; the error names the item
/// whose children could not be listed.
pub async fn library_contents<C: Catalog>(
    catalog: &C,
    library: &Library,
) -> Result<Vec<ExportableContent>, CatalogError> {
    match &library.kind {
        LibraryType::Movie => movie_contents(catalog, library).await,
        LibraryType::Show => nested_contents(catalog, library, &SHOW_LEVELS).await,
        LibraryType::Artist => nested_contents(catalog, library, &ARTIST_LEVELS).await,
        LibraryType::Other(kind) => Err(CatalogError::UnsupportedLibraryType(kind.clone())),
    }
}

async fn top_level_items<C: Catalog>(
    catalog: &C,
    library: &Library,
) -> Result<Vec<CatalogNode>, CatalogError> {
    catalog
        .library_items(library)
        .await
        .map_err(|e| CatalogError::listing(&library.title, "contents", e))
}

async fn movie_contents<C: Catalog>(
    catalog: &C,
    library: &Library,
) -> Result<Vec<ExportableContent>, CatalogError> {
    let movies = top_level_items(catalog, library).await?;
    let contents = movies
        .iter()
        .map(|movie| ExportableContent::from_node(movie, resolver::leaf_directory(movie)))
        .collect();
    Ok(contents)
}

async fn nested_contents<C: Catalog>(
    catalog: &C,
    library: &Library,
    levels: &Levels,
) -> Result<Vec<ExportableContent>, CatalogError> {
    let tops = top_level_items(catalog, library).await?;

    let mut contents = Vec::new();
    for top in &tops {
        let middles = catalog
            .children(top)
            .await
            .map_err(|e| CatalogError::listing(&top.title, levels.middle, e))?;

        let mut middle_dirs = Vec::with_capacity(middles.len());
        for middle in &middles {
            let leaves = catalog
                .children(middle)
                .await
                .map_err(|e| CatalogError::listing(&top.title, levels.leaf, e))?;

            let dir = resolver::resolve(middle, leaves.iter().map(resolver::leaf_directory));
            if dir.is_none() {
                log::debug!(
                    "{} / {}: no {} with a media file",
                    top.title,
                    middle.title,
                    levels.leaf
                );
            }
            contents.push(ExportableContent::from_node(middle, dir.clone()));
            middle_dirs.push(dir);
        }

        let top_dir = resolver::resolve(top, middle_dirs);
        contents.push(ExportableContent::from_node(top, top_dir));
    }

    Ok(contents)
}

#[cfg(test)]
#[path = "tests/flatten_tests.rs"]
mod tests;
