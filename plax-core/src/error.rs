use thiserror::Error;

/// Errors raised while reading or walking the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Transport failure or unexpected HTTP status talking to the catalog
    #[error("catalog unreachable: {0}")]
    Unreachable(String),

    /// The catalog has no item at the requested key
    #[error("catalog item not found: {0}")]
    NotFound(String),

    /// The catalog rejected the auth token
    #[error("catalog rejected credentials (HTTP {0})")]
    Unauthorized(u16),

    /// The response body could not be decoded
    #[error("invalid catalog response: {0}")]
    InvalidResponse(String),

    /// The library kind has no traversal rule
    #[error("unsupported library type: {0}")]
    UnsupportedLibraryType(String),

    /// A child listing failed partway through a library
    #[error("error retrieving {parent} {listing}: {source}")]
    Listing {
        parent: String,
        listing: &'static str,
        #[source]
        source: Box<CatalogError>,
    },
}

impl CatalogError {
    pub fn unreachable(msg: impl Into<String>) -> Self {
        Self::Unreachable(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn invalid_response(msg: impl Into<String>) -> Self {
        Self::InvalidResponse(msg.into())
    }

    /// Wrap a child-listing failure with the parent it was listed under.
    pub fn listing(parent: &str, listing: &'static str, source: CatalogError) -> Self {
        Self::Listing {
            parent: parent.to_string(),
            listing,
            source: Box::new(source),
        }
    }

    /// The innermost error, with listing context peeled off.
    pub fn root_cause(&self) -> &CatalogError {
        match self {
            Self::Listing { source, .. } => source.root_cause(),
            other => other,
        }
    }
}
