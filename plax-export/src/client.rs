use plax_core::{Catalog, CatalogError, CatalogNode, Library, matches_filter};
use reqwest::StatusCode;
use tokio::time::Duration;

use crate::download::AssetSource;
use crate::error::DownloadError;
use crate::types::{ContainerResponse, MediaContainer};

/// Bound on every catalog request and asset fetch.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const TOKEN_HEADER: &str = "X-Plex-Token";

/// HTTP client for a Plex Media Server.
///
/// Cloning is cheap; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct PlexClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl PlexClient {
    /// Build a client for `base_url` (a trailing `/` is ignored).
    pub fn new(base_url: &str, token: &str) -> Result<Self, CatalogError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| CatalogError::unreachable(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET a catalog endpoint and decode its `MediaContainer`.
    async fn get_container(&self, path: &str) -> Result<MediaContainer, CatalogError> {
        let url = self.url(path);
        log::debug!("GET {}", url);

        let resp = self
            .http
            .get(&url)
            .header(TOKEN_HEADER, &self.token)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| CatalogError::unreachable(format!("GET {url}: {e}")))?;

        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            return Err(CatalogError::not_found(path));
        }
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(CatalogError::Unauthorized(status.as_u16()));
        }
        if !status.is_success() {
            return Err(CatalogError::unreachable(format!(
                "GET {url} returned {}",
                status.as_u16()
            )));
        }

        let text = resp
            .text()
            .await
            .map_err(|e| CatalogError::unreachable(format!("GET {url}: {e}")))?;
        let parsed: ContainerResponse = serde_json::from_str(&text).map_err(|e| {
            CatalogError::invalid_response(format!(
                "{e}. Response: {}",
                truncate(&text, 200)
            ))
        })?;

        Ok(parsed.media_container)
    }

    async fn get_nodes(&self, path: &str) -> Result<Vec<CatalogNode>, CatalogError> {
        let container = self.get_container(path).await?;
        Ok(container
            .metadata
            .into_iter()
            .map(CatalogNode::from)
            .collect())
    }
}

impl Catalog for PlexClient {
    async fn libraries(&self, filter: &str) -> Result<Vec<Library>, CatalogError> {
        let container = self.get_container("/library/sections").await?;
        Ok(container
            .directories
            .into_iter()
            .filter(|dir| matches_filter(filter, &dir.title))
            .map(Library::from)
            .collect())
    }

    async fn library_items(&self, library: &Library) -> Result<Vec<CatalogNode>, CatalogError> {
        self.get_nodes(&format!("/library/sections/{}/all", library.key))
            .await
    }

    async fn children(&self, node: &CatalogNode) -> Result<Vec<CatalogNode>, CatalogError> {
        self.get_nodes(&format!("/library/metadata/{}/children", node.rating_key))
            .await
    }
}

impl AssetSource for PlexClient {
    fn asset_url(&self, asset_path: &str) -> String {
        self.url(asset_path)
    }

    async fn fetch_asset(&self, asset_path: &str) -> Result<Vec<u8>, DownloadError> {
        let url = self.asset_url(asset_path);

        let resp = self
            .http
            .get(&url)
            .header(TOKEN_HEADER, &self.token)
            .send()
            .await
            .map_err(|e| DownloadError::fetch(&url, format!("error executing GET {url}: {e}")))?;

        let status = resp.status();
        if status != StatusCode::OK {
            return Err(DownloadError::fetch(
                &url,
                format!("GET {url} returned {}", status.as_u16()),
            ));
        }

        let bytes = resp
            .bytes()
            .await
            .map_err(|e| DownloadError::fetch(&url, format!("error reading GET {url}: {e}")))?;
        Ok(bytes.to_vec())
    }
}

/// Cut `text` to at most `max` bytes on a char boundary.
fn truncate(text: &str, max: usize) -> &str {
    if text.len() <= max {
        return text;
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}
