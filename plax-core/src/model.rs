use std::path::{Path, PathBuf};

/// Kind of a top-level library, as reported by the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LibraryType {
    Movie,
    Show,
    Artist,
    /// Any library kind plax does not know how to walk (e.g. "photo").
    Other(String),
}

impl LibraryType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Movie => "movie",
            Self::Show => "show",
            Self::Artist => "artist",
            Self::Other(s) => s,
        }
    }
}

impl From<&str> for LibraryType {
    fn from(s: &str) -> Self {
        match s {
            "movie" => Self::Movie,
            "show" => Self::Show,
            "artist" => Self::Artist,
            other => Self::Other(other.to_string()),
        }
    }
}

impl std::fmt::Display for LibraryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A top-level catalog collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Library {
    pub title: String,
    /// Catalog key used to list the library's items.
    pub key: String,
    pub kind: LibraryType,
}

/// Kind of a catalog node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Movie,
    Show,
    Season,
    Episode,
    Artist,
    Album,
    Track,
    Other(String),
}

impl NodeKind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Movie => "movie",
            Self::Show => "show",
            Self::Season => "season",
            Self::Episode => "episode",
            Self::Artist => "artist",
            Self::Album => "album",
            Self::Track => "track",
            Self::Other(s) => s,
        }
    }
}

impl From<&str> for NodeKind {
    fn from(s: &str) -> Self {
        match s {
            "movie" => Self::Movie,
            "show" => Self::Show,
            "season" => Self::Season,
            "episode" => Self::Episode,
            "artist" => Self::Artist,
            "album" => Self::Album,
            "track" => Self::Track,
            other => Self::Other(other.to_string()),
        }
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One file belonging to a media item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaPart {
    /// Absolute path of the file on the media server's disk.
    pub file: Option<String>,
}

/// A playable version of a leaf node (one movie can have several).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaItem {
    pub parts: Vec<MediaPart>,
}

/// A metadata record fetched from the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogNode {
    pub rating_key: String,
    pub title: String,
    pub kind: NodeKind,
    /// Server-relative path of the primary image.
    pub thumb: Option<String>,
    /// Server-relative path of the background image.
    pub art: Option<String>,
    /// Only populated on leaf nodes.
    pub media: Vec<MediaItem>,
}

impl CatalogNode {
    pub fn new(rating_key: impl Into<String>, title: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            rating_key: rating_key.into(),
            title: title.into(),
            kind,
            thumb: None,
            art: None,
            media: Vec::new(),
        }
    }

    pub fn with_thumb(mut self, thumb: impl Into<String>) -> Self {
        self.thumb = Some(thumb.into());
        self
    }

    pub fn with_art(mut self, art: impl Into<String>) -> Self {
        self.art = Some(art.into());
        self
    }

    /// Attach a single-part media item pointing at `file`.
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.media.push(MediaItem {
            parts: vec![MediaPart {
                file: Some(file.into()),
            }],
        });
        self
    }

    /// First non-empty media file path, in media/part order.
    pub fn first_file(&self) -> Option<&Path> {
        self.media
            .iter()
            .flat_map(|m| m.parts.iter())
            .filter_map(|p| p.file.as_deref())
            .find(|f| !f.is_empty())
            .map(Path::new)
    }
}

/// The two image assets a piece of content can own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    /// Background / fan art.
    Background,
    /// Poster, or cover for albums.
    Primary,
}

impl AssetKind {
    /// File name the asset is written under for content of `kind`.
    pub fn file_name(&self, kind: &NodeKind) -> &'static str {
        match (self, kind) {
            (Self::Background, _) => "background.jpg",
            (Self::Primary, NodeKind::Album) => "cover.jpg",
            (Self::Primary, _) => "poster.jpg",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Background => "background",
            Self::Primary => "poster",
        }
    }
}

/// A flattened unit of export work: one movie, show, season, artist or album.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportableContent {
    pub title: String,
    pub kind: NodeKind,
    /// `None` when no descendant media file could be found.
    pub directory: Option<PathBuf>,
    pub thumb: Option<String>,
    pub art: Option<String>,
}

impl ExportableContent {
    pub fn from_node(node: &CatalogNode, directory: Option<PathBuf>) -> Self {
        Self {
            title: node.title.clone(),
            kind: node.kind.clone(),
            directory,
            thumb: node.thumb.clone(),
            art: node.art.clone(),
        }
    }

    /// Asset paths to export, in fetch order (background first).
    pub fn assets(&self) -> Vec<(AssetKind, &str)> {
        let mut assets = Vec::with_capacity(2);
        if let Some(art) = self.art.as_deref().filter(|a| !a.is_empty()) {
            assets.push((AssetKind::Background, art));
        }
        if let Some(thumb) = self.thumb.as_deref().filter(|t| !t.is_empty()) {
            assets.push((AssetKind::Primary, thumb));
        }
        assets
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn album_primary_is_cover() {
        assert_eq!(AssetKind::Primary.file_name(&NodeKind::Album), "cover.jpg");
        for kind in [
            NodeKind::Movie,
            NodeKind::Show,
            NodeKind::Season,
            NodeKind::Artist,
        ] {
            assert_eq!(AssetKind::Primary.file_name(&kind), "poster.jpg");
            assert_eq!(AssetKind::Background.file_name(&kind), "background.jpg");
        }
        assert_eq!(
            AssetKind::Background.file_name(&NodeKind::Album),
            "background.jpg"
        );
    }

    #[test]
    fn unknown_kinds_keep_raw_string() {
        assert_eq!(LibraryType::from("photo"), LibraryType::Other("photo".into()));
        assert_eq!(LibraryType::from("photo").to_string(), "photo");
        assert_eq!(NodeKind::from("clip").as_str(), "clip");
        assert_eq!(NodeKind::from("season"), NodeKind::Season);
    }

    #[test]
    fn first_file_skips_empty_parts() {
        let mut node = CatalogNode::new("1", "Movie", NodeKind::Movie);
        node.media.push(MediaItem {
            parts: vec![MediaPart { file: None }, MediaPart { file: Some(String::new()) }],
        });
        assert_eq!(node.first_file(), None);

        let node = node.with_file("/media/Movies/Heat (1995)/Heat.mkv");
        assert_eq!(
            node.first_file(),
            Some(Path::new("/media/Movies/Heat (1995)/Heat.mkv"))
        );
    }

    #[test]
    fn assets_skip_missing_paths_and_keep_order() {
        let node = CatalogNode::new("1", "Heat", NodeKind::Movie)
            .with_thumb("/library/metadata/1/thumb/1")
            .with_art("/library/metadata/1/art/1");
        let content = ExportableContent::from_node(&node, None);
        let kinds: Vec<_> = content.assets().into_iter().map(|(k, _)| k).collect();
        assert_eq!(kinds, vec![AssetKind::Background, AssetKind::Primary]);

        let bare = ExportableContent::from_node(&CatalogNode::new("2", "x", NodeKind::Show), None);
        assert!(bare.assets().is_empty());
    }
}
