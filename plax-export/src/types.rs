//! Plex JSON response shapes.
//!
//! Every endpoint wraps its payload in a `MediaContainer`. Library sections
//! come back under `Directory`, metadata listings under `Metadata`.

use plax_core::{CatalogNode, Library, LibraryType, MediaItem, MediaPart, NodeKind};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ContainerResponse {
    #[serde(rename = "MediaContainer")]
    pub media_container: MediaContainer,
}

#[derive(Debug, Default, Deserialize)]
pub struct MediaContainer {
    #[serde(rename = "Directory", default)]
    pub directories: Vec<SectionDirectory>,
    #[serde(rename = "Metadata", default)]
    pub metadata: Vec<Metadata>,
}

/// One library section from `/library/sections`.
#[derive(Debug, Clone, Deserialize)]
pub struct SectionDirectory {
    pub key: String,
    pub title: String,
    #[serde(rename = "type")]
    pub section_type: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    #[serde(default)]
    pub rating_key: String,
    #[serde(default)]
    pub title: String,
    #[serde(rename = "type", default)]
    pub item_type: String,
    #[serde(default)]
    pub thumb: Option<String>,
    #[serde(default)]
    pub art: Option<String>,
    #[serde(rename = "Media", default)]
    pub media: Vec<Media>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Media {
    #[serde(rename = "Part", default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Part {
    #[serde(default)]
    pub file: Option<String>,
}

impl From<SectionDirectory> for Library {
    fn from(dir: SectionDirectory) -> Self {
        Library {
            kind: LibraryType::from(dir.section_type.as_str()),
            title: dir.title,
            key: dir.key,
        }
    }
}

impl From<Metadata> for CatalogNode {
    fn from(meta: Metadata) -> Self {
        CatalogNode {
            kind: NodeKind::from(meta.item_type.as_str()),
            rating_key: meta.rating_key,
            title: meta.title,
            thumb: meta.thumb.filter(|t| !t.is_empty()),
            art: meta.art.filter(|a| !a.is_empty()),
            media: meta
                .media
                .into_iter()
                .map(|m| MediaItem {
                    parts: m
                        .parts
                        .into_iter()
                        .map(|p| MediaPart { file: p.file })
                        .collect(),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    #[test]
    fn parses_library_sections() {
        let json = r#"{
            "MediaContainer": {
                "size": 2,
                "Directory": [
                    {"key": "1", "title": "Movies", "type": "movie", "agent": "tv.plex.agents.movie"},
                    {"key": "7", "title": "Photos", "type": "photo"}
                ]
            }
        }"#;
        let resp: ContainerResponse = serde_json::from_str(json).unwrap();
        let libs: Vec<Library> = resp
            .media_container
            .directories
            .into_iter()
            .map(Library::from)
            .collect();

        assert_eq!(libs.len(), 2);
        assert_eq!(libs[0].title, "Movies");
        assert_eq!(libs[0].key, "1");
        assert_eq!(libs[0].kind, LibraryType::Movie);
        assert_eq!(libs[1].kind, LibraryType::Other("photo".into()));
    }

    #[test]
    fn parses_episode_with_media_parts() {
        let json = r#"{
            "MediaContainer": {
                "Metadata": [{
                    "ratingKey": "1001",
                    "title": "Pilot",
                    "type": "episode",
                    "thumb": "/library/metadata/1001/thumb/1700000000",
                    "Media": [{"id": 5, "Part": [{"id": 9, "file": "/media/X/Season 01/e1.mkv"}]}]
                }]
            }
        }"#;
        let resp: ContainerResponse = serde_json::from_str(json).unwrap();
        let node = CatalogNode::from(resp.media_container.metadata[0].clone());

        assert_eq!(node.rating_key, "1001");
        assert_eq!(node.kind, NodeKind::Episode);
        assert_eq!(node.art, None);
        assert_eq!(
            node.first_file(),
            Some(Path::new("/media/X/Season 01/e1.mkv"))
        );
    }

    #[test]
    fn missing_arrays_default_to_empty() {
        let json = r#"{"MediaContainer": {"size": 0}}"#;
        let resp: ContainerResponse = serde_json::from_str(json).unwrap();
        assert!(resp.media_container.directories.is_empty());
        assert!(resp.media_container.metadata.is_empty());
    }

    #[test]
    fn empty_image_paths_are_dropped() {
        let json = r#"{"ratingKey": "5", "title": "S", "type": "show", "thumb": "", "art": ""}"#;
        let meta: Metadata = serde_json::from_str(json).unwrap();
        let node = CatalogNode::from(meta);
        assert_eq!(node.thumb, None);
        assert_eq!(node.art, None);
        assert!(node.media.is_empty());
    }
}
