/// Shared data structures for the application state
///
/// These structs represent the data model that flows between
/// the loading layer and the UI layer. The image store is built once
/// at startup and never mutated afterwards.
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use walkdir::WalkDir;

use crate::error::GalleryError;

/// Image file extensions recognized by the folder scanner
const IMAGE_EXTENSIONS: [&str; 7] = ["jpg", "jpeg", "png", "gif", "webp", "bmp", "avif"];

/// A single gallery entry: an image source plus its keyword tags
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRecord {
    /// http(s) URL, or a path resolved against the gallery root
    pub url: String,
    /// Keyword tags, case-sensitive as stored (matching is case-insensitive)
    #[serde(default)]
    pub tags: Vec<String>,
}

/// The immutable, ordered image store plus gallery-level extras
#[derive(Debug, Clone, Default)]
pub struct ImageStore {
    pub records: Vec<ImageRecord>,
    /// Optional easter-egg image appended below the last unfiltered page
    pub easter_egg: Option<String>,
    /// Base directory for resolving relative record urls
    pub root: Option<PathBuf>,
}

/// The two manifest shapes accepted on disk: a bare array of records,
/// or an object that also carries gallery-level extras.
#[derive(Deserialize)]
#[serde(untagged)]
enum ManifestFile {
    Records(Vec<ImageRecord>),
    Full {
        images: Vec<ImageRecord>,
        #[serde(default)]
        easter_egg: Option<String>,
    },
}

impl ImageStore {
    /// Load a gallery from a manifest file or an image directory
    pub fn load(path: &Path) -> Result<Self, GalleryError> {
        if !path.exists() {
            return Err(GalleryError::PathNotFound(path.to_path_buf()));
        }
        if path.is_dir() {
            Ok(Self::scan_dir(path))
        } else {
            Self::from_manifest(path)
        }
    }

    /// Parse a JSON manifest of `{url, tags}` records
    pub fn from_manifest(path: &Path) -> Result<Self, GalleryError> {
        let content = std::fs::read_to_string(path).map_err(|source| GalleryError::ManifestRead {
            path: path.to_path_buf(),
            source,
        })?;

        let manifest: ManifestFile =
            serde_json::from_str(&content).map_err(|source| GalleryError::ManifestParse {
                path: path.to_path_buf(),
                source,
            })?;

        let (records, easter_egg) = match manifest {
            ManifestFile::Records(records) => (records, None),
            ManifestFile::Full { images, easter_egg } => (images, easter_egg),
        };

        Ok(ImageStore {
            records,
            easter_egg,
            // Relative urls in the manifest resolve next to the manifest itself
            root: path.parent().map(Path::to_path_buf),
        })
    }

    /// Build a store by walking an image directory.
    ///
    /// Every recognized image file below `root` becomes a record whose tags
    /// are the sub-directory components of its relative path, so
    /// `cats/grumpy/01.jpg` is tagged `cats` and `grumpy`. The walk is
    /// name-sorted to keep the store order deterministic.
    pub fn scan_dir(root: &Path) -> Self {
        let mut records = Vec::new();

        for entry in WalkDir::new(root)
            .sort_by_file_name()
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() || !has_image_extension(path) {
                continue;
            }

            let rel = match path.strip_prefix(root) {
                Ok(rel) => rel,
                Err(_) => continue,
            };

            let tags: Vec<String> = rel
                .parent()
                .map(|parent| {
                    parent
                        .components()
                        .map(|c| c.as_os_str().to_string_lossy().into_owned())
                        .collect()
                })
                .unwrap_or_default();

            records.push(ImageRecord {
                url: rel.to_string_lossy().into_owned(),
                tags,
            });
        }

        log::info!("scanned {}: {} images", root.display(), records.len());

        ImageStore {
            records,
            easter_egg: None,
            root: Some(root.to_path_buf()),
        }
    }
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| {
            let ext = ext.to_string_lossy().to_lowercase();
            IMAGE_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(path: &Path, content: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    #[test]
    fn manifest_bare_array() {
        let tmp = TempDir::new().unwrap();
        let manifest = tmp.path().join("gallery.json");
        write(
            &manifest,
            r#"[{"url": "a.jpg", "tags": ["cat"]}, {"url": "b.jpg"}]"#,
        );

        let store = ImageStore::from_manifest(&manifest).unwrap();
        assert_eq!(store.records.len(), 2);
        assert_eq!(store.records[0].url, "a.jpg");
        assert_eq!(store.records[0].tags, vec!["cat"]);
        assert!(store.records[1].tags.is_empty());
        assert_eq!(store.easter_egg, None);
        assert_eq!(store.root.as_deref(), Some(tmp.path()));
    }

    #[test]
    fn manifest_object_with_easter_egg() {
        let tmp = TempDir::new().unwrap();
        let manifest = tmp.path().join("gallery.json");
        write(
            &manifest,
            r#"{"images": [{"url": "a.jpg", "tags": ["dog"]}], "easter_egg": "egg.png"}"#,
        );

        let store = ImageStore::from_manifest(&manifest).unwrap();
        assert_eq!(store.records.len(), 1);
        assert_eq!(store.easter_egg.as_deref(), Some("egg.png"));
    }

    #[test]
    fn manifest_parse_error_reports_path() {
        let tmp = TempDir::new().unwrap();
        let manifest = tmp.path().join("broken.json");
        write(&manifest, "not json at all");

        let err = ImageStore::from_manifest(&manifest).unwrap_err();
        assert!(matches!(err, GalleryError::ManifestParse { .. }));
        assert!(err.to_string().contains("broken.json"));
    }

    #[test]
    fn load_missing_path_is_an_error() {
        let err = ImageStore::load(Path::new("/nonexistent/gallery.json")).unwrap_err();
        assert!(matches!(err, GalleryError::PathNotFound(_)));
    }

    #[test]
    fn scan_derives_tags_from_subdirectories() {
        let tmp = TempDir::new().unwrap();
        write(&tmp.path().join("cats/grumpy/01.jpg"), "x");
        write(&tmp.path().join("cats/02.png"), "x");
        write(&tmp.path().join("03.gif"), "x");
        write(&tmp.path().join("notes.txt"), "x");

        let store = ImageStore::scan_dir(tmp.path());
        let urls: Vec<&str> = store.records.iter().map(|r| r.url.as_str()).collect();
        assert_eq!(urls, vec!["03.gif", "cats/02.png", "cats/grumpy/01.jpg"]);

        assert!(store.records[0].tags.is_empty());
        assert_eq!(store.records[1].tags, vec!["cats"]);
        assert_eq!(store.records[2].tags, vec!["cats", "grumpy"]);
        assert_eq!(store.root.as_deref(), Some(tmp.path()));
    }

    #[test]
    fn scan_skips_unrecognized_extensions() {
        let tmp = TempDir::new().unwrap();
        write(&tmp.path().join("a.jpg"), "x");
        write(&tmp.path().join("b.tiff"), "x");
        write(&tmp.path().join("c"), "x");

        let store = ImageStore::scan_dir(tmp.path());
        assert_eq!(store.records.len(), 1);
        assert_eq!(store.records[0].url, "a.jpg");
    }

    #[test]
    fn scan_of_empty_directory_yields_empty_store() {
        let tmp = TempDir::new().unwrap();
        let store = ImageStore::scan_dir(tmp.path());
        assert!(store.records.is_empty());
    }
}
