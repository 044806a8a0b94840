/// Image byte fetching
///
/// Gallery records carry either http(s) URLs or paths relative to the
/// gallery root. Both resolve to a byte fetch that runs as a background
/// task; a failed fetch hides the affected element only.
use std::path::{Path, PathBuf};

use crate::error::MediaError;

/// Where a record's bytes come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    Remote(String),
    Local(PathBuf),
}

impl ImageSource {
    /// Classify a record url, resolving relative paths against the
    /// gallery root
    pub fn resolve(url: &str, root: Option<&Path>) -> Self {
        if url.starts_with("http://") || url.starts_with("https://") {
            return ImageSource::Remote(url.to_owned());
        }
        let path = PathBuf::from(url);
        match root {
            Some(root) if path.is_relative() => ImageSource::Local(root.join(path)),
            _ => ImageSource::Local(path),
        }
    }

    /// Human-readable form for log lines
    pub fn describe(&self) -> String {
        match self {
            ImageSource::Remote(url) => url.clone(),
            ImageSource::Local(path) => path.display().to_string(),
        }
    }
}

/// Fetch the raw bytes behind a source
pub async fn fetch_bytes(source: &ImageSource) -> Result<Vec<u8>, MediaError> {
    match source {
        ImageSource::Remote(url) => {
            let response = reqwest::get(url)
                .await
                .and_then(|response| response.error_for_status())
                .map_err(|source| MediaError::Http {
                    url: url.clone(),
                    source,
                })?;
            let bytes = response.bytes().await.map_err(|source| MediaError::Http {
                url: url.clone(),
                source,
            })?;
            Ok(bytes.to_vec())
        }
        ImageSource::Local(path) => {
            tokio::fs::read(path).await.map_err(|source| MediaError::Read {
                path: path.clone(),
                source,
            })
        }
    }
}

/// Fetch a full-size image and verify it decodes, for the lightbox.
/// The decode check runs off the GUI thread; the original bytes are
/// returned untouched so the renderer can decode them itself.
pub async fn load_original(source: ImageSource) -> Result<Vec<u8>, MediaError> {
    let bytes = fetch_bytes(&source).await?;
    tokio::task::spawn_blocking(move || -> Result<Vec<u8>, MediaError> {
        image::load_from_memory(&bytes)?;
        Ok(bytes)
    })
    .await?
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn resolve_keeps_http_urls_remote() {
        let source = ImageSource::resolve("https://example.com/a.jpg", Some(Path::new("/g")));
        assert_eq!(
            source,
            ImageSource::Remote("https://example.com/a.jpg".to_string())
        );
        assert!(matches!(
            ImageSource::resolve("http://example.com/a.jpg", None),
            ImageSource::Remote(_)
        ));
    }

    #[test]
    fn resolve_joins_relative_paths_against_root() {
        let source = ImageSource::resolve("cats/a.jpg", Some(Path::new("/gallery")));
        assert_eq!(
            source,
            ImageSource::Local(PathBuf::from("/gallery/cats/a.jpg"))
        );
    }

    #[test]
    fn resolve_leaves_absolute_paths_alone() {
        let source = ImageSource::resolve("/elsewhere/a.jpg", Some(Path::new("/gallery")));
        assert_eq!(source, ImageSource::Local(PathBuf::from("/elsewhere/a.jpg")));
    }

    #[test]
    fn resolve_without_root_uses_path_as_is() {
        let source = ImageSource::resolve("a.jpg", None);
        assert_eq!(source, ImageSource::Local(PathBuf::from("a.jpg")));
    }

    #[tokio::test]
    async fn fetch_reads_local_files() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("a.bin");
        std::fs::write(&path, b"image bytes").unwrap();

        let bytes = fetch_bytes(&ImageSource::Local(path)).await.unwrap();
        assert_eq!(bytes, b"image bytes");
    }

    #[tokio::test]
    async fn fetch_missing_local_file_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let source = ImageSource::Local(tmp.path().join("missing.jpg"));
        let err = fetch_bytes(&source).await.unwrap_err();
        assert!(matches!(err, MediaError::Read { .. }));
    }

    #[tokio::test]
    async fn load_original_rejects_undecodable_bytes() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("garbage.jpg");
        std::fs::write(&path, b"definitely not a jpeg").unwrap();

        let err = load_original(ImageSource::Local(path)).await.unwrap_err();
        assert!(matches!(err, MediaError::Decode(_)));
    }
}
