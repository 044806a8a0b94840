/// Grid thumbnail generation and caching
///
/// Gallery tiles show downscaled copies of the source images. Thumbnails
/// are generated once and cached to disk under the user cache directory,
/// keyed by a hash of the record url so renamed manifests keep their
/// cache. Decode and resize are CPU-bound and run on a blocking thread.
use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::{imageops::FilterType, GenericImageView, ImageFormat};
use sha2::{Digest, Sha256};
use tokio::task;

use super::loader::{self, ImageSource};
use crate::error::MediaError;

/// Longest edge of generated thumbnails
const THUMBNAIL_EDGE: u32 = 512;

/// Get the thumbnail cache directory, if one can be determined
pub fn cache_dir() -> Option<PathBuf> {
    dirs_next::cache_dir().map(|path| path.join("meme-gallery").join("thumbnails"))
}

/// Cache filename for a record url. Content-addressed by the url string,
/// so the same record hits the same file across runs and galleries.
pub fn cache_file(dir: &Path, url: &str) -> PathBuf {
    let digest = Sha256::digest(url.as_bytes());
    dir.join(format!("{digest:x}.jpg"))
}

/// Decode image bytes and downscale them to a JPEG thumbnail.
/// Images already within bounds are re-encoded without resizing.
pub fn downscale_to_jpeg(bytes: &[u8]) -> Result<Vec<u8>, MediaError> {
    let img = image::load_from_memory(bytes)?;
    let (width, height) = img.dimensions();

    let thumb = if width <= THUMBNAIL_EDGE && height <= THUMBNAIL_EDGE {
        img
    } else {
        img.resize(THUMBNAIL_EDGE, THUMBNAIL_EDGE, FilterType::Lanczos3)
    };

    let mut out = Cursor::new(Vec::new());
    // JPEG has no alpha channel, flatten first
    thumb.to_rgb8().write_to(&mut out, ImageFormat::Jpeg)?;
    Ok(out.into_inner())
}

/// Load a grid thumbnail: disk cache first, otherwise fetch, downscale,
/// and write the cache back on a best-effort basis.
pub async fn load_thumbnail(
    source: ImageSource,
    cache_path: Option<PathBuf>,
) -> Result<Vec<u8>, MediaError> {
    if let Some(path) = &cache_path {
        if let Ok(bytes) = tokio::fs::read(path).await {
            return Ok(bytes);
        }
    }

    let bytes = loader::fetch_bytes(&source).await?;
    let thumb = task::spawn_blocking(move || downscale_to_jpeg(&bytes)).await??;

    if let Some(path) = &cache_path {
        if let Some(parent) = path.parent() {
            let _ = tokio::fs::create_dir_all(parent).await;
        }
        if let Err(e) = tokio::fs::write(path, &thumb).await {
            log::warn!("could not cache thumbnail for {}: {e}", source.describe());
        }
    }

    Ok(thumb)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    /// Encode a solid-color PNG of the given size
    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(width, height, image::Rgba([200, 40, 40, 255]));
        let mut out = Cursor::new(Vec::new());
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut out, ImageFormat::Png)
            .unwrap();
        out.into_inner()
    }

    #[test]
    fn cache_file_is_deterministic_and_distinct() {
        let dir = Path::new("/cache");
        let a1 = cache_file(dir, "https://example.com/a.jpg");
        let a2 = cache_file(dir, "https://example.com/a.jpg");
        let b = cache_file(dir, "https://example.com/b.jpg");

        assert_eq!(a1, a2);
        assert_ne!(a1, b);
        assert!(a1.extension().is_some_and(|ext| ext == "jpg"));
    }

    #[test]
    fn downscale_bounds_the_longest_edge() {
        let out = downscale_to_jpeg(&png_bytes(1024, 512)).unwrap();
        let thumb = image::load_from_memory(&out).unwrap();
        assert_eq!(thumb.dimensions(), (512, 256));
    }

    #[test]
    fn downscale_keeps_small_images_untouched() {
        let out = downscale_to_jpeg(&png_bytes(100, 80)).unwrap();
        let thumb = image::load_from_memory(&out).unwrap();
        assert_eq!(thumb.dimensions(), (100, 80));
    }

    #[test]
    fn downscale_rejects_garbage() {
        assert!(matches!(
            downscale_to_jpeg(b"not an image"),
            Err(MediaError::Decode(_))
        ));
    }

    #[tokio::test]
    async fn load_thumbnail_writes_and_reuses_the_cache() {
        let tmp = TempDir::new().unwrap();
        let image_path = tmp.path().join("big.png");
        std::fs::write(&image_path, png_bytes(800, 800)).unwrap();

        let cache = cache_file(&tmp.path().join("cache"), "big.png");
        let source = ImageSource::Local(image_path.clone());

        let first = load_thumbnail(source.clone(), Some(cache.clone()))
            .await
            .unwrap();
        assert!(cache.exists());

        // Remove the source: a cache hit must not need it
        std::fs::remove_file(&image_path).unwrap();
        let second = load_thumbnail(source, Some(cache)).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn load_thumbnail_without_cache_dir_still_works() {
        let tmp = TempDir::new().unwrap();
        let image_path = tmp.path().join("a.png");
        std::fs::write(&image_path, png_bytes(64, 64)).unwrap();

        let thumb = load_thumbnail(ImageSource::Local(image_path), None)
            .await
            .unwrap();
        assert!(!thumb.is_empty());
    }
}
