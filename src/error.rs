use std::path::PathBuf;

use thiserror::Error;

/// Errors that can keep the gallery from loading at startup.
///
/// Nothing in here is fatal to the process: a failed load surfaces a
/// static error screen and the rest of the application stays interactive.
#[derive(Debug, Error)]
pub enum GalleryError {
    #[error("gallery path not found: {}", .0.display())]
    PathNotFound(PathBuf),

    #[error("failed to read gallery manifest {}", .path.display())]
    ManifestRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse gallery manifest {}", .path.display())]
    ManifestParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("could not determine the user configuration directory")]
    NoConfigDir,

    #[error("failed to write preferences to {}", .path.display())]
    PrefsWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors from fetching or decoding a single image.
///
/// These never escalate past the affected element: the tile (or popup
/// image) is hidden in place and a warning is logged.
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("request for {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode image data: {0}")]
    Decode(#[from] image::ImageError),

    #[error("background task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}
