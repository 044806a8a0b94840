/// Image fetching and processing module
///
/// This module handles:
/// - Fetching image bytes from http(s) URLs or the local gallery tree
/// - Downscaling grid thumbnails
/// - Caching thumbnails to disk
///
/// Nothing in here knows about the GUI; everything returns plain bytes
/// so the controller can turn them into widget handles.
pub mod loader;
pub mod thumbnail;
