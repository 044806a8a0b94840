/// State management module
///
/// This module handles all application state, including:
/// - The immutable image store and its loading paths (data.rs)
/// - The gallery controller: filtering, pagination, tag summary,
///   and modal state machines (gallery.rs)
/// - The persisted theme preference (prefs.rs)
pub mod data;
pub mod gallery;
pub mod prefs;
