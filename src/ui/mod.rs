/// UI components module
///
/// Small view builders, one file per surface. Everything here is a pure
/// function from state to widgets; events travel back to the controller
/// as `Message` values.
pub mod ads;
pub mod controls;
pub mod grid;
pub mod lightbox;
pub mod tags_modal;

use iced::widget::{center, container, mouse_area, opaque, stack};
use iced::{Color, Element};

use crate::Message;

/// Load state of one displayed image
#[derive(Debug, Clone, Default)]
pub enum TileImage {
    #[default]
    NotLoaded,
    Loading,
    Ready(iced::widget::image::Handle),
    /// Fetch or decode failed; the element is hidden in place
    Failed,
}

impl TileImage {
    pub fn handle(&self) -> Option<&iced::widget::image::Handle> {
        match self {
            TileImage::Ready(handle) => Some(handle),
            _ => None,
        }
    }

    pub fn is_unloaded(&self) -> bool {
        matches!(self, TileImage::NotLoaded)
    }
}

/// Overlay `content` on `base` behind a dimmed backdrop. Clicking the
/// backdrop dismisses; clicking the content does not.
pub fn modal<'a>(
    base: Element<'a, Message>,
    content: Element<'a, Message>,
    on_dismiss: Message,
    backdrop_alpha: f32,
) -> Element<'a, Message> {
    let backdrop = center(opaque(content)).style(move |_theme| container::Style {
        background: Some(
            Color {
                a: backdrop_alpha,
                ..Color::BLACK
            }
            .into(),
        ),
        ..container::Style::default()
    });

    stack![base, opaque(mouse_area(backdrop).on_press(on_dismiss))].into()
}
