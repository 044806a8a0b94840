/// Full-size single-image overlay
///
/// Covers the whole window with a dark backdrop; any click or an escape
/// press dismisses it. The full-resolution image falls back to the grid
/// thumbnail while it is still loading.
use iced::widget::{center, mouse_area, opaque, stack, text, Space};
use iced::{Color, ContentFit, Element, Length};

use crate::ui::TileImage;
use crate::Message;

pub fn overlay<'a>(
    base: Element<'a, Message>,
    shown: &'a TileImage,
) -> Element<'a, Message> {
    let content: Element<'a, Message> = match shown {
        TileImage::Ready(handle) => iced::widget::image(handle.clone())
            .width(Length::Fill)
            .height(Length::Fill)
            .content_fit(ContentFit::Contain)
            .into(),
        TileImage::NotLoaded | TileImage::Loading => {
            text("Loading...").size(18).color(Color::WHITE).into()
        }
        // Hidden in place like any other failed image
        TileImage::Failed => Space::new(Length::Shrink, Length::Shrink).into(),
    };

    let backdrop = center(content)
        .padding(30)
        .style(|_theme| iced::widget::container::Style {
            background: Some(
                Color {
                    a: 0.85,
                    ..Color::BLACK
                }
                .into(),
            ),
            ..iced::widget::container::Style::default()
        });

    stack![
        base,
        opaque(mouse_area(backdrop).on_press(Message::LightboxDismissed))
    ]
    .into()
}
