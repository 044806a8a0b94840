/// Tag-summary modal
///
/// Lists every tag with its usage count, most used first. Selecting a
/// row runs the normal search path with that exact tag. The backdrop is
/// lighter during the cosmetic fade phases.
use iced::widget::{button, column, container, horizontal_space, row, scrollable, text};
use iced::{Alignment, Element, Length};

use crate::state::gallery::{GalleryState, TagsModal};
use crate::Message;

const PANEL_WIDTH: f32 = 420.0;
const LIST_HEIGHT: f32 = 420.0;

pub fn overlay<'a>(
    base: Element<'a, Message>,
    state: &'a GalleryState,
) -> Element<'a, Message> {
    let backdrop_alpha = match state.tags_modal {
        TagsModal::Opening | TagsModal::Closing => 0.3,
        _ => 0.8,
    };

    let mut rows: Vec<Element<'a, Message>> = state
        .tag_counts()
        .iter()
        .map(|(tag, count)| {
            button(
                row![
                    text(tag.as_str()).size(14),
                    horizontal_space(),
                    text(count.to_string()).size(14),
                ]
                .spacing(12),
            )
            .width(Length::Fill)
            .style(button::text)
            .on_press(Message::TagSelected(tag.clone()))
            .into()
        })
        .collect();

    if rows.is_empty() {
        rows.push(text("No tags in this gallery").size(14).into());
    }

    let panel = container(
        column![
            row![
                text("All Tags").size(18),
                horizontal_space(),
                button(text("✕").size(14))
                    .style(button::text)
                    .on_press(Message::TagsModalDismissed),
            ]
            .align_y(Alignment::Center),
            scrollable(column(rows).spacing(2)).height(Length::Fixed(LIST_HEIGHT)),
        ]
        .spacing(12),
    )
    .padding(16)
    .width(Length::Fixed(PANEL_WIDTH))
    .style(container::rounded_box);

    crate::ui::modal(
        base,
        panel.into(),
        Message::TagsModalDismissed,
        backdrop_alpha,
    )
}
