/// Search bar and pagination controls
use iced::widget::{button, horizontal_space, row, text, text_input};
use iced::{Alignment, Element, Length};

use crate::state::gallery::GalleryState;
use crate::state::prefs::ThemePreference;
use crate::Message;

/// Top control row: tag search with a clear button, the tag summary
/// trigger, the theme toggle, and the gallery picker
pub fn search_bar<'a>(state: &'a GalleryState, theme: ThemePreference) -> Element<'a, Message> {
    let mut controls = row![
        button(text("View All Tags").size(14))
            .on_press(Message::ViewAllTags)
            .style(button::secondary),
        text_input("Search tags...", state.search_term())
            .on_input(Message::SearchChanged)
            .padding(10)
            .width(Length::Fixed(320.0)),
    ]
    .spacing(10)
    .align_y(Alignment::Center);

    // The clear control only exists while there is something to clear
    if !state.search_term().is_empty() {
        controls = controls.push(
            button(text("✕").size(14))
                .on_press(Message::ClearSearch)
                .style(button::danger),
        );
        controls = controls.push(text(format!("{} matching", state.filtered_len())).size(14));
    }

    controls = controls.push(horizontal_space());
    controls = controls.push(
        button(text(theme.toggle_label()).size(14))
            .on_press(Message::ThemeToggled)
            .style(button::secondary),
    );
    controls = controls.push(
        button(text("Open gallery...").size(14))
            .on_press(Message::OpenGallery)
            .style(button::secondary),
    );

    controls.into()
}

/// Previous / "Page X of Y" / Next row, with navigation disabled at the
/// boundaries. Omitted entirely while the filtered view is empty.
pub fn pagination(state: &GalleryState) -> Option<Element<'_, Message>> {
    if state.filtered_len() == 0 {
        return None;
    }

    let current = state.current_page();
    let total = state.total_pages();

    let prev = button(text("Previous").size(14))
        .on_press_maybe((current > 1).then_some(Message::PrevPage))
        .style(button::secondary);
    let next = button(text("Next").size(14))
        .on_press_maybe((current < total).then_some(Message::NextPage))
        .style(button::secondary);

    Some(
        row![
            prev,
            text(format!("Page {current} of {total}")).size(14),
            next,
        ]
        .spacing(20)
        .align_y(Alignment::Center)
        .into(),
    )
}
