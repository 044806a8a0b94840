/// The gallery grid
///
/// Renders the current page as a wrapping grid of image tiles. Each tile
/// carries its tag chips, each independently clickable to re-trigger the
/// search. Failed images are hidden in place; still-loading slots keep
/// their space so the grid does not jump around.
use iced::widget::{column, container, image, mouse_area, text, Space};
use iced::{mouse, ContentFit, Element, Length};
use iced_aw::Wrap;

use crate::state::data::ImageRecord;
use crate::state::gallery::GalleryState;
use crate::ui::TileImage;
use crate::Message;

const TILE_WIDTH: f32 = 220.0;
const TILE_IMAGE_HEIGHT: f32 = 160.0;
const EASTER_EGG_WIDTH: f32 = 300.0;

pub fn gallery_grid<'a>(
    state: &'a GalleryState,
    thumbs: &'a [TileImage],
    egg: &'a TileImage,
) -> Element<'a, Message> {
    if state.filtered_len() == 0 {
        return container(text("No images match your search").size(16))
            .width(Length::Fill)
            .center_x(Length::Fill)
            .padding(40)
            .into();
    }

    let mut tiles: Vec<Element<'a, Message>> = Vec::new();

    for (index, record) in state.page_records() {
        match &thumbs[index] {
            TileImage::Ready(handle) => tiles.push(tile(index, record, handle)),
            // Hidden in place, no retry, no placeholder
            TileImage::Failed => {}
            TileImage::NotLoaded | TileImage::Loading => tiles.push(loading_slot()),
        }
    }

    let grid = Wrap::with_elements(tiles).spacing(12.0).line_spacing(12.0);

    let mut content = column![grid].spacing(24).width(Length::Fill);

    // The secret reward for scrolling all the way through
    if state.visible_easter_egg().is_some() {
        if let Some(handle) = egg.handle() {
            content = content.push(
                container(image(handle.clone()).width(Length::Fixed(EASTER_EGG_WIDTH)))
                    .width(Length::Fill)
                    .center_x(Length::Fill),
            );
        }
    }

    content.into()
}

/// One gallery tile: the clickable image plus its tag chips
fn tile<'a>(
    index: usize,
    record: &'a ImageRecord,
    handle: &image::Handle,
) -> Element<'a, Message> {
    let img = mouse_area(
        image(handle.clone())
            .width(Length::Fixed(TILE_WIDTH))
            .height(Length::Fixed(TILE_IMAGE_HEIGHT))
            .content_fit(ContentFit::Cover),
    )
    .on_press(Message::ImageClicked(index))
    .interaction(mouse::Interaction::Pointer);

    let chips: Vec<Element<'a, Message>> = record
        .tags
        .iter()
        .map(|tag| {
            iced::widget::button(text(tag.as_str()).size(12))
                .padding([2, 6])
                .style(iced::widget::button::secondary)
                .on_press(Message::TagSelected(tag.clone()))
                .into()
        })
        .collect();

    let tags = Wrap::with_elements(chips).spacing(4.0).line_spacing(4.0);

    container(column![img, tags].spacing(6))
        .width(Length::Fixed(TILE_WIDTH))
        .into()
}

/// Reserves a tile's space while its thumbnail loads
fn loading_slot<'a>() -> Element<'a, Message> {
    container(Space::new(
        Length::Fixed(TILE_WIDTH),
        Length::Fixed(TILE_IMAGE_HEIGHT),
    ))
    .style(container::rounded_box)
    .into()
}
