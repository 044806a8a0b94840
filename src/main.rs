use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use iced::keyboard::{self, key};
use iced::widget::{button, center, column, container, image, row, scrollable, text};
use iced::{Alignment, Element, Length, Subscription, Task, Theme};
use rfd::FileDialog;

mod error;
mod media;
mod state;
mod ui;

use error::MediaError;
use media::loader::{self, ImageSource};
use media::thumbnail;
use state::data::ImageStore;
use state::gallery::{EscapeOutcome, GalleryState, Lightbox};
use state::prefs::{self, ThemePreference};
use ui::ads::{self, JokeAd};
use ui::TileImage;

/// Scrollable id for the main grid, so navigation can jump back to the top
const GALLERY_SCROLL: &str = "gallery-scroll";

/// Cosmetic fade delays for the tag-summary modal
const TAGS_MODAL_FADE_IN: Duration = Duration::from_millis(10);
const TAGS_MODAL_FADE_OUT: Duration = Duration::from_millis(300);

#[derive(Debug, Parser)]
#[command(name = "meme-gallery", version, about = "Tag-searchable image gallery viewer")]
struct Args {
    /// Gallery manifest (JSON) or image directory [default: ./gallery.json]
    path: Option<PathBuf>,
}

/// A successfully loaded gallery plus its per-image view state
struct Loaded {
    gallery: GalleryState,
    /// One thumbnail slot per store record, indexed like the store
    thumbs: Vec<TileImage>,
    /// Easter-egg image, fetched lazily the first time it becomes visible
    egg: TileImage,
    /// Full-resolution image for the record open in the lightbox
    full: Option<(usize, TileImage)>,
    /// Matches the app generation that installed this store; results
    /// from older stores are dropped on arrival
    generation: u64,
}

enum Content {
    Loaded(Box<Loaded>),
    /// Static error screen; the surrounding chrome stays interactive
    Failed(String),
}

/// Main application state
struct MemeGallery {
    content: Content,
    theme: ThemePreference,
    /// Joke ad popup; None once dismissed
    ad: Option<(&'static JokeAd, TileImage)>,
    generation: u64,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    SearchChanged(String),
    ClearSearch,
    /// A tag chip or summary row was clicked
    TagSelected(String),
    PrevPage,
    NextPage,
    ImageClicked(usize),
    LightboxDismissed,
    ViewAllTags,
    TagsModalShown,
    TagsModalDismissed,
    TagsModalHidden,
    EscapePressed,
    ThemeToggled,
    OpenGallery,
    ThumbnailLoaded(u64, usize, Result<image::Handle, String>),
    EasterEggLoaded(u64, Result<image::Handle, String>),
    FullImageLoaded(usize, Result<image::Handle, String>),
    AdImageLoaded(Result<image::Handle, String>),
    AdDismissed,
}

fn main() -> iced::Result {
    env_logger::init();
    let args = Args::parse();

    iced::application("Meme Gallery", MemeGallery::update, MemeGallery::view)
        .theme(MemeGallery::theme)
        .subscription(MemeGallery::subscription)
        .window_size((1280.0, 860.0))
        .centered()
        .run_with(move || MemeGallery::new(args.path.clone()))
}

impl MemeGallery {
    fn new(path: Option<PathBuf>) -> (Self, Task<Message>) {
        let theme = prefs::load();
        let target = path.unwrap_or_else(|| PathBuf::from("gallery.json"));

        let mut app = MemeGallery {
            content: Content::Failed(String::new()),
            theme,
            ad: None,
            generation: 0,
        };
        let gallery_task = app.install_store_from(&target);

        let ad = ads::pick();
        app.ad = Some((ad, TileImage::Loading));
        let ad_cache = thumbnail::cache_dir().map(|dir| thumbnail::cache_file(&dir, ad.image_url));
        let ad_task = Task::perform(
            thumbnail::load_thumbnail(ImageSource::Remote(ad.image_url.to_string()), ad_cache),
            |result| Message::AdImageLoaded(to_handle(result)),
        );

        (app, Task::batch([gallery_task, ad_task]))
    }

    /// Replace the image store wholesale, resetting all controller state
    fn install_store_from(&mut self, path: &Path) -> Task<Message> {
        match ImageStore::load(path) {
            Ok(store) => {
                log::info!("loaded {} images from {}", store.records.len(), path.display());
                self.generation += 1;
                let mut loaded = Loaded {
                    thumbs: vec![TileImage::default(); store.records.len()],
                    gallery: GalleryState::new(store),
                    egg: TileImage::default(),
                    full: None,
                    generation: self.generation,
                };
                let task = request_visible_images(&mut loaded);
                self.content = Content::Loaded(Box::new(loaded));
                task
            }
            Err(e) => {
                log::error!("gallery load failed: {e}");
                self.content = Content::Failed(e.to_string());
                Task::none()
            }
        }
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::ThemeToggled => {
                self.theme = self.theme.toggled();
                if let Err(e) = prefs::save(self.theme) {
                    log::warn!("could not persist theme preference: {e}");
                }
                Task::none()
            }
            Message::OpenGallery => {
                let picked = FileDialog::new()
                    .add_filter("gallery manifest", &["json"])
                    .set_title("Open Gallery Manifest")
                    .pick_file();
                match picked {
                    Some(path) => self.install_store_from(&path),
                    None => Task::none(),
                }
            }
            Message::AdImageLoaded(result) => {
                if let Some((ad, slot)) = &mut self.ad {
                    *slot = match result {
                        Ok(handle) => TileImage::Ready(handle),
                        Err(e) => {
                            log::warn!("hiding ad image {}: {e}", ad.image_url);
                            TileImage::Failed
                        }
                    };
                }
                Task::none()
            }
            Message::AdDismissed => {
                self.ad = None;
                Task::none()
            }
            message => match &mut self.content {
                Content::Loaded(loaded) => update_gallery(loaded, message),
                Content::Failed(_) => Task::none(),
            },
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<'_, Message> {
        let mut base: Element<'_, Message> = match &self.content {
            Content::Loaded(loaded) => gallery_screen(loaded, self.theme),
            Content::Failed(message) => error_screen(message, self.theme),
        };

        if let Content::Loaded(loaded) = &self.content {
            if loaded.gallery.tags_modal.is_visible() {
                base = ui::tags_modal::overlay(base, &loaded.gallery);
            }
            if let Lightbox::Open(index) = loaded.gallery.lightbox {
                base = ui::lightbox::overlay(base, lightbox_image(loaded, index));
            }
        }

        match &self.ad {
            Some((ad, image_state)) => ui::ads::overlay(base, ad, image_state),
            None => base,
        }
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        match self.theme {
            ThemePreference::Light => Theme::Light,
            ThemePreference::Dark => Theme::Dark,
        }
    }

    fn subscription(&self) -> Subscription<Message> {
        keyboard::on_key_press(handle_key_press)
    }
}

fn handle_key_press(key: keyboard::Key, _modifiers: keyboard::Modifiers) -> Option<Message> {
    match key {
        keyboard::Key::Named(key::Named::Escape) => Some(Message::EscapePressed),
        _ => None,
    }
}

/// Gallery-screen message handling; all controller transitions live here
fn update_gallery(loaded: &mut Loaded, message: Message) -> Task<Message> {
    match message {
        Message::SearchChanged(term) => {
            loaded.gallery.search(term);
            Task::batch([request_visible_images(loaded), scroll_top()])
        }
        Message::ClearSearch => {
            loaded.gallery.clear_search();
            Task::batch([request_visible_images(loaded), scroll_top()])
        }
        Message::TagSelected(tag) => {
            loaded.gallery.select_tag(&tag);
            let mut tasks = vec![request_visible_images(loaded), scroll_top()];
            if loaded.gallery.tags_modal.begin_close() {
                tasks.push(fade_out_task());
            }
            Task::batch(tasks)
        }
        Message::PrevPage => {
            if loaded.gallery.prev_page() {
                Task::batch([request_visible_images(loaded), scroll_top()])
            } else {
                Task::none()
            }
        }
        Message::NextPage => {
            if loaded.gallery.next_page() {
                Task::batch([request_visible_images(loaded), scroll_top()])
            } else {
                Task::none()
            }
        }
        Message::ImageClicked(index) => {
            loaded.gallery.open_lightbox(index);
            if !matches!(loaded.gallery.lightbox, Lightbox::Open(i) if i == index) {
                return Task::none();
            }
            // Re-opening on the record already shown keeps its image
            if loaded.full.as_ref().is_some_and(|(i, _)| *i == index) {
                return Task::none();
            }
            loaded.full = Some((index, TileImage::Loading));
            let record = &loaded.gallery.records()[index];
            let source =
                ImageSource::resolve(&record.url, loaded.gallery.store().root.as_deref());
            Task::perform(loader::load_original(source), move |result| {
                Message::FullImageLoaded(index, to_handle(result))
            })
        }
        Message::LightboxDismissed => {
            loaded.gallery.close_lightbox();
            loaded.full = None;
            Task::none()
        }
        Message::ViewAllTags => {
            if loaded.gallery.tags_modal.begin_open() {
                fade_in_task()
            } else {
                Task::none()
            }
        }
        Message::TagsModalShown => {
            loaded.gallery.tags_modal.finish_open();
            Task::none()
        }
        Message::TagsModalDismissed => {
            if loaded.gallery.tags_modal.begin_close() {
                fade_out_task()
            } else {
                Task::none()
            }
        }
        Message::TagsModalHidden => {
            loaded.gallery.tags_modal.finish_close();
            Task::none()
        }
        Message::EscapePressed => match loaded.gallery.escape() {
            EscapeOutcome::ClosedLightbox => {
                loaded.full = None;
                Task::none()
            }
            EscapeOutcome::ClosingTagsModal => fade_out_task(),
            EscapeOutcome::Nothing => Task::none(),
        },
        Message::ThumbnailLoaded(generation, index, result) => {
            if generation == loaded.generation && index < loaded.thumbs.len() {
                loaded.thumbs[index] = match result {
                    Ok(handle) => TileImage::Ready(handle),
                    Err(e) => {
                        log::warn!("hiding image {}: {e}", loaded.gallery.records()[index].url);
                        TileImage::Failed
                    }
                };
            }
            Task::none()
        }
        Message::EasterEggLoaded(generation, result) => {
            if generation == loaded.generation {
                loaded.egg = match result {
                    Ok(handle) => TileImage::Ready(handle),
                    Err(e) => {
                        log::warn!("hiding easter egg: {e}");
                        TileImage::Failed
                    }
                };
            }
            Task::none()
        }
        Message::FullImageLoaded(index, result) => {
            if loaded.full.as_ref().is_some_and(|(i, _)| *i == index) {
                let slot = match result {
                    Ok(handle) => TileImage::Ready(handle),
                    Err(e) => {
                        log::warn!("lightbox falling back to thumbnail: {e}");
                        TileImage::Failed
                    }
                };
                loaded.full = Some((index, slot));
            }
            Task::none()
        }
        // Handled at the top level, never reaches the gallery
        Message::ThemeToggled
        | Message::OpenGallery
        | Message::AdImageLoaded(_)
        | Message::AdDismissed => Task::none(),
    }
}

/// Start loads for every image on the current page that has no slot
/// state yet, plus the easter egg once it first becomes visible
fn request_visible_images(loaded: &mut Loaded) -> Task<Message> {
    let root = loaded.gallery.store().root.clone();
    let cache_dir = thumbnail::cache_dir();
    let generation = loaded.generation;

    let wanted: Vec<(usize, String)> = loaded
        .gallery
        .page_records()
        .filter(|(index, _)| loaded.thumbs[*index].is_unloaded())
        .map(|(index, record)| (index, record.url.clone()))
        .collect();

    let mut tasks = Vec::new();
    for (index, url) in wanted {
        loaded.thumbs[index] = TileImage::Loading;
        let source = ImageSource::resolve(&url, root.as_deref());
        let cache = cache_dir.as_deref().map(|dir| thumbnail::cache_file(dir, &url));
        tasks.push(Task::perform(
            thumbnail::load_thumbnail(source, cache),
            move |result| Message::ThumbnailLoaded(generation, index, to_handle(result)),
        ));
    }

    if let Some(url) = loaded.gallery.visible_easter_egg().map(str::to_string) {
        if loaded.egg.is_unloaded() {
            loaded.egg = TileImage::Loading;
            let source = ImageSource::resolve(&url, root.as_deref());
            let cache = cache_dir.as_deref().map(|dir| thumbnail::cache_file(dir, &url));
            tasks.push(Task::perform(
                thumbnail::load_thumbnail(source, cache),
                move |result| Message::EasterEggLoaded(generation, to_handle(result)),
            ));
        }
    }

    Task::batch(tasks)
}

/// Pick what the lightbox shows: the full image once it arrived, the
/// grid thumbnail until then
fn lightbox_image(loaded: &Loaded, index: usize) -> &TileImage {
    match &loaded.full {
        Some((i, full)) if *i == index && full.handle().is_some() => full,
        _ => &loaded.thumbs[index],
    }
}

fn gallery_screen<'a>(loaded: &'a Loaded, theme: ThemePreference) -> Element<'a, Message> {
    let mut content = column![ui::grid::gallery_grid(
        &loaded.gallery,
        &loaded.thumbs,
        &loaded.egg
    )]
    .spacing(24)
    .padding(20);

    if let Some(pagination) = ui::controls::pagination(&loaded.gallery) {
        content = content.push(
            container(pagination)
                .width(Length::Fill)
                .center_x(Length::Fill),
        );
    }

    column![
        container(ui::controls::search_bar(&loaded.gallery, theme)).padding([12, 20]),
        scrollable(content)
            .id(scrollable::Id::new(GALLERY_SCROLL))
            .width(Length::Fill)
            .height(Length::Fill),
    ]
    .into()
}

fn error_screen<'a>(message: &'a str, theme: ThemePreference) -> Element<'a, Message> {
    let body = column![
        text("The gallery failed to load").size(24),
        text(message).size(14),
        text("Pass a manifest path or image directory on the command line, or open one below.")
            .size(14),
        row![
            button(text("Open gallery...").size(14))
                .on_press(Message::OpenGallery)
                .style(button::secondary),
            button(text(theme.toggle_label()).size(14))
                .on_press(Message::ThemeToggled)
                .style(button::secondary),
        ]
        .spacing(10),
    ]
    .spacing(12)
    .align_x(Alignment::Center);

    center(body).into()
}

fn scroll_top() -> Task<Message> {
    scrollable::scroll_to(
        scrollable::Id::new(GALLERY_SCROLL),
        scrollable::AbsoluteOffset { x: 0.0, y: 0.0 },
    )
}

fn fade_in_task() -> Task<Message> {
    Task::perform(tokio::time::sleep(TAGS_MODAL_FADE_IN), |_| {
        Message::TagsModalShown
    })
}

fn fade_out_task() -> Task<Message> {
    Task::perform(tokio::time::sleep(TAGS_MODAL_FADE_OUT), |_| {
        Message::TagsModalHidden
    })
}

/// Squeeze a media result into the message-friendly shape
fn to_handle(result: Result<Vec<u8>, MediaError>) -> Result<image::Handle, String> {
    result
        .map(image::Handle::from_bytes)
        .map_err(|e| e.to_string())
}
