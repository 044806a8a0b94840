/// The gallery controller
///
/// Owns every piece of mutable UI state: the search term, the filtered
/// view, the current page, and the two modal state machines. All
/// transitions happen synchronously inside a single event handler; the
/// view layer re-renders wholesale from this state and never mutates it.
use std::collections::HashMap;

use super::data::{ImageRecord, ImageStore};

/// Number of gallery tiles per page
pub const ITEMS_PER_PAGE: usize = 40;

/// Lightbox overlay state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lightbox {
    #[default]
    Closed,
    /// Open on the record at this store index
    Open(usize),
}

impl Lightbox {
    pub fn is_open(self) -> bool {
        matches!(self, Lightbox::Open(_))
    }
}

/// Tag-summary modal state.
///
/// `Opening` and `Closing` are cosmetic fade phases driven by short
/// timers; the modal content is already interactive while `Opening` and
/// still rendered while `Closing`. The timers never gate correctness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TagsModal {
    #[default]
    Closed,
    Opening,
    Open,
    Closing,
}

impl TagsModal {
    /// Whether the modal occupies the screen in any form
    pub fn is_visible(self) -> bool {
        !matches!(self, TagsModal::Closed)
    }

    /// `Closed -> Opening`. Returns true when the caller should start
    /// the fade-in timer.
    pub fn begin_open(&mut self) -> bool {
        if matches!(self, TagsModal::Closed) {
            *self = TagsModal::Opening;
            true
        } else {
            false
        }
    }

    /// `Opening -> Open`, fired by the fade-in timer
    pub fn finish_open(&mut self) {
        if matches!(self, TagsModal::Opening) {
            *self = TagsModal::Open;
        }
    }

    /// `Opening | Open -> Closing`. Returns true when the caller should
    /// start the fade-out timer.
    pub fn begin_close(&mut self) -> bool {
        if matches!(self, TagsModal::Opening | TagsModal::Open) {
            *self = TagsModal::Closing;
            true
        } else {
            false
        }
    }

    /// `Closing -> Closed`, fired by the fade-out timer
    pub fn finish_close(&mut self) {
        if matches!(self, TagsModal::Closing) {
            *self = TagsModal::Closed;
        }
    }
}

/// What an escape key press ended up doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EscapeOutcome {
    ClosedLightbox,
    /// The tag modal started its fade-out; the caller schedules the timer
    ClosingTagsModal,
    Nothing,
}

/// All gallery state, owned by the controller.
///
/// Invariants:
/// - `filtered` is exactly the subset of store indices whose records have
///   at least one tag containing `search_term` case-insensitively (the
///   full store when the term is empty), in store order.
/// - `current_page` is within `[1, total_pages()]`, or 1 when the
///   filtered view is empty.
#[derive(Debug, Clone)]
pub struct GalleryState {
    store: ImageStore,
    /// tag -> occurrence count over the full store, sorted descending,
    /// ties in first-seen order. Computed once, the store never changes.
    tag_counts: Vec<(String, usize)>,
    search_term: String,
    filtered: Vec<usize>,
    current_page: usize,
    pub lightbox: Lightbox,
    pub tags_modal: TagsModal,
}

impl GalleryState {
    pub fn new(store: ImageStore) -> Self {
        let tag_counts = collect_tag_counts(&store.records);
        let filtered = (0..store.records.len()).collect();
        GalleryState {
            store,
            tag_counts,
            search_term: String::new(),
            filtered,
            current_page: 1,
            lightbox: Lightbox::default(),
            tags_modal: TagsModal::default(),
        }
    }

    pub fn records(&self) -> &[ImageRecord] {
        &self.store.records
    }

    pub fn store(&self) -> &ImageStore {
        &self.store
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn tag_counts(&self) -> &[(String, usize)] {
        &self.tag_counts
    }

    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    /// Re-run the filter for a new search term and reset to page 1.
    ///
    /// Runs on every keystroke; the store is small and in-memory, so no
    /// debouncing is needed.
    pub fn search(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
        let needle = self.search_term.to_lowercase();

        self.filtered = self
            .store
            .records
            .iter()
            .enumerate()
            .filter(|(_, record)| {
                needle.is_empty()
                    || record
                        .tags
                        .iter()
                        .any(|tag| tag.to_lowercase().contains(&needle))
            })
            .map(|(index, _)| index)
            .collect();

        self.current_page = 1;
    }

    /// Restore the full unfiltered list and page 1
    pub fn clear_search(&mut self) {
        self.search("");
    }

    /// Filter by a tag picked from the summary or a tile chip. The term
    /// becomes exactly that tag string and goes through the normal
    /// filter path.
    pub fn select_tag(&mut self, tag: &str) {
        self.search(tag);
    }

    /// `ceil(filtered / page size)`; 0 when the filtered view is empty,
    /// in which case pagination controls are omitted entirely
    pub fn total_pages(&self) -> usize {
        self.filtered.len().div_ceil(ITEMS_PER_PAGE)
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn is_last_page(&self) -> bool {
        !self.filtered.is_empty() && self.current_page == self.total_pages()
    }

    /// Records on the current page, paired with their store indices
    pub fn page_records(&self) -> impl Iterator<Item = (usize, &ImageRecord)> + '_ {
        let start = (self.current_page - 1) * ITEMS_PER_PAGE;
        self.filtered
            .iter()
            .skip(start.min(self.filtered.len()))
            .take(ITEMS_PER_PAGE)
            .map(move |&index| (index, &self.store.records[index]))
    }

    /// Jump to page `page`. Requests outside `[1, total_pages]` are
    /// rejected with no state change. Returns whether the page changed.
    pub fn go_to_page(&mut self, page: usize) -> bool {
        if page == 0 || page > self.total_pages() || page == self.current_page {
            return false;
        }
        self.current_page = page;
        true
    }

    pub fn next_page(&mut self) -> bool {
        self.go_to_page(self.current_page + 1)
    }

    pub fn prev_page(&mut self) -> bool {
        self.go_to_page(self.current_page.wrapping_sub(1))
    }

    /// The easter-egg image url, only when it should actually show:
    /// on the last page of the unfiltered view, never during a search,
    /// never for an empty store
    pub fn visible_easter_egg(&self) -> Option<&str> {
        if self.search_term.is_empty() && self.is_last_page() {
            self.store.easter_egg.as_deref()
        } else {
            None
        }
    }

    /// Open the lightbox on a record. Re-opening while already open
    /// simply replaces the displayed image, no stacking.
    pub fn open_lightbox(&mut self, index: usize) {
        if index < self.store.records.len() {
            self.lightbox = Lightbox::Open(index);
        }
    }

    pub fn close_lightbox(&mut self) {
        self.lightbox = Lightbox::Closed;
    }

    /// Route an escape press: the lightbox closes first if open,
    /// otherwise the tag modal starts closing
    pub fn escape(&mut self) -> EscapeOutcome {
        if self.lightbox.is_open() {
            self.close_lightbox();
            EscapeOutcome::ClosedLightbox
        } else if self.tags_modal.begin_close() {
            EscapeOutcome::ClosingTagsModal
        } else {
            EscapeOutcome::Nothing
        }
    }
}

/// Aggregate occurrence counts per tag over the full store.
///
/// First-seen order is recorded before sorting so that equal counts keep
/// a deterministic, insertion-ordered tie-break.
fn collect_tag_counts(records: &[ImageRecord]) -> Vec<(String, usize)> {
    let mut order: Vec<(String, usize)> = Vec::new();
    let mut index_of: HashMap<String, usize> = HashMap::new();

    for record in records {
        for tag in &record.tags {
            match index_of.get(tag) {
                Some(&i) => order[i].1 += 1,
                None => {
                    index_of.insert(tag.clone(), order.len());
                    order.push((tag.clone(), 1));
                }
            }
        }
    }

    // Stable sort keeps first-seen order within equal counts
    order.sort_by(|a, b| b.1.cmp(&a.1));
    order
}
