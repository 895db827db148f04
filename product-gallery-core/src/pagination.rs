use crate::source::DataSource;
use crate::source::Product;
use log::{debug, info};
use time::OffsetDateTime;

/// Where a view is in its one-shot load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    Idle,
    Fetching,
    Loaded,
    TornDown,
}

/// Half-open bounds of page `page` over `len` items, both clamped to `len`.
fn window_bounds(len: usize, page: usize, page_size: usize) -> (usize, usize) {
    let start = page.saturating_mul(page_size).min(len);
    let end = start.saturating_add(page_size).min(len);
    (start, end)
}

/// Slice out one page window. Any page value is accepted; a start past the
/// end of `items` yields an empty slice.
pub fn page_window<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    let (start, end) = window_bounds(items.len(), page, page_size);
    &items[start..end]
}

/// Number of pages needed for `total_items`. Zero items means zero pages.
pub fn page_count_for(total_items: usize, page_size: usize) -> usize {
    if page_size == 0 {
        0
    } else {
        total_items.div_ceil(page_size)
    }
}

/// Client-side pagination over a list that is fetched exactly once.
#[derive(Debug, Clone)]
pub struct PaginatedView<T> {
    items: Vec<T>,
    page_index: usize,
    page_size: usize,
    phase: LoadPhase,
    loaded_at: Option<OffsetDateTime>,
}

impl<T> PaginatedView<T> {
    /// `page_size` must be positive; `GalleryConfig` rejects zero before a
    /// view is ever built.
    pub fn new(page_size: usize) -> Self {
        debug_assert!(page_size > 0, "page size must be positive");
        Self {
            items: Vec::new(),
            page_index: 0,
            page_size,
            phase: LoadPhase::Idle,
            loaded_at: None,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn phase(&self) -> LoadPhase {
        self.phase
    }

    pub fn loaded_at(&self) -> Option<OffsetDateTime> {
        self.loaded_at
    }

    /// Claim the single fetch for this instance. Returns true exactly once;
    /// the caller is then responsible for issuing the fetch and handing the
    /// result to `complete_initialize`.
    pub fn begin_initialize(&mut self) -> bool {
        if self.phase != LoadPhase::Idle {
            debug!("initialize skipped, view is {:?}", self.phase);
            return false;
        }
        self.phase = LoadPhase::Fetching;
        true
    }

    /// Store the fetched list. Discarded after teardown or if a list was
    /// already stored; returns whether `items` was written.
    pub fn complete_initialize(&mut self, items: Vec<T>) -> bool {
        match self.phase {
            LoadPhase::TornDown => {
                debug!("discarding {} items that arrived after teardown", items.len());
                false
            }
            LoadPhase::Loaded => {
                debug!("discarding second load of {} items", items.len());
                false
            }
            LoadPhase::Idle | LoadPhase::Fetching => {
                info!("loaded {} items into paginated view", items.len());
                self.items = items;
                self.page_index = 0;
                self.phase = LoadPhase::Loaded;
                self.loaded_at = Some(OffsetDateTime::now_utc());
                true
            }
        }
    }

    pub fn teardown(&mut self) {
        self.phase = LoadPhase::TornDown;
    }

    pub fn page_count(&self) -> usize {
        page_count_for(self.items.len(), self.page_size)
    }

    fn last_page(&self) -> usize {
        self.page_count().saturating_sub(1)
    }

    pub fn can_go_previous(&self) -> bool {
        self.page_index > 0
    }

    pub fn can_go_next(&self) -> bool {
        self.page_count() > 0 && self.page_index < self.last_page()
    }

    /// Jump to page `n`, clamped to the last page (or 0 with no pages).
    pub fn go_to_page(&mut self, n: usize) {
        self.page_index = n.min(self.last_page());
    }

    pub fn next(&mut self) -> bool {
        if self.can_go_next() {
            self.page_index += 1;
            true
        } else {
            false
        }
    }

    pub fn previous(&mut self) -> bool {
        if self.can_go_previous() {
            self.page_index -= 1;
            true
        } else {
            false
        }
    }

    pub fn visible_items(&self) -> &[T] {
        page_window(&self.items, self.page_index, self.page_size)
    }

    /// Half-open range of `items` covered by the current page.
    pub fn visible_range(&self) -> (usize, usize) {
        window_bounds(self.items.len(), self.page_index, self.page_size)
    }

    pub fn controls(&self) -> PageControls {
        let markers = (0..self.page_count())
            .map(|index| PageMarker {
                index,
                number: index + 1,
                current: index == self.page_index,
            })
            .collect();

        PageControls {
            markers,
            previous_enabled: self.page_index != 0,
            next_enabled: self.page_index != self.last_page(),
        }
    }

    pub fn render_state(&self) -> RenderState<'_, T> {
        if self.items.is_empty() {
            RenderState::Loading
        } else {
            RenderState::Ready {
                page_number: self.page_index + 1,
                items: self.visible_items(),
                controls: self.controls(),
            }
        }
    }
}

impl PaginatedView<Product> {
    /// Issue the one-shot fetch and store its result.
    pub async fn initialize<S: DataSource>(&mut self, source: &S) -> bool {
        if !self.begin_initialize() {
            return false;
        }
        let response = source.fetch().await;
        self.complete_initialize(response.into_products())
    }
}

/// One clickable page marker. `number` is for display, `index` is what
/// `go_to_page` takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageMarker {
    pub index: usize,
    pub number: usize,
    pub current: bool,
}

/// The control strip under a populated view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageControls {
    pub markers: Vec<PageMarker>,
    pub previous_enabled: bool,
    pub next_enabled: bool,
}

/// What a UI should draw for a view right now.
#[derive(Debug)]
pub enum RenderState<'a, T> {
    /// Nothing loaded, whether the fetch is pending or came back empty.
    Loading,
    Ready {
        page_number: usize,
        items: &'a [T],
        controls: PageControls,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::StaticDataSource;

    fn products(count: usize) -> Vec<Product> {
        (0..count)
            .map(|i| Product {
                id: i as u64 + 1,
                title: format!("product {}", i + 1),
                thumbnail: format!("https://cdn.example.com/{}.png", i + 1),
            })
            .collect()
    }

    fn loaded(count: usize, page_size: usize) -> PaginatedView<usize> {
        let mut view = PaginatedView::new(page_size);
        view.complete_initialize((0..count).collect());
        view
    }

    #[test]
    fn page_count_is_ceiling() {
        for (count, size, expected) in [(1, 10, 1), (10, 10, 1), (11, 10, 2), (25, 10, 3), (7, 3, 3)] {
            assert_eq!(loaded(count, size).page_count(), expected, "{} / {}", count, size);
        }
    }

    #[test]
    fn twenty_five_items_in_pages_of_ten() {
        let mut view = loaded(25, 10);
        assert_eq!(view.page_count(), 3);
        assert_eq!(view.visible_items().len(), 10);

        view.go_to_page(2);
        assert_eq!(view.visible_items(), &[20, 21, 22, 23, 24]);

        assert!(page_window(view.items(), 3, 10).is_empty());
    }

    #[test]
    fn page_window_never_panics() {
        let items: Vec<usize> = (0..5).collect();
        assert!(page_window(&items, usize::MAX, 10).is_empty());
        assert!(page_window(&items, 1, usize::MAX).is_empty());
        assert_eq!(page_window(&items, 0, usize::MAX), &items[..]);
        assert!(page_window::<usize>(&[], 0, 10).is_empty());
    }

    #[test]
    fn window_bounds_clamp_to_len() {
        assert_eq!(window_bounds(23, 2, 10), (20, 23));
        assert_eq!(window_bounds(23, 5, 10), (23, 23));
        assert_eq!(window_bounds(0, 0, 10), (0, 0));
        assert_eq!(window_bounds(5, usize::MAX, usize::MAX), (5, 5));
    }

    #[test]
    fn visible_range_matches_visible_items() {
        let mut view = loaded(23, 10);
        for page in 0..3 {
            view.go_to_page(page);
            let (start, end) = view.visible_range();
            assert_eq!(view.visible_items(), &view.items()[start..end]);
        }
    }

    #[test]
    fn empty_view_is_loading() {
        let view: PaginatedView<usize> = PaginatedView::new(10);
        assert_eq!(view.page_count(), 0);
        assert!(view.visible_items().is_empty());
        assert!(matches!(view.render_state(), RenderState::Loading));
    }

    #[test]
    fn empty_fetch_stays_loading() {
        let mut view: PaginatedView<usize> = PaginatedView::new(10);
        assert!(view.begin_initialize());
        assert!(view.complete_initialize(Vec::new()));
        assert_eq!(view.phase(), LoadPhase::Loaded);
        assert!(matches!(view.render_state(), RenderState::Loading));
    }

    #[test]
    fn previous_on_first_page_is_clamped() {
        let mut view = loaded(25, 10);
        assert!(!view.previous());
        assert_eq!(view.page_index(), 0);
    }

    #[test]
    fn next_on_last_page_is_clamped() {
        let mut view = loaded(25, 10);
        assert!(view.next());
        assert!(view.next());
        assert!(!view.next());
        assert_eq!(view.page_index(), 2);
    }

    #[test]
    fn go_to_page_clamps() {
        let mut view = loaded(25, 10);
        view.go_to_page(99);
        assert_eq!(view.page_index(), 2);

        let mut empty: PaginatedView<usize> = PaginatedView::new(10);
        empty.go_to_page(4);
        assert_eq!(empty.page_index(), 0);
        assert!(!empty.next());
        assert!(!empty.can_go_next());
    }

    #[test]
    fn single_page_disables_both_controls() {
        let controls = loaded(4, 10).controls();
        assert_eq!(controls.markers.len(), 1);
        assert!(!controls.previous_enabled);
        assert!(!controls.next_enabled);
    }

    #[test]
    fn fetch_is_one_shot() {
        let mut view: PaginatedView<usize> = PaginatedView::new(10);
        assert!(view.begin_initialize());
        assert!(!view.begin_initialize());
        assert!(view.complete_initialize(vec![1, 2, 3]));
        assert!(!view.complete_initialize(vec![4, 5]));
        assert_eq!(view.items(), &[1, 2, 3]);
        assert!(view.loaded_at().is_some());
    }

    #[test]
    fn completion_after_teardown_is_discarded() {
        let mut view: PaginatedView<usize> = PaginatedView::new(10);
        assert!(view.begin_initialize());
        view.teardown();
        assert!(!view.complete_initialize(vec![1, 2, 3]));
        assert!(view.items().is_empty());
        assert!(view.loaded_at().is_none());
        assert!(!view.begin_initialize());
    }

    #[tokio::test]
    async fn twenty_three_items_end_to_end() {
        let all = products(23);
        let source = StaticDataSource::new(all.clone());
        let mut view: PaginatedView<Product> = PaginatedView::new(10);

        assert!(view.initialize(&source).await);
        assert!(!view.initialize(&source).await);

        let controls = view.controls();
        let numbers: Vec<usize> = controls.markers.iter().map(|m| m.number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);

        // marker "2"
        view.go_to_page(controls.markers[1].index);
        match view.render_state() {
            RenderState::Ready {
                page_number,
                items,
                controls,
            } => {
                assert_eq!(page_number, 2);
                assert_eq!(items, &all[10..20]);
                assert!(controls.previous_enabled);
                assert!(controls.next_enabled);
                assert!(controls.markers[1].current);
            }
            RenderState::Loading => panic!("view should be populated"),
        }

        // marker "3"
        view.go_to_page(controls.markers[2].index);
        match view.render_state() {
            RenderState::Ready { items, controls, .. } => {
                assert_eq!(items.len(), 3);
                assert_eq!(items, &all[20..23]);
                assert!(controls.previous_enabled);
                assert!(!controls.next_enabled);
            }
            RenderState::Loading => panic!("view should be populated"),
        }
        assert_eq!(view.visible_range(), (20, 23));
    }
}
