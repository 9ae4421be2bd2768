//! The paging controller.
//!
//! Drives the page cache from host callbacks. A reload materializes the
//! whole window around the current page; a scroll event materializes the one
//! neighbor the scroll is moving towards.

use std::rc::{Rc, Weak};

use pager_geometry::Size;

use crate::cache::{PageCache, PutOutcome};
use crate::config::PagerConfig;
use crate::registry::{PageDequeue, PageRegistry};
use crate::stats::PagerStats;
use crate::window::{current_page, WindowPolicy};
use crate::{
    PageHandle, PageIndex, PageKind, PagerDataSource, PagerDelegate, PagerError, PagerSurface,
};

/// Controller lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PagerState {
    /// No data source, zero pages, or no viewport area. Nothing is laid out.
    #[default]
    Empty,
    /// The window around the current page is materialized.
    Ready,
}

/// Owns the page cache and registry of one paged view.
///
/// The data source and delegate are held weakly: the controller never keeps
/// them alive, and a dropped data source puts it back into
/// [`PagerState::Empty`].
pub struct PagingController {
    registry: PageRegistry,
    cache: PageCache,
    policy: WindowPolicy,
    config: PagerConfig,
    data_source: Option<Weak<dyn PagerDataSource>>,
    delegate: Option<Weak<dyn PagerDelegate>>,
    state: PagerState,
    stats: PagerStats,
}

impl Default for PagingController {
    fn default() -> Self {
        Self::new(PagerConfig::default())
    }
}

impl PagingController {
    pub fn new(config: PagerConfig) -> Self {
        Self {
            registry: PageRegistry::new(),
            cache: PageCache::new(),
            policy: WindowPolicy::new(config.window_radius),
            config,
            data_source: None,
            delegate: None,
            state: PagerState::Empty,
            stats: PagerStats::default(),
        }
    }

    pub fn config(&self) -> &PagerConfig {
        &self.config
    }

    /// Replaces the configuration. Takes effect on the next reload.
    pub fn set_config(&mut self, config: PagerConfig) {
        self.policy = WindowPolicy::new(config.window_radius);
        self.config = config;
    }

    pub fn set_data_source<D: PagerDataSource + 'static>(&mut self, source: &Rc<D>) {
        let source: Weak<D> = Rc::downgrade(source);
        self.data_source = Some(source);
    }

    pub fn clear_data_source(&mut self) {
        self.data_source = None;
    }

    pub fn set_delegate<D: PagerDelegate + 'static>(&mut self, delegate: &Rc<D>) {
        let delegate: Weak<D> = Rc::downgrade(delegate);
        self.delegate = Some(delegate);
    }

    pub fn clear_delegate(&mut self) {
        self.delegate = None;
    }

    /// Registers `kind` under `identifier`, replacing any earlier binding.
    pub fn register(&mut self, kind: PageKind, identifier: impl Into<String>) -> Option<PageKind> {
        self.registry.register(kind, identifier)
    }

    pub fn registry(&self) -> &PageRegistry {
        &self.registry
    }

    pub fn cache(&self) -> &PageCache {
        &self.cache
    }

    pub fn state(&self) -> PagerState {
        self.state
    }

    pub fn page(&self, index: PageIndex) -> Option<&PageHandle> {
        self.cache.get(index)
    }

    pub fn cached_indices(&self) -> Vec<PageIndex> {
        self.cache.indices()
    }

    pub fn stats(&self) -> PagerStats {
        PagerStats {
            pages_cached: self.cache.len(),
            ..self.stats.clone()
        }
    }

    /// Page under the viewport, derived from the surface's scroll offset.
    pub fn current_page(&self, surface: &dyn PagerSurface) -> PageIndex {
        let page_count = self
            .data_source()
            .map_or(0, |source| source.number_of_pages());
        current_page(surface.scroll_offset(), surface.viewport().width, page_count)
    }

    /// Lays out the window around the current page.
    ///
    /// Call on layout invalidation or when the data changed. Without a data
    /// source, pages, or viewport area the controller goes to
    /// [`PagerState::Empty`] and does nothing else.
    pub fn reload(&mut self, surface: &mut dyn PagerSurface) -> Result<PagerState, PagerError> {
        let Some(source) = self.data_source() else {
            return Ok(self.enter_empty("no data source"));
        };
        let page_count = source.number_of_pages();
        if page_count == 0 {
            return Ok(self.enter_empty("data source has no pages"));
        }
        let bounds = surface.viewport();
        if bounds.is_empty() {
            return Ok(self.enter_empty("viewport has no area"));
        }

        surface.set_paging_enabled(self.config.paging_enabled);
        surface.set_content_size(bounds.strip(page_count));

        let current = current_page(surface.scroll_offset(), bounds.width, page_count);
        self.populate_window(source.as_ref(), current, page_count, bounds, surface)?;
        self.state = PagerState::Ready;
        Ok(self.state)
    }

    /// Reacts to a scroll offset change.
    ///
    /// Materializes the neighbor the scroll is heading to and returns its
    /// index, or `None` if nothing new was needed. Ignored unless the
    /// controller is [`PagerState::Ready`].
    pub fn on_scroll(
        &mut self,
        surface: &mut dyn PagerSurface,
    ) -> Result<Option<PageIndex>, PagerError> {
        if self.state != PagerState::Ready {
            return Ok(None);
        }
        let Some(source) = self.data_source() else {
            self.enter_empty("data source dropped");
            return Ok(None);
        };
        let page_count = source.number_of_pages();
        let bounds = surface.viewport();
        if page_count == 0 || bounds.is_empty() {
            self.enter_empty("nothing to page");
            return Ok(None);
        }

        let offset = surface.scroll_offset();
        let current = current_page(offset, bounds.width, page_count);
        let step = self
            .policy
            .advance_step(current, offset / bounds.width, page_count);

        // The step target is fetched below; any other hole means the host
        // jumped past the window.
        let window = self.policy.required_indices(current, page_count);
        if window
            .iter()
            .any(|index| Some(index) != step && !self.cache.contains(index))
        {
            log::debug!("window around page {current} has holes after scroll, repopulating");
            self.populate_window(source.as_ref(), current, page_count, bounds, surface)?;
        }

        let Some(next) = step else {
            return Ok(None);
        };
        if self.cache.contains(next) {
            return Ok(None);
        }
        self.materialize(source.as_ref(), next, current, bounds, surface)?;
        Ok(Some(next))
    }

    /// Forwards a selection of `index` to the delegate.
    ///
    /// Returns whether the page was selected. Out-of-range indices are never
    /// selected; without a delegate every valid page is.
    pub fn select_page(&self, index: PageIndex) -> bool {
        let page_count = self
            .data_source()
            .map_or(0, |source| source.number_of_pages());
        if index >= page_count {
            return false;
        }
        let Some(delegate) = self.delegate() else {
            return true;
        };
        if !delegate.should_select_page(index) {
            return false;
        }
        delegate.did_select_page(index);
        true
    }

    fn data_source(&self) -> Option<Rc<dyn PagerDataSource>> {
        self.data_source.as_ref()?.upgrade()
    }

    fn delegate(&self) -> Option<Rc<dyn PagerDelegate>> {
        self.delegate.as_ref()?.upgrade()
    }

    fn enter_empty(&mut self, reason: &str) -> PagerState {
        if self.state != PagerState::Empty {
            log::debug!("pager is empty: {reason}");
        }
        self.state = PagerState::Empty;
        self.state
    }

    fn populate_window(
        &mut self,
        source: &dyn PagerDataSource,
        current: PageIndex,
        page_count: usize,
        bounds: Size,
        surface: &mut dyn PagerSurface,
    ) -> Result<(), PagerError> {
        let window = self.policy.required_indices(current, page_count);
        log::debug!(
            "populating window {:?} around page {current} of {page_count}",
            window.indices()
        );
        for index in window.iter() {
            self.materialize(source, index, current, bounds, surface)?;
        }
        Ok(())
    }

    fn materialize(
        &mut self,
        source: &dyn PagerDataSource,
        index: PageIndex,
        current: PageIndex,
        bounds: Size,
        surface: &mut dyn PagerSurface,
    ) -> Result<(), PagerError> {
        let page = {
            let mut pager = PageDequeue {
                registry: &self.registry,
                cache: &mut self.cache,
                policy: self.policy,
                current,
                bounds,
                stats: &mut self.stats,
                recycled: Vec::new(),
            };
            match source.page_for_index(&mut pager, index) {
                Ok(page) => {
                    pager.restore_recycled(Some(&page));
                    page
                }
                Err(err) => {
                    pager.restore_recycled(None);
                    return Err(err);
                }
            }
        };

        if let PutOutcome::Replaced { detached: true, .. } =
            self.cache.put(index, page.clone(), surface)
        {
            self.stats.detach_count += 1;
        }
        if self.cache.position_and_attach(index, &page, bounds, surface) {
            self.stats.attach_count += 1;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};

    #[derive(Default)]
    struct Slide {
        shown: Option<PageIndex>,
    }

    struct Slides {
        count: Cell<usize>,
        requests: RefCell<Vec<PageIndex>>,
    }

    impl Slides {
        fn new(count: usize) -> Rc<Self> {
            Rc::new(Self {
                count: Cell::new(count),
                requests: RefCell::new(Vec::new()),
            })
        }

        fn take_requests(&self) -> Vec<PageIndex> {
            std::mem::take(&mut *self.requests.borrow_mut())
        }
    }

    impl PagerDataSource for Slides {
        fn number_of_pages(&self) -> usize {
            self.count.get()
        }

        fn page_for_index(
            &self,
            pager: &mut PageDequeue<'_>,
            index: PageIndex,
        ) -> Result<PageHandle, PagerError> {
            self.requests.borrow_mut().push(index);
            let page = pager.dequeue("slide", index)?;
            page.with_content_mut(|slide: &mut Slide| slide.shown = Some(index));
            Ok(page)
        }
    }

    struct Strip {
        viewport: Size,
        offset: f32,
        content_size: Size,
        paging: bool,
        attached: Vec<PageHandle>,
    }

    impl Strip {
        fn new(width: f32, height: f32) -> Self {
            Self {
                viewport: Size::new(width, height),
                offset: 0.0,
                content_size: Size::ZERO,
                paging: false,
                attached: Vec::new(),
            }
        }
    }

    impl PagerSurface for Strip {
        fn viewport(&self) -> Size {
            self.viewport
        }

        fn scroll_offset(&self) -> f32 {
            self.offset
        }

        fn attach(&mut self, page: &PageHandle) {
            self.attached.push(page.clone());
        }

        fn detach(&mut self, page: &PageHandle) {
            self.attached.retain(|attached| !attached.ptr_eq(page));
        }

        fn set_content_size(&mut self, size: Size) {
            self.content_size = size;
        }

        fn set_paging_enabled(&mut self, enabled: bool) {
            self.paging = enabled;
        }
    }

    fn controller() -> PagingController {
        let mut controller = PagingController::default();
        controller.register(PageKind::of::<Slide>(), "slide");
        controller
    }

    #[test]
    fn reload_without_data_source_stays_empty() {
        let mut controller = controller();
        let mut strip = Strip::new(100.0, 100.0);

        assert_eq!(controller.reload(&mut strip).unwrap(), PagerState::Empty);
        assert!(strip.attached.is_empty());
        assert_eq!(strip.content_size, Size::ZERO);
    }

    #[test]
    fn reload_with_zero_pages_stays_empty() {
        let mut controller = controller();
        let slides = Slides::new(0);
        controller.set_data_source(&slides);
        let mut strip = Strip::new(100.0, 100.0);

        assert_eq!(controller.reload(&mut strip).unwrap(), PagerState::Empty);
        assert!(slides.take_requests().is_empty());
    }

    #[test]
    fn reload_populates_window_and_content_size() {
        let mut controller = controller();
        let slides = Slides::new(5);
        controller.set_data_source(&slides);
        let mut strip = Strip::new(100.0, 200.0);
        strip.offset = 200.0;

        assert_eq!(controller.reload(&mut strip).unwrap(), PagerState::Ready);
        assert_eq!(slides.take_requests(), vec![1, 2, 3]);
        assert_eq!(controller.cached_indices(), vec![1, 2, 3]);
        assert_eq!(strip.content_size, Size::new(500.0, 200.0));
        assert!(strip.paging);
        assert_eq!(strip.attached.len(), 3);
        assert_eq!(controller.page(3).unwrap().frame().x, 300.0);
    }

    #[test]
    fn dropped_data_source_means_empty() {
        let mut controller = controller();
        let slides = Slides::new(3);
        controller.set_data_source(&slides);
        let mut strip = Strip::new(100.0, 100.0);
        controller.reload(&mut strip).unwrap();
        drop(slides);

        assert_eq!(controller.on_scroll(&mut strip).unwrap(), None);
        assert_eq!(controller.state(), PagerState::Empty);
    }

    #[test]
    fn scroll_before_reload_is_ignored() {
        let mut controller = controller();
        let slides = Slides::new(3);
        controller.set_data_source(&slides);
        let mut strip = Strip::new(100.0, 100.0);

        assert_eq!(controller.on_scroll(&mut strip).unwrap(), None);
        assert!(slides.take_requests().is_empty());
    }

    #[test]
    fn select_page_without_delegate_accepts_valid_pages() {
        let mut controller = controller();
        let slides = Slides::new(2);
        controller.set_data_source(&slides);

        assert!(controller.select_page(1));
        assert!(!controller.select_page(2));
    }

    #[test]
    fn current_page_follows_offset() {
        let mut controller = controller();
        let slides = Slides::new(4);
        controller.set_data_source(&slides);
        let mut strip = Strip::new(100.0, 100.0);
        strip.offset = 260.0;

        assert_eq!(controller.current_page(&strip), 3);
        strip.offset = 240.0;
        assert_eq!(controller.current_page(&strip), 2);
    }

    #[test]
    fn stats_count_lifecycle() {
        let mut controller = controller();
        let slides = Slides::new(5);
        controller.set_data_source(&slides);
        let mut strip = Strip::new(100.0, 100.0);
        strip.offset = 200.0;
        controller.reload(&mut strip).unwrap();

        strip.offset = 300.0;
        assert_eq!(controller.on_scroll(&mut strip).unwrap(), Some(4));

        let stats = controller.stats();
        assert_eq!(stats.pages_created, 3);
        assert_eq!(stats.reuse_count, 1);
        assert_eq!(stats.pages_cached, 3);
        assert_eq!(stats.attach_count, 3);
        assert_eq!(stats.detach_count, 0);
        assert_eq!(
            controller
                .page(4)
                .and_then(|page| page.with_content(|slide: &Slide| slide.shown)),
            Some(Some(4))
        );
    }
}
