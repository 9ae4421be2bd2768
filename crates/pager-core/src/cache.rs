//! Index → page cache.
//!
//! The cache is the only owner of page bindings. Entries are never pruned in
//! the background: an entry leaves the cache only when the reuse scan hands
//! its page to a data source for another index.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use pager_geometry::{Rect, Size};

use crate::window::WindowPolicy;
use crate::{PageHandle, PageIndex, PageKind, PagerSurface};

/// Result of binding a page to an index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PutOutcome {
    /// The index was empty.
    Inserted,
    /// The same page was already bound; nothing changed.
    Unchanged,
    /// A different page was bound and has been replaced.
    Replaced {
        previous: PageHandle,
        /// Whether `previous` was detached from the surface.
        detached: bool,
    },
}

/// Maps page indices to materialized pages.
///
/// Iteration is in ascending index order, which makes the reuse scan
/// deterministic: among several recyclable pages, the lowest index wins.
#[derive(Debug, Default)]
pub struct PageCache {
    entries: BTreeMap<PageIndex, PageHandle>,
}

impl PageCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, index: PageIndex) -> Option<&PageHandle> {
        self.entries.get(&index)
    }

    pub fn contains(&self, index: PageIndex) -> bool {
        self.entries.contains_key(&index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Cached indices in ascending order.
    pub fn indices(&self) -> Vec<PageIndex> {
        self.entries.keys().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (PageIndex, &PageHandle)> + '_ {
        self.entries.iter().map(|(index, page)| (*index, page))
    }

    /// Returns true if `page` is bound under any index.
    pub fn holds(&self, page: &PageHandle) -> bool {
        self.entries.values().any(|cached| cached.ptr_eq(page))
    }

    /// Binds `page` to `index`.
    ///
    /// Rebinding the page already at `index` is a no-op. A different page at
    /// `index` is replaced and, if it is attached and not bound elsewhere,
    /// detached from the surface.
    pub fn put(
        &mut self,
        index: PageIndex,
        page: PageHandle,
        surface: &mut dyn PagerSurface,
    ) -> PutOutcome {
        if let Some(existing) = self.entries.get(&index) {
            if existing.ptr_eq(&page) {
                return PutOutcome::Unchanged;
            }
        }

        let Some(previous) = self.entries.insert(index, page) else {
            return PutOutcome::Inserted;
        };

        let detached = previous.is_attached() && !self.holds(&previous);
        if detached {
            log::trace!("detaching page {} replaced at index {index}", previous.id());
            surface.detach(&previous);
            previous.set_attached(false);
        }
        PutOutcome::Replaced { previous, detached }
    }

    /// Places `page` in the slot of `index` and attaches it if needed.
    ///
    /// Runs after every [`put`](Self::put), including no-op rebinds, since
    /// the page size may have changed since the page was last placed.
    /// Returns true if the page was attached by this call.
    pub fn position_and_attach(
        &self,
        index: PageIndex,
        page: &PageHandle,
        page_size: Size,
        surface: &mut dyn PagerSurface,
    ) -> bool {
        let frame = Rect::page_slot(index, page_size);
        page.set_frame(frame);
        log::trace!("page {} placed at index {index}: {frame:?}", page.id());

        if page.is_attached() {
            return false;
        }
        surface.attach(page);
        page.set_attached(true);
        true
    }

    /// Evicts and returns the first page outside the live window that is an
    /// instance of `kind`.
    ///
    /// At most one entry is removed. The page stays attached to the surface;
    /// it is repositioned when the caller binds it to its new index.
    pub fn take_reusable(
        &mut self,
        kind: &PageKind,
        current: PageIndex,
        policy: &WindowPolicy,
    ) -> Option<(PageIndex, PageHandle)> {
        let index = self
            .entries
            .iter()
            .find(|(index, page)| policy.is_reusable(**index, current) && kind.matches(page))
            .map(|(index, _)| *index)?;
        self.entries.remove(&index).map(|page| (index, page))
    }

    /// Rebinds a page taken by [`take_reusable`](Self::take_reusable) that
    /// ended up unused. Returns false if `index` has been bound since.
    pub(crate) fn restore(&mut self, index: PageIndex, page: PageHandle) -> bool {
        match self.entries.entry(index) {
            Entry::Vacant(entry) => {
                entry.insert(page);
                true
            }
            Entry::Occupied(_) => {
                log::warn!(
                    "cannot return page {} to index {index}: slot rebound",
                    page.id()
                );
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Blank;

    #[derive(Default)]
    struct Other;

    #[derive(Default)]
    struct CountingSurface {
        attached: Vec<u64>,
        detached: Vec<u64>,
    }

    impl PagerSurface for CountingSurface {
        fn viewport(&self) -> Size {
            Size::new(100.0, 200.0)
        }

        fn scroll_offset(&self) -> f32 {
            0.0
        }

        fn attach(&mut self, page: &PageHandle) {
            self.attached.push(page.id().raw());
        }

        fn detach(&mut self, page: &PageHandle) {
            self.detached.push(page.id().raw());
        }

        fn set_content_size(&mut self, _size: Size) {}
    }

    fn page() -> PageHandle {
        PageKind::of::<Blank>().instantiate(Size::new(100.0, 200.0))
    }

    #[test]
    fn repeated_put_attaches_once() {
        let mut cache = PageCache::new();
        let mut surface = CountingSurface::default();
        let page = page();
        let size = Size::new(100.0, 200.0);

        assert_eq!(cache.put(2, page.clone(), &mut surface), PutOutcome::Inserted);
        assert!(cache.position_and_attach(2, &page, size, &mut surface));
        assert_eq!(cache.put(2, page.clone(), &mut surface), PutOutcome::Unchanged);
        assert!(!cache.position_and_attach(2, &page, size, &mut surface));

        assert_eq!(surface.attached, vec![page.id().raw()]);
        assert_eq!(page.frame(), Rect::new(200.0, 0.0, 100.0, 200.0));
    }

    #[test]
    fn replacing_detaches_previous_page() {
        let mut cache = PageCache::new();
        let mut surface = CountingSurface::default();
        let size = Size::new(100.0, 200.0);
        let first = page();
        let second = page();

        cache.put(0, first.clone(), &mut surface);
        cache.position_and_attach(0, &first, size, &mut surface);

        let outcome = cache.put(0, second.clone(), &mut surface);
        assert_eq!(
            outcome,
            PutOutcome::Replaced {
                previous: first.clone(),
                detached: true
            }
        );
        assert!(!first.is_attached());
        assert_eq!(surface.detached, vec![first.id().raw()]);
        assert_eq!(cache.get(0), Some(&second));
    }

    #[test]
    fn replaced_page_bound_elsewhere_stays_attached() {
        let mut cache = PageCache::new();
        let mut surface = CountingSurface::default();
        let size = Size::new(100.0, 200.0);
        let shared = page();

        cache.put(0, shared.clone(), &mut surface);
        cache.put(1, shared.clone(), &mut surface);
        cache.position_and_attach(1, &shared, size, &mut surface);

        let outcome = cache.put(0, page(), &mut surface);
        assert!(matches!(outcome, PutOutcome::Replaced { detached: false, .. }));
        assert!(shared.is_attached());
        assert!(surface.detached.is_empty());
    }

    #[test]
    fn reposition_updates_frame_for_new_size() {
        let mut cache = PageCache::new();
        let mut surface = CountingSurface::default();
        let page = page();

        cache.put(1, page.clone(), &mut surface);
        cache.position_and_attach(1, &page, Size::new(100.0, 200.0), &mut surface);
        cache.position_and_attach(1, &page, Size::new(50.0, 60.0), &mut surface);

        assert_eq!(page.frame(), Rect::new(50.0, 0.0, 50.0, 60.0));
        assert_eq!(page.content_frame(), Rect::new(0.0, 0.0, 50.0, 60.0));
    }

    #[test]
    fn take_reusable_picks_lowest_eligible_index() {
        let mut cache = PageCache::new();
        let mut surface = CountingSurface::default();
        let pages: Vec<_> = (0..6).map(|_| page()).collect();
        for (index, page) in pages.iter().enumerate() {
            cache.put(index, page.clone(), &mut surface);
        }

        let policy = WindowPolicy::default();
        let (index, taken) = cache
            .take_reusable(&PageKind::of::<Blank>(), 3, &policy)
            .expect("reusable page");

        assert_eq!(index, 0);
        assert_eq!(taken, pages[0]);
        assert_eq!(cache.indices(), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn restore_rebinds_an_unused_page() {
        let mut cache = PageCache::new();
        let mut surface = CountingSurface::default();
        let first = page();
        cache.put(0, first.clone(), &mut surface);
        cache.put(3, page(), &mut surface);

        let (index, taken) = cache
            .take_reusable(&PageKind::of::<Blank>(), 3, &WindowPolicy::default())
            .expect("reusable page");
        assert!(cache.restore(index, taken));

        assert_eq!(cache.indices(), vec![0, 3]);
        assert_eq!(cache.get(0), Some(&first));
        assert!(!cache.restore(0, page()));
        assert_eq!(cache.get(0), Some(&first));
    }

    #[test]
    fn take_reusable_skips_window_and_other_kinds() {
        let mut cache = PageCache::new();
        let mut surface = CountingSurface::default();
        let other = PageKind::of::<Other>().instantiate(Size::new(1.0, 1.0));
        cache.put(0, other, &mut surface);
        cache.put(1, page(), &mut surface);
        cache.put(2, page(), &mut surface);

        let policy = WindowPolicy::default();
        assert!(cache
            .take_reusable(&PageKind::of::<Blank>(), 1, &policy)
            .is_none());
        assert_eq!(cache.len(), 3);
    }
}
