//! Reuse identifiers and the dequeue algorithm.
//!
//! Dequeue follows a three-step lookup. The page already cached at the
//! requested index wins. Otherwise the first cached page of the registered
//! kind outside the live window is evicted and recycled. Otherwise a fresh
//! page is built by the kind's factory.

use pager_geometry::Size;

use crate::cache::PageCache;
use crate::collections::map::{Entry, HashMap};
use crate::stats::PagerStats;
use crate::window::WindowPolicy;
use crate::{PageHandle, PageIndex, PageKind, PagerError};

/// Where a dequeued page came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DequeueOrigin {
    /// The page already bound to the requested index.
    Cached,
    /// A page evicted from index `from`.
    Recycled { from: PageIndex },
    /// A new page from the kind's factory.
    Created,
}

#[derive(Debug, Clone)]
pub struct Dequeued {
    pub page: PageHandle,
    pub origin: DequeueOrigin,
}

/// Maps reuse identifiers to page kinds.
#[derive(Debug, Default)]
pub struct PageRegistry {
    kinds: HashMap<String, PageKind>,
}

impl PageRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `identifier` to `kind`, returning the kind it replaces.
    pub fn register(&mut self, kind: PageKind, identifier: impl Into<String>) -> Option<PageKind> {
        match self.kinds.entry(identifier.into()) {
            Entry::Occupied(mut entry) => {
                log::debug!(
                    "re-registering '{}': {} -> {}",
                    entry.key(),
                    entry.get().type_name(),
                    kind.type_name()
                );
                Some(entry.insert(kind))
            }
            Entry::Vacant(entry) => {
                log::debug!("registered '{}' as {}", entry.key(), kind.type_name());
                entry.insert(kind);
                None
            }
        }
    }

    pub fn kind(&self, identifier: &str) -> Option<&PageKind> {
        self.kinds.get(identifier)
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.kinds.contains_key(identifier)
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Returns a page of the kind registered under `identifier` for
    /// `for_index`.
    ///
    /// Fails with [`PagerError::UnregisteredIdentifier`] if nothing is
    /// registered under `identifier`. A freshly created page is sized to
    /// `bounds` and is not inserted into the cache.
    pub fn dequeue(
        &self,
        identifier: &str,
        for_index: PageIndex,
        cache: &mut PageCache,
        current: PageIndex,
        bounds: Size,
        policy: &WindowPolicy,
    ) -> Result<Dequeued, PagerError> {
        let Some(kind) = self.kinds.get(identifier) else {
            log::error!("dequeue for page {for_index} with unregistered identifier '{identifier}'");
            return Err(PagerError::UnregisteredIdentifier {
                identifier: identifier.to_string(),
            });
        };

        if let Some(page) = cache.get(for_index) {
            return Ok(Dequeued {
                page: page.clone(),
                origin: DequeueOrigin::Cached,
            });
        }

        if let Some((from, page)) = cache.take_reusable(kind, current, policy) {
            log::debug!(
                "recycling page {} from index {from} for index {for_index} ('{identifier}')",
                page.id()
            );
            return Ok(Dequeued {
                page,
                origin: DequeueOrigin::Recycled { from },
            });
        }

        let page = kind.instantiate(bounds);
        log::debug!(
            "created page {} for index {for_index} ('{identifier}')",
            page.id()
        );
        Ok(Dequeued {
            page,
            origin: DequeueOrigin::Created,
        })
    }
}

/// Dequeue context handed to [`PagerDataSource::page_for_index`].
///
/// Borrows the controller's registry and cache for the duration of one
/// materialization.
///
/// [`PagerDataSource::page_for_index`]: crate::PagerDataSource::page_for_index
pub struct PageDequeue<'a> {
    pub(crate) registry: &'a PageRegistry,
    pub(crate) cache: &'a mut PageCache,
    pub(crate) policy: WindowPolicy,
    pub(crate) current: PageIndex,
    pub(crate) bounds: Size,
    pub(crate) stats: &'a mut PagerStats,
    /// Pages evicted by this materialization, with their old index.
    pub(crate) recycled: Vec<(PageIndex, PageHandle)>,
}

impl<'a> PageDequeue<'a> {
    /// Returns a reusable page of the kind registered under `identifier`.
    pub fn dequeue(&mut self, identifier: &str, index: PageIndex) -> Result<PageHandle, PagerError> {
        let dequeued = self.registry.dequeue(
            identifier,
            index,
            self.cache,
            self.current,
            self.bounds,
            &self.policy,
        )?;
        match dequeued.origin {
            DequeueOrigin::Cached => {}
            DequeueOrigin::Recycled { from } => {
                self.stats.reuse_count += 1;
                self.recycled.push((from, dequeued.page.clone()));
            }
            DequeueOrigin::Created => self.stats.pages_created += 1,
        }
        Ok(dequeued.page)
    }

    /// Puts every recycled page other than `kept` back at the index it was
    /// evicted from.
    ///
    /// Called once the data source returns. On failure `kept` is `None` and
    /// all evictions are undone.
    pub(crate) fn restore_recycled(&mut self, kept: Option<&PageHandle>) {
        for (from, page) in self.recycled.drain(..) {
            if kept.is_some_and(|kept| kept.ptr_eq(&page)) {
                continue;
            }
            log::debug!("returning unused page {} to index {from}", page.id());
            if self.cache.restore(from, page) {
                self.stats.reuse_count = self.stats.reuse_count.saturating_sub(1);
            }
        }
    }

    /// Page under the viewport when this materialization started.
    pub fn current_page(&self) -> PageIndex {
        self.current
    }

    /// Page bounds new pages are sized to.
    pub fn bounds(&self) -> Size {
        self.bounds
    }

    /// The page currently cached at `index`, if any.
    pub fn cached(&self, index: PageIndex) -> Option<&PageHandle> {
        self.cache.get(index)
    }
}
