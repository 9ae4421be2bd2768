//! Scripted data source and recording delegate.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use pager_core::{PageDequeue, PageHandle, PageIndex, PagerDataSource, PagerDelegate, PagerError};

/// Default page body used by [`ScriptedDataSource`].
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TestPage {
    /// Index the page was last populated for.
    pub index: Option<PageIndex>,
    /// How many times the page was populated.
    pub populated: usize,
}

/// A second page body, for tests mixing kinds.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct BannerPage {
    pub index: Option<PageIndex>,
}

type IdentifierFn = Box<dyn Fn(PageIndex) -> String>;

/// Data source that dequeues every page by identifier and records what it
/// was asked for.
pub struct ScriptedDataSource {
    page_count: Cell<usize>,
    identifier_for: IdentifierFn,
    requests: RefCell<Vec<PageIndex>>,
    count_queries: Cell<usize>,
    failing: Cell<Option<PageIndex>>,
}

impl ScriptedDataSource {
    /// Every page uses `identifier`.
    pub fn new(page_count: usize, identifier: &str) -> Rc<Self> {
        let identifier = identifier.to_string();
        Self::with_identifiers(page_count, move |_| identifier.clone())
    }

    /// The identifier of each page is chosen by `identifier_for`.
    pub fn with_identifiers(
        page_count: usize,
        identifier_for: impl Fn(PageIndex) -> String + 'static,
    ) -> Rc<Self> {
        Rc::new(Self {
            page_count: Cell::new(page_count),
            identifier_for: Box::new(identifier_for),
            requests: RefCell::new(Vec::new()),
            count_queries: Cell::new(0),
            failing: Cell::new(None),
        })
    }

    pub fn set_page_count(&self, page_count: usize) {
        self.page_count.set(page_count);
    }

    /// Indices requested so far, in request order.
    pub fn requests(&self) -> Vec<PageIndex> {
        self.requests.borrow().clone()
    }

    pub fn take_requests(&self) -> Vec<PageIndex> {
        std::mem::take(&mut *self.requests.borrow_mut())
    }

    /// Makes the page at `index` fail after it has been dequeued. `None`
    /// clears the failure.
    pub fn fail_at(&self, index: Option<PageIndex>) {
        self.failing.set(index);
    }

    /// How many times the page count was queried.
    pub fn count_queries(&self) -> usize {
        self.count_queries.get()
    }
}

impl PagerDataSource for ScriptedDataSource {
    fn number_of_pages(&self) -> usize {
        self.count_queries.set(self.count_queries.get() + 1);
        self.page_count.get()
    }

    fn page_for_index(
        &self,
        pager: &mut PageDequeue<'_>,
        index: PageIndex,
    ) -> Result<PageHandle, PagerError> {
        self.requests.borrow_mut().push(index);
        let identifier = (self.identifier_for)(index);
        let page = pager.dequeue(&identifier, index)?;
        if self.failing.get() == Some(index) {
            return Err(PagerError::data_source(index, "scripted failure"));
        }
        page.with_content_mut(|body: &mut TestPage| {
            body.index = Some(index);
            body.populated += 1;
        });
        page.with_content_mut(|body: &mut BannerPage| body.index = Some(index));
        Ok(page)
    }
}

/// Delegate that records selections and vetoes according to a predicate.
pub struct RecordingDelegate {
    allow: Box<dyn Fn(PageIndex) -> bool>,
    asked: RefCell<Vec<PageIndex>>,
    selected: RefCell<Vec<PageIndex>>,
}

impl RecordingDelegate {
    pub fn allowing_all() -> Rc<Self> {
        Self::allowing(|_| true)
    }

    pub fn allowing(allow: impl Fn(PageIndex) -> bool + 'static) -> Rc<Self> {
        Rc::new(Self {
            allow: Box::new(allow),
            asked: RefCell::new(Vec::new()),
            selected: RefCell::new(Vec::new()),
        })
    }

    pub fn asked(&self) -> Vec<PageIndex> {
        self.asked.borrow().clone()
    }

    pub fn selected(&self) -> Vec<PageIndex> {
        self.selected.borrow().clone()
    }
}

impl PagerDelegate for RecordingDelegate {
    fn should_select_page(&self, index: PageIndex) -> bool {
        self.asked.borrow_mut().push(index);
        (self.allow)(index)
    }

    fn did_select_page(&self, index: PageIndex) {
        self.selected.borrow_mut().push(index);
    }
}
