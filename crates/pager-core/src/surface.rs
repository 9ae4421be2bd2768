//! Collaborator traits: the host scroll surface, the data source and the
//! optional selection delegate.

use pager_geometry::Size;

use crate::{PageDequeue, PageHandle, PageIndex, PagerError};

/// The scrolling surface hosting the pages.
///
/// The surface owns gesture handling and rendering; the controller only
/// reads its geometry and asks it to attach or detach page views.
pub trait PagerSurface {
    /// Visible bounds. The width is the page width.
    fn viewport(&self) -> Size;

    /// Current horizontal scroll offset.
    fn scroll_offset(&self) -> f32;

    /// Adds a page view to the surface.
    fn attach(&mut self, page: &PageHandle);

    /// Removes a page view from the surface.
    fn detach(&mut self, page: &PageHandle);

    /// Total scrollable size of the page strip.
    fn set_content_size(&mut self, size: Size);

    /// Enables snapping to page boundaries.
    fn set_paging_enabled(&mut self, enabled: bool) {
        let _ = enabled;
    }
}

/// Supplies page count and page content.
///
/// `number_of_pages` is asked again on every reload and scroll event.
pub trait PagerDataSource {
    fn number_of_pages(&self) -> usize;

    /// Returns the page to show at `index`.
    ///
    /// Implementations obtain a recyclable page via
    /// [`PageDequeue::dequeue`], populate it and return it.
    fn page_for_index(
        &self,
        pager: &mut PageDequeue<'_>,
        index: PageIndex,
    ) -> Result<PageHandle, PagerError>;
}

/// Optional user-interaction hooks. Every method has a default, so
/// implementers only provide what they care about.
pub trait PagerDelegate {
    /// Whether the page at `index` may be selected.
    fn should_select_page(&self, index: PageIndex) -> bool {
        let _ = index;
        true
    }

    /// Called after the page at `index` was selected.
    fn did_select_page(&self, index: PageIndex) {
        let _ = index;
    }
}
