//! Recording host surface.

use pager_core::{PageHandle, PageId, PagerSurface};
use pager_geometry::Size;

/// Something the controller asked the surface to do.
#[derive(Clone, Debug, PartialEq)]
pub enum SurfaceEvent {
    Attach(PageId),
    Detach(PageId),
    ContentSize(Size),
    PagingEnabled(bool),
}

/// In-memory [`PagerSurface`] that records every request.
///
/// The scroll offset and viewport are set directly by the test, standing in
/// for gestures and window resizes.
#[derive(Debug)]
pub struct RecordingSurface {
    viewport: Size,
    offset: f32,
    content_size: Size,
    paging_enabled: bool,
    attached: Vec<PageHandle>,
    events: Vec<SurfaceEvent>,
}

impl RecordingSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            viewport: Size::new(width, height),
            offset: 0.0,
            content_size: Size::ZERO,
            paging_enabled: false,
            attached: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Sets the raw scroll offset.
    pub fn scroll_to(&mut self, offset: f32) {
        self.offset = offset;
    }

    /// Sets the scroll offset to the start of page `index`.
    pub fn scroll_to_page(&mut self, index: usize) {
        self.offset = index as f32 * self.viewport.width;
    }

    pub fn resize(&mut self, size: Size) {
        self.viewport = size;
    }

    pub fn content_size(&self) -> Size {
        self.content_size
    }

    pub fn paging_enabled(&self) -> bool {
        self.paging_enabled
    }

    /// Pages currently attached, in attach order.
    pub fn attached(&self) -> &[PageHandle] {
        &self.attached
    }

    pub fn is_attached(&self, page: &PageHandle) -> bool {
        self.attached.iter().any(|attached| attached.ptr_eq(page))
    }

    pub fn events(&self) -> &[SurfaceEvent] {
        &self.events
    }

    pub fn take_events(&mut self) -> Vec<SurfaceEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn attach_count(&self) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event, SurfaceEvent::Attach(_)))
            .count()
    }

    pub fn detach_count(&self) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event, SurfaceEvent::Detach(_)))
            .count()
    }
}

impl PagerSurface for RecordingSurface {
    fn viewport(&self) -> Size {
        self.viewport
    }

    fn scroll_offset(&self) -> f32 {
        self.offset
    }

    fn attach(&mut self, page: &PageHandle) {
        log::trace!("surface: attach {}", page.id());
        self.events.push(SurfaceEvent::Attach(page.id()));
        self.attached.push(page.clone());
    }

    fn detach(&mut self, page: &PageHandle) {
        log::trace!("surface: detach {}", page.id());
        self.events.push(SurfaceEvent::Detach(page.id()));
        self.attached.retain(|attached| !attached.ptr_eq(page));
    }

    fn set_content_size(&mut self, size: Size) {
        self.events.push(SurfaceEvent::ContentSize(size));
        self.content_size = size;
    }

    fn set_paging_enabled(&mut self, enabled: bool) {
        self.events.push(SurfaceEvent::PagingEnabled(enabled));
        self.paging_enabled = enabled;
    }
}
