//! A console stand-in for the host scroll view.

use pager_core::prelude::*;

pub struct ConsoleSurface {
    viewport: Size,
    offset: f32,
    content_size: Size,
    attached: usize,
}

impl ConsoleSurface {
    pub fn new(viewport: Size) -> Self {
        Self {
            viewport,
            offset: 0.0,
            content_size: Size::ZERO,
            attached: 0,
        }
    }

    /// Moves the offset, clamped to the scrollable range like a real scroll
    /// view would.
    pub fn scroll_to(&mut self, offset: f32) {
        let max = (self.content_size.width - self.viewport.width).max(0.0);
        self.offset = offset.clamp(0.0, max);
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn resize(&mut self, viewport: Size) {
        log::info!("viewport resized to {}x{}", viewport.width, viewport.height);
        self.viewport = viewport;
    }

    pub fn attached(&self) -> usize {
        self.attached
    }
}

impl PagerSurface for ConsoleSurface {
    fn viewport(&self) -> Size {
        self.viewport
    }

    fn scroll_offset(&self) -> f32 {
        self.offset
    }

    fn attach(&mut self, page: &PageHandle) {
        self.attached += 1;
        log::info!("attach {} ({})", page.id(), page.kind_name());
    }

    fn detach(&mut self, page: &PageHandle) {
        self.attached = self.attached.saturating_sub(1);
        log::info!("detach {}", page.id());
    }

    fn set_content_size(&mut self, size: Size) {
        self.content_size = size;
    }

    fn set_paging_enabled(&mut self, enabled: bool) {
        log::debug!("paging enabled: {enabled}");
    }
}
