//! Window policy: which page indices must be resident, and how a scroll
//! event advances the window.

use smallvec::SmallVec;

use crate::config::DEFAULT_WINDOW_RADIUS;
use crate::PageIndex;

/// Inline capacity for a window. The default radius of 1 gives at most 3
/// indices; wider radii spill to the heap.
pub type WindowVec = SmallVec<[PageIndex; 3]>;

/// The set of page indices that must be materialized, in ascending order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Window {
    indices: WindowVec,
}

impl Window {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn indices(&self) -> &[PageIndex] {
        &self.indices
    }

    pub fn contains(&self, index: PageIndex) -> bool {
        self.indices.contains(&index)
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = PageIndex> + '_ {
        self.indices.iter().copied()
    }
}

/// Decides which pages are resident around the current page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WindowPolicy {
    radius: usize,
}

impl Default for WindowPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_RADIUS)
    }
}

impl WindowPolicy {
    pub fn new(radius: usize) -> Self {
        Self { radius }
    }

    pub fn radius(&self) -> usize {
        self.radius
    }

    /// Indices within `radius` of `current`, clamped to `[0, page_count)`.
    ///
    /// A `current` past the last page is treated as the last page.
    pub fn required_indices(&self, current: PageIndex, page_count: usize) -> Window {
        if page_count == 0 {
            return Window::empty();
        }
        let current = current.min(page_count - 1);
        let start = current.saturating_sub(self.radius);
        let end = current.saturating_add(self.radius).min(page_count - 1);
        Window {
            indices: (start..=end).collect(),
        }
    }

    /// Whether a cached page at `index` lies outside the live window and may
    /// be recycled.
    pub fn is_reusable(&self, index: PageIndex, current: PageIndex) -> bool {
        index.abs_diff(current) > self.radius
    }

    /// The index a scroll event exposes at the leading edge of the window.
    ///
    /// `target` is the scroll offset in page widths. It is clamped to
    /// `[0, page_count]` and floored; a target at or past `current` moves
    /// forward, anything else moves back. With the default radius this is
    /// the adjacent page. Only one step is taken per event, so a scroll that
    /// skips pages under-fetches until the window is repopulated. Returns
    /// `None` when the step would leave `[0, page_count)`.
    pub fn advance_step(
        &self,
        current: PageIndex,
        target: f32,
        page_count: usize,
    ) -> Option<PageIndex> {
        if page_count == 0 || !target.is_finite() {
            return None;
        }
        let clamped = target.clamp(0.0, page_count as f32).floor() as usize;
        let next = if clamped >= current {
            current.checked_add(self.radius)?
        } else {
            current.checked_sub(self.radius)?
        };
        (next < page_count).then_some(next)
    }
}

/// Page under the viewport: `round(offset / page_width)`, clamped to the
/// valid range. Degenerate widths resolve to the first page.
pub fn current_page(offset: f32, page_width: f32, page_count: usize) -> PageIndex {
    if page_count == 0 || !page_width.is_finite() || page_width <= 0.0 || !offset.is_finite() {
        return 0;
    }
    let page = (offset / page_width).round();
    if page <= 0.0 {
        0
    } else {
        (page as usize).min(page_count - 1)
    }
}
