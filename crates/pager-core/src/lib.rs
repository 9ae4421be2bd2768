//! Page lifecycle management for horizontally paged views.
//!
//! A paged view shows one page at a time. Pages are supplied lazily by a
//! [`PagerDataSource`] and recycled instead of re-created while scrolling.
//!
//! # Architecture
//!
//! - [`PageRegistry`] - reuse identifier → [`PageKind`] factory, plus dequeue
//! - [`PageCache`] - page index → [`PageHandle`]
//! - [`WindowPolicy`] - which indices must be resident around the current page
//! - [`PagingController`] - drives the above from host layout and scroll callbacks
//!
//! The host scroll surface is abstracted by [`PagerSurface`]; rendering and
//! gesture handling stay on the host side.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::rc::Rc;
//! use pager_core::{PageDequeue, PageHandle, PageIndex, PageKind, PagerDataSource, PagerError, PagingController};
//!
//! #[derive(Default)]
//! struct Photo { url: String }
//!
//! struct Gallery { urls: Vec<String> }
//!
//! impl PagerDataSource for Gallery {
//!     fn number_of_pages(&self) -> usize {
//!         self.urls.len()
//!     }
//!
//!     fn page_for_index(&self, pager: &mut PageDequeue<'_>, index: PageIndex) -> Result<PageHandle, PagerError> {
//!         let page = pager.dequeue("photo", index)?;
//!         page.with_content_mut(|photo: &mut Photo| photo.url = self.urls[index].clone());
//!         Ok(page)
//!     }
//! }
//!
//! let gallery = Rc::new(Gallery { urls });
//! let mut controller = PagingController::default();
//! controller.register(PageKind::of::<Photo>(), "photo");
//! controller.set_data_source(&gallery);
//! controller.reload(&mut surface)?;
//! // on every scroll offset change:
//! controller.on_scroll(&mut surface)?;
//! ```

pub mod cache;
mod collections;
pub mod config;
pub mod controller;
mod error;
pub mod page;
pub mod registry;
mod stats;
mod surface;
pub mod window;

/// Index of a logical page slot, `0 <= index < page_count`.
pub type PageIndex = usize;

pub use cache::{PageCache, PutOutcome};
pub use config::PagerConfig;
pub use controller::{PagerState, PagingController};
pub use error::PagerError;
pub use page::{PageHandle, PageId, PageKind};
pub use registry::{DequeueOrigin, Dequeued, PageDequeue, PageRegistry};
pub use stats::PagerStats;
pub use surface::{PagerDataSource, PagerDelegate, PagerSurface};
pub use window::{current_page, Window, WindowPolicy};

pub use pager_geometry::{Point, Rect, Size};

pub mod prelude {
    pub use crate::{
        PageDequeue, PageHandle, PageIndex, PageKind, PagerConfig, PagerDataSource,
        PagerDelegate, PagerError, PagerState, PagerSurface, PagingController,
    };
    pub use pager_geometry::prelude::*;
}
