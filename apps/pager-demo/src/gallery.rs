//! Demo data source: a photo gallery with a title card in front.

use pager_core::prelude::*;

pub const TITLE_CARD: &str = "title";
pub const PHOTO: &str = "photo";

#[derive(Debug, Default)]
pub struct TitleCard {
    pub title: String,
}

#[derive(Debug, Default)]
pub struct Photo {
    pub caption: String,
    pub shown_at: Option<PageIndex>,
}

pub struct Gallery {
    title: String,
    captions: Vec<String>,
}

impl Gallery {
    pub fn new(title: &str, photo_count: usize) -> Self {
        Self {
            title: title.to_string(),
            captions: (1..=photo_count).map(|n| format!("photo {n}")).collect(),
        }
    }

    /// Registers the page kinds this gallery dequeues.
    pub fn register_kinds(controller: &mut PagingController) {
        controller.register(PageKind::of::<TitleCard>(), TITLE_CARD);
        controller.register(PageKind::of::<Photo>(), PHOTO);
    }
}

impl PagerDataSource for Gallery {
    fn number_of_pages(&self) -> usize {
        self.captions.len() + 1
    }

    fn page_for_index(
        &self,
        pager: &mut PageDequeue<'_>,
        index: PageIndex,
    ) -> Result<PageHandle, PagerError> {
        if index == 0 {
            let page = pager.dequeue(TITLE_CARD, index)?;
            page.with_content_mut(|card: &mut TitleCard| card.title = self.title.clone());
            return Ok(page);
        }

        let caption = self
            .captions
            .get(index - 1)
            .ok_or_else(|| PagerError::data_source(index, "no such photo"))?;
        let page = pager.dequeue(PHOTO, index)?;
        page.with_content_mut(|photo: &mut Photo| {
            photo.caption = caption.clone();
            photo.shown_at = Some(index);
        });
        Ok(page)
    }
}

/// Logs selections and refuses the title card.
pub struct SelectionLogger;

impl PagerDelegate for SelectionLogger {
    fn should_select_page(&self, index: PageIndex) -> bool {
        index != 0
    }

    fn did_select_page(&self, index: PageIndex) {
        log::info!("selected page {index}");
    }
}
