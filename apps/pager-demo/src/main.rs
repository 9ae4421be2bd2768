mod gallery;
mod surface;

use std::rc::Rc;

use anyhow::Context;
use pager_core::prelude::*;

use gallery::{Gallery, Photo, SelectionLogger};
use surface::ConsoleSurface;

const PHOTO_COUNT: usize = 8;

fn init_logging() {
    #[cfg(feature = "logging")]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();
}

fn main() -> anyhow::Result<()> {
    init_logging();

    println!("=== Pager Demo ===");
    println!("Swipes through a {PHOTO_COUNT}-photo gallery and reports page recycling.");
    println!("Set RUST_LOG=debug to see window and reuse decisions.");
    println!();

    let gallery = Rc::new(Gallery::new("Holiday", PHOTO_COUNT));
    let delegate = Rc::new(SelectionLogger);

    let mut controller = PagingController::new(PagerConfig::default());
    Gallery::register_kinds(&mut controller);
    controller.set_data_source(&gallery);
    controller.set_delegate(&delegate);

    let mut surface = ConsoleSurface::new(Size::new(375.0, 667.0));
    let state = controller.reload(&mut surface).context("initial layout")?;
    log::info!("initial state: {state:?}, cached {:?}", controller.cached_indices());

    // Drag forward a quarter page at a time.
    let width = surface.viewport().width;
    let end = width * PHOTO_COUNT as f32;
    let mut offset = 0.0;
    while offset < end {
        offset += width / 4.0;
        surface.scroll_to(offset);
        if let Some(index) = controller.on_scroll(&mut surface).context("scrolling forward")? {
            log::info!(
                "offset {:.0}: materialized page {index}, cached {:?}",
                surface.offset(),
                controller.cached_indices()
            );
        }
    }

    // Jump straight back to the first photo.
    surface.scroll_to(width);
    controller.on_scroll(&mut surface).context("jumping back")?;
    log::info!("after jump: cached {:?}", controller.cached_indices());

    // Rotate the device.
    surface.resize(Size::new(667.0, 375.0));
    surface.scroll_to(667.0);
    controller.reload(&mut surface).context("relayout after resize")?;
    if let Some(page) = controller.page(1) {
        let caption = page.with_content(|photo: &Photo| photo.caption.clone());
        log::info!("page 1 frame {:?}, caption {:?}", page.frame(), caption);
    }

    for index in [0, 1, PHOTO_COUNT + 3] {
        let selected = controller.select_page(index);
        println!("select page {index}: {selected}");
    }

    let stats = controller.stats();
    println!();
    println!("pages created:   {}", stats.pages_created);
    println!("pages recycled:  {}", stats.reuse_count);
    println!("pages cached:    {}", stats.pages_cached);
    println!("attached views:  {}", surface.attached());
    Ok(())
}
