use crate::domain::{logistics, price_suggestion, search, voice};
use crate::shared::config::PageConfig;

/// Page entry point: set up logging, read the page configuration and wire
/// every feature whose markup is present.
///
/// A feature that fails to wire is logged and skipped; the rest of the page
/// keeps working.
pub fn boot() {
    console_error_panic_hook::set_once();
    // initializes logging using the `log` crate; the page picks the level below
    _ = console_log::init_with_level(log::Level::Trace);

    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        log::error!("no document, page scripts not started");
        return;
    };

    let config = document
        .body()
        .map(|body| PageConfig::from_body(&body))
        .unwrap_or_default();
    log::set_max_level(config.log_level.to_level_filter());
    log::info!("AgriLink {} page scripts starting", config.variant);

    let search = match search::attach(&document, &config.bindings) {
        Ok(search) => search,
        Err(e) => {
            log::error!("search filter not wired: {}", e);
            None
        }
    };

    if let Err(e) = voice::attach(&window, &document, &config, search) {
        log::error!("voice search not wired: {}", e);
    }
    if let Err(e) = price_suggestion::attach(&document, &config) {
        log::error!("price suggestion not wired: {}", e);
    }
    if let Err(e) = logistics::attach(&document, &config) {
        log::error!("logistics dialog not wired: {}", e);
    }
}
