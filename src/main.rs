use log::{debug, error, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{Document, ErrorEvent, Event, Window};

mod carousel;
mod config;
mod dom;
mod error;
mod faq;
mod forms;
mod nav;
mod notification;
mod schedule;
mod service_worker;
mod styles;
/// Decorative effects. Nothing else on the page depends on them; any one
/// failing just leaves the page plainer.
mod effects {
    pub mod cursor;
    pub mod hover;
    pub mod page;
    pub mod parallax;
    pub mod particles;
}
mod reveal;

use config::SiteConfig;
use effects::{cursor, hover, page, parallax, particles};
use error::Result;
use reveal::{counter, text};

/// Logs a controller that failed to start. The rest of the page carries on.
fn report(name: &str, result: Result<()>) {
    match result {
        Ok(()) => debug!("{} ready", name),
        Err(err) => error!("{} not initialized: {}", name, err),
    }
}

fn boot(document: Document, window: Window) {
    let config = match SiteConfig::load(&document) {
        Ok(config) => config,
        Err(err) => {
            warn!("falling back to default site config: {}", err);
            SiteConfig::default()
        }
    };

    report("animation styles", styles::inject_animation_styles());

    report("navbar", nav::init_navbar(&document, &window, &config));
    report("mobile menu", nav::init_mobile_menu(&document, &window, &config));
    report("smooth scrolling", nav::init_smooth_scrolling(&document, &window, &config));
    report("back to top", nav::init_back_to_top(&document, &window, &config));
    report("scroll progress", nav::init_scroll_progress(&document, &window));

    let watchers = [
        reveal::init_reveals(&document, &config),
        counter::init_counters(&document, &config),
        page::init_lazy_images(&document),
    ];
    let active = watchers.iter().filter(|w| w.is_active()).count();
    debug!("{} of {} visibility watchers active", active, watchers.len());
    text::init_text_animations(&document);

    report("testimonials", carousel::init_testimonials(&document, &config));
    report("contact form", forms::init_contact_form(&document, &config));
    report("field validation", forms::init_field_validation(&document));
    report("faq", faq::init_faq(&document));

    report("hover effects", hover::init_hover_effects(&document));
    report("parallax", parallax::init_parallax(&document, &window));
    report("sticky", parallax::init_sticky(&document, &window));
    report("particles", particles::init_particles(&document, config.particle_count));
    report("page load", page::init_page_load(&document, &window));
    page::init_loading_screen(&document);
    page::init_progress_bars(&document);
    page::init_spinners(&document);
    report("cursor trail", cursor::init_cursor_trail(&document));

    report(
        "service worker",
        service_worker::register(&window, &config.service_worker_script),
    );
    info!("site scripts ready");
}

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    console_log::init_with_level(config::log_level()).expect("error initializing log");

    info!("Starting application");
    let (window, document) = match (dom::window(), dom::document()) {
        (Ok(window), Ok(document)) => (window, document),
        _ => {
            error!("no browser window, nothing to attach to");
            return;
        }
    };

    report(
        "error logging",
        dom::listen(&window, "error", |e: Event| match e.dyn_ref::<ErrorEvent>() {
            Some(event) => error!("JavaScript error: {} {:?}", event.message(), event.error()),
            None => error!("JavaScript error: {:?}", e),
        }),
    );

    let ready_document = document.clone();
    report(
        "startup",
        dom::on_ready(&document, move || boot(ready_document, window)),
    );
}
