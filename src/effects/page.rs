use std::cell::RefCell;
use std::rc::Rc;

use gloo_render::{request_animation_frame, AnimationFrame};
use gloo_timers::callback::Timeout;
use log::debug;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlImageElement, Window};

use crate::config::ElementConfig;
use crate::dom;
use crate::error::Result;
use crate::reveal::watcher::{VisibilityWatcher, WatchOptions};

const PAGE_LOAD_STAGGER_MS: u32 = 200;
const LOADING_SCREEN_HOLD_MS: u32 = 1000;
const LOADING_SCREEN_FADE_MS: u32 = 500;
const SPINNER_STEP_DEG: u32 = 10;

/// Images carrying `data-src` get their real source once they scroll into
/// view.
pub fn init_lazy_images(document: &Document) -> VisibilityWatcher {
    let images = dom::query_all(document, "img[data-src]");
    let options = WatchOptions {
        threshold: 0.0,
        margin_bottom_px: 0,
    };
    VisibilityWatcher::observe(images, options, |visible| {
        for element in visible {
            let Some(src) = element.get_attribute("data-src") else {
                continue;
            };
            if let Some(image) = element.dyn_ref::<HtmlImageElement>() {
                image.set_src(&src);
            }
            dom::remove_class(&element, "lazy");
            dom::add_class(&element, "fade-in");
        }
    })
}

pub fn stagger_delay(index: usize) -> u32 {
    index as u32 * PAGE_LOAD_STAGGER_MS
}

/// Fades in `.page-load-animation` blocks one after another once the
/// window has loaded.
pub fn init_page_load(document: &Document, window: &Window) -> Result<()> {
    let blocks = dom::query_all(document, ".page-load-animation");
    if blocks.is_empty() {
        return Ok(());
    }
    dom::on_load(window, move || {
        for (index, block) in blocks.into_iter().enumerate() {
            Timeout::new(stagger_delay(index), move || dom::add_class(&block, "loaded")).forget();
        }
    })
}

pub fn init_loading_screen(document: &Document) {
    let Some(screen) = document.query_selector(".loading-screen").ok().flatten() else {
        return;
    };
    Timeout::new(LOADING_SCREEN_HOLD_MS, move || {
        dom::set_style(&screen, "opacity", "0");
        Timeout::new(LOADING_SCREEN_FADE_MS, move || {
            dom::set_style(&screen, "display", "none");
        })
        .forget();
    })
    .forget();
}

pub fn init_progress_bars(document: &Document) {
    for bar in dom::query_all(document, ".progress-bar") {
        if let Some(fill) = dom::query_in(&bar, ".progress-fill") {
            let percentage = ElementConfig::read(&fill).percentage;
            dom::set_style(&fill, "width", &format!("{}%", percentage));
        }
    }
}

pub fn next_angle(angle: u32) -> u32 {
    (angle + SPINNER_STEP_DEG) % 360
}

type FrameSlot = Rc<RefCell<Option<AnimationFrame>>>;

fn spin(spinner: Element, angle: u32, slot: FrameSlot) {
    let next_slot = slot.clone();
    let handle = request_animation_frame(move |_| {
        let angle = next_angle(angle);
        dom::set_style(&spinner, "transform", &format!("rotate({}deg)", angle));
        spin(spinner, angle, next_slot);
    });
    *slot.borrow_mut() = Some(handle);
}

pub fn init_spinners(document: &Document) {
    let spinners = dom::query_all(document, ".loading-spinner");
    debug!("{} spinners", spinners.len());
    for spinner in spinners {
        spin(spinner, 0, Rc::new(RefCell::new(None)));
    }
}
