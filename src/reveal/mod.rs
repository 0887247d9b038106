//! Scroll-triggered, one-shot presentation transitions.
//!
//! Every scroll-driven reveal on the site goes through one
//! [`watcher::VisibilityWatcher`], parameterized per use: plain reveals,
//! stat counters and lazy images each get their own instance.

pub mod applier;
pub mod counter;
pub mod text;
pub mod watcher;

use log::debug;
use web_sys::Document;

use crate::config::{ElementConfig, SiteConfig};
use crate::dom;
use applier::{RevealKind, REVEAL_SELECTOR};
use watcher::{VisibilityWatcher, WatchOptions};

pub fn init_reveals(document: &Document, config: &SiteConfig) -> VisibilityWatcher {
    let targets = dom::query_all(document, REVEAL_SELECTOR);
    debug!("found {} reveal targets", targets.len());
    let options = WatchOptions {
        threshold: config.reveal_threshold,
        margin_bottom_px: config.reveal_margin_bottom_px,
    };
    VisibilityWatcher::observe(targets, options, |visible| {
        for element in visible {
            let element_config = ElementConfig::read(&element);
            let kind = RevealKind::of(&element, &element_config);
            applier::apply(element, kind, &element_config);
        }
    })
}
