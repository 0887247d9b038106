use log::debug;
use web_sys::{Document, Element, Event, Window};

use crate::config::ElementConfig;
use crate::dom;
use crate::error::Result;
use crate::schedule::Throttle;

const FRAME_MS: f64 = 16.0;
const HERO_RATE: f64 = -0.5;

/// Vertical shift for an element moving at `rate` times the scroll speed.
/// Negative rates move against the scroll direction.
pub fn parallax_offset(scroll_y: f64, rate: f64) -> f64 {
    scroll_y * rate
}

struct Layer {
    element: Element,
    rate: f64,
}

impl Layer {
    fn update(&self, scroll_y: f64) {
        let offset = parallax_offset(scroll_y, self.rate);
        dom::set_style(&self.element, "transform", &format!("translateY({}px)", offset));
    }
}

fn layers(document: &Document) -> Vec<Layer> {
    let mut layers = Vec::new();
    if let Some(hero) = document.query_selector(".hero").ok().flatten() {
        layers.push(Layer { element: hero, rate: HERO_RATE });
    }
    for element in dom::query_all(document, ".parallax") {
        let speed = ElementConfig::read(&element).speed;
        layers.push(Layer { element, rate: -speed });
    }
    let background_defaults = ElementConfig {
        speed: 0.3,
        ..ElementConfig::default()
    };
    for element in dom::query_all(document, ".parallax-bg") {
        let speed = ElementConfig::read_with(&element, background_defaults.clone()).speed;
        layers.push(Layer { element, rate: speed });
    }
    layers
}

pub fn init_parallax(document: &Document, window: &Window) -> Result<()> {
    let layers = layers(document);
    if layers.is_empty() {
        return Ok(());
    }
    debug!("{} parallax layers", layers.len());
    let mut throttle = Throttle::new(FRAME_MS);
    let scroll_window = window.clone();
    dom::listen(window, "scroll", move |e: Event| {
        if !throttle.admit(e.time_stamp()) {
            return;
        }
        let scroll_y = dom::scroll_y(&scroll_window);
        for layer in &layers {
            layer.update(scroll_y);
        }
    })
}

/// Whether a sticky element has reached its pin line.
pub fn is_stuck(top: f64, threshold: f64) -> bool {
    top <= threshold
}

pub fn init_sticky(document: &Document, window: &Window) -> Result<()> {
    let sticky: Vec<(Element, f64)> = dom::query_all(document, ".sticky")
        .into_iter()
        .map(|element| {
            let threshold = ElementConfig::read(&element).threshold;
            (element, threshold)
        })
        .collect();
    if sticky.is_empty() {
        return Ok(());
    }
    dom::listen(window, "scroll", move |_| {
        for (element, threshold) in &sticky {
            let top = element.get_bounding_client_rect().top();
            dom::set_class(element, "stuck", is_stuck(top, *threshold));
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hero_moves_up_at_half_speed() {
        assert_eq!(parallax_offset(200.0, HERO_RATE), -100.0);
    }

    #[test]
    fn backgrounds_move_with_scroll() {
        assert!((parallax_offset(100.0, 0.3) - 30.0).abs() < 1e-9);
        assert_eq!(parallax_offset(0.0, 0.3), 0.0);
    }

    #[test]
    fn sticky_pins_at_threshold() {
        assert!(is_stuck(100.0, 100.0));
        assert!(is_stuck(-20.0, 100.0));
        assert!(!is_stuck(100.5, 100.0));
    }
}
