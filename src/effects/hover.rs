use gloo_timers::callback::Timeout;
use log::debug;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, MouseEvent};

use crate::dom;
use crate::error::Result;

const RIPPLE_MS: u32 = 600;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverEffect {
    ServiceCard,
    TeamMember,
    Button,
}

impl HoverEffect {
    pub const ALL: [HoverEffect; 3] = [
        HoverEffect::ServiceCard,
        HoverEffect::TeamMember,
        HoverEffect::Button,
    ];

    pub fn selector(self) -> &'static str {
        match self {
            HoverEffect::ServiceCard => ".service-card",
            HoverEffect::TeamMember => ".team-member",
            HoverEffect::Button => ".btn",
        }
    }

    pub fn class(self) -> &'static str {
        match self {
            HoverEffect::ServiceCard => "hover-serviceCardHover",
            HoverEffect::TeamMember => "hover-teamMemberHover",
            HoverEffect::Button => "hover-buttonHover",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ripple {
    pub size: f64,
    pub left: f64,
    pub top: f64,
}

/// A circle as large as the button's longer side, centred on the pointer.
/// `rect` is `(left, top, width, height)` in client coordinates.
pub fn ripple_at(rect: (f64, f64, f64, f64), client_x: f64, client_y: f64) -> Ripple {
    let (left, top, width, height) = rect;
    let size = width.max(height);
    Ripple {
        size,
        left: client_x - left - size / 2.0,
        top: client_y - top - size / 2.0,
    }
}

fn spawn_ripple(document: &Document, button: &Element, event: &MouseEvent) -> Result<()> {
    let rect = button.get_bounding_client_rect();
    let ripple = ripple_at(
        (rect.left(), rect.top(), rect.width(), rect.height()),
        event.client_x() as f64,
        event.client_y() as f64,
    );
    let span = document.create_element("span")?;
    span.set_class_name("ripple");
    dom::set_style(&span, "width", &format!("{}px", ripple.size));
    dom::set_style(&span, "height", &format!("{}px", ripple.size));
    dom::set_style(&span, "left", &format!("{}px", ripple.left));
    dom::set_style(&span, "top", &format!("{}px", ripple.top));
    button.append_child(&span)?;
    Timeout::new(RIPPLE_MS, move || span.remove()).forget();
    Ok(())
}

fn set_social_visible(member: &Element, visible: bool) {
    if let Some(social) = dom::query_in(member, ".member-social") {
        let (opacity, offset) = if visible {
            ("1", "translateY(0)")
        } else {
            ("0", "translateY(-10px)")
        };
        dom::set_style(&social, "opacity", opacity);
        dom::set_style(&social, "transform", offset);
    }
}

fn bind(document: &Document, element: &Element, effect: HoverEffect) -> Result<()> {
    {
        let document = document.clone();
        let target = element.clone();
        dom::listen(element, "mouseenter", move |e: Event| {
            dom::add_class(&target, effect.class());
            match effect {
                HoverEffect::TeamMember => set_social_visible(&target, true),
                HoverEffect::Button => {
                    if let Some(mouse) = e.dyn_ref::<MouseEvent>() {
                        if let Err(err) = spawn_ripple(&document, &target, mouse) {
                            debug!("ripple skipped: {}", err);
                        }
                    }
                }
                HoverEffect::ServiceCard => {}
            }
        })?;
    }
    let target = element.clone();
    dom::listen(element, "mouseleave", move |_| {
        dom::remove_class(&target, effect.class());
        if effect == HoverEffect::TeamMember {
            set_social_visible(&target, false);
        }
    })
}

pub fn init_hover_effects(document: &Document) -> Result<()> {
    for effect in HoverEffect::ALL {
        for element in dom::query_all(document, effect.selector()) {
            bind(document, &element, effect)?;
        }
    }

    for card in dom::query_all(document, ".card-hover") {
        let target = card.clone();
        dom::listen(&card, "mouseenter", move |_| {
            dom::set_style(&target, "transform", "translateY(-10px) scale(1.02)");
        })?;
        let target = card.clone();
        dom::listen(&card, "mouseleave", move |_| {
            dom::set_style(&target, "transform", "translateY(0) scale(1)");
        })?;
    }

    for button in dom::query_all(document, ".btn-hover") {
        let target = button.clone();
        dom::listen(&button, "mouseenter", move |_| dom::add_class(&target, "shimmer"))?;
        let target = button.clone();
        dom::listen(&button, "mouseleave", move |_| dom::remove_class(&target, "shimmer"))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn ripple_is_centred_on_pointer() {
        let ripple = ripple_at((100.0, 50.0, 120.0, 40.0), 160.0, 70.0);
        assert_eq!(
            ripple,
            Ripple {
                size: 120.0,
                left: 0.0,
                top: -40.0,
            }
        );
    }

    #[test]
    fn ripple_uses_longer_side() {
        assert_eq!(ripple_at((0.0, 0.0, 30.0, 80.0), 0.0, 0.0).size, 80.0);
    }

    #[test]
    fn each_effect_has_its_own_class() {
        let classes: Vec<_> = HoverEffect::ALL.iter().map(|e| e.class()).collect();
        assert_eq!(
            classes,
            vec!["hover-serviceCardHover", "hover-teamMemberHover", "hover-buttonHover"]
        );
    }
}
