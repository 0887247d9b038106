use gloo_timers::callback::Timeout;
use web_sys::Element;

use crate::config::ElementConfig;
use crate::dom;

pub const REVEAL_SELECTOR: &str =
    ".animate-on-scroll, .fade-in, .slide-in, .scale-in, .bounce-in";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RevealKind {
    Fade,
    Slide(String),
    Scale,
    Bounce,
    /// Only the `animated` class, the stylesheet does the rest.
    Plain,
}

impl RevealKind {
    /// Picks the transition from an element's marker classes; the first
    /// match wins in fade, slide, scale, bounce order.
    pub fn classify<F>(has_class: F, direction: &str) -> Self
    where
        F: Fn(&str) -> bool,
    {
        if has_class("fade-in") {
            RevealKind::Fade
        } else if has_class("slide-in") {
            RevealKind::Slide(direction.to_string())
        } else if has_class("scale-in") {
            RevealKind::Scale
        } else if has_class("bounce-in") {
            RevealKind::Bounce
        } else {
            RevealKind::Plain
        }
    }

    pub fn of(element: &Element, config: &ElementConfig) -> Self {
        let classes = element.class_list();
        Self::classify(|name| classes.contains(name), &config.direction)
    }

    /// Inline `animation` shorthand for this kind, if it has one.
    pub fn animation(&self) -> Option<String> {
        match self {
            RevealKind::Fade => Some("fadeIn 0.8s ease-out forwards".to_string()),
            RevealKind::Slide(direction) => Some(format!(
                "slideIn{} 0.8s ease-out forwards",
                capitalize(direction)
            )),
            RevealKind::Scale => Some("scaleIn 0.6s ease-out forwards".to_string()),
            RevealKind::Bounce => Some("bounceIn 1s ease-out forwards".to_string()),
            RevealKind::Plain => None,
        }
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Marks `element` as animated and starts its transition, after the
/// configured delay if there is one.
pub fn apply(element: Element, kind: RevealKind, config: &ElementConfig) {
    let animation_class = config.animation.clone();
    let reveal = move || {
        dom::add_class(&element, "animated");
        if let Some(class) = animation_class.as_deref() {
            dom::add_class(&element, class);
        }
        if let Some(animation) = kind.animation() {
            dom::set_style(&element, "animation", &animation);
        }
    };
    if config.delay_ms == 0 {
        reveal();
    } else {
        Timeout::new(config.delay_ms, reveal).forget();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn kind_for(classes: &[&str], direction: &str) -> RevealKind {
        RevealKind::classify(|name| classes.contains(&name), direction)
    }

    #[test]
    fn classifies_by_marker_class() {
        assert_eq!(kind_for(&["fade-in"], "left"), RevealKind::Fade);
        assert_eq!(kind_for(&["scale-in"], "left"), RevealKind::Scale);
        assert_eq!(kind_for(&["bounce-in"], "left"), RevealKind::Bounce);
        assert_eq!(kind_for(&["animate-on-scroll"], "left"), RevealKind::Plain);
        assert_eq!(
            kind_for(&["slide-in"], "up"),
            RevealKind::Slide("up".to_string())
        );
    }

    #[test]
    fn fade_wins_over_later_markers() {
        assert_eq!(kind_for(&["scale-in", "fade-in"], "left"), RevealKind::Fade);
    }

    #[test]
    fn slide_animation_name_carries_direction() {
        let kind = RevealKind::Slide("right".to_string());
        assert_eq!(
            kind.animation().as_deref(),
            Some("slideInRight 0.8s ease-out forwards")
        );
        assert_eq!(
            RevealKind::Slide("left".to_string()).animation().as_deref(),
            Some("slideInLeft 0.8s ease-out forwards")
        );
    }

    #[test]
    fn plain_has_no_inline_animation() {
        assert_eq!(RevealKind::Plain.animation(), None);
    }
}
