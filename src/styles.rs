use log::debug;
use stylist::GlobalStyle;

use crate::error::Result;

/// Rules the scripts rely on but the page stylesheet does not carry:
/// reveal keyframes, ripple, particles, sticky, text reveal, typewriter,
/// page load and hover classes.
pub const ANIMATION_CSS: &str = r#"
@keyframes fadeIn {
    from { opacity: 0; }
    to { opacity: 1; }
}

@keyframes slideInLeft {
    from { opacity: 0; transform: translateX(-50px); }
    to { opacity: 1; transform: translateX(0); }
}

@keyframes slideInRight {
    from { opacity: 0; transform: translateX(50px); }
    to { opacity: 1; transform: translateX(0); }
}

@keyframes slideInUp {
    from { opacity: 0; transform: translateY(50px); }
    to { opacity: 1; transform: translateY(0); }
}

@keyframes slideInDown {
    from { opacity: 0; transform: translateY(-50px); }
    to { opacity: 1; transform: translateY(0); }
}

@keyframes scaleIn {
    from { opacity: 0; transform: scale(0.8); }
    to { opacity: 1; transform: scale(1); }
}

@keyframes bounceIn {
    0% { opacity: 0; transform: scale(0.3); }
    50% { opacity: 1; transform: scale(1.05); }
    70% { transform: scale(0.9); }
    100% { transform: scale(1); }
}

.btn {
    position: relative;
    overflow: hidden;
}

.ripple {
    position: absolute;
    border-radius: 50%;
    background: rgba(255, 255, 255, 0.3);
    transform: scale(0);
    animation: ripple-animation 0.6s linear;
    pointer-events: none;
}

@keyframes ripple-animation {
    to {
        transform: scale(4);
        opacity: 0;
    }
}

.particle {
    animation: float-up linear infinite;
}

@keyframes float-up {
    to {
        transform: translateY(-100vh);
    }
}

.sticky {
    transition: all 0.3s ease;
}

.sticky.stuck {
    position: fixed;
    top: 80px;
    z-index: 100;
}

.text-reveal span {
    display: inline-block;
    opacity: 0;
    transform: translateY(20px);
    animation: text-reveal 0.6s ease-out forwards;
}

@keyframes text-reveal {
    to {
        opacity: 1;
        transform: translateY(0);
    }
}

.typewriter {
    overflow: hidden;
    white-space: nowrap;
}

.page-load-animation {
    opacity: 0;
    transform: translateY(30px);
    transition: all 0.6s ease;
}

.page-load-animation.loaded {
    opacity: 1;
    transform: translateY(0);
}

.service-card.hover-serviceCardHover {
    transform: translateY(-15px) scale(1.05);
    box-shadow: 0 20px 40px rgba(0, 0, 0, 0.2);
}

.team-member.hover-teamMemberHover {
    transform: translateY(-10px);
    box-shadow: 0 15px 30px rgba(0, 0, 0, 0.15);
}

.btn.hover-buttonHover {
    transform: translateY(-2px) scale(1.05);
    box-shadow: 0 8px 25px rgba(0, 0, 0, 0.2);
}
"#;

/// Mounts [`ANIMATION_CSS`] into the document head. The registry keeps it
/// mounted for the rest of the page view.
pub fn inject_animation_styles() -> Result<()> {
    let style = GlobalStyle::new(ANIMATION_CSS)?;
    debug!("animation styles mounted ({} bytes)", style.get_style_str().len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reveal::applier::RevealKind;

    fn declares_keyframes(name: &str) -> bool {
        ANIMATION_CSS.contains(&format!("@keyframes {} ", name))
    }

    #[test]
    fn every_reveal_animation_has_keyframes() {
        let kinds = [
            RevealKind::Fade,
            RevealKind::Scale,
            RevealKind::Bounce,
            RevealKind::Slide("left".to_string()),
            RevealKind::Slide("right".to_string()),
            RevealKind::Slide("up".to_string()),
            RevealKind::Slide("down".to_string()),
        ];
        for kind in kinds {
            let animation = kind.animation().unwrap();
            let name = animation.split_whitespace().next().unwrap();
            assert!(declares_keyframes(name), "missing @keyframes {}", name);
        }
    }

    #[test]
    fn hover_classes_are_styled() {
        for class in ["hover-serviceCardHover", "hover-teamMemberHover", "hover-buttonHover"] {
            assert!(ANIMATION_CSS.contains(class));
        }
    }
}
