use log::debug;
use web_sys::js_sys::Math;
use web_sys::Document;

use crate::error::Result;

const PARTICLE_SIZE_PX: u32 = 3;
const PARTICLE_COLOR: &str = "rgba(255, 255, 255, 0.3)";

/// Placement and timing of one decorative dot.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub left_pct: f64,
    pub top_pct: f64,
    pub opacity: f64,
    pub duration_s: f64,
    pub delay_s: f64,
}

impl Particle {
    /// Draws a particle from `random`, which must yield values in `[0, 1)`.
    pub fn scatter<R: FnMut() -> f64>(random: &mut R) -> Self {
        Self {
            left_pct: random() * 100.0,
            top_pct: random() * 100.0,
            opacity: random() * 0.5 + 0.2,
            duration_s: random() * 3.0 + 2.0,
            delay_s: random() * 6.0,
        }
    }

    fn css(&self) -> String {
        format!(
            "position: absolute; width: {size}px; height: {size}px; background: {color}; \
             border-radius: 50%; pointer-events: none; left: {:.2}%; top: {:.2}%; \
             opacity: {:.2}; animation-duration: {:.2}s; animation-delay: {:.2}s;",
            self.left_pct,
            self.top_pct,
            self.opacity,
            self.duration_s,
            self.delay_s,
            size = PARTICLE_SIZE_PX,
            color = PARTICLE_COLOR,
        )
    }
}

pub fn init_particles(document: &Document, count: usize) -> Result<()> {
    let Some(hero) = document.query_selector(".hero").ok().flatten() else {
        return Ok(());
    };
    let container = document.create_element("div")?;
    container.set_class_name("particles");
    hero.append_child(&container)?;

    let mut random = Math::random;
    for _ in 0..count {
        let particle = document.create_element("div")?;
        particle.set_class_name("particle");
        particle.set_attribute("style", &Particle::scatter(&mut random).css())?;
        container.append_child(&particle)?;
    }
    debug!("scattered {} particles over the hero", count);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scatter_stays_in_ranges() {
        let mut seq = [0.0, 0.999, 0.5, 0.25, 0.75].into_iter().cycle();
        let mut random = move || seq.next().unwrap_or(0.0);
        let particle = Particle::scatter(&mut random);
        assert_eq!(particle.left_pct, 0.0);
        assert!(particle.top_pct < 100.0);
        assert!((particle.opacity - 0.45).abs() < 1e-9);
        assert_eq!(particle.duration_s, 2.75);
        assert_eq!(particle.delay_s, 4.5);
    }

    #[test]
    fn css_positions_by_percentage() {
        let particle = Particle {
            left_pct: 12.5,
            top_pct: 80.0,
            opacity: 0.3,
            duration_s: 4.0,
            delay_s: 1.0,
        };
        let css = particle.css();
        assert!(css.contains("left: 12.50%"));
        assert!(css.contains("top: 80.00%"));
        assert!(css.contains("width: 3px"));
    }
}
