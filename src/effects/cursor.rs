use std::collections::VecDeque;

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, MouseEvent};

use crate::dom;
use crate::error::{Result, SiteError};

pub const TRAIL_LENGTH: usize = 20;

/// Most recent pointer positions, oldest first.
#[derive(Debug, Clone, Default)]
pub struct CursorTrail {
    points: VecDeque<(i32, i32)>,
}

impl CursorTrail {
    pub fn push(&mut self, point: (i32, i32)) {
        self.points.push_back(point);
        while self.points.len() > TRAIL_LENGTH {
            self.points.pop_front();
        }
    }

    pub fn points(&self) -> impl Iterator<Item = &(i32, i32)> {
        self.points.iter()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.points.len()
    }
}

pub fn dot_opacity(index: usize) -> f64 {
    1.0 - index as f64 / TRAIL_LENGTH as f64
}

fn dot(document: &Document, index: usize) -> Result<Element> {
    let element = document.create_element("div")?;
    element.set_id(&format!("trail-{}", index));
    element.set_attribute(
        "style",
        &format!(
            "position: fixed; width: 4px; height: 4px; background: var(--primary-color); \
             border-radius: 50%; pointer-events: none; z-index: 9998; opacity: {}; \
             transition: transform 0.1s ease;",
            dot_opacity(index)
        ),
    )?;
    document
        .body()
        .ok_or(SiteError::MissingElement("body"))?
        .append_child(&element)?;
    Ok(element)
}

pub fn init_cursor_trail(document: &Document) -> Result<()> {
    let mut trail = CursorTrail::default();
    let mut dots: Vec<Element> = Vec::with_capacity(TRAIL_LENGTH);
    let owner = document.clone();
    dom::listen(document, "mousemove", move |e: Event| {
        let Some(mouse) = e.dyn_ref::<MouseEvent>() else {
            return;
        };
        trail.push((mouse.client_x(), mouse.client_y()));
        for (index, (x, y)) in trail.points().enumerate() {
            if index >= dots.len() {
                match dot(&owner, index) {
                    Ok(element) => dots.push(element),
                    Err(_) => return,
                }
            }
            dom::set_style(&dots[index], "transform", &format!("translate({}px, {}px)", x, y));
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn keeps_only_latest_points() {
        let mut trail = CursorTrail::default();
        for i in 0..25 {
            trail.push((i, i));
        }
        assert_eq!(trail.len(), TRAIL_LENGTH);
        assert_eq!(trail.points().next(), Some(&(5, 5)));
        assert_eq!(trail.points().last(), Some(&(24, 24)));
    }

    #[test]
    fn opacity_fades_along_trail() {
        assert_eq!(dot_opacity(0), 1.0);
        assert_eq!(dot_opacity(10), 0.5);
    }
}
