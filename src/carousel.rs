use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Interval;
use log::{debug, info};
use web_sys::{Document, Element};

use crate::config::SiteConfig;
use crate::dom;
use crate::error::Result;

/// Rotating index over a fixed, non-empty sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Carousel {
    index: usize,
    len: usize,
}

impl Carousel {
    /// `None` for an empty sequence, there is nothing to rotate.
    pub fn new(len: usize) -> Option<Self> {
        (len > 0).then_some(Self { index: 0, len })
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn next(&mut self) -> usize {
        self.index = (self.index + 1) % self.len;
        self.index
    }

    pub fn prev(&mut self) -> usize {
        self.index = (self.index + self.len - 1) % self.len;
        self.index
    }

    /// Jumps to `k`. Out-of-range values are refused and leave the index
    /// where it was.
    pub fn go_to(&mut self, k: usize) -> bool {
        if k >= self.len {
            return false;
        }
        self.index = k;
        true
    }
}

/// Testimonial slider: items, their dots and the shared index.
struct Slider {
    state: Carousel,
    items: Vec<Element>,
    dots: Vec<Element>,
}

impl Slider {
    /// Clears every active flag, then sets exactly one item and one dot.
    fn show(&self) {
        for element in self.items.iter().chain(self.dots.iter()) {
            dom::remove_class(element, "active");
        }
        let index = self.state.index();
        if let Some(item) = self.items.get(index) {
            dom::add_class(item, "active");
        }
        if let Some(dot) = self.dots.get(index) {
            dom::add_class(dot, "active");
        }
    }
}

type SharedSlider = Rc<RefCell<Slider>>;

fn shift(slider: &SharedSlider, step: fn(&mut Carousel) -> usize) {
    let mut slider = slider.borrow_mut();
    step(&mut slider.state);
    slider.show();
}

pub fn init_testimonials(document: &Document, config: &SiteConfig) -> Result<()> {
    let items = dom::query_all(document, ".testimonial");
    let (Ok(prev_btn), Ok(next_btn), Ok(dots_container)) = (
        dom::by_id(document, "prev-btn"),
        dom::by_id(document, "next-btn"),
        dom::by_id(document, "testimonial-dots"),
    ) else {
        debug!("no testimonial slider on this page");
        return Ok(());
    };
    let Some(state) = Carousel::new(items.len()) else {
        debug!("testimonial slider has no items");
        return Ok(());
    };

    let mut dots = Vec::with_capacity(items.len());
    for _ in 0..items.len() {
        let dot = document.create_element("div")?;
        dom::add_class(&dot, "dot");
        dots_container.append_child(&dot)?;
        dots.push(dot);
    }

    let slider: SharedSlider = Rc::new(RefCell::new(Slider { state, items, dots }));
    slider.borrow().show();

    let dots = slider.borrow().dots.clone();
    for (index, dot) in dots.iter().enumerate() {
        let slider = slider.clone();
        dom::listen(dot, "click", move |_| {
            let mut slider = slider.borrow_mut();
            if slider.state.go_to(index) {
                slider.show();
            }
        })?;
    }

    {
        let slider = slider.clone();
        dom::listen(&next_btn, "click", move |_| shift(&slider, Carousel::next))?;
    }
    {
        let slider = slider.clone();
        dom::listen(&prev_btn, "click", move |_| shift(&slider, Carousel::prev))?;
    }

    let count = slider.borrow().state.len();
    // Auto-advance runs for as long as the page is open.
    Interval::new(config.carousel_interval_ms, move || shift(&slider, Carousel::next)).forget();
    info!("testimonial slider ready with {} items", count);
    Ok(())
}
