use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::{Interval, Timeout};
use log::debug;
use web_sys::{Document, Element};

use crate::dom;
use crate::error::Result;

const GLYPH_STEP_SECS: f64 = 0.05;
const TYPE_STEP_MS: u32 = 100;
const TYPING_START_DELAY_MS: u32 = 1000;
const NBSP: char = '\u{00A0}';

/// One span per char, spaces swapped for NBSP so they keep their width,
/// each with its stagger delay in seconds.
pub fn glyphs(text: &str) -> Vec<(char, f64)> {
    text.chars()
        .enumerate()
        .map(|(index, c)| {
            let shown = if c == ' ' { NBSP } else { c };
            (shown, index as f64 * GLYPH_STEP_SECS)
        })
        .collect()
}

fn split_into_glyphs(document: &Document, element: &Element) -> Result<()> {
    let text = element.text_content().unwrap_or_default();
    element.set_inner_html("");
    for (glyph, delay) in glyphs(&text) {
        let span = document.create_element("span")?;
        span.set_text_content(Some(&glyph.to_string()));
        dom::set_style(&span, "animation-delay", &format!("{}s", delay));
        element.append_child(&span)?;
    }
    Ok(())
}

/// Progressive prefix of a text, one char per `advance`.
#[derive(Debug, Clone)]
pub struct Typewriter {
    chars: Vec<char>,
    shown: usize,
}

impl Typewriter {
    pub fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
            shown: 0,
        }
    }

    /// Reveals one more char and returns the visible prefix.
    pub fn advance(&mut self) -> String {
        self.shown = (self.shown + 1).min(self.chars.len());
        self.visible()
    }

    pub fn visible(&self) -> String {
        self.chars[..self.shown].iter().collect()
    }

    pub fn is_done(&self) -> bool {
        self.shown >= self.chars.len()
    }

    /// Share of the text shown, in percent.
    pub fn percent(&self) -> f64 {
        if self.chars.is_empty() {
            return 100.0;
        }
        self.shown as f64 / self.chars.len() as f64 * 100.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TypingStyle {
    /// `.typewriter`: starts at once, shows a caret while typing.
    Caret,
    /// `.typing-animation`: starts after a pause and grows the element width.
    Width,
}

impl TypingStyle {
    /// Pause before the first char, `None` to start right away.
    pub fn start_delay_ms(self) -> Option<u32> {
        match self {
            TypingStyle::Caret => None,
            TypingStyle::Width => Some(TYPING_START_DELAY_MS),
        }
    }
}

pub fn type_out(element: Element, style: TypingStyle) {
    let text = element.text_content().unwrap_or_default();
    let typewriter = Rc::new(RefCell::new(Typewriter::new(&text)));
    element.set_text_content(Some(""));
    match style {
        TypingStyle::Caret => dom::set_style(&element, "border-right", "2px solid"),
        TypingStyle::Width => dom::set_style(&element, "width", "0"),
    }

    let start = move || {
        let slot: Rc<RefCell<Option<Interval>>> = Rc::new(RefCell::new(None));
        let stop = slot.clone();
        let interval = Interval::new(TYPE_STEP_MS, move || {
            let mut typewriter = typewriter.borrow_mut();
            let visible = typewriter.advance();
            element.set_text_content(Some(&visible));
            if style == TypingStyle::Width {
                dom::set_style(&element, "width", &format!("{}%", typewriter.percent()));
            }
            if typewriter.is_done() {
                if style == TypingStyle::Caret {
                    dom::set_style(&element, "border-right", "none");
                }
                // Dropping the handle clears the interval.
                stop.borrow_mut().take();
            }
        });
        *slot.borrow_mut() = Some(interval);
    };

    match style.start_delay_ms() {
        None => start(),
        Some(delay_ms) => {
            Timeout::new(delay_ms, start).forget();
        }
    }
}

pub fn init_text_animations(document: &Document) {
    let reveals = dom::query_all(document, ".text-reveal");
    for element in &reveals {
        if let Err(err) = split_into_glyphs(document, element) {
            debug!("text reveal skipped: {}", err);
        }
    }
    for element in dom::query_all(document, ".typewriter") {
        type_out(element, TypingStyle::Caret);
    }
    for element in dom::query_all(document, ".typing-animation") {
        type_out(element, TypingStyle::Width);
    }
}
