use std::cell::Cell;
use std::rc::Rc;

use log::debug;
use web_sys::{Document, Element, HtmlElement};
use wasm_bindgen::JsCast;

use crate::dom;
use crate::error::Result;

/// Which FAQ item is open, if any. At most one at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Accordion {
    open: Option<usize>,
}

impl Accordion {
    pub fn open(&self) -> Option<usize> {
        self.open
    }

    pub fn is_open(&self, index: usize) -> bool {
        self.open == Some(index)
    }

    /// Opens `index`, closing whatever else was open; clicking the open
    /// item closes it.
    pub fn toggle(&mut self, index: usize) {
        self.open = if self.is_open(index) { None } else { Some(index) };
    }
}

struct FaqItem {
    item: Element,
    answer: Element,
    icon: Option<Element>,
}

impl FaqItem {
    fn render(&self, open: bool) {
        dom::set_class(&self.item, "active", open);
        let height = if open {
            let full = self
                .answer
                .dyn_ref::<HtmlElement>()
                .map(|a| a.scroll_height())
                .unwrap_or(0);
            format!("{}px", full)
        } else {
            "0px".to_string()
        };
        dom::set_style(&self.answer, "max-height", &height);
        if let Some(icon) = &self.icon {
            let angle = if open { "rotate(180deg)" } else { "rotate(0deg)" };
            dom::set_style(icon, "transform", angle);
        }
    }
}

pub fn init_faq(document: &Document) -> Result<()> {
    let mut items = Vec::new();
    let mut questions = Vec::new();
    for item in dom::query_all(document, ".faq-item") {
        let (Some(question), Some(answer)) = (
            dom::query_in(&item, ".faq-question"),
            dom::query_in(&item, ".faq-answer"),
        ) else {
            continue;
        };
        let icon = dom::query_in(&item, ".faq-question i");
        questions.push(question);
        items.push(FaqItem { item, answer, icon });
    }
    if items.is_empty() {
        return Ok(());
    }
    debug!("faq with {} items", items.len());

    let items = Rc::new(items);
    let state = Rc::new(Cell::new(Accordion::default()));
    for (index, question) in questions.iter().enumerate() {
        let items = items.clone();
        let state = state.clone();
        dom::listen(question, "click", move |_| {
            let mut accordion = state.get();
            accordion.toggle(index);
            state.set(accordion);
            for (i, item) in items.iter().enumerate() {
                item.render(accordion.is_open(i));
            }
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_closed() {
        assert_eq!(Accordion::default().open(), None);
    }

    #[test]
    fn opening_one_closes_the_other() {
        let mut accordion = Accordion::default();
        accordion.toggle(0);
        accordion.toggle(2);
        assert!(!accordion.is_open(0));
        assert!(accordion.is_open(2));
    }

    #[test]
    fn toggling_open_item_closes_it() {
        let mut accordion = Accordion::default();
        accordion.toggle(1);
        accordion.toggle(1);
        assert_eq!(accordion.open(), None);
    }
}
