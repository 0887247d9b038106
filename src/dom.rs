use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::Reflect;
use web_sys::{
    AddEventListenerOptions, Document, Element, Event, EventTarget, HtmlElement, Window,
};

use crate::error::{Result, SiteError};

pub fn window() -> Result<Window> {
    web_sys::window().ok_or(SiteError::MissingElement("window"))
}

pub fn document() -> Result<Document> {
    window()?
        .document()
        .ok_or(SiteError::MissingElement("document"))
}

pub fn by_id(document: &Document, id: &'static str) -> Result<Element> {
    document
        .get_element_by_id(id)
        .ok_or(SiteError::MissingElement(id))
}

pub fn query_all(document: &Document, selector: &str) -> Vec<Element> {
    match document.query_selector_all(selector) {
        Ok(list) => (0..list.length())
            .filter_map(|i| list.get(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect(),
        Err(_) => Vec::new(),
    }
}

pub fn query_in(root: &Element, selector: &str) -> Option<Element> {
    root.query_selector(selector).ok().flatten()
}

/// Attaches `handler` for the lifetime of the page.
pub fn listen<F>(target: &EventTarget, event: &str, handler: F) -> Result<()>
where
    F: FnMut(Event) + 'static,
{
    let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
    callback.forget();
    Ok(())
}

/// Like [`listen`] but registered non-passive so the handler may call
/// `prevent_default` on touch events.
pub fn listen_active<F>(target: &EventTarget, event: &str, handler: F) -> Result<()>
where
    F: FnMut(Event) + 'static,
{
    let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    let options = AddEventListenerOptions::new();
    options.set_passive(false);
    target.add_event_listener_with_callback_and_add_event_listener_options(
        event,
        callback.as_ref().unchecked_ref(),
        &options,
    )?;
    callback.forget();
    Ok(())
}

/// `document.readyState` values past DOM parsing.
pub fn is_parsed(ready_state: &str) -> bool {
    ready_state != "loading"
}

/// `document.readyState` once the window `load` event has fired.
pub fn is_loaded(ready_state: &str) -> bool {
    ready_state == "complete"
}

/// Runs `init` now if `done`, otherwise once on `event`.
fn once_or_now<F>(done: bool, target: &EventTarget, event: &str, init: F) -> Result<()>
where
    F: FnOnce() + 'static,
{
    if done {
        init();
        return Ok(());
    }
    let mut init = Some(init);
    listen(target, event, move |_| {
        if let Some(init) = init.take() {
            init();
        }
    })
}

/// Runs `init` once the DOM is parsed.
pub fn on_ready<F>(document: &Document, init: F) -> Result<()>
where
    F: FnOnce() + 'static,
{
    once_or_now(is_parsed(&document.ready_state()), document, "DOMContentLoaded", init)
}

/// Runs `init` once the window has loaded. wasm usually boots after `load`
/// has already fired, in which case `init` runs right away.
pub fn on_load<F>(window: &Window, init: F) -> Result<()>
where
    F: FnOnce() + 'static,
{
    let document = window.document().ok_or(SiteError::MissingElement("document"))?;
    once_or_now(is_loaded(&document.ready_state()), window, "load", init)
}

pub fn has_property(target: &JsValue, name: &str) -> bool {
    Reflect::has(target, &JsValue::from_str(name)).unwrap_or(false)
}

pub fn set_style(element: &Element, property: &str, value: &str) {
    if let Some(html) = element.dyn_ref::<HtmlElement>() {
        let _ = html.style().set_property(property, value);
    }
}

pub fn add_class(element: &Element, class: &str) {
    let _ = element.class_list().add_1(class);
}

pub fn remove_class(element: &Element, class: &str) {
    let _ = element.class_list().remove_1(class);
}

pub fn set_class(element: &Element, class: &str, on: bool) {
    let _ = element.class_list().toggle_with_force(class, on);
}

pub fn scroll_y(window: &Window) -> f64 {
    window.scroll_y().unwrap_or(0.0)
}

pub fn inner_width(window: &Window) -> f64 {
    window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0)
}

pub fn inner_height(window: &Window) -> f64 {
    window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parsed_covers_interactive_and_complete() {
        assert!(!is_parsed("loading"));
        assert!(is_parsed("interactive"));
        assert!(is_parsed("complete"));
    }

    #[test]
    fn loaded_only_when_complete() {
        assert!(!is_loaded("loading"));
        assert!(!is_loaded("interactive"));
        assert!(is_loaded("complete"));
    }
}
