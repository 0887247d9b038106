use std::cell::Cell;
use std::rc::Rc;

use log::{debug, info};
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, Event, HtmlElement, KeyboardEvent, Node, ScrollBehavior, ScrollToOptions,
    Window,
};

use crate::config::SiteConfig;
use crate::dom;
use crate::error::{Result, SiteError};
use crate::schedule::Debounce;

const RESIZE_DEBOUNCE_MS: u32 = 150;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuState {
    #[default]
    Closed,
    Open,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MenuEvent {
    Toggle,
    LinkClicked,
    OutsideClick,
    Resized { width: f64, breakpoint: f64 },
}

impl MenuState {
    pub fn is_open(self) -> bool {
        self == MenuState::Open
    }

    pub fn apply(self, event: MenuEvent) -> MenuState {
        match event {
            MenuEvent::Toggle => match self {
                MenuState::Open => MenuState::Closed,
                MenuState::Closed => MenuState::Open,
            },
            MenuEvent::LinkClicked | MenuEvent::OutsideClick => MenuState::Closed,
            MenuEvent::Resized { width, breakpoint } if width > breakpoint => MenuState::Closed,
            MenuEvent::Resized { .. } => self,
        }
    }
}

struct MobileMenu {
    toggle: Element,
    menu: Element,
    body: Option<HtmlElement>,
    state: Cell<MenuState>,
}

impl MobileMenu {
    fn dispatch(&self, event: MenuEvent) {
        let next = self.state.get().apply(event);
        if next != self.state.get() {
            debug!("mobile menu {:?} -> {:?} on {:?}", self.state.get(), next, event);
        }
        self.state.set(next);
        self.render(next);
    }

    fn render(&self, state: MenuState) {
        let open = state.is_open();
        dom::set_class(&self.toggle, "active", open);
        dom::set_class(&self.menu, "active", open);
        if let Some(body) = &self.body {
            dom::set_class(body, "menu-open", open);
        }
        let _ = self
            .toggle
            .set_attribute("aria-expanded", if open { "true" } else { "false" });
    }

    fn contains(&self, event: &Event) -> bool {
        let Some(node) = event.target().and_then(|t| t.dyn_into::<Node>().ok()) else {
            return false;
        };
        self.toggle.contains(Some(&node)) || self.menu.contains(Some(&node))
    }
}

pub fn init_mobile_menu(document: &Document, window: &Window, config: &SiteConfig) -> Result<()> {
    let toggle = dom::by_id(document, "nav-toggle")?;
    let menu = dom::by_id(document, "nav-menu")?;
    let links = dom::query_all(document, ".nav-link");
    debug!("mobile menu found with {} links", links.len());

    toggle.set_attribute("role", "button")?;
    toggle.set_attribute("tabindex", "0")?;
    toggle.set_attribute("aria-controls", "nav-menu")?;
    toggle.set_attribute("aria-expanded", "false")?;
    menu.set_attribute("role", "menu")?;

    let controller = Rc::new(MobileMenu {
        toggle: toggle.clone(),
        menu,
        body: document.body(),
        state: Cell::new(MenuState::Closed),
    });

    for event in ["click", "touchstart"] {
        let controller = controller.clone();
        dom::listen_active(&toggle, event, move |e: Event| {
            e.prevent_default();
            e.stop_propagation();
            controller.dispatch(MenuEvent::Toggle);
        })?;
    }
    {
        let controller = controller.clone();
        dom::listen(&toggle, "keydown", move |e: Event| {
            let Some(key) = e.dyn_ref::<KeyboardEvent>().map(|k| k.key()) else {
                return;
            };
            if key == "Enter" || key == " " {
                e.prevent_default();
                e.stop_propagation();
                controller.dispatch(MenuEvent::Toggle);
            }
        })?;
    }

    for link in &links {
        let controller = controller.clone();
        dom::listen(link, "click", move |_| controller.dispatch(MenuEvent::LinkClicked))?;
    }

    for event in ["click", "touchstart"] {
        let controller = controller.clone();
        dom::listen_active(document, event, move |e: Event| {
            if controller.state.get().is_open() && !controller.contains(&e) {
                controller.dispatch(MenuEvent::OutsideClick);
            }
        })?;
    }

    let debounce = Debounce::new(RESIZE_DEBOUNCE_MS);
    let breakpoint = config.nav_breakpoint_px;
    let resize_window = window.clone();
    dom::listen(window, "resize", move |_| {
        let controller = controller.clone();
        let window = resize_window.clone();
        debounce.schedule(move || {
            let width = dom::inner_width(&window);
            controller.dispatch(MenuEvent::Resized { width, breakpoint });
        });
    })?;

    info!("mobile menu ready");
    Ok(())
}

/// File name of the current page, `index.html` for the site root.
pub fn page_name(pathname: &str) -> String {
    let last = pathname.rsplit('/').next().unwrap_or("");
    let decoded = urlencoding::decode(last)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| last.to_string());
    if decoded.is_empty() {
        "index.html".to_string()
    } else {
        decoded
    }
}

/// Marks the navbar as scrolled past the offset and highlights the link
/// for the current page.
pub fn init_navbar(document: &Document, window: &Window, config: &SiteConfig) -> Result<()> {
    let page = page_name(&window.location().pathname()?);
    for link in dom::query_all(document, ".nav-link") {
        let active = link.get_attribute("href").as_deref() == Some(page.as_str());
        dom::set_class(&link, "active", active);
    }

    let navbar = dom::by_id(document, "navbar")?;
    let offset = config.navbar_scrolled_offset;
    let scroll_window = window.clone();
    dom::listen(window, "scroll", move |_| {
        dom::set_class(&navbar, "scrolled", dom::scroll_y(&scroll_window) > offset);
    })
}

fn scroll_to(window: &Window, top: f64) {
    let options = ScrollToOptions::new();
    options.set_top(top);
    options.set_behavior(ScrollBehavior::Smooth);
    window.scroll_to_with_scroll_to_options(&options);
}

/// In-page anchors scroll smoothly to their section, leaving room for the
/// fixed navbar.
pub fn init_smooth_scrolling(document: &Document, window: &Window, config: &SiteConfig) -> Result<()> {
    let offset = config.anchor_offset_px;
    for link in dom::query_all(document, r##"a[href^="#"]"##) {
        let document = document.clone();
        let window = window.clone();
        let href = link.get_attribute("href").unwrap_or_default();
        dom::listen(&link, "click", move |e: Event| {
            // A bare "#" is not a valid selector; let the browser handle it.
            let Some(section) = document.query_selector(&href).ok().flatten() else {
                return;
            };
            let Some(section) = section.dyn_ref::<HtmlElement>() else {
                return;
            };
            e.prevent_default();
            scroll_to(&window, section.offset_top() as f64 - offset);
        })?;
    }
    Ok(())
}

pub fn init_back_to_top(document: &Document, window: &Window, config: &SiteConfig) -> Result<()> {
    let button = dom::by_id(document, "back-to-top")?;
    let offset = config.back_to_top_offset;
    {
        let button = button.clone();
        let scroll_window = window.clone();
        dom::listen(window, "scroll", move |_| {
            dom::set_class(&button, "show", dom::scroll_y(&scroll_window) > offset);
        })?;
    }
    let window = window.clone();
    dom::listen(&button, "click", move |_| scroll_to(&window, 0.0))
}

/// How far down the page the reader is, in percent. Pages that cannot
/// scroll report 0.
pub fn scroll_progress(scroll_top: f64, scroll_height: f64, viewport_height: f64) -> f64 {
    let scrollable = scroll_height - viewport_height;
    if scrollable <= 0.0 {
        return 0.0;
    }
    (scroll_top / scrollable * 100.0).clamp(0.0, 100.0)
}

const PROGRESS_STYLE: &str = "position: fixed; top: 0; left: 0; width: 0%; height: 3px; \
     background: linear-gradient(90deg, var(--primary-color), var(--secondary-color)); \
     z-index: 9999; transition: width 0.1s ease;";

pub fn init_scroll_progress(document: &Document, window: &Window) -> Result<()> {
    let body = document.body().ok_or(SiteError::MissingElement("body"))?;
    let bar = document.create_element("div")?;
    bar.set_class_name("scroll-progress");
    bar.set_attribute("style", PROGRESS_STYLE)?;
    body.append_child(&bar)?;

    let root = document
        .document_element()
        .ok_or(SiteError::MissingElement("html"))?;
    let scroll_window = window.clone();
    dom::listen(window, "scroll", move |_| {
        let percent = scroll_progress(
            dom::scroll_y(&scroll_window),
            root.scroll_height() as f64,
            dom::inner_height(&scroll_window),
        );
        dom::set_style(&bar, "width", &format!("{}%", percent));
    })
}
