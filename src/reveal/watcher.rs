use std::cell::RefCell;
use std::collections::HashSet;
use std::hash::Hash;
use std::rc::Rc;

use log::debug;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::Array;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::dom;

/// Keys that have already fired. Membership only ever grows.
#[derive(Debug, Default)]
pub struct TriggerRecord<K> {
    fired: HashSet<K>,
}

impl<K: Eq + Hash + Clone> TriggerRecord<K> {
    pub fn new() -> Self {
        Self {
            fired: HashSet::new(),
        }
    }

    /// Returns true only the first time `key` is marked.
    pub fn mark(&mut self, key: K) -> bool {
        self.fired.insert(key)
    }

    #[cfg(test)]
    pub fn contains(&self, key: &K) -> bool {
        self.fired.contains(key)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.fired.len()
    }

    /// Filters one observer batch down to keys that are intersecting and
    /// have never fired, marking them on the way. Duplicates inside a
    /// batch collapse to the first occurrence.
    pub fn admit_batch<I>(&mut self, batch: I) -> Vec<K>
    where
        I: IntoIterator<Item = (K, bool)>,
    {
        batch
            .into_iter()
            .filter(|(_, intersecting)| *intersecting)
            .filter_map(|(key, _)| self.mark(key.clone()).then_some(key))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WatchOptions {
    /// Fraction of the element that must be visible, `0.0..=1.0`.
    pub threshold: f64,
    /// Bottom root margin in px; negative fires before the element reaches
    /// the viewport's bottom edge.
    pub margin_bottom_px: i32,
}

impl Default for WatchOptions {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            margin_bottom_px: -50,
        }
    }
}

impl WatchOptions {
    pub fn root_margin(&self) -> String {
        format!("0px 0px {}px 0px", self.margin_bottom_px)
    }
}

pub struct VisibilityWatcher {
    observer: Option<IntersectionObserver>,
}

impl VisibilityWatcher {
    /// Watches `elements` and calls `on_visible` with each batch of
    /// elements that became visible for the first time. Every element is
    /// unobserved right after its first report. Without IntersectionObserver
    /// support the watcher is inert and nothing ever fires.
    pub fn observe<F>(elements: Vec<Element>, options: WatchOptions, on_visible: F) -> Self
    where
        F: FnMut(Vec<Element>) + 'static,
    {
        let inert = Self { observer: None };
        if elements.is_empty() {
            return inert;
        }
        let Some(window) = web_sys::window() else {
            return inert;
        };
        if !dom::has_property(&window, "IntersectionObserver") {
            debug!("IntersectionObserver unavailable, {} elements stay static", elements.len());
            return inert;
        }

        let targets = Rc::new(elements);
        let record = Rc::new(RefCell::new(TriggerRecord::<usize>::new()));
        let mut on_visible = on_visible;

        let callback_targets = targets.clone();
        let callback = Closure::wrap(Box::new(move |entries: Array, observer: IntersectionObserver| {
            let batch = entries
                .iter()
                .filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
                .filter_map(|entry| {
                    let target = entry.target();
                    let index = callback_targets.iter().position(|t| *t == target)?;
                    Some((index, entry.is_intersecting()))
                });
            let fresh = record.borrow_mut().admit_batch(batch);
            if fresh.is_empty() {
                return;
            }
            let visible: Vec<Element> = fresh
                .into_iter()
                .map(|index| {
                    let element = callback_targets[index].clone();
                    observer.unobserve(&element);
                    element
                })
                .collect();
            on_visible(visible);
        }) as Box<dyn FnMut(Array, IntersectionObserver)>);

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(options.threshold));
        init.set_root_margin(&options.root_margin());

        let observer = match IntersectionObserver::new_with_options(
            callback.as_ref().unchecked_ref(),
            &init,
        ) {
            Ok(observer) => observer,
            Err(err) => {
                debug!("IntersectionObserver construction failed: {:?}", err);
                return inert;
            }
        };
        callback.forget();

        for element in targets.iter() {
            observer.observe(element);
        }
        debug!(
            "watching {} elements at threshold {} margin {}",
            targets.len(),
            options.threshold,
            options.root_margin()
        );

        Self {
            observer: Some(observer),
        }
    }

    pub fn is_active(&self) -> bool {
        self.observer.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn fires_once_across_enter_exit_enter() {
        let mut record = TriggerRecord::new();
        assert_eq!(record.admit_batch([(7, true)]), vec![7]);
        assert_eq!(record.admit_batch([(7, false)]), Vec::<i32>::new());
        assert_eq!(record.admit_batch([(7, true)]), Vec::<i32>::new());
        assert_eq!(record.len(), 1);
    }

    #[test]
    fn ignores_non_intersecting_entries() {
        let mut record = TriggerRecord::new();
        assert_eq!(record.admit_batch([(1, false), (2, false)]), Vec::<i32>::new());
        assert!(!record.contains(&1));
        assert_eq!(record.admit_batch([(2, true), (1, false)]), vec![2]);
    }

    #[test]
    fn duplicate_keys_in_one_batch_fire_once() {
        let mut record = TriggerRecord::new();
        assert_eq!(record.admit_batch([(3, true), (4, true), (3, true)]), vec![3, 4]);
    }

    #[test]
    fn batch_order_does_not_change_membership() {
        let mut forward = TriggerRecord::new();
        let mut backward = TriggerRecord::new();
        forward.admit_batch([(1, true), (2, true), (3, true)]);
        backward.admit_batch([(3, true), (2, true), (1, true)]);
        for key in 1..=3 {
            assert!(forward.contains(&key));
            assert!(backward.contains(&key));
        }
    }

    #[test]
    fn default_options_match_reveal_settings() {
        let options = WatchOptions::default();
        assert_eq!(options.threshold, 0.1);
        assert_eq!(options.root_margin(), "0px 0px -50px 0px");
    }
}
