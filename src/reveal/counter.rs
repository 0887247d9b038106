use std::cell::RefCell;
use std::rc::Rc;

use gloo_render::{request_animation_frame, AnimationFrame};
use log::{debug, warn};
use web_sys::{Document, Element};

use crate::config::{ElementConfig, SiteConfig};
use crate::dom;
use crate::reveal::watcher::{VisibilityWatcher, WatchOptions};

pub const COUNTER_SELECTOR: &str = ".stat-number[data-target]";

pub fn ease_out_cubic(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(3)
}

/// Integer interpolation from `start` to `target` along an ease-out-cubic
/// curve. The value at or past `duration_ms` is exactly `target`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CountUp {
    start: i64,
    target: i64,
    duration_ms: f64,
}

impl CountUp {
    pub fn new(start: i64, target: i64, duration_ms: f64) -> Self {
        Self {
            start,
            target,
            duration_ms,
        }
    }

    pub fn progress(&self, elapsed_ms: f64) -> f64 {
        if self.duration_ms <= 0.0 || elapsed_ms.is_nan() {
            return 1.0;
        }
        (elapsed_ms / self.duration_ms).clamp(0.0, 1.0)
    }

    pub fn is_done(&self, elapsed_ms: f64) -> bool {
        self.start == self.target || self.progress(elapsed_ms) >= 1.0
    }

    pub fn value_at(&self, elapsed_ms: f64) -> i64 {
        if self.is_done(elapsed_ms) {
            return self.target;
        }
        let eased = ease_out_cubic(self.progress(elapsed_ms));
        // Span in f64: the i64 difference overflows for far-apart ends.
        let span = self.target as f64 - self.start as f64;
        let value = (self.start as f64 + span * eased).trunc() as i64;
        value.clamp(self.start.min(self.target), self.start.max(self.target))
    }
}

/// Leading integer of a displayed counter, `0` when there is none.
/// `"1,200+"` reads as `1`, `"  42 cases"` as `42`.
pub fn parse_displayed(text: &str) -> i64 {
    let text = text.trim_start();
    let (sign, digits) = match text.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, text.strip_prefix('+').unwrap_or(text)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().map(|n| sign * n).unwrap_or(0)
}

type FrameSlot = Rc<RefCell<Option<AnimationFrame>>>;

/// Drives `element`'s text through `count`, one step per animation frame,
/// then tags it `animate`.
pub fn run(element: Element, count: CountUp) {
    let slot: FrameSlot = Rc::new(RefCell::new(None));
    step(element, count, slot, None);
}

fn step(element: Element, count: CountUp, slot: FrameSlot, started_at: Option<f64>) {
    let next_slot = slot.clone();
    let handle = request_animation_frame(move |now| {
        let started_at = started_at.unwrap_or(now);
        let elapsed = now - started_at;
        element.set_text_content(Some(&count.value_at(elapsed).to_string()));
        if count.is_done(elapsed) {
            dom::add_class(&element, "animate");
            next_slot.borrow_mut().take();
        } else {
            step(element, count, next_slot, Some(started_at));
        }
    });
    *slot.borrow_mut() = Some(handle);
}

pub fn init_counters(document: &Document, config: &SiteConfig) -> VisibilityWatcher {
    let counters = dom::query_all(document, COUNTER_SELECTOR);
    debug!("found {} counters", counters.len());
    let duration_ms = config.counter_duration_ms;
    let options = WatchOptions {
        threshold: config.counter_threshold,
        margin_bottom_px: 0,
    };
    VisibilityWatcher::observe(counters, options, move |visible| {
        for element in visible {
            let Some(target) = ElementConfig::read(&element).target else {
                warn!("counter without a numeric data-target, leaving as is");
                continue;
            };
            let start = parse_displayed(&element.text_content().unwrap_or_default());
            run(element, CountUp::new(start, target, duration_ms));
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn ease_out_cubic_endpoints() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(1.0), 1.0);
        assert!(ease_out_cubic(0.5) > 0.5);
    }

    #[test]
    fn counts_from_zero_and_lands_on_target() {
        let count = CountUp::new(0, 500, 2000.0);
        assert_eq!(count.value_at(0.0), 0);
        assert_eq!(count.value_at(1000.0), 437);
        assert_eq!(count.value_at(2000.0), 500);
        assert_eq!(count.value_at(9000.0), 500);
    }

    #[test]
    fn values_never_decrease_when_counting_up() {
        let count = CountUp::new(3, 1234, 2000.0);
        let mut last = i64::MIN;
        for ms in (0..=2000).step_by(16) {
            let value = count.value_at(ms as f64);
            assert!(value >= last);
            last = value;
        }
    }

    #[test]
    fn target_zero_ends_at_zero() {
        let count = CountUp::new(0, 0, 2000.0);
        assert!(count.is_done(0.0));
        assert_eq!(count.value_at(0.0), 0);
    }

    #[test]
    fn start_equal_to_target_snaps_immediately() {
        let count = CountUp::new(250, 250, 2000.0);
        assert!(count.is_done(0.0));
        assert_eq!(count.value_at(0.0), 250);
    }

    #[test]
    fn zero_duration_snaps_immediately() {
        let count = CountUp::new(0, 99, 0.0);
        assert!(count.is_done(0.0));
        assert_eq!(count.value_at(0.0), 99);
    }

    #[test]
    fn counts_down_when_start_exceeds_target() {
        let count = CountUp::new(100, 10, 1000.0);
        let mid = count.value_at(500.0);
        assert!(mid < 100 && mid > 10);
        assert_eq!(count.value_at(1000.0), 10);
    }

    #[test]
    fn extreme_ends_do_not_overflow() {
        let up = CountUp::new(-5, i64::MAX, 2000.0);
        assert!(up.value_at(1000.0) > 0);
        assert_eq!(up.value_at(2000.0), i64::MAX);

        let down = CountUp::new(i64::MAX, i64::MIN, 2000.0);
        let mid = down.value_at(500.0);
        assert!(mid < i64::MAX && mid > i64::MIN);
        assert_eq!(down.value_at(2000.0), i64::MIN);
    }

    #[test]
    fn parses_leading_integer() {
        assert_eq!(parse_displayed("0"), 0);
        assert_eq!(parse_displayed("  42 cases"), 42);
        assert_eq!(parse_displayed("1,200+"), 1);
        assert_eq!(parse_displayed("-7"), -7);
        assert_eq!(parse_displayed("+15"), 15);
        assert_eq!(parse_displayed("years"), 0);
        assert_eq!(parse_displayed(""), 0);
    }

    proptest! {
        #[test]
        fn always_terminates_exactly_on_target(
            start in -100_000i64..100_000,
            target in -100_000i64..100_000,
            duration in 0.0f64..10_000.0,
        ) {
            let count = CountUp::new(start, target, duration);
            prop_assert!(count.is_done(duration));
            prop_assert_eq!(count.value_at(duration), target);
            prop_assert_eq!(count.value_at(duration + 16.0), target);
        }

        #[test]
        fn intermediate_values_stay_between_start_and_target(
            start in -10_000i64..10_000,
            target in -10_000i64..10_000,
            elapsed in 0.0f64..2000.0,
        ) {
            let value = CountUp::new(start, target, 2000.0).value_at(elapsed);
            prop_assert!(value >= start.min(target) && value <= start.max(target));
        }

        #[test]
        fn any_i64_ends_stay_in_range_and_land_on_target(
            start in any::<i64>(),
            target in any::<i64>(),
            elapsed in 0.0f64..2000.0,
        ) {
            let count = CountUp::new(start, target, 2000.0);
            let value = count.value_at(elapsed);
            prop_assert!(value >= start.min(target) && value <= start.max(target));
            prop_assert_eq!(count.value_at(2000.0), target);
        }
    }
}
