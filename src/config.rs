use log::{warn, Level};
use serde::Deserialize;
use web_sys::{Document, Element};

use crate::error::{Result, SiteError};

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}

/// Id of the optional `<script type="application/json">` block that
/// overrides any of the page-wide timings below.
pub const SITE_CONFIG_ID: &str = "site-config";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub reveal_threshold: f64,
    pub reveal_margin_bottom_px: i32,
    pub counter_threshold: f64,
    pub counter_duration_ms: f64,
    pub carousel_interval_ms: u32,
    pub nav_breakpoint_px: f64,
    pub navbar_scrolled_offset: f64,
    pub back_to_top_offset: f64,
    pub anchor_offset_px: f64,
    pub submit_delay_ms: u32,
    pub toast_lifetime_ms: u32,
    pub service_worker_script: String,
    pub particle_count: usize,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            reveal_threshold: 0.1,
            reveal_margin_bottom_px: -50,
            counter_threshold: 0.5,
            counter_duration_ms: 2000.0,
            carousel_interval_ms: 5000,
            nav_breakpoint_px: 768.0,
            navbar_scrolled_offset: 100.0,
            back_to_top_offset: 300.0,
            anchor_offset_px: 80.0,
            submit_delay_ms: 2000,
            toast_lifetime_ms: 5000,
            service_worker_script: "/sw.js".to_string(),
            particle_count: 30,
        }
    }
}

impl SiteConfig {
    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Reads the page's config block. A page without one gets the defaults.
    pub fn load(document: &Document) -> Result<Self> {
        let raw = document
            .get_element_by_id(SITE_CONFIG_ID)
            .and_then(|node| node.text_content())
            .unwrap_or_default();
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        Self::from_json(&raw)
    }
}

/// Per-element knobs read from `data-*` attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementConfig {
    pub delay_ms: u32,
    pub direction: String,
    pub speed: f64,
    pub percentage: f64,
    pub target: Option<i64>,
    pub animation: Option<String>,
    pub threshold: f64,
}

impl Default for ElementConfig {
    fn default() -> Self {
        Self {
            delay_ms: 0,
            direction: "left".to_string(),
            speed: 0.5,
            percentage: 100.0,
            target: None,
            animation: None,
            threshold: 100.0,
        }
    }
}

impl ElementConfig {
    pub fn read(element: &Element) -> Self {
        Self::from_lookup(|name| element.get_attribute(&format!("data-{}", name)))
    }

    /// Same as [`ElementConfig::read`] with `defaults` in place of the
    /// stock ones, for controllers whose fallbacks differ (e.g. `.parallax-bg`).
    pub fn read_with(element: &Element, defaults: ElementConfig) -> Self {
        Self::from_lookup_with(
            |name| element.get_attribute(&format!("data-{}", name)),
            defaults,
        )
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&'static str) -> Option<String>,
    {
        Self::from_lookup_with(lookup, Self::default())
    }

    pub fn from_lookup_with<F>(lookup: F, defaults: ElementConfig) -> Self
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let text = |name: &'static str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        Self {
            delay_ms: parsed(&lookup, "delay").unwrap_or(defaults.delay_ms),
            direction: text("direction").unwrap_or(defaults.direction),
            speed: parsed(&lookup, "speed").unwrap_or(defaults.speed),
            percentage: parsed(&lookup, "percentage").unwrap_or(defaults.percentage),
            target: parsed(&lookup, "target").or(defaults.target),
            animation: text("animation").or(defaults.animation),
            threshold: parsed(&lookup, "threshold").unwrap_or(defaults.threshold),
        }
    }
}

fn parsed<T, F>(lookup: &F, name: &'static str) -> Option<T>
where
    T: std::str::FromStr,
    F: Fn(&'static str) -> Option<String>,
{
    let raw = lookup(name)?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    match trimmed.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("{}", SiteError::InvalidAttribute { name, value: raw.clone() });
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&'static str, &str)]) -> impl Fn(&'static str) -> Option<String> {
        let map: HashMap<&'static str, String> =
            pairs.iter().map(|(k, v)| (*k, v.to_string())).collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn element_defaults_when_no_attributes() {
        let config = ElementConfig::from_lookup(|_| None);
        assert_eq!(config, ElementConfig::default());
        assert_eq!(config.delay_ms, 0);
        assert_eq!(config.direction, "left");
        assert_eq!(config.speed, 0.5);
        assert_eq!(config.percentage, 100.0);
    }

    #[test]
    fn element_attributes_override_defaults() {
        let config = ElementConfig::from_lookup(lookup_from(&[
            ("delay", "250"),
            ("direction", "right"),
            ("speed", "0.2"),
            ("target", "1500"),
            ("animation", "pulse"),
        ]));
        assert_eq!(config.delay_ms, 250);
        assert_eq!(config.direction, "right");
        assert_eq!(config.speed, 0.2);
        assert_eq!(config.target, Some(1500));
        assert_eq!(config.animation.as_deref(), Some("pulse"));
    }

    #[test]
    fn unparsable_numbers_fall_back() {
        let config = ElementConfig::from_lookup(lookup_from(&[
            ("delay", "soon"),
            ("percentage", ""),
            ("target", "12abc"),
        ]));
        assert_eq!(config.delay_ms, 0);
        assert_eq!(config.percentage, 100.0);
        assert_eq!(config.target, None);
    }

    #[test]
    fn custom_defaults_apply_to_missing_attributes() {
        let defaults = ElementConfig { speed: 0.3, ..ElementConfig::default() };
        let config = ElementConfig::from_lookup_with(|_| None, defaults);
        assert_eq!(config.speed, 0.3);
    }

    #[test]
    fn site_config_partial_json_keeps_defaults() {
        let config = SiteConfig::from_json(r#"{"carousel_interval_ms": 8000}"#).unwrap();
        assert_eq!(config.carousel_interval_ms, 8000);
        assert_eq!(config.nav_breakpoint_px, 768.0);
        assert_eq!(config.service_worker_script, "/sw.js");
    }

    #[test]
    fn site_config_rejects_malformed_json() {
        let err = SiteConfig::from_json("{ carousel").unwrap_err();
        assert!(matches!(err, SiteError::Config(_)));
    }
}
