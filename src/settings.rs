//! Start-up settings
//!
//! Read from the page's query string in the browser (`?scene=wire&paused`)
//! or from `key=value` arguments natively. Bad values are logged and the
//! default kept.

use serde::{Deserialize, Serialize};

use crate::scene::SceneKey;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Scene shown first
    pub start_scene: SceneKey,
    /// Start with the animation running
    pub autoplay: bool,
    /// Random seed; `None` picks one (time in the browser, fixed natively)
    pub seed: Option<u64>,
    /// Initial carbon percent for the alloy scene (0.0 - 2.0)
    pub carbon_percent: f32,
    /// Initial fold count for the alloy blade (0 - 12)
    pub fold_count: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            start_scene: SceneKey::Sea,
            autoplay: true,
            seed: None,
            carbon_percent: 0.0,
            fold_count: 0,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a URL query string, with or without the leading `?`
    pub fn from_query(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        Self::from_pairs(query.split('&'))
    }

    /// Parse `key=value` command-line arguments (leading dashes allowed)
    pub fn from_args<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args: Vec<S> = args.into_iter().collect();
        Self::from_pairs(args.iter().map(|a| a.as_ref().trim_start_matches('-')))
    }

    fn from_pairs<'a>(pairs: impl Iterator<Item = &'a str>) -> Self {
        let mut settings = Self::default();
        for pair in pairs.filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            settings.apply(key, value);
        }
        settings
    }

    /// Apply one setting; unknown keys and bad values are warned about
    pub fn apply(&mut self, key: &str, value: &str) {
        match key {
            "scene" => match value.parse() {
                Ok(scene) => self.start_scene = scene,
                Err(e) => log::warn!("{e}, keeping {}", self.start_scene),
            },
            "autoplay" => match parse_flag(value) {
                Some(on) => self.autoplay = on,
                None => log::warn!("bad autoplay value `{value}`"),
            },
            "paused" => match parse_flag(value) {
                Some(paused) => self.autoplay = !paused,
                None => log::warn!("bad paused value `{value}`"),
            },
            "seed" => match parse_seed(value) {
                Some(seed) => self.seed = Some(seed),
                None => log::warn!("bad seed `{value}`"),
            },
            "carbon" => match value.parse::<f32>() {
                Ok(p) if p.is_finite() => self.carbon_percent = p,
                _ => log::warn!("bad carbon percent `{value}`"),
            },
            "folds" => match value.parse::<u32>() {
                Ok(n) => self.fold_count = n,
                Err(_) => log::warn!("bad fold count `{value}`"),
            },
            _ => log::warn!("unknown setting `{key}`"),
        }
    }

    /// Settings from the current page URL (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn from_location() -> Self {
        let search = web_sys::window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();
        let mut settings = Self::from_query(&search);
        if settings.seed.is_none() {
            settings.seed = Some(js_sys::Date::now() as u64);
        }
        settings
    }
}

/// A bare key counts as "on"
fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "" | "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Decimal or `0x` hex
fn parse_seed(value: &str) -> Option<u64> {
    match value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16).ok(),
        None => value.parse().ok(),
    }
}
