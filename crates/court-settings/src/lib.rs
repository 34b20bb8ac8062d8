//! # court-settings
//!
//! Configuration resolution for the court session pool.
//!
//! Settings are resolved from three layers (in priority order):
//! 1. **Explicit overrides** — [`CourtOverrides`] passed by the caller
//! 2. **Environment variables** — `COURT_WS_BASE_URL`, `COURT_API_BASE_URL`
//!    (fallback base), `COURT_WS_PATH`, `COURT_CAPACITY`
//! 3. **Compiled defaults** — empty base, `/ws` path, capacity 16
//!
//! The resolved [`CourtSettings`] value is injected into the pool's
//! constructor; core logic never re-reads the environment.

#![deny(unsafe_code)]

use serde::{Deserialize, Serialize};

/// Pool capacity used when neither an override nor an env var is set.
pub const DEFAULT_CAPACITY: usize = 16;

/// Default WebSocket path suffix.
pub const DEFAULT_WS_PATH: &str = "/ws";

/// Caller-supplied overrides, highest priority layer.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CourtOverrides {
    /// Base URL for the court endpoint (`http(s)` or `ws(s)` scheme).
    pub ws_base_url: Option<String>,
    /// Path suffix appended to the base URL.
    pub ws_path: Option<String>,
    /// Session pool capacity.
    pub capacity: Option<usize>,
}

/// Fully resolved court configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourtSettings {
    /// Normalized base URL (`ws(s)` scheme, no trailing slash).
    pub ws_base_url: String,
    /// Normalized path suffix (leading slash guaranteed).
    pub ws_path: String,
    /// Session pool capacity.
    pub capacity: usize,
}

impl CourtSettings {
    /// The full endpoint URL the pool connects to.
    pub fn ws_url(&self) -> String {
        format!("{}{}", self.ws_base_url, self.ws_path)
    }
}

impl Default for CourtSettings {
    fn default() -> Self {
        Self {
            ws_base_url: String::new(),
            ws_path: DEFAULT_WS_PATH.to_string(),
            capacity: DEFAULT_CAPACITY,
        }
    }
}

/// Resolve settings from overrides layered over process environment.
pub fn resolve(overrides: &CourtOverrides) -> CourtSettings {
    resolve_with(overrides, |name| std::env::var(name).ok())
}

/// Resolve settings with an injected environment lookup.
///
/// Tests pass a closure over a map instead of mutating the process
/// environment (Rust runs tests in parallel threads).
pub fn resolve_with(
    overrides: &CourtOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> CourtSettings {
    let raw_base = overrides
        .ws_base_url
        .clone()
        .or_else(|| env("COURT_WS_BASE_URL"))
        .or_else(|| env("COURT_API_BASE_URL"))
        .unwrap_or_default();

    let raw_path = overrides
        .ws_path
        .clone()
        .or_else(|| env("COURT_WS_PATH"))
        .unwrap_or_else(|| DEFAULT_WS_PATH.to_string());

    let capacity = match overrides.capacity {
        Some(c) => normalize_capacity(Some(c)),
        None => normalize_capacity(env("COURT_CAPACITY").map(|raw| {
            raw.parse::<usize>().unwrap_or_else(|e| {
                tracing::warn!(raw = %raw, error = %e, "unparsable COURT_CAPACITY, using default");
                DEFAULT_CAPACITY
            })
        })),
    };

    CourtSettings {
        ws_base_url: normalize_base(&raw_base),
        ws_path: normalize_path(&raw_path),
        capacity,
    }
}

/// Rewrite an `http(s)` scheme to `ws(s)` and strip any trailing slash.
fn normalize_base(base: &str) -> String {
    let base = base.trim_end_matches('/');
    if let Some(rest) = base.strip_prefix("http") {
        format!("ws{rest}")
    } else {
        base.to_string()
    }
}

/// Guarantee a leading slash on the path suffix.
fn normalize_path(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}

fn normalize_capacity(capacity: Option<usize>) -> usize {
    match capacity {
        Some(0) => {
            tracing::warn!("capacity 0 requested, using default");
            DEFAULT_CAPACITY
        }
        Some(c) => c,
        None => DEFAULT_CAPACITY,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env_of(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    fn resolve_env(overrides: &CourtOverrides, pairs: &[(&str, &str)]) -> CourtSettings {
        let env = env_of(pairs);
        resolve_with(overrides, |name| env.get(name).cloned())
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let settings = resolve_env(&CourtOverrides::default(), &[]);
        assert_eq!(settings.ws_base_url, "");
        assert_eq!(settings.ws_path, "/ws");
        assert_eq!(settings.capacity, 16);
        assert_eq!(settings.ws_url(), "/ws");
    }

    #[test]
    fn http_scheme_is_rewritten_to_ws() {
        let settings = resolve_env(
            &CourtOverrides::default(),
            &[("COURT_WS_BASE_URL", "http://court.example:8080/")],
        );
        assert_eq!(settings.ws_base_url, "ws://court.example:8080");
        assert_eq!(settings.ws_url(), "ws://court.example:8080/ws");
    }

    #[test]
    fn https_scheme_becomes_wss() {
        let settings = resolve_env(
            &CourtOverrides::default(),
            &[("COURT_WS_BASE_URL", "https://court.example")],
        );
        assert_eq!(settings.ws_base_url, "wss://court.example");
    }

    #[test]
    fn api_base_url_is_the_fallback_base() {
        let settings = resolve_env(
            &CourtOverrides::default(),
            &[("COURT_API_BASE_URL", "http://api.example")],
        );
        assert_eq!(settings.ws_base_url, "ws://api.example");
    }

    #[test]
    fn ws_base_url_wins_over_api_base_url() {
        let settings = resolve_env(
            &CourtOverrides::default(),
            &[
                ("COURT_WS_BASE_URL", "ws://direct.example"),
                ("COURT_API_BASE_URL", "http://api.example"),
            ],
        );
        assert_eq!(settings.ws_base_url, "ws://direct.example");
    }

    #[test]
    fn overrides_win_over_env() {
        let overrides = CourtOverrides {
            ws_base_url: Some("ws://override.example".into()),
            ws_path: Some("court".into()),
            capacity: Some(4),
        };
        let settings = resolve_env(
            &overrides,
            &[
                ("COURT_WS_BASE_URL", "ws://env.example"),
                ("COURT_WS_PATH", "/env"),
                ("COURT_CAPACITY", "32"),
            ],
        );
        assert_eq!(settings.ws_base_url, "ws://override.example");
        assert_eq!(settings.ws_path, "/court");
        assert_eq!(settings.capacity, 4);
    }

    #[test]
    fn path_gains_a_leading_slash() {
        let overrides = CourtOverrides {
            ws_path: Some("court/ws".into()),
            ..CourtOverrides::default()
        };
        let settings = resolve_env(&overrides, &[]);
        assert_eq!(settings.ws_path, "/court/ws");
    }

    #[test]
    fn capacity_from_env() {
        let settings = resolve_env(&CourtOverrides::default(), &[("COURT_CAPACITY", "8")]);
        assert_eq!(settings.capacity, 8);
    }

    #[test]
    fn unparsable_capacity_falls_back_to_default() {
        let settings = resolve_env(
            &CourtOverrides::default(),
            &[("COURT_CAPACITY", "plenty")],
        );
        assert_eq!(settings.capacity, 16);
    }

    #[test]
    fn zero_capacity_falls_back_to_default() {
        let overrides = CourtOverrides {
            capacity: Some(0),
            ..CourtOverrides::default()
        };
        let settings = resolve_env(&overrides, &[]);
        assert_eq!(settings.capacity, 16);
    }

    #[test]
    fn settings_serialize_camel_case() {
        let json = serde_json::to_value(CourtSettings::default()).unwrap();
        assert!(json.get("wsBaseUrl").is_some());
        assert!(json.get("wsPath").is_some());
        assert!(json.get("capacity").is_some());
    }
}
