//! Host environment detection.
//!
//! A [`Platform`] describes the host. Browsers are recognised by sniffing the
//! user agent; other hosts can report their [`Environment`] directly by
//! overriding [`Platform::environment`].

use crate::error::{EnvError, Result};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Static flags describing the host runtime. Computed once, immutable after.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct Environment {
    pub in_browser: bool,
    pub in_weex: bool,
    pub weex_platform: Option<String>,
    /// Lowercased user agent, browsers only.
    #[serde(rename = "UA")]
    pub user_agent: Option<String>,
    #[serde(rename = "isIE")]
    pub is_ie: bool,
    #[serde(rename = "isIE9")]
    pub is_ie9: bool,
    pub is_edge: bool,
    pub is_android: bool,
    #[serde(rename = "isIOS")]
    pub is_ios: bool,
    pub is_chrome: bool,
}

fn found_after_start(haystack: &str, needle: &str) -> bool {
    matches!(haystack.find(needle), Some(i) if i > 0)
}

fn has_chrome_version(ua: &str) -> bool {
    ua.match_indices("chrome/")
        .any(|(i, m)| ua[i + m.len()..].starts_with(|c: char| c.is_ascii_digit()))
}

impl Environment {
    /// Derives the platform flags from raw host facts.
    pub fn sniff(in_browser: bool, user_agent: Option<&str>, weex_platform: Option<&str>) -> Self {
        let weex_platform = weex_platform
            .filter(|p| !p.is_empty())
            .map(str::to_lowercase);
        let ua = user_agent
            .filter(|_| in_browser)
            .map(str::to_lowercase);
        let weex = weex_platform.as_deref();

        let (is_ie, is_ie9, is_edge, ua_android, ua_ios, ua_chrome) = match ua.as_deref() {
            Some(ua) => (
                ua.contains("msie") || ua.contains("trident"),
                found_after_start(ua, "msie 9.0"),
                found_after_start(ua, "edge/"),
                found_after_start(ua, "android"),
                ["iphone", "ipad", "ipod", "ios"].iter().any(|p| ua.contains(p)),
                has_chrome_version(ua),
            ),
            None => Default::default(),
        };

        Self {
            in_browser,
            in_weex: weex_platform.is_some(),
            is_ie,
            is_ie9,
            is_edge,
            is_android: ua_android || weex == Some("android"),
            is_ios: ua_ios || weex == Some("ios"),
            is_chrome: ua_chrome && !is_edge,
            weex_platform,
            user_agent: ua,
        }
    }

    pub fn detect(platform: &dyn Platform) -> Self {
        platform.environment()
    }

    /// Parses flags supplied by a host as JSON, e.g. `{"inBrowser": true}`.
    /// Keys use the exported flag names (`UA`, `isIE`, `isIOS`, ...); an
    /// unknown key is an error.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Browser-like hosts report callback failures instead of raising them.
    pub fn reports_errors(&self) -> bool {
        self.in_browser || self.in_weex
    }
}

/// Source of host facts.
pub trait Platform {
    fn in_browser(&self) -> bool;

    fn user_agent(&self) -> Option<String> {
        None
    }

    fn weex_platform(&self) -> Option<String> {
        None
    }

    /// Hosts that know their flags can skip user-agent sniffing entirely.
    fn environment(&self) -> Environment {
        Environment::sniff(
            self.in_browser(),
            self.user_agent().as_deref(),
            self.weex_platform().as_deref(),
        )
    }
}

/// A plain process with no browser globals.
#[derive(Debug, Default, Clone, Copy)]
pub struct NativePlatform;

impl Platform for NativePlatform {
    fn in_browser(&self) -> bool {
        false
    }
}

/// A browser identified by its user agent string.
#[derive(Debug, Clone)]
pub struct BrowserPlatform {
    pub user_agent: String,
}

impl BrowserPlatform {
    pub fn new(user_agent: impl Into<String>) -> Self {
        Self {
            user_agent: user_agent.into(),
        }
    }
}

impl Platform for BrowserPlatform {
    fn in_browser(&self) -> bool {
        true
    }

    fn user_agent(&self) -> Option<String> {
        Some(self.user_agent.clone())
    }
}

/// A weex container reporting its native platform name.
#[derive(Debug, Clone)]
pub struct WeexPlatform {
    pub platform: String,
}

impl Platform for WeexPlatform {
    fn in_browser(&self) -> bool {
        false
    }

    fn weex_platform(&self) -> Option<String> {
        Some(self.platform.clone())
    }
}

static CURRENT: OnceLock<Environment> = OnceLock::new();

/// Installs the process environment. Only the first call wins; later calls,
/// and calls after [`current`] has been read, fail.
pub fn install(env: Environment) -> Result<()> {
    CURRENT.set(env).map_err(|_| EnvError::AlreadyInstalled)?;
    tracing::debug!("Environment installed: {:?}", current());
    Ok(())
}

/// The process environment, defaulting to [`NativePlatform`] when no host
/// installed one.
pub fn current() -> &'static Environment {
    CURRENT.get_or_init(|| NativePlatform.environment())
}
