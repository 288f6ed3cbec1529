//! Resolver configuration: provider endpoints, redirect limit, probing order,
//! and HTTP client settings.

use std::collections::HashSet;

use thiserror::Error;
use url::Url;

use crate::locator::{AccessTemplates, ExportFormat, HostingCategory};
use crate::user_agent;

/// Maximum redirect chain length per resolution (browsers use 20).
pub const DEFAULT_MAX_REDIRECTS: usize = 20;
/// Upper bound accepted for [`ResolverConfig::max_redirects`].
pub const MAX_REDIRECTS_LIMIT: usize = 100;
/// The provider's account sign-in host.
pub const DEFAULT_LOGIN_HOST: &str = "accounts.google.com";
/// Base URL serving opaque file downloads.
pub const DEFAULT_DRIVE_BASE_URL: &str = "https://drive.google.com";
/// Base URL serving native document exports.
pub const DEFAULT_DOCS_BASE_URL: &str = "https://docs.google.com";

const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_READ_TIMEOUT_SECS: u64 = 30;
const MAX_TIMEOUT_SECS: u64 = 3600;

/// Errors raised for invalid configuration or HTTP client setup.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// A configuration field is out of range or malformed
    #[error("invalid config value for `{field}`: {value}. Expected {expected}")]
    InvalidValue {
        /// Field name
        field: &'static str,
        /// Rejected value
        value: String,
        /// What would have been accepted
        expected: String,
    },

    /// The HTTP client could not be constructed
    #[error("HTTP client construction failed: {reason}")]
    ClientBuild {
        /// Underlying failure
        reason: String,
    },
}

impl ConfigError {
    fn invalid(field: &'static str, value: impl ToString, expected: impl Into<String>) -> Self {
        Self::InvalidValue {
            field,
            value: value.to_string(),
            expected: expected.into(),
        }
    }
}

/// Settings shared by the locator and the access resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Maximum number of requests issued while walking one redirect chain.
    pub max_redirects: usize,
    /// Host whose appearance marks a resource as not public.
    pub login_host: String,
    /// Base URL for the file template.
    pub drive_base_url: String,
    /// Base URL for the native document templates.
    pub docs_base_url: String,
    /// Categories probed, in order, when a share URL omits its category.
    /// The first category answering with a 2xx status wins.
    pub probe_order: Vec<HostingCategory>,
    /// Export format used when the caller does not pick one.
    pub default_format: ExportFormat,
    /// HTTP connect timeout in seconds.
    pub connect_timeout_secs: u64,
    /// HTTP whole-request timeout in seconds.
    pub read_timeout_secs: u64,
    /// User-Agent header value.
    pub user_agent: String,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            max_redirects: DEFAULT_MAX_REDIRECTS,
            login_host: DEFAULT_LOGIN_HOST.to_string(),
            drive_base_url: DEFAULT_DRIVE_BASE_URL.to_string(),
            docs_base_url: DEFAULT_DOCS_BASE_URL.to_string(),
            probe_order: HostingCategory::KNOWN.to_vec(),
            default_format: ExportFormat::default(),
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            read_timeout_secs: DEFAULT_READ_TIMEOUT_SECS,
            user_agent: user_agent::default_user_agent(),
        }
    }
}

impl ResolverConfig {
    /// Default config with both provider base URLs replaced (used by integration tests).
    #[must_use]
    pub fn with_base_urls(drive_base_url: impl Into<String>, docs_base_url: impl Into<String>) -> Self {
        Self {
            drive_base_url: drive_base_url.into(),
            docs_base_url: docs_base_url.into(),
            ..Self::default()
        }
    }

    /// Access URL templates rooted at the configured base URLs.
    #[must_use]
    pub fn templates(&self) -> AccessTemplates {
        AccessTemplates::new(&self.drive_base_url, &self.docs_base_url)
    }

    /// Validates every field.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for the first invalid field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_REDIRECTS_LIMIT).contains(&self.max_redirects) {
            return Err(ConfigError::invalid(
                "max_redirects",
                self.max_redirects,
                format!("range 1..={MAX_REDIRECTS_LIMIT}"),
            ));
        }

        let login_host = self.login_host.trim();
        if login_host.is_empty()
            || login_host.contains(['/', ':', '?', '#'])
            || login_host.chars().any(char::is_whitespace)
        {
            return Err(ConfigError::invalid(
                "login_host",
                &self.login_host,
                "a bare host name such as accounts.google.com",
            ));
        }

        validate_base_url("drive_base_url", &self.drive_base_url)?;
        validate_base_url("docs_base_url", &self.docs_base_url)?;
        validate_probe_order(&self.probe_order)?;
        validate_timeout_secs("connect_timeout_secs", self.connect_timeout_secs)?;
        validate_timeout_secs("read_timeout_secs", self.read_timeout_secs)?;

        if self.user_agent.trim().is_empty() {
            return Err(ConfigError::invalid("user_agent", "\"\"", "a non-empty string"));
        }

        Ok(())
    }
}

fn validate_base_url(field: &'static str, value: &str) -> Result<(), ConfigError> {
    let expected = "an absolute http(s) URL without query or fragment";
    let Ok(url) = Url::parse(value) else {
        return Err(ConfigError::invalid(field, value, expected));
    };
    if !matches!(url.scheme(), "http" | "https")
        || url.host_str().is_none()
        || url.query().is_some()
        || url.fragment().is_some()
    {
        return Err(ConfigError::invalid(field, value, expected));
    }
    Ok(())
}

fn validate_probe_order(order: &[HostingCategory]) -> Result<(), ConfigError> {
    let rendered = || {
        order
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",")
    };
    let expected = "a non-empty list of distinct known categories";

    if order.is_empty() {
        return Err(ConfigError::invalid("probe_order", "[]", expected));
    }
    let mut seen = HashSet::new();
    for category in order {
        if !category.is_known() || !seen.insert(*category) {
            return Err(ConfigError::invalid("probe_order", rendered(), expected));
        }
    }
    Ok(())
}

fn validate_timeout_secs(field: &'static str, value: u64) -> Result<(), ConfigError> {
    if !(1..=MAX_TIMEOUT_SECS).contains(&value) {
        return Err(ConfigError::invalid(
            field,
            value,
            format!("range 1..={MAX_TIMEOUT_SECS}"),
        ));
    }
    Ok(())
}
