//! HTTP client construction shared by category probing and redirect walking.
//!
//! Redirect following is always disabled: every hop is inspected by
//! [`AccessResolver`](super::AccessResolver) so a sign-in redirect can never be
//! followed silently.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::time::Duration;

use reqwest::redirect::Policy;
use reqwest::{Client, ClientBuilder, Proxy};
use tracing::warn;

use crate::config::{ConfigError, ResolverConfig};

/// Proxy environment variables consulted when system proxy lookup is skipped,
/// by scheme, in priority order.
const HTTPS_PROXY_VARS: &[&str] = &["HTTPS_PROXY", "https_proxy", "ALL_PROXY", "all_proxy"];
const HTTP_PROXY_VARS: &[&str] = &["HTTP_PROXY", "http_proxy", "ALL_PROXY", "all_proxy"];

/// How the client builder treats proxies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ProxyLookup {
    /// reqwest's default: system settings plus environment.
    System,
    /// Environment variables only.
    EnvOnly,
}

/// Builds the no-redirect HTTP client used for one finder.
///
/// # Errors
///
/// Returns [`ConfigError::ClientBuild`] when client construction fails.
pub fn build_http_client(config: &ResolverConfig) -> Result<Client, ConfigError> {
    match build_guarded(config, ProxyLookup::System) {
        Some(result) => result,
        None => {
            // Some sandboxes panic while reading system proxy settings.
            warn!("System proxy lookup panicked; retrying with environment proxies only");
            build_guarded(config, ProxyLookup::EnvOnly).unwrap_or_else(|| {
                Err(ConfigError::ClientBuild {
                    reason: "client construction panicked while initializing networking"
                        .to_string(),
                })
            })
        }
    }
}

/// Runs the builder, returning `None` if it panicked.
fn build_guarded(
    config: &ResolverConfig,
    lookup: ProxyLookup,
) -> Option<Result<Client, ConfigError>> {
    catch_unwind(AssertUnwindSafe(|| {
        builder_for(config, lookup)
            .build()
            .map_err(|error| ConfigError::ClientBuild {
                reason: error.to_string(),
            })
    }))
    .ok()
}

fn builder_for(config: &ResolverConfig, lookup: ProxyLookup) -> ClientBuilder {
    let builder = Client::builder()
        .redirect(Policy::none())
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .timeout(Duration::from_secs(config.read_timeout_secs))
        .user_agent(config.user_agent.clone())
        .gzip(true);

    match lookup {
        ProxyLookup::System => builder,
        ProxyLookup::EnvOnly => with_env_proxies(builder.no_proxy()),
    }
}

fn with_env_proxies(mut builder: ClientBuilder) -> ClientBuilder {
    if let Some(proxy) = first_env_value(HTTPS_PROXY_VARS).and_then(|p| Proxy::https(&p).ok()) {
        builder = builder.proxy(proxy);
    }
    if let Some(proxy) = first_env_value(HTTP_PROXY_VARS).and_then(|p| Proxy::http(&p).ok()) {
        builder = builder.proxy(proxy);
    }
    builder
}

fn first_env_value(names: &[&str]) -> Option<String> {
    names.iter().find_map(|name| {
        std::env::var(name)
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_http_client_with_default_config() {
        assert!(build_http_client(&ResolverConfig::default()).is_ok());
    }

    #[test]
    fn test_env_only_builder_builds() {
        let result = build_guarded(&ResolverConfig::default(), ProxyLookup::EnvOnly);
        assert!(matches!(result, Some(Ok(_))));
    }

    #[test]
    fn test_first_env_value_skips_unset_names() {
        assert_eq!(first_env_value(&["DRIVELINK_TEST_UNSET_PROXY_VAR"]), None);
    }
}
