//! Redirect-walking state machine for access URLs.

use reqwest::header::LOCATION;
use reqwest::{Client, StatusCode};
use tracing::{debug, info, warn};

use crate::config::ResolverConfig;

use super::utils::{absolutize_location, points_to_login_host};
use super::{AccessOutcome, NotFoundReason, ResolvedUrl};

/// Follows an access URL hop by hop and classifies where it ends up.
///
/// Each request is issued with redirects disabled. A 200 ends the walk at the
/// current URL, a 302 moves to its `Location`, anything else is `NotFound`.
/// Landing on the login host, either as a redirect target or as the URL that
/// answered 200, yields `NotPublic`.
///
/// The resolver holds no state between calls; every call walks from scratch.
#[derive(Debug, Clone)]
pub struct AccessResolver {
    client: Client,
    max_redirects: usize,
    login_host: String,
}

impl AccessResolver {
    /// Creates a resolver.
    ///
    /// `client` must not follow redirects itself (see
    /// [`build_http_client`](super::build_http_client)). `max_redirects` bounds the
    /// number of requests issued per call.
    #[must_use]
    pub fn new(client: Client, max_redirects: usize, login_host: impl Into<String>) -> Self {
        Self {
            client,
            max_redirects,
            login_host: login_host.into(),
        }
    }

    /// Creates a resolver using the limit and login host from `config`.
    #[must_use]
    pub fn from_config(client: Client, config: &ResolverConfig) -> Self {
        Self::new(client, config.max_redirects, config.login_host.clone())
    }

    /// Maximum number of requests issued per resolution.
    #[must_use]
    pub fn max_redirects(&self) -> usize {
        self.max_redirects
    }

    /// The host treated as the provider's sign-in page.
    #[must_use]
    pub fn login_host(&self) -> &str {
        &self.login_host
    }

    /// Walks the redirect chain starting at `access_url`.
    ///
    /// Never retries: the first error status, malformed redirect, or transport
    /// failure is decisive.
    #[tracing::instrument(skip(self), fields(max_redirects = self.max_redirects))]
    pub async fn resolve(&self, access_url: &str) -> AccessOutcome {
        let mut current = access_url.to_string();
        let mut chain: Vec<String> = Vec::new();

        while chain.len() < self.max_redirects {
            chain.push(current.clone());

            let response = match self.client.get(&current).send().await {
                Ok(response) => response,
                Err(error) => {
                    warn!(url = %current, error = %error, "Access request failed");
                    return AccessOutcome::NotFound(NotFoundReason::Transport {
                        message: error.to_string(),
                    });
                }
            };

            let status = response.status();
            debug!(url = %current, status = status.as_u16(), hop = chain.len(), "Probed URL");

            match status {
                StatusCode::OK => {
                    // Stale sessions can land directly on the sign-in page with a 200.
                    if points_to_login_host(&current, &self.login_host) {
                        info!(url = %current, "Access URL answered from the login host");
                        return AccessOutcome::NotPublic { login_url: current };
                    }
                    info!(url = %current, hops = chain.len() - 1, "Access URL resolved");
                    return AccessOutcome::Resolved(ResolvedUrl::new(current, chain));
                }
                StatusCode::FOUND => {
                    let Some(raw_location) = response.headers().get(LOCATION) else {
                        warn!(url = %current, "302 response without a Location header");
                        return AccessOutcome::NotFound(NotFoundReason::MissingLocation);
                    };
                    let raw_location = String::from_utf8_lossy(raw_location.as_bytes()).into_owned();

                    let Some(next) = absolutize_location(&raw_location, &current) else {
                        warn!(url = %current, location = %raw_location, "302 to an unusable Location");
                        return AccessOutcome::NotFound(NotFoundReason::InvalidLocation {
                            location: raw_location,
                        });
                    };

                    if points_to_login_host(&next, &self.login_host) {
                        info!(from = %current, to = %next, "Redirected to the login host");
                        return AccessOutcome::NotPublic { login_url: next };
                    }

                    debug!(from = %current, to = %next, "Following redirect");
                    current = next;
                }
                other => {
                    debug!(url = %current, status = other.as_u16(), "Access URL not available");
                    return AccessOutcome::NotFound(NotFoundReason::Status {
                        status: other.as_u16(),
                    });
                }
            }
        }

        warn!(
            url = %access_url,
            requests = chain.len(),
            "Redirect limit reached"
        );
        AccessOutcome::NotFound(NotFoundReason::TooManyRedirects {
            requests: chain.len(),
        })
    }
}
