//! Access URL resolution: walking the redirect chain to a verdict.
//!
//! # Architecture
//!
//! - [`AccessResolver`] - Follows 302 hops one request at a time
//! - [`AccessOutcome`] - The three terminal verdicts callers branch on
//! - [`NotFoundReason`] - Diagnostic detail carried by `NotFound`
//! - [`build_http_client`] - Shared no-redirect client policy
//!
//! # Example
//!
//! ```no_run
//! use drivelink::ResolverConfig;
//! use drivelink::resolver::{AccessOutcome, AccessResolver, build_http_client};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ResolverConfig::default();
//! let resolver = AccessResolver::from_config(build_http_client(&config)?, &config);
//!
//! match resolver
//!     .resolve("https://drive.google.com/uc?export=download&id=ABC123")
//!     .await
//! {
//!     AccessOutcome::Resolved(resolved) => println!("fetch {}", resolved.url),
//!     AccessOutcome::NotPublic { .. } => println!("sign-in required"),
//!     AccessOutcome::NotFound(reason) => println!("unavailable: {reason}"),
//! }
//! # Ok(())
//! # }
//! ```

mod access;
mod http_client;
mod utils;

pub use access::AccessResolver;
pub use http_client::build_http_client;
pub use utils::{absolutize_location, canonical_host, is_login_host, points_to_login_host};

use std::fmt;

use serde::Serialize;

/// A publicly reachable resource location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedUrl {
    /// The final URL answering 200; fetch this for content.
    pub url: String,
    /// Every URL requested, in order, ending with `url`.
    pub redirect_chain: Vec<String>,
}

impl ResolvedUrl {
    /// Creates a resolved URL reached through `redirect_chain`.
    #[must_use]
    pub fn new(url: impl Into<String>, redirect_chain: Vec<String>) -> Self {
        Self {
            url: url.into(),
            redirect_chain,
        }
    }

    /// Number of 302 hops followed before reaching `url`.
    #[must_use]
    pub fn hops(&self) -> usize {
        self.redirect_chain.len().saturating_sub(1)
    }
}

/// Why an access URL could not be resolved.
///
/// Callers are expected to treat all reasons alike; the detail is for logs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NotFoundReason {
    /// The server answered with a status other than 200 or 302.
    Status {
        /// The HTTP status code
        status: u16,
    },
    /// A 302 arrived without a `Location` header.
    MissingLocation,
    /// A 302 `Location` header was not a usable http(s) URL.
    InvalidLocation {
        /// The raw header value
        location: String,
    },
    /// The chain was still redirecting when the request limit was reached.
    TooManyRedirects {
        /// Requests issued before giving up
        requests: usize,
    },
    /// The request itself failed (DNS, connect, timeout, TLS).
    Transport {
        /// Transport error message
        message: String,
    },
}

impl fmt::Display for NotFoundReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Status { status } => write!(f, "server answered HTTP {status}"),
            Self::MissingLocation => f.write_str("redirect without a Location header"),
            Self::InvalidLocation { location } => {
                write!(f, "redirect to an invalid location '{location}'")
            }
            Self::TooManyRedirects { requests } => {
                write!(f, "still redirecting after {requests} requests")
            }
            Self::Transport { message } => write!(f, "request failed: {message}"),
        }
    }
}

/// Terminal verdict of one resolution call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AccessOutcome {
    /// The resource is public; fetch the contained URL directly.
    Resolved(ResolvedUrl),
    /// The resource exists but requires signing in.
    NotPublic {
        /// The URL on the sign-in host that was reached
        login_url: String,
    },
    /// The access URL is broken, unreachable, or the redirect protocol was violated.
    NotFound(NotFoundReason),
}

impl AccessOutcome {
    /// Returns the resolved URL when the outcome is `Resolved`.
    #[must_use]
    pub fn resolved_url(&self) -> Option<&str> {
        match self {
            Self::Resolved(resolved) => Some(&resolved.url),
            _ => None,
        }
    }

    /// Returns true for `Resolved`.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }

    /// Returns true for `NotPublic`.
    #[must_use]
    pub fn is_not_public(&self) -> bool {
        matches!(self, Self::NotPublic { .. })
    }

    /// Returns true for `NotFound`.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
