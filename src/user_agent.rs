//! Shared User-Agent string for every request the crate issues.

/// Default User-Agent identifying the tool and its version.
#[must_use]
pub(crate) fn default_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("drivelink/{version} (share-link-resolver)")
}
