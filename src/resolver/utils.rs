//! Host normalization and redirect target helpers.

use url::Url;

/// Normalizes a host string: trim, strip leading "www.", trailing '.', and lowercases.
#[must_use]
pub fn canonical_host(host: &str) -> String {
    host.trim()
        .trim_start_matches("www.")
        .trim_end_matches('.')
        .to_ascii_lowercase()
}

/// Returns true if `host` is `login_host` or one of its subdomains.
#[must_use]
pub fn is_login_host(host: &str, login_host: &str) -> bool {
    let host = canonical_host(host);
    let login_host = canonical_host(login_host);
    if host.is_empty() || login_host.is_empty() {
        return false;
    }
    host == login_host
        || host
            .strip_suffix(login_host.as_str())
            .is_some_and(|prefix| prefix.ends_with('.'))
}

/// Returns true if `url` parses and its host is the login host.
#[must_use]
pub fn points_to_login_host(url: &str, login_host: &str) -> bool {
    Url::parse(url)
        .ok()
        .and_then(|parsed| parsed.host_str().map(|host| is_login_host(host, login_host)))
        .unwrap_or(false)
}

/// Turns a `Location` header value into an absolute URL.
///
/// Absolute http(s) values are returned unchanged; protocol-relative values
/// inherit the scheme of `base`; anything else is joined against `base`.
/// Returns `None` when the result is not a valid http(s) URL.
#[must_use]
pub fn absolutize_location(location: &str, base: &str) -> Option<String> {
    let location = location.trim();
    if location.is_empty() {
        return None;
    }

    if location.starts_with("http://") || location.starts_with("https://") {
        return Url::parse(location).ok().map(|_| location.to_string());
    }

    let base = Url::parse(base).ok()?;
    let joined = base.join(location).ok()?;
    if matches!(joined.scheme(), "http" | "https") {
        Some(joined.to_string())
    } else {
        None
    }
}
