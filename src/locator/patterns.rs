//! Share URL patterns, tried in a fixed priority order.

use std::sync::LazyLock;

use regex::Regex;

use super::error::LocateError;
use super::resource::{HostingCategory, Resource};

/// Compiles a regex at static init; panics on invalid pattern.
fn compile_static_regex(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid static regex '{pattern}': {e}"))
}

/// A named share URL shape.
///
/// Every pattern captures `id`; patterns that also capture `category` yield a
/// concrete category, the rest yield [`HostingCategory::Unknown`].
struct SharePattern {
    name: &'static str,
    regex: Regex,
}

static SHARE_PATTERNS: LazyLock<Vec<SharePattern>> = LazyLock::new(|| {
    vec![
        SharePattern {
            name: "category-path",
            regex: compile_static_regex(concat!(
                r"^https?://(?:docs|drive)\.google\.com/",
                // Workspace accounts add an organization segment
                r"(?:a/[a-zA-Z0-9\-.]+/)?",
                r"(?P<category>file|document|presentation|spreadsheets|drawings)/d/",
                r"(?P<id>[a-zA-Z0-9\-_]*)",
                r"(?:[/?#].*)?$",
            )),
        },
        SharePattern {
            name: "legacy-id-query",
            regex: compile_static_regex(concat!(
                r"^https?://(?:docs|drive)\.google\.com/",
                r"(?:a/[a-zA-Z0-9\-.]+/)?",
                // The first `id` parameter wins
                r"(?:open|uc)\?(?:[^#]*?&)??id=",
                r"(?P<id>[a-zA-Z0-9\-_]*)",
                r"(?:[&#].*)?$",
            )),
        },
    ]
});

/// Parses a share URL into a [`Resource`].
///
/// Patterns are tried in order and the first match wins. The legacy
/// `?id=` shape yields a resource whose category is `Unknown`.
///
/// # Errors
///
/// Returns [`LocateError::ParseFailure`] when no pattern matches or when the
/// matching pattern captured an empty id or category.
///
/// # Example
///
/// ```
/// use drivelink::locator::{HostingCategory, parse_share_url};
///
/// let resource =
///     parse_share_url("https://drive.google.com/file/d/1AbC-d_E/view?usp=sharing").unwrap();
/// assert_eq!(resource.id(), "1AbC-d_E");
/// assert_eq!(resource.category(), HostingCategory::File);
/// ```
#[tracing::instrument(level = "debug")]
pub fn parse_share_url(share_url: &str) -> Result<Resource, LocateError> {
    let input = share_url.trim();

    let Some((pattern, caps)) = SHARE_PATTERNS
        .iter()
        .find_map(|pattern| pattern.regex.captures(input).map(|caps| (pattern, caps)))
    else {
        return Err(LocateError::unrecognized(share_url));
    };

    let id = caps
        .name("id")
        .map(|m| m.as_str())
        .filter(|id| !id.is_empty())
        .ok_or_else(|| LocateError::empty_capture(share_url, "id"))?;

    let category = match caps.name("category") {
        Some(token) => HostingCategory::from_path_token(token.as_str())
            .ok_or_else(|| LocateError::empty_capture(share_url, "category"))?,
        None => HostingCategory::Unknown,
    };

    tracing::debug!(pattern = pattern.name, id, %category, "Share URL matched");
    Resource::new(id, category)
}
