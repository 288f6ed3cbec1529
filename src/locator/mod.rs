//! Share URL parsing, hosting category guessing, and access URL construction.
//!
//! # Architecture
//!
//! - [`parse_share_url`] - Ordered pattern table, first match wins
//! - [`Resource`] - Identifier plus [`HostingCategory`]
//! - [`AccessTemplates`] - Per-category access URL templates
//! - [`ResourceLocator`] - Ties the above together and probes unknown categories
//!
//! # Example
//!
//! ```
//! use drivelink::locator::{ExportFormat, HostingCategory, Resource};
//! use drivelink::ResolverConfig;
//!
//! let templates = ResolverConfig::default().templates();
//! let resource = Resource::new("ABC123", HostingCategory::Document).unwrap();
//! assert_eq!(
//!     templates.build(&resource, ExportFormat::Docx).unwrap(),
//!     "https://docs.google.com/document/d/ABC123/export?format=docx"
//! );
//! ```

mod error;
mod patterns;
mod resource;
mod templates;

pub use error::{LocateError, UnknownNameError};
pub use patterns::parse_share_url;
pub use resource::{ExportFormat, HostingCategory, Resource, is_valid_id};
pub use templates::AccessTemplates;

use reqwest::Client;
use tracing::{debug, info, warn};

use crate::config::ResolverConfig;

/// Maps share URLs or explicit `(id, category)` pairs to access URLs.
///
/// Holds only read-only tables and an HTTP client handle used for category
/// probing; it is cheap to clone and safe to share.
#[derive(Debug, Clone)]
pub struct ResourceLocator {
    client: Client,
    templates: AccessTemplates,
    probe_order: Vec<HostingCategory>,
    default_format: ExportFormat,
}

impl ResourceLocator {
    /// Creates a locator using templates, probe order, and default format from `config`.
    ///
    /// `client` should not follow redirects, so that a sign-in redirect never
    /// counts as a successful probe. `Unknown` entries in the probe order are
    /// dropped.
    #[must_use]
    pub fn new(client: Client, config: &ResolverConfig) -> Self {
        Self {
            client,
            templates: config.templates(),
            probe_order: config
                .probe_order
                .iter()
                .copied()
                .filter(|category| category.is_known())
                .collect(),
            default_format: config.default_format,
        }
    }

    /// Categories probed, in order, when guessing.
    #[must_use]
    pub fn probe_order(&self) -> &[HostingCategory] {
        &self.probe_order
    }

    /// Export format used when the caller does not pick one.
    #[must_use]
    pub fn default_format(&self) -> ExportFormat {
        self.default_format
    }

    /// Parses a share URL into a resource whose category may be `Unknown`.
    ///
    /// # Errors
    ///
    /// Returns [`LocateError::ParseFailure`] for unrecognized input.
    pub fn parse(&self, share_url: &str) -> Result<Resource, LocateError> {
        parse_share_url(share_url)
    }

    /// Builds the access URL for a resource with a concrete category.
    ///
    /// `format` defaults to the configured default and is ignored for files.
    ///
    /// # Errors
    ///
    /// Returns [`LocateError::InvalidCategory`] if the category is still `Unknown`.
    pub fn build_access_url(
        &self,
        resource: &Resource,
        format: Option<ExportFormat>,
    ) -> Result<String, LocateError> {
        self.templates
            .build(resource, format.unwrap_or(self.default_format))
    }

    /// Resolves an `Unknown` category by probing each configured category.
    ///
    /// Resources that already carry a concrete category are returned
    /// unchanged without any request. Otherwise the candidate access URL of
    /// each category is requested in probe order and the first category
    /// answering with a 2xx status is adopted. If several categories would
    /// succeed, the earliest in the probe order wins.
    ///
    /// # Errors
    ///
    /// Returns [`LocateError::GuessFailure`] when no probe succeeds.
    #[tracing::instrument(skip(self, resource), fields(id = resource.id()))]
    pub async fn resolve_category(&self, resource: Resource) -> Result<Resource, LocateError> {
        if !resource.needs_category() {
            return Ok(resource);
        }

        let mut tried = Vec::with_capacity(self.probe_order.len());
        for &category in &self.probe_order {
            tried.push(category);
            let candidate = Resource::new(resource.id(), category)?;
            let url = self.templates.build(&candidate, self.default_format)?;

            if self.probe(&url).await {
                info!(%category, url = %url, "Hosting category guessed");
                return resource.assign_category(category);
            }
        }

        Err(LocateError::guess_failed(resource.id(), &tried))
    }

    /// Issues one GET without following redirects and reports whether the
    /// status was 2xx. The body is never read.
    async fn probe(&self, url: &str) -> bool {
        match self.client.get(url).send().await {
            Ok(response) => {
                let status = response.status();
                debug!(url = %url, status = status.as_u16(), "Category probe answered");
                status.is_success()
            }
            Err(error) => {
                warn!(url = %url, error = %error, "Category probe failed");
                false
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::resolver::build_http_client;
    use crate::test_support::socket_guard::start_mock_server_or_skip;
    use wiremock::matchers::{method, path, path_regex};
    use wiremock::{Mock, ResponseTemplate};

    fn locator_for(config: &ResolverConfig) -> ResourceLocator {
        ResourceLocator::new(build_http_client(config).unwrap(), config)
    }

    #[test]
    fn test_build_access_url_uses_default_format() {
        let locator = locator_for(&ResolverConfig::default());
        let resource = Resource::new("abc", HostingCategory::Spreadsheet).unwrap();
        assert_eq!(
            locator.build_access_url(&resource, None).unwrap(),
            "https://docs.google.com/spreadsheets/d/abc/export?format=pdf"
        );
        assert_eq!(
            locator
                .build_access_url(&resource, Some(ExportFormat::Csv))
                .unwrap(),
            "https://docs.google.com/spreadsheets/d/abc/export?format=csv"
        );
    }

    #[test]
    fn test_build_access_url_rejects_unknown_category() {
        let locator = locator_for(&ResolverConfig::default());
        let resource = locator
            .parse("https://drive.google.com/open?id=abc")
            .unwrap();
        let err = locator.build_access_url(&resource, None).unwrap_err();
        assert!(matches!(err, LocateError::InvalidCategory { .. }));
    }

    #[tokio::test]
    async fn test_resolve_category_keeps_known_category_without_probing() {
        let Some(mock_server) = start_mock_server_or_skip().await else {
            return;
        };
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let config = ResolverConfig::with_base_urls(mock_server.uri(), mock_server.uri());
        let locator = locator_for(&config);
        let resource = Resource::new("abc", HostingCategory::File).unwrap();

        let resolved = locator.resolve_category(resource.clone()).await.unwrap();
        assert_eq!(resolved, resource);
    }

    #[tokio::test]
    async fn test_resolve_category_first_success_in_probe_order_wins() {
        let Some(mock_server) = start_mock_server_or_skip().await else {
            return;
        };
        // Both presentation and file would succeed; presentation is probed first.
        Mock::given(method("GET"))
            .and(path_regex(r"^/(presentation/d/abc/export/pdf|uc)$"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let mut config = ResolverConfig::with_base_urls(mock_server.uri(), mock_server.uri());
        config.probe_order = vec![
            HostingCategory::Document,
            HostingCategory::Presentation,
            HostingCategory::File,
        ];
        let locator = locator_for(&config);
        let resource = Resource::new("abc", HostingCategory::Unknown).unwrap();

        let resolved = locator.resolve_category(resource).await.unwrap();
        assert_eq!(resolved.category(), HostingCategory::Presentation);
    }

    #[tokio::test]
    async fn test_resolve_category_redirect_is_not_success() {
        let Some(mock_server) = start_mock_server_or_skip().await else {
            return;
        };
        Mock::given(method("GET"))
            .and(path("/document/d/abc/export"))
            .respond_with(
                ResponseTemplate::new(302)
                    .insert_header("Location", "https://accounts.google.com/ServiceLogin"),
            )
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let mut config = ResolverConfig::with_base_urls(mock_server.uri(), mock_server.uri());
        config.probe_order = vec![HostingCategory::Document];
        let locator = locator_for(&config);
        let resource = Resource::new("abc", HostingCategory::Unknown).unwrap();

        let err = locator.resolve_category(resource).await.unwrap_err();
        match err {
            LocateError::GuessFailure { id, tried } => {
                assert_eq!(id, "abc");
                assert_eq!(tried, "document");
            }
            other => panic!("expected GuessFailure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_resolve_category_skips_unknown_in_probe_order() {
        let Some(mock_server) = start_mock_server_or_skip().await else {
            return;
        };
        Mock::given(method("GET"))
            .and(path("/uc"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&mock_server)
            .await;

        let mut config = ResolverConfig::with_base_urls(mock_server.uri(), mock_server.uri());
        config.probe_order = vec![HostingCategory::Unknown, HostingCategory::File];
        let locator = locator_for(&config);
        assert_eq!(locator.probe_order(), &[HostingCategory::File]);

        let resource = Resource::new("abc", HostingCategory::Unknown).unwrap();
        let resolved = locator.resolve_category(resource).await.unwrap();
        assert_eq!(resolved.category(), HostingCategory::File);
    }

    #[tokio::test]
    async fn test_resolve_category_transport_errors_count_as_failures() {
        let config = ResolverConfig::with_base_urls("http://127.0.0.1:9", "http://127.0.0.1:9");
        let locator = locator_for(&config);
        let resource = Resource::new("abc", HostingCategory::Unknown).unwrap();

        let err = locator.resolve_category(resource).await.unwrap_err();
        assert!(matches!(err, LocateError::GuessFailure { .. }));
    }
}
