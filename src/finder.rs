//! End-to-end composition: share URL in, access verdict out.

use tracing::{debug, info};

use crate::config::{ConfigError, ResolverConfig};
use crate::locator::{ExportFormat, LocateError, Resource, ResourceLocator};
use crate::resolver::{AccessOutcome, AccessResolver, build_http_client};

/// Parses share URLs, guesses missing categories, and walks the resulting
/// access URL to a verdict.
///
/// Both components share one HTTP client. Nothing is cached: every call
/// re-probes and re-walks, because sharing settings can change at any time.
#[derive(Debug, Clone)]
pub struct DriveLinkFinder {
    locator: ResourceLocator,
    resolver: AccessResolver,
}

impl DriveLinkFinder {
    /// Creates a finder for the public provider endpoints.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the HTTP client cannot be constructed.
    pub fn new() -> Result<Self, ConfigError> {
        Self::with_config(&ResolverConfig::default())
    }

    /// Creates a finder from an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `config` is invalid or the HTTP client cannot
    /// be constructed.
    pub fn with_config(config: &ResolverConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let client = build_http_client(config)?;
        debug!(
            max_redirects = config.max_redirects,
            login_host = %config.login_host,
            "Finder configured"
        );
        Ok(Self {
            locator: ResourceLocator::new(client.clone(), config),
            resolver: AccessResolver::from_config(client, config),
        })
    }

    /// The share URL parser and category guesser.
    #[must_use]
    pub fn locator(&self) -> &ResourceLocator {
        &self.locator
    }

    /// The redirect walker.
    #[must_use]
    pub fn resolver(&self) -> &AccessResolver {
        &self.resolver
    }

    /// Computes the access URL for a share URL without walking redirects.
    ///
    /// Probes the provider if the share URL does not name its category.
    ///
    /// # Errors
    ///
    /// Returns [`LocateError::ParseFailure`] or [`LocateError::GuessFailure`].
    pub async fn access_url(
        &self,
        share_url: &str,
        format: Option<ExportFormat>,
    ) -> Result<String, LocateError> {
        let resource = self.locator.parse(share_url)?;
        let resource = self.locator.resolve_category(resource).await?;
        self.locator.build_access_url(&resource, format)
    }

    /// Resolves a share URL to a verdict.
    ///
    /// # Errors
    ///
    /// Returns [`LocateError`] when the share URL cannot be parsed or its
    /// category cannot be guessed. Not-public and not-found verdicts are
    /// returned as [`AccessOutcome`] values, not errors.
    #[tracing::instrument(skip(self))]
    pub async fn resolve(
        &self,
        share_url: &str,
        format: Option<ExportFormat>,
    ) -> Result<AccessOutcome, LocateError> {
        let resource = self.locator.parse(share_url)?;
        self.resolve_resource(resource, format).await
    }

    /// Resolves an explicit resource, guessing its category first if needed.
    ///
    /// # Errors
    ///
    /// Returns [`LocateError::GuessFailure`] when an `Unknown` category cannot
    /// be guessed.
    #[tracing::instrument(skip(self, resource), fields(id = resource.id(), category = %resource.category()))]
    pub async fn resolve_resource(
        &self,
        resource: Resource,
        format: Option<ExportFormat>,
    ) -> Result<AccessOutcome, LocateError> {
        let resource = self.locator.resolve_category(resource).await?;
        let access_url = self.locator.build_access_url(&resource, format)?;
        info!(url = %access_url, category = %resource.category(), "Resolving access URL");
        Ok(self.resolver.resolve(&access_url).await)
    }
}
