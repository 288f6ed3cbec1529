//! Drivelink Library
//!
//! Turns the share link of a Google Drive or Docs document into a direct
//! download URL, and tells apart documents that are public, documents that
//! require signing in, and links that lead nowhere.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`locator`] - Share URL parsing, category guessing, access URL templates
//! - [`resolver`] - Redirect walking and verdict classification
//! - [`config`] - Endpoints, limits, and HTTP client settings
//! - [`finder`] - The composition callers normally use
//!
//! # Example
//!
//! ```no_run
//! use drivelink::{AccessOutcome, DriveLinkFinder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let finder = DriveLinkFinder::new()?;
//! let outcome = finder
//!     .resolve("https://drive.google.com/file/d/ABC123/view?usp=sharing", None)
//!     .await?;
//! if let AccessOutcome::Resolved(resolved) = outcome {
//!     println!("{}", resolved.url);
//! }
//! # Ok(())
//! # }
//! ```

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod finder;
pub mod locator;
pub mod resolver;
#[cfg(test)]
pub mod test_support;
pub(crate) mod user_agent;

// Re-export commonly used types
pub use config::{ConfigError, DEFAULT_MAX_REDIRECTS, ResolverConfig};
pub use finder::DriveLinkFinder;
pub use locator::{ExportFormat, HostingCategory, LocateError, Resource, ResourceLocator};
pub use resolver::{AccessOutcome, AccessResolver, NotFoundReason, ResolvedUrl};
