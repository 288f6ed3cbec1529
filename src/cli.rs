//! CLI argument definitions using clap derive macros.

use clap::Parser;

use drivelink::{DEFAULT_MAX_REDIRECTS, ExportFormat, HostingCategory, ResolverConfig};
use drivelink::config::{DEFAULT_DOCS_BASE_URL, DEFAULT_DRIVE_BASE_URL, DEFAULT_LOGIN_HOST};

/// Turn a Google Drive share link into a direct download URL.
///
/// Exit codes: 0 resolved, 1 invalid input or category guess failure,
/// 2 usage error, 3 not public (sign-in required), 4 not found.
#[derive(Parser, Debug)]
#[command(name = "drivelink")]
#[command(author, version, about)]
pub struct Args {
    /// Share URL copied from the Drive or Docs share dialog
    #[arg(required_unless_present = "id", conflicts_with = "id")]
    pub share_url: Option<String>,

    /// Document id, instead of a share URL
    #[arg(long)]
    pub id: Option<String>,

    /// Hosting category for --id (file, document, presentation, spreadsheet, drawing);
    /// guessed by probing when omitted
    #[arg(long, requires = "id", conflicts_with = "share_url")]
    pub category: Option<HostingCategory>,

    /// Export format for native documents (ignored for files)
    #[arg(short, long, default_value_t = ExportFormat::default())]
    pub format: ExportFormat,

    /// Maximum requests per redirect chain (1-100)
    #[arg(long, default_value_t = DEFAULT_MAX_REDIRECTS as u8, value_parser = clap::value_parser!(u8).range(1..=100))]
    pub max_redirects: u8,

    /// Host whose sign-in page marks a document as not public
    #[arg(long, default_value = DEFAULT_LOGIN_HOST)]
    pub login_host: String,

    /// Base URL for file downloads
    #[arg(long, default_value = DEFAULT_DRIVE_BASE_URL, hide = true)]
    pub drive_base_url: String,

    /// Base URL for document exports
    #[arg(long, default_value = DEFAULT_DOCS_BASE_URL, hide = true)]
    pub docs_base_url: String,

    /// Print the access URL without checking where it leads
    #[arg(long)]
    pub access_url_only: bool,

    /// Print the verdict as JSON
    #[arg(long)]
    pub json: bool,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Builds the library configuration from the parsed flags.
    pub fn resolver_config(&self) -> ResolverConfig {
        ResolverConfig {
            max_redirects: usize::from(self.max_redirects),
            login_host: self.login_host.clone(),
            drive_base_url: self.drive_base_url.clone(),
            docs_base_url: self.docs_base_url.clone(),
            default_format: self.format,
            ..ResolverConfig::default()
        }
    }

    /// Default log level from -v/-q; `RUST_LOG` overrides it.
    pub fn default_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "debug",
                _ => "trace",
            }
        }
    }
}
