//! CLI entry point for drivelink.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use drivelink::{AccessOutcome, DriveLinkFinder, HostingCategory, Resource};
use tracing::debug;

mod cli;

use cli::Args;

/// Process outcome mapped to the documented exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ProcessExit {
    Resolved,
    Failure,
    NotPublic,
    NotFound,
}

impl ProcessExit {
    fn code(self) -> u8 {
        match self {
            Self::Resolved => 0,
            Self::Failure => 1,
            Self::NotPublic => 3,
            Self::NotFound => 4,
        }
    }
}

impl From<&AccessOutcome> for ProcessExit {
    fn from(outcome: &AccessOutcome) -> Self {
        match outcome {
            AccessOutcome::Resolved(_) => Self::Resolved,
            AccessOutcome::NotPublic { .. } => Self::NotPublic,
            AccessOutcome::NotFound(_) => Self::NotFound,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (warn)
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(args.default_log_level()));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();

    debug!(?args, "CLI arguments parsed");

    match run(&args).await {
        Ok(exit) => ExitCode::from(exit.code()),
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::from(ProcessExit::Failure.code())
        }
    }
}

async fn run(args: &Args) -> Result<ProcessExit> {
    let config = args.resolver_config();
    let finder = DriveLinkFinder::with_config(&config).context("Invalid resolver settings")?;

    let resource = match (&args.share_url, &args.id) {
        (Some(share_url), _) => finder.locator().parse(share_url)?,
        (None, Some(id)) => {
            Resource::new(id.as_str(), args.category.unwrap_or(HostingCategory::Unknown))?
        }
        (None, None) => anyhow::bail!("Either a share URL or --id is required"),
    };

    if args.access_url_only {
        let resource = finder.locator().resolve_category(resource).await?;
        let access_url = finder
            .locator()
            .build_access_url(&resource, Some(args.format))?;
        println!("{access_url}");
        return Ok(ProcessExit::Resolved);
    }

    let outcome = finder.resolve_resource(resource, Some(args.format)).await?;
    print_outcome(&outcome, args)?;
    Ok(ProcessExit::from(&outcome))
}

fn print_outcome(outcome: &AccessOutcome, args: &Args) -> Result<()> {
    if args.json {
        println!("{}", serde_json::to_string_pretty(outcome)?);
        return Ok(());
    }

    match outcome {
        AccessOutcome::Resolved(resolved) => println!("{}", resolved.url),
        AccessOutcome::NotPublic { login_url } => {
            if !args.quiet {
                eprintln!("Document is not public: access redirects to sign-in ({login_url})");
            }
        }
        AccessOutcome::NotFound(reason) => {
            if !args.quiet {
                eprintln!("Document not found: {reason}");
            }
        }
    }
    Ok(())
}
