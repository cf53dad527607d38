//! pagesplice command line entry point.
//!
//! Fetches a page once, rewrites its relative links against the base URL
//! and prints the two document halves around the placeholder. Logging goes
//! to stderr; the document goes to stdout.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use pagesplice_client::fetch::{FetchClient, FetchConfig};
use pagesplice_client::grabber::{FetchRequest, PageGrabber};
use pagesplice_client::placeholder::SplitDocument;
use pagesplice_core::{AppConfig, MemoryStore};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "pagesplice",
    about = "Fetch a page, absolutize its links and split it at a placeholder"
)]
struct Args {
    /// URL to fetch the page from.
    url: String,

    /// Placeholder name to split at, e.g. "guestbook".
    #[arg(short, long)]
    placeholder: String,

    /// Base URL prefixed to relative links; defaults to the fetch URL's
    /// origin.
    #[arg(short, long)]
    base_url: Option<String>,

    /// Extra markup inserted after the opening head tag.
    #[arg(long)]
    header: Option<String>,

    /// Cache duration in seconds; defaults to the configured value.
    #[arg(long)]
    cache_secs: Option<u64>,

    /// Print the split document as JSON instead of the two halves.
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = AppConfig::load()?;

    let base_url = match args.base_url {
        Some(base) => base,
        None => origin_of(&args.url)?,
    };

    let fetcher = FetchClient::new(FetchConfig::from_app_config(&config))?;
    let store = Arc::new(MemoryStore::new());
    let mut grabber = PageGrabber::new(Arc::new(fetcher), store);

    let request = FetchRequest {
        placeholder: args.placeholder,
        fetch_from_url: args.url,
        base_url,
        header: args.header,
        cache_duration: Duration::from_secs(args.cache_secs.unwrap_or(config.cache_secs)),
    };

    grabber.fetch_content(&request)?;

    if args.json {
        let split = SplitDocument {
            html_before: grabber.html_before()?.to_string(),
            html_after: grabber.html_after()?.to_string(),
            parameters: grabber.placeholder_parameters()?.map(str::to_string),
        };
        println!("{}", serde_json::to_string_pretty(&split)?);
        return Ok(());
    }

    if let Some(parameters) = grabber.placeholder_parameters()? {
        tracing::info!(parameters, "placeholder carries parameters");
    }

    println!("{}", grabber.html_before()?);
    println!("<!-- pagesplice: spliced content goes here -->");
    println!("{}", grabber.html_after()?);

    Ok(())
}

fn origin_of(url: &str) -> Result<String> {
    let parsed = url::Url::parse(url).with_context(|| format!("cannot derive a base URL from '{url}'"))?;
    Ok(parsed.origin().ascii_serialization())
}
