use clap::Parser;
use staff_page::{DirectoryConfig, Harvest};
use std::error::Error;

#[derive(Parser, Debug)]
#[command(name = "staff-page")]
#[command(about = "Harvests staff records from a directory listing page")]
#[command(version)]
pub struct Args {
    /// Origin of the site to harvest, e.g. https://www.htl-salzburg.ac.at
    pub origin: Option<String>,

    /// Path to a JSON configuration file (replaces the origin argument)
    #[arg(long)]
    pub config: Option<String>,

    /// Path of the listing page on the origin
    #[arg(long)]
    pub listing_path: Option<String>,

    /// Path prefix a detail link must start with
    #[arg(long)]
    pub detail_prefix: Option<String>,

    /// Maximum number of detail links to follow
    #[arg(short, long)]
    pub max_links: Option<usize>,

    /// Number of concurrent detail-page fetches
    #[arg(short, long)]
    pub concurrency: Option<usize>,

    /// URL of the WebDriver instance
    #[arg(long)]
    pub webdriver_url: Option<String>,
}

/// Build a Harvest from the parsed arguments
///
/// A configuration file provides the base; individual flags override it.
pub fn build_harvest(args: &Args) -> Result<Harvest, Box<dyn Error>> {
    let mut harvest = match (&args.config, &args.origin) {
        (Some(path), _) => Harvest::from_config(DirectoryConfig::from_file(path)?),
        (None, Some(origin)) => Harvest::new(origin),
        (None, None) => return Err("either an origin or --config is required".into()),
    };

    if let Some(path) = &args.listing_path {
        harvest = harvest.with_listing_path(path);
    }
    if let Some(prefix) = &args.detail_prefix {
        harvest = harvest.with_detail_prefix(prefix);
    }
    if let Some(max_links) = args.max_links {
        harvest = harvest.with_max_links(max_links);
    }
    if let Some(concurrency) = args.concurrency {
        harvest = harvest.with_max_concurrency(concurrency);
    }
    if let Some(url) = &args.webdriver_url {
        harvest = harvest.with_webdriver_url(url);
    }

    Ok(harvest)
}
