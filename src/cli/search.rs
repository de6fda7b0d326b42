//! Search command handler

use crate::cli::{LocationArgs, OutputArgs};
use crate::config::Config;
use crate::dataset::{search, DatasetLoader};
use crate::error::Result;
use crate::format::Listing;
use clap::Args;

/// Search command arguments
#[derive(Args)]
pub struct SearchArgs {
    /// Text to look for (street, postal code, city or remark)
    #[arg(default_value = "")]
    pub query: String,

    #[command(flatten)]
    pub location: LocationArgs,

    #[command(flatten)]
    pub output: OutputArgs,

    /// Show at most N matches
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,
}

/// Run the search command
pub async fn run(args: SearchArgs) -> Result<()> {
    if args.output.handle_list_formats() {
        return Ok(());
    }

    if args.query.trim().is_empty() {
        eprintln!("Enter a street, postal code or place to search for");
        return Ok(());
    }

    let config = Config::load()?;
    let locale = args.output.locale(&config)?;
    let reference = args.location.reference(&config).await?;

    let loader = DatasetLoader::new(config.dataset_source(), locale);
    let snapshot = loader.load(reference).await?;

    let matches = search(&snapshot.records, &args.query);
    if matches.is_empty() {
        eprintln!("No toilets match '{}'", args.query);
        return Ok(());
    }

    let listing = Listing::new(matches, snapshot.reference, locale).truncate(args.limit);
    args.output.emit(&listing, &config)
}
