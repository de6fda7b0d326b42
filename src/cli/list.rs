//! List command handler
//!
//! Prints every toilet, nearest first when a reference point is known.

use crate::cli::{LocationArgs, OutputArgs};
use crate::config::Config;
use crate::dataset::DatasetLoader;
use crate::error::Result;
use crate::format::Listing;
use clap::Args;

/// List command arguments
#[derive(Args)]
pub struct ListArgs {
    #[command(flatten)]
    pub location: LocationArgs,

    #[command(flatten)]
    pub output: OutputArgs,

    /// Show at most N toilets
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,
}

/// Run the list command
pub async fn run(args: ListArgs) -> Result<()> {
    if args.output.handle_list_formats() {
        return Ok(());
    }

    let config = Config::load()?;
    let locale = args.output.locale(&config)?;
    let reference = args.location.reference(&config).await?;

    let loader = DatasetLoader::new(config.dataset_source(), locale);
    let snapshot = loader.load(reference).await?;

    let listing = Listing::from_snapshot(&snapshot).truncate(args.limit);
    args.output.emit(&listing, &config)
}
