//! Directions command handler

use crate::cli::LocationArgs;
use crate::config::Config;
use crate::dataset::DatasetLoader;
use crate::error::{Error, Result};
use crate::navigation::TravelMode;
use clap::Args;

/// Directions command arguments
#[derive(Args)]
pub struct DirectionsArgs {
    /// Toilet id
    pub id: String,

    /// Travel mode: walking, transit or driving
    #[arg(long, short = 'm')]
    pub mode: Option<String>,

    // Start point; --no-reference leaves it to the maps service
    #[command(flatten)]
    pub location: LocationArgs,
}

/// Run the directions command
pub async fn run(args: DirectionsArgs) -> Result<()> {
    let config = Config::load()?;

    let mode = args
        .mode
        .as_deref()
        .map(str::parse::<TravelMode>)
        .transpose()
        .map_err(Error::Config)?;

    let origin = args.location.reference(&config).await?;

    // Ids don't depend on the reference point, so load unranked
    let loader = DatasetLoader::new(config.dataset_source(), config.display.locale);
    let snapshot = loader.load(None).await?;

    let record = snapshot
        .get(&args.id)
        .ok_or_else(|| Error::NotFound(format!("No toilet with id {}", args.id)))?;

    println!("{}", config.directions_url(origin, record.coordinates(), mode));
    Ok(())
}
