//! CLI command handlers
//!
//! Each subcommand has its own module with handler functions. Location and
//! output options shared by several subcommands live here.

pub mod config;
pub mod directions;
pub mod list;
pub mod search;
pub mod serve;
pub mod show;

use crate::config::Config;
use crate::coord::Coordinates;
use crate::error::{Error, Result};
use crate::format::{available_formats, get_formatter, Listing};
use crate::geo::{get_ip_locator, resolve, ReferenceSource};
use crate::locale::Locale;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Find public toilets in Düsseldorf
#[derive(Parser)]
#[command(name = "toilet-finder")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List toilets, nearest first
    List(list::ListArgs),

    /// Search toilets by street, postal code, city or remark
    Search(search::SearchArgs),

    /// Show one toilet in detail
    Show(show::ShowArgs),

    /// Print a directions link to a toilet
    Directions(directions::DirectionsArgs),

    /// Start web server (foreground)
    Serve(serve::ServeArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

/// Run the CLI
pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    let default_level = match cli.command {
        Commands::Serve(_) => "info",
        _ => "warn",
    };
    init_logging(default_level);

    match cli.command {
        Commands::List(args) => list::run(args).await,
        Commands::Search(args) => search::run(args).await,
        Commands::Show(args) => show::run(args).await,
        Commands::Directions(args) => directions::run(args).await,
        Commands::Serve(args) => serve::run(args).await,
        Commands::Config(args) => config::run(args),
    }
}

/// Log to stderr; `RUST_LOG` overrides the default level
fn init_logging(default_level: &str) {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();
}

/// Where distances are measured from
#[derive(Args, Debug, Default)]
pub struct LocationArgs {
    /// Latitude of your position
    #[arg(long, requires = "lng", allow_hyphen_values = true)]
    pub lat: Option<f64>,

    /// Longitude of your position
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    pub lng: Option<f64>,

    /// Use current location (IP geolocation)
    #[arg(long, conflicts_with_all = ["lat", "lng"])]
    pub here: bool,

    /// Don't measure distances; keep dataset order
    #[arg(long, conflicts_with_all = ["lat", "lng", "here"])]
    pub no_reference: bool,
}

impl LocationArgs {
    /// Decide on the reference point
    ///
    /// Explicit coordinates win. `--here` (or `reference.use_device`) asks
    /// the IP locator and falls back to the configured default when the
    /// reading is unusable. Otherwise the configured default is used.
    pub async fn reference(&self, config: &Config) -> Result<Option<Coordinates>> {
        if self.no_reference {
            return Ok(None);
        }

        if let (Some(lat), Some(lng)) = (self.lat, self.lng) {
            let point = Coordinates::new(lat, lng);
            point.validate()?;
            return Ok(Some(point));
        }

        if self.here || config.reference.use_device {
            let reading = get_ip_locator().locate().await;
            if let Ok(location) = &reading {
                eprintln!("IP location: {}", location.display_name);
            }
            let resolved = resolve(reading.map(|l| l.point), &config.reference);
            if resolved.source == ReferenceSource::Fallback {
                if let Some(notice) = &resolved.notice {
                    eprintln!("{}; using default location", notice);
                }
            }
            return Ok(Some(resolved.point));
        }

        Ok(Some(config.reference.default_point()))
    }
}

/// Output options
#[derive(Args, Debug, Default)]
pub struct OutputArgs {
    /// Output format
    #[arg(long, short = 'f')]
    pub format: Option<String>,

    /// Display language (de, ko, en)
    #[arg(long, short = 'l')]
    pub locale: Option<String>,

    /// Write output to file
    #[arg(long, short = 'o')]
    pub output: Option<String>,

    /// List available formats
    #[arg(short = 'F', long = "list-formats")]
    pub list_formats: bool,
}

impl OutputArgs {
    /// Locale from the command line, else from config
    pub fn locale(&self, config: &Config) -> Result<Locale> {
        match &self.locale {
            Some(code) => code.parse().map_err(Error::Config),
            None => Ok(config.display.locale),
        }
    }

    /// Print available formats if asked to; returns true if it did
    pub fn handle_list_formats(&self) -> bool {
        if self.list_formats {
            println!("Available output formats:");
            for format in available_formats() {
                println!("  {:6} - {}", format.name, format.description);
            }
        }
        self.list_formats
    }

    /// Format the listing and print or save it
    pub fn emit(&self, listing: &Listing<'_>, config: &Config) -> Result<()> {
        let format = self.format.as_deref().unwrap_or(&config.display.format);
        let formatter = get_formatter(format)
            .ok_or_else(|| Error::Config(format!("Unknown format: {}", format)))?;
        let output = formatter.format(listing, config)?;

        if let Some(path) = &self.output {
            std::fs::write(path, &output)?;
            eprintln!("Output written to {}", path);
        } else {
            println!("{}", output);
        }
        Ok(())
    }
}
