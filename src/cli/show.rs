//! Show command handler
//!
//! Detail view for one toilet: address, remark, distance and directions
//! links for every travel mode.

use crate::cli::LocationArgs;
use crate::config::Config;
use crate::coord::Coordinates;
use crate::dataset::{DatasetLoader, ToiletRecord};
use crate::error::{Error, Result};
use crate::locale::Locale;
use crate::navigation::available_modes;
use clap::Args;

/// Show command arguments
#[derive(Args)]
pub struct ShowArgs {
    /// Toilet id (as printed by `list` or `search`)
    pub id: String,

    #[command(flatten)]
    pub location: LocationArgs,

    /// Display language (de, ko, en)
    #[arg(long, short = 'l')]
    pub locale: Option<String>,

    /// Print the record as JSON
    #[arg(long)]
    pub json: bool,
}

/// Run the show command
pub async fn run(args: ShowArgs) -> Result<()> {
    let config = Config::load()?;
    let locale = match &args.locale {
        Some(code) => code.parse::<Locale>().map_err(Error::Config)?,
        None => config.display.locale,
    };
    let reference = args.location.reference(&config).await?;

    let loader = DatasetLoader::new(config.dataset_source(), locale);
    let snapshot = loader.load(reference).await?;

    let record = snapshot
        .get(&args.id)
        .ok_or_else(|| Error::NotFound(format!("No toilet with id {}", args.id)))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(record)?);
    } else {
        print!("{}", render_detail(record, snapshot.reference, locale, &config));
    }
    Ok(())
}

/// Multi-line detail text
pub fn render_detail(
    record: &ToiletRecord,
    origin: Option<Coordinates>,
    locale: Locale,
    config: &Config,
) -> String {
    let mut out = String::new();

    out.push_str(&format!("{}\n", record.street_line()));
    out.push_str(&format!("{}\n", record.city_line()));
    out.push_str(&format!("({:.6}, {:.6})\n", record.latitude, record.longitude));

    if let (Some(distance), Some(walking)) = (record.distance_label(), record.walking_time()) {
        out.push_str(&format!("{} · {}\n", distance, walking));
    }

    if let Some(note) = record.note_for(locale) {
        out.push_str(&format!("\n{}\n", note));
    }

    out.push_str("\nDirections:\n");
    for mode in available_modes() {
        out.push_str(&format!(
            "  {:8} {}\n",
            mode.token(),
            config.directions_url(origin, record.coordinates(), Some(mode))
        ));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Proximity;

    fn record() -> ToiletRecord {
        ToiletRecord {
            id: "0".to_string(),
            latitude: 51.2254,
            longitude: 6.7722,
            street: "Burgplatz".to_string(),
            house_number: "1".to_string(),
            postal_code: "40213".to_string(),
            city: "Düsseldorf".to_string(),
            note: Some("barrierefrei".to_string()),
            note_ko: Some("휠체어 접근 가능".to_string()),
            proximity: Some(Proximity::new(1000.0, Locale::Ko)),
        }
    }

    #[test]
    fn test_render_detail() {
        let origin = Some(Coordinates::new(51.2277, 6.7735));
        let out = render_detail(&record(), origin, Locale::Ko, &Config::default());

        assert!(out.starts_with("Burgplatz 1\n40213 Düsseldorf\n"));
        assert!(out.contains("1.0km · 도보 15분"));
        assert!(out.contains("휠체어 접근 가능"));
        assert!(out.contains("travelmode=walking"));
        assert!(out.contains("travelmode=transit"));
        assert!(out.contains("travelmode=driving"));
        assert!(out.contains("origin=51.2277%2C6.7735"));
    }

    #[test]
    fn test_render_detail_without_distance() {
        let mut r = record();
        r.proximity = None;
        let out = render_detail(&r, None, Locale::De, &Config::default());

        assert!(!out.contains(" · "));
        assert!(out.contains("barrierefrei"));
        assert!(!out.contains("origin="));
    }
}
