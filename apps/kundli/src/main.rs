use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::Parser;
use jyotish::chart::ChartAssembler;
use jyotish::time::{parse_date, parse_time};
use jyotish::vedic::{manglik, DashaLevel, DashaPeriod, ManglikReport};
use jyotish::{BirthInput, Chart};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Sidereal birth chart as JSON")]
struct Args {
    /// Birth date, YYYY-MM-DD (local civil date).
    #[arg(long)]
    date: String,

    /// Birth time, HH:MM or HH:MM:SS (local civil time).
    #[arg(long)]
    time: String,

    /// Latitude in degrees, north positive.
    #[arg(long, allow_hyphen_values = true)]
    lat: f64,

    /// Longitude in degrees, east positive.
    #[arg(long, allow_hyphen_values = true)]
    lon: f64,

    /// UTC offset in hours at the birth place, e.g. 5.5 or -3.5.
    #[arg(long, allow_hyphen_values = true)]
    offset: f64,

    /// Settings file (default: configs/jyotish.toml if present).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Dasha depth override: mahadasha, antardasha or pratyantardasha.
    #[arg(long)]
    depth: Option<String>,

    /// Also report the dasha chain running at this UTC instant (RFC 3339).
    #[arg(long)]
    at: Option<DateTime<Utc>>,

    /// Pretty-print the JSON.
    #[arg(long)]
    pretty: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Report {
    chart: Chart,
    manglik: ManglikReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    current_dasha: Option<Vec<DashaPeriod>>,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let mut settings = jyotish_config::load_chart_settings(args.config.as_deref())?;
    if let Some(depth) = &args.depth {
        settings.dasha_depth = depth
            .parse::<DashaLevel>()
            .with_context(|| format!("Invalid --depth {depth}"))?;
    }
    log::info!("settings: {settings:?}");

    let input = BirthInput::new(
        parse_date(&args.date).context("Invalid --date")?,
        parse_time(&args.time).context("Invalid --time")?,
        args.lat,
        args.lon,
        args.offset,
    )
    .context("Invalid birth record")?;

    let assembler = ChartAssembler::new(settings).context("Failed to set up ephemeris")?;
    let chart = assembler.assemble(&input).context("Failed to compute chart")?;
    let manglik = manglik(&chart)?;

    let current_dasha = match args.at {
        Some(when) => {
            let depth = assembler.settings().dasha_depth.max(DashaLevel::Antardasha);
            Some(assembler.dasha(&chart)?.periods_at(when, depth))
        }
        None => None,
    };

    let report = Report {
        chart,
        manglik,
        current_dasha,
    };
    let json = if args.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{json}");
    Ok(())
}
