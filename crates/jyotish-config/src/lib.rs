use jyotish::chart::{ChartSettings, EphemerisBackend};
use jyotish::{AyanamsaSystem, DashaLevel, NodeMode};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Paths tried, in order, when no config path is given.
pub const SEARCH_PATHS: [&str; 2] = ["configs/jyotish.toml", "../../configs/jyotish.toml"];

#[derive(Debug, Clone, Default, Deserialize)]
struct ChartToml {
    #[serde(default)]
    ayanamsa: Option<String>,
    #[serde(default)]
    node_mode: Option<String>,
    #[serde(default)]
    dasha_depth: Option<String>,
    #[serde(default)]
    dasha_year_days: Option<f64>,
    #[serde(default)]
    ephemeris: Option<String>,
    #[serde(default)]
    ephemeris_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
struct RootConfigToml {
    #[serde(default)]
    chart: Option<ChartToml>,
}

/// Read `path`, or the first readable file in [`SEARCH_PATHS`].
///
/// Returns `None` when no path was given and none of the defaults exist.
pub fn read_config_text(path: Option<&Path>) -> anyhow::Result<Option<(PathBuf, String)>> {
    if let Some(path) = path {
        let text = fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read config {}: {e}", path.display()))?;
        return Ok(Some((path.to_path_buf(), text)));
    }
    for p in &SEARCH_PATHS {
        if let Ok(text) = fs::read_to_string(p) {
            return Ok(Some((PathBuf::from(p), text)));
        }
    }
    Ok(None)
}

fn parse_node_mode(value: &str) -> anyhow::Result<NodeMode> {
    match value.trim().to_lowercase().as_str() {
        "mean" => Ok(NodeMode::Mean),
        "true" => Ok(NodeMode::True),
        other => anyhow::bail!("chart.node_mode must be \"mean\" or \"true\", got {other:?}"),
    }
}

fn parse_backend(value: &str) -> anyhow::Result<EphemerisBackend> {
    match value.trim().to_lowercase().as_str() {
        "keplerian" | "builtin" => Ok(EphemerisBackend::Keplerian),
        "swisseph" | "swiss" => Ok(EphemerisBackend::Swisseph),
        other => anyhow::bail!("chart.ephemeris must be \"keplerian\" or \"swisseph\", got {other:?}"),
    }
}

/// Chart settings from TOML text. A missing `[chart]` table or missing keys
/// fall back to [`ChartSettings::default`].
pub fn parse_chart_settings(text: &str) -> anyhow::Result<ChartSettings> {
    let root: RootConfigToml = toml::from_str(text)
        .map_err(|e| anyhow::anyhow!("Failed to parse chart config: {e}"))?;
    let ChartToml {
        ayanamsa,
        node_mode,
        dasha_depth,
        dasha_year_days,
        ephemeris,
        ephemeris_path,
    } = root.chart.unwrap_or_default();

    let mut settings = ChartSettings::default();
    if let Some(name) = ayanamsa {
        settings.ayanamsa = name
            .parse::<AyanamsaSystem>()
            .map_err(|e| anyhow::anyhow!("chart.ayanamsa: {e}"))?;
    }
    if let Some(mode) = node_mode {
        settings.node_mode = parse_node_mode(&mode)?;
    }
    if let Some(depth) = dasha_depth {
        settings.dasha_depth = depth
            .parse::<DashaLevel>()
            .map_err(|e| anyhow::anyhow!("chart.dasha_depth: {e}"))?;
    }
    if let Some(days) = dasha_year_days {
        settings.dasha_year_days = days;
    }
    if let Some(backend) = ephemeris {
        settings.ephemeris = parse_backend(&backend)?;
    }
    settings.ephemeris_path = ephemeris_path;

    settings
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid [chart] config: {e}"))?;
    Ok(settings)
}

/// Load `[chart]` settings from `path`, or from the default search paths.
/// With no path and no file on the search paths the defaults are returned.
pub fn load_chart_settings(path: Option<&Path>) -> anyhow::Result<ChartSettings> {
    match read_config_text(path)? {
        Some((source, text)) => parse_chart_settings(&text)
            .map_err(|e| anyhow::anyhow!("{}: {e}", source.display())),
        None => Ok(ChartSettings::default()),
    }
}
