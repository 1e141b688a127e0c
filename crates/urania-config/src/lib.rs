use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use urania::{AspectOrbs, ChartSettings, HouseSystem};

/// Environment variable naming a config file; overrides the default probe.
pub const CONFIG_ENV: &str = "URANIA_CONFIG";

/// Probed in order when no path is given, from the repo root or from a crate dir.
pub const DEFAULT_CONFIG_PATHS: [&str; 2] = ["configs/urania.toml", "../../configs/urania.toml"];

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct OrbsToml {
    conjunction: Option<f64>,
    sextile: Option<f64>,
    square: Option<f64>,
    trine: Option<f64>,
    opposition: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ChartToml {
    #[serde(default)]
    house_system: Option<String>,
    #[serde(default)]
    orbs: Option<OrbsToml>,
}

#[derive(Debug, Clone, Deserialize)]
struct RootConfigToml {
    #[serde(default)]
    chart: Option<ChartToml>,
}

/// Reads the config text and reports where it came from.
///
/// An explicit path (argument, then `URANIA_CONFIG`) must exist. Without one,
/// the default locations are probed and `None` means none of them exist.
pub fn read_config_toml_text(explicit: Option<&Path>) -> anyhow::Result<Option<(PathBuf, String)>> {
    let explicit = explicit
        .map(Path::to_path_buf)
        .or_else(|| env::var_os(CONFIG_ENV).map(PathBuf::from));
    read_from(explicit)
}

fn read_from(explicit: Option<PathBuf>) -> anyhow::Result<Option<(PathBuf, String)>> {
    if let Some(path) = explicit {
        let text = fs::read_to_string(&path)
            .map_err(|e| anyhow::anyhow!("Could not read config {}: {e}", path.display()))?;
        return Ok(Some((path, text)));
    }
    for p in &DEFAULT_CONFIG_PATHS {
        if let Ok(text) = fs::read_to_string(p) {
            return Ok(Some((PathBuf::from(p), text)));
        }
    }
    Ok(None)
}

/// Parses the `[chart]` table; every key is optional.
pub fn parse_chart_settings(text: &str) -> anyhow::Result<ChartSettings> {
    let root: RootConfigToml = toml::from_str(text)
        .map_err(|e| anyhow::anyhow!("Failed to parse urania.toml: {e}"))?;
    let ChartToml { house_system, orbs } = root.chart.unwrap_or_default();

    let house_system = match house_system {
        Some(name) => name
            .parse::<HouseSystem>()
            .map_err(|e| anyhow::anyhow!("chart.house_system: {e}"))?,
        None => HouseSystem::default(),
    };

    let OrbsToml {
        conjunction,
        sextile,
        square,
        trine,
        opposition,
    } = orbs.unwrap_or_default();
    let defaults = AspectOrbs::default();
    let orbs = AspectOrbs {
        conjunction: conjunction.unwrap_or(defaults.conjunction),
        sextile: sextile.unwrap_or(defaults.sextile),
        square: square.unwrap_or(defaults.square),
        trine: trine.unwrap_or(defaults.trine),
        opposition: opposition.unwrap_or(defaults.opposition),
    };

    let settings = ChartSettings { house_system, orbs };
    settings
        .validate()
        .map_err(|e| anyhow::anyhow!("chart.orbs: {e}"))?;
    Ok(settings)
}

/// Resolves chart settings, falling back to defaults when no config file exists.
pub fn load_chart_settings(explicit: Option<&Path>) -> anyhow::Result<ChartSettings> {
    match read_config_toml_text(explicit)? {
        Some((path, text)) => {
            let settings = parse_chart_settings(&text)?;
            log::info!(
                "loaded chart settings from {} ({} houses)",
                path.display(),
                settings.house_system
            );
            Ok(settings)
        }
        None => {
            log::info!("no urania.toml found in {:?}; using defaults", DEFAULT_CONFIG_PATHS);
            Ok(ChartSettings::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_text_gives_defaults() {
        assert_eq!(parse_chart_settings("").unwrap(), ChartSettings::default());
    }

    #[test]
    fn partial_orbs_keep_the_rest() {
        let settings = parse_chart_settings(
            r#"
            [chart]
            house_system = "placidus"

            [chart.orbs]
            conjunction = 10.0
            sextile = 4.5
            "#,
        )
        .unwrap();
        assert_eq!(settings.house_system, HouseSystem::Placidus);
        assert_eq!(settings.orbs.conjunction, 10.0);
        assert_eq!(settings.orbs.sextile, 4.5);
        assert_eq!(settings.orbs.square, 7.0);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(parse_chart_settings("[chart]\nhouse_system = \"koch\"\n").is_err());
        assert!(parse_chart_settings("[chart.orbs]\ntrine = 45.0\n").is_err());
        assert!(parse_chart_settings("[chart.orbs]\nquincunx = 2.0\n").is_err());
        assert!(parse_chart_settings("[chart\n").is_err());
    }

    #[test]
    fn other_tables_are_ignored() {
        let settings = parse_chart_settings("[display]\ntheme = \"dark\"\n").unwrap();
        assert_eq!(settings, ChartSettings::default());
    }

    #[test]
    fn explicit_file_is_read() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[chart]\nhouse_system = \"equal\"").unwrap();

        let (path, text) = read_from(Some(file.path().to_path_buf())).unwrap().unwrap();
        assert_eq!(path, file.path());
        assert_eq!(
            parse_chart_settings(&text).unwrap().house_system,
            HouseSystem::Simplified
        );
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(read_from(Some(missing.clone())).is_err());
        assert!(load_chart_settings(Some(&missing)).is_err());
    }
}
