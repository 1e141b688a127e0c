use anyhow::Context;
use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};
use clap::Parser;
use std::fs;
use std::io::Read;
use std::path::PathBuf;

use urania::{AnalyticEphemeris, BirthInput, ChartEngine, HouseSystem};

#[derive(Parser, Debug)]
#[command(author, version, about = "Compute a natal chart and print it as JSON")]
struct Args {
    #[arg(long, help = "BirthInput JSON file, or - for stdin", conflicts_with_all = ["date", "time", "lat", "lon", "tz", "name"])]
    input: Option<PathBuf>,

    #[arg(long, help = "Local birth date, YYYY-MM-DD", requires_all = ["time", "lat", "lon", "tz"])]
    date: Option<NaiveDate>,

    #[arg(long, help = "Local birth time, HH:MM", value_parser = parse_time)]
    time: Option<NaiveTime>,

    #[arg(long, allow_negative_numbers = true)]
    lat: Option<f64>,

    #[arg(long, allow_negative_numbers = true)]
    lon: Option<f64>,

    #[arg(long, help = "IANA timezone, e.g. Europe/Paris")]
    tz: Option<String>,

    #[arg(long)]
    name: Option<String>,

    #[arg(long, help = "urania.toml to read instead of the default locations")]
    config: Option<PathBuf>,

    #[arg(long, help = "Override the configured house system (simplified, placidus)")]
    house_system: Option<HouseSystem>,

    #[arg(long, help = "Single-line JSON")]
    compact: bool,
}

fn parse_time(s: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(s, "%H:%M").map_err(|e| format!("expected HH:MM: {e}"))
}

fn read_input(args: &Args) -> anyhow::Result<BirthInput> {
    if let Some(path) = &args.input {
        let text = if path.as_os_str() == "-" {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        } else {
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?
        };
        return serde_json::from_str(&text).context("parsing birth input JSON");
    }

    let (Some(date), Some(time), Some(lat), Some(lon), Some(tz)) =
        (args.date, args.time, args.lat, args.lon, args.tz.clone())
    else {
        anyhow::bail!("pass --input, or all of --date --time --lat --lon --tz");
    };
    Ok(BirthInput {
        year: date.year(),
        month: date.month(),
        day: date.day(),
        hour: time.hour(),
        minute: time.minute(),
        latitude: lat,
        longitude: lon,
        timezone: tz,
        name: args.name.clone(),
    })
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let mut settings = urania_config::load_chart_settings(args.config.as_deref())?;
    if let Some(system) = args.house_system {
        settings.house_system = system;
    }

    let input = read_input(&args)?;
    let engine = ChartEngine::new(AnalyticEphemeris::new(), settings);
    let chart = engine.compute(&input)?;

    let json = if args.compact {
        serde_json::to_string(&chart)?
    } else {
        serde_json::to_string_pretty(&chart)?
    };
    println!("{}", json);
    Ok(())
}
