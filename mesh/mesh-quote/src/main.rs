//! Quote an STL file from the command line.
//!
//! Prints one JSON object to stdout:
//!
//! ```text
//! {"path":"part.stl","format":"binary","triangles":12,"volume":1.0,"unit":"cm3","weight":1.04,"price":3}
//! ```
//!
//! Logging goes to stderr and is controlled by `RUST_LOG` (default `warn`).
//!
//! # Examples
//!
//! - `mesh-quote part.stl --rate 2.5` - price at 2.5 per cm³
//! - `mesh-quote part.stl --rate 2.5 --unit in --material pla` - report in³, PLA weight
//! - `mesh-quote part.stl --config shop.json --pretty` - parameters from JSON

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use mesh_volume::{Density, Material, MeshModel, Quote, QuoteParams, VolumeUnit};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Volume, weight and price for an STL file
#[derive(Parser, Debug)]
#[command(name = "mesh-quote")]
#[command(about = "Volume, weight and price for an STL file", long_about = None)]
#[command(version)]
struct Cli {
    /// STL file to quote
    #[arg(name = "PATH")]
    path: PathBuf,

    /// Price per cubic centimeter
    #[arg(long)]
    rate: Option<f64>,

    /// Material density in g/cm³
    #[arg(long, conflicts_with = "material")]
    density: Option<f64>,

    /// Material preset (abs, pla, petg, nylon, resin)
    #[arg(long)]
    material: Option<Material>,

    /// Unit for the reported volume (mm, cm, in)
    #[arg(long)]
    unit: Option<VolumeUnit>,

    /// JSON file with quote parameters; flags override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

/// What gets printed.
#[derive(Debug, Serialize)]
struct Report {
    path: String,
    format: &'static str,
    triangles: u32,
    volume: f64,
    unit: VolumeUnit,
    weight: f64,
    price: i64,
}

impl Report {
    fn new(path: &Path, format: &'static str, quote: &Quote) -> Self {
        Self {
            path: path.display().to_string(),
            format,
            triangles: quote.triangles,
            volume: quote.volume,
            unit: quote.unit,
            weight: quote.weight_g,
            price: quote.rounded_price(),
        }
    }
}

fn load_config(path: &Path) -> Result<QuoteParams> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("invalid config {}", path.display()))
}

/// Config file first, then flags on top.
fn build_params(cli: &Cli) -> Result<QuoteParams> {
    let mut params = match &cli.config {
        Some(path) => load_config(path)?,
        None => QuoteParams::default(),
    };

    if let Some(material) = cli.material {
        params = params.with_density(material.density());
    }
    if let Some(density) = cli.density {
        params = params.with_density(Density::new(density)?);
    }
    if let Some(rate) = cli.rate {
        params = params.with_rate(rate);
    }
    if let Some(unit) = cli.unit {
        params = params.with_unit(unit);
    }

    params.validate()?;
    Ok(params)
}

fn quote_file(path: &Path, params: &QuoteParams) -> Result<Report> {
    let mut model =
        MeshModel::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let format = model.format().as_str();

    let quote = model
        .quote(params)
        .with_context(|| format!("failed to measure {}", path.display()))?;
    model.close();

    info!(
        path = %path.display(),
        volume_cm3 = quote.volume_cm3,
        price = quote.price,
        "Quoted mesh"
    );

    Ok(Report::new(path, format, &quote))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let params = build_params(&cli)?;
    let report = quote_file(&cli.path, &params)?;

    let json = if cli.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{json}");

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use mesh_io::save_stl;
    use mesh_types::cube;
    use tempfile::TempDir;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("mesh-quote").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn flags_only() {
        let cli = parse(&["part.stl", "--rate", "2.5", "--unit", "in"]);
        let params = build_params(&cli).unwrap();
        assert!((params.rate_per_cm3 - 2.5).abs() < f64::EPSILON);
        assert_eq!(params.unit, VolumeUnit::CubicInches);
        assert_eq!(params.density, Density::DEFAULT);
    }

    #[test]
    fn flags_override_config() {
        let dir = TempDir::new().unwrap();
        let config = dir.path().join("shop.json");
        fs::write(&config, r#"{"density": 1.24, "rate_per_cm3": 9.0, "unit": "mm3"}"#).unwrap();

        let cli = parse(&[
            "part.stl",
            "--config",
            config.to_str().unwrap(),
            "--rate",
            "1.0",
        ]);
        let params = build_params(&cli).unwrap();
        assert!((params.rate_per_cm3 - 1.0).abs() < f64::EPSILON);
        assert_eq!(params.unit, VolumeUnit::CubicMillimeters);
        assert_eq!(params.density, Material::Pla.density());
    }

    #[test]
    fn bad_values_are_rejected() {
        assert!(build_params(&parse(&["p.stl", "--rate", "-1"])).is_err());
        assert!(build_params(&parse(&["p.stl", "--density", "0"])).is_err());
        assert!(Cli::try_parse_from(["mesh-quote", "p.stl", "--unit", "furlong"]).is_err());
        assert!(
            Cli::try_parse_from(["mesh-quote", "p.stl", "--density", "1", "--material", "pla"])
                .is_err()
        );
    }

    #[test]
    fn missing_config_has_context() {
        let cli = parse(&["p.stl", "--config", "/nonexistent/shop.json"]);
        let err = build_params(&cli).unwrap_err();
        assert!(format!("{err:#}").contains("failed to read config"));
    }

    #[test]
    fn report_for_cube() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cube.stl");
        save_stl(&cube(10.0), &path).unwrap();

        let params = QuoteParams::default().with_rate(3.0);
        let report = quote_file(&path, &params).unwrap();
        assert_eq!(report.format, "binary");
        assert_eq!(report.triangles, 12);
        assert!((report.volume - 1.0).abs() < 1e-9);
        assert!((report.weight - 1.04).abs() < 1e-9);
        assert_eq!(report.price, 3);

        let json: serde_json::Value = serde_json::to_value(&report).unwrap();
        assert_eq!(json["unit"], "cm3");
        assert_eq!(json["price"], 3);
    }

    #[test]
    fn missing_file_has_context() {
        let err = quote_file(Path::new("/nonexistent/part.stl"), &QuoteParams::default())
            .unwrap_err();
        assert!(format!("{err:#}").contains("failed to open"));
    }
}
