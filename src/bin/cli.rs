//! treethin CLI - Select trees to retain during forest thinning
//!
//! Usage:
//!   treethin-cli <candidates.geojson|candidates.csv> [--spacing 10] [--output <prefix>] [--verbose]
//!
//! Reads candidate trees (latitude, longitude, weight) from GeoJSON or CSV,
//! solves the spacing-constrained selection, and writes keep/remove flags
//! per candidate. The weight column is `W` when present, falling back to
//! `H_m` (tree height), unless overridden with `--weight-column`.

use clap::Parser;
use geojson::{Feature, FeatureCollection, GeoJson, Value};
use serde_json::json;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use treethin::{optimize, MilpSolver, Selection, ThinningConfig, TreePoint};

#[derive(Parser)]
#[command(name = "treethin-cli")]
#[command(about = "Spacing-constrained tree selection for forest thinning", long_about = None)]
struct Cli {
    /// Input file with candidate trees (.geojson or .csv)
    input: PathBuf,

    /// Minimum spacing between retained trees in meters
    #[arg(short, long, default_value_t = 10.0)]
    spacing: f64,

    /// Output path prefix (writes <prefix>.csv, and <prefix>.geojson for GeoJSON input)
    #[arg(short, long, default_value = "thinning_keep")]
    output: String,

    /// Weight column to use instead of the W/H_m fallback
    #[arg(long)]
    weight_column: Option<String>,

    /// Enable verbose debug output
    #[arg(short, long)]
    verbose: bool,
}

/// Loaded candidates plus the original features for GeoJSON passthrough.
#[derive(Debug)]
struct CandidateSet {
    points: Vec<TreePoint>,
    features: Option<Vec<Feature>>,
}

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format(|buf, record| writeln!(buf, "[{:5}] {}", record.level(), record.args()))
        .init();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), String> {
    println!("Loading candidates from: {}", cli.input.display());

    let candidates = load_candidates(&cli.input, cli.weight_column.as_deref())?;
    let n = candidates.points.len();
    println!("Loaded {} tree candidates", n);

    let config = ThinningConfig {
        spacing_m: cli.spacing,
    };
    let result = optimize(&candidates.points, &config, &MilpSolver::new())
        .map_err(|e| e.to_string())?;

    let kept = result.selection.kept_count();
    let removed = result.selection.removed_count();
    println!("\nResults:");
    println!("  Conflicting pairs: {}", result.conflict_count);
    println!("  Objective value:   {:.2}", result.objective);
    if n > 0 {
        println!(
            "  Trees to keep:     {} ({:.1}%)",
            kept,
            kept as f64 / n as f64 * 100.0
        );
        println!(
            "  Trees to remove:   {} ({:.1}%)",
            removed,
            removed as f64 / n as f64 * 100.0
        );
    }

    let csv_path = format!("{}.csv", cli.output);
    export_csv(&csv_path, &candidates.points, &result.selection)?;
    println!("\nResults saved to:");
    println!("  - {}", csv_path);

    if let Some(features) = candidates.features {
        let geojson_path = format!("{}.geojson", cli.output);
        export_geojson(&geojson_path, features, &result.selection)?;
        println!("  - {}", geojson_path);
    }

    Ok(())
}

// ============================================================================
// Loading
// ============================================================================

fn load_candidates(path: &Path, weight_column: Option<&str>) -> Result<CandidateSet, String> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("csv") => load_csv(path, weight_column),
        Some("geojson") | Some("json") => load_geojson(path, weight_column),
        _ => Err("file format must be CSV or GeoJSON".to_string()),
    }
}

fn load_csv(path: &Path, weight_column: Option<&str>) -> Result<CandidateSet, String> {
    let mut reader = csv::Reader::from_path(path).map_err(|e| e.to_string())?;
    let headers = reader.headers().map_err(|e| e.to_string())?.clone();

    let column = |name: &str| headers.iter().position(|h| h == name);
    let lat_idx = column("latitude")
        .ok_or_else(|| "CSV file must contain a 'latitude' column".to_string())?;
    let lng_idx = column("longitude")
        .ok_or_else(|| "CSV file must contain a 'longitude' column".to_string())?;

    let (weight_name, weight_idx) = match weight_column {
        Some(name) => (
            name.to_string(),
            column(name).ok_or_else(|| format!("CSV file has no '{}' column", name))?,
        ),
        None => column("W")
            .map(|i| ("W".to_string(), i))
            .or_else(|| column("H_m").map(|i| ("H_m".to_string(), i)))
            .ok_or_else(|| {
                "data must contain either 'W' or 'H_m' column for optimization".to_string()
            })?,
    };
    println!("Using '{}' column as optimization weights", weight_name);

    let parse = |record: &csv::StringRecord, idx: usize, row: usize| -> Result<f64, String> {
        record
            .get(idx)
            .ok_or_else(|| format!("row {}: missing field", row))?
            .trim()
            .parse::<f64>()
            .map_err(|e| format!("row {}: {}", row, e))
    };

    let mut points = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record.map_err(|e| e.to_string())?;
        points.push(TreePoint::new(
            parse(&record, lat_idx, row)?,
            parse(&record, lng_idx, row)?,
            parse(&record, weight_idx, row)?,
        ));
    }

    Ok(CandidateSet {
        points,
        features: None,
    })
}

fn load_geojson(path: &Path, weight_column: Option<&str>) -> Result<CandidateSet, String> {
    let content = fs::read_to_string(path).map_err(|e| e.to_string())?;
    parse_geojson(&content, weight_column)
}

fn parse_geojson(content: &str, weight_column: Option<&str>) -> Result<CandidateSet, String> {
    let geojson: GeoJson = content.parse().map_err(|e: geojson::Error| e.to_string())?;

    let collection = match geojson {
        GeoJson::FeatureCollection(fc) => fc,
        _ => return Err("GeoJSON input must be a FeatureCollection".to_string()),
    };

    let weight_key = resolve_weight_key(&collection.features, weight_column)?;
    println!("Using '{}' property as optimization weights", weight_key);

    let mut points = Vec::new();
    for (i, feature) in collection.features.iter().enumerate() {
        let geometry = feature
            .geometry
            .as_ref()
            .ok_or_else(|| format!("feature {}: missing geometry", i))?;
        let coords = match &geometry.value {
            Value::Point(coords) => coords,
            other => {
                return Err(format!(
                    "feature {}: expected Point geometry, got {}",
                    i,
                    other.type_name()
                ))
            }
        };

        if coords.len() < 2 {
            return Err(format!("feature {}: malformed Point coordinates", i));
        }

        let weight = feature_number(feature, &weight_key)
            .ok_or_else(|| format!("feature {}: missing numeric '{}' property", i, weight_key))?;

        // GeoJSON position order is [longitude, latitude]
        points.push(TreePoint::new(coords[1], coords[0], weight));
    }

    Ok(CandidateSet {
        points,
        features: Some(collection.features),
    })
}

/// Pick the weight property: explicit override, else `W` when every feature
/// carries it, else `H_m`.
fn resolve_weight_key(features: &[Feature], weight_column: Option<&str>) -> Result<String, String> {
    if let Some(name) = weight_column {
        return Ok(name.to_string());
    }
    for key in ["W", "H_m"] {
        if !features.is_empty() && features.iter().all(|f| feature_number(f, key).is_some()) {
            return Ok(key.to_string());
        }
    }
    Err("data must contain either 'W' or 'H_m' property for optimization".to_string())
}

fn feature_number(feature: &Feature, key: &str) -> Option<f64> {
    feature
        .properties
        .as_ref()
        .and_then(|props| props.get(key))
        .and_then(|v| v.as_f64())
}

// ============================================================================
// Export
// ============================================================================

fn export_csv(path: &str, points: &[TreePoint], selection: &Selection) -> Result<(), String> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| e.to_string())?;
    writer
        .write_record(["latitude", "longitude", "weight", "keep", "remove"])
        .map_err(|e| e.to_string())?;

    for (i, p) in points.iter().enumerate() {
        let keep = selection.is_kept(i);
        writer
            .write_record(&[
                p.latitude.to_string(),
                p.longitude.to_string(),
                p.weight.to_string(),
                (keep as u8).to_string(),
                (!keep as u8).to_string(),
            ])
            .map_err(|e| e.to_string())?;
    }

    writer.flush().map_err(|e| e.to_string())
}

fn export_geojson(
    path: &str,
    mut features: Vec<Feature>,
    selection: &Selection,
) -> Result<(), String> {
    for (i, feature) in features.iter_mut().enumerate() {
        let keep = selection.is_kept(i);
        let props = feature.properties.get_or_insert_with(Default::default);
        props.insert("keep".to_string(), json!(keep));
        props.insert("remove".to_string(), json!(!keep));
    }

    let collection = FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    };
    fs::write(path, GeoJson::from(collection).to_string()).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_flag_parses() {
        let cli = Cli::try_parse_from(["treethin-cli", "stand.csv", "--verbose"]).unwrap();
        assert!(cli.verbose);

        let cli = Cli::try_parse_from(["treethin-cli", "stand.csv", "-v"]).unwrap();
        assert!(cli.verbose);
    }

    #[test]
    fn test_verbose_defaults_off() {
        let cli = Cli::try_parse_from(["treethin-cli", "stand.csv"]).unwrap();
        assert!(!cli.verbose);
    }

    #[test]
    fn test_parse_geojson_point() {
        let content = r#"{
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "geometry": { "type": "Point", "coordinates": [137.65, 35.78] },
                "properties": { "H_m": 14.5 }
            }]
        }"#;
        let set = parse_geojson(content, None).unwrap();
        assert_eq!(set.points.len(), 1);
        assert_eq!(set.points[0].latitude, 35.78);
        assert_eq!(set.points[0].longitude, 137.65);
        assert_eq!(set.points[0].weight, 14.5);
    }

    #[test]
    fn test_parse_geojson_truncated_coordinates_rejected() {
        // A one-element position must become a descriptive error, not a panic
        let content = r#"{
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "geometry": { "type": "Point", "coordinates": [137.65] },
                "properties": { "H_m": 14.5 }
            }]
        }"#;
        let err = parse_geojson(content, None).unwrap_err();
        assert!(err.contains("feature 0"));
        assert!(err.contains("malformed Point coordinates"));
    }
}
