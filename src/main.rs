use anyhow::Result;
use std::env;
use std::path::{Path, PathBuf};

use webring::{group_by_year, render, validate, Source};

const DEFAULT_DATASET: &str = "students.json";

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    match args.get(1).map(String::as_str) {
        Some("render") => run_render(args.get(2)).await,
        Some("validate") => run_validate(args.get(2), args.get(3)),
        // Bare paths behave like the validate mode
        _ => run_validate(args.get(1), args.get(2)),
    }
}

/// Validate a candidate dataset file, and the change against a baseline file
/// when one is given (e.g. the base branch's copy in CI)
fn run_validate(candidate: Option<&String>, baseline: Option<&String>) -> Result<()> {
    let candidate_path = candidate.map_or_else(|| PathBuf::from(DEFAULT_DATASET), PathBuf::from);

    let candidate_json = load_json(&candidate_path);
    let baseline_json = baseline.map(|p| load_json(Path::new(p)));

    let result = validate(&candidate_json, baseline_json.as_ref());

    if !result.is_pass() {
        for violation in result.violations() {
            eprintln!("{}: {}", candidate_path.display(), violation);
        }
        std::process::exit(1);
    }

    println!("Validation passed.");
    Ok(())
}

/// Load and print the year-grouped directory for a dataset file
async fn run_render(path: Option<&String>) -> Result<()> {
    let path = path.map_or_else(|| PathBuf::from(DEFAULT_DATASET), PathBuf::from);

    let dataset = match Source::File(path).load().await {
        Ok(dataset) => dataset,
        Err(err) => {
            eprintln!("Could not load the webring. {}", err);
            std::process::exit(1);
        }
    };

    let groups = group_by_year(&dataset);
    print!("{}", render(&dataset));
    println!("{} entries across {} years", dataset.len(), groups.len());
    Ok(())
}

/// Read a JSON file or exit with a message distinguishing the failure
fn load_json(path: &Path) -> serde_json::Value {
    if !path.exists() {
        eprintln!("File not found: {}", path.display());
        std::process::exit(1);
    }
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) => {
            eprintln!("Could not read {}: {}", path.display(), err);
            std::process::exit(1);
        }
    };
    match serde_json::from_str(&text) {
        Ok(value) => value,
        Err(err) => {
            eprintln!("Invalid JSON in {}: {}", path.display(), err);
            std::process::exit(1);
        }
    }
}
