//! Write the Hex3World demo's STL assets.
//!
//! Output goes to `assets/models` unless `HEX3WORLD_MODELS_DIR` is set.

use std::process::ExitCode;

use hex_assets::generate::{generate_all_with_progress, Progress};
use hex_assets::GeneratorConfig;
use tracing_subscriber::EnvFilter;

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = GeneratorConfig::from_env()?;

    println!("Generating simple ASCII STL models...");
    generate_all_with_progress(&config, |event| match event {
        Progress::Started(spec) => println!("Creating {}...", spec.file_name),
        Progress::Written(model) => println!("  {} triangles", model.triangle_count),
    })?;
    println!("All simple STL models generated successfully!");
    Ok(())
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
