//! Generation driver: builds every catalog entry and writes it to disk.

use std::fs;
use std::path::PathBuf;

use tracing::{info, instrument};

use crate::config::GeneratorConfig;
use crate::errors::GenerateError;
use crate::models::{ModelSpec, MODELS};
use crate::stl::write_ascii_stl;

/// Result of writing one asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedModel {
    pub file_name: &'static str,
    pub path: PathBuf,
    pub triangle_count: usize,
}

/// Build and write a single model into `config.output_dir`.
pub fn generate_model(
    config: &GeneratorConfig,
    spec: &ModelSpec,
) -> Result<GeneratedModel, GenerateError> {
    let path = config.output_dir.join(spec.file_name);
    let mesh = spec.shape.build();

    write_ascii_stl(&path, &mesh).map_err(|source| GenerateError::Write {
        file_name: spec.file_name.to_string(),
        source,
    })?;

    info!(file = spec.file_name, triangles = mesh.len(), "model written");
    Ok(GeneratedModel {
        file_name: spec.file_name,
        path,
        triangle_count: mesh.len(),
    })
}

/// Create the output directory (and parents) if it does not exist yet.
pub fn prepare_output_dir(config: &GeneratorConfig) -> Result<(), GenerateError> {
    fs::create_dir_all(&config.output_dir).map_err(|source| GenerateError::CreateDir {
        path: config.output_dir.clone(),
        source,
    })
}

/// Progress events reported while the catalog is written.
#[derive(Debug, Clone, Copy)]
pub enum Progress<'a> {
    /// About to build and write this model.
    Started(&'a ModelSpec),
    /// The model's file is complete.
    Written(&'a GeneratedModel),
}

/// Write the full asset set. Stops at the first failure.
pub fn generate_all(config: &GeneratorConfig) -> Result<Vec<GeneratedModel>, GenerateError> {
    generate_all_with_progress(config, |_| {})
}

/// [`generate_all`], calling `on_progress` before and after each model.
#[instrument(skip(config, on_progress), fields(output_dir = %config.output_dir.display()))]
pub fn generate_all_with_progress(
    config: &GeneratorConfig,
    mut on_progress: impl FnMut(Progress<'_>),
) -> Result<Vec<GeneratedModel>, GenerateError> {
    prepare_output_dir(config)?;

    let mut generated = Vec::with_capacity(MODELS.len());
    for spec in &MODELS {
        on_progress(Progress::Started(spec));
        let model = generate_model(config, spec)?;
        on_progress(Progress::Written(&model));
        generated.push(model);
    }

    info!(count = generated.len(), "asset generation complete");
    Ok(generated)
}
