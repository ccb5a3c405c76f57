//! Procedural STL assets for the Hex3World demo.
//!
//! # Key Components
//!
//! - [`shapes`] — Hex tile, tree and rock triangle builders
//! - [`stl`] — ASCII STL writer with per-facet normals
//! - [`models`] — The fixed catalog of output files
//! - [`generate`] — Driver that writes the catalog to disk
//! - [`config`] — Output location, overridable from the environment

pub mod config;
pub mod errors;
pub mod generate;
pub mod geometry;
pub mod models;
pub mod shapes;
pub mod stl;

pub use config::GeneratorConfig;
pub use errors::{ConfigError, GenerateError, StlError};
pub use generate::{generate_all, generate_all_with_progress, GeneratedModel, Progress};
pub use geometry::{Mesh, Point3, Triangle, Vec3};
pub use models::{ModelSpec, Shape, MODELS};
