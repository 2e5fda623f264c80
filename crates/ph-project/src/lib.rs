//! ph-project: planing project files (hull, constants, speed schedule and
//! solver overrides) in YAML or JSON, with migration and validation.

pub mod format;
pub mod migrate;
pub mod schema;
pub mod validate;

pub use format::ProjectFormat;
pub use migrate::{LATEST_VERSION, migrate_to_latest};
pub use schema::*;
pub use validate::{MAX_SPEED_MPS, ValidationError, validate_project};

use std::path::Path;

pub type ProjectResult<T> = Result<T, ProjectError>;

#[derive(thiserror::Error, Debug)]
pub enum ProjectError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Migration error: {what}")]
    Migration { what: String },

    #[error("Unsupported project file extension: {path}")]
    UnknownFormat { path: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Read, migrate and validate a project; the format follows the extension.
pub fn load(path: &Path) -> ProjectResult<Project> {
    load_as(path, ProjectFormat::from_path(path)?)
}

/// Validate and write a project; the format follows the extension.
pub fn save(path: &Path, project: &Project) -> ProjectResult<()> {
    save_as(path, project, ProjectFormat::from_path(path)?)
}

pub fn load_as(path: &Path, format: ProjectFormat) -> ProjectResult<Project> {
    let content = std::fs::read_to_string(path)?;
    let project = migrate_to_latest(format.parse(&content)?)?;
    validate_project(&project)?;
    Ok(project)
}

pub fn save_as(path: &Path, project: &Project, format: ProjectFormat) -> ProjectResult<()> {
    validate_project(project)?;
    std::fs::write(path, format.render(project)?)?;
    Ok(())
}

pub fn load_yaml(path: &Path) -> ProjectResult<Project> {
    load_as(path, ProjectFormat::Yaml)
}

pub fn save_yaml(path: &Path, project: &Project) -> ProjectResult<()> {
    save_as(path, project, ProjectFormat::Yaml)
}

pub fn load_json(path: &Path) -> ProjectResult<Project> {
    load_as(path, ProjectFormat::Json)
}

pub fn save_json(path: &Path, project: &Project) -> ProjectResult<()> {
    save_as(path, project, ProjectFormat::Json)
}
