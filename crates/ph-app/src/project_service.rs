//! Project loading, saving, validation and summaries.

use ph_project::Project;
use std::path::Path;

use crate::error::AppResult;

/// One-line facts about a project for listing.
#[derive(Debug, Clone)]
pub struct ProjectSummary {
    pub name: String,
    pub version: u32,
    pub length_m: f64,
    pub beam_m: f64,
    pub deadrise_deg: f64,
    pub schedule: String,
    pub speed_count: usize,
}

/// Load a project from YAML or JSON (by extension), migrated and validated.
pub fn load_project(path: &Path) -> AppResult<Project> {
    Ok(ph_project::load(path)?)
}

/// Save a project as YAML or JSON (by extension), validated first.
pub fn save_project(path: &Path, project: &Project) -> AppResult<()> {
    ph_project::save(path, project)?;
    Ok(())
}

pub fn validate_project(project: &Project) -> AppResult<()> {
    ph_project::validate_project(project)?;
    Ok(())
}

pub fn summarize(project: &Project) -> AppResult<ProjectSummary> {
    let speeds = project.speeds.velocities()?;
    Ok(ProjectSummary {
        name: project.name.clone(),
        version: project.version,
        length_m: project.hull.length_m,
        beam_m: project.hull.beam_m,
        deadrise_deg: project.hull.deadrise_deg,
        schedule: project.speeds.to_string(),
        speed_count: speeds.len(),
    })
}
