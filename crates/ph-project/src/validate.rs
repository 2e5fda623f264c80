//! Project validation logic.

use crate::schema::{ConstantsDef, HullDef, Project, SolverDef};

/// Highest speed accepted in a schedule (m/s).
pub const MAX_SPEED_MPS: f64 = 100.0;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing value: {field}")]
    Missing { field: String },

    #[error("Conflicting values: {fields}")]
    Conflict { fields: String },

    #[error("Speed schedule is empty")]
    EmptySchedule,

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

fn invalid(field: &str, value: impl ToString, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn positive(field: &str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, value, "must be a positive number"))
    }
}

fn finite(field: &str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(invalid(field, value, "must be finite"))
    }
}

pub fn validate_project(project: &Project) -> Result<(), ValidationError> {
    if project.version > crate::migrate::LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: project.version,
        });
    }

    validate_constants(&project.constants)?;
    validate_hull(&project.hull)?;
    validate_speeds(project)?;
    if let Some(solver) = &project.solver {
        validate_solver(solver)?;
    }
    Ok(())
}

fn validate_constants(constants: &ConstantsDef) -> Result<(), ValidationError> {
    positive("constants.gravity_mps2", constants.gravity_mps2)?;
    positive("constants.water_density_kg_m3", constants.water_density_kg_m3)?;
    positive(
        "constants.kinematic_viscosity_m2_s",
        constants.kinematic_viscosity_m2_s,
    )
}

fn validate_hull(hull: &HullDef) -> Result<(), ValidationError> {
    positive("hull.length_m", hull.length_m)?;
    positive("hull.beam_m", hull.beam_m)?;
    positive("hull.draft_m", hull.draft_m)?;
    positive("hull.frontal_area_m2", hull.frontal_area_m2)?;

    match (hull.mass_kg, hull.displacement_n) {
        (Some(mass), None) => positive("hull.mass_kg", mass)?,
        (None, Some(weight)) => positive("hull.displacement_n", weight)?,
        (Some(_), Some(_)) => {
            return Err(ValidationError::Conflict {
                fields: "hull.mass_kg, hull.displacement_n".to_string(),
            });
        }
        (None, None) => {
            return Err(ValidationError::Missing {
                field: "hull.mass_kg or hull.displacement_n".to_string(),
            });
        }
    }

    if !(hull.deadrise_deg > 0.0 && hull.deadrise_deg < 90.0) {
        return Err(invalid(
            "hull.deadrise_deg",
            hull.deadrise_deg,
            "must lie strictly between 0 and 90 degrees",
        ));
    }
    finite("hull.lcg_m", hull.lcg_m)?;
    finite("hull.vcg_m", hull.vcg_m)?;
    finite("hull.thrust_offset_m", hull.thrust_offset_m)?;
    finite("hull.thrust_angle_deg", hull.thrust_angle_deg)
}

fn validate_speeds(project: &Project) -> Result<(), ValidationError> {
    let speeds = project
        .speeds
        .velocities()
        .map_err(|e| invalid("speeds", &project.speeds, &e.to_string()))?;
    if speeds.is_empty() {
        return Err(ValidationError::EmptySchedule);
    }
    for (i, v) in speeds.iter().enumerate() {
        if !(0.0..=MAX_SPEED_MPS).contains(v) {
            return Err(invalid(
                &format!("speeds[{i}]"),
                v,
                "must lie within [0, 100] m/s",
            ));
        }
    }
    Ok(())
}

fn validate_solver(solver: &SolverDef) -> Result<(), ValidationError> {
    if let Some(points) = solver.grid_points
        && points < 2
    {
        return Err(invalid("solver.grid_points", points, "must be at least 2"));
    }
    if let Some(factor) = solver.moment_tolerance_factor {
        positive("solver.moment_tolerance_factor", factor)?;
    }
    if let Some(factor) = solver.fallback_moment_factor {
        positive("solver.fallback_moment_factor", factor)?;
    }
    if let Some(lo) = solver.trim_min_deg {
        positive("solver.trim_min_deg", lo)?;
    }
    if let Some(hi) = solver.trim_max_deg {
        positive("solver.trim_max_deg", hi)?;
    }
    if let (Some(lo), Some(hi)) = (solver.trim_min_deg, solver.trim_max_deg)
        && lo >= hi
    {
        return Err(invalid(
            "solver.trim_min_deg",
            lo,
            "must be below solver.trim_max_deg",
        ));
    }
    Ok(())
}
