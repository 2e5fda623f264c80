//! Compile a validated project into solver inputs.

use ph_core::units::{deg, kg, kgpm3, m, m2, m2ps, mps2, newton};
use ph_hull::{HullParameters, SolverConfig};
use ph_project::{Project, SolverDef};
use ph_sweep::{SweepOptions, SweepRequest};

use crate::error::{AppError, AppResult};

/// Everything needed to run a sweep for one project.
#[derive(Debug, Clone)]
pub struct CompiledRun {
    pub params: HullParameters,
    pub solver_config: SolverConfig,
    pub request: SweepRequest,
    pub options: SweepOptions,
}

impl CompiledRun {
    pub fn solver(&self) -> ph_hull::EquilibriumSolver {
        ph_hull::EquilibriumSolver::with_config(self.params.clone(), self.solver_config)
    }
}

pub fn compile_project(project: &Project) -> AppResult<CompiledRun> {
    ph_project::validate_project(project)?;

    let params = build_hull_parameters(project)?;
    let solver_config = build_solver_config(project.solver.as_ref());
    let request = SweepRequest::from_schedule(&project.speeds)?;
    let options = SweepOptions {
        failure_policy: project
            .solver
            .as_ref()
            .and_then(|s| s.failure_policy)
            .unwrap_or_default(),
    };

    Ok(CompiledRun {
        params,
        solver_config,
        request,
        options,
    })
}

pub fn build_hull_parameters(project: &Project) -> AppResult<HullParameters> {
    let hull = &project.hull;
    let constants = &project.constants;

    let mut builder = HullParameters::builder()
        .gravity(mps2(constants.gravity_mps2))
        .water_density(kgpm3(constants.water_density_kg_m3))
        .kinematic_viscosity(m2ps(constants.kinematic_viscosity_m2_s))
        .length(m(hull.length_m))
        .beam(m(hull.beam_m))
        .deadrise(deg(hull.deadrise_deg))
        .lcg(m(hull.lcg_m))
        .vcg(m(hull.vcg_m))
        .draft(m(hull.draft_m))
        .frontal_area(m2(hull.frontal_area_m2))
        .thrust_offset(m(hull.thrust_offset_m))
        .thrust_angle(deg(hull.thrust_angle_deg));

    builder = match (hull.mass_kg, hull.displacement_n) {
        (Some(mass), None) => builder.mass(kg(mass)),
        (None, Some(weight)) => builder.displacement(newton(weight)),
        _ => {
            return Err(AppError::Compile(
                "exactly one of hull.mass_kg and hull.displacement_n is required".to_string(),
            ));
        }
    };

    builder
        .build()
        .map_err(|e| AppError::Compile(format!("hull parameters: {e}")))
}

/// Defaults overlaid with the project's solver overrides.
pub fn build_solver_config(solver: Option<&SolverDef>) -> SolverConfig {
    let mut config = SolverConfig::default();
    let Some(solver) = solver else {
        return config;
    };

    if let Some(lo) = solver.trim_min_deg {
        config.trim_bracket_deg.0 = lo;
    }
    if let Some(hi) = solver.trim_max_deg {
        config.trim_bracket_deg.1 = hi;
    }
    if let Some(points) = solver.grid_points {
        config.grid_points = points;
    }
    if let Some(factor) = solver.moment_tolerance_factor {
        config.moment_tolerance_factor = factor;
    }
    if let Some(factor) = solver.fallback_moment_factor {
        config.fallback_moment_factor = factor;
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use ph_sweep::FailurePolicy;

    #[test]
    fn reference_project_matches_reference_hull() {
        let compiled = compile_project(&Project::reference()).unwrap();
        let reference = HullParameters::reference_planing_hull();
        assert!((compiled.params.displacement() - reference.displacement()).abs() < 1e-9);
        assert_eq!(compiled.params.lcg(), reference.lcg());
        assert_eq!(compiled.request.len(), 5);
        assert_eq!(compiled.options.failure_policy, FailurePolicy::Continue);
    }

    #[test]
    fn displacement_weight_converts_with_project_gravity() {
        let mut project = Project::reference();
        project.hull.mass_kg = None;
        project.hull.displacement_n = Some(29_600.0);
        let compiled = compile_project(&project).unwrap();
        assert!((compiled.params.mass() - 29_600.0 / 9.81).abs() < 1e-9);
    }

    #[test]
    fn solver_overrides_apply() {
        let overrides = SolverDef {
            trim_max_deg: Some(12.0),
            grid_points: Some(50),
            failure_policy: Some(FailurePolicy::Abort),
            ..SolverDef::default()
        };
        let mut project = Project::reference();
        project.solver = Some(overrides);

        let compiled = compile_project(&project).unwrap();
        assert_eq!(compiled.solver_config.trim_bracket_deg, (0.5, 12.0));
        assert_eq!(compiled.solver_config.grid_points, 50);
        assert_eq!(compiled.solver_config.moment_tolerance_factor, 1e-3);
        assert_eq!(compiled.options.failure_policy, FailurePolicy::Abort);
    }

    #[test]
    fn invalid_project_does_not_compile() {
        let mut project = Project::reference();
        project.hull.deadrise_deg = 0.0;
        assert!(matches!(
            compile_project(&project),
            Err(AppError::Validation(_))
        ));
    }
}
