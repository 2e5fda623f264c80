use ph_project::*;
use ph_sweep::{FailurePolicy, SpeedSchedule};

fn temp_path(name: &str) -> std::path::PathBuf {
    let dir = std::env::temp_dir().join("ph_project_tests");
    std::fs::create_dir_all(&dir).unwrap();
    dir.join(name)
}

#[test]
fn roundtrip_yaml_reference_project() {
    let project = Project::reference();
    let path = temp_path("roundtrip_reference.yaml");

    save_yaml(&path, &project).unwrap();
    let loaded = load_yaml(&path).unwrap();

    assert_eq!(loaded.name, project.name);
    assert_eq!(loaded.hull.mass_kg, project.hull.mass_kg);
    assert_eq!(
        loaded.speeds.velocities().unwrap().len(),
        project.speeds.velocities().unwrap().len()
    );
}

#[test]
fn roundtrip_json_with_solver_overrides() {
    let mut project = Project::reference();
    project.speeds = SpeedSchedule::Linear {
        start: 4.0,
        end: 12.0,
        points: 5,
    };
    project.solver = Some(SolverDef {
        grid_points: Some(60),
        failure_policy: Some(FailurePolicy::Abort),
        ..SolverDef::default()
    });
    let path = temp_path("roundtrip_overrides.json");

    save_json(&path, &project).unwrap();
    let loaded = load(&path).unwrap();

    assert_eq!(loaded.solver, project.solver);
    assert_eq!(loaded.speeds, project.speeds);
}

#[test]
fn constants_default_when_omitted() {
    let yaml = r#"
version: 1
name: minimal
hull:
  length_m: 8.0
  beam_m: 1.6
  mass_kg: 3000.0
  deadrise_deg: 15.0
  lcg_m: 3.0
  vcg_m: 0.5
  draft_m: 0.4
  frontal_area_m2: 1.2
speeds:
  type: discrete
  values: [6.0]
"#;
    let project: Project = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(project.constants, ConstantsDef::default());
    assert_eq!(project.hull.thrust_offset_m, 0.0);
    validate_project(&project).unwrap();
}

#[test]
fn save_refuses_invalid_project() {
    let mut project = Project::reference();
    project.hull.beam_m = -1.0;
    let path = temp_path("invalid.yaml");
    assert!(matches!(
        save_yaml(&path, &project),
        Err(ProjectError::Validation(_))
    ));
}

#[test]
fn unknown_extension_is_rejected() {
    let path = temp_path("project.toml");
    assert!(matches!(
        load(&path),
        Err(ProjectError::UnknownFormat { .. })
    ));
}
