//! Tests for the generation driver.

use std::fs;

use hex_assets::{
    generate_all, generate_all_with_progress, GenerateError, GeneratorConfig, Progress, MODELS,
};

#[test]
fn writes_all_seven_files() {
    let dir = tempfile::tempdir().unwrap();
    let config = GeneratorConfig::with_output_dir(dir.path());
    let generated = generate_all(&config).unwrap();

    assert_eq!(generated.len(), 7);
    for (model, spec) in generated.iter().zip(MODELS.iter()) {
        assert_eq!(model.file_name, spec.file_name);
        assert!(model.path.is_file(), "{} missing", model.path.display());
        let text = fs::read_to_string(&model.path).unwrap();
        assert_eq!(text.matches("endfacet").count(), model.triangle_count);
    }
}

#[test]
fn creates_missing_output_directory() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("assets").join("models");
    generate_all(&GeneratorConfig::with_output_dir(&nested)).unwrap();
    assert!(nested.join("grass_hex.stl").is_file());
}

#[test]
fn regeneration_is_byte_identical() {
    let a = tempfile::tempdir().unwrap();
    let b = tempfile::tempdir().unwrap();
    generate_all(&GeneratorConfig::with_output_dir(a.path())).unwrap();
    generate_all(&GeneratorConfig::with_output_dir(b.path())).unwrap();
    // and once more over the top of the first run
    generate_all(&GeneratorConfig::with_output_dir(a.path())).unwrap();

    for spec in &MODELS {
        let first = fs::read(a.path().join(spec.file_name)).unwrap();
        let second = fs::read(b.path().join(spec.file_name)).unwrap();
        assert_eq!(first, second, "{} differs between runs", spec.file_name);
    }
}

#[test]
fn grass_and_road_tiles_are_identical_apart_from_name() {
    let dir = tempfile::tempdir().unwrap();
    generate_all(&GeneratorConfig::with_output_dir(dir.path())).unwrap();
    let grass = fs::read_to_string(dir.path().join("grass_hex.stl")).unwrap();
    let road = fs::read_to_string(dir.path().join("road_hex.stl")).unwrap();
    assert_eq!(grass.replace("grass_hex.stl", "road_hex.stl"), road);
}

#[test]
fn output_dir_that_is_a_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("models");
    fs::write(&blocker, b"not a directory").unwrap();

    let err = generate_all(&GeneratorConfig::with_output_dir(&blocker)).unwrap_err();
    assert!(matches!(err, GenerateError::CreateDir { .. }), "got {err:?}");
}

#[test]
fn progress_brackets_each_model_in_catalog_order() {
    let dir = tempfile::tempdir().unwrap();
    let config = GeneratorConfig::with_output_dir(dir.path());
    let mut events = Vec::new();
    let generated = generate_all_with_progress(&config, |event| {
        events.push(match event {
            Progress::Started(spec) => format!("start {}", spec.file_name),
            Progress::Written(model) => {
                assert!(model.path.is_file());
                format!("done {} {}", model.file_name, model.triangle_count)
            }
        })
    })
    .unwrap();

    let expected: Vec<String> = generated
        .iter()
        .flat_map(|m| {
            [
                format!("start {}", m.file_name),
                format!("done {} {}", m.file_name, m.triangle_count),
            ]
        })
        .collect();
    assert_eq!(events, expected);
    assert_eq!(events[0], "start grass_hex.stl");
    assert_eq!(events[1], "done grass_hex.stl 24");
}

#[test]
fn progress_stops_at_first_failure() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("not_a_dir");
    fs::write(&blocker, b"x").unwrap();

    let mut events = 0;
    let result =
        generate_all_with_progress(&GeneratorConfig::with_output_dir(&blocker), |_| events += 1);
    assert!(matches!(result, Err(GenerateError::CreateDir { .. })));
    assert_eq!(events, 0);
}
