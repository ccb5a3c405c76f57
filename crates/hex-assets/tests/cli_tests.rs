//! Tests for the `generate_assets` binary.

use std::fs;
use std::process::Command;

use hex_assets::MODELS;

#[test]
fn writes_catalog_and_reports_progress() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("models");

    let output = Command::new(env!("CARGO_BIN_EXE_generate_assets"))
        .env("HEX3WORLD_MODELS_DIR", &out)
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Creating grass_hex.stl...\n  24 triangles\n"));
    assert!(stdout.contains("Creating simple_tree.stl...\n  16 triangles\n"));
    assert!(stdout.contains("Creating small_rock.stl...\n  6 triangles\n"));
    assert!(stdout.ends_with("All simple STL models generated successfully!\n"));
    for spec in &MODELS {
        assert!(out.join(spec.file_name).is_file(), "{} missing", spec.file_name);
    }
}

#[test]
fn exits_1_when_output_dir_is_a_file() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("models");
    fs::write(&blocker, b"not a directory").unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_generate_assets"))
        .env("HEX3WORLD_MODELS_DIR", &blocker)
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("error:"));
    assert!(!String::from_utf8_lossy(&output.stdout).contains("successfully"));
}
