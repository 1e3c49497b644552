//! # Lattice CLI Create Integration Tests
//!
//! File: cli/tests/create.rs
//! Author: Lattice Core Team
//! Repository: https://github.com/lattice-framework/lattice-cli
//!
//! ## Overview
//!
//! Integration tests for `lattice create`: scaffolded file sets, the
//! skip-existing rule, and rejection of unknown module types.
//!

mod common;
use common::*;
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_create_helper_writes_expected_files() {
    let root = tempdir().expect("Failed to create temp dir");

    lattice_cmd()
        .args(["create", "helper", "--name", "Format Currency"])
        .arg("--path")
        .arg(root.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Created helper 'Format Currency'"));

    let module = root.path().join("src/app/helpers/format-currency");
    assert!(module.join("module.json").is_file());
    assert!(module.join("index.js").is_file());
}

#[test]
fn test_create_core_plugin_lands_under_core_tier() {
    let root = tempdir().expect("Failed to create temp dir");

    lattice_cmd()
        .args(["create", "plugin", "--core", "--name", "syndicator"])
        .arg("--path")
        .arg(root.path())
        .assert()
        .success();

    assert!(root
        .path()
        .join("src/core/plugins/syndicator/module.json")
        .is_file());
}

#[test]
fn test_create_skips_existing_files() {
    let root = tempdir().expect("Failed to create temp dir");
    let module = root.path().join("src/app/widgets/clock");
    std::fs::create_dir_all(&module).unwrap();
    std::fs::write(module.join("index.js"), "// handwritten").unwrap();

    lattice_cmd()
        .args(["create", "widget", "--name", "clock"])
        .arg("--path")
        .arg(root.path())
        .assert()
        .success();

    // Existing file preserved, missing ones filled in.
    assert_eq!(
        std::fs::read_to_string(module.join("index.js")).unwrap(),
        "// handwritten"
    );
    assert!(module.join("module.json").is_file());
}

#[test]
fn test_create_unknown_type_fails() {
    let root = tempdir().expect("Failed to create temp dir");

    lattice_cmd()
        .args(["create", "gadget"])
        .arg("--path")
        .arg(root.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown module type 'gadget'"));
}
