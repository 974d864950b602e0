//! End-to-end tests for the commands that stay on the local machine.

use assert_cmd::Command;
use predicates::prelude::*;

/// A `fleetprov` invocation isolated from the host's config and
/// environment.
fn fleetprov(home: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("fleetprov").unwrap();
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env_remove("AWS_REGION")
        .env_remove("FLEETPROV_BUCKET")
        .env_remove("FLEETPROV_ROLE_ARN")
        .env_remove("FLEETPROV_POLICY")
        .env_remove("FLEETPROV_DEVICE_TYPE")
        .env_remove("FLEETPROV_PREFIX");
    cmd
}

#[test]
fn manifest_writes_requested_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("provisioning-data.json");

    fleetprov(dir.path())
        .args(["manifest", "--count", "3", "--prefix", "unit"])
        .arg("--manifest-path")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Devices:"));

    let content = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].contains(r#""ThingName":"unit_0""#));
    assert!(lines[2].contains(r#""ThingName":"unit_2""#));
}

#[test]
fn manifest_json_output_reports_the_summary() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("provisioning-data.json");

    fleetprov(dir.path())
        .args(["manifest", "--count", "2", "--output", "json"])
        .arg("--manifest-path")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""devices": 2"#));
}

#[test]
fn stage_without_a_bucket_explains_how_to_set_one() {
    let dir = tempfile::tempdir().unwrap();

    fleetprov(dir.path())
        .arg("stage")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Staging bucket required"));
}

#[test]
fn config_set_round_trips_through_show() {
    let dir = tempfile::tempdir().unwrap();

    fleetprov(dir.path())
        .args(["config", "set", "bucket", "fleet-staging"])
        .assert()
        .success();

    fleetprov(dir.path())
        .args(["config", "show", "--output", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("fleet-staging"));
}

#[test]
fn config_path_points_at_a_toml_file() {
    let dir = tempfile::tempdir().unwrap();

    fleetprov(dir.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn unknown_config_key_is_rejected() {
    let dir = tempfile::tempdir().unwrap();

    fleetprov(dir.path())
        .args(["config", "set", "api_key", "zzz"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown config key"));
}
