use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

fn write_catalogs(dir: &std::path::Path) {
    fs::write(
        dir.join("stations.yaml"),
        r#"
- name: albuquerque
  latitude_deg: 35.05
  longitude_deg: -106.54
  altitude_m: 1839.0
"#,
    )
    .unwrap();
    fs::write(
        dir.join("debris.yaml"),
        r#"
- name: spent stage
  size_m: 2.5
  mass_kg: 15.0
  cross_section_m2: 0.3
  material: aluminum
  perigee_alt_km: 480.0
  apogee_alt_km: 520.0
  inclination_deg: 51.6
"#,
    )
    .unwrap();
    fs::write(
        dir.join("laser.toml"),
        r#"
name = "test site"
pulse_energy_j = 1.0e5
wavelength_m = 1.03e-6
pulse_duration_s = 5.0e-9
aperture_diameter_m = 4.0
beam_quality_m2 = 2.0
"#,
    )
    .unwrap();
}

#[test]
fn campaign_cli_plans_and_writes_artifacts() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_catalogs(dir.path());
    let output = dir.path().join("out").join("campaign.csv");

    Command::cargo_bin("campaign")
        .expect("campaign bin")
        .args([
            "--stations",
            dir.path().join("stations.yaml").to_str().unwrap(),
            "--debris",
            dir.path().join("debris.yaml").to_str().unwrap(),
            "--laser",
            dir.path().join("laser.toml").to_str().unwrap(),
            "--horizon-days",
            "3",
            "--step-minutes",
            "0.25",
            "--output",
            output.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Campaign Report: spent stage"))
        .stdout(predicate::str::contains("Passes"));

    let csv_text = fs::read_to_string(&output).expect("chronology csv");
    assert!(csv_text.starts_with("pass_index,station"));
    let sidecar = dir.path().join("out").join("campaign_report.json");
    let json_text = fs::read_to_string(&sidecar).expect("report sidecar");
    assert!(json_text.contains("\"debris_name\": \"spent stage\""));
}

#[test]
fn unknown_debris_name_lists_the_catalog() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_catalogs(dir.path());

    Command::cargo_bin("campaign")
        .expect("campaign bin")
        .args([
            "--stations",
            dir.path().join("stations.yaml").to_str().unwrap(),
            "--debris",
            dir.path().join("debris.yaml").to_str().unwrap(),
            "--laser",
            dir.path().join("laser.toml").to_str().unwrap(),
            "--debris-name",
            "no such object",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("spent stage"));
}

#[test]
fn stdout_output_prints_the_chronology() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_catalogs(dir.path());

    Command::cargo_bin("campaign")
        .expect("campaign bin")
        .args([
            "--stations",
            dir.path().join("stations.yaml").to_str().unwrap(),
            "--debris",
            dir.path().join("debris.yaml").to_str().unwrap(),
            "--laser",
            dir.path().join("laser.toml").to_str().unwrap(),
            "--horizon-days",
            "2",
            "--step-minutes",
            "0.25",
            "--output",
            "-",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("pass_index,station"));
}
