use assert_cmd::Command;
use std::fs::{self, File};
use std::io::Write;

#[test]
fn perigee_plot_renders_png() {
    let dir = tempfile::tempdir().expect("tempdir");
    let csv_path = dir.path().join("campaign.csv");
    let png_path = dir.path().join("perigee.png");

    let mut file = File::create(&csv_path).expect("csv create");
    writeln!(
        file,
        "pass_index,station,start_s,duration_s,max_elevation_deg,slant_range_km,fluence_j_cm2,pulses,binding_constraint,delta_v_m_s,heating_delta_k,temp_after_k,perigee_alt_km,status,skip_reason"
    )
    .unwrap();
    for i in 0..6 {
        let perigee = 480.0 - i as f64 * 55.0;
        let status = if i == 3 { "skipped" } else { "engaged" };
        let reason = if i == 3 { "insufficient_cooldown" } else { "" };
        writeln!(
            file,
            "{i},maui,{:.1},300.0,70.00,540.000,0.510000,3000,laser_system,0.850000,24.000,274.00,{perigee:.3},{status},{reason}",
            i as f64 * 40_000.0,
        )
        .unwrap();
    }

    Command::cargo_bin("perigee_plot")
        .expect("perigee_plot bin")
        .args([
            "--input",
            csv_path.to_str().unwrap(),
            "--output",
            png_path.to_str().unwrap(),
            "--width",
            "400",
            "--height",
            "300",
        ])
        .assert()
        .success();

    let metadata = fs::metadata(png_path).expect("png metadata");
    assert!(metadata.len() > 0, "PNG output should not be empty");
}
