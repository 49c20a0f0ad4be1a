use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;

fn sample_data() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data/sample_descent")
}

#[test]
fn replay_runs_sample_to_the_end() {
    Command::cargo_bin("replay")
        .expect("replay bin")
        .arg("--data")
        .arg(sample_data())
        .args(["--frame-dt", "0.5", "--speed-up", "10", "--report-every", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("at 40x"))
        .stdout(predicate::str::contains("progress 1.00000 (paused, Forward, 40x)"));
}

#[test]
fn replay_reverse_returns_to_start() {
    Command::cargo_bin("replay")
        .expect("replay bin")
        .arg("--data")
        .arg(sample_data())
        .args(["--frame-dt", "0.5", "--speed-up", "10", "--reverse-at", "0.5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("progress 0.00000 (paused, Backward"));
}

#[test]
fn replay_stops_at_frame_limit() {
    Command::cargo_bin("replay")
        .expect("replay bin")
        .arg("--data")
        .arg(sample_data())
        .args(["--max-frames", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("finished after 3 frames"))
        .stdout(predicate::str::contains("(running, Forward, 1x)"));
}

#[test]
fn replay_reports_unloadable_data() {
    let dir = tempfile::tempdir().expect("tempdir");
    Command::cargo_bin("replay")
        .expect("replay bin")
        .arg("--data")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("could not build trajectory"));
}

#[test]
fn export_path_writes_path_and_telemetry() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path_csv = dir.path().join("out/path.csv");
    let telemetry = dir.path().join("out/telemetry.json");

    Command::cargo_bin("export_path")
        .expect("export_path bin")
        .arg("--data")
        .arg(sample_data())
        .arg("--output")
        .arg(&path_csv)
        .arg("--telemetry")
        .arg(&telemetry)
        .args(["--samples", "5"])
        .assert()
        .success();

    let contents = fs::read_to_string(&path_csv).expect("path csv");
    let mut lines = contents.lines();
    assert_eq!(lines.next(), Some("x,y,z"));
    assert_eq!(lines.count(), 13 + 12 * 3);

    let json = fs::read_to_string(&telemetry).expect("telemetry json");
    assert!(json.contains("\"samples\""));
    assert!(json.contains("\"control_points\": 13"));
}

#[test]
fn export_path_streams_control_points_to_stdout() {
    let output = Command::cargo_bin("export_path")
        .expect("export_path bin")
        .arg("--data")
        .arg(sample_data())
        .args(["--control", "--output", "-"])
        .output()
        .expect("run export_path");
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("utf8");
    assert!(stdout.starts_with("x,y,z\n1752100.000000000,0.000000000,0.000000000"));
    assert_eq!(stdout.lines().count(), 14);
}
