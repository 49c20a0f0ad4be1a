use std::fs;

use descent_replay::diagnostics::NullSink;
use descent_replay::export::{self, telemetry};
use descent_replay::playback::telemetry::sample;
use descent_replay::trajectory::{ChannelKind, TrajectoryBuilder, TrajectoryModel};

fn model() -> TrajectoryModel {
    TrajectoryBuilder::new(
        vec![[0.0, 0.0, 0.0], [3.0, 0.0, 0.0], [6.0, 3.0, 0.0], [9.0, 3.0, 0.0]],
        vec![0.0, 10.0, 20.0, 30.0],
    )
    .smooth_factor(2)
    .scale(1.0)
    .channel(ChannelKind::Mass, vec![500.0, 400.0])
    .build(&NullSink)
    .unwrap()
}

#[test]
fn path_csv_has_header_and_one_row_per_point() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("nested/path.csv");
    let model = model();

    let mut writer = export::writer_for_path(&path).expect("writer");
    export::path::write_csv(&mut writer, model.smoothed_path()).expect("write");
    drop(writer);

    let mut reader = csv::Reader::from_path(&path).expect("reader");
    let headers = reader.headers().unwrap().clone();
    assert_eq!(headers, vec!["x", "y", "z"]);
    let rows: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
    assert_eq!(rows.len(), model.smoothed_path().len());
    let last: f64 = rows[rows.len() - 1][0].parse().unwrap();
    assert!((last - 9.0).abs() < 1e-9);
}

#[test]
fn telemetry_json_carries_metadata_and_samples() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("telemetry.json");
    let model = model();
    let frames = sample(&model, 4);
    let meta = telemetry::Metadata {
        source: "unit",
        smooth_factor: 2,
        scene_scale: model.scale(),
        duration_s: model.duration_s(),
        control_points: model.control_points().len(),
        path_points: model.smoothed_path().len(),
    };
    telemetry::write_for_extension(&path, &meta, &frames).expect("json");

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(json["source"], "unit");
    assert_eq!(json["path_points"], 10);
    assert_eq!(json["samples"].as_array().unwrap().len(), 4);
    assert_eq!(json["samples"][3]["mass_kg"], 400.0);
    assert_eq!(json["samples"][3]["elapsed_s"], 30.0);
}

#[test]
fn telemetry_csv_uses_frame_field_names() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("telemetry.csv");
    let model = model();
    let frames = sample(&model, 3);
    let meta = telemetry::Metadata {
        source: "unit",
        smooth_factor: 2,
        scene_scale: 1.0,
        duration_s: 30.0,
        control_points: 4,
        path_points: 10,
    };
    telemetry::write_for_extension(&path, &meta, &frames).expect("csv");

    let mut reader = csv::Reader::from_path(&path).unwrap();
    let headers = reader.headers().unwrap().clone();
    assert_eq!(&headers[0], "progress");
    assert!(headers.iter().any(|h| h == "altitude_m"));
    assert_eq!(reader.records().count(), 3);
}
