use std::path::PathBuf;
use std::sync::Arc;

use descent_replay::diagnostics::{DiagnosticsSink, Event, Heading, RecordingSink, Severity};

#[test]
fn severities_separate_warnings_from_progress() {
    assert_eq!(
        Event::TrajectoryRejected {
            reason: "x".into()
        }
        .severity(),
        Severity::Error
    );
    assert_eq!(Event::SeekIgnored.severity(), Severity::Warn);
    assert_eq!(
        Event::InvalidRecord {
            file: "mass.txt",
            line: 3,
            reason: "bad".into()
        }
        .severity(),
        Severity::Warn
    );
    assert_eq!(
        Event::TrajectoryBuilt {
            control_points: 2,
            path_points: 2,
            segments: 1
        }
        .severity(),
        Severity::Info
    );
    assert!(
        Event::SpeedChanged { from: 1.0, to: 2.0 }.severity() < Severity::Info
    );
}

#[test]
fn events_render_readable_messages() {
    let rejected = Event::TrajectoryRejected {
        reason: "not enough vertices".into(),
    };
    assert_eq!(
        rejected.to_string(),
        "could not build trajectory: not enough vertices"
    );
    let invalid = Event::InvalidRecord {
        file: "pitch.txt",
        line: 7,
        reason: "`x` is not a finite number".into(),
    };
    assert!(invalid.to_string().contains("pitch.txt, line 7"));
    let scanning = Event::ScanningDirectory {
        path: PathBuf::from("data/sample_descent"),
    };
    assert!(scanning.to_string().contains("data/sample_descent"));
}

#[test]
fn recording_sink_is_shareable_through_arc() {
    let recorder = Arc::new(RecordingSink::new());
    let shared: Arc<dyn DiagnosticsSink> = recorder.clone();
    shared.record(&Event::DirectionChanged {
        heading: Heading::Backward,
        resumed: false,
    });
    shared.record(&Event::SeekIgnored);
    assert_eq!(recorder.events().len(), 2);
    assert_eq!(recorder.count(|e| *e == Event::SeekIgnored), 1);
    recorder.clear();
    assert!(recorder.events().is_empty());
}
