use descent_replay::core::constants::MOON_RADIUS_M;
use descent_replay::core::vector::{Vector3, approx_eq};
use descent_replay::diagnostics::{Event, NullSink, RecordingSink};
use descent_replay::trajectory::spline::{self, smoothed_len};
use descent_replay::trajectory::{
    ChannelKind, PositionError, Progress, TrajectoryBuilder, TrajectoryError, TrajectoryModel,
};

fn six_waypoints() -> Vec<Vector3> {
    vec![
        [0.0, 0.0, 0.0],
        [1.0, 2.0, 0.0],
        [2.0, 3.0, 1.0],
        [4.0, 3.0, 1.0],
        [5.0, 1.0, 2.0],
        [6.0, 0.0, 2.0],
    ]
}

fn descent(smooth_factor: usize, scale: f64) -> TrajectoryModel {
    TrajectoryBuilder::new(six_waypoints(), vec![0.0, 4.0, 8.0, 10.0, 16.0, 20.0])
        .smooth_factor(smooth_factor)
        .scale(scale)
        .build(&NullSink)
        .expect("valid trajectory")
}

#[test]
fn zero_smoothing_keeps_waypoints_and_uniform_segment_speeds() {
    let model = descent(0, 1.0);
    assert_eq!(model.smoothed_path(), six_waypoints().as_slice());
    let speed = model.speed_at(0.0).expect("in range");
    assert!((speed - 0.05).abs() < 1e-12, "speed_at(0) = {speed}");
    // third segment lasts 2 s
    assert!((model.speed_at(0.45).unwrap() - 0.1).abs() < 1e-12);
}

#[test]
fn smoothing_inserts_points_and_keeps_endpoints() {
    let model = descent(3, 0.001);
    assert_eq!(model.smoothed_path().len(), smoothed_len(6, 3));
    assert_eq!(model.smoothed_path().len(), 21);

    let first = model.vertex_at(0.0).unwrap();
    let last = model.vertex_at(1.0).unwrap();
    assert!(approx_eq(&first, &[0.0, 0.0, 0.0], 1e-12));
    assert!(approx_eq(&last, &[0.006, 0.0, 0.002], 1e-12));
}

#[test]
fn groups_share_boundary_control_points() {
    let path = spline::build(&six_waypoints(), 2);
    // group boundary at waypoint 3 lands on path index 3 * (2 + 1)
    assert!(approx_eq(&path[9], &[4.0, 3.0, 1.0], 1e-12));
    assert!(approx_eq(&path[0], &[0.0, 0.0, 0.0], 1e-12));
    assert!(approx_eq(path.last().unwrap(), &[6.0, 0.0, 2.0], 1e-12));
}

#[test]
fn interior_points_follow_cubic_then_linear_group() {
    let waypoints = vec![
        [0.0, 0.0, 0.0],
        [2.0, 1.0, 0.0],
        [3.0, 0.0, 0.0],
        [5.0, 3.0, 0.0],
        [7.0, 6.0, 0.0],
    ];
    let path = spline::build(&waypoints, 1);
    assert_eq!(path.len(), 9);

    // cubic over waypoints 0..=3 at t = 1/6: Bernstein weights 125, 75, 15, 1 over 216
    let expected = [200.0 / 216.0, 78.0 / 216.0, 0.0];
    assert!(approx_eq(&path[1], &expected, 1e-12), "path[1] = {:?}", path[1]);
    assert!(approx_eq(&path[6], &[5.0, 3.0, 0.0], 1e-12));
    // trailing linear group over waypoints 3..=4
    assert!(approx_eq(&path[7], &[6.0, 4.5, 0.0], 1e-12));
    assert!(approx_eq(&path[8], &[7.0, 6.0, 0.0], 1e-12));
}

#[test]
fn trailing_quadratic_group_uses_its_own_parameter() {
    let path = spline::build(&six_waypoints(), 1);
    assert_eq!(path.len(), 11);
    // quadratic over waypoints 3..=5 at t = 1/4: weights 9, 6, 1 over 16
    let expected = [72.0 / 16.0, 33.0 / 16.0, 23.0 / 16.0];
    assert!(approx_eq(&path[7], &expected, 1e-12), "path[7] = {:?}", path[7]);
    assert!(approx_eq(&path[8], &spline::bezier_point(&six_waypoints()[3..], 0.5), 1e-12));
}

#[test]
fn bezier_midpoint_of_straight_line_is_its_middle() {
    let mid = spline::bezier_point(&[[0.0, 0.0, 0.0], [2.0, 2.0, 2.0]], 0.5);
    assert!(approx_eq(&mid, &[1.0, 1.0, 1.0], 1e-12));
}

#[test]
fn vertex_interpolates_between_path_points() {
    let model = descent(0, 1.0);
    // 0.1 * 5 = 0.5 of the way from waypoint 0 to waypoint 1
    let v = model.vertex_at(0.1).unwrap();
    assert!(approx_eq(&v, &[0.5, 1.0, 0.0], 1e-9));
}

#[test]
fn queries_outside_unit_range_are_rejected() {
    let model = descent(3, 0.001);
    assert_eq!(model.vertex_at(1.5), Err(PositionError::OutOfRange(1.5)));
    assert_eq!(model.speed_at(-0.1), Err(PositionError::OutOfRange(-0.1)));
    assert!(model.channel_at(ChannelKind::Mass, 2.0).is_err());
    assert!(model.altitude_at(f64::NAN).is_err());
    assert!(Progress::new(0.5).is_ok());
}

#[test]
fn speed_at_end_matches_last_segment() {
    let model = descent(3, 0.001);
    let end = model.speed_at(1.0).unwrap();
    let almost = model.speed_at(1.0 - 1e-9).unwrap();
    assert_eq!(end, almost);
    assert!((end - 1.0 / (5.0 * 4.0)).abs() < 1e-12);
    for i in 0..=100 {
        assert!(model.speed_at(i as f64 / 100.0).unwrap() > 0.0);
    }
}

#[test]
fn single_sample_channel_is_constant() {
    let model = TrajectoryBuilder::new(six_waypoints(), vec![0.0, 4.0, 8.0, 10.0, 16.0, 20.0])
        .channel(ChannelKind::Mass, vec![1000.0])
        .build(&NullSink)
        .unwrap();
    assert_eq!(model.channel_at(ChannelKind::Mass, 0.37).unwrap(), 1000.0);
    assert_eq!(model.channel_at(ChannelKind::Mass, 1.0).unwrap(), 1000.0);
}

#[test]
fn channel_interpolates_and_hits_last_sample_at_end() {
    let model = TrajectoryBuilder::new(six_waypoints(), vec![0.0, 4.0, 8.0, 10.0, 16.0, 20.0])
        .channel(ChannelKind::Pitch, vec![10.0, 20.0, 30.0])
        .build(&NullSink)
        .unwrap();
    assert_eq!(model.channel_at(ChannelKind::Pitch, 0.0).unwrap(), 10.0);
    assert!((model.channel_at(ChannelKind::Pitch, 0.25).unwrap() - 15.0).abs() < 1e-12);
    assert!((model.channel_at(ChannelKind::Pitch, 0.5).unwrap() - 20.0).abs() < 1e-12);
    assert_eq!(model.channel_at(ChannelKind::Pitch, 1.0).unwrap(), 30.0);
}

#[test]
fn missing_channels_read_as_zero() {
    let model = descent(3, 0.001);
    assert!(!model.has_channel(ChannelKind::Mass));
    assert_eq!(model.channel_at(ChannelKind::Mass, 0.5).unwrap(), 0.0);
    assert!(model.has_channel(ChannelKind::ElapsedTime));
    assert_eq!(model.channel_at(ChannelKind::ElapsedTime, 1.0).unwrap(), 20.0);
}

#[test]
fn empty_channel_is_reported_and_dropped() {
    let sink = RecordingSink::new();
    let model = TrajectoryBuilder::new(six_waypoints(), vec![0.0, 4.0, 8.0, 10.0, 16.0, 20.0])
        .channel(ChannelKind::VerticalVelocity, Vec::new())
        .build(&sink)
        .unwrap();
    assert!(!model.has_channel(ChannelKind::VerticalVelocity));
    assert_eq!(
        sink.count(|e| matches!(e, Event::ChannelRejected { channel } if *channel == "vertical velocity")),
        1
    );
}

#[test]
fn too_few_waypoints_or_times_fail_and_are_reported() {
    let sink = RecordingSink::new();
    let err = TrajectoryBuilder::new(vec![[1.0, 0.0, 0.0]], vec![0.0, 1.0])
        .build(&sink)
        .unwrap_err();
    assert_eq!(err, TrajectoryError::NotEnoughWaypoints(1));

    let err = TrajectoryBuilder::new(six_waypoints(), vec![0.0])
        .build(&sink)
        .unwrap_err();
    assert_eq!(err, TrajectoryError::NotEnoughTimes(1));

    assert_eq!(
        sink.count(|e| matches!(e, Event::TrajectoryRejected { .. })),
        2
    );
    assert_eq!(sink.count(|e| matches!(e, Event::TrajectoryBuilt { .. })), 0);
}

#[test]
fn non_increasing_times_only_warn() {
    let sink = RecordingSink::new();
    let model = TrajectoryBuilder::new(six_waypoints(), vec![0.0, 4.0, 4.0, 10.0, 9.0, 20.0])
        .build(&sink)
        .expect("still builds");
    assert_eq!(model.times().len(), 6);
    let warnings: Vec<usize> = sink
        .events()
        .iter()
        .filter_map(|e| match e {
            Event::NonIncreasingTime { index, .. } => Some(*index),
            _ => None,
        })
        .collect();
    assert_eq!(warnings, vec![1, 3]);
}

#[test]
fn altitude_and_downrange_follow_reference_sphere() {
    let r = MOON_RADIUS_M;
    let theta: f64 = 0.01;
    let model = TrajectoryBuilder::new(
        vec![
            [r + 1000.0, 0.0, 0.0],
            [r * theta.cos(), r * theta.sin(), 0.0],
        ],
        vec![0.0, 60.0],
    )
    .scale(0.001)
    .build(&NullSink)
    .unwrap();

    assert!((model.altitude_at(0.0).unwrap() - 1000.0).abs() < 1e-6);
    assert!(model.altitude_at(1.0).unwrap().abs() < 1e-6);
    assert!((model.downrange_distance_at(0.0).unwrap() - r * theta).abs() < 1e-6);
    assert!(model.downrange_distance_at(1.0).unwrap().abs() < 1e-9);
    assert_eq!(model.duration_s(), 60.0);
}

#[test]
fn channel_names_parse() {
    assert_eq!("mass".parse::<ChannelKind>().unwrap(), ChannelKind::Mass);
    assert_eq!("vr".parse::<ChannelKind>().unwrap(), ChannelKind::VerticalVelocity);
    assert!("altitude".parse::<ChannelKind>().is_err());
}
