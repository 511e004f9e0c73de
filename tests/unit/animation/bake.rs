use super::*;
use crate::animation::keyframe::Keyframe;

fn ramp() -> PropertySignal<f64> {
    PropertySignal::from_keyframes(vec![
        Keyframe::linear(Time(0), 0.0),
        Keyframe::cubic(Time(40), 8.0),
        Keyframe::linear(Time(100), 100.0),
    ])
    .unwrap()
}

fn r(start: i64, end: i64) -> TimeRange {
    TimeRange::new(Time(start), Time(end)).unwrap()
}

#[test]
fn defaults_are_serial_unit_stride() {
    let opts = BakeOpts::default();
    assert_eq!(opts.stride, Time(1));
    assert!(!opts.parallel);
    assert_eq!(opts.threads, None);
}

#[test]
fn serial_bake_samples_every_stride() {
    let opts = BakeOpts {
        stride: Time(25),
        ..BakeOpts::default()
    };
    let samples = PropertySignal::constant(2.0).bake(r(0, 101), &opts).unwrap();
    let times: Vec<_> = samples.iter().map(|(t, _)| t.0).collect();
    assert_eq!(times, vec![0, 25, 50, 75, 100]);
    assert!(samples.iter().all(|(_, v)| *v == 2.0));
}

#[test]
fn stride_that_divides_range_excludes_end() {
    let opts = BakeOpts {
        stride: Time(5),
        ..BakeOpts::default()
    };
    let samples = ramp().bake(r(-10, 10), &opts).unwrap();
    assert_eq!(samples.len(), 4);
    assert_eq!(samples.last().map(|(t, _)| *t), Some(Time(5)));
}

#[test]
fn parallel_bake_matches_serial() {
    let serial = ramp().bake(r(-20, 130), &BakeOpts::default()).unwrap();
    let opts = BakeOpts {
        parallel: true,
        threads: Some(2),
        chunk_size: 7,
        ..BakeOpts::default()
    };
    let parallel = ramp().bake(r(-20, 130), &opts).unwrap();
    assert_eq!(serial, parallel);
}

#[test]
fn invalid_options_are_rejected() {
    let zero_stride = BakeOpts {
        stride: Time(0),
        ..BakeOpts::default()
    };
    assert!(matches!(
        ramp().bake(r(0, 10), &zero_stride),
        Err(SignalError::Validation(_))
    ));

    let zero_threads = BakeOpts {
        parallel: true,
        threads: Some(0),
        ..BakeOpts::default()
    };
    assert!(ramp().bake(r(0, 10), &zero_threads).is_err());

    let empty = TimeRange {
        start: Time(5),
        end: Time(5),
    };
    assert!(ramp().bake(empty, &BakeOpts::default()).is_err());
}

#[test]
fn oversized_requests_are_rejected_before_sampling() {
    let s = PropertySignal::constant(1.0);
    let err = s.bake(TimeRange::all(), &BakeOpts::default()).unwrap_err();
    assert!(matches!(err, SignalError::Validation(_)));

    let limit = MAX_BAKE_SAMPLES as i64;
    assert!(s.bake(r(0, limit + 1), &BakeOpts::default()).is_err());
    let coarse = BakeOpts {
        stride: Time(limit),
        ..BakeOpts::default()
    };
    assert_eq!(s.bake(r(0, limit * 3), &coarse).unwrap().len(), 3);
}
