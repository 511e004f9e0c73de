use super::*;
use crate::animation::keyframe::Keyframe;

fn ramp() -> PropertySignal<f64> {
    PropertySignal::from_keyframes(vec![
        Keyframe::linear(Time(0), 0.0),
        Keyframe::linear(Time(10), 10.0),
    ])
    .unwrap()
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn delay_shifts_values_later() {
    let s = delay(&ramp(), Time(5));
    assert_eq!(s.get_value(Time(5)), 0.0);
    assert_eq!(s.get_value(Time(10)), 5.0);
    assert_eq!(s.get_value(Time(15)), 10.0);
}

#[test]
fn speed_compresses_and_stretches() {
    let fast = speed(&ramp(), TimeScale::integer(2).unwrap());
    assert_eq!(fast.get_value(Time(5)), 10.0);
    assert!(approx(fast.get_value(Time(2)), 4.0));

    let slow = speed(&ramp(), TimeScale::new(1, 3).unwrap());
    assert_eq!(slow.get_value(Time(30)), 10.0);
    assert!(approx(slow.get_value(Time(15)), 5.0));
}

#[test]
fn negative_speed_plays_backwards() {
    let s = speed(&ramp(), TimeScale::NEG_ONE);
    assert_eq!(s.get_value(Time(-10)), 10.0);
    assert!(approx(s.get_value(Time(-3)), 3.0));
    assert_eq!(s.get_value(Time(0)), 0.0);
}

#[test]
fn reverse_mirrors_within_span() {
    let s = reverse(&ramp(), TimeRange::new(Time(0), Time(10)).unwrap()).unwrap();
    assert_eq!(s.get_value(Time(0)), 10.0);
    assert!(approx(s.get_value(Time(3)), 7.0));
    assert_eq!(s.get_value(Time(10)), 0.0);
}

#[test]
fn loop_repeats_period() {
    let s = loop_(&ramp(), TimeRange::new(Time(0), Time(10)).unwrap()).unwrap();
    assert_eq!(s.get_value(Time(25)), 5.0);
    assert!(approx(s.get_value(Time(-1)), 9.0));
}

#[test]
fn empty_spans_are_rejected() {
    let empty = TimeRange {
        start: Time(3),
        end: Time(3),
    };
    assert!(reverse(&ramp(), empty).is_err());
    assert!(loop_(&ramp(), empty).is_err());
}

#[test]
fn reverse_holds_stepped_segments_on_the_mirrored_side() {
    let s = PropertySignal::from_keyframes(vec![
        Keyframe::step(Time(0), 0.0),
        Keyframe::linear(Time(10), 10.0),
        Keyframe::linear(Time(20), 20.0),
    ])
    .unwrap();
    let rev = reverse(&s, TimeRange::new(Time(0), Time(20)).unwrap()).unwrap();
    for t in [12, 15, 18] {
        assert_eq!(rev.get_value(Time(t)), 0.0, "t={t}");
    }
    assert_eq!(rev.get_value(Time(10)), 10.0);
    assert_eq!(rev.get_value(Time(0)), 20.0);
}
