use super::*;

fn scale(num: i64, den: i64) -> TimeScale {
    TimeScale::new(num, den).unwrap()
}

#[test]
fn scale_is_reduced_with_positive_denominator() {
    let s = scale(4, -6);
    assert_eq!((s.num(), s.den()), (-2, 3));
    assert!(s.is_negative());
    assert_eq!(scale(3, 3), TimeScale::ONE);
}

#[test]
fn zero_scales_are_rejected() {
    assert!(TimeScale::new(0, 1).is_err());
    assert!(TimeScale::new(1, 0).is_err());
}

#[test]
fn apply_offsets_and_scales() {
    let t = TimeTransform::new(Time(100), scale(2, 1));
    assert_eq!(t * Time(5), Time(110));
    assert_eq!(TimeTransform::IDENTITY * Time(-7), Time(-7));
    assert_eq!(TimeTransform::scaled(scale(1, 2)) * Time(5), Time(2));
    assert_eq!(TimeTransform::scaled(scale(1, 2)) * Time(-5), Time(-3));
}

#[test]
fn composition_applies_right_first() {
    let a = TimeTransform::offset(Time(10));
    let b = TimeTransform::scaled(scale(3, 1));
    for t in [-4, 0, 7] {
        assert_eq!((a * b) * Time(t), a * (b * Time(t)));
        assert_eq!((b * a) * Time(t), b * (a * Time(t)));
    }
    assert_eq!((a * b) * Time(2), Time(16));
    assert_eq!((b * a) * Time(2), Time(36));
}

#[test]
fn composition_is_associative() {
    let a = TimeTransform::new(Time(3), scale(2, 1));
    let b = TimeTransform::new(Time(-8), scale(-1, 1));
    let c = TimeTransform::new(Time(5), scale(4, 1));
    assert_eq!((a * b) * c, a * (b * c));
}

#[test]
fn inverse_round_trips_when_exact() {
    let t = TimeTransform::new(Time(30), scale(3, 1));
    let inv = t.inverse().unwrap();
    for x in [-9, 0, 12, 300] {
        assert_eq!(inv * (t * Time(x)), Time(x));
    }
    assert_eq!(t * inv, TimeTransform::IDENTITY);
}

#[test]
fn inverse_is_none_between_ticks() {
    let t = TimeTransform::new(Time(1), scale(2, 1));
    assert_eq!(t.inverse(), None);
}

#[test]
fn reversing_scale_keeps_ranges_ordered() {
    let r = TimeRange::new(Time(2), Time(6)).unwrap();
    let rev = TimeTransform::new(Time(10), scale(-1, 1));
    assert_eq!(rev * r, TimeRange::new(Time(4), Time(8)).unwrap());
}

#[test]
fn scale_serializes_as_pair_and_validates() {
    let json = serde_json::to_string(&scale(6, 4)).unwrap();
    assert_eq!(json, "[3,2]");
    assert!(serde_json::from_str::<TimeScale>("[0,2]").is_err());
    assert_eq!(serde_json::from_str::<TimeScale>("[2,-4]").unwrap(), scale(-1, 2));
}

#[test]
fn unapply_undoes_mirrors_and_integer_scales() {
    let mirror = TimeTransform::new(Time(20), TimeScale::NEG_ONE);
    for t in [-7, 0, 5, 20, 33] {
        assert_eq!(mirror.unapply(mirror.apply(Time(t))), Time(t));
    }
    let stretch = TimeTransform::new(Time(3), scale(3, 1));
    assert_eq!(stretch.unapply(Time(33)), Time(10));
    // Non-integer inverse offsets still resolve to a tick.
    let half = TimeTransform::new(Time(1), scale(2, 1));
    assert!(half.inverse().is_none());
    assert_eq!(half.unapply(Time(6)), Time(2));
}

#[test]
fn apply_ticks_keeps_reversed_ranges_half_open() {
    let mirror = TimeTransform::new(Time(20), TimeScale::NEG_ONE);
    // Ticks 0..=4 land on 16..=20.
    assert_eq!(
        mirror.apply_ticks(TimeRange::new(Time(0), Time(5)).unwrap()),
        TimeRange::new(Time(16), Time(21)).unwrap()
    );
    let fwd = TimeTransform::offset(Time(2));
    assert_eq!(
        fwd.apply_ticks(TimeRange::new(Time(0), Time(5)).unwrap()),
        TimeRange::new(Time(2), Time(7)).unwrap()
    );
    assert!(
        mirror
            .apply_ticks(TimeRange {
                start: Time(4),
                end: Time(4)
            })
            .is_empty()
    );
}
