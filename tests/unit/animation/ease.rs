use super::*;

const ALL: [Ease; 4] = [Ease::Linear, Ease::InQuad, Ease::OutQuad, Ease::InOutQuad];

#[test]
fn endpoints_are_stable() {
    for ease in ALL {
        assert_eq!(ease.apply(0.0), 0.0);
        assert_eq!(ease.apply(1.0), 1.0);
    }
}

#[test]
fn monotonic_spot_check() {
    for ease in ALL {
        let a = ease.apply(0.25);
        let b = ease.apply(0.5);
        let c = ease.apply(0.75);
        assert!(a < b);
        assert!(b < c);
    }
}

#[test]
fn input_is_clamped() {
    for ease in ALL {
        assert_eq!(ease.apply(-3.0), 0.0);
        assert_eq!(ease.apply(7.0), 1.0);
    }
}

#[test]
fn stepped_left_keyframe_holds() {
    for right in [
        Interpolation::Step,
        Interpolation::Linear,
        Interpolation::Quadratic,
        Interpolation::Cubic,
    ] {
        assert_eq!(Ease::for_segment(Interpolation::Step, right), None);
    }
}

#[test]
fn segment_easing_follows_smooth_sides() {
    use Interpolation::*;
    assert_eq!(Ease::for_segment(Linear, Linear), Some(Ease::Linear));
    assert_eq!(Ease::for_segment(Linear, Step), Some(Ease::Linear));
    assert_eq!(Ease::for_segment(Quadratic, Linear), Some(Ease::InQuad));
    assert_eq!(Ease::for_segment(Linear, Quadratic), Some(Ease::OutQuad));
    assert_eq!(Ease::for_segment(Quadratic, Quadratic), Some(Ease::InOutQuad));
    assert_eq!(Ease::for_segment(Cubic, Step), Some(Ease::InQuad));
}
