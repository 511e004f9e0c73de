use super::*;

fn r(start: i64, end: i64) -> TimeRange {
    TimeRange::new(Time(start), Time(end)).unwrap()
}

#[test]
fn union_merges_overlaps_across_lists() {
    let a = vec![r(0, 5), r(10, 15), r(30, 40)];
    let b = vec![r(3, 12), r(20, 25)];
    let merged: Vec<_> = union_ranges(a, b).collect();
    assert_eq!(merged, vec![r(0, 15), r(20, 25), r(30, 40)]);
}

#[test]
fn union_keeps_touching_ranges_apart() {
    let merged: Vec<_> = union_ranges(vec![r(0, 5)], vec![r(5, 10)]).collect();
    assert_eq!(merged, vec![r(0, 5), r(5, 10)]);
}

#[test]
fn union_chains_through_alternating_heads() {
    let a = vec![r(0, 4), r(6, 10)];
    let b = vec![r(3, 7), r(9, 12)];
    let merged: Vec<_> = union_ranges(a, b).collect();
    assert_eq!(merged, vec![r(0, 12)]);
}

#[test]
fn union_with_empty_side_is_identity() {
    let a = vec![r(1, 2), r(4, 8)];
    let merged: Vec<_> = union_ranges(a.clone(), Vec::new()).collect();
    assert_eq!(merged, a);
    let merged: Vec<_> = union_ranges(Vec::new(), a.clone()).collect();
    assert_eq!(merged, a);
    assert_eq!(union_ranges(Vec::new(), Vec::new()).count(), 0);
}

#[test]
fn union_drops_empty_ranges() {
    let merged: Vec<_> = union_ranges(vec![r(2, 2), r(4, 6)], vec![r(5, 5)]).collect();
    assert_eq!(merged, vec![r(4, 6)]);
}

#[test]
fn repeat_tiles_cover_outer_range() {
    let tiles: Vec<_> = repeat_tiles(r(0, 10), r(5, 27)).collect();
    assert_eq!(
        tiles,
        vec![
            (r(5, 10), TimeTransform::IDENTITY),
            (r(10, 20), TimeTransform::offset(Time(10))),
            (r(20, 27), TimeTransform::offset(Time(20))),
        ]
    );
}

#[test]
fn repeat_tiles_handle_negative_indices() {
    let tiles: Vec<_> = repeat_tiles(r(100, 110), r(85, 100)).collect();
    assert_eq!(
        tiles,
        vec![
            (r(85, 90), TimeTransform::offset(Time(-20))),
            (r(90, 100), TimeTransform::offset(Time(-10))),
        ]
    );
}

#[test]
fn repeat_tiles_skip_boundary_only_overlap() {
    let tiles: Vec<_> = repeat_tiles(r(0, 10), r(0, 20)).collect();
    assert_eq!(tiles.len(), 2);
}

#[test]
fn degenerate_period_yields_nothing() {
    assert_eq!(repeat_tiles(r(4, 4), r(0, 100)).count(), 0);
    assert_eq!(repeat_tiles(r(0, 10), r(3, 3)).count(), 0);
}
