use geo_planar::coordinate_position::{coord_pos_relative_to_ring, CoordPos};
use geo_planar::kernels::{orient2d, Orientation};
use geo_planar::line_intersection::{line_intersection, LineIntersection};
use geo_planar::{coord, line_string, Line};
use rand::{Rng, SeedableRng};

#[test]
fn orientation_sentinels() {
    let origin = coord! { x: 0.0, y: 0.0 };
    let east = coord! { x: 1.0, y: 0.0 };
    assert_eq!(
        orient2d(origin, east, coord! { x: 0.0, y: 1.0 }),
        Orientation::CounterClockwise
    );
    assert_eq!(
        orient2d(origin, east, coord! { x: 0.0, y: -1.0 }),
        Orientation::Clockwise
    );
    assert_eq!(
        orient2d(origin, east, coord! { x: 2.0, y: 0.0 }),
        Orientation::Collinear
    );
}

#[test]
fn orientation_antisymmetry_on_random_triples() {
    let mut rng = rand::rngs::StdRng::seed_from_u64(7);
    for _ in 0..1000 {
        let p = coord! { x: rng.gen_range(-1e3..1e3), y: rng.gen_range(-1e3..1e3) };
        let q = coord! { x: rng.gen_range(-1e3..1e3), y: rng.gen_range(-1e3..1e3) };
        let r = coord! { x: rng.gen_range(-1e3..1e3), y: rng.gen_range(-1e3..1e3) };
        assert_eq!(orient2d(p, q, r), orient2d(q, p, r).reversed());
        assert_eq!(orient2d(p, p, q), Orientation::Collinear);
    }
}

#[test]
fn ring_inclusion_scenario() {
    let ring = line_string![
        (x: 0.0, y: 0.0),
        (x: 4.0, y: 0.0),
        (x: 4.0, y: 4.0),
        (x: 0.0, y: 4.0),
        (x: 0.0, y: 0.0),
    ];
    assert_eq!(
        coord_pos_relative_to_ring(coord! { x: 2.0, y: 2.0 }, &ring),
        CoordPos::Inside
    );
    assert_eq!(
        coord_pos_relative_to_ring(coord! { x: 4.0, y: 2.0 }, &ring),
        CoordPos::OnBoundary
    );
    assert_eq!(
        coord_pos_relative_to_ring(coord! { x: 5.0, y: 2.0 }, &ring),
        CoordPos::Outside
    );
}

#[test]
fn ring_crossing_parity_for_random_points() {
    // a star-shaped ring with reflex vertices
    let ring = line_string![
        (x: 0.0, y: 10.0),
        (x: 2.0, y: 2.0),
        (x: 10.0, y: 0.0),
        (x: 2.0, y: -2.0),
        (x: 0.0, y: -10.0),
        (x: -2.0, y: -2.0),
        (x: -10.0, y: 0.0),
        (x: -2.0, y: 2.0),
        (x: 0.0, y: 10.0),
    ];
    let mut rng = rand::rngs::StdRng::seed_from_u64(23);
    for _ in 0..500 {
        let p = coord! { x: rng.gen_range(-12.0..12.0), y: rng.gen_range(-12.0..12.0) };
        let pos = coord_pos_relative_to_ring(p, &ring);
        // mirroring the ray axis through the ring's symmetry must agree
        let mirrored = coord! { x: -p.x, y: p.y };
        let mirrored_pos = coord_pos_relative_to_ring(mirrored, &ring);
        assert_eq!(pos, mirrored_pos, "asymmetry at {:?}", p);
    }
}

#[test]
fn proper_crossing_scenario() {
    let l1 = Line::new(coord! { x: 0.0, y: 0.0 }, coord! { x: 2.0, y: 2.0 });
    let l2 = Line::new(coord! { x: 0.0, y: 2.0 }, coord! { x: 2.0, y: 0.0 });
    match line_intersection(l1, l2) {
        Some(LineIntersection::SinglePoint {
            intersection,
            is_proper,
        }) => {
            assert_eq!(intersection, coord! { x: 1.0, y: 1.0 });
            assert!(is_proper);
        }
        other => panic!("expected a proper single point, got {:?}", other),
    }
}

#[test]
fn collinear_overlap_scenario() {
    let l1 = Line::new(coord! { x: 0.0, y: 0.0 }, coord! { x: 4.0, y: 0.0 });
    let l2 = Line::new(coord! { x: 2.0, y: 0.0 }, coord! { x: 6.0, y: 0.0 });
    match line_intersection(l1, l2) {
        Some(LineIntersection::Collinear { intersection }) => {
            assert_eq!(intersection.start, coord! { x: 2.0, y: 0.0 });
            assert_eq!(intersection.end, coord! { x: 4.0, y: 0.0 });
        }
        other => panic!("expected collinear overlap, got {:?}", other),
    }
}

#[test]
fn intersections_stay_inside_segment_envelopes() {
    let mut rng = rand::rngs::StdRng::seed_from_u64(1234);
    for _ in 0..500 {
        let l1 = Line::new(
            coord! { x: rng.gen_range(-100.0..100.0), y: rng.gen_range(-100.0..100.0) },
            coord! { x: rng.gen_range(-100.0..100.0), y: rng.gen_range(-100.0..100.0) },
        );
        let l2 = Line::new(
            coord! { x: rng.gen_range(-100.0..100.0), y: rng.gen_range(-100.0..100.0) },
            coord! { x: rng.gen_range(-100.0..100.0), y: rng.gen_range(-100.0..100.0) },
        );
        if let Some(LineIntersection::SinglePoint { intersection, .. }) =
            line_intersection(l1, l2)
        {
            for line in [l1, l2] {
                let min_x = line.start.x.min(line.end.x);
                let max_x = line.start.x.max(line.end.x);
                let min_y = line.start.y.min(line.end.y);
                let max_y = line.start.y.max(line.end.y);
                assert!(intersection.x >= min_x && intersection.x <= max_x);
                assert!(intersection.y >= min_y && intersection.y <= max_y);
            }
        }
    }
}

#[test]
fn intersection_is_deterministic() {
    let l1 = Line::new(
        coord! { x: 0.000001, y: 0.0 },
        coord! { x: 97.33, y: 41.17 },
    );
    let l2 = Line::new(
        coord! { x: 0.0, y: 25.0 },
        coord! { x: 88.88, y: 0.001 },
    );
    let first = line_intersection(l1, l2);
    for _ in 0..10 {
        assert_eq!(line_intersection(l1, l2), first);
    }
}
