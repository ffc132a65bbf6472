use super::*;
use crate::geom::Point;
use crate::oracle::OracleStrategy;

fn square_piece(id: &str, side: f64, quantity: u32) -> Piece {
    Piece {
        id: id.to_string(),
        polygon: crate::geom::Polygon::new(vec![
            Point::new(0.0, 0.0),
            Point::new(side, 0.0),
            Point::new(side, side),
            Point::new(0.0, side),
        ])
        .unwrap(),
        quantity,
    }
}

#[test]
fn expand_pieces_respects_quantity_and_naming() {
    let pieces = vec![square_piece("a", 5.0, 3)];
    let opts = NestOptions::default();
    let expanded = expand_pieces(&pieces, &opts);
    assert_eq!(expanded.len(), 3);
    assert_eq!(expanded[0].id, "a_1");
    assert_eq!(expanded[1].id, "a_2");
    assert_eq!(expanded[2].id, "a_3");
    for p in &expanded {
        assert_eq!(p.original_id, "a");
    }
}

#[test]
fn expand_pieces_default_rotation_set_has_four_orientations() {
    let pieces = vec![square_piece("a", 5.0, 1)];
    let opts = NestOptions::default();
    let expanded = expand_pieces(&pieces, &opts);
    assert_eq!(expanded[0].orientations.len(), 4);
}

#[test]
fn no_rotation_option_yields_single_orientation() {
    let pieces = vec![square_piece("a", 5.0, 1)];
    let opts = NestOptions {
        allow_rotation: false,
        ..Default::default()
    };
    let expanded = expand_pieces(&pieces, &opts);
    assert_eq!(expanded[0].orientations.len(), 1);
    assert_eq!(expanded[0].orientations[0].angle, 0.0);
}

#[test]
fn margin_does_not_change_a_piece_own_outline() {
    // Margin is applied post-placement as clearance between pieces (see
    // `margin_keeps_pieces_apart_without_shrinking_the_bin`), not baked into
    // each piece's own expanded outline, so a piece's area is margin-independent.
    let pieces = vec![square_piece("a", 5.0, 1)];
    let no_margin = expand_pieces(&pieces, &NestOptions::default());
    let with_margin = expand_pieces(
        &pieces,
        &NestOptions {
            margin: 1.0,
            ..Default::default()
        },
    );
    assert!((with_margin[0].area() - no_margin[0].area()).abs() < 1e-9);
}

#[test]
fn sort_by_area_desc_orders_largest_first() {
    let pieces = vec![square_piece("small", 2.0, 1), square_piece("big", 8.0, 1)];
    let opts = NestOptions::default();
    let expanded = sort_by_area_desc(expand_pieces(&pieces, &opts));
    assert_eq!(expanded[0].original_id, "big");
    assert_eq!(expanded[1].original_id, "small");
}

#[test]
fn single_rectangle_places_at_origin() {
    let pieces = vec![square_piece("a", 10.0, 1)];
    let opts = NestOptions::default();
    let result = pack(&pieces, 20.0, 20.0, &opts);
    assert_eq!(result.placed.len(), 1);
    assert_eq!(result.unplaced.len(), 0);
    assert_eq!(result.placed[0].x, 0.0);
    assert_eq!(result.placed[0].y, 0.0);
}

#[test]
fn two_rectangles_side_by_side_both_fit() {
    let pieces = vec![square_piece("a", 10.0, 2)];
    let opts = NestOptions {
        allow_rotation: false,
        ..Default::default()
    };
    let result = pack(&pieces, 20.0, 10.0, &opts);
    assert_eq!(result.placed.len(), 2);
    assert!(result.unplaced.is_empty());
    let mut xs: Vec<f64> = result.placed.iter().map(|p| p.x).collect();
    xs.sort_by(|a, b| a.partial_cmp(b).unwrap());
    assert_eq!(xs, vec![0.0, 10.0]);
}

#[test]
fn overflow_piece_reported_unplaced_not_dropped() {
    let pieces = vec![square_piece("a", 10.0, 3)];
    let opts = NestOptions {
        allow_rotation: false,
        ..Default::default()
    };
    let result = pack(&pieces, 20.0, 10.0, &opts);
    assert_eq!(result.placed.len(), 2);
    assert_eq!(result.unplaced.len(), 1);
    assert_eq!(result.unplaced[0].original_id, "a");
}

#[test]
fn rotation_lets_a_taller_piece_fit_a_wide_short_bin() {
    let tall = Piece {
        id: "tall".to_string(),
        polygon: crate::geom::Polygon::new(vec![
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(4.0, 12.0),
            Point::new(0.0, 12.0),
        ])
        .unwrap(),
        quantity: 1,
    };
    let opts = NestOptions {
        allow_rotation: true,
        rotation_angles: vec![0, 90],
        ..Default::default()
    };
    let result = pack(&[tall], 15.0, 6.0, &opts);
    assert_eq!(result.placed.len(), 1);
    assert_eq!(result.placed[0].rotation, 90.0);
}

#[test]
fn greedy_bottom_left_and_best_fit_both_place_a_trivial_single_piece() {
    let pieces = vec![square_piece("a", 10.0, 1)];
    let opts = NestOptions::default();
    let expanded = sort_by_area_desc(expand_pieces(&pieces, &opts));
    let bl = pack_greedy(&expanded, 20.0, 20.0, OracleStrategy::BottomLeft, opts.margin);
    let bf = pack_greedy(&expanded, 20.0, 20.0, OracleStrategy::BestFit, opts.margin);
    assert_eq!(bl.placed.len(), 1);
    assert_eq!(bf.placed.len(), 1);
}

#[test]
fn margin_keeps_pieces_apart_without_shrinking_the_bin() {
    // §8 scenario 6: two 10x10 squares, bin 25x10, margin 2. Both must
    // still be placed, with their centers at least 12 apart along x.
    let pieces = vec![square_piece("a", 10.0, 2)];
    let opts = NestOptions {
        allow_rotation: false,
        margin: 2.0,
        ..Default::default()
    };
    let result = pack(&pieces, 25.0, 10.0, &opts);
    assert_eq!(result.placed.len(), 2, "both squares should still fit");
    let centers: Vec<f64> = result.placed.iter().map(|p| p.x + 5.0).collect();
    assert!(
        (centers[1] - centers[0]).abs() >= 12.0 - 1e-9,
        "centers should be at least 12 apart, got {:?}",
        centers
    );
}

#[test]
fn margin_zero_matches_unmargined_behavior() {
    let pieces = vec![square_piece("a", 10.0, 2)];
    let opts = NestOptions {
        allow_rotation: false,
        ..Default::default()
    };
    let result = pack(&pieces, 25.0, 10.0, &opts);
    assert_eq!(result.placed.len(), 2);
    let mut xs: Vec<f64> = result.placed.iter().map(|p| p.x).collect();
    xs.sort_by(|a, b| a.partial_cmp(b).unwrap());
    assert_eq!(xs, vec![0.0, 10.0]);
}

#[test]
fn pack_is_deterministic_for_bottom_left() {
    let pieces = vec![square_piece("a", 7.0, 5)];
    let opts = NestOptions::default();
    let first = pack(&pieces, 30.0, 30.0, &opts);
    let second = pack(&pieces, 30.0, 30.0, &opts);
    assert_eq!(first.placed.len(), second.placed.len());
    for (a, b) in first.placed.iter().zip(second.placed.iter()) {
        assert_eq!(a.id, b.id);
        assert_eq!(a.x, b.x);
        assert_eq!(a.y, b.y);
    }
}
