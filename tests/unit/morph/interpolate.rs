use rand::{SeedableRng, rngs::StdRng};

use super::*;

fn rng() -> StdRng {
    StdRng::seed_from_u64(0x5eed)
}

fn filled(rows: usize, cols: usize, c: char) -> CharGrid {
    let mut g = CharGrid::blank(rows, cols);
    g.fill(c);
    g
}

#[test]
fn kind_parsing_accepts_aliases() {
    assert_eq!(
        parse_transition_kind("flip").unwrap(),
        TransitionKind::RandomFlip
    );
    assert_eq!(
        " Random_Map ".parse::<TransitionKind>().unwrap(),
        TransitionKind::RandomMap
    );
    assert_eq!(
        parse_transition_kind("ot").unwrap(),
        TransitionKind::ApproximateOt
    );
    assert!(parse_transition_kind("").is_err());
    assert!(parse_transition_kind("wipe").is_err());
}

#[test]
fn zero_steps_is_rejected() {
    let a = CharGrid::blank(2, 2);
    for kind in [
        TransitionKind::RandomFlip,
        TransitionKind::RandomMap,
        TransitionKind::ApproximateOt,
    ] {
        let err = interpolate(kind, &a, &a, 0, &mut rng()).unwrap_err();
        assert!(matches!(err, MorphError::Validation(_)), "{kind:?}");
    }
}

#[test]
fn mismatched_shapes_are_rejected() {
    let a = CharGrid::blank(2, 3);
    let b = CharGrid::blank(3, 2);
    for kind in [
        TransitionKind::RandomFlip,
        TransitionKind::RandomMap,
        TransitionKind::ApproximateOt,
    ] {
        let err = interpolate(kind, &a, &b, 4, &mut rng()).unwrap_err();
        assert!(matches!(err, MorphError::Validation(_)), "{kind:?}");
    }
}

#[test]
fn random_flip_three_by_three_scenario() {
    let a = filled(3, 3, 'a');
    let b = filled(3, 3, 'b');
    let frames = random_flip(&a, &b, 2, &mut rng()).unwrap();

    assert_eq!(frames.len(), 3);
    for frame in &frames {
        assert!(frame.cells().iter().all(|c| *c == 'a' || *c == 'b'));
    }
    assert_eq!(frames[2], b);
}

#[test]
fn random_flip_cells_never_flip_back() {
    let a = filled(6, 9, 'a');
    let b = filled(6, 9, 'b');
    let frames = random_flip(&a, &b, 7, &mut rng()).unwrap();
    assert_eq!(frames.len(), 8);
    for i in 0..a.len() {
        let mut seen_b = false;
        for f in &frames {
            let c = f.cells()[i];
            if seen_b {
                assert_eq!(c, 'b');
            }
            seen_b |= c == 'b';
        }
    }
    assert_eq!(frames.last().unwrap(), &b);
}

#[test]
fn random_flip_single_step_jumps_to_target() {
    let a = filled(2, 2, 'a');
    let b = filled(2, 2, 'b');
    let frames = random_flip(&a, &b, 1, &mut rng()).unwrap();
    // Flip times are all 0, so even the first frame is already the target.
    assert_eq!(frames, vec![b.clone(), b]);
}

#[test]
fn balancing_pads_shorter_list_from_its_originals() {
    let mut sources = vec![Point::new(0, 0), Point::new(1, 1)];
    let mut targets: Vec<Point> = (0..7).map(|i| Point::new(i, 3)).collect();
    balance_counts(&mut sources, &mut targets, &mut rng());

    assert_eq!(sources.len(), 7);
    assert_eq!(targets.len(), 7);
    assert!(
        sources
            .iter()
            .all(|p| *p == Point::new(0, 0) || *p == Point::new(1, 1))
    );
}

#[test]
fn balancing_is_symmetric() {
    let mut sources: Vec<Point> = (0..5).map(|i| Point::new(i, 0)).collect();
    let mut targets = vec![Point::new(9, 9)];
    balance_counts(&mut sources, &mut targets, &mut rng());
    assert_eq!(sources.len(), 5);
    assert_eq!(targets, vec![Point::new(9, 9); 5]);
}

#[test]
fn balancing_with_an_empty_side_moves_nothing() {
    let mut sources = vec![Point::new(0, 0)];
    let mut targets = Vec::new();
    balance_counts(&mut sources, &mut targets, &mut rng());
    assert!(sources.is_empty());
    assert!(targets.is_empty());
}

#[test]
fn random_map_ends_on_the_target_frame() {
    let a = CharGrid::from_lines(&["x    ", "     ", "    x"]).unwrap();
    let b = CharGrid::from_lines(&["  h  ", "  i  ", " !!! "]).unwrap();
    let frames = random_map(&a, &b, 4, &mut rng()).unwrap();

    assert_eq!(frames.len(), 5);
    assert_eq!(frames[4], b);
    // Start frame only lights source cells, drawn with target glyphs.
    assert_eq!(frames[0].occupied(), a.occupied());
    assert!(
        frames[0]
            .cells()
            .iter()
            .all(|c| *c == ' ' || "hi!".contains(*c))
    );
}

#[test]
fn random_map_from_blank_is_blank_throughout() {
    let a = CharGrid::blank(3, 3);
    let b = filled(3, 3, 'z');
    let frames = random_map(&a, &b, 3, &mut rng()).unwrap();
    assert_eq!(frames.len(), 4);
    assert!(frames.iter().all(|f| f.occupied().is_empty()));
}

#[test]
fn approximate_ot_moves_from_sources_to_targets() {
    let a = CharGrid::from_lines(&["ab   ", "     ", "     "]).unwrap();
    let b = CharGrid::from_lines(&["     ", "     ", "   cd"]).unwrap();
    let frames = approximate_ot(&a, &b, 5, &mut rng()).unwrap();

    assert_eq!(frames.len(), 6);
    assert_eq!(frames[0].occupied(), a.occupied());
    assert_eq!(frames[5].occupied(), b.occupied());
    for f in &frames {
        assert!(f.cells().iter().all(|c| *c == ' ' || c.is_ascii_graphic()));
    }
}

#[test]
fn approximate_ot_pads_single_source_scenario() {
    let a = CharGrid::from_lines(&["#     ", "      ", "      ", "      ", "      ", "      "])
        .unwrap();
    let b = CharGrid::from_lines(&["#     ", "      ", "      ", "      ", "      ", "     #"])
        .unwrap();
    let frames = approximate_ot(&a, &b, 5, &mut rng()).unwrap();
    // Both padded copies of (0,0) start together and split to the two targets.
    assert_eq!(frames[0].occupied(), vec![Point::new(0, 0)]);
    assert_eq!(
        frames[5].occupied(),
        vec![Point::new(0, 0), Point::new(5, 5)]
    );
    assert_eq!(frames[3].occupied(), vec![Point::new(0, 0), Point::new(3, 3)]);
}

#[test]
fn moving_cells_step_exactly_one_column_per_frame() {
    let mut a = CharGrid::blank(1, 50);
    a.set(0, 0, 'x').unwrap();
    let mut b = CharGrid::blank(1, 50);
    b.set(0, 49, 'y').unwrap();

    let frames = random_map(&a, &b, 49, &mut rng()).unwrap();
    for (step, frame) in frames.iter().enumerate() {
        assert_eq!(frame.occupied(), vec![Point::new(0, step)], "step {step}");
    }

    let frames = approximate_ot(&a, &b, 11, &mut rng()).unwrap();
    for (step, frame) in frames.iter().enumerate() {
        assert_eq!(frame.occupied(), vec![Point::new(0, 49 * step / 11)], "step {step}");
    }
}

#[test]
fn seeded_runs_are_reproducible() {
    let a = CharGrid::from_lines(&["a a a", " b b ", "c c c"]).unwrap();
    let b = CharGrid::from_lines(&["  x  ", " yyy ", "zzzzz"]).unwrap();
    for kind in [
        TransitionKind::RandomFlip,
        TransitionKind::RandomMap,
        TransitionKind::ApproximateOt,
    ] {
        let one = interpolate(kind, &a, &b, 6, &mut rng()).unwrap();
        let two = interpolate(kind, &a, &b, 6, &mut rng()).unwrap();
        assert_eq!(one, two, "{kind:?}");
    }
}
