use super::*;

#[test]
fn from_rows_rejects_ragged_input() {
    let err = Grid::from_rows(vec![vec![1, 2], vec![3]]).unwrap_err();
    assert!(err.to_string().contains("row 1"));
}

#[test]
fn flat_indexing_is_row_major() {
    let g = CharGrid::from_lines(&["ab", "cd", "ef"]).unwrap();
    assert_eq!(g.rows(), 3);
    assert_eq!(g.cols(), 2);
    assert_eq!(g[(2, 1)], 'f');
    assert_eq!(g.get(1, 0), Some(&'c'));
    assert_eq!(g.get(3, 0), None);
    assert_eq!(g.get(0, 2), None);
    assert_eq!(g.row(1), &['c', 'd']);
}

#[test]
fn set_out_of_bounds_is_a_validation_error() {
    let mut g = CharGrid::blank(2, 2);
    assert!(g.set(1, 1, 'x').is_ok());
    assert!(matches!(g.set(2, 0, 'x'), Err(MorphError::Validation(_))));
    assert_eq!(g.to_lines(), vec!["  ".to_string(), " x".to_string()]);
}

#[test]
fn occupied_lists_non_blank_cells() {
    let g = CharGrid::from_lines(&["a  ", "  b"]).unwrap();
    assert_eq!(g.occupied(), vec![Point::new(0, 0), Point::new(1, 2)]);
}

#[test]
fn ensure_same_shape_reports_both_shapes() {
    let a = CharGrid::blank(2, 3);
    let b = CharGrid::blank(3, 2);
    let err = a.ensure_same_shape(&b, "interpolate").unwrap_err();
    assert!(err.to_string().contains("2x3 vs 3x2"));
    assert!(a.ensure_same_shape(&CharGrid::blank(2, 3), "x").is_ok());
}

#[test]
fn display_joins_rows_with_newlines() {
    let g = CharGrid::from_lines(&["ab", "cd"]).unwrap();
    assert_eq!(g.to_string(), "ab\ncd");
}

#[test]
fn lerp_floor_hits_both_endpoints() {
    let a = Point::new(0, 10);
    let b = Point::new(5, 0);
    assert_eq!(a.lerp_floor(b, 0, 4), a);
    assert_eq!(a.lerp_floor(b, 4, 4), b);
    assert_eq!(a.lerp_floor(b, 2, 4), Point::new(2, 5));
}

#[test]
fn lerp_floor_matches_integer_floor_on_every_step() {
    for d in 0..=60usize {
        for steps in 1..=60usize {
            for step in 0..=steps {
                let forward = Point::new(0, 0).lerp_floor(Point::new(d, d), step, steps);
                assert_eq!(forward.row, d * step / steps, "d={d} step={step}/{steps}");
                assert_eq!(forward.col, d * step / steps, "d={d} step={step}/{steps}");

                let back = Point::new(60, 60).lerp_floor(Point::new(60 - d, 60 - d), step, steps);
                let want = 60 - (d * step).div_ceil(steps);
                assert_eq!(back, Point::new(want, want), "d={d} step={step}/{steps}");
            }
        }
    }
    assert_eq!(
        Point::new(0, 0).lerp_floor(Point::new(0, 55), 3, 11),
        Point::new(0, 15)
    );
}

#[test]
fn fps_rejects_zero_and_reports_period() {
    assert!(Fps::new(0).is_err());
    let fps = Fps::new(20).unwrap();
    assert_eq!(fps.frame_duration(), std::time::Duration::from_millis(50));
    assert_eq!(fps.secs_to_frames(1.5), 30);
}
