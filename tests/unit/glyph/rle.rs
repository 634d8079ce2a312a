use super::*;

#[test]
fn decode_expands_runs_row_major() {
    let glyph = RleGlyph {
        values: vec![0, 1, 0],
        lengths: vec![1, 4, 1],
        width: 3,
        height: 2,
    };
    let m = glyph.decode().unwrap();
    assert_eq!(m.rows(), 2);
    assert_eq!(m.cols(), 3);
    assert_eq!(m.cells(), &[false, true, true, true, true, false]);
}

#[test]
fn any_non_zero_value_is_lit() {
    let glyph = RleGlyph {
        values: vec![2],
        lengths: vec![1],
        width: 1,
        height: 1,
    };
    assert!(glyph.decode().unwrap()[(0, 0)]);
}

#[test]
fn short_runs_are_rejected() {
    let glyph = RleGlyph {
        values: vec![1],
        lengths: vec![3],
        width: 2,
        height: 2,
    };
    let err = glyph.decode().unwrap_err();
    assert!(matches!(err, MorphError::Glyph(_)));
    assert!(err.to_string().contains("expected 4"));
}

#[test]
fn mismatched_run_arrays_are_rejected() {
    let glyph = RleGlyph {
        values: vec![1, 0],
        lengths: vec![4],
        width: 2,
        height: 2,
    };
    assert!(glyph.decode().is_err());
}

#[test]
fn empty_glyph_is_rejected() {
    let glyph = RleGlyph {
        values: vec![],
        lengths: vec![],
        width: 0,
        height: 3,
    };
    assert!(glyph.decode().is_err());
}

#[test]
fn encode_merges_adjacent_pixels() {
    let m = Grid::from_rows(vec![vec![true, true, false], vec![false, false, true]]).unwrap();
    let glyph = RleGlyph::encode(&m);
    assert_eq!(glyph.values, vec![1, 0, 1]);
    assert_eq!(glyph.lengths, vec![2, 3, 1]);
    assert_eq!(glyph.decode().unwrap(), m);
}

#[test]
fn parses_the_json_shape() {
    let glyph: RleGlyph =
        serde_json::from_str(r#"{"values":[1,0],"lengths":[2,2],"width":2,"height":2}"#)
            .unwrap();
    assert_eq!(glyph.decode().unwrap().cells(), &[true, true, false, false]);
}
