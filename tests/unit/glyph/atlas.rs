use super::*;

#[test]
fn builtin_covers_letters_and_digits() {
    let atlas = GlyphAtlas::builtin();
    for ch in ('A'..='Z').chain('0'..='9') {
        let glyph = atlas.glyph(ch).unwrap().expect("glyph present");
        assert_eq!((glyph.rows(), glyph.cols()), (7, 5), "{ch}");
        assert!(glyph.cells().iter().any(|v| *v), "{ch} has no pixels");
    }
    assert_eq!(atlas.len(), FONT_5X7.len());
}

#[test]
fn lowercase_falls_back_to_uppercase() {
    let atlas = GlyphAtlas::builtin();
    assert_eq!(atlas.glyph('h').unwrap(), atlas.glyph('H').unwrap());
    assert!(atlas.contains('q'));
}

#[test]
fn missing_glyph_is_none() {
    let atlas = GlyphAtlas::builtin();
    assert!(atlas.glyph('~').unwrap().is_none());
    assert!(!atlas.contains(' '));
}

#[test]
fn builtin_letter_shape_roundtrips() {
    let atlas = GlyphAtlas::builtin();
    let t = atlas.glyph('T').unwrap().unwrap();
    assert!(t.row(0).iter().all(|v| *v));
    for r in 1..7 {
        assert_eq!(t.row(r), &[false, false, true, false, false]);
    }
}

#[test]
fn loads_json_atlas() {
    let json = r#"{
        "x": {"values": [1, 0, 1], "lengths": [1, 2, 1], "width": 2, "height": 2},
        "y": {"values": [1], "lengths": [1], "width": 1, "height": 1}
    }"#;
    let atlas = GlyphAtlas::from_json_reader(json.as_bytes()).unwrap();
    assert_eq!(atlas.len(), 2);
    let x = atlas.glyph('x').unwrap().unwrap();
    assert_eq!(x.cells(), &[true, false, false, true]);
}

#[test]
fn json_atlas_rejects_bad_keys_and_runs() {
    let multi = r#"{"ab": {"values": [1], "lengths": [1], "width": 1, "height": 1}}"#;
    assert!(matches!(
        GlyphAtlas::from_json_reader(multi.as_bytes()),
        Err(MorphError::Glyph(_))
    ));

    let short = r#"{"a": {"values": [1], "lengths": [1], "width": 2, "height": 2}}"#;
    assert!(matches!(
        GlyphAtlas::from_json_reader(short.as_bytes()),
        Err(MorphError::Glyph(_))
    ));

    assert!(matches!(
        GlyphAtlas::from_json_reader("not json".as_bytes()),
        Err(MorphError::Serde(_))
    ));
}
