use rand::{SeedableRng, rngs::StdRng};

use super::*;

fn sample() -> Layer {
    Layer::new(CharGrid::from_lines(&["abc", "def"]).unwrap()).unwrap()
}

#[test]
fn empty_grid_is_rejected() {
    assert!(Layer::new(CharGrid::blank(0, 0)).is_err());
    assert!(Layer::new(CharGrid::blank(3, 0)).is_err());
}

#[test]
fn zero_offset_reads_straight_through() {
    let layer = sample();
    assert_eq!(layer.get_char(0, 0), 'a');
    assert_eq!(layer.get_char(1, 2), 'f');
}

#[test]
fn coordinates_wrap_in_both_directions() {
    let layer = sample();
    assert_eq!(layer.get_char(2, 3), 'a');
    assert_eq!(layer.get_char(-1, -1), 'f');
    assert_eq!(layer.get_char(-7, 10), 'e');
    assert_eq!(layer.get_char(i64::MIN, i64::MAX), layer.get_char(0, 1));
}

#[test]
fn fractional_offsets_are_floored() {
    let mut layer = sample();
    layer.set_offset(0.9, 0.2);
    assert_eq!(layer.get_char(0, 0), 'a');

    layer.set_offset(1.5, 1.0);
    assert_eq!(layer.get_char(0, 0), 'e');

    // floor(-0.5) == -1, so the view shifts one column left.
    layer.set_offset(-0.5, 0.0);
    assert_eq!(layer.get_char(0, 0), 'c');
}

#[test]
fn large_offsets_still_land_inside_the_texture() {
    let mut layer = sample();
    for (dx, dy) in [(1e6, -1e6), (-123_456.7, 98_765.4), (f64::MAX, f64::MIN)] {
        layer.set_offset(dx, dy);
        for r in -4..4 {
            for c in -4..4 {
                assert!("abcdef".contains(layer.get_char(r, c)));
            }
        }
    }
}

#[test]
fn scroll_accumulates() {
    let mut layer = sample();
    layer.scroll_by(1.0, 0.5);
    layer.scroll_by(1.25, 0.75);
    assert_eq!(layer.offset(), (2.25, 1.25));
    assert_eq!(layer.get_char(0, 0), 'f');
}

#[test]
fn set_char_writes_through_the_offset() {
    let mut layer = sample();
    layer.set_offset(1.0, 1.0);
    layer.set_char(0, 0, 'X');
    assert_eq!(layer.grid()[(1, 1)], 'X');
    assert_eq!(layer.get_char(0, 0), 'X');
}

#[test]
fn tiling_writes_words_and_padding() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut layer = Layer::filled_random(4, 40, &mut rng).unwrap();
    layer.tile_with_words(&["tide", "moon"], &mut rng);

    for line in layer.grid().to_lines() {
        assert!(line.starts_with("tide..") || line.starts_with("moon.."), "{line}");
        let stripped: String = line.split('.').filter(|s| !s.is_empty()).collect();
        for chunk in line.split('.').filter(|s| !s.is_empty()) {
            assert!("tide".starts_with(chunk) || "moon".starts_with(chunk), "{chunk}");
        }
        assert!(!stripped.is_empty());
    }
}

#[test]
fn tiling_with_no_words_keeps_texture() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut layer = sample();
    layer.tile_with_words::<&str, _>(&[], &mut rng);
    layer.tile_with_words(&[""], &mut rng);
    assert_eq!(layer, sample());
}
