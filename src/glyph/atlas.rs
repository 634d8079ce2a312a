use std::collections::HashMap;
use std::io::Read;

use crate::{
    foundation::{
        core::Grid,
        error::{MorphError, MorphResult},
    },
    glyph::rle::{GlyphMatrix, RleGlyph},
};

/// Character to glyph-bitmap lookup.
#[derive(Clone, Debug, Default)]
pub struct GlyphAtlas {
    glyphs: HashMap<char, RleGlyph>,
}

impl GlyphAtlas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a `{ "A": { "values": [...], "lengths": [...], "width": w, "height": h }, ... }`
    /// document. Every glyph is decoded once up front so bad data fails at load time.
    pub fn from_json_reader<R: Read>(reader: R) -> MorphResult<Self> {
        let raw: HashMap<String, RleGlyph> =
            serde_json::from_reader(reader).map_err(|e| MorphError::serde(e.to_string()))?;

        let mut atlas = Self::new();
        for (key, glyph) in raw {
            let mut chars = key.chars();
            let (Some(ch), None) = (chars.next(), chars.next()) else {
                return Err(MorphError::glyph(format!(
                    "atlas key '{key}' must be exactly one character"
                )));
            };
            glyph
                .decode()
                .map_err(|e| MorphError::glyph(format!("glyph '{key}': {e}")))?;
            atlas.glyphs.insert(ch, glyph);
        }
        Ok(atlas)
    }

    /// Built-in 5x7 block font: `A-Z`, `0-9` and a handful of punctuation marks.
    pub fn builtin() -> Self {
        let mut atlas = Self::new();
        for (ch, rows) in FONT_5X7 {
            let matrix = Grid::from_rows(
                rows.iter()
                    .map(|r| r.bytes().map(|b| b == b'#').collect())
                    .collect(),
            );
            // The table is static and rectangular; a ragged entry is skipped, not fatal.
            let Ok(matrix) = matrix else {
                tracing::warn!(glyph = %ch, "skipping ragged built-in glyph");
                continue;
            };
            atlas.insert(*ch, RleGlyph::encode(&matrix));
        }
        atlas
    }

    pub fn insert(&mut self, ch: char, glyph: RleGlyph) {
        self.glyphs.insert(ch, glyph);
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    pub fn contains(&self, ch: char) -> bool {
        self.lookup(ch).is_some()
    }

    /// Decoded bitmap for `ch`, falling back to its upper-case form. `None` when missing.
    pub fn glyph(&self, ch: char) -> MorphResult<Option<GlyphMatrix>> {
        self.lookup(ch).map(RleGlyph::decode).transpose()
    }

    fn lookup(&self, ch: char) -> Option<&RleGlyph> {
        self.glyphs
            .get(&ch)
            .or_else(|| ch.to_uppercase().next().and_then(|u| self.glyphs.get(&u)))
    }
}

const FONT_5X7: &[(char, [&str; 7])] = &[
    ('A', [".###.", "#...#", "#...#", "#####", "#...#", "#...#", "#...#"]),
    ('B', ["####.", "#...#", "#...#", "####.", "#...#", "#...#", "####."]),
    ('C', [".###.", "#...#", "#....", "#....", "#....", "#...#", ".###."]),
    ('D', ["####.", "#...#", "#...#", "#...#", "#...#", "#...#", "####."]),
    ('E', ["#####", "#....", "#....", "####.", "#....", "#....", "#####"]),
    ('F', ["#####", "#....", "#....", "####.", "#....", "#....", "#...."]),
    ('G', [".###.", "#...#", "#....", "#.###", "#...#", "#...#", ".####"]),
    ('H', ["#...#", "#...#", "#...#", "#####", "#...#", "#...#", "#...#"]),
    ('I', [".###.", "..#..", "..#..", "..#..", "..#..", "..#..", ".###."]),
    ('J', ["..###", "...#.", "...#.", "...#.", "...#.", "#..#.", ".##.."]),
    ('K', ["#...#", "#..#.", "#.#..", "##...", "#.#..", "#..#.", "#...#"]),
    ('L', ["#....", "#....", "#....", "#....", "#....", "#....", "#####"]),
    ('M', ["#...#", "##.##", "#.#.#", "#.#.#", "#...#", "#...#", "#...#"]),
    ('N', ["#...#", "#...#", "##..#", "#.#.#", "#..##", "#...#", "#...#"]),
    ('O', [".###.", "#...#", "#...#", "#...#", "#...#", "#...#", ".###."]),
    ('P', ["####.", "#...#", "#...#", "####.", "#....", "#....", "#...."]),
    ('Q', [".###.", "#...#", "#...#", "#...#", "#.#.#", "#..#.", ".##.#"]),
    ('R', ["####.", "#...#", "#...#", "####.", "#.#..", "#..#.", "#...#"]),
    ('S', [".####", "#....", "#....", ".###.", "....#", "....#", "####."]),
    ('T', ["#####", "..#..", "..#..", "..#..", "..#..", "..#..", "..#.."]),
    ('U', ["#...#", "#...#", "#...#", "#...#", "#...#", "#...#", ".###."]),
    ('V', ["#...#", "#...#", "#...#", "#...#", "#...#", ".#.#.", "..#.."]),
    ('W', ["#...#", "#...#", "#...#", "#.#.#", "#.#.#", "#.#.#", ".#.#."]),
    ('X', ["#...#", "#...#", ".#.#.", "..#..", ".#.#.", "#...#", "#...#"]),
    ('Y', ["#...#", "#...#", ".#.#.", "..#..", "..#..", "..#..", "..#.."]),
    ('Z', ["#####", "....#", "...#.", "..#..", ".#...", "#....", "#####"]),
    ('0', [".###.", "#...#", "#..##", "#.#.#", "##..#", "#...#", ".###."]),
    ('1', ["..#..", ".##..", "..#..", "..#..", "..#..", "..#..", ".###."]),
    ('2', [".###.", "#...#", "....#", "...#.", "..#..", ".#...", "#####"]),
    ('3', ["#####", "...#.", "..#..", "...#.", "....#", "#...#", ".###."]),
    ('4', ["...#.", "..##.", ".#.#.", "#..#.", "#####", "...#.", "...#."]),
    ('5', ["#####", "#....", "####.", "....#", "....#", "#...#", ".###."]),
    ('6', ["..##.", ".#...", "#....", "####.", "#...#", "#...#", ".###."]),
    ('7', ["#####", "....#", "...#.", "..#..", ".#...", ".#...", ".#..."]),
    ('8', [".###.", "#...#", "#...#", ".###.", "#...#", "#...#", ".###."]),
    ('9', [".###.", "#...#", "#...#", ".####", "....#", "...#.", ".##.."]),
    ('!', ["..#..", "..#..", "..#..", "..#..", "..#..", ".....", "..#.."]),
    ('?', [".###.", "#...#", "....#", "...#.", "..#..", ".....", "..#.."]),
    ('.', [".....", ".....", ".....", ".....", ".....", ".##..", ".##.."]),
    ('-', [".....", ".....", ".....", "#####", ".....", ".....", "....."]),
    ('\'', ["..#..", "..#..", ".#...", ".....", ".....", ".....", "....."]),
    ('&', [".##..", "#..#.", "#.#..", ".#...", "#.#.#", "#..#.", ".##.#"]),
];

#[cfg(test)]
#[path = "../../tests/unit/glyph/atlas.rs"]
mod tests;
