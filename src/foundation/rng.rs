use rand::{Rng, SeedableRng, rngs::StdRng};

/// First printable, non-space ASCII character.
const GLYPH_FIRST: u8 = b'!';
/// Number of printable, non-space ASCII characters (`'!'..='~'`).
const GLYPH_COUNT: u8 = 94;

/// Seeded generator when `seed` is set, entropy-seeded otherwise.
pub fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// A uniformly random printable ASCII glyph.
pub fn random_glyph<R: Rng + ?Sized>(rng: &mut R) -> char {
    char::from(GLYPH_FIRST + rng.gen_range(0..GLYPH_COUNT))
}
