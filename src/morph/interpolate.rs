use rand::Rng;

use crate::{
    foundation::{
        core::{CharGrid, Point},
        error::{MorphError, MorphResult},
        rng::random_glyph,
    },
    morph::cloud::{Pairing, match_points},
};

/// Interpolation policy between two frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionKind {
    /// Every cell flips from source to target at its own random step. No motion.
    RandomFlip,
    /// Lit cells travel in straight lines, paired by list index.
    RandomMap,
    /// Lit cells travel along a greedy transport matching, drawn as fresh random glyphs.
    ApproximateOt,
}

impl TransitionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TransitionKind::RandomFlip => "random_flip",
            TransitionKind::RandomMap => "random_map",
            TransitionKind::ApproximateOt => "approximate_ot",
        }
    }
}

pub fn parse_transition_kind(kind: &str) -> MorphResult<TransitionKind> {
    let kind = kind.trim().to_ascii_lowercase();
    if kind.is_empty() {
        return Err(MorphError::validation("transition kind must be non-empty"));
    }
    match kind.as_str() {
        "random_flip" | "randomflip" | "flip" => Ok(TransitionKind::RandomFlip),
        "random_map" | "randommap" | "map" => Ok(TransitionKind::RandomMap),
        "approximate_ot" | "approximateot" | "ot" => Ok(TransitionKind::ApproximateOt),
        _ => Err(MorphError::validation(format!(
            "unknown transition kind '{kind}'"
        ))),
    }
}

impl std::str::FromStr for TransitionKind {
    type Err = MorphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_transition_kind(s)
    }
}

/// Produce `steps + 1` frames going from `from` to `to` under `kind`.
pub fn interpolate<R: Rng + ?Sized>(
    kind: TransitionKind,
    from: &CharGrid,
    to: &CharGrid,
    steps: usize,
    rng: &mut R,
) -> MorphResult<Vec<CharGrid>> {
    match kind {
        TransitionKind::RandomFlip => random_flip(from, to, steps, rng),
        TransitionKind::RandomMap => random_map(from, to, steps, rng),
        TransitionKind::ApproximateOt => approximate_ot(from, to, steps, rng),
    }
}

fn check_inputs(from: &CharGrid, to: &CharGrid, steps: usize) -> MorphResult<()> {
    if steps == 0 {
        return Err(MorphError::validation("interpolation steps must be >= 1"));
    }
    from.ensure_same_shape(to, "interpolation frames")
}

/// Cell-wise pop from `from` to `to`. Each cell's flip step is drawn once from `[0, steps)`,
/// so the last frame always equals `to`.
#[tracing::instrument(skip(from, to, rng), fields(rows = from.rows(), cols = from.cols()))]
pub fn random_flip<R: Rng + ?Sized>(
    from: &CharGrid,
    to: &CharGrid,
    steps: usize,
    rng: &mut R,
) -> MorphResult<Vec<CharGrid>> {
    check_inputs(from, to, steps)?;

    let flip_at: Vec<usize> = (0..from.len()).map(|_| rng.gen_range(0..steps)).collect();

    let frames = (0..=steps)
        .map(|step| {
            let mut frame = to.clone();
            for ((cell, &src), &t) in frame
                .cells_mut()
                .iter_mut()
                .zip(from.cells())
                .zip(&flip_at)
            {
                if step < t {
                    *cell = src;
                }
            }
            frame
        })
        .collect();
    Ok(frames)
}

/// Pad the shorter list by resampling (with replacement) from its original entries until
/// both lists have the same length.
///
/// An empty list has nothing to resample from; in that case both lists are cleared and the
/// transition degenerates to "nothing moves".
pub fn balance_counts<R: Rng + ?Sized>(
    sources: &mut Vec<Point>,
    targets: &mut Vec<Point>,
    rng: &mut R,
) {
    if sources.is_empty() || targets.is_empty() {
        sources.clear();
        targets.clear();
        return;
    }
    pad_by_resampling(sources, targets.len(), rng);
    pad_by_resampling(targets, sources.len(), rng);
}

fn pad_by_resampling<R: Rng + ?Sized>(points: &mut Vec<Point>, len: usize, rng: &mut R) {
    let original = points.len();
    points.reserve(len.saturating_sub(original));
    while points.len() < len {
        let pick = points[rng.gen_range(0..original)];
        points.push(pick);
    }
}

/// Lit cells move from source to target positions along index-aligned pairs, showing the
/// target glyph. Frames are rebuilt blank each step, so no trails are drawn.
#[tracing::instrument(skip(from, to, rng), fields(rows = from.rows(), cols = from.cols()))]
pub fn random_map<R: Rng + ?Sized>(
    from: &CharGrid,
    to: &CharGrid,
    steps: usize,
    rng: &mut R,
) -> MorphResult<Vec<CharGrid>> {
    check_inputs(from, to, steps)?;

    let mut sources = from.occupied();
    let mut targets = to.occupied();
    balance_counts(&mut sources, &mut targets, rng);
    let pairing = Pairing { sources, targets };

    Ok(render_motion(from, steps, &pairing, |target| to[(target.row, target.col)]))
}

/// Lit cells move along a greedy transport matching. Every moving cell is drawn with a fresh
/// random glyph on every step, giving a dissolve-and-reform look.
#[tracing::instrument(skip(from, to, rng), fields(rows = from.rows(), cols = from.cols()))]
pub fn approximate_ot<R: Rng + ?Sized>(
    from: &CharGrid,
    to: &CharGrid,
    steps: usize,
    rng: &mut R,
) -> MorphResult<Vec<CharGrid>> {
    check_inputs(from, to, steps)?;

    let mut sources = from.occupied();
    let mut targets = to.occupied();
    balance_counts(&mut sources, &mut targets, rng);
    let pairing = match_points(sources, targets)?;
    tracing::debug!(points = pairing.len(), "matched transport pairs");

    Ok(render_motion(from, steps, &pairing, |_| random_glyph(rng)))
}

fn render_motion(
    shape: &CharGrid,
    steps: usize,
    pairing: &Pairing,
    mut glyph: impl FnMut(Point) -> char,
) -> Vec<CharGrid> {
    (0..=steps)
        .map(|step| {
            let mut frame = CharGrid::blank(shape.rows(), shape.cols());
            for (source, target) in pairing.iter() {
                let at = source.lerp_floor(target, step, steps);
                let c = glyph(target);
                if let Some(cell) = frame.get_mut(at.row, at.col) {
                    *cell = c;
                }
            }
            frame
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/morph/interpolate.rs"]
mod tests;
