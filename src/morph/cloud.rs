use crate::foundation::core::Point;
use crate::foundation::error::{MorphError, MorphResult};

/// Mutable point set with an incrementally maintained centroid.
///
/// The running sum is exact (integer), so `centroid()` never drifts no matter how many
/// removals happen.
#[derive(Clone, Debug, Default)]
pub struct PointCloud {
    points: Vec<Point>,
    sum_row: u64,
    sum_col: u64,
}

impl PointCloud {
    pub fn new(points: Vec<Point>) -> Self {
        let (sum_row, sum_col) = points.iter().fold((0u64, 0u64), |(r, c), p| {
            (r + p.row as u64, c + p.col as u64)
        });
        Self {
            points,
            sum_row,
            sum_col,
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn sum(&self) -> (u64, u64) {
        (self.sum_row, self.sum_col)
    }

    /// `(row, col)` centre of mass; the origin when the cloud is empty.
    pub fn centroid(&self) -> (f64, f64) {
        if self.points.is_empty() {
            return (0.0, 0.0);
        }
        let n = self.points.len() as f64;
        (self.sum_row as f64 / n, self.sum_col as f64 / n)
    }

    /// Index of the point nearest to `target`. Ties keep the first one seen.
    pub fn nearest(&self, target: Point) -> MorphResult<usize> {
        let (tr, tc) = (target.row as f64, target.col as f64);
        let mut best: Option<(usize, f64)> = None;
        for (i, p) in self.points.iter().enumerate() {
            let d = p.distance(tr, tc);
            if best.is_none_or(|(_, min)| d < min) {
                best = Some((i, d));
            }
        }
        best.map(|(i, _)| i)
            .ok_or_else(|| MorphError::invariant("nearest-point query on an empty cloud"))
    }

    /// Index of the point farthest from the current centroid. Ties keep the first one seen.
    pub fn farthest_from_centroid(&self) -> MorphResult<usize> {
        let (cr, cc) = self.centroid();
        let mut best: Option<(usize, f64)> = None;
        for (i, p) in self.points.iter().enumerate() {
            let d = p.distance(cr, cc);
            if best.is_none_or(|(_, max)| d > max) {
                best = Some((i, d));
            }
        }
        best.map(|(i, _)| i)
            .ok_or_else(|| MorphError::invariant("farthest-point query on an empty cloud"))
    }

    /// Remove the point at `idx` and rebalance the running sum.
    ///
    /// Order of the remaining points is not preserved.
    pub fn remove_at(&mut self, idx: usize) -> MorphResult<Point> {
        if idx >= self.points.len() {
            return Err(MorphError::invariant(format!(
                "remove index {idx} out of range for cloud of {}",
                self.points.len()
            )));
        }
        let p = self.points.swap_remove(idx);
        self.sum_row -= p.row as u64;
        self.sum_col -= p.col as u64;
        Ok(p)
    }
}

/// Index-aligned source/target lists produced by [`match_points`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Pairing {
    pub sources: Vec<Point>,
    pub targets: Vec<Point>,
}

impl Pairing {
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.sources.iter().copied().zip(self.targets.iter().copied())
    }
}

/// Greedy farthest-first approximation of a minimum-cost transport matching.
///
/// Repeatedly takes the target farthest from the remaining targets' centroid and pairs it
/// with the nearest remaining source. Both inputs must have equal length; O(N²).
#[tracing::instrument(skip_all, fields(n = sources.len()))]
pub fn match_points(sources: Vec<Point>, targets: Vec<Point>) -> MorphResult<Pairing> {
    if sources.len() != targets.len() {
        return Err(MorphError::validation(format!(
            "match_points needs equal-length inputs ({} sources, {} targets)",
            sources.len(),
            targets.len()
        )));
    }

    let mut source_cloud = PointCloud::new(sources);
    let mut target_cloud = PointCloud::new(targets);
    let mut out = Pairing {
        sources: Vec::with_capacity(source_cloud.len()),
        targets: Vec::with_capacity(target_cloud.len()),
    };

    while !target_cloud.is_empty() {
        let ti = target_cloud.farthest_from_centroid()?;
        let target = target_cloud.points()[ti];
        let si = source_cloud.nearest(target)?;

        out.sources.push(source_cloud.remove_at(si)?);
        out.targets.push(target_cloud.remove_at(ti)?);
    }

    if !source_cloud.is_empty() {
        return Err(MorphError::invariant(format!(
            "{} source points left unmatched",
            source_cloud.len()
        )));
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/morph/cloud.rs"]
mod tests;
