//! Decile binning of fare values.
//!
//! Bin edges are the empirical quantiles at 0%, 10%, ..., 100% of the sample,
//! computed by linear interpolation between neighbouring order statistics.

use crate::domain::model::FareHistogram;

pub const BIN_COUNT: usize = 10;

/// Quantile of an ascending `sorted` sample at probability
/// `numerator / denominator` (clamped to `[0, 1]`).
///
/// The fractional rank `p * (n - 1)` is derived with integer arithmetic, so a
/// quantile that lands exactly on an order statistic is that value, not a
/// rounding neighbour of it. Returns `None` for an empty sample or a zero
/// denominator.
pub fn quantile(sorted: &[f64], numerator: usize, denominator: usize) -> Option<f64> {
    if sorted.is_empty() || denominator == 0 {
        return None;
    }
    let scaled = numerator.min(denominator) * (sorted.len() - 1);
    let lo = scaled / denominator;
    let hi = (lo + 1).min(sorted.len() - 1);
    let weight = (scaled % denominator) as f64 / denominator as f64;

    if weight == 0.0 || lo == hi {
        Some(sorted[lo])
    } else {
        Some(sorted[lo] + (sorted[hi] - sorted[lo]) * weight)
    }
}

/// The `BIN_COUNT + 1` bin edges of a non-empty ascending sample.
fn decile_edges(sorted: &[f64]) -> Vec<f64> {
    (0..=BIN_COUNT)
        .filter_map(|i| quantile(sorted, i, BIN_COUNT))
        .collect()
}

/// Builds the fare histogram. An empty sample yields an empty histogram
/// rather than ten empty bins.
///
/// Bin 0 takes every value up to and including its upper edge; every later
/// bin takes values strictly above its lower edge and up to its upper edge.
/// A value sitting exactly on an interior edge therefore lands in the lower
/// bin.
pub fn fare_histogram(mut fares: Vec<f64>) -> FareHistogram {
    if fares.is_empty() {
        return FareHistogram::default();
    }
    if !fares.windows(2).all(|w| w[0] <= w[1]) {
        fares.sort_by(f64::total_cmp);
    }

    let edges = decile_edges(&fares);
    let percentiles = edges
        .windows(2)
        .map(|w| format!("{:.2} - {:.2}", w[0], w[1]))
        .collect();

    let mut counts = vec![0usize; BIN_COUNT];
    let mut next = 0;
    for (bin, count) in counts.iter_mut().enumerate() {
        let lower = edges[bin];
        let upper = edges[bin + 1];
        while next < fares.len() && fares[next] <= upper {
            if bin == 0 || fares[next] > lower {
                *count += 1;
            }
            next += 1;
        }
    }

    tracing::debug!("Binned {} fares into {} bins", fares.len(), BIN_COUNT);
    FareHistogram {
        percentiles,
        counts,
    }
}
