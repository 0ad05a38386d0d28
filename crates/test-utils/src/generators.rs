//! Generators for identifier series.
//!
//! These produce predictable inputs for ordering and selection tests.

use chrono::{DateTime, Duration, TimeZone, Utc};

/// Reference instant used by the fixtures: 2026-01-24T00:00:00Z.
pub fn reference_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 24, 0, 0, 0)
        .single()
        .expect("valid reference time")
}

/// File names of a PPI product every `step_minutes`, oldest first.
///
/// # Example
///
/// ```
/// use test_utils::ppi_series;
///
/// let names = ppi_series("fikau", 0.3, 3, 5);
/// assert_eq!(names[0], "202601240000_fikau_ppi_0.3_dbzh_qc.tif");
/// assert_eq!(names[2], "202601240010_fikau_ppi_0.3_dbzh_qc.tif");
/// ```
pub fn ppi_series(site: &str, elevation: f64, count: usize, step_minutes: i64) -> Vec<String> {
    (0..count)
        .map(|i| {
            let time = reference_time() + Duration::minutes(step_minutes * i as i64);
            format!(
                "{}_{}_ppi_{}_dbzh_qc.tif",
                time.format("%Y%m%d%H%M"),
                site,
                elevation
            )
        })
        .collect()
}

/// A fixed permutation of `0..n` that is neither sorted nor reversed.
///
/// Alternates from both ends: `[0, n-1, 1, n-2, ...]`.
pub fn interleaved_order(n: usize) -> Vec<usize> {
    let mut order = Vec::with_capacity(n);
    let (mut low, mut high) = (0, n);
    while low < high {
        order.push(low);
        low += 1;
        if low < high {
            high -= 1;
            order.push(high);
        }
    }
    order
}

/// Apply [`interleaved_order`] to a vector.
pub fn interleave<T: Clone>(items: &[T]) -> Vec<T> {
    interleaved_order(items.len())
        .into_iter()
        .map(|i| items[i].clone())
        .collect()
}
