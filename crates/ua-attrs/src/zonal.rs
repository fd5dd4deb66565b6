//! Per-zone aggregation helpers.
//!
//! All helpers return one value per zone in zone order.  Rows without a
//! zone are skipped; zones without rows get 0.

use ua_core::ZoneId;

/// Count rows per zone that satisfy `pred`.
pub fn count_where<T>(
    zones: &[Option<ZoneId>],
    rows: &[T],
    n: usize,
    pred: impl Fn(&T) -> bool,
) -> Vec<i64> {
    let mut out = vec![0i64; n];
    for (z, row) in zones.iter().zip(rows) {
        if let Some(slot) = z.and_then(|z| out.get_mut(z.index())) {
            if pred(row) {
                *slot += 1;
            }
        }
    }
    out
}

/// Sum `value(row)` per zone.
pub fn sum_by<T, V>(zones: &[Option<ZoneId>], rows: &[T], n: usize, value: impl Fn(&T) -> V) -> Vec<V>
where
    V: Copy + Default + std::ops::AddAssign,
{
    let mut out = vec![V::default(); n];
    for (z, row) in zones.iter().zip(rows) {
        if let Some(slot) = z.and_then(|z| out.get_mut(z.index())) {
            *slot += value(row);
        }
    }
    out
}

/// `num / den` element-wise; 0 wherever the quotient is not finite.
pub fn ratio(num: &[f64], den: &[f64]) -> Vec<f64> {
    num.iter()
        .zip(den)
        .map(|(&n, &d)| {
            let q = n / d;
            if d != 0.0 && q.is_finite() { q } else { 0.0 }
        })
        .collect()
}
