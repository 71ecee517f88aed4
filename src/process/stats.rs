use tracing::debug;

use crate::table::AgeTable;

/// Population-weighted mean age of one column, in table column order.
#[derive(Debug, Clone, PartialEq)]
pub struct MeanAge {
    pub label: String,
    pub mean: f64,
}

/// Mean age per column: `sum(age * count) / sum(count)`.
pub fn mean_ages(table: &AgeTable) -> Vec<MeanAge> {
    table
        .columns
        .iter()
        .zip(&table.counts)
        .map(|(label, col)| {
            let (weighted, total) = table
                .ages
                .iter()
                .zip(col)
                .fold((0.0_f64, 0.0_f64), |(w, t), (&age, &n)| (w + age as f64 * n, t + n));
            let mean = weighted / total;
            debug!(column = %label, mean, "mean age");
            MeanAge {
                label: label.clone(),
                mean,
            }
        })
        .collect()
}

/// `(min, max)` of the mean ages, ignoring non-finite values.
pub fn mean_age_domain(means: &[MeanAge]) -> Option<(f64, f64)> {
    means
        .iter()
        .map(|m| m.mean)
        .filter(|m| m.is_finite())
        .fold(None, |acc, m| match acc {
            None => Some((m, m)),
            Some((lo, hi)) => Some((lo.min(m), hi.max(m))),
        })
}
