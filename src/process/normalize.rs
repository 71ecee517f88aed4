use tracing::{debug, info, warn};

use crate::table::{AgeTable, NormalizedTable};

/// Divide every column by its total.
///
/// A column summing to zero yields NaN proportions; `drop_empty_columns`
/// removes such columns beforehand.
pub fn normalize(table: &AgeTable) -> NormalizedTable {
    let proportions = table
        .counts
        .iter()
        .map(|col| {
            let total: f64 = col.iter().sum();
            col.iter().map(|v| v / total).collect()
        })
        .collect();

    NormalizedTable {
        index_name: table.index_name.clone(),
        ages: table.ages.clone(),
        columns: table.columns.clone(),
        proportions,
    }
}

/// Remove columns whose total population is zero.
pub fn drop_empty_columns(table: &AgeTable) -> AgeTable {
    let keep: Vec<bool> = (0..table.num_columns())
        .map(|c| {
            let nonzero = table.column_total(c) > 0.0;
            if !nonzero {
                warn!(column = %table.columns[c], "dropping column with zero total population");
            }
            nonzero
        })
        .collect();
    table.filter_columns(|c| keep[c])
}

/// Highest age that holds more than `threshold` of the population in at
/// least one column, or `None` if no age does.
pub fn truncation_cutoff(norm: &NormalizedTable, threshold: f64) -> Option<u32> {
    norm.ages
        .iter()
        .enumerate()
        .filter(|&(r, _)| norm.proportions.iter().any(|col| col[r] > threshold))
        .map(|(_, &age)| age)
        .max()
}

/// Drop the high-age tail whose share never exceeds `threshold` in any
/// column, then re-normalize what is left.
///
/// Every age at or below the cutoff survives, even ages that are negligible
/// themselves, so the result is always a prefix of the ages in ascending order.
pub fn truncate(table: &AgeTable, threshold: f64) -> (AgeTable, NormalizedTable) {
    let table = drop_empty_columns(table);
    let norm = normalize(&table);

    let truncated = match truncation_cutoff(&norm, threshold) {
        Some(cutoff) => {
            let kept = table.filter_rows(|age| age <= cutoff);
            info!(
                cutoff,
                dropped = table.num_rows() - kept.num_rows(),
                "truncated negligible age tail"
            );
            kept
        }
        None => {
            warn!(threshold, "no age exceeds the threshold; dropping every row");
            table.filter_rows(|_| false)
        }
    };

    let norm = normalize(&truncated);
    debug!(
        rows = truncated.num_rows(),
        columns = truncated.num_columns(),
        "re-normalized truncated table"
    );
    (truncated, norm)
}
