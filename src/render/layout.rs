use crate::table::NormalizedTable;

/// Vertical stacking of the per-column curves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stacking {
    pub start: f64,
    pub shift: f64,
}

impl Stacking {
    /// Half the tallest proportion in the table separates neighbouring baselines.
    pub fn for_table(norm: &NormalizedTable, start: f64) -> Self {
        Self {
            start,
            shift: norm.max_proportion() / 2.0,
        }
    }

    pub fn offset(&self, index: usize) -> f64 {
        self.start + index as f64 * self.shift
    }
}

/// A labelled y-axis tick.
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub position: f64,
    pub label: String,
}

/// Ticks at every `stride`-th column and at the last column.
pub fn column_ticks(labels: &[String], stacking: &Stacking, stride: usize) -> Vec<Tick> {
    let last = labels.len().saturating_sub(1);
    labels
        .iter()
        .enumerate()
        .filter(|&(i, _)| i % stride.max(1) == 0 || i == last)
        .map(|(i, label)| Tick {
            position: stacking.offset(i),
            label: label.clone(),
        })
        .collect()
}

/// Whole years inside `[min, max]`.
pub fn colorbar_ticks(min: f64, max: f64) -> Vec<f64> {
    if !(min.is_finite() && max.is_finite()) || min > max {
        return Vec::new();
    }
    let (lo, hi) = (min.ceil() as i64, max.floor() as i64);
    (lo..=hi).map(|v| v as f64).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::AGE_INDEX_NAME;

    fn labels(n: usize) -> Vec<String> {
        (0..n).map(|i| (1990 + i).to_string()).collect()
    }

    #[test]
    fn shift_is_half_the_largest_proportion() {
        let norm = NormalizedTable {
            index_name: AGE_INDEX_NAME.to_string(),
            ages: vec![0, 1, 2],
            columns: vec!["A".into(), "B".into()],
            proportions: vec![vec![0.1, 0.1, 0.8], vec![0.5, 0.3, 0.2]],
        };
        let stacking = Stacking::for_table(&norm, 0.5);
        assert!((stacking.shift - 0.4).abs() < 1e-12);
        assert_eq!(stacking.offset(0), 0.5);
        assert!((stacking.offset(1) - 0.9).abs() < 1e-12);
    }

    #[test]
    fn offsets_increase_by_a_constant_shift() {
        let stacking = Stacking { start: 0.5, shift: 0.0125 };
        for i in 0..30 {
            let step = stacking.offset(i + 1) - stacking.offset(i);
            assert!((step - 0.0125).abs() < 1e-12);
        }
    }

    #[test]
    fn ticks_every_fifth_column_plus_last() {
        let stacking = Stacking { start: 0.5, shift: 1.0 };
        let ticks = column_ticks(&labels(12), &stacking, 5);
        let got: Vec<(f64, &str)> = ticks.iter().map(|t| (t.position, t.label.as_str())).collect();
        assert_eq!(got, vec![(0.5, "1990"), (5.5, "1995"), (10.5, "2000"), (11.5, "2001")]);
    }

    #[test]
    fn last_column_on_the_stride_is_not_duplicated() {
        let stacking = Stacking { start: 0.5, shift: 1.0 };
        let ticks = column_ticks(&labels(11), &stacking, 5);
        let got: Vec<&str> = ticks.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(got, vec!["1990", "1995", "2000"]);

        assert_eq!(column_ticks(&labels(1), &stacking, 5).len(), 1);
        assert!(column_ticks(&[], &stacking, 5).is_empty());
    }

    #[test]
    fn colorbar_ticks_are_whole_years_in_domain() {
        assert_eq!(colorbar_ticks(37.4, 41.0), vec![38.0, 39.0, 40.0, 41.0]);
        assert!(colorbar_ticks(40.2, 40.8).is_empty());
        assert!(colorbar_ticks(f64::NAN, 3.0).is_empty());
    }
}
