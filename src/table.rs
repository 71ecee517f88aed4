/// Index name given to the age rows once labels are parsed.
pub const AGE_INDEX_NAME: &str = "Age (yrs)";

/// Population counts, rows keyed by age and columns keyed by label (usually a year).
///
/// Values are stored column-major: `counts[c][r]` is the count of age `ages[r]`
/// in column `columns[c]`.
#[derive(Debug, Clone, PartialEq)]
pub struct AgeTable {
    pub index_name: String,
    pub ages: Vec<u32>,
    pub columns: Vec<String>,
    pub counts: Vec<Vec<f64>>,
}

/// Per-column proportions of an `AgeTable`; each column sums to 1.0.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedTable {
    pub index_name: String,
    pub ages: Vec<u32>,
    pub columns: Vec<String>,
    pub proportions: Vec<Vec<f64>>,
}

impl AgeTable {
    pub fn num_rows(&self) -> usize {
        self.ages.len()
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn column_total(&self, c: usize) -> f64 {
        self.counts[c].iter().sum()
    }

    /// Keep only the rows for which `keep(age)` holds, preserving order.
    pub fn filter_rows(&self, keep: impl Fn(u32) -> bool) -> AgeTable {
        let rows: Vec<usize> = (0..self.num_rows())
            .filter(|&r| keep(self.ages[r]))
            .collect();
        AgeTable {
            index_name: self.index_name.clone(),
            ages: rows.iter().map(|&r| self.ages[r]).collect(),
            columns: self.columns.clone(),
            counts: self
                .counts
                .iter()
                .map(|col| rows.iter().map(|&r| col[r]).collect())
                .collect(),
        }
    }

    /// Keep only the columns for which `keep(c)` holds, preserving order.
    pub fn filter_columns(&self, keep: impl Fn(usize) -> bool) -> AgeTable {
        let idx: Vec<usize> = (0..self.num_columns()).filter(|&c| keep(c)).collect();
        AgeTable {
            index_name: self.index_name.clone(),
            ages: self.ages.clone(),
            columns: idx.iter().map(|&c| self.columns[c].clone()).collect(),
            counts: idx.iter().map(|&c| self.counts[c].clone()).collect(),
        }
    }
}

impl NormalizedTable {
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// Largest proportion anywhere in the table, 0.0 for an empty table.
    pub fn max_proportion(&self) -> f64 {
        self.proportions
            .iter()
            .flatten()
            .copied()
            .fold(0.0, f64::max)
    }

    /// `(age, proportion)` points of one column, sorted by age.
    pub fn curve(&self, c: usize) -> Vec<(f64, f64)> {
        let mut pts: Vec<(f64, f64)> = self
            .ages
            .iter()
            .zip(&self.proportions[c])
            .map(|(&a, &p)| (a as f64, p))
            .collect();
        pts.sort_by(|a, b| a.0.total_cmp(&b.0));
        pts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> AgeTable {
        AgeTable {
            index_name: AGE_INDEX_NAME.to_string(),
            ages: vec![2, 0, 1],
            columns: vec!["A".into(), "B".into()],
            counts: vec![vec![80.0, 10.0, 10.0], vec![20.0, 50.0, 30.0]],
        }
    }

    #[test]
    fn filter_rows_keeps_file_order() {
        let t = table().filter_rows(|a| a != 0);
        assert_eq!(t.ages, vec![2, 1]);
        assert_eq!(t.counts, vec![vec![80.0, 10.0], vec![20.0, 30.0]]);
    }

    #[test]
    fn filter_columns_drops_whole_columns() {
        let t = table().filter_columns(|c| c == 1);
        assert_eq!(t.columns, vec!["B".to_string()]);
        assert_eq!(t.counts, vec![vec![20.0, 50.0, 30.0]]);
        assert_eq!(t.ages, vec![2, 0, 1]);
    }

    #[test]
    fn curve_is_sorted_by_age() {
        let norm = NormalizedTable {
            index_name: AGE_INDEX_NAME.to_string(),
            ages: vec![2, 0, 1],
            columns: vec!["A".into()],
            proportions: vec![vec![0.8, 0.1, 0.1]],
        };
        assert_eq!(norm.curve(0), vec![(0.0, 0.1), (1.0, 0.1), (2.0, 0.8)]);
        assert_eq!(norm.max_proportion(), 0.8);
    }
}
