pub mod normalize;
pub mod stats;

use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::info;

use crate::config::Config;
use crate::load::load_age_table;
use crate::render::render_chart;
use normalize::{truncate, truncation_cutoff};
use stats::{mean_age_domain, mean_ages};

/// What a chart run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub rows_kept: usize,
    pub rows_dropped: usize,
    pub columns: usize,
    pub cutoff_age: Option<u32>,
    pub mean_age_domain: Option<(f64, f64)>,
    pub output_path: PathBuf,
}

/// Load, truncate, summarize and render: the whole chart in one pass.
pub fn run(cfg: &Config) -> Result<RunSummary> {
    let table = load_age_table(&cfg.input_path).context("load stage")?;
    let rows_before = table.num_rows();

    let (table, norm) = truncate(&table, cfg.truncation_threshold);
    let means = mean_ages(&table);
    let domain = mean_age_domain(&means);
    info!(columns = means.len(), domain = ?domain, "computed mean ages");

    render_chart(&norm, &means, cfg, &cfg.output_path).context("render stage")?;

    Ok(RunSummary {
        rows_kept: table.num_rows(),
        rows_dropped: rows_before - table.num_rows(),
        columns: table.num_columns(),
        cutoff_age: truncation_cutoff(&norm, cfg.truncation_threshold),
        mean_age_domain: domain,
        output_path: cfg.output_path.clone(),
    })
}
