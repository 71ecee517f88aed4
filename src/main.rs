use agetrails::{run, Config};
use anyhow::Result;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

/// Used when `RUST_LOG` is unset: our own progress at info, dependencies only when they warn.
const DEFAULT_LOG_FILTER: &str = "warn,agetrails=info";

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .init();

    // ─── 2) load → truncate → mean ages → render ─────────────────────
    let cfg = Config::default();
    info!(input = %cfg.input_path.display(), "startup");
    let summary = run(&cfg)?;

    info!(
        rows = summary.rows_kept,
        dropped = summary.rows_dropped,
        columns = summary.columns,
        cutoff = ?summary.cutoff_age,
        domain = ?summary.mean_age_domain,
        output = %summary.output_path.display(),
        "all done"
    );
    Ok(())
}
