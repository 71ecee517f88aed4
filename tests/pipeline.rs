use agetrails::load::load_age_table;
use agetrails::process::normalize::truncate;
use agetrails::process::stats::mean_ages;
use agetrails::render::layout::Stacking;
use agetrails::{run, Config};
use anyhow::Result;
use std::fs;
use std::path::Path;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn init_test_logging() {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,agetrails=debug")),
        )
        .with_test_writer()
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

/// Ten years of a toy population: ages 0..=104, the last few empty in every year.
fn write_population_csv(path: &Path) -> Result<()> {
    let years: Vec<u32> = (1990..2000).collect();
    let mut csv = String::from("Age");
    for y in &years {
        csv.push_str(&format!(",{}", y));
    }
    csv.push('\n');
    for age in 0..=104u32 {
        csv.push_str(&format!("{} years", age));
        for (i, _) in years.iter().enumerate() {
            let count = if age > 100 {
                0.0
            } else {
                // population slowly ageing year over year
                let peak = 30.0 + i as f64;
                70_000.0 * (-((age as f64 - peak) / 25.0).powi(2)).exp() + 10.0
            };
            csv.push_str(&format!(",{:.0}", count));
        }
        csv.push('\n');
    }
    fs::write(path, csv)?;
    Ok(())
}

#[test]
fn renders_png_from_csv() -> Result<()> {
    init_test_logging();
    let dir = tempfile::tempdir()?;
    let input = dir.path().join("Age_data_DK.csv");
    write_population_csv(&input)?;

    let cfg = Config {
        input_path: input,
        output_path: dir.path().join("trails.png"),
        dpi: 30,
        ..Config::default()
    };
    let summary = run(&cfg)?;

    assert_eq!(summary.columns, 10);
    assert_eq!(summary.rows_dropped, 4);
    assert_eq!(summary.rows_kept, 101);
    assert_eq!(summary.cutoff_age, Some(100));
    let (lo, hi) = summary.mean_age_domain.expect("finite means");
    assert!(lo < hi, "means should rise as the population ages");

    let bytes = fs::read(&summary.output_path)?;
    assert!(bytes.starts_with(&[0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n']));
    Ok(())
}

#[test]
fn three_ages_two_years_end_to_end() -> Result<()> {
    init_test_logging();
    let dir = tempfile::tempdir()?;
    let input = dir.path().join("small.csv");
    fs::write(&input, "Age,A,B\n0 years,10,50\n1 years,10,30\n2 years,80,20\n")?;

    let table = load_age_table(&input)?;
    let (table, norm) = truncate(&table, 0.0);
    assert_eq!(table.ages, vec![0, 1, 2]);
    assert!((norm.proportions[0][2] - 0.8).abs() < 1e-12);

    let means = mean_ages(&table);
    assert!((means[0].mean - 1.7).abs() < 1e-12);
    assert!((means[1].mean - 0.7).abs() < 1e-12);

    let stacking = Stacking::for_table(&norm, 0.5);
    assert!((stacking.shift - 0.4).abs() < 1e-12);
    assert!((stacking.offset(1) - 0.9).abs() < 1e-12);
    Ok(())
}

#[test]
fn malformed_label_stops_the_run_before_rendering() -> Result<()> {
    init_test_logging();
    let dir = tempfile::tempdir()?;
    let input = dir.path().join("bad.csv");
    fs::write(&input, "Age,1990\n0 years,5\n1 yr,5\n")?;

    let cfg = Config {
        input_path: input,
        output_path: dir.path().join("never.png"),
        dpi: 20,
        ..Config::default()
    };
    assert!(run(&cfg).is_err());
    assert!(!cfg.output_path.exists());
    Ok(())
}
