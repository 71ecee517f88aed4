pub mod colormap;
pub mod font_safe;
pub mod layout;

use anyhow::{ensure, Context, Result};
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::colors::TRANSPARENT;
use plotters::style::{FontDesc, FontFamily, FontStyle, FontTransform};
use std::path::Path;
use tracing::{debug, info, instrument};

use crate::config::Config;
use crate::process::stats::{mean_age_domain, MeanAge};
use crate::table::NormalizedTable;
use colormap::ColorScale;
use font_safe::FontSafeBackend;
use layout::{colorbar_ticks, column_ticks, Stacking, Tick};

/// Slices used to paint the color bar gradient.
const COLORBAR_STEPS: usize = 256;

/// Color of the curve labelled `label`, looked up through its mean age.
pub fn curve_color(means: &[MeanAge], scale: &ColorScale, label: &str) -> RGBColor {
    let mean = means
        .iter()
        .find(|m| m.label == label)
        .map(|m| m.mean)
        .unwrap_or(f64::NAN);
    scale.color(mean)
}

/// Render the stacked chart to a PNG at `output`.
#[instrument(level = "debug", skip_all, fields(output = %output.display()))]
pub fn render_chart(
    norm: &NormalizedTable,
    means: &[MeanAge],
    cfg: &Config,
    output: &Path,
) -> Result<()> {
    let backend = BitMapBackend::new(output, cfg.pixel_size());
    let canvas = FontSafeBackend::new(backend).into_drawing_area();
    draw_ridgeline(&canvas, norm, means, cfg)?;
    canvas
        .present()
        .with_context(|| format!("writing {}", output.display()))?;
    info!(path = %output.display(), "chart written");
    Ok(())
}

/// Draw the whole figure onto `canvas`. The caller presents it.
pub fn draw_ridgeline<DB>(
    canvas: &DrawingArea<DB, Shift>,
    norm: &NormalizedTable,
    means: &[MeanAge],
    cfg: &Config,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let k = norm.num_columns();
    ensure!(k > 0 && !norm.ages.is_empty(), "nothing to plot: table is empty");

    let (min_mean, max_mean) = mean_age_domain(means).unwrap_or((0.0, 0.0));
    let scale = ColorScale::new(min_mean, max_mean);
    let stacking = Stacking::for_table(norm, cfg.start_offset);
    debug!(shift = stacking.shift, min_mean, max_mean, "layout");

    let family = FontFamily::from(pick_font_family(
        &cfg.font_family,
        &cfg.font_fallback,
        font_loads,
    ));
    let label_font = FontDesc::new(family, cfg.font_px(16.0), FontStyle::Normal);
    let title_font = FontDesc::new(family, cfg.font_px(24.0), FontStyle::Bold);
    let px = |inches: f64| (inches * cfg.dpi as f64).round() as i32;

    canvas.fill(&WHITE)?;
    let body = canvas.titled(&cfg.title, title_font)?;
    let (width, _) = body.dim_in_pixel();
    let (plot_area, bar_area) = body.split_horizontally(width as i32 - px(1.4));

    // main chart
    let (x_lo, x_hi) = age_range(norm);
    let max_prop = norm.max_proportion();
    let y_hi = stacking.offset(k - 1) + max_prop * 1.05;
    let y_lo = stacking.start - 0.05 * (y_hi - stacking.start);

    let mut chart = ChartBuilder::on(&plot_area)
        .margin(px(0.2))
        .x_label_area_size(px(0.7))
        .y_label_area_size(px(0.9))
        .build_cartesian_2d(x_lo..x_hi, y_lo..y_hi)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .disable_y_axis()
        .axis_style(&TRANSPARENT)
        .x_desc(norm.index_name.as_str())
        .x_label_formatter(&|v| format!("{:.0}", v))
        .label_style(label_font.clone())
        .axis_desc_style(label_font.clone())
        .draw()?;

    let outline = WHITE.stroke_width(px(0.01).max(1) as u32);
    draw_curves(&mut chart, norm, means, &scale, &stacking, outline)?;

    let ticks = column_ticks(&norm.columns, &stacking, cfg.tick_stride);
    draw_y_ticks(canvas, &chart, &ticks, x_lo, &label_font, px(0.05))?;

    // color bar
    let (bar_lo, bar_hi) = if max_mean > min_mean {
        (min_mean, max_mean)
    } else {
        (min_mean - 0.5, max_mean + 0.5)
    };
    let mut bar_chart = ChartBuilder::on(&bar_area)
        .margin_top(px(0.35))
        .margin_bottom(px(0.9))
        .margin_left(px(0.05))
        .margin_right(px(1.0))
        .build_cartesian_2d(0.0..1.0, bar_lo..bar_hi)?;

    let step = (bar_hi - bar_lo) / COLORBAR_STEPS as f64;
    bar_chart.draw_series((0..COLORBAR_STEPS).map(|s| {
        let v0 = bar_lo + step * s as f64;
        let v1 = v0 + step;
        Rectangle::new(
            [(0.0, v0), (1.0, v1)],
            scale.color((v0 + v1) / 2.0).filled(),
        )
    }))?;

    let tick_len = px(0.05);
    let tick_style = TextStyle::from(label_font.clone()).pos(Pos::new(HPos::Left, VPos::Center));
    for v in colorbar_ticks(bar_lo, bar_hi) {
        let (x, y) = bar_chart.backend_coord(&(1.0, v));
        canvas.draw(&PathElement::new(vec![(x, y), (x + tick_len, y)], BLACK))?;
        canvas.draw(&Text::new(
            format!("{:.0}", v),
            (x + tick_len * 2, y),
            tick_style.clone(),
        ))?;
    }

    let (bar_right, bar_top) = bar_chart.backend_coord(&(1.0, bar_hi));
    let (_, bar_bottom) = bar_chart.backend_coord(&(1.0, bar_lo));
    let desc_style = TextStyle::from(label_font.transform(FontTransform::Rotate90))
        .pos(Pos::new(HPos::Center, VPos::Center));
    canvas.draw(&Text::new(
        cfg.colorbar_label.clone(),
        (bar_right + px(0.75), (bar_top + bar_bottom) / 2),
        desc_style,
    ))?;

    Ok(())
}

/// Filled curves with white outlines; the first column is drawn last so it sits on top.
fn draw_curves<DB>(
    chart: &mut ChartContext<'_, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>,
    norm: &NormalizedTable,
    means: &[MeanAge],
    scale: &ColorScale,
    stacking: &Stacking,
    outline: ShapeStyle,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    for i in (0..norm.num_columns()).rev() {
        let offset = stacking.offset(i);
        let color = curve_color(means, scale, &norm.columns[i]);
        let curve = norm.curve(i);

        let mut polygon: Vec<(f64, f64)> = curve.iter().map(|&(x, p)| (x, offset + p)).collect();
        polygon.extend(curve.iter().rev().map(|&(x, _)| (x, offset)));
        chart.draw_series(std::iter::once(Polygon::new(polygon, color.filled())))?;

        chart.draw_series(LineSeries::new(
            curve.iter().map(|&(x, _)| (x, offset)),
            outline,
        ))?;
        chart.draw_series(LineSeries::new(
            curve.iter().map(|&(x, p)| (x, offset + p)),
            outline,
        ))?;
    }
    Ok(())
}

/// Tick mark and label at each column baseline, left of the plotting area.
fn draw_y_ticks<DB>(
    canvas: &DrawingArea<DB, Shift>,
    chart: &ChartContext<'_, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>,
    ticks: &[Tick],
    x_lo: f64,
    font: &FontDesc,
    tick_len: i32,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let style = TextStyle::from(font.clone()).pos(Pos::new(HPos::Right, VPos::Center));
    for tick in ticks {
        let (x, y) = chart.backend_coord(&(x_lo, tick.position));
        canvas.draw(&PathElement::new(vec![(x - tick_len, y), (x, y)], BLACK))?;
        canvas.draw(&Text::new(
            tick.label.clone(),
            (x - tick_len * 2, y),
            style.clone(),
        ))?;
    }
    Ok(())
}

/// `primary` when it loads, `fallback` otherwise.
fn pick_font_family<'a>(primary: &'a str, fallback: &'a str, loads: impl Fn(&str) -> bool) -> &'a str {
    if loads(primary) {
        primary
    } else {
        debug!(primary, fallback, "font family unavailable, falling back");
        fallback
    }
}

fn font_loads(name: &str) -> bool {
    FontDesc::new(FontFamily::from(name), 12.0, FontStyle::Normal)
        .layout_box("0")
        .is_ok()
}

/// Horizontal extent of the ages, widened when only one age is present.
fn age_range(norm: &NormalizedTable) -> (f64, f64) {
    let lo = norm.ages.iter().copied().min().unwrap_or(0) as f64;
    let hi = norm.ages.iter().copied().max().unwrap_or(0) as f64;
    if hi > lo {
        (lo, hi)
    } else {
        (lo - 0.5, hi + 0.5)
    }
}
