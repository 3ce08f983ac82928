//! Four-panel comparison chart of the validated table.
//!
//! Rendering needs `plotters`, compiled in with the `chart` feature. Without
//! it `render_chart` reports `ChartOutcome::Unavailable` and draws nothing.

use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::Targets;
use crate::models::record::columns;
use crate::validation::ValidatedTable;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChartOutcome {
    Written(PathBuf),
    Unavailable,
    Failed(String),
}

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("chart rendering failed: {0}")]
    Render(String),
}

pub const CHART_AVAILABLE: bool = cfg!(feature = "chart");

/// Bar colour per status label, as RGB.
pub fn status_rgb(label: &str) -> (u8, u8, u8) {
    match label {
        "OK" => (0, 128, 0),
        "ERROR" => (255, 0, 0),
        "TP_ERROR" => (255, 165, 0),
        "SL_ERROR" => (255, 255, 0),
        "BOTH_ERROR" => (139, 0, 0),
        _ => (128, 128, 128),
    }
}

/// Label counts for the status panel, most frequent first. The EA's own
/// `Match_Status` column is preferred when the file has one.
pub fn status_counts(table: &ValidatedTable) -> Vec<(String, usize)> {
    let use_match_status = table.has_column(columns::MATCH_STATUS);
    let mut counts: Vec<(String, usize)> = Vec::new();

    for row in &table.rows {
        let label = if use_match_status {
            match row.record.extra(columns::MATCH_STATUS).map(str::trim) {
                Some(s) if !s.is_empty() => s.to_string(),
                _ => "N/A".to_string(),
            }
        } else {
            row.status.as_str().to_string()
        };
        match counts.iter_mut().find(|(l, _)| *l == label) {
            Some((_, n)) => *n += 1,
            None => counts.push((label, 1)),
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    counts
}

/// Padded axis bounds covering `values`.
#[cfg_attr(not(feature = "chart"), allow(dead_code))]
pub(crate) fn axis_range(values: &[f64]) -> (f64, f64) {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if !min.is_finite() || !max.is_finite() {
        return (0.0, 1.0);
    }
    let span = max - min;
    if span < 1e-9 {
        return (min - 1.0, max + 1.0);
    }
    (min - span * 0.1, max + span * 0.1)
}

#[cfg(feature = "chart")]
pub fn render_chart(
    table: &ValidatedTable,
    targets: &Targets,
    path: &Path,
) -> Result<ChartOutcome, ChartError> {
    draw::draw(table, targets, path).map_err(|e| ChartError::Render(e.to_string()))?;
    tracing::info!("Chart saved: {}", path.display());
    Ok(ChartOutcome::Written(path.to_path_buf()))
}

#[cfg(not(feature = "chart"))]
pub fn render_chart(
    _table: &ValidatedTable,
    _targets: &Targets,
    path: &Path,
) -> Result<ChartOutcome, ChartError> {
    tracing::warn!(
        "Charting unavailable (built without the `chart` feature), skipping {}",
        path.display()
    );
    Ok(ChartOutcome::Unavailable)
}

#[cfg(feature = "chart")]
mod draw {
    use plotters::coord::Shift;
    use plotters::prelude::*;
    use std::path::Path;

    use super::{axis_range, status_counts, status_rgb};
    use crate::config::Targets;
    use crate::validation::ValidatedTable;

    type DrawResult<DB> = Result<(), DrawingAreaErrorKind<<DB as DrawingBackend>::ErrorType>>;

    const SIZE: (u32, u32) = (1400, 1000);
    const STEEL_BLUE: RGBColor = RGBColor(70, 130, 180);

    pub(super) fn draw(
        table: &ValidatedTable,
        targets: &Targets,
        path: &Path,
    ) -> DrawResult<BitMapBackend<'static>> {
        let root = BitMapBackend::new(path, SIZE).into_drawing_area();
        root.fill(&WHITE)?;
        let root = root.titled(
            "Gold EA - SL/TP Parameter Verification",
            ("sans-serif", 26).into_font().style(FontStyle::Bold),
        )?;
        let panels = root.split_evenly((2, 2));

        let trades: Vec<f64> = table
            .rows
            .iter()
            .enumerate()
            .map(|(i, r)| r.record.trade_id(i) as f64)
            .collect();
        let series = |f: fn(&crate::models::Record) -> Option<f64>| -> Vec<(f64, f64)> {
            table
                .rows
                .iter()
                .zip(&trades)
                .map(|(r, &x)| (x, f(&r.record).unwrap_or(0.0)))
                .collect()
        };

        scatter_panel(
            &panels[0],
            "SL Multiplier: Configured vs Calculated",
            "SL Multiplier (×ATR)",
            &series(|r| r.input_sl_multiplier),
            &series(|r| r.calculated_sl_multiplier),
            targets.sl_multiplier,
        )?;
        scatter_panel(
            &panels[1],
            "TP Multiplier: Configured vs Calculated",
            "TP Multiplier (×ATR)",
            &series(|r| r.input_tp_multiplier),
            &series(|r| r.calculated_tp_multiplier),
            targets.tp_multiplier,
        )?;
        ratio_panel(&panels[2], &series(|r| r.rr_ratio), targets.implied_rr())?;
        status_panel(&panels[3], &status_counts(table))?;

        root.present()?;
        Ok(())
    }

    fn x_bounds(points: &[(f64, f64)]) -> (f64, f64) {
        let xs: Vec<f64> = points.iter().map(|p| p.0).collect();
        let (lo, hi) = axis_range(&xs);
        (lo - 0.5, hi + 0.5)
    }

    fn scatter_panel<DB: DrawingBackend>(
        area: &DrawingArea<DB, Shift>,
        title: &str,
        y_desc: &str,
        configured: &[(f64, f64)],
        calculated: &[(f64, f64)],
        target: f64,
    ) -> DrawResult<DB> {
        let (x0, x1) = x_bounds(configured);
        let ys: Vec<f64> = configured
            .iter()
            .chain(calculated)
            .map(|p| p.1)
            .chain(std::iter::once(target))
            .collect();
        let (y0, y1) = axis_range(&ys);

        let mut chart = ChartBuilder::on(area)
            .caption(title, ("sans-serif", 18))
            .margin(12)
            .x_label_area_size(36)
            .y_label_area_size(50)
            .build_cartesian_2d(x0..x1, y0..y1)?;
        chart
            .configure_mesh()
            .x_desc("Trade number")
            .y_desc(y_desc)
            .light_line_style(BLACK.mix(0.05))
            .draw()?;

        chart
            .draw_series(
                configured
                    .iter()
                    .map(|&p| Circle::new(p, 5, BLUE.mix(0.7).filled())),
            )?
            .label("Configured")
            .legend(|(x, y)| Circle::new((x + 10, y), 5, BLUE.filled()));
        chart
            .draw_series(calculated.iter().map(|&p| Cross::new(p, 5, RED.mix(0.7))))?
            .label("Calculated")
            .legend(|(x, y)| Cross::new((x + 10, y), 5, RED));
        chart
            .draw_series(LineSeries::new(
                vec![(x0, target), (x1, target)],
                GREEN.stroke_width(2),
            ))?
            .label(format!("Target ({:.1})", target))
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], GREEN));

        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
        Ok(())
    }

    fn ratio_panel<DB: DrawingBackend>(
        area: &DrawingArea<DB, Shift>,
        ratios: &[(f64, f64)],
        target: f64,
    ) -> DrawResult<DB> {
        let (x0, x1) = x_bounds(ratios);
        let ys: Vec<f64> = ratios
            .iter()
            .map(|p| p.1)
            .chain([0.0, 1.0, target])
            .collect();
        let (_, y1) = axis_range(&ys);
        let y0 = ys.iter().copied().fold(0.0, f64::min);

        let mut chart = ChartBuilder::on(area)
            .caption("Risk/Reward Ratio per Trade", ("sans-serif", 18))
            .margin(12)
            .x_label_area_size(36)
            .y_label_area_size(50)
            .build_cartesian_2d(x0..x1, y0..y1)?;
        chart
            .configure_mesh()
            .x_desc("Trade number")
            .y_desc("R:R Ratio")
            .light_line_style(BLACK.mix(0.05))
            .draw()?;

        chart.draw_series(ratios.iter().map(|&(x, y)| {
            Rectangle::new([(x - 0.4, 0.0), (x + 0.4, y)], STEEL_BLUE.mix(0.7).filled())
        }))?;
        chart
            .draw_series(LineSeries::new(
                vec![(x0, target), (x1, target)],
                GREEN.stroke_width(2),
            ))?
            .label(format!("Target ({:.1})", target))
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], GREEN));
        chart
            .draw_series(LineSeries::new(vec![(x0, 1.0), (x1, 1.0)], RED.stroke_width(1)))?
            .label("Threshold (1.0)")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED));

        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
        Ok(())
    }

    fn status_panel<DB: DrawingBackend>(
        area: &DrawingArea<DB, Shift>,
        counts: &[(String, usize)],
    ) -> DrawResult<DB> {
        let total: usize = counts.iter().map(|(_, n)| n).sum();
        let max = counts.iter().map(|(_, n)| *n).max().unwrap_or(0) as f64;
        let n = counts.len().max(1) as f64;

        let mut chart = ChartBuilder::on(area)
            .caption("Validation Status Distribution", ("sans-serif", 18))
            .margin(12)
            .x_label_area_size(36)
            .y_label_area_size(50)
            .build_cartesian_2d(-0.5..n - 0.5, 0.0..(max * 1.15).max(1.0))?;

        let labels: Vec<String> = counts.iter().map(|(l, _)| l.clone()).collect();
        let label_for = |x: &f64| -> String {
            let i = x.round();
            if (x - i).abs() > 1e-6 || i < 0.0 {
                return String::new();
            }
            labels.get(i as usize).cloned().unwrap_or_default()
        };
        chart
            .configure_mesh()
            .x_desc("Status")
            .y_desc("Number of trades")
            .x_labels(counts.len().max(1))
            .x_label_formatter(&label_for)
            .light_line_style(BLACK.mix(0.05))
            .draw()?;

        chart.draw_series(counts.iter().enumerate().map(|(i, (label, count))| {
            let (r, g, b) = status_rgb(label);
            let x = i as f64;
            Rectangle::new(
                [(x - 0.4, 0.0), (x + 0.4, *count as f64)],
                RGBColor(r, g, b).mix(0.7).filled(),
            )
        }))?;

        if total > 0 {
            let offset = (max * 0.03).max(0.05);
            chart.draw_series(counts.iter().enumerate().map(|(i, (_, count))| {
                let pct = *count as f64 / total as f64 * 100.0;
                Text::new(
                    format!("{:.1}%", pct),
                    (i as f64 - 0.15, *count as f64 + offset),
                    ("sans-serif", 15).into_font(),
                )
            }))?;
        }
        Ok(())
    }
}
