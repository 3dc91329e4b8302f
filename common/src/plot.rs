use std::path::Path;

use itertools::{Itertools, MinMaxResult};
use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use tracing::{debug, warn};

use crate::{
    error::PlotError,
    group::{Series, group_benchmarks},
    result::{Metric, read_report},
};

const FIGURE_SIZE: (u32, u32) = (1000, 600);

/// Load a Google Benchmark report and render one log-log line series per
/// benchmark base name.
///
/// Arguments:
/// * `input` - Google Benchmark JSON output (`--benchmark_format=json`)
/// * `output` - Image path; the extension picks the backend (svg, png, bmp, jpg)
/// * `metric` - Which timing field to plot
/// * `title` - Chart caption, defaults to `"Google Benchmark: <metric>"`
pub fn plot(
    input: &Path,
    output: &Path,
    metric: Metric,
    title: Option<&str>,
) -> Result<(), PlotError> {
    let report = read_report(input)?;
    let series = group_benchmarks(&report.benchmarks, metric);
    if series.is_empty() {
        return Err(PlotError::EmptyInput);
    }
    let title = title
        .map(str::to_owned)
        .unwrap_or_else(|| format!("Google Benchmark: {metric}"));
    debug!("Rendering {} series to {}", series.len(), output.display());
    render(&series, output, &title)
}

fn render(series: &[Series], output: &Path, title: &str) -> Result<(), PlotError> {
    let extension = output
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    let result = match extension.as_str() {
        "svg" => {
            let root = SVGBackend::new(output, FIGURE_SIZE).into_drawing_area();
            draw_chart(&root, series, title).map_err(|err| err.to_string())
        }
        "png" | "bmp" | "jpg" | "jpeg" => {
            let root = BitMapBackend::new(output, FIGURE_SIZE).into_drawing_area();
            draw_chart(&root, series, title).map_err(|err| err.to_string())
        }
        other => Err(format!("unsupported output format {other:?}")),
    };
    result.map_err(|message| PlotError::Write {
        path: output.to_path_buf(),
        message,
    })
}

fn draw_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    series: &[Series],
    title: &str,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    let coordinates = series.iter().map(Series::coordinates).collect::<Vec<_>>();
    // log axes cannot represent non-positive values
    let dropped = coordinates
        .iter()
        .flatten()
        .filter(|&&(x, y)| x <= 0.0 || y <= 0.0)
        .count();
    if dropped > 0 {
        warn!("Dropping {dropped} points that do not fit a log scale");
    }

    let (x_lo, x_hi) = log_bounds(coordinates.iter().flatten().map(|&(x, _)| x));
    let (y_lo, y_hi) = log_bounds(coordinates.iter().flatten().map(|&(_, y)| y));

    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(root)
        .caption(title, ("sans-serif", 24).into_font())
        .margin(10)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d((x_lo..x_hi).log_scale(), (y_lo..y_hi).log_scale())?;

    chart
        .configure_mesh()
        .x_desc("Size")
        .y_desc("CPU time, ns")
        .draw()?;

    for (idx, (s, coords)) in series.iter().zip(&coordinates).enumerate() {
        let color = Palette99::pick(idx).mix(1.0);
        let points = coords
            .iter()
            .copied()
            .filter(|&(x, y)| x > 0.0 && y > 0.0)
            .collect::<Vec<_>>();
        chart
            .draw_series(LineSeries::new(points.iter().copied(), color))?
            .label(&s.base)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
        chart.draw_series(points.iter().map(|&p| Circle::new(p, 3, color.filled())))?;
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;
    root.present()?;
    Ok(())
}

fn log_bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    match values.filter(|v| v.is_finite() && *v > 0.0).minmax() {
        MinMaxResult::NoElements => (1.0, 10.0),
        MinMaxResult::OneElement(v) => (v / 2.0, v * 2.0),
        MinMaxResult::MinMax(lo, hi) if lo < hi => (lo, hi),
        MinMaxResult::MinMax(v, _) => (v / 2.0, v * 2.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_over_positive_values_only() {
        let (lo, hi) = log_bounds([0.0, 8.0, 32.0, -4.0].into_iter());
        assert_eq!((lo, hi), (8.0, 32.0));
    }

    #[test]
    fn bounds_fall_back_when_nothing_fits() {
        assert_eq!(log_bounds(std::iter::empty()), (1.0, 10.0));
        assert_eq!(log_bounds([0.0].into_iter()), (1.0, 10.0));
    }

    #[test]
    fn bounds_widen_degenerate_ranges() {
        assert_eq!(log_bounds([16.0].into_iter()), (8.0, 32.0));
        assert_eq!(log_bounds([16.0, 16.0].into_iter()), (8.0, 32.0));
    }
}
