//! SVG equity-curve chart.

use crate::domain::error::Error;
use crate::domain::time_series::TimeSeries;
use crate::ports::chart_port::ChartPort;
use std::fs;
use std::path::Path;

const WIDTH: f64 = 500.0;
const HEIGHT: f64 = 200.0;
const PADDING: f64 = 40.0;

#[derive(Debug, Default)]
pub struct SvgChartAdapter;

impl SvgChartAdapter {
    pub fn new() -> Self {
        Self
    }
}

pub fn format_equity_chart(equity_curve: &TimeSeries) -> Result<String, Error> {
    let values: Vec<f64> = equity_curve
        .values()
        .into_iter()
        .filter(|v| v.is_finite())
        .collect();
    if values.is_empty() {
        return Err(Error::Chart {
            reason: "no equity data available".to_string(),
        });
    }

    let min_equity = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max_equity = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let plot_width = WIDTH - 2.0 * PADDING;
    let plot_height = HEIGHT - 2.0 * PADDING;

    let range = max_equity - min_equity;
    let scale_y = if range > 0.0 { plot_height / range } else { 1.0 };
    let scale_x = if values.len() > 1 {
        plot_width / (values.len() - 1) as f64
    } else {
        0.0
    };

    let points: Vec<String> = values
        .iter()
        .enumerate()
        .map(|(i, equity)| {
            let x = PADDING + i as f64 * scale_x;
            let y = HEIGHT - PADDING - (equity - min_equity) * scale_y;
            format!("{:.1},{:.1}", x, y)
        })
        .collect();

    let (start, end) = match (equity_curve.first(), equity_curve.last()) {
        (Some((s, _)), Some((e, _))) => (s.to_string(), e.to_string()),
        _ => (String::new(), String::new()),
    };

    Ok(format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w:.0}" height="{h:.0}" viewBox="0 0 {w:.0} {h:.0}">
  <rect width="100%" height="100%" fill="white"/>
  <text x="{p:.0}" y="{title_y:.0}" font-family="sans-serif" font-size="14">Equity Curve</text>
  <line x1="{p:.0}" y1="{p:.0}" x2="{p:.0}" y2="{bottom:.0}" stroke="black"/>
  <line x1="{p:.0}" y1="{bottom:.0}" x2="{right:.0}" y2="{bottom:.0}" stroke="black"/>
  <text x="{p:.0}" y="{label_y:.0}" font-family="sans-serif" font-size="10">{start}</text>
  <text x="{right:.0}" y="{label_y:.0}" font-family="sans-serif" font-size="10" text-anchor="end">{end}</text>
  <text x="{axis_x:.0}" y="{p:.0}" font-family="sans-serif" font-size="10" text-anchor="end">{max:.0}</text>
  <text x="{axis_x:.0}" y="{bottom:.0}" font-family="sans-serif" font-size="10" text-anchor="end">{min:.0}</text>
  <polyline fill="none" stroke="blue" stroke-width="1" points="{points}"/>
</svg>
"#,
        w = WIDTH,
        h = HEIGHT,
        p = PADDING,
        title_y = PADDING / 2.0,
        bottom = HEIGHT - PADDING,
        right = WIDTH - PADDING,
        label_y = HEIGHT - PADDING / 2.0,
        axis_x = PADDING - 4.0,
        max = max_equity,
        min = min_equity,
        points = points.join(" "),
    ))
}

impl ChartPort for SvgChartAdapter {
    fn render_equity(&self, equity_curve: &TimeSeries, output_path: &Path) -> Result<(), Error> {
        let svg = format_equity_chart(equity_curve)?;
        fs::write(output_path, svg).map_err(|e| Error::Chart {
            reason: format!("failed to write {}: {}", output_path.display(), e),
        })
    }
}
