//! SVG chart rendering for reports.
//!
//! Two charts: the equity curve against the investment baseline, and the
//! distribution of per-trade returns.

use crate::domain::performance::PerformanceReport;

const WIDTH: f64 = 600.0;
const HEIGHT: f64 = 300.0;
const PADDING: f64 = 40.0;

pub const HISTOGRAM_BINS: usize = 20;

#[derive(Debug, Clone, PartialEq)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Equal-width bins spanning `[min, max]`; the last bin is closed on the right.
/// A constant sample is centered in a unit-wide range.
pub fn histogram(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    if values.is_empty() || bins == 0 {
        return Vec::new();
    }

    let mut min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let mut max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if max - min <= 0.0 {
        min -= 0.5;
        max += 0.5;
    }
    let width = (max - min) / bins as f64;

    let mut counts = vec![0usize; bins];
    for &v in values {
        let index = (((v - min) / width) as usize).min(bins - 1);
        counts[index] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            lower: min + i as f64 * width,
            upper: min + (i + 1) as f64 * width,
            count,
        })
        .collect()
}

/// Gaussian kernel density estimate scaled to histogram counts, sampled at
/// `points` evenly spaced positions over `[lower, upper]`. Bandwidth follows
/// Scott's rule on the sample standard deviation. Empty when fewer than two
/// values or when the sample is constant.
pub fn density_curve(
    values: &[f64],
    bin_width: f64,
    lower: f64,
    upper: f64,
    points: usize,
) -> Vec<(f64, f64)> {
    let n = values.len();
    if n < 2 || points < 2 || upper <= lower {
        return Vec::new();
    }

    let mean = values.iter().sum::<f64>() / n as f64;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
    let bandwidth = variance.sqrt() * (n as f64).powf(-0.2);
    if bandwidth <= 0.0 || !bandwidth.is_finite() {
        return Vec::new();
    }

    let norm = 1.0 / (bandwidth * (2.0 * std::f64::consts::PI).sqrt());
    let step = (upper - lower) / (points - 1) as f64;
    (0..points)
        .map(|i| {
            let x = lower + i as f64 * step;
            let density: f64 = values
                .iter()
                .map(|v| {
                    let z = (x - v) / bandwidth;
                    norm * (-0.5 * z * z).exp()
                })
                .sum::<f64>()
                / n as f64;
            (x, density * n as f64 * bin_width)
        })
        .collect()
}

fn svg_open(title: &str) -> String {
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w:.0}" height="{h:.0}" viewBox="0 0 {w:.0} {h:.0}">
<rect width="{w:.0}" height="{h:.0}" fill="white"/>
<text x="{cx:.1}" y="20" text-anchor="middle" font-size="14">{title}</text>
<line x1="{p:.1}" y1="{p:.1}" x2="{p:.1}" y2="{b:.1}" stroke="black"/>
<line x1="{p:.1}" y1="{b:.1}" x2="{r:.1}" y2="{b:.1}" stroke="black"/>
"#,
        w = WIDTH,
        h = HEIGHT,
        cx = WIDTH / 2.0,
        p = PADDING,
        b = HEIGHT - PADDING,
        r = WIDTH - PADDING,
        title = title,
    )
}

/// Equity line with a dashed investment baseline, shaded green where the
/// equity is at or above the baseline and red below it. Returns an empty
/// string when there are no trades.
pub fn generate_equity_svg(report: &PerformanceReport) -> String {
    if report.trades.is_empty() {
        return String::new();
    }

    let baseline = report.investment;
    let equity: Vec<f64> = report.equity_curve().collect();
    let seconds: Vec<f64> = report
        .trades
        .iter()
        .map(|t| t.selected.trade.date.and_utc().timestamp() as f64)
        .collect();

    let min_y = equity.iter().copied().fold(baseline, f64::min);
    let max_y = equity.iter().copied().fold(baseline, f64::max);
    let plot_width = WIDTH - 2.0 * PADDING;
    let plot_height = HEIGHT - 2.0 * PADDING;
    let scale_y = if max_y > min_y { plot_height / (max_y - min_y) } else { 0.0 };

    let first = seconds.iter().copied().fold(f64::INFINITY, f64::min);
    let last = seconds.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let x_at = |i: usize| -> f64 {
        if last > first {
            PADDING + (seconds[i] - first) / (last - first) * plot_width
        } else if equity.len() > 1 {
            PADDING + i as f64 / (equity.len() - 1) as f64 * plot_width
        } else {
            PADDING + plot_width / 2.0
        }
    };
    let y_at = |value: f64| -> f64 {
        if scale_y > 0.0 {
            HEIGHT - PADDING - (value - min_y) * scale_y
        } else {
            HEIGHT / 2.0
        }
    };

    let mut svg = svg_open(&format!("Growth of {:.0} Investment", baseline));
    let base_y = y_at(baseline);

    for i in 1..equity.len() {
        let (x0, x1) = (x_at(i - 1), x_at(i));
        let (e0, e1) = (equity[i - 1], equity[i]);
        let (above0, above1) = (e0 >= baseline, e1 >= baseline);

        if above0 == above1 {
            svg.push_str(&shade(x0, x1, y_at(e0), y_at(e1), base_y, above0));
        } else {
            let t = (baseline - e0) / (e1 - e0);
            let xc = x0 + t * (x1 - x0);
            svg.push_str(&shade(x0, xc, y_at(e0), base_y, base_y, above0));
            svg.push_str(&shade(xc, x1, base_y, y_at(e1), base_y, above1));
        }
    }

    svg.push_str(&format!(
        "<line x1=\"{:.1}\" y1=\"{:.1}\" x2=\"{:.1}\" y2=\"{:.1}\" stroke=\"gray\" stroke-dasharray=\"6,4\"/>\n",
        PADDING,
        base_y,
        WIDTH - PADDING,
        base_y
    ));

    let points: Vec<String> = equity
        .iter()
        .enumerate()
        .map(|(i, &e)| format!("{:.1},{:.1}", x_at(i), y_at(e)))
        .collect();
    svg.push_str(&format!(
        "<polyline points=\"{}\" fill=\"none\" stroke=\"#00C805\" stroke-width=\"2\"/>\n",
        points.join(" ")
    ));

    svg.push_str("</svg>\n");
    svg
}

fn shade(x0: f64, x1: f64, y0: f64, y1: f64, base_y: f64, above: bool) -> String {
    let color = if above { "green" } else { "red" };
    format!(
        "<polygon points=\"{:.1},{:.1} {:.1},{:.1} {:.1},{:.1} {:.1},{:.1}\" fill=\"{}\" fill-opacity=\"0.1\"/>\n",
        x0, base_y, x0, y0, x1, y1, x1, base_y, color
    )
}

/// Histogram of per-trade returns in percent. Returns an empty string when
/// there are no trades.
pub fn generate_return_histogram_svg(report: &PerformanceReport) -> String {
    let returns_pct: Vec<f64> = report.net_returns().map(|r| r * 100.0).collect();
    let bins = histogram(&returns_pct, HISTOGRAM_BINS);
    if bins.is_empty() {
        return String::new();
    }

    let plot_width = WIDTH - 2.0 * PADDING;
    let plot_height = HEIGHT - 2.0 * PADDING;
    let bar_width = plot_width / bins.len() as f64;

    let first = &bins[0];
    let last = &bins[bins.len() - 1];
    let density = density_curve(&returns_pct, first.upper - first.lower, first.lower, last.upper, 100);

    let max_count = bins.iter().map(|b| b.count).max().unwrap_or(0).max(1) as f64;
    let max_y = density.iter().map(|&(_, y)| y).fold(max_count, f64::max);

    let mut svg = svg_open("Distribution of Trade Returns");
    for (i, bin) in bins.iter().enumerate() {
        if bin.count == 0 {
            continue;
        }
        let bar_height = bin.count as f64 / max_y * plot_height;
        svg.push_str(&format!(
            "<rect x=\"{:.1}\" y=\"{:.1}\" width=\"{:.1}\" height=\"{:.1}\" fill=\"blue\" fill-opacity=\"0.6\"/>\n",
            PADDING + i as f64 * bar_width,
            HEIGHT - PADDING - bar_height,
            bar_width,
            bar_height
        ));
    }

    if !density.is_empty() {
        let span = last.upper - first.lower;
        let points: Vec<String> = density
            .iter()
            .map(|&(x, y)| {
                format!(
                    "{:.1},{:.1}",
                    PADDING + (x - first.lower) / span * plot_width,
                    HEIGHT - PADDING - y / max_y * plot_height
                )
            })
            .collect();
        svg.push_str(&format!(
            "<polyline points=\"{}\" fill=\"none\" stroke=\"blue\" stroke-width=\"1.5\"/>\n",
            points.join(" ")
        ));
    }

    svg.push_str(&format!(
        "<text x=\"{:.1}\" y=\"{:.1}\" font-size=\"10\">{:.2}%</text>\n",
        PADDING,
        HEIGHT - PADDING + 14.0,
        first.lower
    ));
    svg.push_str(&format!(
        "<text x=\"{:.1}\" y=\"{:.1}\" font-size=\"10\" text-anchor=\"end\">{:.2}%</text>\n",
        WIDTH - PADDING,
        HEIGHT - PADDING + 14.0,
        last.upper
    ));
    svg.push_str(&format!(
        "<text x=\"{:.1}\" y=\"{:.1}\" font-size=\"12\" text-anchor=\"middle\">Return per Trade (%)</text>\n",
        WIDTH / 2.0,
        HEIGHT - 8.0
    ));

    svg.push_str("</svg>\n");
    svg
}
