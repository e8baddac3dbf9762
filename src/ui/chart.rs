use std::f64::consts::{FRAC_PI_2, TAU};

use eframe::egui::{self, Color32, Ui};
use egui_plot::{
    Bar, BarChart, GridMark, Legend, Line, Plot, PlotPoint, PlotPoints, Points, Polygon, Text,
};

use crate::color::{generate_palette, with_fill_alpha, SERIES_COLOR};
use crate::describe::{ChartDescription, ChartFamily};

// ---------------------------------------------------------------------------
// Chart panel (central area)
// ---------------------------------------------------------------------------

/// Draw a chart description and return the screen rect it occupied, which the
/// export path crops a screenshot to.
pub fn chart_panel(ui: &mut Ui, desc: &ChartDescription) -> egui::Rect {
    let opts = &desc.options;
    let mut plot = Plot::new("chart_panel");

    if opts.show_legend {
        plot = plot.legend(Legend::default());
    }

    match opts.family {
        ChartFamily::Bar | ChartFamily::Line | ChartFamily::Scatter | ChartFamily::Bubble => {
            // Category ticks: integer positions map back to the labels.
            let labels = desc.labels.clone();
            let fmt = move |mark: GridMark, _range: &std::ops::RangeInclusive<f64>| {
                let idx = mark.value.round();
                if (mark.value - idx).abs() > 1e-6 || idx < 0.0 {
                    return String::new();
                }
                labels.get(idx as usize).cloned().unwrap_or_default()
            };

            let flipped = opts.family == ChartFamily::Bar && opts.horizontal;
            if flipped {
                plot = plot
                    .y_axis_formatter(fmt)
                    .x_axis_label(opts.y_label.clone())
                    .y_axis_label(opts.x_label.clone());
            } else {
                plot = plot
                    .x_axis_formatter(fmt)
                    .x_axis_label(opts.x_label.clone())
                    .y_axis_label(opts.y_label.clone());
            }
        }
        // Radial charts have no meaningful axes.
        ChartFamily::Pie | ChartFamily::Radar | ChartFamily::PolarArea => {
            plot = plot
                .data_aspect(1.0)
                .show_axes(false)
                .show_grid(false)
                .show_x(false)
                .show_y(false);
        }
    }

    let response = plot.show(ui, |plot_ui| match opts.family {
        ChartFamily::Bar => bar_chart(plot_ui, desc),
        ChartFamily::Line => line_chart(plot_ui, desc),
        ChartFamily::Scatter => points_chart(plot_ui, desc, false),
        ChartFamily::Bubble => points_chart(plot_ui, desc, true),
        ChartFamily::Pie => pie_chart(plot_ui, desc),
        ChartFamily::Radar => radar_chart(plot_ui, desc),
        ChartFamily::PolarArea => polar_area_chart(plot_ui, desc),
    });
    response.response.rect
}

// ---------------------------------------------------------------------------
// Cartesian families
// ---------------------------------------------------------------------------

fn bar_chart(plot_ui: &mut egui_plot::PlotUi, desc: &ChartDescription) {
    let series = &desc.series[0];
    let bars: Vec<Bar> = series
        .values
        .iter()
        .enumerate()
        .map(|(i, &v)| {
            Bar::new(i as f64, v)
                .width(0.6)
                .name(desc.labels.get(i).cloned().unwrap_or_default())
        })
        .collect();

    let mut chart = BarChart::new(bars)
        .color(SERIES_COLOR)
        .name(&series.name);
    if desc.options.horizontal {
        chart = chart.horizontal();
    }
    plot_ui.bar_chart(chart);
}

fn line_chart(plot_ui: &mut egui_plot::PlotUi, desc: &ChartDescription) {
    let series = &desc.series[0];
    let points: PlotPoints = series
        .values
        .iter()
        .enumerate()
        .map(|(i, &v)| [i as f64, v])
        .collect();

    plot_ui.line(
        Line::new(points)
            .color(SERIES_COLOR)
            .name(&series.name)
            .width(1.5),
    );
}

fn points_chart(plot_ui: &mut egui_plot::PlotUi, desc: &ChartDescription, sized: bool) {
    let series = &desc.series[0];

    if !sized {
        let points: PlotPoints = series
            .values
            .iter()
            .enumerate()
            .map(|(i, &v)| [i as f64, v])
            .collect();
        plot_ui.points(
            Points::new(points)
                .radius(3.5)
                .color(SERIES_COLOR)
                .name(&series.name),
        );
        return;
    }

    // Bubble: marker size scales with the value's place in the series range.
    let min = series.values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = series.values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;

    for (i, &v) in series.values.iter().enumerate() {
        let scale = if range.abs() < f64::EPSILON {
            0.5
        } else {
            (v - min) / range
        };
        plot_ui.points(
            Points::new(vec![[i as f64, v]])
                .radius(3.0 + 9.0 * scale as f32)
                .color(with_fill_alpha(SERIES_COLOR, 160))
                .name(&series.name),
        );
    }
}

// ---------------------------------------------------------------------------
// Radial families
// ---------------------------------------------------------------------------

fn pie_chart(plot_ui: &mut egui_plot::PlotUi, desc: &ChartDescription) {
    let series = &desc.series[0];
    let total: f64 = series.values.iter().map(|v| v.abs()).sum();
    if total <= f64::EPSILON {
        return;
    }

    let colors = generate_palette(series.values.len());
    let cutout = desc.options.cutout as f64;
    let mut start = FRAC_PI_2; // 12 o'clock

    for (i, &v) in series.values.iter().enumerate() {
        let sweep = v.abs() / total * TAU;
        let slice = sector(start, start + sweep, cutout, 1.0);
        let label = desc.labels.get(i).cloned().unwrap_or_default();
        plot_ui.polygon(
            Polygon::new(PlotPoints::from(slice))
                .fill_color(with_fill_alpha(colors[i], 200))
                .name(format!("{label}: {v}")),
        );
        start += sweep;
    }
}

fn polar_area_chart(plot_ui: &mut egui_plot::PlotUi, desc: &ChartDescription) {
    let series = &desc.series[0];
    let max = series
        .values
        .iter()
        .map(|v| v.abs())
        .fold(f64::NEG_INFINITY, f64::max);
    if max <= f64::EPSILON {
        return;
    }

    // Equal angles, radius proportional to the value.
    let n = series.values.len();
    let colors = generate_palette(n);
    let sweep = TAU / n as f64;

    for (i, &v) in series.values.iter().enumerate() {
        let start = FRAC_PI_2 + sweep * i as f64;
        let radius = v.abs() / max;
        let slice = sector(start, start + sweep, 0.0, radius);
        let label = desc.labels.get(i).cloned().unwrap_or_default();
        plot_ui.polygon(
            Polygon::new(PlotPoints::from(slice))
                .fill_color(with_fill_alpha(colors[i], 170))
                .name(format!("{label}: {v}")),
        );
    }
}

fn radar_chart(plot_ui: &mut egui_plot::PlotUi, desc: &ChartDescription) {
    let series = &desc.series[0];
    let n = series.values.len();
    let max = series
        .values
        .iter()
        .map(|v| v.abs())
        .fold(f64::NEG_INFINITY, f64::max)
        .max(f64::EPSILON);

    // Spokes, one per label.
    for (i, label) in desc.labels.iter().enumerate() {
        let angle = FRAC_PI_2 + TAU * i as f64 / n as f64;
        let (x, y) = (angle.cos(), angle.sin());
        plot_ui.line(
            Line::new(vec![[0.0, 0.0], [x, y]])
                .color(Color32::GRAY)
                .width(0.5),
        );
        plot_ui.text(Text::new(PlotPoint::new(x * 1.12, y * 1.12), label.clone()));
    }

    // Value polygon, normalised to the largest magnitude.
    let outline: Vec<[f64; 2]> = series
        .values
        .iter()
        .enumerate()
        .map(|(i, &v)| {
            let angle = FRAC_PI_2 + TAU * i as f64 / n as f64;
            let r = v.abs() / max;
            [r * angle.cos(), r * angle.sin()]
        })
        .collect();
    plot_ui.polygon(
        Polygon::new(PlotPoints::from(outline))
            .fill_color(with_fill_alpha(SERIES_COLOR, 80))
            .name(&series.name),
    );
}

/// Points of an annular sector: outer arc from `a0` to `a1` at `outer`, then
/// back along the inner arc (or through the centre when `inner` is zero).
fn sector(a0: f64, a1: f64, inner: f64, outer: f64) -> Vec<[f64; 2]> {
    let steps = (((a1 - a0).abs() / 0.05).ceil() as usize).max(2);
    let arc = |t: f64, r: f64| [r * t.cos(), r * t.sin()];

    let mut pts = Vec::with_capacity(2 * steps + 3);
    for s in 0..=steps {
        let t = a0 + (a1 - a0) * s as f64 / steps as f64;
        pts.push(arc(t, outer));
    }
    if inner > 0.0 {
        for s in (0..=steps).rev() {
            let t = a0 + (a1 - a0) * s as f64 / steps as f64;
            pts.push(arc(t, inner * outer));
        }
    } else {
        pts.push([0.0, 0.0]);
    }
    pts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sector_spans_the_requested_arc() {
        let pts = sector(0.0, FRAC_PI_2, 0.0, 1.0);
        // starts on the x axis, ends at the centre point
        assert!((pts[0][0] - 1.0).abs() < 1e-9);
        assert_eq!(*pts.last().unwrap(), [0.0, 0.0]);
    }

    #[test]
    fn annular_sector_has_inner_arc() {
        let pts = sector(0.0, FRAC_PI_2, 0.5, 1.0);
        // last point sits on the inner radius, not the centre
        let last = pts.last().unwrap();
        let r = (last[0] * last[0] + last[1] * last[1]).sqrt();
        assert!((r - 0.5).abs() < 1e-9);
    }
}
