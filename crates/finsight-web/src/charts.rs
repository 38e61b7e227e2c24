//! Dashboard charts, drawn with plotters onto an in-memory SVG backend.

use std::f64::consts::PI;

use plotters::coord::Shift;
use plotters::prelude::*;

use finsight_statement::{format, DerivedItem, DerivedStatement, LabelKeys, LineRole};

use crate::html::escape;

const SIZE: (u32, u32) = (760, 420);
const LABEL_CHARS: usize = 22;
const FONT: &str = "sans-serif";

const PRIOR_COLOR: RGBColor = RGBColor(147, 197, 253);
const CURRENT_COLOR: RGBColor = RGBColor(29, 78, 216);
const PALETTE: [RGBColor; 10] = [
    RGBColor(59, 130, 246),
    RGBColor(245, 158, 11),
    RGBColor(16, 185, 129),
    RGBColor(239, 68, 68),
    RGBColor(139, 92, 246),
    RGBColor(6, 182, 212),
    RGBColor(236, 72, 153),
    RGBColor(132, 204, 22),
    RGBColor(249, 115, 22),
    RGBColor(99, 102, 241),
];

type Area<'a> = DrawingArea<SVGBackend<'a>, Shift>;

fn short_label(label: &str) -> String {
    if label.chars().count() <= LABEL_CHARS {
        label.to_string()
    } else {
        let cut: String = label.chars().take(LABEL_CHARS - 1).collect();
        format!("{cut}…")
    }
}

fn placeholder(message: &str) -> String {
    format!(r#"<div class="chart-empty text-muted">{}</div>"#, escape(message))
}

fn finite(v: f64) -> f64 {
    if v.is_finite() { v } else { 0.0 }
}

/// Axis range spanning `values` and zero, padded by a tenth.
fn value_range(values: impl Iterator<Item = f64>) -> std::ops::Range<f64> {
    let (mut lo, mut hi) = (0.0_f64, 0.0_f64);
    for v in values.filter(|v| v.is_finite()) {
        lo = lo.min(v);
        hi = hi.max(v);
    }
    if hi == lo {
        hi = lo + 1.0;
    }
    let pad = (hi - lo) * 0.1;
    (if lo < 0.0 { lo - pad } else { lo })..(hi + pad)
}

/// Category axis label: one per line item, at the segment centre.
fn category_label(items: &[DerivedItem], v: &SegmentValue<u32>) -> String {
    match v {
        SegmentValue::CenterOf(i) => items
            .get(*i as usize)
            .map(|item| short_label(&item.label))
            .unwrap_or_default(),
        _ => String::new(),
    }
}

/// Inclusive category range for `n` items; never a single point.
fn categories(n: u32) -> std::ops::Range<u32> {
    0..n.max(2) - 1
}

fn segment_end(i: u32, last: u32) -> SegmentValue<u32> {
    if i < last { SegmentValue::Exact(i + 1) } else { SegmentValue::Last }
}

/// Runs `draw` against a fresh SVG canvas. Drawing failures fall back to
/// the placeholder text.
fn render<F>(kind: &str, empty: &str, draw: F) -> String
where
    F: FnOnce(&Area<'_>) -> anyhow::Result<()>,
{
    let mut svg = String::new();
    let result = {
        let root = SVGBackend::with_string(&mut svg, SIZE).into_drawing_area();
        root.fill(&WHITE)
            .map_err(anyhow::Error::from)
            .and_then(|_| draw(&root))
            .and_then(|_| root.present().map_err(anyhow::Error::from))
    };
    match result {
        Ok(()) => format!(r#"<div class="chart chart-{kind}">{svg}</div>"#),
        Err(e) => {
            tracing::warn!(chart = kind, "Chart rendering failed: {e}");
            placeholder(empty)
        }
    }
}

/// Grouped bars comparing the two periods for every line item.
pub fn bar_chart(statement: &DerivedStatement, title: &str, prior_name: &str, current_name: &str, empty: &str) -> String {
    let items = &statement.items;
    if items.is_empty() {
        return placeholder(empty);
    }
    let x_range = categories(items.len() as u32);
    let last = x_range.end;
    let y_range = value_range(items.iter().flat_map(|i| [i.prior, i.current]));

    render("bar", empty, |root| {
        let mut chart = ChartBuilder::on(root)
            .caption(title, (FONT, 18))
            .margin(12)
            .set_label_area_size(LabelAreaPosition::Left, 90)
            .set_label_area_size(LabelAreaPosition::Bottom, 40)
            .build_cartesian_2d(x_range.into_segmented(), y_range)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(items.len())
            .x_label_formatter(&|v| category_label(items, v))
            .y_label_formatter(&|v| format::amount(*v))
            .label_style((FONT, 12))
            .draw()?;

        chart
            .draw_series(items.iter().enumerate().map(|(i, item)| {
                let i = i as u32;
                Rectangle::new(
                    [(SegmentValue::Exact(i), 0.0), (SegmentValue::CenterOf(i), finite(item.prior))],
                    PRIOR_COLOR.filled(),
                )
            }))?
            .label(prior_name)
            .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 12, y + 5)], PRIOR_COLOR.filled()));

        chart
            .draw_series(items.iter().enumerate().map(|(i, item)| {
                let i = i as u32;
                Rectangle::new(
                    [(SegmentValue::CenterOf(i), 0.0), (segment_end(i, last), finite(item.current))],
                    CURRENT_COLOR.filled(),
                )
            }))?
            .label(current_name)
            .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 12, y + 5)], CURRENT_COLOR.filled()));

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .background_style(WHITE.mix(0.85))
            .border_style(BLACK)
            .label_font((FONT, 12))
            .draw()?;
        Ok(())
    })
}

/// Composition of the current period, aggregate rows left out.
/// Only positive shares are drawn.
pub fn pie_chart(statement: &DerivedStatement, keys: &LabelKeys, title: &str, empty: &str) -> String {
    let slices: Vec<(&str, f64)> = statement
        .items
        .iter()
        .filter(|i| !keys.matches(LineRole::TotalRow, &i.label))
        .filter(|i| i.current_share_pct.is_finite() && i.current_share_pct > 0.0)
        .map(|i| (i.label.as_str(), i.current_share_pct))
        .collect();
    let sum: f64 = slices.iter().map(|(_, v)| v).sum();
    if slices.is_empty() || sum <= 0.0 {
        return placeholder(empty);
    }

    render("pie", empty, |root| {
        let root = root.titled(title, (FONT, 18))?;
        let (width, height) = root.dim_in_pixel();
        let radius = (height.min(width / 2) as f64 / 2.0 - 10.0).max(10.0);
        let center = (radius + 20.0, height as f64 / 2.0);

        let mut start = -PI / 2.0;
        for (i, (label, value)) in slices.iter().enumerate() {
            let color = PALETTE[i % PALETTE.len()];
            let fraction = value / sum;
            let end = start + fraction * 2.0 * PI;

            // One vertex per degree of arc keeps the edge smooth.
            let steps = ((end - start) / (PI / 180.0)).ceil().max(2.0) as usize;
            let arc = (0..=steps).map(|k| {
                let a = start + (end - start) * k as f64 / steps as f64;
                ((center.0 + radius * a.cos()) as i32, (center.1 + radius * a.sin()) as i32)
            });
            let points: Vec<(i32, i32)> = std::iter::once((center.0 as i32, center.1 as i32)).chain(arc).collect();
            root.draw(&Polygon::new(points, color.filled()))?;

            let y = 20 + i as i32 * 22;
            let x = (center.0 + radius + 40.0) as i32;
            root.draw(&Rectangle::new([(x, y), (x + 12, y + 12)], color.filled()))?;
            root.draw(&Text::new(
                format!("{} · {:.1}%", short_label(label), fraction * 100.0),
                (x + 18, y),
                (FONT, 13).into_font(),
            ))?;
            start = end;
        }
        Ok(())
    })
}

/// Growth % per line item as a line with a marker per item.
pub fn growth_chart(statement: &DerivedStatement, title: &str, empty: &str) -> String {
    let items = &statement.items;
    if items.is_empty() {
        return placeholder(empty);
    }
    let x_range = categories(items.len() as u32);
    let y_range = value_range(items.iter().map(|i| i.growth_pct));
    let points: Vec<(SegmentValue<u32>, f64)> = items
        .iter()
        .enumerate()
        .map(|(i, item)| (SegmentValue::CenterOf(i as u32), finite(item.growth_pct)))
        .collect();

    render("growth", empty, |root| {
        let mut chart = ChartBuilder::on(root)
            .caption(title, (FONT, 18))
            .margin(12)
            .set_label_area_size(LabelAreaPosition::Left, 70)
            .set_label_area_size(LabelAreaPosition::Bottom, 40)
            .build_cartesian_2d(x_range.into_segmented(), y_range)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(items.len())
            .x_label_formatter(&|v| category_label(items, v))
            .y_label_formatter(&|v| format::percent(*v))
            .label_style((FONT, 12))
            .draw()?;

        chart.draw_series(LineSeries::new(points.iter().cloned(), CURRENT_COLOR.stroke_width(2)))?;
        chart.draw_series(
            points
                .iter()
                .map(|(x, y)| Circle::new((x.clone(), *y), 4, CURRENT_COLOR.filled())),
        )?;
        Ok(())
    })
}
