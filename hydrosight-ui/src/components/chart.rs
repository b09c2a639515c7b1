//! Chart Components
//!
//! Water-level line charts using HTML5 Canvas: one for the historical +
//! forecast series, one for the prediction/actual comparison. Axis domains
//! come from the core estimator so the lines never hug the chart edges.

use leptos::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::state::GlobalState;
use hydrosight::chart::{chart_domain, comparison_domain};
use hydrosight::series::{ChartPoint, ComparisonPoint, SeriesKind};

/// Line and dot color for measured levels
const HISTORICAL_COLOR: &str = "#3B82F6"; // Blue
/// Dot color for forecast levels
const PREDICTION_COLOR: &str = "#F59E0B"; // Amber
/// Line color for held-out actuals
const ACTUAL_COLOR: &str = "#10B981"; // Green

/// Historical + forecast chart
#[component]
pub fn PredictionChart() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let canvas_ref = create_node_ref::<html::Canvas>();

    // Redraw whenever either slot changes
    create_effect(move |_| {
        let series = state.combined_series();
        if let Some(canvas) = canvas_ref.get() {
            draw_series_chart(&canvas, &series);
        }
    });

    view! {
        <div class="relative">
            <canvas
                node_ref=canvas_ref
                width="800"
                height="400"
                class="w-full h-64 md:h-96 rounded-lg"
            />
            <div class="flex justify-center flex-wrap gap-4 mt-4">
                <LegendEntry color=HISTORICAL_COLOR label="Historical" />
                <LegendEntry color=PREDICTION_COLOR label="Prediction" />
            </div>
        </div>
    }
}

/// Prediction vs. actual comparison chart
#[component]
pub fn ComparisonChart() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let canvas_ref = create_node_ref::<html::Canvas>();

    create_effect(move |_| {
        let points = state
            .comparison
            .with(|slot| slot.data().cloned().unwrap_or_default());
        if let Some(canvas) = canvas_ref.get() {
            draw_comparison_chart(&canvas, &points);
        }
    });

    view! {
        <div class="relative">
            <canvas
                node_ref=canvas_ref
                width="800"
                height="400"
                class="w-full h-64 md:h-96 rounded-lg"
            />
            <div class="flex justify-center flex-wrap gap-4 mt-4">
                <LegendEntry color=ACTUAL_COLOR label="Actual" />
                <LegendEntry color=PREDICTION_COLOR label="Prediction" />
            </div>
        </div>
    }
}

/// One colored dot + label in a chart legend
#[component]
fn LegendEntry(color: &'static str, label: &'static str) -> impl IntoView {
    view! {
        <div class="flex items-center space-x-2">
            <div
                class="w-3 h-3 rounded-full"
                style=format!("background-color: {}", color)
            />
            <span class="text-sm text-gray-600">{label}</span>
        </div>
    }
}

struct ChartArea {
    left: f64,
    top: f64,
    width: f64,
    height: f64,
}

/// Clear the canvas and draw grid lines with y-axis labels for `domain`
fn draw_grid(
    ctx: &CanvasRenderingContext2d,
    width: f64,
    height: f64,
    domain: (f64, f64),
) -> ChartArea {
    let area = ChartArea {
        left: 60.0,
        top: 20.0,
        width: width - 60.0 - 20.0,
        height: height - 20.0 - 40.0,
    };

    ctx.set_fill_style(&"#ffffff".into());
    ctx.fill_rect(0.0, 0.0, width, height);

    ctx.set_stroke_style(&"#e5e7eb".into()); // gray-200
    ctx.set_line_width(1.0);

    let (low, high) = domain;

    // Horizontal grid lines (5 intervals)
    for i in 0..=5 {
        let y = area.top + (i as f64 / 5.0) * area.height;
        ctx.begin_path();
        ctx.move_to(area.left, y);
        ctx.line_to(width - 20.0, y);
        ctx.stroke();

        // Y-axis labels
        let value = high - (i as f64 / 5.0) * (high - low);
        ctx.set_fill_style(&"#6b7280".into()); // gray-500
        ctx.set_font("12px sans-serif");
        let _ = ctx.fill_text(&format!("{:.2}", value), 5.0, y + 4.0);
    }

    area
}

/// X pixel position for point `i` of `len` evenly spaced points
fn x_position(area: &ChartArea, i: usize, len: usize) -> f64 {
    if len <= 1 {
        return area.left + area.width / 2.0;
    }
    area.left + (i as f64 / (len - 1) as f64) * area.width
}

/// Y pixel position for `value` within `domain` (canvas y grows downward)
fn y_position(area: &ChartArea, value: f64, domain: (f64, f64)) -> f64 {
    let (low, high) = domain;
    area.top + ((high - value) / (high - low)) * area.height
}

fn draw_x_labels<F>(
    ctx: &CanvasRenderingContext2d,
    area: &ChartArea,
    height: f64,
    len: usize,
    label: F,
) where
    F: Fn(usize) -> String,
{
    ctx.set_fill_style(&"#6b7280".into());
    ctx.set_font("12px sans-serif");

    // At most 6 labels, always including the first point
    let step = (len / 6).max(1);
    for i in (0..len).step_by(step) {
        let x = x_position(area, i, len);
        let _ = ctx.fill_text(&label(i), x - 15.0, height - 10.0);
    }
}

fn context_of(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
    match canvas.get_context("2d") {
        Ok(Some(ctx)) => ctx.dyn_into::<CanvasRenderingContext2d>().ok(),
        _ => None,
    }
}

/// Draw the merged historical + forecast series as one line
///
/// One continuous line; dots are colored by series kind so the handoff from
/// measured to predicted levels is visible.
fn draw_series_chart(canvas: &HtmlCanvasElement, series: &[ChartPoint]) {
    let Some(ctx) = context_of(canvas) else { return };

    let width = canvas.width() as f64;
    let height = canvas.height() as f64;
    let domain = chart_domain(series);
    let area = draw_grid(&ctx, width, height, domain);

    if series.is_empty() {
        ctx.set_fill_style(&"#9ca3af".into());
        ctx.set_font("16px sans-serif");
        let _ = ctx.fill_text("No data", width / 2.0 - 30.0, height / 2.0);
        return;
    }

    // Line
    ctx.set_stroke_style(&HISTORICAL_COLOR.into());
    ctx.set_line_width(2.0);
    ctx.begin_path();
    for (i, point) in series.iter().enumerate() {
        let x = x_position(&area, i, series.len());
        let y = y_position(&area, point.value, domain);
        if i == 0 {
            ctx.move_to(x, y);
        } else {
            ctx.line_to(x, y);
        }
    }
    ctx.stroke();

    // Dots, colored by kind
    for (i, point) in series.iter().enumerate() {
        let color = match point.kind {
            SeriesKind::Historical => HISTORICAL_COLOR,
            SeriesKind::Prediction => PREDICTION_COLOR,
        };
        ctx.set_fill_style(&color.into());
        let x = x_position(&area, i, series.len());
        let y = y_position(&area, point.value, domain);
        ctx.begin_path();
        let _ = ctx.arc(x, y, 3.0, 0.0, std::f64::consts::PI * 2.0);
        ctx.fill();
    }

    draw_x_labels(&ctx, &area, height, series.len(), |i| {
        series[i].date.format("%m/%d").to_string()
    });
}

/// Draw actual and predicted levels as two lines (prediction dashed)
fn draw_comparison_chart(canvas: &HtmlCanvasElement, points: &[ComparisonPoint]) {
    let Some(ctx) = context_of(canvas) else { return };

    let width = canvas.width() as f64;
    let height = canvas.height() as f64;
    let domain = comparison_domain(points);
    let area = draw_grid(&ctx, width, height, domain);

    if points.is_empty() {
        ctx.set_fill_style(&"#9ca3af".into());
        ctx.set_font("16px sans-serif");
        let _ = ctx.fill_text("No comparison data", width / 2.0 - 70.0, height / 2.0);
        return;
    }

    // Actual line, solid
    ctx.set_stroke_style(&ACTUAL_COLOR.into());
    ctx.set_line_width(2.0);
    ctx.begin_path();
    for (i, point) in points.iter().enumerate() {
        let x = x_position(&area, i, points.len());
        let y = y_position(&area, point.actual, domain);
        if i == 0 {
            ctx.move_to(x, y);
        } else {
            ctx.line_to(x, y);
        }
    }
    ctx.stroke();

    // Predicted line, dashed
    let dash = js_sys::Array::of2(&5.0.into(), &5.0.into());
    let _ = ctx.set_line_dash(&dash);
    ctx.set_stroke_style(&PREDICTION_COLOR.into());
    ctx.begin_path();
    for (i, point) in points.iter().enumerate() {
        let x = x_position(&area, i, points.len());
        let y = y_position(&area, point.predicted, domain);
        if i == 0 {
            ctx.move_to(x, y);
        } else {
            ctx.line_to(x, y);
        }
    }
    ctx.stroke();
    let _ = ctx.set_line_dash(&js_sys::Array::new());

    // Dots for both lines
    for (i, point) in points.iter().enumerate() {
        let x = x_position(&area, i, points.len());

        ctx.set_fill_style(&ACTUAL_COLOR.into());
        ctx.begin_path();
        let _ = ctx.arc(
            x,
            y_position(&area, point.actual, domain),
            3.0,
            0.0,
            std::f64::consts::PI * 2.0,
        );
        ctx.fill();

        ctx.set_fill_style(&PREDICTION_COLOR.into());
        ctx.begin_path();
        let _ = ctx.arc(
            x,
            y_position(&area, point.predicted, domain),
            3.0,
            0.0,
            std::f64::consts::PI * 2.0,
        );
        ctx.fill();
    }

    draw_x_labels(&ctx, &area, height, points.len(), |i| {
        points[i].date.format("%m/%d").to_string()
    });
}
