//! Inline SVG charts for per-section series.

pub mod geometry;

use std::sync::atomic::{AtomicUsize, Ordering};

use dioxus::prelude::*;

use crate::core::format;
use crate::core::transform::ChartPoint;
use crate::hooks::use_reveal;
use crate::t;

use geometry::{
    area_path, band_centers, bar_rects, finite_or_zero, monotone_path, nice_ticks, point_xs, Frame,
    ValueScale, VIEW_WIDTH,
};

static NEXT_GRADIENT_ID: AtomicUsize = AtomicUsize::new(0);

const TICK_COUNT: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChartKind {
    #[default]
    Area,
    Bar,
    Line,
}

impl ChartKind {
    fn css_modifier(self) -> &'static str {
        match self {
            ChartKind::Area => "metric-chart--area",
            ChartKind::Bar => "metric-chart--bar",
            ChartKind::Line => "metric-chart--line",
        }
    }
}

/// A titled chart card. Values are drawn as given: a missing or non-finite value
/// shows up as a zero-height mark, and the tooltip echoes the raw number.
#[component]
pub fn MetricChart(
    #[props(into)] title: String,
    points: Vec<ChartPoint>,
    #[props(default)] kind: ChartKind,
    #[props(into, default)] unit: String,
    #[props(into, default = "var(--color-primary)".to_string())] color: String,
    #[props(default = 300.0)] height: f64,
    #[props(default = true)] show_grid: bool,
    #[props(default = true)] animated: bool,
    #[props(default)] delay_ms: u64,
) -> Element {
    let visible = use_reveal(if animated { delay_ms } else { 0 });
    let mut hovered = use_signal(|| Option::<usize>::None);
    let gradient_id = use_hook(|| {
        format!(
            "metric-chart-gradient-{}",
            NEXT_GRADIENT_ID.fetch_add(1, Ordering::Relaxed)
        )
    });

    let frame = Frame::new(VIEW_WIDTH, height);
    let values: Vec<f64> = points.iter().map(|p| finite_or_zero(p.value)).collect();
    let max_value = values.iter().copied().fold(0.0, f64::max);
    let ticks = nice_ticks(max_value, TICK_COUNT);
    let scale = ValueScale::from_ticks(&ticks);

    let n = points.len();
    let xs = match kind {
        ChartKind::Bar => band_centers(&frame, n),
        ChartKind::Area | ChartKind::Line => point_xs(&frame, n),
    };
    let coords: Vec<(f64, f64)> = xs
        .iter()
        .zip(&values)
        .map(|(x, value)| (*x, scale.y(&frame, *value)))
        .collect();
    let band = if n > 0 { frame.plot_width() / n as f64 } else { 0.0 };

    let tick_marks: Vec<(f64, String)> = ticks
        .iter()
        .map(|tick| (scale.y(&frame, *tick), format::format_number(*tick)))
        .collect();
    let categories: Vec<(f64, Vec<String>)> = xs
        .iter()
        .zip(&points)
        .map(|(x, point)| {
            let words = point.label.split_whitespace().map(String::from).collect();
            (*x, words)
        })
        .collect();

    let active = hovered().filter(|idx| *idx < n);
    let series = match kind {
        ChartKind::Area => render_area(&coords, frame.bottom(), &color, &gradient_id, active),
        ChartKind::Bar => render_bars(&frame, &scale, &values, &color, active),
        ChartKind::Line => render_line(&coords, &color, active),
    };

    let tooltip = active.map(|idx| {
        let (x, y) = coords[idx];
        let style = format!(
            "left: {:.1}%; top: {:.1}%;",
            x / VIEW_WIDTH * 100.0,
            y / height * 100.0
        );
        let value = format::format_number(points[idx].value);
        (style, points[idx].label.clone(), format!("{value} {unit}"))
    });

    let state_class = if visible() {
        "metric-chart--visible"
    } else {
        "metric-chart--hidden"
    };
    let chart_class = format!("metric-chart {} {state_class}", kind.css_modifier());
    let view_box = format!("0 0 {VIEW_WIDTH} {height}");
    let frame_style = format!("height: {height}px;");

    rsx! {
        section { class: "{chart_class}",
            div { class: "metric-chart__header",
                h3 { class: "metric-chart__title", "{title}" }
            }

            if points.is_empty() {
                p { class: "metric-chart__placeholder", {t!("chart-empty")} }
            } else {
                div { class: "metric-chart__frame", style: "{frame_style}",
                    svg {
                        class: "metric-chart__svg",
                        view_box: "{view_box}",
                        preserve_aspect_ratio: "none",
                        "role": "img",
                        "aria-label": "{title}",
                        onmouseleave: move |_| hovered.set(None),

                        if show_grid {
                            for (i, (y, _)) in tick_marks.iter().enumerate() {
                                line {
                                    key: "grid-{i}",
                                    class: "metric-chart__grid",
                                    x1: frame.left(),
                                    x2: frame.right(),
                                    y1: *y,
                                    y2: *y,
                                    stroke_dasharray: "3 3",
                                }
                            }
                        }

                        for (i, (y, label)) in tick_marks.iter().enumerate() {
                            text {
                                key: "tick-{i}",
                                class: "metric-chart__tick",
                                x: frame.left() - 10.0,
                                y: *y,
                                text_anchor: "end",
                                dominant_baseline: "middle",
                                "{label}"
                            }
                        }

                        for (i, (x, words)) in categories.iter().enumerate() {
                            text {
                                key: "cat-{i}",
                                class: "metric-chart__category",
                                x: *x,
                                y: frame.bottom() + 18.0,
                                text_anchor: "middle",
                                for (j, word) in words.iter().enumerate() {
                                    tspan {
                                        key: "{j}",
                                        x: *x,
                                        dy: if j == 0 { "0" } else { "1.2em" },
                                        "{word}"
                                    }
                                }
                            }
                        }

                        {series}

                        for (i, x) in xs.iter().enumerate() {
                            rect {
                                key: "hit-{i}",
                                class: "metric-chart__hit",
                                x: *x - band / 2.0,
                                y: frame.top(),
                                width: band,
                                height: frame.plot_height(),
                                fill: "transparent",
                                onmouseenter: move |_| hovered.set(Some(i)),
                            }
                        }
                    }

                    if let Some((style, label, value)) = tooltip {
                        div { class: "metric-chart__tooltip", style: "{style}",
                            p { class: "metric-chart__tooltip-label", "{label}" }
                            p { class: "metric-chart__tooltip-value", "{value}" }
                        }
                    }
                }
            }
        }
    }
}

fn render_area(
    coords: &[(f64, f64)],
    baseline: f64,
    color: &str,
    gradient_id: &str,
    active: Option<usize>,
) -> Element {
    let area = area_path(coords, baseline);
    let line = monotone_path(coords);
    let fill = format!("url(#{gradient_id})");
    let active_dot = active.map(|idx| coords[idx]);

    rsx! {
        defs {
            linearGradient { id: "{gradient_id}", x1: "0", y1: "0", x2: "0", y2: "1",
                stop { offset: "5%", stop_color: "{color}", stop_opacity: "0.3" }
                stop { offset: "95%", stop_color: "{color}", stop_opacity: "0" }
            }
        }
        path { class: "metric-chart__area", d: "{area}", fill: "{fill}" }
        path {
            class: "metric-chart__line",
            d: "{line}",
            fill: "none",
            stroke: "{color}",
            stroke_width: "2",
        }
        if let Some((cx, cy)) = active_dot {
            circle {
                class: "metric-chart__dot metric-chart__dot--active",
                cx: cx,
                cy: cy,
                r: "6",
                stroke: "{color}",
            }
        }
    }
}

fn render_bars(
    frame: &Frame,
    scale: &ValueScale,
    values: &[f64],
    color: &str,
    active: Option<usize>,
) -> Element {
    let bars = bar_rects(frame, scale, values);

    rsx! {
        for (i, bar) in bars.into_iter().enumerate() {
            rect {
                key: "bar-{i}",
                class: if active == Some(i) { "metric-chart__bar metric-chart__bar--active" } else { "metric-chart__bar" },
                x: bar.x,
                y: bar.y,
                width: bar.width,
                height: bar.height,
                rx: "4",
                fill: "{color}",
            }
        }
    }
}

fn render_line(coords: &[(f64, f64)], color: &str, active: Option<usize>) -> Element {
    let line = monotone_path(coords);

    rsx! {
        path {
            class: "metric-chart__line",
            d: "{line}",
            fill: "none",
            stroke: "{color}",
            stroke_width: "2",
        }
        for (i, (cx, cy)) in coords.iter().copied().enumerate() {
            circle {
                key: "dot-{i}",
                class: "metric-chart__dot",
                cx: cx,
                cy: cy,
                r: if active == Some(i) { "6" } else { "4" },
                stroke: "{color}",
            }
        }
    }
}
