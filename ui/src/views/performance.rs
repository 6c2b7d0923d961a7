use dioxus::prelude::*;

use crate::charts::{ChartKind, MetricChart};
use crate::components::{CardGauge, MetricCard, TabList};
use crate::core::settings::{use_settings, DashboardSettings};
use crate::core::transform::{plot_points, Aggregates, ChartSeries, StartupFigures};
use crate::t;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricsTab {
    Overview,
    Memory,
    Performance,
}

impl MetricsTab {
    pub const ALL: [MetricsTab; 3] = [
        MetricsTab::Overview,
        MetricsTab::Memory,
        MetricsTab::Performance,
    ];

    pub fn from_index(idx: usize) -> Self {
        Self::ALL.get(idx).copied().unwrap_or(MetricsTab::Overview)
    }

    fn label(self) -> String {
        match self {
            MetricsTab::Overview => t!("tab-overview"),
            MetricsTab::Memory => t!("tab-memory"),
            MetricsTab::Performance => t!("tab-performance"),
        }
    }
}

/// Tabbed cards and charts over every section of the snapshot.
#[component]
pub fn PerformanceMetrics(series: ChartSeries, startup: StartupFigures) -> Element {
    let settings = use_settings();
    let active = use_signal(|| 0usize);

    let Some(aggregates) = Aggregates::compute(&series) else {
        return rsx! {
            p { class: "metrics-empty", {t!("metrics-empty")} }
        };
    };

    let labels: Vec<String> = MetricsTab::ALL.iter().map(|tab| tab.label()).collect();
    let tab = MetricsTab::from_index(active());

    // Inactive tabs are unmounted so their reveal and count-up replay on return.
    let content = match tab {
        MetricsTab::Overview => overview_tab(&settings, &series, &startup, &aggregates),
        MetricsTab::Memory => memory_tab(&settings, &series, &aggregates),
        MetricsTab::Performance => performance_tab(&settings, &series, &startup),
    };

    let panel_key = format!("{tab:?}");

    rsx! {
        div { class: "metrics",
            div { class: "metrics__tabs",
                TabList { labels, active }
            }
            div { key: "{panel_key}", class: "metrics__panel", role: "tabpanel", {content} }
        }
    }
}

fn overview_tab(
    settings: &DashboardSettings,
    series: &ChartSeries,
    startup: &StartupFigures,
    aggregates: &Aggregates,
) -> Element {
    let bytes = t!("unit-bytes");
    let ms = t!("unit-ms");
    let memory_gauge = CardGauge::Usage {
        max: aggregates.max_total_memory as f64,
    };

    rsx! {
        div { class: "card-grid",
            MetricCard {
                title: t!("card-avg-memory"),
                value: aggregates.avg_memory,
                unit: bytes,
                gauge: memory_gauge,
                icon: "◔",
                delay_ms: settings.card_delay(0),
            }
            MetricCard {
                title: t!("card-startup-time"),
                value: startup.app_startup_ms,
                unit: ms.clone(),
                icon: "↯",
                delay_ms: settings.card_delay(1),
            }
            MetricCard {
                title: t!("card-time-to-interactive"),
                value: startup.time_to_interactive_ms,
                unit: ms,
                icon: "◷",
                delay_ms: settings.card_delay(2),
            }
            MetricCard {
                title: t!("card-avg-cpu"),
                value: aggregates.avg_cpu,
                unit: "%",
                gauge: CardGauge::Progress(aggregates.avg_cpu),
                icon: "◈",
                delay_ms: settings.card_delay(3),
            }
        }

        div { class: "chart-grid chart-grid--pair",
            MetricChart {
                title: t!("chart-memory-sections"),
                points: plot_points(&series.memory, "name", "memory"),
                kind: ChartKind::Bar,
                unit: t!("unit-bytes"),
                color: settings.chart_color.clone(),
                height: settings.chart_height,
                delay_ms: settings.chart_delay(0),
            }
            MetricChart {
                title: t!("chart-cpu-sections"),
                points: plot_points(&series.cpu, "name", "cpu"),
                kind: ChartKind::Line,
                unit: "%",
                color: settings.chart_color.clone(),
                height: settings.chart_height,
                delay_ms: settings.chart_delay(1),
            }
        }
    }
}

fn memory_tab(
    settings: &DashboardSettings,
    series: &ChartSeries,
    aggregates: &Aggregates,
) -> Element {
    let bytes = t!("unit-bytes");
    let memory_gauge = CardGauge::Usage {
        max: aggregates.max_total_memory as f64,
    };

    rsx! {
        div { class: "card-grid",
            MetricCard {
                title: t!("card-heap-used"),
                value: aggregates.avg_memory,
                unit: bytes.clone(),
                gauge: memory_gauge,
                icon: "◔",
                delay_ms: settings.card_delay(0),
            }
            MetricCard {
                title: t!("card-max-heap"),
                value: aggregates.max_memory as f64,
                unit: bytes.clone(),
                icon: "▣",
                delay_ms: settings.card_delay(1),
            }
            MetricCard {
                title: t!("card-total-heap"),
                value: aggregates.max_total_memory as f64,
                unit: bytes,
                icon: "◍",
                delay_ms: settings.card_delay(2),
            }
            MetricCard {
                title: t!("card-memory-utilization"),
                value: aggregates.memory_utilization,
                unit: "%",
                gauge: CardGauge::Progress(aggregates.memory_utilization),
                icon: "↯",
                delay_ms: settings.card_delay(3),
            }
        }

        div { class: "chart-grid",
            MetricChart {
                title: t!("chart-memory-vs-total"),
                points: plot_points(&series.memory, "name", "used"),
                kind: ChartKind::Bar,
                unit: t!("unit-bytes"),
                color: settings.chart_color.clone(),
                height: settings.tall_chart_height,
                delay_ms: settings.chart_delay(0),
            }
        }
    }
}

fn performance_tab(
    settings: &DashboardSettings,
    series: &ChartSeries,
    startup: &StartupFigures,
) -> Element {
    let ms = t!("unit-ms");

    rsx! {
        div { class: "card-grid",
            MetricCard {
                title: t!("card-script-duration"),
                value: startup.script_ms,
                unit: ms.clone(),
                icon: "▤",
                delay_ms: settings.card_delay(0),
            }
            MetricCard {
                title: t!("card-task-duration"),
                value: startup.task_ms,
                unit: ms.clone(),
                icon: "↯",
                delay_ms: settings.card_delay(1),
            }
            MetricCard {
                title: t!("card-style-recalc"),
                value: startup.style_ms,
                unit: ms.clone(),
                icon: "◍",
                delay_ms: settings.card_delay(2),
            }
            MetricCard {
                title: t!("card-layout-duration"),
                value: startup.layout_ms,
                unit: ms,
                icon: "◷",
                delay_ms: settings.card_delay(3),
            }
        }

        div { class: "chart-grid chart-grid--pair",
            MetricChart {
                title: t!("chart-task-duration"),
                points: plot_points(&series.duration, "name", "duration"),
                kind: ChartKind::Area,
                unit: t!("unit-ms"),
                color: settings.chart_color.clone(),
                height: settings.chart_height,
                delay_ms: settings.chart_delay(0),
            }
            MetricChart {
                title: t!("chart-script-breakdown"),
                points: plot_points(&series.script, "name", "script"),
                kind: ChartKind::Bar,
                unit: t!("unit-ms"),
                color: settings.chart_color.clone(),
                height: settings.chart_height,
                delay_ms: settings.chart_delay(1),
            }
        }
    }
}
