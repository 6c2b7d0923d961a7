//! Reshapes a snapshot into chart-ready rows and cross-section aggregates.
//!
//! Every function here is pure and borrows the snapshot immutably; rows are
//! rebuilt on each render and never cached.

use super::snapshot::{SectionSample, Sections};

/// Heap figures for one section, in bytes.
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryRow {
    pub name: String,
    pub memory: u64,
    pub total: u64,
}

impl MemoryRow {
    pub fn usage_percent(&self) -> f64 {
        ratio_percent(self.memory as f64, self.total as f64)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CpuRow {
    pub name: String,
    pub cpu: f64,
    pub idle_wakeups: u64,
}

/// Task duration in milliseconds.
#[derive(Debug, Clone, PartialEq)]
pub struct DurationRow {
    pub name: String,
    pub duration: f64,
}

/// Main-thread breakdown in milliseconds.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptRow {
    pub name: String,
    pub script: f64,
    pub layout: f64,
    pub style: f64,
}

/// The four per-section series the dashboard plots.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartSeries {
    pub memory: Vec<MemoryRow>,
    pub cpu: Vec<CpuRow>,
    pub duration: Vec<DurationRow>,
    pub script: Vec<ScriptRow>,
}

impl ChartSeries {
    pub fn from_sections(sections: &Sections) -> Self {
        let mut series = ChartSeries::default();

        for (key, sample) in sections.iter() {
            let name = section_label(key);

            series.memory.push(MemoryRow {
                name: name.clone(),
                memory: sample.js_heap_used_size,
                total: sample.js_heap_total_size,
            });
            series.cpu.push(CpuRow {
                name: name.clone(),
                cpu: sample.cpu_percent(),
                idle_wakeups: sample.idle_wakeups(),
            });
            series.duration.push(DurationRow {
                name: name.clone(),
                duration: seconds_to_ms(sample.task_duration),
            });
            series.script.push(ScriptRow {
                name,
                script: seconds_to_ms(sample.script_duration),
                layout: seconds_to_ms(sample.layout_duration),
                style: seconds_to_ms(sample.recalc_style_duration),
            });
        }

        series
    }

    pub fn len(&self) -> usize {
        self.memory.len()
    }

    pub fn is_empty(&self) -> bool {
        self.memory.is_empty()
    }
}

/// Cross-section summary statistics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aggregates {
    pub section_count: usize,
    /// Mean heap used, bytes.
    pub avg_memory: f64,
    /// Mean CPU percentage.
    pub avg_cpu: f64,
    /// Largest heap used, bytes.
    pub max_memory: u64,
    /// Largest heap total, bytes.
    pub max_total_memory: u64,
    /// Mean heap used relative to the largest heap total, percent.
    pub memory_utilization: f64,
}

impl Aggregates {
    /// `None` when there are no sections to average over.
    pub fn compute(series: &ChartSeries) -> Option<Self> {
        let count = series.memory.len();
        if count == 0 {
            return None;
        }

        let avg_memory = series
            .memory
            .iter()
            .map(|row| row.memory as f64)
            .sum::<f64>()
            / count as f64;
        let avg_cpu = if series.cpu.is_empty() {
            0.0
        } else {
            series.cpu.iter().map(|row| row.cpu).sum::<f64>() / series.cpu.len() as f64
        };
        let max_memory = series.memory.iter().map(|row| row.memory).max().unwrap_or(0);
        let max_total_memory = series.memory.iter().map(|row| row.total).max().unwrap_or(0);

        Some(Self {
            section_count: count,
            avg_memory,
            avg_cpu,
            max_memory,
            max_total_memory,
            memory_utilization: ratio_percent(avg_memory, max_total_memory as f64),
        })
    }
}

/// Startup-section figures shown on cards and in the system panel.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StartupFigures {
    pub app_startup_ms: f64,
    pub time_to_interactive_ms: f64,
    pub script_ms: f64,
    pub task_ms: f64,
    pub style_ms: f64,
    pub layout_ms: f64,
    pub cpu_percent: f64,
    pub idle_wakeups: u64,
    pub heap_used: u64,
    pub heap_total: u64,
}

impl StartupFigures {
    pub fn from_sample(sample: &SectionSample) -> Self {
        Self {
            app_startup_ms: sample.app_startup_time.unwrap_or(0.0),
            time_to_interactive_ms: sample.time_to_interactive.unwrap_or(0.0),
            script_ms: seconds_to_ms(sample.script_duration),
            task_ms: seconds_to_ms(sample.task_duration),
            style_ms: seconds_to_ms(sample.recalc_style_duration),
            layout_ms: seconds_to_ms(sample.layout_duration),
            cpu_percent: sample.cpu_percent(),
            idle_wakeups: sample.idle_wakeups(),
            heap_used: sample.js_heap_used_size,
            heap_total: sample.js_heap_total_size,
        }
    }

    pub fn heap_percent(&self) -> f64 {
        ratio_percent(self.heap_used as f64, self.heap_total as f64)
    }
}

/// `"app-startup"` → `"App Startup"`.
pub fn section_label(key: &str) -> String {
    key.split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn seconds_to_ms(seconds: f64) -> f64 {
    seconds * 1000.0
}

/// `numerator / denominator × 100`, or 0 when the denominator is zero or not finite.
pub fn ratio_percent(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 || !denominator.is_finite() {
        0.0
    } else {
        numerator / denominator * 100.0
    }
}

/// A row the chart view can plot by field name.
pub trait ChartDatum {
    fn text(&self, key: &str) -> Option<String>;
    fn value(&self, key: &str) -> Option<f64>;
}

/// One plotted category: axis label plus value.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
}

/// Project rows onto `(x_key, y_key)`. Unknown keys yield an empty label or NaN
/// and are drawn as-is.
pub fn plot_points<T: ChartDatum>(rows: &[T], x_key: &str, y_key: &str) -> Vec<ChartPoint> {
    rows.iter()
        .map(|row| ChartPoint {
            label: row.text(x_key).unwrap_or_default(),
            value: row.value(y_key).unwrap_or(f64::NAN),
        })
        .collect()
}

impl ChartDatum for MemoryRow {
    fn text(&self, key: &str) -> Option<String> {
        (key == "name").then(|| self.name.clone())
    }

    fn value(&self, key: &str) -> Option<f64> {
        match key {
            "memory" | "used" => Some(self.memory as f64),
            "total" => Some(self.total as f64),
            "percentage" => Some(self.usage_percent()),
            _ => None,
        }
    }
}

impl ChartDatum for CpuRow {
    fn text(&self, key: &str) -> Option<String> {
        (key == "name").then(|| self.name.clone())
    }

    fn value(&self, key: &str) -> Option<f64> {
        match key {
            "cpu" => Some(self.cpu),
            "wakeups" => Some(self.idle_wakeups as f64),
            _ => None,
        }
    }
}

impl ChartDatum for DurationRow {
    fn text(&self, key: &str) -> Option<String> {
        (key == "name").then(|| self.name.clone())
    }

    fn value(&self, key: &str) -> Option<f64> {
        (key == "duration").then_some(self.duration)
    }
}

impl ChartDatum for ScriptRow {
    fn text(&self, key: &str) -> Option<String> {
        (key == "name").then(|| self.name.clone())
    }

    fn value(&self, key: &str) -> Option<f64> {
        match key {
            "script" => Some(self.script),
            "layout" => Some(self.layout),
            "style" => Some(self.style),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::snapshot::CpuUsage;
    use crate::core::source::{EmbeddedSnapshot, SnapshotSource};

    fn sample(used: u64, total: u64, cpu: f64) -> SectionSample {
        SectionSample {
            js_heap_used_size: used,
            js_heap_total_size: total,
            cpu_usage: Some(CpuUsage {
                percent_cpu_usage: cpu,
                idle_wakeups_per_second: 5,
            }),
            ..SectionSample::default()
        }
    }

    #[test]
    fn labels_are_title_cased() {
        assert_eq!(section_label("app-startup"), "App Startup");
        assert_eq!(section_label("heavy-operation"), "Heavy Operation");
        assert_eq!(section_label("ipc-communication"), "Ipc Communication");
        assert_eq!(section_label("large"), "Large");
    }

    #[test]
    fn label_derivation_is_idempotent() {
        let once = section_label("navigation-performance");
        assert_eq!(section_label(&once), once);
    }

    #[test]
    fn one_row_per_section_in_order() {
        let snapshot = EmbeddedSnapshot.load().unwrap();
        let series = ChartSeries::from_sections(&snapshot.metrics);

        let expected: Vec<String> = snapshot.metrics.names().map(section_label).collect();
        assert_eq!(series.len(), 8);
        for names in [
            series.memory.iter().map(|r| r.name.clone()).collect::<Vec<_>>(),
            series.cpu.iter().map(|r| r.name.clone()).collect(),
            series.duration.iter().map(|r| r.name.clone()).collect(),
            series.script.iter().map(|r| r.name.clone()).collect(),
        ] {
            assert_eq!(names, expected);
        }
        assert_eq!(series.memory[0].name, "App Startup");
    }

    #[test]
    fn durations_convert_to_milliseconds() {
        let sections: Sections = [(
            "sample-view",
            SectionSample {
                script_duration: 0.011,
                task_duration: 0.005,
                ..SectionSample::default()
            },
        )]
        .into_iter()
        .collect();

        let series = ChartSeries::from_sections(&sections);
        assert!((series.script[0].script - 11.0).abs() < 1e-9);
        assert!((series.duration[0].duration - 5.0).abs() < 1e-9);
    }

    #[test]
    fn bytes_and_percentages_pass_through() {
        let sections: Sections = [("sample-view", sample(1_914_820, 3_047_424, 42.5))]
            .into_iter()
            .collect();
        let series = ChartSeries::from_sections(&sections);
        assert_eq!(series.memory[0].memory, 1_914_820);
        assert_eq!(series.memory[0].total, 3_047_424);
        assert_eq!(series.cpu[0].cpu, 42.5);
    }

    #[test]
    fn aggregates_over_sample_snapshot() {
        let snapshot = EmbeddedSnapshot.load().unwrap();
        let series = ChartSeries::from_sections(&snapshot.metrics);
        let stats = Aggregates::compute(&series).unwrap();

        let used: Vec<u64> = snapshot
            .metrics
            .iter()
            .map(|(_, s)| s.js_heap_used_size)
            .collect();
        let mean = used.iter().sum::<u64>() as f64 / used.len() as f64;

        assert_eq!(stats.section_count, 8);
        assert!((stats.avg_memory - mean).abs() < 1e-6);
        assert_eq!(stats.avg_cpu, 15.0);
        assert_eq!(stats.max_memory, 27_180_316);
        assert_eq!(stats.max_total_memory, 43_220_992);
        assert!((stats.memory_utilization - mean / 43_220_992.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn aggregates_guard_empty_sections() {
        let series = ChartSeries::from_sections(&Sections::new());
        assert!(series.is_empty());
        assert!(Aggregates::compute(&series).is_none());
    }

    #[test]
    fn startup_heap_ratio() {
        let figures = StartupFigures::from_sample(&sample(1_914_820, 3_047_424, 15.0));
        assert!((figures.heap_percent() - 62.83).abs() < 0.01);
    }

    #[test]
    fn zero_denominator_yields_zero() {
        assert_eq!(ratio_percent(10.0, 0.0), 0.0);
        assert_eq!(ratio_percent(10.0, f64::NAN), 0.0);
        let row = MemoryRow {
            name: "Empty".into(),
            memory: 5,
            total: 0,
        };
        assert_eq!(row.usage_percent(), 0.0);
    }

    #[test]
    fn plot_points_by_key() {
        let rows = vec![
            ScriptRow {
                name: "A".into(),
                script: 1.0,
                layout: 2.0,
                style: 3.0,
            },
            ScriptRow {
                name: "B".into(),
                script: 4.0,
                layout: 5.0,
                style: 6.0,
            },
        ];

        let points = plot_points(&rows, "name", "layout");
        assert_eq!(points[0].label, "A");
        assert_eq!(points[1].value, 5.0);

        let unknown = plot_points(&rows, "name", "missing");
        assert!(unknown.iter().all(|p| p.value.is_nan()));
    }
}
