//! End-to-end checks over the bundled capture: load, validate, reshape, format.

use ui::core::format::{format_bytes, format_capture_time};
use ui::core::quality;
use ui::core::source::{JsonSnapshot, SnapshotError, SnapshotProvider};
use ui::core::transform::{plot_points, Aggregates, ChartSeries, StartupFigures};

const SECTION_ORDER: [&str; 8] = [
    "App Startup",
    "Dashboard View",
    "Navigation Performance",
    "Heavy Operation",
    "Ipc Communication",
    "Memory Usage",
    "Window Management",
    "Large Content",
];

#[test]
fn embedded_capture_loads_cleanly() {
    let snapshot = SnapshotProvider::embedded()
        .load()
        .expect("embedded snapshot parses");

    assert_eq!(snapshot.platform, "darwin");
    assert_eq!(snapshot.arch, "arm64");
    assert_eq!(snapshot.metrics.len(), 8);

    let report = quality::inspect(&snapshot);
    assert!(report.is_clean(), "{}", report.summary());
    assert_eq!(
        format_capture_time(&snapshot.timestamp).as_deref(),
        Some("March 5, 2025 at 12:12 AM")
    );
}

#[test]
fn series_follow_document_order() {
    let snapshot = SnapshotProvider::embedded().load().unwrap();
    let series = ChartSeries::from_sections(&snapshot.metrics);

    let names: Vec<&str> = series.memory.iter().map(|row| row.name.as_str()).collect();
    assert_eq!(names, SECTION_ORDER);
    assert_eq!(series.cpu.len(), 8);
    assert_eq!(series.duration.len(), 8);
    assert_eq!(series.script.len(), 8);

    let labels: Vec<String> = plot_points(&series.cpu, "name", "cpu")
        .into_iter()
        .map(|p| p.label)
        .collect();
    assert_eq!(labels, SECTION_ORDER);
}

#[test]
fn aggregates_match_sample() {
    let snapshot = SnapshotProvider::embedded().load().unwrap();
    let series = ChartSeries::from_sections(&snapshot.metrics);
    let agg = Aggregates::compute(&series).unwrap();

    assert_eq!(agg.section_count, 8);
    assert!((agg.avg_memory - 17_239_551.5).abs() < 1e-6);
    assert!((agg.avg_cpu - 15.0).abs() < 1e-9);
    assert_eq!(agg.max_memory, 27_180_316);
    assert_eq!(agg.max_total_memory, 43_220_992);
    assert!((agg.memory_utilization - 39.887).abs() < 1e-3);
}

#[test]
fn startup_panel_figures() {
    let snapshot = SnapshotProvider::embedded().load().unwrap();
    let startup = StartupFigures::from_sample(snapshot.startup().unwrap());

    assert_eq!(startup.app_startup_ms, 284.0);
    assert_eq!(startup.time_to_interactive_ms, 284.0);
    assert_eq!(startup.idle_wakeups, 5);
    assert!((startup.heap_percent() - 62.83).abs() < 0.01);
    assert_eq!(format_bytes(startup.heap_used, 2), "1.83 MB");
    assert_eq!(format_bytes(startup.heap_total, 2), "2.91 MB");
}

#[test]
fn malformed_capture_reports_parse_error() {
    let provider = SnapshotProvider::new(JsonSnapshot::new("fixture", "{\"metrics\": ["));
    match provider.load() {
        Err(SnapshotError::Parse { origin, .. }) => assert_eq!(origin, "fixture"),
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn sparse_capture_degrades_to_zeros() {
    let raw = r#"{
        "timestamp": "not a date",
        "metrics": { "idle-loop": { "jsHeapUsedSize": 10 } }
    }"#;
    let snapshot = SnapshotProvider::new(JsonSnapshot::new("sparse", raw))
        .load()
        .unwrap();
    let series = ChartSeries::from_sections(&snapshot.metrics);

    assert_eq!(series.memory[0].name, "Idle Loop");
    assert_eq!(series.memory[0].usage_percent(), 0.0);
    assert_eq!(series.cpu[0].cpu, 0.0);
    assert!(snapshot.startup().is_none());

    let report = quality::inspect(&snapshot);
    assert!(!report.is_clean());
    assert!(report.summary().contains("not a date"));
}

#[test]
fn mistyped_fields_still_render() {
    let raw = r#"{
        "timestamp": "2025-03-05T00:12:16.599Z",
        "platform": null,
        "arch": "arm64",
        "metrics": {
            "app-startup": {
                "jsHeapUsedSize": 1914820.0,
                "jsHeapTotalSize": 3047424,
                "taskDuration": null,
                "cpuUsage": { "percentCPUUsage": 15, "idleWakeupsPerSecond": 5 }
            }
        }
    }"#;
    let snapshot = SnapshotProvider::new(JsonSnapshot::new("mistyped", raw))
        .load()
        .expect("shape problems degrade instead of failing the load");

    assert_eq!(snapshot.platform, "");
    let startup = StartupFigures::from_sample(snapshot.startup().unwrap());
    assert_eq!(format_bytes(startup.heap_used, 2), "1.83 MB");
    assert_eq!(startup.task_ms, 0.0);

    let series = ChartSeries::from_sections(&snapshot.metrics);
    assert!(Aggregates::compute(&series).is_some());

    let report = quality::inspect(&snapshot);
    assert_eq!(report.issues.len(), 2, "{}", report.summary());
    assert!(report.summary().contains("platform"));
    assert!(report.summary().contains("taskDuration"));
}
