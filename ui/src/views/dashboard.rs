use dioxus::prelude::*;

use crate::components::{DashboardHeader, DashboardLayout, PlatformInfo};
use crate::core::quality::{self, DataIssue, QualityReport};
use crate::core::settings::use_settings;
use crate::core::snapshot::Snapshot;
use crate::core::source::SnapshotProvider;
use crate::core::timing;
use crate::core::transform::{ChartSeries, StartupFigures};
use crate::hooks::use_language;
use crate::t;
use crate::views::performance::PerformanceMetrics;

#[derive(Debug, Clone, PartialEq)]
enum LoadState {
    Loading,
    Ready {
        snapshot: Snapshot,
        report: QualityReport,
    },
    Failed(String),
}

/// Full dashboard page: spinner, then header, tabs and system panel for the
/// snapshot `source` yields.
#[component]
pub fn Dashboard(source: SnapshotProvider) -> Element {
    let settings = use_settings();
    let mut state = use_signal(|| LoadState::Loading);

    let loader = use_hook(move || {
        let delay = settings.loading_delay_ms;
        spawn(async move {
            timing::sleep_ms(delay).await;

            let started = timing::now_ms();
            let next = load_snapshot(&source);
            tracing::debug!(elapsed_ms = timing::now_ms() - started, "snapshot parse");
            state.set(next);
        })
    });

    use_drop(move || loader.cancel());

    let body = match state() {
        LoadState::Loading => rsx! {
            div { class: "loading",
                div { class: "loading__spinner", aria_hidden: "true" }
                p { class: "loading__label", {t!("loading-metrics")} }
            }
        },
        LoadState::Failed(error) => rsx! {
            div { class: "load-error", role: "alert",
                p { {t!("load-failed", error = error)} }
            }
        },
        LoadState::Ready { snapshot, report } => {
            let series = ChartSeries::from_sections(&snapshot.metrics);
            let startup = snapshot
                .startup()
                .map(StartupFigures::from_sample)
                .unwrap_or_default();
            let checks = if report.is_clean() {
                t!("quality-clean")
            } else {
                t!("quality-issues", count = report.issues.len())
            };
            let checks_detail = report
                .issues
                .iter()
                .map(issue_label)
                .collect::<Vec<_>>()
                .join("; ");

            rsx! {
                DashboardHeader {
                    timestamp: snapshot.timestamp.clone(),
                    platform: snapshot.platform.clone(),
                    arch: snapshot.arch.clone(),
                }

                div { class: "dashboard-grid",
                    div { class: "dashboard-grid__main",
                        PerformanceMetrics { series, startup }
                    }
                    div { class: "dashboard-grid__side",
                        PlatformInfo {
                            platform: snapshot.platform.clone(),
                            arch: snapshot.arch.clone(),
                            startup,
                        }
                    }
                }

                p {
                    class: if report.is_clean() { "data-checks" } else { "data-checks data-checks--warn" },
                    title: "{checks_detail}",
                    "{checks}"
                }
            }
        }
    };

    rsx! {
        DashboardLayout { {body} }
    }
}

/// [`Dashboard`] remounted from scratch whenever the language in context changes,
/// so every `t!` lookup below it runs again.
#[component]
pub fn LocalizedDashboard(source: SnapshotProvider) -> Element {
    let lang = use_language();

    // Keys only take effect between siblings, so the page is a one-item keyed list.
    rsx! {
        for tag in std::iter::once(lang) {
            div { key: "{tag}", class: "dashboard-locale",
                Dashboard { source: source.clone() }
            }
        }
    }
}

fn load_snapshot(source: &SnapshotProvider) -> LoadState {
    let origin = source.describe();
    match source.load() {
        Ok(snapshot) => {
            tracing::info!(
                %origin,
                sections = snapshot.metrics.len(),
                platform = %snapshot.platform,
                "snapshot loaded"
            );
            let report = quality::inspect(&snapshot);
            report.log();
            LoadState::Ready { snapshot, report }
        }
        Err(err) => {
            tracing::warn!(%origin, error = %err, "snapshot load failed");
            LoadState::Failed(err.to_string())
        }
    }
}

fn issue_label(issue: &DataIssue) -> String {
    match issue {
        DataIssue::NoSections => t!("issue-no-sections"),
        DataIssue::MissingStartup => t!("issue-missing-startup"),
        DataIssue::BadTimestamp { raw } => t!("issue-bad-timestamp", raw = raw.clone()),
        DataIssue::MissingCpuUsage { section } => {
            t!("issue-missing-cpu", section = section.clone())
        }
        DataIssue::CpuOutOfRange { section, value } => {
            t!("issue-cpu-range", section = section.clone(), value = (*value))
        }
        DataIssue::ZeroHeapTotal { section } => t!("issue-zero-heap", section = section.clone()),
        DataIssue::HeapUsedExceedsTotal {
            section,
            used,
            total,
        } => t!(
            "issue-heap-exceeds",
            section = section.clone(),
            used = (*used),
            total = (*total)
        ),
        DataIssue::NegativeDuration {
            section,
            field,
            value,
        } => t!(
            "issue-negative-duration",
            section = section.clone(),
            field = field.to_string(),
            value = (*value)
        ),
        DataIssue::UnreadableField {
            section: Some(section),
            field,
        } => t!(
            "issue-unreadable-field",
            section = section.clone(),
            field = field.to_string()
        ),
        DataIssue::UnreadableField {
            section: None,
            field,
        } => t!("issue-unreadable-header", field = field.to_string()),
        DataIssue::MalformedSection { section } => {
            t!("issue-malformed-section", section = section.clone())
        }
    }
}
