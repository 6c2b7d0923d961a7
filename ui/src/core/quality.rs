//! Data checks run once when a snapshot is ingested. These flags help interpret a
//! capture; they never stop it from rendering.

use std::fmt;

use time::{format_description::well_known::Rfc3339, OffsetDateTime};

use super::snapshot::{Snapshot, SECTION_BODY, STARTUP_SECTION};

#[derive(Debug, Clone, PartialEq)]
pub enum DataIssue {
    NoSections,
    MissingStartup,
    BadTimestamp {
        raw: String,
    },
    MissingCpuUsage {
        section: String,
    },
    CpuOutOfRange {
        section: String,
        value: f64,
    },
    ZeroHeapTotal {
        section: String,
    },
    HeapUsedExceedsTotal {
        section: String,
        used: u64,
        total: u64,
    },
    NegativeDuration {
        section: String,
        field: &'static str,
        value: f64,
    },
    /// A field held the wrong JSON type and was read as zero or empty.
    /// `section` is `None` for top-level fields.
    UnreadableField {
        section: Option<String>,
        field: &'static str,
    },
    /// The section value is not an object; every figure reads as zero.
    MalformedSection {
        section: String,
    },
}

impl fmt::Display for DataIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataIssue::NoSections => f.write_str("no instrumentation sections"),
            DataIssue::MissingStartup => write!(f, "missing `{STARTUP_SECTION}` section"),
            DataIssue::BadTimestamp { raw } => write!(f, "unparseable timestamp `{raw}`"),
            DataIssue::MissingCpuUsage { section } => {
                write!(f, "{section}: no cpuUsage block (read as 0%)")
            }
            DataIssue::CpuOutOfRange { section, value } => {
                write!(f, "{section}: CPU usage {value}% outside 0–100")
            }
            DataIssue::ZeroHeapTotal { section } => write!(f, "{section}: heap total is 0"),
            DataIssue::HeapUsedExceedsTotal {
                section,
                used,
                total,
            } => write!(f, "{section}: heap used {used} exceeds total {total}"),
            DataIssue::NegativeDuration {
                section,
                field,
                value,
            } => write!(f, "{section}: {field} is negative ({value})"),
            DataIssue::UnreadableField {
                section: Some(section),
                field,
            } => write!(f, "{section}: unreadable `{field}` (read as 0)"),
            DataIssue::UnreadableField {
                section: None,
                field,
            } => write!(f, "unreadable `{field}` (read as empty)"),
            DataIssue::MalformedSection { section } => {
                write!(f, "{section}: not an object (read as 0)")
            }
        }
    }
}

/// Outcome of [`inspect`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QualityReport {
    pub issues: Vec<DataIssue>,
}

impl QualityReport {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// One-line English summary for logs and test output. The page renders its own
    /// localized wording per issue.
    pub fn summary(&self) -> String {
        if self.issues.is_empty() {
            "Data checks: clean snapshot".to_string()
        } else {
            let parts: Vec<String> = self.issues.iter().map(ToString::to_string).collect();
            format!("Data checks: {}", parts.join("; "))
        }
    }

    pub fn log(&self) {
        for issue in &self.issues {
            tracing::warn!(%issue, "snapshot data check");
        }
    }
}

pub fn inspect(snapshot: &Snapshot) -> QualityReport {
    let mut issues: Vec<DataIssue> = snapshot
        .unreadable
        .iter()
        .map(|&field| DataIssue::UnreadableField {
            section: None,
            field,
        })
        .collect();

    if OffsetDateTime::parse(&snapshot.timestamp, &Rfc3339).is_err() {
        issues.push(DataIssue::BadTimestamp {
            raw: snapshot.timestamp.clone(),
        });
    }

    if snapshot.metrics.is_empty() {
        issues.push(DataIssue::NoSections);
        return QualityReport { issues };
    }

    if snapshot.startup().is_none() {
        issues.push(DataIssue::MissingStartup);
    }

    for (name, sample) in snapshot.metrics.iter() {
        if sample.unreadable.contains(&SECTION_BODY) {
            issues.push(DataIssue::MalformedSection {
                section: name.to_string(),
            });
            continue;
        }
        issues.extend(
            sample
                .unreadable
                .iter()
                .map(|&field| DataIssue::UnreadableField {
                    section: Some(name.to_string()),
                    field,
                }),
        );

        match &sample.cpu_usage {
            None => issues.push(DataIssue::MissingCpuUsage {
                section: name.to_string(),
            }),
            Some(cpu) if !(0.0..=100.0).contains(&cpu.percent_cpu_usage) => {
                issues.push(DataIssue::CpuOutOfRange {
                    section: name.to_string(),
                    value: cpu.percent_cpu_usage,
                })
            }
            Some(_) => {}
        }

        if sample.js_heap_total_size == 0 {
            issues.push(DataIssue::ZeroHeapTotal {
                section: name.to_string(),
            });
        } else if sample.js_heap_used_size > sample.js_heap_total_size {
            issues.push(DataIssue::HeapUsedExceedsTotal {
                section: name.to_string(),
                used: sample.js_heap_used_size,
                total: sample.js_heap_total_size,
            });
        }

        let durations = [
            ("layoutDuration", sample.layout_duration),
            ("recalcStyleDuration", sample.recalc_style_duration),
            ("scriptDuration", sample.script_duration),
            ("taskDuration", sample.task_duration),
        ];
        for (field, value) in durations {
            if value < 0.0 {
                issues.push(DataIssue::NegativeDuration {
                    section: name.to_string(),
                    field,
                    value,
                });
            }
        }
    }

    QualityReport { issues }
}
