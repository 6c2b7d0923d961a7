//! Snapshot model for captured performance metrics.
//!
//! A snapshot is produced upstream by an instrumentation harness and is treated
//! as read-only here. Section order is significant: every derived series follows
//! the order in which sections appear in the source document.
//!
//! Reading is tolerant. A field holding the wrong JSON type (a `null` duration, a
//! fractional byte count, a numeric platform) reads as zero or empty and its name
//! is kept in `unreadable` so the data checks can report it. Only a document that
//! is not a JSON object at all is rejected.

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::{Map, Value};

/// Section key that carries the startup timing fields.
pub const STARTUP_SECTION: &str = "app-startup";

/// Marker in [`SectionSample::unreadable`] for a section whose value is not an object.
pub const SECTION_BODY: &str = "section";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(try_from = "Value")]
pub struct Snapshot {
    /// ISO-8601 capture time.
    pub timestamp: String,
    pub platform: String,
    pub arch: String,
    pub metrics: Sections,
    /// Top-level fields that held the wrong JSON type.
    pub unreadable: Vec<&'static str>,
}

impl Snapshot {
    /// The distinguished startup section, if the capture included one.
    pub fn startup(&self) -> Option<&SectionSample> {
        self.metrics.get(STARTUP_SECTION)
    }
}

impl TryFrom<Value> for Snapshot {
    type Error = String;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let Some(object) = value.as_object() else {
            return Err(format!("expected a metrics object, found {}", json_kind(&value)));
        };

        let mut fields = FieldReader::new(object);
        let timestamp = fields.text("timestamp");
        let platform = fields.text("platform");
        let arch = fields.text("arch");
        let metrics = fields
            .object("metrics")
            .map(|sections| {
                sections
                    .iter()
                    .map(|(name, sample)| (name.clone(), SectionSample::from_json(sample)))
                    .collect::<Sections>()
            })
            .unwrap_or_default();

        Ok(Snapshot {
            timestamp,
            platform,
            arch,
            metrics,
            unreadable: fields.unreadable,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub struct SectionSample {
    /// Seconds.
    pub layout_duration: f64,
    /// Seconds.
    pub recalc_style_duration: f64,
    /// Seconds.
    pub script_duration: f64,
    /// Seconds.
    pub task_duration: f64,
    /// Bytes.
    pub js_heap_used_size: u64,
    /// Bytes.
    pub js_heap_total_size: u64,
    /// Renderer timestamp, or 0 when the section never loaded a document.
    pub dom_content_loaded: f64,
    pub cpu_usage: Option<CpuUsage>,
    /// Milliseconds; only present on the startup section.
    pub time_to_interactive: Option<f64>,
    /// Milliseconds; only present on the startup section.
    pub app_startup_time: Option<f64>,
    /// JSON field names that held the wrong type and were read as zero.
    pub unreadable: Vec<&'static str>,
}

impl SectionSample {
    /// Read one section value. Missing fields are zero; mistyped ones are zero and
    /// recorded.
    pub fn from_json(value: &Value) -> Self {
        let Some(object) = value.as_object() else {
            return SectionSample {
                unreadable: vec![SECTION_BODY],
                ..SectionSample::default()
            };
        };

        let mut fields = FieldReader::new(object);
        let cpu_usage = match fields.object("cpuUsage") {
            Some(cpu) => {
                let mut inner = FieldReader::new(cpu);
                let usage = CpuUsage {
                    percent_cpu_usage: inner.number("percentCPUUsage"),
                    idle_wakeups_per_second: inner.count("idleWakeupsPerSecond"),
                };
                fields.unreadable.append(&mut inner.unreadable);
                Some(usage)
            }
            None => None,
        };

        SectionSample {
            layout_duration: fields.number("layoutDuration"),
            recalc_style_duration: fields.number("recalcStyleDuration"),
            script_duration: fields.number("scriptDuration"),
            task_duration: fields.number("taskDuration"),
            js_heap_used_size: fields.count("jsHeapUsedSize"),
            js_heap_total_size: fields.count("jsHeapTotalSize"),
            dom_content_loaded: fields.number("domContentLoaded"),
            cpu_usage,
            time_to_interactive: fields.optional_number("timeToInteractive"),
            app_startup_time: fields.optional_number("appStartupTime"),
            unreadable: fields.unreadable,
        }
    }

    /// CPU percentage, reading a missing `cpuUsage` block as idle.
    pub fn cpu_percent(&self) -> f64 {
        self.cpu_usage
            .as_ref()
            .map(|cpu| cpu.percent_cpu_usage)
            .unwrap_or(0.0)
    }

    pub fn idle_wakeups(&self) -> u64 {
        self.cpu_usage
            .as_ref()
            .map(|cpu| cpu.idle_wakeups_per_second)
            .unwrap_or(0)
    }
}

impl From<Value> for SectionSample {
    fn from(value: Value) -> Self {
        SectionSample::from_json(&value)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CpuUsage {
    pub percent_cpu_usage: f64,
    pub idle_wakeups_per_second: u64,
}

/// Insertion-ordered mapping of section name to sample.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sections(IndexMap<String, SectionSample>);

impl Sections {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a section. A replaced section keeps its original position.
    pub fn insert(&mut self, name: impl Into<String>, sample: SectionSample) {
        self.0.insert(name.into(), sample);
    }

    pub fn get(&self, name: &str) -> Option<&SectionSample> {
        self.0.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SectionSample)> {
        self.0.iter().map(|(name, sample)| (name.as_str(), sample))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, SectionSample)> for Sections {
    fn from_iter<I: IntoIterator<Item = (K, SectionSample)>>(iter: I) -> Self {
        let mut sections = Sections::new();
        for (name, sample) in iter {
            sections.insert(name, sample);
        }
        sections
    }
}

/// Typed reads out of one JSON object. An absent key reads as the default and is
/// not an anomaly; a present key of the wrong type reads as the default and is
/// recorded.
struct FieldReader<'a> {
    object: &'a Map<String, Value>,
    unreadable: Vec<&'static str>,
}

impl<'a> FieldReader<'a> {
    fn new(object: &'a Map<String, Value>) -> Self {
        Self {
            object,
            unreadable: Vec::new(),
        }
    }

    fn number(&mut self, key: &'static str) -> f64 {
        self.optional_number(key).unwrap_or(0.0)
    }

    fn optional_number(&mut self, key: &'static str) -> Option<f64> {
        let value = self.object.get(key)?;
        let number = value.as_f64();
        if number.is_none() {
            self.unreadable.push(key);
        }
        number
    }

    /// Non-negative integer. Fractional values are rounded; negative ones are unreadable.
    fn count(&mut self, key: &'static str) -> u64 {
        let Some(value) = self.object.get(key) else {
            return 0;
        };
        if let Some(count) = value.as_u64() {
            return count;
        }
        match value.as_f64() {
            Some(number) if number >= 0.0 => number.round() as u64,
            _ => {
                self.unreadable.push(key);
                0
            }
        }
    }

    fn text(&mut self, key: &'static str) -> String {
        match self.object.get(key) {
            None => String::new(),
            Some(Value::String(text)) => text.clone(),
            Some(_) => {
                self.unreadable.push(key);
                String::new()
            }
        }
    }

    /// Nested object. `null` reads like an absent key.
    fn object(&mut self, key: &'static str) -> Option<&'a Map<String, Value>> {
        let object = self.object;
        match object.get(key) {
            None | Some(Value::Null) => None,
            Some(Value::Object(inner)) => Some(inner),
            Some(_) => {
                self.unreadable.push(key);
                None
            }
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn sections_keep_document_order() {
        let raw = r#"{
            "timestamp": "2025-03-05T00:12:16.599Z",
            "platform": "darwin",
            "arch": "arm64",
            "metrics": {
                "zeta-view": { "taskDuration": 0.1 },
                "app-startup": { "taskDuration": 0.2 },
                "alpha-view": { "taskDuration": 0.3 }
            }
        }"#;

        let snapshot: Snapshot = serde_json::from_str(raw).unwrap();
        let names: Vec<_> = snapshot.metrics.names().collect();
        assert_eq!(names, vec!["zeta-view", "app-startup", "alpha-view"]);
        assert!(snapshot.unreadable.is_empty());
    }

    #[test]
    fn missing_cpu_block_reads_as_zero() {
        let sample: SectionSample = serde_json::from_value(json!({
            "jsHeapUsedSize": 10,
            "jsHeapTotalSize": 20
        }))
        .unwrap();

        assert!(sample.cpu_usage.is_none());
        assert_eq!(sample.cpu_percent(), 0.0);
        assert_eq!(sample.idle_wakeups(), 0);
        assert_eq!(sample.script_duration, 0.0);
        assert!(sample.unreadable.is_empty());
    }

    #[test]
    fn startup_fields_are_optional() {
        let sample: SectionSample = serde_json::from_value(json!({
            "cpuUsage": { "percentCPUUsage": 15, "idleWakeupsPerSecond": 5 },
            "timeToInteractive": 284,
            "appStartupTime": 284
        }))
        .unwrap();

        assert_eq!(sample.cpu_percent(), 15.0);
        assert_eq!(sample.idle_wakeups(), 5);
        assert_eq!(sample.time_to_interactive, Some(284.0));
        assert_eq!(sample.app_startup_time, Some(284.0));
    }

    #[test]
    fn fractional_byte_counts_are_accepted() {
        let sample = SectionSample::from_json(&json!({
            "jsHeapUsedSize": 1914820.0,
            "jsHeapTotalSize": 3047424.4,
            "cpuUsage": { "percentCPUUsage": 15, "idleWakeupsPerSecond": 5.0 }
        }));

        assert_eq!(sample.js_heap_used_size, 1_914_820);
        assert_eq!(sample.js_heap_total_size, 3_047_424);
        assert_eq!(sample.idle_wakeups(), 5);
        assert!(sample.unreadable.is_empty());
    }

    #[test]
    fn mistyped_fields_read_as_zero_and_are_recorded() {
        let sample = SectionSample::from_json(&json!({
            "taskDuration": null,
            "scriptDuration": "11ms",
            "jsHeapUsedSize": -4,
            "jsHeapTotalSize": 20,
            "cpuUsage": { "percentCPUUsage": null, "idleWakeupsPerSecond": 2 }
        }));

        assert_eq!(sample.task_duration, 0.0);
        assert_eq!(sample.script_duration, 0.0);
        assert_eq!(sample.js_heap_used_size, 0);
        assert_eq!(sample.js_heap_total_size, 20);
        assert_eq!(sample.cpu_percent(), 0.0);
        assert_eq!(sample.idle_wakeups(), 2);
        assert_eq!(
            sample.unreadable,
            vec![
                "percentCPUUsage",
                "scriptDuration",
                "taskDuration",
                "jsHeapUsedSize"
            ]
        );
    }

    #[test]
    fn non_object_section_reads_as_empty() {
        let raw = r#"{ "metrics": { "broken": 42, "ok": { "taskDuration": 0.5 } } }"#;
        let snapshot: Snapshot = serde_json::from_str(raw).unwrap();

        let broken = snapshot.metrics.get("broken").unwrap();
        assert_eq!(broken.unreadable, vec![SECTION_BODY]);
        assert_eq!(broken.task_duration, 0.0);
        assert_eq!(snapshot.metrics.get("ok").unwrap().task_duration, 0.5);
    }

    #[test]
    fn mistyped_header_fields_read_as_empty() {
        let raw = r#"{ "platform": null, "arch": 64, "metrics": [] }"#;
        let snapshot: Snapshot = serde_json::from_str(raw).unwrap();

        assert_eq!(snapshot.platform, "");
        assert_eq!(snapshot.arch, "");
        assert!(snapshot.metrics.is_empty());
        assert_eq!(snapshot.unreadable, vec!["platform", "arch", "metrics"]);
    }

    #[test]
    fn non_object_document_is_rejected() {
        let err = serde_json::from_str::<Snapshot>("[1, 2]").unwrap_err();
        assert!(err.to_string().contains("an array"), "{err}");
    }

    #[test]
    fn duplicate_section_replaces_in_place() {
        let mut sections = Sections::new();
        sections.insert("a", SectionSample::default());
        sections.insert("b", SectionSample::default());
        sections.insert(
            "a",
            SectionSample {
                task_duration: 1.0,
                ..SectionSample::default()
            },
        );

        let names: Vec<_> = sections.names().collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(sections.get("a").map(|s| s.task_duration), Some(1.0));
    }
}
