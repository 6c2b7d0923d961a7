//! Snapshot sources. The dashboard never reaches for sample data directly; it asks
//! a [`SnapshotSource`] so a live producer can replace the embedded capture later.

use std::fmt;
use std::rc::Rc;

use thiserror::Error;

use super::snapshot::Snapshot;

/// Capture bundled with the application.
const EMBEDDED_SNAPSHOT: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/assets/data/sample_snapshot.json"
));

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot `{origin}` is not valid metrics JSON: {source}")]
    Parse {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("snapshot `{origin}` is unavailable: {reason}")]
    Unavailable { origin: String, reason: String },
}

pub trait SnapshotSource {
    /// Short human-readable origin used in logs and error messages.
    fn describe(&self) -> String;

    fn load(&self) -> Result<Snapshot, SnapshotError>;
}

/// Parses a snapshot from JSON text.
#[derive(Debug, Clone)]
pub struct JsonSnapshot {
    origin: String,
    raw: String,
}

impl JsonSnapshot {
    pub fn new(origin: impl Into<String>, raw: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            raw: raw.into(),
        }
    }
}

impl SnapshotSource for JsonSnapshot {
    fn describe(&self) -> String {
        self.origin.clone()
    }

    fn load(&self) -> Result<Snapshot, SnapshotError> {
        parse_snapshot(&self.origin, &self.raw)
    }
}

/// The capture compiled into the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedSnapshot;

impl SnapshotSource for EmbeddedSnapshot {
    fn describe(&self) -> String {
        "embedded sample".to_string()
    }

    fn load(&self) -> Result<Snapshot, SnapshotError> {
        parse_snapshot(&self.describe(), EMBEDDED_SNAPSHOT)
    }
}

pub fn parse_snapshot(origin: &str, raw: &str) -> Result<Snapshot, SnapshotError> {
    if raw.trim().is_empty() {
        return Err(SnapshotError::Unavailable {
            origin: origin.to_string(),
            reason: "no data".to_string(),
        });
    }

    serde_json::from_str(raw).map_err(|source| SnapshotError::Parse {
        origin: origin.to_string(),
        source,
    })
}

/// Cloneable handle to a source so it can travel through component props.
///
/// Equality is identity: two handles are equal only when they share a source.
#[derive(Clone)]
pub struct SnapshotProvider(Rc<dyn SnapshotSource>);

impl SnapshotProvider {
    pub fn new(source: impl SnapshotSource + 'static) -> Self {
        Self(Rc::new(source))
    }

    pub fn embedded() -> Self {
        Self::new(EmbeddedSnapshot)
    }

    pub fn describe(&self) -> String {
        self.0.describe()
    }

    pub fn load(&self) -> Result<Snapshot, SnapshotError> {
        self.0.load()
    }
}

impl PartialEq for SnapshotProvider {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for SnapshotProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SnapshotProvider")
            .field(&self.0.describe())
            .finish()
    }
}
