//! Reduction of an allocation's correlated checks into one snapshot.
//!
//! # Verdict
//! ```text
//! Unknown   --passing-->  Healthy
//! Unknown   --other---->  Unhealthy
//! Healthy   --passing-->  Healthy
//! Healthy   --other---->  Unhealthy
//! Unhealthy --any------>  Unhealthy   (absorbing)
//! ```
//! Because `Unhealthy` absorbs, the final verdict does not depend on the order
//! in which checks are observed.

use std::collections::BTreeMap;

use serde::{Serialize, Serializer};

use crate::directory::types::HealthCheckRecord;

/// Overall health of an allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Verdict {
    /// No correlated checks were found.
    #[default]
    Unknown,
    /// Every correlated check is passing.
    Healthy,
    /// At least one correlated check is not passing.
    Unhealthy,
}

impl Verdict {
    /// Fold one more check into the verdict.
    pub fn observe(self, check: &HealthCheckRecord) -> Self {
        match self {
            Verdict::Unhealthy => Verdict::Unhealthy,
            _ if check.is_passing() => Verdict::Healthy,
            _ => Verdict::Unhealthy,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Unknown => "unknown",
            Verdict::Healthy => "healthy",
            Verdict::Unhealthy => "unhealthy",
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Encoded as the nullable boolean existing consumers read: `null`, `true`, `false`.
impl Serialize for Verdict {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Verdict::Unknown => serializer.serialize_none(),
            Verdict::Healthy => serializer.serialize_bool(true),
            Verdict::Unhealthy => serializer.serialize_bool(false),
        }
    }
}

/// Point-in-time health of one allocation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct AggregateHealthSnapshot {
    #[serde(rename = "ID")]
    pub allocation_id: String,

    /// Check name to status.
    #[serde(rename = "Checks")]
    pub checks: BTreeMap<String, String>,

    /// Status to number of checks in that status.
    #[serde(rename = "Count")]
    pub count: BTreeMap<String, usize>,

    #[serde(rename = "Total")]
    pub total: usize,

    #[serde(rename = "Healthy")]
    pub verdict: Verdict,
}

/// Reduce correlated records into a snapshot for `allocation_id`.
///
/// A repeated check name keeps its last status in `checks` while still being
/// counted in `count` and `total`.
pub fn aggregate<'a, I>(records: I, allocation_id: &str) -> AggregateHealthSnapshot
where
    I: IntoIterator<Item = &'a HealthCheckRecord>,
{
    let mut snapshot = AggregateHealthSnapshot {
        allocation_id: allocation_id.to_string(),
        ..AggregateHealthSnapshot::default()
    };

    for record in records {
        snapshot.total += 1;
        snapshot
            .checks
            .insert(record.name.clone(), record.status.clone());
        *snapshot.count.entry(record.status.clone()).or_insert(0) += 1;
        snapshot.verdict = snapshot.verdict.observe(record);
    }

    snapshot
}
