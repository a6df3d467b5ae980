//! Change detection and emission policy.

use serde::{Deserialize, Serialize};

use crate::health::aggregate::AggregateHealthSnapshot;

/// Whether `new` differs semantically from `old`.
///
/// An absent snapshot on either side is reported as "no change" rather than
/// "definitely different". The change index is not part of a snapshot and so
/// never takes part in the comparison.
pub fn changed(
    new: Option<&AggregateHealthSnapshot>,
    old: Option<&AggregateHealthSnapshot>,
) -> bool {
    let (new, old) = match (new, old) {
        (Some(new), Some(old)) => (new, old),
        _ => return false,
    };

    new.allocation_id != old.allocation_id
        || new.total != old.total
        || new.verdict != old.verdict
        || new.checks != old.checks
        || new.count != old.count
}

/// Decides whether a freshly computed snapshot is published.
///
/// `SuppressChanged` reproduces the behavior the watcher has always had: it
/// publishes a snapshot only when it compares equal to the previously
/// published one, which means genuine transitions after the first cycle are
/// held back. It stays the default until product owners confirm that
/// `EmitOnChange` is the intended contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmissionPolicy {
    /// Publish when the snapshot did not change; hold back changed snapshots.
    #[default]
    SuppressChanged,
    /// Publish the first snapshot and every snapshot that changed.
    EmitOnChange,
}

impl EmissionPolicy {
    /// Apply the policy to a new snapshot and the last published one.
    pub fn should_emit(
        self,
        new: &AggregateHealthSnapshot,
        previous: Option<&AggregateHealthSnapshot>,
    ) -> bool {
        let changed = changed(Some(new), previous);
        match self {
            EmissionPolicy::SuppressChanged => !changed,
            EmissionPolicy::EmitOnChange => previous.is_none() || changed,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EmissionPolicy::SuppressChanged => "suppress_changed",
            EmissionPolicy::EmitOnChange => "emit_on_change",
        }
    }
}
