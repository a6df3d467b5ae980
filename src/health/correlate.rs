//! Allocation to health-check correlation.
//!
//! The scheduler registers every service of an allocation with the health
//! directory under a service id of the form
//! `_nomad-executor-<allocation id>-<task>-<service>`. There is no foreign key
//! between the two systems; the substring convention is the only link.
//! If the convention changes upstream, correlation yields nothing and the
//! allocation reads as `Unknown`.
//!
//! The marker must be followed by `-` or the end of the service id, so an
//! allocation id that is a prefix of another (`A1` and `A10`) never picks up
//! the other allocation's services.

use crate::directory::HealthCheckRecord;

/// Prefix the scheduler gives to auto-registered allocation services.
pub const EXECUTOR_SERVICE_PREFIX: &str = "_nomad-executor-";

/// The substring an owning service id must contain to belong to `allocation_id`,
/// followed by `-` or the end of the id.
pub fn allocation_marker(allocation_id: &str) -> String {
    format!("{}{}", EXECUTOR_SERVICE_PREFIX, allocation_id)
}

/// Whether `service_id` carries `marker` as a whole allocation id.
fn owns(service_id: &str, marker: &str) -> bool {
    service_id.match_indices(marker).any(|(at, _)| {
        let rest = &service_id[at + marker.len()..];
        rest.is_empty() || rest.starts_with('-')
    })
}

/// Keep only the records owned by services of `allocation_id`.
pub fn correlate<'a>(
    records: &'a [HealthCheckRecord],
    allocation_id: &str,
) -> impl Iterator<Item = &'a HealthCheckRecord> {
    let marker = allocation_marker(allocation_id);
    records
        .iter()
        .filter(move |record| owns(&record.service_id, &marker))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node_records() -> Vec<HealthCheckRecord> {
        vec![
            HealthCheckRecord::new("web", "passing", "_nomad-executor-A1-web-http"),
            HealthCheckRecord::new("db", "critical", "_nomad-executor-A1-db-tcp"),
            HealthCheckRecord::new("web", "passing", "_nomad-executor-B7-web-http"),
            HealthCheckRecord::new("Serf Health Status", "passing", ""),
            HealthCheckRecord::new("legacy", "passing", "web-A1"),
        ]
    }

    #[test]
    fn test_marker() {
        assert_eq!(allocation_marker("A1"), "_nomad-executor-A1");
    }

    #[test]
    fn test_only_own_services_are_kept() {
        let records = node_records();
        let names: Vec<_> = correlate(&records, "A1").map(|r| r.service_id.as_str()).collect();
        assert_eq!(names, vec!["_nomad-executor-A1-web-http", "_nomad-executor-A1-db-tcp"]);
    }

    #[test]
    fn test_other_allocations_never_leak() {
        let records = node_records();
        assert!(correlate(&records, "B7").all(|r| r.service_id.contains("B7")));
        assert_eq!(correlate(&records, "B7").count(), 1);
    }

    #[test]
    fn test_prefix_allocation_ids_stay_apart() {
        let records = vec![
            HealthCheckRecord::new("only-a10", "critical", "_nomad-executor-A10-web-http"),
            HealthCheckRecord::new("only-a1", "passing", "_nomad-executor-A1-web-http"),
            HealthCheckRecord::new("bare", "passing", "_nomad-executor-A1"),
        ];

        let a1: Vec<_> = correlate(&records, "A1").map(|r| r.name.as_str()).collect();
        assert_eq!(a1, vec!["only-a1", "bare"]);

        let a10: Vec<_> = correlate(&records, "A10").map(|r| r.name.as_str()).collect();
        assert_eq!(a10, vec!["only-a10"]);
    }

    #[test]
    fn test_unknown_convention_yields_nothing() {
        let records = vec![HealthCheckRecord::new("web", "passing", "nomad-task-A3-web")];
        assert_eq!(correlate(&records, "A3").count(), 0);
    }
}
