use std::cmp::Ordering;

use super::status::DISABLED;
use super::types::Job;

/// Default number of branches kept for a resolved job.
pub const DEFAULT_MAX_BRANCHES: usize = 10;

/// Keeps the most recently built, enabled branches of a job.
///
/// Disabled branches are dropped, the rest are ordered by last build, most
/// recent first, with never-built branches last. The sort is stable, so
/// branches with the same (or no) last build keep their document order.
/// At most `max_branches` branches are returned.
pub fn rank_branches(branches: Vec<Job>, max_branches: usize) -> Vec<Job> {
    let mut branches: Vec<Job> = branches
        .into_iter()
        .filter(|branch| branch.status != DISABLED)
        .collect();

    branches.sort_by(|a, b| cmp_last_build(a.last_build, b.last_build));
    branches.truncate(max_branches);
    branches
}

fn cmp_last_build(a: Option<i64>, b: Option<i64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_branch(id: &str, status: &str, last_build: Option<i64>) -> Job {
        Job {
            id: id.to_string(),
            name: None,
            description: None,
            status: status.to_string(),
            building: false,
            last_build,
            pull_request_branch: false,
            jobs: None,
        }
    }

    fn ids(branches: &[Job]) -> Vec<&str> {
        branches.iter().map(|b| b.id.as_str()).collect()
    }

    #[test]
    fn test_filter_sort_and_cap() {
        let branches = vec![
            create_branch("b100", "blue", Some(100)),
            create_branch("never", "blue", None),
            create_branch("b300", "red", Some(300)),
            create_branch("b200", "blue", Some(200)),
            create_branch("off", "disabled", Some(999)),
        ];

        let ranked = rank_branches(branches, 2);
        assert_eq!(ids(&ranked), vec!["b300", "b200"]);
    }

    #[test]
    fn test_never_built_sorts_last() {
        let branches = vec![
            create_branch("never", "blue", None),
            create_branch("b100", "blue", Some(100)),
            create_branch("b300", "blue", Some(300)),
        ];

        let ranked = rank_branches(branches, DEFAULT_MAX_BRANCHES);
        assert_eq!(ids(&ranked), vec!["b300", "b100", "never"]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let branches = vec![
            create_branch("x", "blue", Some(100)),
            create_branch("n1", "blue", None),
            create_branch("y", "red", Some(100)),
            create_branch("n2", "blue", None),
            create_branch("z", "blue", Some(100)),
        ];

        let ranked = rank_branches(branches, DEFAULT_MAX_BRANCHES);
        assert_eq!(ids(&ranked), vec!["x", "y", "z", "n1", "n2"]);
    }

    #[test]
    fn test_disabled_never_returned() {
        let branches = vec![
            create_branch("a", "disabled", Some(5)),
            create_branch("b", "disabled", None),
        ];
        assert!(rank_branches(branches, DEFAULT_MAX_BRANCHES).is_empty());
    }

    #[test]
    fn test_large_timestamp_gap_orders_correctly() {
        let branches = vec![
            create_branch("old", "blue", Some(0)),
            create_branch("new", "blue", Some(i64::MAX)),
        ];
        assert_eq!(
            ids(&rank_branches(branches, DEFAULT_MAX_BRANCHES)),
            vec!["new", "old"]
        );
    }

    #[test]
    fn test_zero_cap_is_empty() {
        let branches = vec![create_branch("a", "blue", Some(1))];
        assert!(rank_branches(branches, 0).is_empty());
    }
}
