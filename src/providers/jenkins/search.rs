use std::collections::BTreeMap;

use super::normalize::normalize;
use super::types::Job;

/// Finds every job in the forest whose identifier, display name or
/// description contains `criteria`, ignoring case, accents and spacing.
///
/// All nodes are tested, at any depth. Matches are returned without their
/// children, ordered by normalized display name. Two matches with the same
/// normalized display name collapse into one: the one visited last wins.
pub fn find_matching(jobs: &[Job], criteria: &str) -> Vec<Job> {
    let criteria = normalize(criteria);
    let mut matches = JobIndex::default();

    for job in flatten(jobs) {
        if is_match(job, &criteria) {
            matches.insert(job.without_jobs());
        }
    }

    matches.into_values()
}

/// Pre-order traversal: each job precedes its children, siblings keep document order.
pub fn flatten(jobs: &[Job]) -> Vec<&Job> {
    let mut flat = Vec::new();
    let mut stack: Vec<&Job> = jobs.iter().rev().collect();

    while let Some(job) = stack.pop() {
        flat.push(job);
        if let Some(children) = &job.jobs {
            stack.extend(children.iter().rev());
        }
    }

    flat
}

fn is_match(job: &Job, criteria: &str) -> bool {
    [
        Some(job.id.as_str()),
        job.name.as_deref(),
        job.description.as_deref(),
    ]
    .into_iter()
    .flatten()
    .any(|field| normalize(field).contains(criteria))
}

/// Search results keyed by normalized display name.
#[derive(Default)]
struct JobIndex {
    entries: BTreeMap<String, Job>,
}

impl JobIndex {
    /// Inserts `job`, replacing any earlier job with the same key.
    ///
    /// Returns the replaced job. Distinct jobs sharing a display name are
    /// therefore reported once.
    fn insert(&mut self, job: Job) -> Option<Job> {
        let key = normalize(job.display_name());
        self.entries.insert(key, job)
    }

    fn into_values(self) -> Vec<Job> {
        self.entries.into_values().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_job(id: &str, name: Option<&str>, description: Option<&str>) -> Job {
        Job {
            id: id.to_string(),
            name: name.map(ToString::to_string),
            description: description.map(ToString::to_string),
            status: "blue".to_string(),
            building: false,
            last_build: None,
            pull_request_branch: false,
            jobs: None,
        }
    }

    fn with_children(mut job: Job, children: Vec<Job>) -> Job {
        job.jobs = Some(children);
        job
    }

    fn ids(jobs: &[Job]) -> Vec<&str> {
        jobs.iter().map(|j| j.id.as_str()).collect()
    }

    mod match_tests {
        use super::*;

        #[test]
        fn test_case_insensitive_match() {
            let jobs = vec![create_job(
                "ligoj-cron-rse",
                Some("Ligoj - Cron - RSE"),
                Some("CRON - Project RSE"),
            )];

            let found = find_matching(&jobs, "LIGOJ");
            assert_eq!(ids(&found), vec!["ligoj-cron-rse"]);
            assert_eq!(found[0].name.as_deref(), Some("Ligoj - Cron - RSE"));
        }

        #[test]
        fn test_matches_description_and_accents() {
            let jobs = vec![
                create_job("a", None, Some("Déploiement  continu")),
                create_job("b", None, None),
            ];
            assert_eq!(ids(&find_matching(&jobs, "deploiement continu")), vec!["a"]);
        }

        #[test]
        fn test_no_match() {
            let jobs = vec![create_job("a", Some("Alpha"), None)];
            assert!(find_matching(&jobs, "beta").is_empty());
        }

        #[test]
        fn test_empty_forest() {
            assert!(find_matching(&[], "ligoj").is_empty());
        }
    }

    mod traversal_tests {
        use super::*;

        #[test]
        fn test_descendant_matches_without_ancestor() {
            let jobs = vec![with_children(
                create_job("folder", Some("Folder"), None),
                vec![with_children(
                    create_job("folder/sub", Some("Sub"), None),
                    vec![create_job("folder/sub/ligoj", Some("Ligoj deep"), None)],
                )],
            )];

            let found = find_matching(&jobs, "ligoj");
            assert_eq!(ids(&found), vec!["folder/sub/ligoj"]);
        }

        #[test]
        fn test_results_have_no_children() {
            let jobs = vec![with_children(
                create_job("ligoj", None, None),
                vec![create_job("ligoj/main", Some("main"), None)],
            )];

            let found = find_matching(&jobs, "ligoj");
            assert_eq!(found.len(), 2);
            assert!(found.iter().all(|job| job.jobs.is_none()));
        }

        #[test]
        fn test_flatten_is_pre_order() {
            let jobs = vec![
                with_children(
                    create_job("a", None, None),
                    vec![create_job("a1", None, None), create_job("a2", None, None)],
                ),
                create_job("b", None, None),
            ];

            let flat: Vec<&str> = flatten(&jobs).iter().map(|j| j.id.as_str()).collect();
            assert_eq!(flat, vec!["a", "a1", "a2", "b"]);
        }
    }

    mod ordering_tests {
        use super::*;

        #[test]
        fn test_sorted_by_normalized_display_name() {
            let jobs = vec![
                create_job("z-job", Some("Ligoj-Zulu"), None),
                create_job("ligoj-alpha", None, None),
                create_job("m-job", Some("ÉLigoj"), None),
            ];

            let found = find_matching(&jobs, "ligoj");
            assert_eq!(ids(&found), vec!["m-job", "ligoj-alpha", "z-job"]);
        }

        #[test]
        fn test_key_collision_keeps_last_visited() {
            let jobs = vec![
                create_job("first", Some("Ligoj"), None),
                with_children(
                    create_job("folder", None, None),
                    vec![create_job("folder/second", Some("LIGOJ"), None)],
                ),
            ];

            let found = find_matching(&jobs, "ligoj");
            assert_eq!(ids(&found), vec!["folder/second"]);
        }

        #[test]
        fn test_index_reports_replaced_job() {
            let mut index = JobIndex::default();
            assert!(index.insert(create_job("a", Some("Same"), None)).is_none());
            let replaced = index.insert(create_job("b", Some("same"), None));
            assert_eq!(replaced.map(|j| j.id), Some("a".to_string()));
            assert_eq!(ids(&index.into_values()), vec!["b"]);
        }
    }
}
