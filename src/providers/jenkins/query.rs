/// Fields requested for one level of the Jenkins tree API.
pub const JOB_FIELDS: &str =
    "name,fullName,displayName,description,color,lastBuild[timestamp],property[branch[head]]";

/// Default number of nested `jobs` levels requested when searching.
pub const DEFAULT_MAX_DEPTH: u32 = 5;

/// Builds the `tree` parameter used to list jobs across nested folders.
///
/// The field template is nested `max_depth - 1` times inside itself, so a
/// depth of 2 yields `jobs[T,jobs[T]]`. Depths below 1 are treated as 1.
pub fn search_query(max_depth: u32) -> String {
    let mut query = format!("jobs[{JOB_FIELDS}]");
    for _ in 1..max_depth.max(1) {
        query = format!("jobs[{JOB_FIELDS},{query}]");
    }
    query
}

/// Builds the `tree` parameter used to resolve one job and its branches.
pub fn job_query() -> String {
    format!("{JOB_FIELDS},jobs[{JOB_FIELDS}]")
}
