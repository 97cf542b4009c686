/// Converts a full job name into its Jenkins resource path.
///
/// Each folder segment is URL encoded and prefixed with `job/`, so
/// `folder/my job` becomes `job/folder/job/my%20job`.
pub fn job_path(id: &str) -> String {
    id.split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| format!("job/{}", urlencoding::encode(segment)))
        .collect::<Vec<_>>()
        .join("/")
}

/// Converts a full job name to a clickable web URL.
///
/// # Arguments
///
/// * `base_url` - Jenkins base URL (e.g., <https://jenkins.example.com>)
/// * `id` - Full job name (e.g., "folder/ligoj-bootstrap")
pub fn job_url(base_url: &str, id: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), job_path(id))
}
