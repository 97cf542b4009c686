/// Suffix Jenkins appends to a ball color while a build is running.
pub const ANIMATION_SUFFIX: &str = "_anime";

/// Status of jobs without any color information.
pub const DISABLED: &str = "disabled";

/// Status and building flag derived from a Jenkins ball color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobStatus {
    pub status: String,
    pub building: bool,
}

/// Splits a color such as `blue_anime` into `blue` and a building flag.
pub fn map_status(color: Option<&str>) -> JobStatus {
    let color = color.unwrap_or(DISABLED);
    match color.strip_suffix(ANIMATION_SUFFIX) {
        Some(status) => JobStatus {
            status: status.to_string(),
            building: true,
        },
        None => JobStatus {
            status: color.to_string(),
            building: false,
        },
    }
}
