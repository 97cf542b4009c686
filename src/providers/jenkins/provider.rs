use log::{debug, info};

use crate::auth::Credentials;
use crate::error::Result;

use super::branches::{rank_branches, DEFAULT_MAX_BRANCHES};
use super::client::JenkinsClient;
use super::links::job_path;
use super::parser::{parse_forest, parse_job};
use super::query::{job_query, search_query, DEFAULT_MAX_DEPTH};
use super::search::find_matching;
use super::types::Job;

/// Document used in place of a listing that could not be retrieved.
const EMPTY_LISTING: &str = "<a/>";

/// View holding the template jobs.
const TEMPLATES_VIEW: &str = "view/Templates/";

/// Header carrying the Jenkins version.
const VERSION_HEADER: &str = "x-jenkins";

/// Limits applied when querying and ranking jobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Nested folder levels requested when searching
    pub max_depth: u32,
    /// Branches kept for a resolved job
    pub max_branches: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_branches: DEFAULT_MAX_BRANCHES,
        }
    }
}

/// Jenkins job provider.
///
/// Fetches job trees through the tree API and turns them into [`Job`]
/// values: free-text search across nested folders, and resolution of a
/// single job with its most active branches.
pub struct JenkinsProvider {
    client: JenkinsClient,
    limits: Limits,
}

impl JenkinsProvider {
    /// Creates a provider for the Jenkins instance at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client cannot be built.
    pub fn new(base_url: &str, credentials: Option<Credentials>, limits: Limits) -> Result<Self> {
        let client = JenkinsClient::new(base_url, credentials)?;
        Ok(Self { client, limits })
    }

    /// Base URL of the Jenkins instance, with a trailing slash.
    pub fn base_url(&self) -> &str {
        self.client.base_url().as_str()
    }

    /// Searches all jobs whose name, display name or description contains `criteria`.
    ///
    /// # Errors
    ///
    /// Returns an error if the listing is not well-formed XML.
    pub async fn search_jobs(&self, criteria: &str) -> Result<Vec<Job>> {
        self.search_in_view("", criteria).await
    }

    /// Same as [`Self::search_jobs`], limited to the template jobs view.
    ///
    /// # Errors
    ///
    /// Returns an error if the listing is not well-formed XML.
    pub async fn search_templates(&self, criteria: &str) -> Result<Vec<Job>> {
        self.search_in_view(TEMPLATES_VIEW, criteria).await
    }

    async fn search_in_view(&self, view: &str, criteria: &str) -> Result<Vec<Job>> {
        info!("Searching jobs matching '{criteria}'...");

        let resource = format!(
            "{view}api/xml?tree={}",
            search_query(self.limits.max_depth)
        );
        let listing = self
            .client
            .get_resource(&resource)
            .await
            .unwrap_or_else(|| EMPTY_LISTING.to_string());

        let jobs = parse_forest(&listing)?;
        let found = find_matching(&jobs, criteria);

        info!("Found {} matching jobs", found.len());

        Ok(found)
    }

    /// Resolves a job by its full name, with its ranked branches.
    ///
    /// `id` may be a folder path such as `folder/project`. Returns `None` when
    /// the job does not exist or cannot be retrieved.
    ///
    /// # Errors
    ///
    /// Returns an error if the job document is not well-formed XML.
    pub async fn find_job(&self, id: &str) -> Result<Option<Job>> {
        info!("Resolving job '{id}'...");

        let path = job_path(id);
        if path.is_empty() {
            debug!("No job name in '{id}'");
            return Ok(None);
        }

        let resource = format!("{path}/api/xml?tree={}", job_query());
        let Some(document) = self.client.get_resource(&resource).await else {
            debug!("No document for job '{id}'");
            return Ok(None);
        };

        let Some(mut job) = parse_job(&document)? else {
            debug!("Empty document for job '{id}'");
            return Ok(None);
        };

        let branches = job.jobs.take().unwrap_or_default();
        job.jobs = Some(rank_branches(branches, self.limits.max_branches));

        Ok(Some(job))
    }

    /// Returns the version of the Jenkins instance, if it can be read.
    pub async fn version(&self) -> Option<String> {
        self.client
            .get_header("api/json?tree=numExecutors", VERSION_HEADER)
            .await
    }
}
