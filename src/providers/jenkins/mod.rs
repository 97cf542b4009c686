mod branches;
mod client;
mod links;
mod normalize;
mod parser;
mod provider;
mod query;
mod search;
mod status;
mod types;

pub use branches::DEFAULT_MAX_BRANCHES;
pub use links::job_url;
pub use provider::{JenkinsProvider, Limits};
pub use query::{job_query, search_query, DEFAULT_MAX_DEPTH};
pub use types::Job;
