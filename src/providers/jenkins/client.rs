use log::{debug, warn};
use reqwest::{Client, Response};
use url::Url;

use crate::auth::Credentials;
use crate::error::{JobscopeError, Result};

/// HTTP access to a Jenkins instance.
///
/// Every failure (network, authentication, HTTP status) is reported as an
/// absent resource. Callers only see whether content came back.
pub struct JenkinsClient {
    client: Client,
    base_url: Url,
    credentials: Option<Credentials>,
}

impl JenkinsClient {
    pub fn new(base_url: &str, credentials: Option<Credentials>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("jobscope/", env!("CARGO_PKG_VERSION")))
            .build()?;

        // Resources are joined relative to the base, which needs a trailing slash
        let base_url = Url::parse(&format!("{}/", base_url.trim_end_matches('/')))
            .map_err(|e| JobscopeError::Config(format!("Invalid Jenkins URL: {e}")))?;

        Ok(Self {
            client,
            base_url,
            credentials,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Helper to build authenticated requests
    fn auth_request(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if let Some(credentials) = &self.credentials {
            request.basic_auth(credentials.user(), Some(credentials.api_token()))
        } else {
            request
        }
    }

    /// Returns the body of `resource`, or `None` when it cannot be retrieved.
    pub async fn get_resource(&self, resource: &str) -> Option<String> {
        let response = self.send(resource).await?;
        match response.text().await {
            Ok(body) => Some(body),
            Err(e) => {
                warn!("Failed to read Jenkins response for {resource}: {e}");
                None
            }
        }
    }

    /// Returns the value of `header` in the response to `resource`.
    pub async fn get_header(&self, resource: &str, header: &str) -> Option<String> {
        let response = self.send(resource).await?;
        response
            .headers()
            .get(header)
            .and_then(|value| value.to_str().ok())
            .map(ToString::to_string)
    }

    async fn send(&self, resource: &str) -> Option<Response> {
        let url = match self.base_url.join(resource) {
            Ok(url) => url,
            Err(e) => {
                warn!("Invalid Jenkins resource {resource}: {e}");
                return None;
            }
        };

        debug!("GET {url}");

        match self.auth_request(self.client.get(url)).send().await {
            Ok(response) if response.status().is_success() => Some(response),
            Ok(response) => {
                warn!(
                    "Jenkins returned status {} for {resource}",
                    response.status()
                );
                None
            }
            Err(e) => {
                warn!("Jenkins request failed for {resource}: {e}");
                None
            }
        }
    }
}
