use std::fmt;

/// Jenkins user and API token sent as HTTP basic authentication.
#[derive(Clone)]
pub struct Credentials {
    user: String,
    api_token: String,
}

impl Credentials {
    pub fn new(user: impl Into<String>, api_token: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            api_token: api_token.into(),
        }
    }

    /// Builds credentials only when both halves are present.
    pub fn from_parts(user: Option<&str>, api_token: Option<&str>) -> Option<Self> {
        match (user, api_token) {
            (Some(user), Some(token)) if !user.is_empty() => Some(Self::new(user, token)),
            _ => None,
        }
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn api_token(&self) -> &str {
        &self.api_token
    }
}

// Keep the token out of debug logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("api_token", &"***")
            .finish()
    }
}
