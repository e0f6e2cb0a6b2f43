//! Deployment environments and the client configuration value.
//!
//! The environment is fixed at build time: debug builds talk to
//! development, release builds to production, and the `staging` feature
//! switches release builds to staging. API tokens are injected through
//! `STOREFRONT_*_TOKEN` variables at compile time and never read at runtime.

use std::time::Duration;

use crate::aggregate::BranchPolicy;

pub const DEFAULT_PLATFORM: &str = "iOS";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

impl Environment {
    /// The environment this binary was built for.
    pub fn current() -> Self {
        if cfg!(debug_assertions) {
            Environment::Development
        } else if cfg!(feature = "staging") {
            Environment::Staging
        } else {
            Environment::Production
        }
    }

    pub fn base_url(self) -> &'static str {
        match self {
            Environment::Development => "https://webt.vivatv.com.tw",
            Environment::Staging | Environment::Production => "https://www.vivatv.com.tw",
        }
    }

    pub fn token(self) -> &'static str {
        let token = match self {
            Environment::Development => option_env!("STOREFRONT_DEV_TOKEN"),
            Environment::Staging => option_env!("STOREFRONT_STAGING_TOKEN"),
            Environment::Production => option_env!("STOREFRONT_PROD_TOKEN"),
        };
        token.unwrap_or_default()
    }
}

/// Everything the request pipeline needs to know about its deployment.
///
/// Passed into `ApiClient::new` by value; the client never mutates it.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    /// Sent verbatim as the `Authorization` header.
    pub token: String,
    pub platform: String,
    pub user_token: String,
    pub uid: String,
    /// Sent as `App-Version` when present.
    pub app_version: Option<String>,
    /// Per-request timeout enforced by the transport. `None` waits forever.
    pub request_timeout: Option<Duration>,
    /// What happens to in-flight branches when an aggregated join fails.
    pub branch_policy: BranchPolicy,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: token.into(),
            platform: DEFAULT_PLATFORM.to_string(),
            user_token: String::new(),
            uid: String::new(),
            app_version: Some(env!("CARGO_PKG_VERSION").to_string()),
            request_timeout: Some(DEFAULT_REQUEST_TIMEOUT),
            branch_policy: BranchPolicy::default(),
        }
    }

    pub fn for_environment(environment: Environment) -> Self {
        Self::new(environment.base_url(), environment.token())
    }

    pub fn with_user(mut self, user_token: impl Into<String>, uid: impl Into<String>) -> Self {
        self.user_token = user_token.into();
        self.uid = uid.into();
        self
    }

    pub fn with_app_version(mut self, app_version: Option<String>) -> Self {
        self.app_version = app_version;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_branch_policy(mut self, policy: BranchPolicy) -> Self {
        self.branch_policy = policy;
        self
    }

    /// Headers sent with every request, in send order.
    pub fn default_headers(&self) -> Vec<(String, String)> {
        let mut headers = vec![
            ("Authorization".to_string(), self.token.clone()),
            ("Platform".to_string(), self.platform.clone()),
            ("User-Token".to_string(), self.user_token.clone()),
            ("uid".to_string(), self.uid.clone()),
        ];
        if let Some(version) = &self.app_version {
            headers.push(("App-Version".to_string(), version.clone()));
        }
        headers
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::for_environment(Environment::current())
    }
}
