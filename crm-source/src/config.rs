//! Runtime configuration loaded from environment variables.

use std::str::FromStr;

use crate::error::CrmError;

pub const DEFAULT_DOMAIN: &str = "login";
pub const DEFAULT_API_VERSION: &str = "59.0";

/// Which [`crate::RecordSource`] the process should build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CrmSourceKind {
    #[default]
    Salesforce,
    Stub,
}

impl FromStr for CrmSourceKind {
    type Err = CrmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "salesforce" => Ok(Self::Salesforce),
            "stub" => Ok(Self::Stub),
            other => Err(CrmError::Config {
                var: "CRM_SOURCE",
                reason: format!("expected `salesforce` or `stub`, got `{other}`"),
            }),
        }
    }
}

impl CrmSourceKind {
    /// Reads `CRM_SOURCE`; unset or empty means Salesforce.
    pub fn from_env() -> Result<Self, CrmError> {
        match env_opt("CRM_SOURCE") {
            Some(v) => v.parse(),
            None => Ok(Self::default()),
        }
    }
}

/// Salesforce connection settings.
///
/// Username and password stay optional: a source without them still builds
/// and reports `MissingCredentials` on every fetch.
#[derive(Clone)]
pub struct SalesforceConfig {
    pub username: Option<String>,
    pub password: Option<String>,
    /// Appended to the password on login. Empty for IP-allowlisted orgs.
    pub security_token: String,
    /// Login host prefix: `login`, `test`, or a My Domain like `acme.my`.
    pub domain: String,
    /// Full login base URL; overrides `domain` when set.
    pub login_url: Option<String>,
    pub api_version: String,
    pub timeout_secs: Option<u64>,
}

impl SalesforceConfig {
    /// Build from environment variables with defaults.
    ///
    /// # Env
    /// - `SALESFORCE_USERNAME`, `SALESFORCE_PASSWORD` (optional)
    /// - `SALESFORCE_TOKEN` (optional, default empty)
    /// - `SALESFORCE_DOMAIN` (default `login`)
    /// - `SALESFORCE_LOGIN_URL` (optional, must be http/https)
    /// - `SALESFORCE_API_VERSION` (default `59.0`)
    /// - `SALESFORCE_TIMEOUT_SECS` (optional u64)
    pub fn from_env() -> Result<Self, CrmError> {
        let login_url = env_opt("SALESFORCE_LOGIN_URL");
        if let Some(url) = &login_url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(CrmError::Config {
                    var: "SALESFORCE_LOGIN_URL",
                    reason: "must start with http:// or https://".into(),
                });
            }
        }

        let timeout_secs = match env_opt("SALESFORCE_TIMEOUT_SECS") {
            Some(v) => Some(v.trim().parse::<u64>().map_err(|_| CrmError::Config {
                var: "SALESFORCE_TIMEOUT_SECS",
                reason: "expected u64".into(),
            })?),
            None => None,
        };

        Ok(Self {
            username: env_opt("SALESFORCE_USERNAME"),
            password: env_opt("SALESFORCE_PASSWORD"),
            security_token: env_opt("SALESFORCE_TOKEN").unwrap_or_default(),
            domain: env_opt("SALESFORCE_DOMAIN").unwrap_or_else(|| DEFAULT_DOMAIN.to_string()),
            login_url,
            api_version: env_opt("SALESFORCE_API_VERSION")
                .unwrap_or_else(|| DEFAULT_API_VERSION.to_string()),
            timeout_secs,
        })
    }

    /// SOAP partner login endpoint.
    pub fn login_endpoint(&self) -> String {
        let base = match &self.login_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!("https://{}.salesforce.com", self.domain.trim()),
        };
        format!("{base}/services/Soap/u/{}", self.api_version)
    }
}

impl std::fmt::Debug for SalesforceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SalesforceConfig")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("security_token", &"***")
            .field("domain", &self.domain)
            .field("login_url", &self.login_url)
            .field("api_version", &self.api_version)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

fn env_opt(k: &str) -> Option<String> {
    std::env::var(k).ok().filter(|v| !v.trim().is_empty())
}
