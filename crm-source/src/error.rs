//! Typed error for the crm-source crate.

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CrmError {
    /// Username or password is not configured.
    #[error("[CRM] missing credentials: {0}")]
    MissingCredentials(&'static str),

    /// Invalid configuration value (bad number, bad URL, unknown source).
    #[error("[CRM] invalid config in {var}: {reason}")]
    Config { var: &'static str, reason: String },

    /// HTTP/transport errors when calling Salesforce.
    #[error("[CRM] transport error: {0}")]
    HttpTransport(#[from] reqwest::Error),

    /// SOAP login answered with a fault or a non-2xx status.
    #[error("[CRM] login failed (HTTP {status}): {fault}")]
    LoginFailed { status: StatusCode, fault: String },

    /// SOQL query answered with a non-2xx status.
    #[error("[CRM] query failed (HTTP {status}): {snippet}")]
    QueryFailed { status: StatusCode, snippet: String },

    /// Payload could not be decoded into account records.
    #[error("[CRM] decode error: {0}")]
    Decode(String),

    /// A returned account row lacks `Name`, `Industry` or `Phone`.
    #[error("[CRM] invalid account record: {0}")]
    InvalidRecord(String),
}
