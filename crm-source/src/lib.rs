//! Account record source for the support agent.
//!
//! Public API: the [`RecordSource`] trait and its two implementations,
//! [`SalesforceSource`] (live SOQL query) and [`StubSource`] (in-process
//! sample). A fetch never fails outright; connectivity and configuration
//! problems come back as [`FetchOutcome::Unavailable`], malformed account rows
//! as [`FetchOutcome::Invalid`].

pub mod config;
pub mod error;
pub mod record;
pub mod salesforce;
pub mod source;
pub mod stub;

pub use config::{CrmSourceKind, SalesforceConfig};
pub use error::CrmError;
pub use record::AccountRecord;
pub use salesforce::SalesforceSource;
pub use source::{FetchOutcome, RecordSource};
pub use stub::StubSource;
