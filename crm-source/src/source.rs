//! The record-source seam and its explicit fetch result.

use async_trait::async_trait;
use tracing::warn;

use crate::{error::CrmError, record::AccountRecord};

/// Result of a fetch.
///
/// `Records(vec![])` means the CRM answered with no rows; `Unavailable` means
/// it could not be asked at all (or answered with garbage). `Invalid` means it
/// answered, but a row lacks one of the account fields.
#[derive(Debug)]
pub enum FetchOutcome {
    Records(Vec<AccountRecord>),
    Unavailable(CrmError),
    Invalid(CrmError),
}

impl FetchOutcome {
    pub fn is_unavailable(&self) -> bool {
        matches!(self, FetchOutcome::Unavailable(_))
    }

    /// Collapses `Unavailable` into an empty list, logging the cause.
    ///
    /// `Invalid` is never collapsed: a malformed record still fails the call.
    pub fn degrade(self) -> Result<Vec<AccountRecord>, CrmError> {
        match self {
            FetchOutcome::Records(records) => Ok(records),
            FetchOutcome::Unavailable(err) => {
                warn!(error = %err, "CRM unavailable; continuing without records");
                Ok(Vec::new())
            }
            FetchOutcome::Invalid(err) => Err(err),
        }
    }

    /// Turns `Unavailable` and `Invalid` into an error.
    pub fn into_result(self) -> Result<Vec<AccountRecord>, CrmError> {
        match self {
            FetchOutcome::Records(records) => Ok(records),
            FetchOutcome::Unavailable(err) | FetchOutcome::Invalid(err) => Err(err),
        }
    }
}

/// "Give me up to `limit` account records."
///
/// Implementations never return more than `limit` records and never fail
/// outright. Order is source-defined.
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Short label for logs.
    fn name(&self) -> &'static str;

    async fn fetch(&self, limit: usize) -> FetchOutcome;
}
