use async_trait::async_trait;
use tracing::debug;

use crate::{
    record::AccountRecord,
    source::{FetchOutcome, RecordSource},
};

/// In-process record source. Returns its records in insertion order.
#[derive(Debug, Clone, Default)]
pub struct StubSource {
    records: Vec<AccountRecord>,
}

impl StubSource {
    pub fn new(records: Vec<AccountRecord>) -> Self {
        Self { records }
    }

    /// Fixed demo sample for running without a CRM.
    pub fn demo() -> Self {
        Self::new(vec![
            AccountRecord::new("Acme Corp", "Energy", "+1-555-0100"),
            AccountRecord::new("Globex", "Manufacturing", "+1-555-0200"),
            AccountRecord::new("Initech", "Technology", "+1-555-0300"),
        ])
    }
}

#[async_trait]
impl RecordSource for StubSource {
    fn name(&self) -> &'static str {
        "stub"
    }

    async fn fetch(&self, limit: usize) -> FetchOutcome {
        let records: Vec<_> = self.records.iter().take(limit).cloned().collect();
        debug!(limit, returned = records.len(), "stub fetch");
        FetchOutcome::Records(records)
    }
}
