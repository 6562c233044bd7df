use std::sync::Arc;

use answer_generator::AnswerGenerator;
use crm_source::RecordSource;

use crate::core::config::{ApiConfig, FailurePolicy};

/// Shared state for all HTTP handlers. Read-only after startup.
#[derive(Clone)]
pub struct AppState {
    /// Where `/ask` gets its account records.
    pub records: Arc<dyn RecordSource>,
    /// Prompt rendering + LLM call.
    pub generator: AnswerGenerator,
    /// Records fetched per question.
    pub record_limit: usize,
    /// How to treat an unavailable record source.
    pub failure_policy: FailurePolicy,
}

impl AppState {
    pub fn new(
        records: Arc<dyn RecordSource>,
        generator: AnswerGenerator,
        config: &ApiConfig,
    ) -> Self {
        Self {
            records,
            generator,
            record_limit: config.record_limit,
            failure_policy: config.failure_policy,
        }
    }
}
