//! POST /ask — answers a question using a small CRM account sample.

use std::sync::Arc;

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use tracing::{debug, info};

use crate::{
    core::{app_state::AppState, config::FailurePolicy},
    error_handler::AppResult,
    routes::ask::ask_request::{AskRequest, AskResponse},
};

/// Handler: POST /ask
///
/// Fetches up to `record_limit` accounts, then asks the model. An unavailable
/// CRM either degrades to no records or fails the request, per
/// [`FailurePolicy`]. A malformed account record fails it either way.
///
/// # Example
/// ```bash
/// curl -X POST http://127.0.0.1:8000/ask \
///   -H 'content-type: application/json' \
///   -d '{"question":"What industries do we serve?"}'
/// ```
pub async fn ask_question(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AskRequest>, JsonRejection>,
) -> AppResult<Json<AskResponse>> {
    let Json(body) = payload?;
    debug!(question_len = body.question.len(), "ask received");

    let outcome = state.records.fetch(state.record_limit).await;
    let records = match state.failure_policy {
        FailurePolicy::Degrade => outcome.degrade()?,
        FailurePolicy::Surface => outcome.into_result()?,
    };

    let answer = state.generator.generate(&body.question, &records).await?;

    info!(
        source = state.records.name(),
        records = records.len(),
        "ask answered"
    );

    Ok(Json(AskResponse { answer }))
}
