use crate::error::ServerResult;
use crate::state::ServerState;
use axum::Json;
use axum::extract::State;
use lostfound::{ItemRecord, ScoreBreakdown, explain};
use serde::Deserialize;
use std::sync::Arc;

/// Compare request: two inline records
#[derive(Debug, Deserialize)]
pub struct CompareRequest {
    pub a: ItemRecord,
    pub b: ItemRecord,
}

/// Score two records against each other with the configured weights.
///
/// Kinds are not checked; the breakdown is what the aggregator would compute
/// if the pair were opposite kinds.
pub async fn compare_items(
    State(state): State<Arc<ServerState>>,
    Json(request): Json<CompareRequest>,
) -> ServerResult<Json<ScoreBreakdown>> {
    let weights = state.catalog.policy().weights;
    let breakdown = explain(&request.a, &request.b, &weights);

    tracing::debug!(
        a = request.a.id,
        b = request.b.id,
        score = breakdown.score,
        "compare_items"
    );

    Ok(Json(breakdown))
}
