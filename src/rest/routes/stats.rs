// rest/routes/stats.rs — GET /api/v1/stats.

use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::error;

use crate::analysis;
use crate::AppContext;

pub async fn get_stats(
    State(ctx): State<Arc<AppContext>>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    match analysis::stats(&ctx.storage).await {
        Ok(s) => Ok(Json(json!({
            "count_mutant_dna": s.count_mutant_dna,
            "count_human_dna": s.count_human_dna,
            "ratio": s.ratio,
        }))),
        Err(e) => {
            error!(err = %e, "stats query failed");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            ))
        }
    }
}
