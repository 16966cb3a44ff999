// rest/routes/mutant.rs — POST /api/v1/mutant.
//
// 200 with {"mutant": true} for a mutant grid, 403 with {"mutant": false}
// for a human one, 400 for malformed input.

use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{error, info};

use crate::analysis::{self, AnalyzeError};
use crate::AppContext;

#[derive(Deserialize)]
pub struct MutantRequest {
    pub dna: Vec<String>,
}

pub async fn check_mutant(
    State(ctx): State<Arc<AppContext>>,
    Json(body): Json<MutantRequest>,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    match analysis::analyze(&ctx.storage, &body.dna).await {
        Ok(verdict) => {
            info!(
                mutant = verdict.mutant,
                cached = verdict.cached,
                n = body.dna.len(),
                "dna analyzed"
            );
            let status = if verdict.mutant {
                StatusCode::OK
            } else {
                StatusCode::FORBIDDEN
            };
            Ok((status, Json(json!({ "mutant": verdict.mutant }))))
        }
        Err(AnalyzeError::InvalidDna(e)) => Err((
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": e.to_string() })),
        )),
        Err(AnalyzeError::Storage(e)) => {
            error!(err = %e, "dna analysis failed");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            ))
        }
    }
}
