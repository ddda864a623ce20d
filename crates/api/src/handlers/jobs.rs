//! Handlers for the asynchronous dispatch path (`/jobs`).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use snipforge_core::error::CoreError;
use snipforge_core::registry::JobStatus;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::handlers::generate::GenerateBody;
use crate::response::DataResponse;
use crate::state::AppState;

/// Response payload for a freshly enqueued job.
#[derive(Debug, Serialize)]
pub struct SubmittedJob {
    pub job_id: Uuid,
    pub status: JobStatus,
}

// ---------------------------------------------------------------------------
// Submit
// ---------------------------------------------------------------------------

/// POST /api/v1/jobs
///
/// Validate the command, allocate a `queued` registry entry, push it onto
/// the worker queue, and return the job id immediately (non-blocking).
pub async fn submit_job(
    State(state): State<AppState>,
    Json(body): Json<GenerateBody>,
) -> AppResult<impl IntoResponse> {
    let request = body.into_request(&state.config);
    let job = state.service.create_job(request).await?;

    state
        .queue
        .submit(job.id)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    tracing::info!(job_id = %job.id, "Job submitted");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: SubmittedJob {
                job_id: job.id,
                status: job.status,
            },
        }),
    ))
}

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// GET /api/v1/jobs/{id}
///
/// Current registry entry for a job: its status plus, once terminal, the
/// result payload or error message. Evicted and unknown ids are 404.
pub async fn get_job(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let job = state
        .service
        .registry()
        .get(job_id)
        .await
        .ok_or(CoreError::NotFound {
            entity: "Job",
            id: job_id,
        })?;

    Ok(Json(DataResponse { data: job }))
}
