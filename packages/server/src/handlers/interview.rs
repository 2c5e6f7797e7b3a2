use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use common::InterviewResult;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::models::interview::*;
use crate::state::AppState;

/// Score an interview.
#[utoipa::path(
    post,
    path = "/interviews/{public_id}/result",
    tag = "Interviews",
    operation_id = "scoreInterview",
    summary = "Score an interview",
    description = "Sends the interview's questions and answer videos to the scoring service, merges the evaluation and stores it. Re-scoring overwrites the previous result.",
    params(("public_id" = String, Path, description = "Interview public ID")),
    responses(
        (status = 201, description = "Interview scored", body = InterviewResult),
        (status = 404, description = "Interview not found (NOT_FOUND)", body = ErrorBody),
        (status = 422, description = "Scoring service rejected the input (SCORING_REJECTED)", body = ErrorBody),
        (status = 502, description = "Scoring service unavailable (SCORING_UNAVAILABLE)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn score_interview(
    State(state): State<AppState>,
    Path(public_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let result = state.orchestrator.score_interview(&public_id).await?;
    Ok((StatusCode::CREATED, Json(result)))
}

#[utoipa::path(
    get,
    path = "/interviews",
    tag = "Interviews",
    operation_id = "listInterviews",
    summary = "List interviews",
    description = "Returns every interview with its last stored result. Interviews never scored have no questions and a score of 0.",
    responses(
        (status = 200, description = "List of interviews", body = InterviewListResponse),
    ),
)]
#[instrument(skip(state))]
pub async fn list_interviews(
    State(state): State<AppState>,
) -> Result<Json<InterviewListResponse>, AppError> {
    let interviews = state.orchestrator.list_interviews().await?;
    Ok(Json(InterviewListResponse::from(interviews)))
}

#[utoipa::path(
    get,
    path = "/interviews/{public_id}",
    tag = "Interviews",
    operation_id = "getInterview",
    summary = "Get an interview",
    description = "Returns the interview's question set with attached videos and the last stored evaluation.",
    params(("public_id" = String, Path, description = "Interview public ID")),
    responses(
        (status = 200, description = "Interview details", body = InterviewResult),
        (status = 404, description = "Interview not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_interview(
    State(state): State<AppState>,
    Path(public_id): Path<String>,
) -> Result<Json<InterviewResult>, AppError> {
    let result = state.orchestrator.get_interview(&public_id).await?;
    Ok(Json(result))
}

#[utoipa::path(
    post,
    path = "/questions/{public_id}/video",
    tag = "Interviews",
    operation_id = "attachVideo",
    summary = "Attach an answer video",
    description = "Records the storage location of the candidate's answer to a question. Uploading again replaces the previous video.",
    params(("public_id" = String, Path, description = "Question public ID")),
    request_body = AttachVideoRequest,
    responses(
        (status = 204, description = "Video attached"),
        (status = 400, description = "Empty location or ambiguous question (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Question not part of the interview (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(interview_id = ?payload.interview_public_id))]
pub async fn attach_video(
    State(state): State<AppState>,
    Path(public_id): Path<String>,
    AppJson(payload): AppJson<AttachVideoRequest>,
) -> Result<StatusCode, AppError> {
    state
        .orchestrator
        .attach_video(
            &public_id,
            payload.interview_public_id.as_deref(),
            &payload.video,
        )
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
