use axum::{
    extract::{rejection::{JsonRejection, QueryRejection}, Query, State},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use tracing::info;

use common::types::ApiResponse;
use service::survey::mapper::{self, DeleteRequest, SurveyRequest, SurveyResponse};

use crate::{errors::ApiError, state::ServerState};

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SurveyQuery {
    /// Owner email; every lookup is scoped by it
    pub surveyor_email: Option<String>,
    /// When present, return this single survey instead of the owner's list
    pub id: Option<String>,
}

#[utoipa::path(
    get, path = "/surveys", tag = "surveys",
    params(SurveyQuery),
    responses(
        (status = 200, description = "Owner's surveys, or the single survey when `id` is given", body = crate::openapi::SurveyListEnvelopeDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::FailureEnvelopeDoc),
        (status = 404, description = "Not Found", body = crate::openapi::FailureEnvelopeDoc)
    )
)]
pub async fn get(
    State(state): State<ServerState>,
    query: Result<Query<SurveyQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(q) = query?;
    let email = mapper::require("surveyor_email", q.surveyor_email)?;

    match q.id.as_deref().filter(|raw| !raw.trim().is_empty()) {
        Some(raw) => {
            let id = mapper::parse_id(raw)?;
            let survey = state.surveys.get_one(id, &email).await?;
            Ok(Json(ApiResponse::ok(SurveyResponse::from(survey))).into_response())
        }
        None => {
            let list = state.surveys.list_by_owner(&email).await?;
            info!(count = list.len(), "list surveys");
            let data: Vec<SurveyResponse> = list.into_iter().map(SurveyResponse::from).collect();
            Ok(Json(ApiResponse::ok(data)).into_response())
        }
    }
}

#[utoipa::path(
    post, path = "/surveys", tag = "surveys",
    request_body = crate::openapi::SurveyRequestDoc,
    responses(
        (status = 200, description = "Created; data carries the assigned id", body = crate::openapi::SurveyEnvelopeDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::FailureEnvelopeDoc),
        (status = 500, description = "Storage Error", body = crate::openapi::FailureEnvelopeDoc)
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<SurveyRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<SurveyResponse>>, ApiError> {
    let Json(req) = payload?;
    let input = req.into_new_survey()?;
    let created = state.surveys.create(input).await?;
    Ok(Json(ApiResponse::ok(created.into())))
}

#[utoipa::path(
    put, path = "/surveys", tag = "surveys",
    request_body = crate::openapi::SurveyRequestDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::DoneEnvelopeDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::FailureEnvelopeDoc),
        (status = 404, description = "Not Found", body = crate::openapi::FailureEnvelopeDoc)
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    payload: Result<Json<SurveyRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let Json(req) = payload?;
    let input = req.into_replacement()?;
    state.surveys.update(input).await?;
    Ok(Json(ApiResponse::done("survey updated")))
}

#[utoipa::path(
    delete, path = "/surveys", tag = "surveys",
    request_body = crate::openapi::DeleteRequestDoc,
    responses(
        (status = 200, description = "Deleted", body = crate::openapi::DoneEnvelopeDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::FailureEnvelopeDoc),
        (status = 404, description = "Not Found", body = crate::openapi::FailureEnvelopeDoc)
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    payload: Result<Json<DeleteRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let Json(req) = payload?;
    let key = req.into_key()?;
    state.surveys.delete(key).await?;
    Ok(Json(ApiResponse::done("survey deleted")))
}
