use axum::{
    http::StatusCode,
    routing::{get, MethodRouter},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{TraceLayer, DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, DefaultOnFailure},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;

use crate::errors::ApiError;
use crate::openapi::ApiDoc;
use crate::state::ServerState;

pub mod surveys;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn fallback() -> ApiError {
    ApiError::new(StatusCode::NOT_FOUND, "Not Found", "no such route")
}

async fn method_not_allowed() -> ApiError {
    ApiError::new(StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed", "method not supported on this route")
}

/// All five survey operations share one resource path.
fn survey_methods() -> MethodRouter<ServerState> {
    get(surveys::get)
        .post(surveys::create)
        .put(surveys::update)
        .delete(surveys::delete)
        .fallback(method_not_allowed)
}

/// Build the full application router: health, survey CRUD and API docs
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let api: Router<ServerState> = Router::new()
        .route("/health", get(health))
        .route("/surveys", survey_methods())
        // path used by the original mobile client
        .route("/surveys.php", survey_methods())
        .fallback(fallback);

    api.with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // 每次请求创建 span，包含方法和路径等，日志级别为 INFO
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(
                    DefaultOnRequest::new()
                        .level(Level::INFO),
                )
                // 响应返回时打点，包含状态码与耗时
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                // 失败（5xx 等）时以 ERROR 记录
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR),
                )
        )
}
