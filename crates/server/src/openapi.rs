use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct SurveyDoc {
    pub id: i64,
    pub surveyor_email: String,
    pub name: String,
    pub age: i32,
    pub address: String,
    pub symptoms: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Create ignores `id`; update requires it. `age` may also be a numeric string.
#[derive(ToSchema)]
pub struct SurveyRequestDoc {
    pub id: Option<i64>,
    pub surveyor_email: String,
    pub name: String,
    pub age: Option<i32>,
    pub address: String,
    pub symptoms: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(ToSchema)]
pub struct DeleteRequestDoc { pub id: i64, pub surveyor_email: String }

#[derive(ToSchema)]
pub struct SurveyEnvelopeDoc { pub success: bool, pub data: SurveyDoc }

#[derive(ToSchema)]
pub struct SurveyListEnvelopeDoc { pub success: bool, pub data: Vec<SurveyDoc> }

#[derive(ToSchema)]
pub struct DoneEnvelopeDoc { pub success: bool, pub message: String }

#[derive(ToSchema)]
pub struct FailureEnvelopeDoc { pub success: bool, pub error: String, pub message: String }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::surveys::get,
        crate::routes::surveys::create,
        crate::routes::surveys::update,
        crate::routes::surveys::delete,
    ),
    components(
        schemas(
            HealthResponse,
            SurveyDoc,
            SurveyRequestDoc,
            DeleteRequestDoc,
            SurveyEnvelopeDoc,
            SurveyListEnvelopeDoc,
            DoneEnvelopeDoc,
            FailureEnvelopeDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "surveys")
    )
)]
pub struct ApiDoc;
