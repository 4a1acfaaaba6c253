use std::sync::Arc;

use sea_orm::DatabaseConnection;
use service::survey::{
    repository::{SeaOrmSurveyRepository, SurveyRepository},
    service::SurveyService,
};

/// Shared handler state; cloned per request.
#[derive(Clone)]
pub struct ServerState {
    pub surveys: Arc<SurveyService<dyn SurveyRepository>>,
}

impl ServerState {
    /// Wire the SeaORM repository over an open connection pool.
    pub fn from_db(db: DatabaseConnection) -> Self {
        let repo: Arc<dyn SurveyRepository> = Arc::new(SeaOrmSurveyRepository { db });
        Self::with_repository(repo)
    }

    pub fn with_repository(repo: Arc<dyn SurveyRepository>) -> Self {
        Self { surveys: Arc::new(SurveyService::new(repo)) }
    }
}
