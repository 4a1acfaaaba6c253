use std::sync::Arc;
use tracing::{info, instrument};

use super::mapper::{NewSurvey, SurveyKey, SurveyReplacement};
use super::repository::SurveyRepository;
use super::Survey;
use crate::errors::ServiceError;

/// Survey business service independent of web framework.
///
/// Owner scoping is enforced here and in the repository: a survey owned by
/// another email is reported as not found, never as forbidden.
pub struct SurveyService<R: SurveyRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: SurveyRepository + ?Sized> SurveyService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// All surveys of one owner, in ascending id order. Unknown owners get an
    /// empty list.
    ///
    /// # Examples
    /// ```
    /// use service::survey::{service::SurveyService, repository::mock::MockSurveyRepository};
    /// use std::sync::Arc;
    /// let svc = SurveyService::new(Arc::new(MockSurveyRepository::default()));
    /// let list = tokio_test::block_on(svc.list_by_owner("nobody@example.com")).unwrap();
    /// assert!(list.is_empty());
    /// ```
    #[instrument(skip(self))]
    pub async fn list_by_owner(&self, surveyor_email: &str) -> Result<Vec<Survey>, ServiceError> {
        if surveyor_email.trim().is_empty() {
            return Err(ServiceError::missing_field("surveyor_email"));
        }
        self.repo.list_by_owner(surveyor_email).await
    }

    #[instrument(skip(self))]
    pub async fn get_one(&self, id: i64, surveyor_email: &str) -> Result<Survey, ServiceError> {
        if surveyor_email.trim().is_empty() {
            return Err(ServiceError::missing_field("surveyor_email"));
        }
        self.repo
            .get_owned(id, surveyor_email)
            .await?
            .ok_or_else(|| ServiceError::not_found("survey"))
    }

    /// Persist a new survey; the id is assigned by storage.
    ///
    /// # Examples
    /// ```
    /// use service::survey::{service::SurveyService, repository::mock::MockSurveyRepository};
    /// use service::survey::{mapper::NewSurvey, SurveyFields};
    /// use std::sync::Arc;
    /// let svc = SurveyService::new(Arc::new(MockSurveyRepository::default()));
    /// let fields = SurveyFields { name: "Jo".into(), age: 30, address: "Jl. X".into(), symptoms: "fever".into(), latitude: None, longitude: None };
    /// let created = tokio_test::block_on(svc.create(NewSurvey { surveyor_email: "a@x.com".into(), fields })).unwrap();
    /// assert_eq!(created.id, 1);
    /// let found = tokio_test::block_on(svc.get_one(created.id, "a@x.com")).unwrap();
    /// assert_eq!(found, created);
    /// ```
    #[instrument(skip(self, input), fields(surveyor_email = %input.surveyor_email))]
    pub async fn create(&self, input: NewSurvey) -> Result<Survey, ServiceError> {
        let created = self.repo.create(&input.surveyor_email, &input.fields).await?;
        info!(id = created.id, surveyor_email = %created.surveyor_email, "survey_created");
        Ok(created)
    }

    /// Replace every field except `id` and owner. Fails with `NotFound` when
    /// `(id, surveyor_email)` matches nothing; nothing is written in that case.
    #[instrument(skip(self, input), fields(id = input.id, surveyor_email = %input.surveyor_email))]
    pub async fn update(&self, input: SurveyReplacement) -> Result<(), ServiceError> {
        let replaced = self.repo.replace_owned(input.id, &input.surveyor_email, &input.fields).await?;
        if !replaced {
            return Err(ServiceError::not_found("survey"));
        }
        info!(id = input.id, "survey_updated");
        Ok(())
    }

    /// Hard delete scoped by owner. A second delete of the same id reports
    /// `NotFound`.
    #[instrument(skip(self, key), fields(id = key.id, surveyor_email = %key.surveyor_email))]
    pub async fn delete(&self, key: SurveyKey) -> Result<(), ServiceError> {
        let deleted = self.repo.delete_owned(key.id, &key.surveyor_email).await?;
        if !deleted {
            return Err(ServiceError::not_found("survey"));
        }
        info!(id = key.id, "survey_deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::survey::repository::mock::MockSurveyRepository;
    use crate::survey::SurveyFields;
    use std::collections::BTreeSet;

    fn fields(name: &str) -> SurveyFields {
        SurveyFields {
            name: name.into(),
            age: 30,
            address: "Jl. X".into(),
            symptoms: "fever".into(),
            latitude: Some(1.5),
            longitude: Some(2.5),
        }
    }

    fn new_survey(email: &str, name: &str) -> NewSurvey {
        NewSurvey { surveyor_email: email.into(), fields: fields(name) }
    }

    fn setup() -> (Arc<MockSurveyRepository>, SurveyService<MockSurveyRepository>) {
        let repo = Arc::new(MockSurveyRepository::default());
        (Arc::clone(&repo), SurveyService::new(repo))
    }

    #[tokio::test]
    async fn created_surveys_are_immediately_readable() -> Result<(), ServiceError> {
        let (_, svc) = setup();
        let mut ids = BTreeSet::new();
        for name in ["a", "b", "c"] {
            let created = svc.create(new_survey("a@x.com", name)).await?;
            assert!(ids.insert(created.id));
            assert_eq!(svc.get_one(created.id, "a@x.com").await?, created);
        }
        Ok(())
    }

    #[tokio::test]
    async fn list_returns_exactly_the_owners_live_surveys() -> Result<(), ServiceError> {
        let (_, svc) = setup();
        let a1 = svc.create(new_survey("a@x.com", "a1")).await?;
        let a2 = svc.create(new_survey("a@x.com", "a2")).await?;
        let a3 = svc.create(new_survey("a@x.com", "a3")).await?;
        svc.create(new_survey("b@y.com", "b1")).await?;
        svc.delete(SurveyKey { id: a2.id, surveyor_email: "a@x.com".into() }).await?;

        let ids: BTreeSet<i64> = svc.list_by_owner("a@x.com").await?.into_iter().map(|s| s.id).collect();
        assert_eq!(ids, BTreeSet::from([a1.id, a3.id]));
        assert!(svc.list_by_owner("c@z.com").await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn foreign_owner_gets_not_found() -> Result<(), ServiceError> {
        let (_, svc) = setup();
        let a = svc.create(new_survey("a@x.com", "Jo")).await?;
        assert!(matches!(svc.get_one(a.id, "b@y.com").await, Err(ServiceError::NotFound(_))));
        assert!(matches!(svc.get_one(a.id + 1, "a@x.com").await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn failed_updates_leave_storage_unchanged() -> Result<(), ServiceError> {
        let (repo, svc) = setup();
        let a = svc.create(new_survey("a@x.com", "Jo")).await?;
        svc.create(new_survey("b@y.com", "Bo")).await?;
        let before = repo.snapshot()?;

        let foreign = SurveyReplacement { id: a.id, surveyor_email: "b@y.com".into(), fields: fields("Mallory") };
        assert!(matches!(svc.update(foreign).await, Err(ServiceError::NotFound(_))));
        let missing = SurveyReplacement { id: 999, surveyor_email: "a@x.com".into(), fields: fields("Ghost") };
        assert!(matches!(svc.update(missing).await, Err(ServiceError::NotFound(_))));

        assert_eq!(repo.snapshot()?, before);
        Ok(())
    }

    #[tokio::test]
    async fn update_preserves_id_and_owner() -> Result<(), ServiceError> {
        let (_, svc) = setup();
        let a = svc.create(new_survey("a@x.com", "Jo")).await?;
        let mut next = fields("Joanna");
        next.latitude = None;
        next.longitude = None;
        svc.update(SurveyReplacement { id: a.id, surveyor_email: "a@x.com".into(), fields: next.clone() }).await?;

        let stored = svc.get_one(a.id, "a@x.com").await?;
        assert_eq!(stored.id, a.id);
        assert_eq!(stored.surveyor_email, "a@x.com");
        assert_eq!(stored.fields(), next);
        Ok(())
    }

    #[tokio::test]
    async fn delete_twice_reports_not_found() -> Result<(), ServiceError> {
        let (_, svc) = setup();
        let a = svc.create(new_survey("a@x.com", "Jo")).await?;
        let key = SurveyKey { id: a.id, surveyor_email: "a@x.com".into() };
        svc.delete(key.clone()).await?;
        assert!(matches!(svc.get_one(a.id, "a@x.com").await, Err(ServiceError::NotFound(_))));
        assert!(matches!(svc.delete(key).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn blank_owner_is_a_validation_error() {
        let (_, svc) = setup();
        assert!(matches!(svc.list_by_owner(" ").await, Err(ServiceError::Validation(_))));
        assert!(matches!(svc.get_one(1, "").await, Err(ServiceError::Validation(_))));
        assert!(matches!(svc.create(new_survey("", "Jo")).await, Err(ServiceError::Validation(_))));
    }
}
