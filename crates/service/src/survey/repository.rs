use async_trait::async_trait;
use sea_orm::DatabaseConnection;

use super::{Survey, SurveyFields};
use crate::errors::ServiceError;

/// Owner-scoped persistence for surveys.
///
/// Every lookup and mutation takes the owner email; rows owned by someone
/// else behave exactly like rows that do not exist.
#[async_trait]
pub trait SurveyRepository: Send + Sync {
    async fn list_by_owner(&self, surveyor_email: &str) -> Result<Vec<Survey>, ServiceError>;
    async fn get_owned(&self, id: i64, surveyor_email: &str) -> Result<Option<Survey>, ServiceError>;
    async fn create(&self, surveyor_email: &str, fields: &SurveyFields) -> Result<Survey, ServiceError>;
    /// Returns whether a row owned by `surveyor_email` was replaced.
    async fn replace_owned(&self, id: i64, surveyor_email: &str, fields: &SurveyFields) -> Result<bool, ServiceError>;
    /// Returns whether a row owned by `surveyor_email` was deleted.
    async fn delete_owned(&self, id: i64, surveyor_email: &str) -> Result<bool, ServiceError>;
}

/// SeaORM-backed repository implementation.
#[derive(Clone)]
pub struct SeaOrmSurveyRepository {
    pub db: DatabaseConnection,
}

#[async_trait]
impl SurveyRepository for SeaOrmSurveyRepository {
    async fn list_by_owner(&self, surveyor_email: &str) -> Result<Vec<Survey>, ServiceError> {
        Ok(models::survey::list_by_owner(&self.db, surveyor_email).await?)
    }

    async fn get_owned(&self, id: i64, surveyor_email: &str) -> Result<Option<Survey>, ServiceError> {
        Ok(models::survey::find_owned(&self.db, id, surveyor_email).await?)
    }

    async fn create(&self, surveyor_email: &str, fields: &SurveyFields) -> Result<Survey, ServiceError> {
        Ok(models::survey::create(&self.db, surveyor_email, fields).await?)
    }

    async fn replace_owned(&self, id: i64, surveyor_email: &str, fields: &SurveyFields) -> Result<bool, ServiceError> {
        Ok(models::survey::replace_owned(&self.db, id, surveyor_email, fields).await?)
    }

    async fn delete_owned(&self, id: i64, surveyor_email: &str) -> Result<bool, ServiceError> {
        Ok(models::survey::delete_owned(&self.db, id, surveyor_email).await?)
    }
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::Mutex;
    use chrono::Utc;

    #[derive(Default)]
    struct Rows {
        last_id: i64,
        by_id: BTreeMap<i64, Survey>,
    }

    #[derive(Default)]
    pub struct MockSurveyRepository {
        rows: Mutex<Rows>,
    }

    impl MockSurveyRepository {
        fn rows(&self) -> Result<std::sync::MutexGuard<'_, Rows>, ServiceError> {
            self.rows.lock().map_err(|_| ServiceError::Storage("mock repository poisoned".into()))
        }

        /// Every stored row regardless of owner.
        pub fn snapshot(&self) -> Result<Vec<Survey>, ServiceError> {
            Ok(self.rows()?.by_id.values().cloned().collect())
        }
    }

    #[async_trait]
    impl SurveyRepository for MockSurveyRepository {
        async fn list_by_owner(&self, surveyor_email: &str) -> Result<Vec<Survey>, ServiceError> {
            let rows = self.rows()?;
            Ok(rows.by_id.values().filter(|s| s.surveyor_email == surveyor_email).cloned().collect())
        }

        async fn get_owned(&self, id: i64, surveyor_email: &str) -> Result<Option<Survey>, ServiceError> {
            let rows = self.rows()?;
            Ok(rows.by_id.get(&id).filter(|s| s.surveyor_email == surveyor_email).cloned())
        }

        async fn create(&self, surveyor_email: &str, fields: &SurveyFields) -> Result<Survey, ServiceError> {
            models::survey::validate_required("surveyor_email", surveyor_email)?;
            models::survey::validate_fields(fields)?;
            let mut rows = self.rows()?;
            rows.last_id += 1;
            let now = Utc::now().into();
            let survey = Survey {
                id: rows.last_id,
                surveyor_email: surveyor_email.to_string(),
                name: fields.name.clone(),
                age: fields.age,
                address: fields.address.clone(),
                symptoms: fields.symptoms.clone(),
                latitude: fields.latitude,
                longitude: fields.longitude,
                created_at: now,
                updated_at: now,
            };
            rows.by_id.insert(survey.id, survey.clone());
            Ok(survey)
        }

        async fn replace_owned(&self, id: i64, surveyor_email: &str, fields: &SurveyFields) -> Result<bool, ServiceError> {
            models::survey::validate_fields(fields)?;
            let mut rows = self.rows()?;
            let Some(existing) = rows.by_id.get_mut(&id).filter(|s| s.surveyor_email == surveyor_email) else {
                return Ok(false);
            };
            existing.name = fields.name.clone();
            existing.age = fields.age;
            existing.address = fields.address.clone();
            existing.symptoms = fields.symptoms.clone();
            existing.latitude = fields.latitude;
            existing.longitude = fields.longitude;
            existing.updated_at = Utc::now().into();
            Ok(true)
        }

        async fn delete_owned(&self, id: i64, surveyor_email: &str) -> Result<bool, ServiceError> {
            let mut rows = self.rows()?;
            let owned = rows.by_id.get(&id).is_some_and(|s| s.surveyor_email == surveyor_email);
            if owned {
                rows.by_id.remove(&id);
            }
            Ok(owned)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;
    use std::collections::BTreeSet;
    use std::sync::Arc;

    fn fields(name: &str) -> SurveyFields {
        SurveyFields {
            name: name.into(),
            age: 30,
            address: "Jl. X".into(),
            symptoms: "fever".into(),
            latitude: None,
            longitude: None,
        }
    }

    #[tokio::test]
    async fn seaorm_repository_crud() -> Result<(), anyhow::Error> {
        let repo = SeaOrmSurveyRepository { db: get_db().await? };

        let a = repo.create("a@x.com", &fields("Jo")).await?;
        let found = repo.get_owned(a.id, "a@x.com").await?.unwrap();
        assert_eq!(found, a);
        assert!(repo.get_owned(a.id, "b@y.com").await?.is_none());

        assert!(repo.replace_owned(a.id, "a@x.com", &fields("Joe")).await?);
        assert_eq!(repo.get_owned(a.id, "a@x.com").await?.unwrap().name, "Joe");

        assert!(repo.delete_owned(a.id, "a@x.com").await?);
        assert!(!repo.delete_owned(a.id, "a@x.com").await?);
        assert!(repo.list_by_owner("a@x.com").await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn seaorm_repository_concurrent_creates_get_distinct_ids() -> Result<(), anyhow::Error> {
        let repo = Arc::new(SeaOrmSurveyRepository { db: get_db().await? });

        let mut handles = Vec::new();
        for i in 0..16 {
            let repo = Arc::clone(&repo);
            handles.push(tokio::spawn(async move {
                repo.create("a@x.com", &fields(&format!("n{i}"))).await
            }));
        }
        let mut ids = BTreeSet::new();
        for h in handles {
            ids.insert(h.await??.id);
        }
        assert_eq!(ids.len(), 16);
        assert_eq!(repo.list_by_owner("a@x.com").await?.len(), 16);
        Ok(())
    }

    #[tokio::test]
    async fn seaorm_repository_create_races_delete() -> Result<(), anyhow::Error> {
        let repo = Arc::new(SeaOrmSurveyRepository { db: get_db().await? });
        let victim = repo.create("a@x.com", &fields("victim")).await?;

        let creator = {
            let repo = Arc::clone(&repo);
            tokio::spawn(async move { repo.create("a@x.com", &fields("newcomer")).await })
        };
        let deleter = {
            let repo = Arc::clone(&repo);
            tokio::spawn(async move { repo.delete_owned(victim.id, "a@x.com").await })
        };
        let created = creator.await??;
        assert!(deleter.await??);

        let remaining = repo.list_by_owner("a@x.com").await?;
        assert_eq!(remaining, vec![created]);
        Ok(())
    }

    #[tokio::test]
    async fn mock_repository_matches_owner_scoping() -> Result<(), anyhow::Error> {
        let repo = mock::MockSurveyRepository::default();
        let a = repo.create("a@x.com", &fields("Jo")).await?;
        assert!(repo.get_owned(a.id, "b@y.com").await?.is_none());
        assert!(!repo.replace_owned(a.id, "b@y.com", &fields("X")).await?);
        assert!(!repo.delete_owned(a.id, "b@y.com").await?);
        assert_eq!(repo.snapshot()?, vec![a]);
        Ok(())
    }
}
