use sea_orm::{entity::prelude::*, QueryOrder, Set, DatabaseConnection, ActiveModelTrait, EntityTrait};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "survey")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub surveyor_email: String,
    pub name: String,
    pub age: i32,
    pub address: String,
    pub symptoms: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// The replaceable part of a survey: everything except `id` and owner.
#[derive(Clone, Debug, PartialEq)]
pub struct SurveyFields {
    pub name: String,
    pub age: i32,
    pub address: String,
    pub symptoms: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

pub fn validate_required(field: &str, value: &str) -> Result<(), errors::ModelError> {
    if value.trim().is_empty() {
        return Err(errors::ModelError::Validation(format!("{field} is required")));
    }
    Ok(())
}

pub fn validate_fields(fields: &SurveyFields) -> Result<(), errors::ModelError> {
    validate_required("name", &fields.name)?;
    validate_required("address", &fields.address)?;
    validate_required("symptoms", &fields.symptoms)?;
    Ok(())
}

pub async fn create(
    db: &DatabaseConnection,
    surveyor_email: &str,
    fields: &SurveyFields,
) -> Result<Model, errors::ModelError> {
    validate_required("surveyor_email", surveyor_email)?;
    validate_fields(fields)?;

    let now = Utc::now().into();
    let am = ActiveModel {
        surveyor_email: Set(surveyor_email.to_string()),
        name: Set(fields.name.clone()),
        age: Set(fields.age),
        address: Set(fields.address.clone()),
        symptoms: Set(fields.symptoms.clone()),
        latitude: Set(fields.latitude),
        longitude: Set(fields.longitude),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}

pub async fn list_by_owner(db: &DatabaseConnection, surveyor_email: &str) -> Result<Vec<Model>, errors::ModelError> {
    let rows = Entity::find()
        .filter(Column::SurveyorEmail.eq(surveyor_email))
        .order_by_asc(Column::Id)
        .all(db)
        .await?;
    Ok(rows)
}

pub async fn find_owned(db: &DatabaseConnection, id: i64, surveyor_email: &str) -> Result<Option<Model>, errors::ModelError> {
    let found = Entity::find_by_id(id)
        .filter(Column::SurveyorEmail.eq(surveyor_email))
        .one(db)
        .await?;
    Ok(found)
}

/// Replace all fields of the survey `(id, owner)` in a single statement.
/// `id` and `surveyor_email` are only used as the filter and never written.
/// Returns whether a row matched.
pub async fn replace_owned(
    db: &DatabaseConnection,
    id: i64,
    surveyor_email: &str,
    fields: &SurveyFields,
) -> Result<bool, errors::ModelError> {
    validate_fields(fields)?;

    let changes = ActiveModel {
        name: Set(fields.name.clone()),
        age: Set(fields.age),
        address: Set(fields.address.clone()),
        symptoms: Set(fields.symptoms.clone()),
        latitude: Set(fields.latitude),
        longitude: Set(fields.longitude),
        updated_at: Set(Utc::now().into()),
        ..Default::default()
    };
    let res = Entity::update_many()
        .set(changes)
        .filter(Column::Id.eq(id))
        .filter(Column::SurveyorEmail.eq(surveyor_email))
        .exec(db)
        .await?;
    Ok(res.rows_affected > 0)
}

/// Hard delete scoped by owner; returns whether a row was removed.
pub async fn delete_owned(db: &DatabaseConnection, id: i64, surveyor_email: &str) -> Result<bool, errors::ModelError> {
    let res = Entity::delete_many()
        .filter(Column::Id.eq(id))
        .filter(Column::SurveyorEmail.eq(surveyor_email))
        .exec(db)
        .await?;
    Ok(res.rows_affected > 0)
}

impl Model {
    pub fn fields(&self) -> SurveyFields {
        SurveyFields {
            name: self.name.clone(),
            age: self.age,
            address: self.address.clone(),
            symptoms: self.symptoms.clone(),
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}
