//! Wire payloads for the survey endpoints and their mapping to validated
//! commands.
//!
//! Inbound structs keep every field optional so that a missing field surfaces
//! as a [`ServiceError::Validation`] naming it, rather than as a generic
//! deserialization failure.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Survey, SurveyFields};
use crate::errors::ServiceError;

/// Body of create (POST) and update (PUT).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SurveyRequest {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default, alias = "surveyorEmail")]
    pub surveyor_email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    /// Accepted as a number or a numeric string; see [`coerce_age`].
    #[serde(default)]
    pub age: Option<Value>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub symptoms: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

/// Body of DELETE.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DeleteRequest {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default, alias = "surveyorEmail")]
    pub surveyor_email: Option<String>,
}

/// Outbound survey; persistence timestamps are not part of the contract.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SurveyResponse {
    pub id: i64,
    pub surveyor_email: String,
    pub name: String,
    pub age: i32,
    pub address: String,
    pub symptoms: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl From<Survey> for SurveyResponse {
    fn from(m: Survey) -> Self {
        Self {
            id: m.id,
            surveyor_email: m.surveyor_email,
            name: m.name,
            age: m.age,
            address: m.address,
            symptoms: m.symptoms,
            latitude: m.latitude,
            longitude: m.longitude,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewSurvey {
    pub surveyor_email: String,
    pub fields: SurveyFields,
}

/// Full replacement of an existing survey, scoped by `(id, surveyor_email)`.
#[derive(Clone, Debug, PartialEq)]
pub struct SurveyReplacement {
    pub id: i64,
    pub surveyor_email: String,
    pub fields: SurveyFields,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SurveyKey {
    pub id: i64,
    pub surveyor_email: String,
}

/// Non-blank string or a validation error naming `field`.
pub fn require(field: &str, value: Option<String>) -> Result<String, ServiceError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ServiceError::missing_field(field)),
    }
}

/// Integers pass through, numeric strings are parsed, everything else
/// (absent, null, fractional, out of range, garbage) becomes `0`.
pub fn coerce_age(value: Option<&Value>) -> i32 {
    match value {
        Some(Value::Number(n)) => n.as_i64().and_then(|v| i32::try_from(v).ok()).unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse::<i32>().unwrap_or(0),
        _ => 0,
    }
}

/// Parse an `id` query parameter.
pub fn parse_id(raw: &str) -> Result<i64, ServiceError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| ServiceError::Validation(format!("id must be an integer, got {raw:?}")))
}

impl SurveyRequest {
    fn into_owner_and_fields(self) -> Result<(String, SurveyFields), ServiceError> {
        let surveyor_email = require("surveyor_email", self.surveyor_email)?;
        let fields = SurveyFields {
            name: require("name", self.name)?,
            age: coerce_age(self.age.as_ref()),
            address: require("address", self.address)?,
            symptoms: require("symptoms", self.symptoms)?,
            latitude: self.latitude,
            longitude: self.longitude,
        };
        Ok((surveyor_email, fields))
    }

    /// Validate a create payload. A client-supplied `id` is ignored.
    pub fn into_new_survey(self) -> Result<NewSurvey, ServiceError> {
        let (surveyor_email, fields) = self.into_owner_and_fields()?;
        Ok(NewSurvey { surveyor_email, fields })
    }

    pub fn into_replacement(self) -> Result<SurveyReplacement, ServiceError> {
        let id = self.id.ok_or_else(|| ServiceError::missing_field("id"))?;
        let (surveyor_email, fields) = self.into_owner_and_fields()?;
        Ok(SurveyReplacement { id, surveyor_email, fields })
    }
}

impl DeleteRequest {
    pub fn into_key(self) -> Result<SurveyKey, ServiceError> {
        let id = self.id.ok_or_else(|| ServiceError::missing_field("id"))?;
        let surveyor_email = require("surveyor_email", self.surveyor_email)?;
        Ok(SurveyKey { id, surveyor_email })
    }
}
