//! Disease record models and DTOs.

use std::borrow::Cow;

use mongodb::bson::oid::ObjectId;
use plantdx_core::confidence::ConfidencePolicy;
use plantdx_core::disease::DiseaseFields;
use plantdx_core::error::CoreError;
use plantdx_core::types::Timestamp;
use serde::{Deserialize, Serialize};

use crate::error::DbError;

// ---------------------------------------------------------------------------
// Stored documents
// ---------------------------------------------------------------------------

/// A document in the `diseases` collection, in its BSON layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiseaseDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub plant_type: String,
    pub disease_type: String,
    pub treatment: String,
    pub confidence: String,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: Timestamp,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub updated_at: Timestamp,
}

/// A validated record ready to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDisease {
    pub plant_type: String,
    pub disease_type: String,
    pub treatment: String,
    pub confidence: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl NewDisease {
    /// Build an insertable record, resolving confidence through `policy`.
    /// Both timestamps are set to `now`.
    pub fn from_fields(fields: DiseaseFields, policy: ConfidencePolicy, now: Timestamp) -> Self {
        Self {
            confidence: policy.apply(&fields.confidence),
            plant_type: fields.plant_type,
            disease_type: fields.disease_type,
            treatment: fields.treatment,
            created_at: now,
            updated_at: now,
        }
    }

    /// The BSON document to insert. The database assigns `_id`.
    pub fn to_document(&self) -> DiseaseDocument {
        DiseaseDocument {
            id: None,
            plant_type: self.plant_type.clone(),
            disease_type: self.disease_type.clone(),
            treatment: self.treatment.clone(),
            confidence: self.confidence.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// A stored record as returned to API clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiseaseRecord {
    #[serde(serialize_with = "bson::serde_helpers::serialize_object_id_as_hex_string")]
    pub id: ObjectId,
    pub plant_type: String,
    pub disease_type: String,
    pub treatment: String,
    pub confidence: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl DiseaseRecord {
    pub fn from_new(id: ObjectId, disease: NewDisease) -> Self {
        Self {
            id,
            plant_type: disease.plant_type,
            disease_type: disease.disease_type,
            treatment: disease.treatment,
            confidence: disease.confidence,
            created_at: disease.created_at,
            updated_at: disease.updated_at,
        }
    }
}

impl TryFrom<DiseaseDocument> for DiseaseRecord {
    type Error = DbError;

    fn try_from(doc: DiseaseDocument) -> Result<Self, Self::Error> {
        Ok(Self {
            id: doc.id.ok_or(DbError::MissingId)?,
            plant_type: doc.plant_type,
            disease_type: doc.disease_type,
            treatment: doc.treatment,
            confidence: doc.confidence,
            created_at: doc.created_at,
            updated_at: doc.updated_at,
        })
    }
}

// ---------------------------------------------------------------------------
// DTOs (request payloads)
// ---------------------------------------------------------------------------

/// A confidence value as clients send it: `"87%"`, `"87"`, or `87`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ConfidenceValue {
    Text(String),
    Number(serde_json::Number),
}

impl ConfidenceValue {
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            Self::Text(s) => Cow::Borrowed(s),
            Self::Number(n) => Cow::Owned(n.to_string()),
        }
    }
}

/// DTO for creating a disease record. Every field is optional on the wire
/// so missing fields can be reported together.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDisease {
    pub plant_type: Option<String>,
    pub disease_type: Option<String>,
    pub treatment: Option<String>,
    pub confidence: Option<ConfidenceValue>,
}

impl CreateDisease {
    /// Check the required fields and return them trimmed.
    pub fn validate(&self) -> Result<DiseaseFields, CoreError> {
        let confidence = self.confidence.as_ref().map(ConfidenceValue::as_text);
        DiseaseFields::from_parts(
            self.plant_type.as_deref(),
            self.disease_type.as_deref(),
            self.treatment.as_deref(),
            confidence.as_deref(),
        )
    }
}

/// DTO for the bulk endpoint. `diseases` stays untyped so a wrong shape can
/// be told apart from an invalid element.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BulkCreateDiseases {
    pub diseases: Option<serde_json::Value>,
}

/// Query parameters for the search endpoint, echoed back in the response.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plant_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disease_type: Option<String>,
}
