//! Required-field validation for incoming disease records.

use crate::error::CoreError;

/// Wire names of the required fields, in the order they are reported.
pub const REQUIRED_FIELDS: [&str; 4] = ["plantType", "diseaseType", "treatment", "confidence"];

/// Message used when an element of a bulk payload is incomplete.
pub const BULK_ELEMENT_MESSAGE: &str =
    "Each disease must have plantType, diseaseType, treatment, and confidence";

/// The four business fields of a disease record after trimming.
///
/// Constructing one guarantees every field is non-empty. `confidence` is
/// kept as supplied (trimmed); the confidence policy decides what is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiseaseFields {
    pub plant_type: String,
    pub disease_type: String,
    pub treatment: String,
    pub confidence: String,
}

impl DiseaseFields {
    /// Validate raw field values. Absent and whitespace-only values both
    /// count as missing.
    pub fn from_parts(
        plant_type: Option<&str>,
        disease_type: Option<&str>,
        treatment: Option<&str>,
        confidence: Option<&str>,
    ) -> Result<Self, CoreError> {
        let values = [plant_type, disease_type, treatment, confidence].map(required);

        match values {
            [Some(plant_type), Some(disease_type), Some(treatment), Some(confidence)] => Ok(Self {
                plant_type,
                disease_type,
                treatment,
                confidence,
            }),
            values => {
                let missing: Vec<&str> = REQUIRED_FIELDS
                    .iter()
                    .zip(&values)
                    .filter(|(_, v)| v.is_none())
                    .map(|(name, _)| *name)
                    .collect();
                Err(CoreError::Validation(format!(
                    "Missing required fields: {}",
                    missing.join(", ")
                )))
            }
        }
    }
}

fn required(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
}
