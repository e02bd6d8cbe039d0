//! Match predicates for disease retrieval.
//!
//! Two distinct semantics are exposed:
//!
//! - [`PlantTypeMatch`]: case-insensitive, whole-string equality on `plantType`.
//! - [`DiseaseSearch`]: case-insensitive substring match on `plantType` and/or
//!   `diseaseType`, AND-ed together.
//!
//! Caller text is always escaped, so metacharacters match literally. Each
//! predicate yields a pattern suitable for a MongoDB `$regex` with the `i`
//! option, and can also be evaluated directly against a record's fields.

use regex::{Regex, RegexBuilder};

use crate::error::CoreError;

/// Message returned when a search is issued without any criteria.
pub const SEARCH_PARAMS_REQUIRED: &str =
    "Please provide at least one search parameter: plantType or diseaseType";

/// A case-insensitive regex compiled from escaped caller text.
#[derive(Debug, Clone)]
pub struct FieldPattern {
    pattern: String,
    regex: Regex,
}

impl FieldPattern {
    fn compile(pattern: String) -> Result<Self, CoreError> {
        let regex = RegexBuilder::new(&pattern)
            .case_insensitive(true)
            .build()
            .map_err(|e| CoreError::Validation(format!("Invalid match value: {e}")))?;
        Ok(Self { pattern, regex })
    }

    /// Whole-string, case-insensitive pattern.
    pub fn exact(value: &str) -> Result<Self, CoreError> {
        Self::compile(format!("^{}$", regex::escape(value)))
    }

    /// Substring, case-insensitive pattern.
    pub fn contains(value: &str) -> Result<Self, CoreError> {
        Self::compile(regex::escape(value))
    }

    /// Pattern text for a database-side regex (use with the `i` option).
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn is_match(&self, field: &str) -> bool {
        self.regex.is_match(field)
    }
}

/// Lookup by plant type: case-insensitive, whole-string equality.
#[derive(Debug, Clone)]
pub struct PlantTypeMatch {
    plant_type: FieldPattern,
}

impl PlantTypeMatch {
    pub fn new(plant_type: &str) -> Result<Self, CoreError> {
        Ok(Self {
            plant_type: FieldPattern::exact(plant_type)?,
        })
    }

    pub fn plant_type(&self) -> &FieldPattern {
        &self.plant_type
    }

    pub fn matches(&self, plant_type: &str) -> bool {
        self.plant_type.is_match(plant_type)
    }
}

/// Fuzzy search over `plantType` and `diseaseType`.
///
/// At least one criterion is always present.
#[derive(Debug, Clone)]
pub struct DiseaseSearch {
    plant_type: Option<FieldPattern>,
    disease_type: Option<FieldPattern>,
}

impl DiseaseSearch {
    /// Build a search from optional query values. Empty strings are treated
    /// as absent; with nothing left the search is rejected.
    pub fn new(plant_type: Option<&str>, disease_type: Option<&str>) -> Result<Self, CoreError> {
        let plant_type = plant_type.filter(|v| !v.is_empty());
        let disease_type = disease_type.filter(|v| !v.is_empty());

        if plant_type.is_none() && disease_type.is_none() {
            return Err(CoreError::Validation(SEARCH_PARAMS_REQUIRED.to_string()));
        }

        Ok(Self {
            plant_type: plant_type.map(FieldPattern::contains).transpose()?,
            disease_type: disease_type.map(FieldPattern::contains).transpose()?,
        })
    }

    pub fn plant_type(&self) -> Option<&FieldPattern> {
        self.plant_type.as_ref()
    }

    pub fn disease_type(&self) -> Option<&FieldPattern> {
        self.disease_type.as_ref()
    }

    /// True when every supplied criterion matches.
    pub fn matches(&self, plant_type: &str, disease_type: &str) -> bool {
        self.plant_type.as_ref().is_none_or(|p| p.is_match(plant_type))
            && self
                .disease_type
                .as_ref()
                .is_none_or(|p| p.is_match(disease_type))
    }
}
