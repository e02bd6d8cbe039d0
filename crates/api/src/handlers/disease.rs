//! Handlers for disease records.
//!
//! Each handler checks that the store is ready before touching its input,
//! then performs exactly one store operation.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use plantdx_core::disease::{DiseaseFields, BULK_ELEMENT_MESSAGE};
use plantdx_core::error::CoreError;
use plantdx_core::query::{DiseaseSearch, PlantTypeMatch};
use plantdx_db::models::disease::{BulkCreateDiseases, CreateDisease, NewDisease, SearchParams};
use serde::Serialize;
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::response::{DataPayload, EchoListPayload, Envelope, InsertedPayload, ListPayload};
use crate::state::AppState;

const STORE_FAILED: &str = "Failed to store disease data";
const RETRIEVE_FAILED: &str = "Failed to retrieve disease data";
const SEARCH_FAILED: &str = "Failed to search disease data";

const DISEASES_FIELD_REQUIRED: &str =
    "Please provide an array of diseases in the \"diseases\" field";
const DISEASES_FIELD_EMPTY: &str = "The \"diseases\" array must contain at least one record";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PlantTypeEcho {
    plant_type: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchEcho {
    search_params: SearchParams,
}

// ---------------------------------------------------------------------------
// Ingestion
// ---------------------------------------------------------------------------

/// POST /diseases
///
/// Store a single record. Returns the stored document with its id (201).
pub async fn create_disease(
    State(state): State<AppState>,
    payload: Result<Json<CreateDisease>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let store = state.store()?;
    let Json(input) = payload?;

    let fields = input.validate()?;
    let disease = NewDisease::from_fields(fields, state.config.confidence_policy, Utc::now());

    let record = store
        .insert_one(disease)
        .await
        .map_err(AppError::persistence(STORE_FAILED))?;

    tracing::info!(
        id = %record.id,
        plant_type = %record.plant_type,
        disease_type = %record.disease_type,
        "Disease record stored",
    );

    Ok((
        StatusCode::CREATED,
        Json(Envelope::ok(
            "Disease data stored successfully",
            DataPayload { data: record },
        )),
    ))
}

/// POST /diseases/bulk
///
/// Store a batch of records in one write. The batch is all-or-nothing: any
/// invalid element rejects the whole request before anything is written.
pub async fn bulk_create_diseases(
    State(state): State<AppState>,
    payload: Result<Json<BulkCreateDiseases>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let store = state.store()?;
    let Json(input) = payload?;

    let elements = match input.diseases {
        Some(Value::Array(elements)) => elements,
        _ => {
            return Err(AppError::Core(CoreError::Validation(
                DISEASES_FIELD_REQUIRED.to_string(),
            )))
        }
    };
    if elements.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            DISEASES_FIELD_EMPTY.to_string(),
        )));
    }

    let policy = state.config.confidence_policy;
    let now = Utc::now();
    let diseases = elements
        .into_iter()
        .enumerate()
        .map(|(index, element)| {
            bulk_element(index, element).map(|f| NewDisease::from_fields(f, policy, now))
        })
        .collect::<AppResult<Vec<_>>>()?;

    let ids = store
        .insert_many(diseases)
        .await
        .map_err(AppError::persistence(STORE_FAILED))?;

    tracing::info!(count = ids.len(), "Disease records stored");

    Ok((
        StatusCode::CREATED,
        Json(Envelope::ok(
            format!("{} disease records stored successfully", ids.len()),
            InsertedPayload {
                inserted_count: ids.len(),
                inserted_ids: ids.iter().map(|id| id.to_hex()).collect(),
            },
        )),
    ))
}

/// Validate one element of a bulk payload.
///
/// Failures are reported as persistence errors: the bulk endpoint does not
/// distinguish a bad element from a failed write.
fn bulk_element(index: usize, element: Value) -> AppResult<DiseaseFields> {
    let invalid = |reason: String| AppError::Persistence {
        message: STORE_FAILED,
        detail: format!("{BULK_ELEMENT_MESSAGE} (element {index}: {reason})"),
    };

    let input: CreateDisease =
        serde_json::from_value(element).map_err(|e| invalid(e.to_string()))?;
    input.validate().map_err(|e| invalid(e.to_string()))
}

// ---------------------------------------------------------------------------
// Retrieval
// ---------------------------------------------------------------------------

/// GET /diseases
pub async fn list_diseases(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let store = state.store()?;

    let diseases = store
        .find_all()
        .await
        .map_err(AppError::persistence(RETRIEVE_FAILED))?;

    Ok(Json(Envelope::ok(
        "Disease data retrieved successfully",
        ListPayload::new(diseases),
    )))
}

/// GET /diseases/plant/{plant_type}
///
/// Case-insensitive, whole-string match on `plantType`. No match is an
/// empty list, not an error.
pub async fn diseases_by_plant_type(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> AppResult<impl IntoResponse> {
    let store = state.store()?;
    let Path(plant_type) = path?;

    let filter = PlantTypeMatch::new(&plant_type)?;
    let diseases = store
        .find_by_plant_type(&filter)
        .await
        .map_err(AppError::persistence(RETRIEVE_FAILED))?;

    tracing::debug!(%plant_type, count = diseases.len(), "Plant type lookup");

    Ok(Json(Envelope::ok(
        format!("Disease data for {plant_type} retrieved successfully"),
        EchoListPayload {
            echo: PlantTypeEcho { plant_type },
            list: ListPayload::new(diseases),
        },
    )))
}

/// GET /diseases/search?plantType=&diseaseType=
///
/// Case-insensitive substring match on each supplied field, AND-ed.
pub async fn search_diseases(
    State(state): State<AppState>,
    query: Result<Query<SearchParams>, QueryRejection>,
) -> AppResult<impl IntoResponse> {
    let store = state.store()?;
    let Query(params) = query?;

    let search = DiseaseSearch::new(params.plant_type.as_deref(), params.disease_type.as_deref())?;
    let diseases = store
        .search(&search)
        .await
        .map_err(AppError::persistence(SEARCH_FAILED))?;

    tracing::debug!(?params, count = diseases.len(), "Disease search");

    Ok(Json(Envelope::ok(
        "Search completed successfully",
        EchoListPayload {
            echo: SearchEcho {
                search_params: params,
            },
            list: ListPayload::new(diseases),
        },
    )))
}
