//! Route definitions for disease records.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::disease;
use crate::state::AppState;

/// ```text
/// GET    /diseases                        -> list_diseases
/// POST   /diseases                        -> create_disease
/// POST   /diseases/bulk                   -> bulk_create_diseases
/// GET    /diseases/plant/{plant_type}     -> diseases_by_plant_type
/// GET    /diseases/search                 -> search_diseases
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/diseases",
            get(disease::list_diseases).post(disease::create_disease),
        )
        .route("/diseases/bulk", post(disease::bulk_create_diseases))
        .route(
            "/diseases/plant/{plant_type}",
            get(disease::diseases_by_plant_type),
        )
        .route("/diseases/search", get(disease::search_diseases))
}
