//! Repository layer for disease records.
//!
//! Handlers depend on the [`DiseaseStore`] trait object; the MongoDB
//! repository is used in production and the in-memory one in tests and
//! local runs without a database.

pub mod disease_repo;
pub mod memory_repo;

pub use disease_repo::MongoDiseaseRepo;
pub use memory_repo::InMemoryDiseaseRepo;

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use plantdx_core::query::{DiseaseSearch, PlantTypeMatch};

use crate::error::DbError;
use crate::models::disease::{DiseaseRecord, NewDisease};

/// Storage operations over the disease collection. Each call is a single
/// database operation.
#[async_trait]
pub trait DiseaseStore: Send + Sync {
    /// Insert one record and return it with its assigned id.
    async fn insert_one(&self, disease: NewDisease) -> Result<DiseaseRecord, DbError>;

    /// Insert a batch in one operation. Ids come back in input order.
    async fn insert_many(&self, diseases: Vec<NewDisease>) -> Result<Vec<ObjectId>, DbError>;

    /// Every stored record, unfiltered.
    async fn find_all(&self) -> Result<Vec<DiseaseRecord>, DbError>;

    /// Records whose `plantType` equals the given value, ignoring case.
    async fn find_by_plant_type(
        &self,
        filter: &PlantTypeMatch,
    ) -> Result<Vec<DiseaseRecord>, DbError>;

    /// Records matching every criterion of `search`.
    async fn search(&self, search: &DiseaseSearch) -> Result<Vec<DiseaseRecord>, DbError>;

    /// Verify the backend is reachable.
    async fn ping(&self) -> Result<(), DbError>;
}
