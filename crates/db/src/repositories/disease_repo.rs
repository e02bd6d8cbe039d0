//! MongoDB-backed repository for the `diseases` collection.

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{doc, Bson, Document};
use mongodb::{Collection, Database};
use plantdx_core::query::{DiseaseSearch, FieldPattern, PlantTypeMatch};

use super::DiseaseStore;
use crate::error::DbError;
use crate::models::disease::{DiseaseDocument, DiseaseRecord, NewDisease};

/// Disease repository over a MongoDB collection.
#[derive(Clone)]
pub struct MongoDiseaseRepo {
    db: Database,
    collection: Collection<DiseaseDocument>,
}

impl MongoDiseaseRepo {
    pub fn new(db: &Database, collection: &str) -> Self {
        Self {
            db: db.clone(),
            collection: db.collection(collection),
        }
    }

    async fn fetch(&self, filter: Document) -> Result<Vec<DiseaseRecord>, DbError> {
        let docs: Vec<DiseaseDocument> = self.collection.find(filter).await?.try_collect().await?;
        tracing::debug!(count = docs.len(), collection = %self.collection.name(), "Fetched disease documents");
        docs.into_iter().map(DiseaseRecord::try_from).collect()
    }
}

/// `{ "$regex": <pattern>, "$options": "i" }` for a field pattern.
fn regex_clause(pattern: &FieldPattern) -> Document {
    doc! { "$regex": pattern.pattern(), "$options": "i" }
}

/// Filter document for an exact plant-type lookup.
pub fn plant_type_filter(filter: &PlantTypeMatch) -> Document {
    doc! { "plantType": regex_clause(filter.plant_type()) }
}

/// Filter document for a search; supplied criteria are AND-ed.
pub fn search_filter(search: &DiseaseSearch) -> Document {
    let mut filter = Document::new();
    if let Some(p) = search.plant_type() {
        filter.insert("plantType", regex_clause(p));
    }
    if let Some(p) = search.disease_type() {
        filter.insert("diseaseType", regex_clause(p));
    }
    filter
}

#[async_trait]
impl DiseaseStore for MongoDiseaseRepo {
    async fn insert_one(&self, disease: NewDisease) -> Result<DiseaseRecord, DbError> {
        let result = self.collection.insert_one(disease.to_document()).await?;
        let id = result
            .inserted_id
            .as_object_id()
            .ok_or(DbError::MissingInsertedId)?;
        Ok(DiseaseRecord::from_new(id, disease))
    }

    async fn insert_many(&self, diseases: Vec<NewDisease>) -> Result<Vec<ObjectId>, DbError> {
        let docs: Vec<DiseaseDocument> = diseases.iter().map(NewDisease::to_document).collect();
        let result = self.collection.insert_many(&docs).await?;

        (0..docs.len())
            .map(|index| {
                result
                    .inserted_ids
                    .get(&index)
                    .and_then(Bson::as_object_id)
                    .ok_or(DbError::MissingInsertedId)
            })
            .collect()
    }

    async fn find_all(&self) -> Result<Vec<DiseaseRecord>, DbError> {
        self.fetch(Document::new()).await
    }

    async fn find_by_plant_type(
        &self,
        filter: &PlantTypeMatch,
    ) -> Result<Vec<DiseaseRecord>, DbError> {
        self.fetch(plant_type_filter(filter)).await
    }

    async fn search(&self, search: &DiseaseSearch) -> Result<Vec<DiseaseRecord>, DbError> {
        self.fetch(search_filter(search)).await
    }

    async fn ping(&self) -> Result<(), DbError> {
        crate::health_check(&self.db).await
    }
}
