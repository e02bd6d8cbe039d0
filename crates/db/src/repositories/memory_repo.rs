//! In-memory disease repository.
//!
//! Applies the same match predicates as the MongoDB filters, evaluated in
//! process. Records are kept in insertion order.

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use plantdx_core::query::{DiseaseSearch, PlantTypeMatch};
use tokio::sync::RwLock;

use super::DiseaseStore;
use crate::error::DbError;
use crate::models::disease::{DiseaseRecord, NewDisease};

#[derive(Debug, Default)]
pub struct InMemoryDiseaseRepo {
    records: RwLock<Vec<DiseaseRecord>>,
}

impl InMemoryDiseaseRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    async fn select<F>(&self, predicate: F) -> Vec<DiseaseRecord>
    where
        F: Fn(&DiseaseRecord) -> bool,
    {
        self.records
            .read()
            .await
            .iter()
            .filter(|r| predicate(r))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl DiseaseStore for InMemoryDiseaseRepo {
    async fn insert_one(&self, disease: NewDisease) -> Result<DiseaseRecord, DbError> {
        let record = DiseaseRecord::from_new(ObjectId::new(), disease);
        self.records.write().await.push(record.clone());
        Ok(record)
    }

    async fn insert_many(&self, diseases: Vec<NewDisease>) -> Result<Vec<ObjectId>, DbError> {
        if diseases.is_empty() {
            return Err(DbError::Backend("Batch cannot be empty".into()));
        }

        let records: Vec<DiseaseRecord> = diseases
            .into_iter()
            .map(|d| DiseaseRecord::from_new(ObjectId::new(), d))
            .collect();
        let ids = records.iter().map(|r| r.id).collect();

        self.records.write().await.extend(records);
        Ok(ids)
    }

    async fn find_all(&self) -> Result<Vec<DiseaseRecord>, DbError> {
        Ok(self.records.read().await.clone())
    }

    async fn find_by_plant_type(
        &self,
        filter: &PlantTypeMatch,
    ) -> Result<Vec<DiseaseRecord>, DbError> {
        Ok(self.select(|r| filter.matches(&r.plant_type)).await)
    }

    async fn search(&self, search: &DiseaseSearch) -> Result<Vec<DiseaseRecord>, DbError> {
        Ok(self
            .select(|r| search.matches(&r.plant_type, &r.disease_type))
            .await)
    }

    async fn ping(&self) -> Result<(), DbError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use plantdx_core::confidence::ConfidencePolicy;
    use plantdx_core::disease::DiseaseFields;

    use super::*;

    fn new_disease(plant: &str, disease: &str) -> NewDisease {
        let fields = DiseaseFields::from_parts(Some(plant), Some(disease), Some("rest"), Some("90"))
            .unwrap();
        NewDisease::from_fields(fields, ConfidencePolicy::Preserve, Utc::now())
    }

    #[tokio::test]
    async fn insert_many_keeps_input_order() {
        let repo = InMemoryDiseaseRepo::new();
        let ids = repo
            .insert_many(vec![new_disease("Tomato", "Blight"), new_disease("Potato", "Scab")])
            .await
            .unwrap();

        let all = repo.find_all().await.unwrap();
        assert_eq!(ids, all.iter().map(|r| r.id).collect::<Vec<_>>());
        assert_eq!(all[1].plant_type, "Potato");
    }

    #[tokio::test]
    async fn empty_batch_is_rejected() {
        let repo = InMemoryDiseaseRepo::new();
        assert!(repo.insert_many(Vec::new()).await.is_err());
        assert!(repo.is_empty().await);
    }

    #[tokio::test]
    async fn plant_type_lookup_and_search_differ() {
        let repo = InMemoryDiseaseRepo::new();
        repo.insert_one(new_disease("Tomato", "Late Blight")).await.unwrap();
        repo.insert_one(new_disease("tomatoes", "Leaf Mold")).await.unwrap();
        repo.insert_one(new_disease("Potato", "Late Blight")).await.unwrap();

        let exact = repo
            .find_by_plant_type(&PlantTypeMatch::new("TOMATO").unwrap())
            .await
            .unwrap();
        assert_eq!(exact.len(), 1);
        assert_eq!(exact[0].plant_type, "Tomato");

        let fuzzy = repo
            .search(&DiseaseSearch::new(Some("tom"), None).unwrap())
            .await
            .unwrap();
        assert_eq!(fuzzy.len(), 2);

        let both = repo
            .search(&DiseaseSearch::new(Some("tom"), Some("blight")).unwrap())
            .await
            .unwrap();
        assert_eq!(both.len(), 1);
        assert_eq!(repo.len().await, 3);
    }
}
