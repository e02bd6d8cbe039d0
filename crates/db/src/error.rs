/// Errors surfaced by a [`DiseaseStore`](crate::repositories::DiseaseStore).
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// An error from the MongoDB driver.
    #[error(transparent)]
    Mongo(#[from] mongodb::error::Error),

    /// The driver acknowledged an insert without an `ObjectId`.
    #[error("Database did not return an ObjectId for an inserted document")]
    MissingInsertedId,

    /// A document read back from the collection had no `_id`.
    #[error("Stored document is missing its _id")]
    MissingId,

    /// The backend refused the operation for a reason of its own.
    #[error("{0}")]
    Backend(String),
}
