//! Persistence layer for disease records.
//!
//! Provides the [`DiseaseStore`](repositories::DiseaseStore) seam the API
//! talks to, its MongoDB implementation, and an in-memory implementation
//! for local runs and tests.

pub mod error;
pub mod models;
pub mod repositories;

use mongodb::bson::doc;
use mongodb::options::{ClientOptions, Credential, ServerApi, ServerApiVersion};
use mongodb::{Client, Database};

pub use error::DbError;

/// Default database name.
pub const DEFAULT_DATABASE: &str = "plantDiseaseDB";

/// Default collection holding disease records.
pub const DEFAULT_COLLECTION: &str = "diseases";

/// Everything needed to open the MongoDB connection.
#[derive(Debug, Clone)]
pub struct ConnectionSettings {
    /// Connection string, without credentials when `credential` is set.
    pub uri: String,
    /// Username and password applied through the driver rather than the URI.
    pub credential: Option<(String, String)>,
    /// Database holding the collection.
    pub database: String,
}

/// Create a client from `settings` and return a handle to its database.
///
/// The client pins Stable API v1 in strict mode. No network round trip
/// happens here beyond SRV resolution; call [`health_check`] to verify the
/// deployment is reachable.
pub async fn connect(settings: &ConnectionSettings) -> Result<Database, DbError> {
    let mut options = ClientOptions::parse(&settings.uri).await?;

    if let Some((username, password)) = &settings.credential {
        options.credential = Some(
            Credential::builder()
                .username(username.clone())
                .password(password.clone())
                .build(),
        );
    }

    options.server_api = Some(
        ServerApi::builder()
            .version(ServerApiVersion::V1)
            .strict(true)
            .deprecation_errors(true)
            .build(),
    );

    let client = Client::with_options(options)?;
    Ok(client.database(&settings.database))
}

/// Ping the deployment.
pub async fn health_check(db: &Database) -> Result<(), DbError> {
    db.run_command(doc! { "ping": 1 }).await?;
    Ok(())
}
