use std::fmt;
use std::str::FromStr;

use axum::http::HeaderValue;
use plantdx_core::confidence::ConfidencePolicy;
use plantdx_db::ConnectionSettings;

/// Errors raised while reading configuration from the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{var} has invalid value '{value}': {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Which [`DiseaseStore`](plantdx_db::repositories::DiseaseStore) backs the server.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StoreBackend {
    #[default]
    Mongo,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mongo" | "mongodb" => Ok(Self::Mongo),
            "memory" => Ok(Self::Memory),
            other => Err(format!("unknown store backend '{other}'")),
        }
    }
}

/// Output format of the tracing fmt layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "pretty" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown log format '{other}'")),
        }
    }
}

/// Allowed CORS origins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsOrigins {
    Any,
    List(Vec<HeaderValue>),
}

/// Server configuration loaded from environment variables.
///
/// All fields except the database credentials have defaults suitable for
/// local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `5000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: CorsOrigins,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// How stored confidence values are derived.
    pub confidence_policy: ConfidencePolicy,
    pub store_backend: StoreBackend,
    pub log_format: LogFormat,
    pub database: DatabaseConfig,
}

/// MongoDB connection details.
#[derive(Clone)]
pub struct DatabaseConfig {
    /// Full connection string; when set, user/cluster settings are ignored.
    pub uri: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub cluster: String,
    pub app_name: String,
    pub name: String,
    pub collection: String,
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("uri", &self.uri.as_ref().map(|_| "<redacted>"))
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("cluster", &self.cluster)
            .field("app_name", &self.app_name)
            .field("name", &self.name)
            .field("collection", &self.collection)
            .finish()
    }
}

impl DatabaseConfig {
    /// Resolve the driver connection settings.
    ///
    /// With `MONGODB_URI` the string is used as-is. Otherwise an SRV URI is
    /// built for `DB_CLUSTER` and `DB_USER`/`DB_PASS` are passed as a driver
    /// credential, so they need no escaping.
    pub fn connection_settings(&self) -> Result<ConnectionSettings, ConfigError> {
        if let Some(uri) = &self.uri {
            return Ok(ConnectionSettings {
                uri: uri.clone(),
                credential: None,
                database: self.name.clone(),
            });
        }

        let user = self.user.clone().ok_or(ConfigError::Missing("DB_USER"))?;
        let password = self.password.clone().ok_or(ConfigError::Missing("DB_PASS"))?;

        Ok(ConnectionSettings {
            uri: format!(
                "mongodb+srv://{}/?retryWrites=true&w=majority&appName={}",
                self.cluster, self.app_name
            ),
            credential: Some((user, password)),
            database: self.name.clone(),
        })
    }
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                        |
    /// |------------------------|--------------------------------|
    /// | `HOST`                 | `0.0.0.0`                      |
    /// | `PORT`                 | `5000`                         |
    /// | `CORS_ORIGINS`         | `*`                            |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                           |
    /// | `CONFIDENCE_POLICY`    | `preserve`                     |
    /// | `STORE_BACKEND`        | `mongo`                        |
    /// | `LOG_FORMAT`           | `text`                         |
    /// | `MONGODB_URI`          | (unset)                        |
    /// | `DB_USER`, `DB_PASS`   | (required for SRV connection)  |
    /// | `DB_CLUSTER`           | `cluster0.nz6fjje.mongodb.net` |
    /// | `DB_APP_NAME`          | `Cluster0`                     |
    /// | `DB_NAME`              | `plantDiseaseDB`               |
    /// | `DB_COLLECTION`        | `diseases`                     |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let host = var("HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port = parse_var(&var, "PORT", 5000u16)?;
        let request_timeout_secs = parse_var(&var, "REQUEST_TIMEOUT_SECS", 30u64)?;
        let confidence_policy = parse_var(&var, "CONFIDENCE_POLICY", ConfidencePolicy::default())?;
        let store_backend = parse_var(&var, "STORE_BACKEND", StoreBackend::default())?;
        let log_format = parse_var(&var, "LOG_FORMAT", LogFormat::default())?;
        let cors_origins = parse_cors_origins(var("CORS_ORIGINS").as_deref().unwrap_or("*"))?;

        let database = DatabaseConfig {
            uri: var("MONGODB_URI"),
            user: var("DB_USER"),
            password: var("DB_PASS"),
            cluster: var("DB_CLUSTER").unwrap_or_else(|| "cluster0.nz6fjje.mongodb.net".into()),
            app_name: var("DB_APP_NAME").unwrap_or_else(|| "Cluster0".into()),
            name: var("DB_NAME").unwrap_or_else(|| plantdx_db::DEFAULT_DATABASE.into()),
            collection: var("DB_COLLECTION")
                .unwrap_or_else(|| plantdx_db::DEFAULT_COLLECTION.into()),
        };

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            confidence_policy,
            store_backend,
            log_format,
            database,
        })
    }
}

fn parse_var<T, F>(var: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match var(key) {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            var: key,
            reason: e.to_string(),
            value,
        }),
    }
}

fn parse_cors_origins(raw: &str) -> Result<CorsOrigins, ConfigError> {
    let origins: Vec<&str> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    if origins.is_empty() || origins.contains(&"*") {
        return Ok(CorsOrigins::Any);
    }

    origins
        .into_iter()
        .map(|o| {
            o.parse::<HeaderValue>().map_err(|e| ConfigError::Invalid {
                var: "CORS_ORIGINS",
                value: o.to_string(),
                reason: e.to_string(),
            })
        })
        .collect::<Result<Vec<_>, _>>()
        .map(CorsOrigins::List)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use assert_matches::assert_matches;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 5000);
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.cors_origins, CorsOrigins::Any);
        assert_eq!(config.confidence_policy, ConfidencePolicy::Preserve);
        assert_eq!(config.store_backend, StoreBackend::Mongo);
        assert_eq!(config.log_format, LogFormat::Text);
        assert_eq!(config.database.name, "plantDiseaseDB");
        assert_eq!(config.database.collection, "diseases");
    }

    #[test]
    fn port_override() {
        assert_eq!(load(&[("PORT", "8080")]).unwrap().port, 8080);
    }

    #[test]
    fn invalid_port_is_rejected() {
        assert_matches!(
            load(&[("PORT", "eighty")]),
            Err(ConfigError::Invalid { var: "PORT", .. })
        );
    }

    #[test]
    fn cors_origin_list() {
        let config = load(&[("CORS_ORIGINS", "http://a.test, http://b.test")]).unwrap();
        assert_matches!(config.cors_origins, CorsOrigins::List(list) if list.len() == 2);
    }

    #[test]
    fn confidence_policy_override() {
        let config = load(&[("CONFIDENCE_POLICY", "randomize")]).unwrap();
        assert_eq!(config.confidence_policy, ConfidencePolicy::Randomize);
        assert!(load(&[("CONFIDENCE_POLICY", "maybe")]).is_err());
    }

    #[test]
    fn request_timeout_override() {
        let config = load(&[("REQUEST_TIMEOUT_SECS", "5")]).unwrap();
        assert_eq!(config.request_timeout_secs, 5);
        assert_matches!(
            load(&[("REQUEST_TIMEOUT_SECS", "-1")]),
            Err(ConfigError::Invalid { var: "REQUEST_TIMEOUT_SECS", .. })
        );
    }

    #[test]
    fn store_backend_override() {
        let backend = |v: &str| load(&[("STORE_BACKEND", v)]).map(|c| c.store_backend);
        assert_eq!(backend("memory").unwrap(), StoreBackend::Memory);
        assert_eq!(backend("MongoDB").unwrap(), StoreBackend::Mongo);
        assert_matches!(
            backend("postgres"),
            Err(ConfigError::Invalid { var: "STORE_BACKEND", .. })
        );
    }

    #[test]
    fn log_format_override() {
        let format = |v: &str| load(&[("LOG_FORMAT", v)]).map(|c| c.log_format);
        assert_eq!(format("json").unwrap(), LogFormat::Json);
        assert_eq!(format("JSON").unwrap(), LogFormat::Json);
        assert_eq!(format("text").unwrap(), LogFormat::Text);
        assert_matches!(
            format("xml"),
            Err(ConfigError::Invalid { var: "LOG_FORMAT", .. })
        );
    }

    #[test]
    fn srv_settings_carry_credentials_outside_the_uri() {
        let config = load(&[("DB_USER", "ann"), ("DB_PASS", "p@ss:word")]).unwrap();
        let settings = config.database.connection_settings().unwrap();

        assert_eq!(
            settings.uri,
            "mongodb+srv://cluster0.nz6fjje.mongodb.net/?retryWrites=true&w=majority&appName=Cluster0"
        );
        assert_eq!(
            settings.credential,
            Some(("ann".to_string(), "p@ss:word".to_string()))
        );
        assert_eq!(settings.database, "plantDiseaseDB");
    }

    #[test]
    fn missing_credentials_are_reported() {
        let config = load(&[("DB_USER", "ann")]).unwrap();
        assert_matches!(
            config.database.connection_settings(),
            Err(ConfigError::Missing("DB_PASS"))
        );
    }

    #[test]
    fn explicit_uri_wins() {
        let config = load(&[("MONGODB_URI", "mongodb://localhost:27017")]).unwrap();
        let settings = config.database.connection_settings().unwrap();
        assert_eq!(settings.uri, "mongodb://localhost:27017");
        assert!(settings.credential.is_none());
    }

    #[test]
    fn debug_output_redacts_password() {
        let config = load(&[("DB_USER", "ann"), ("DB_PASS", "hunter2")]).unwrap();
        assert!(!format!("{:?}", config.database).contains("hunter2"));
    }
}
