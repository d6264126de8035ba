/// Trait for loading service configuration from environment variables.
///
/// Implementors derive `serde::Deserialize`; field names map to upper-case
/// env vars (`database_url` ← `DATABASE_URL`). A `.env` file in the working
/// directory is read first when present, without overriding variables that are
/// already set.
pub trait Config: Sized + serde::de::DeserializeOwned {
    /// Load configuration, reporting the first missing or malformed variable.
    fn try_from_env() -> Result<Self, envy::Error> {
        // A missing .env file is normal outside local development.
        let _ = dotenvy::dotenv();
        envy::from_env()
    }

    /// Load configuration or abort startup.
    ///
    /// # Panics
    ///
    /// Panics if any required env var is missing or cannot be deserialized.
    fn from_env() -> Self {
        match Self::try_from_env() {
            Ok(config) => config,
            Err(e) => panic!("failed to load config from environment: {e}"),
        }
    }
}
