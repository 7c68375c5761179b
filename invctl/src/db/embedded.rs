//! Embedded PostgreSQL database support
//!
//! Runs a PostgreSQL server as a child of the application so the relational backend can be used
//! without provisioning a database. Binaries are fetched into the installation directory on first
//! start and reused afterwards. Only available with the `embedded-db` feature; without it
//! [`EmbeddedDatabase::start`] fails with an explanatory error.

#[cfg(feature = "embedded-db")]
use postgresql_embedded::{PostgreSQL, Settings, V16};
#[cfg(feature = "embedded-db")]
use std::path::PathBuf;
#[cfg(feature = "embedded-db")]
use tracing::{debug, info};

#[cfg(feature = "embedded-db")]
const DATABASE_NAME: &str = "invctl";

#[cfg(feature = "embedded-db")]
pub struct EmbeddedDatabase {
    postgres: PostgreSQL,
    connection_string: String,
}

#[cfg(feature = "embedded-db")]
impl EmbeddedDatabase {
    /// Create and start a new embedded PostgreSQL instance on an OS-assigned port.
    ///
    /// * `data_dir` - where binaries and data live (default: `$HOME/.invctl_data/postgres`)
    /// * `persistent` - keep data between restarts; otherwise the data directory is temporary
    pub async fn start(data_dir: Option<PathBuf>, persistent: bool) -> anyhow::Result<Self> {
        let data_dir = data_dir.unwrap_or_else(|| match std::env::home_dir() {
            Some(home) => home.join(".invctl_data").join("postgres"),
            None => PathBuf::from(".invctl_data/postgres"),
        });

        if persistent {
            debug!("Starting embedded PostgreSQL with data directory: {}", data_dir.display());
        } else {
            debug!("Starting ephemeral embedded PostgreSQL");
        }

        let settings = Settings {
            version: V16.clone(),
            port: 0,
            username: "postgres".to_string(),
            password: "password".to_string(),
            temporary: !persistent,
            installation_dir: data_dir.join("installation"),
            data_dir: data_dir.join("data"),
            ..Default::default()
        };

        let mut postgres = PostgreSQL::new(settings);

        postgres
            .setup()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to setup embedded PostgreSQL: {}", e))?;

        postgres
            .start()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to start embedded PostgreSQL: {}", e))?;

        let port = postgres.settings().port;

        // A persistent data directory already has the database after the first run
        let exists = postgres
            .database_exists(DATABASE_NAME)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to inspect database '{}': {}", DATABASE_NAME, e))?;
        if !exists {
            postgres
                .create_database(DATABASE_NAME)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to create database '{}': {}", DATABASE_NAME, e))?;
        }

        let connection_string = postgres.settings().url(DATABASE_NAME);

        info!("Embedded PostgreSQL started successfully on port {}", port);

        Ok(Self {
            postgres,
            connection_string,
        })
    }

    /// Get the connection string for this embedded database
    pub fn connection_string(&self) -> &str {
        &self.connection_string
    }

    /// Stop the embedded PostgreSQL instance
    pub async fn stop(self) -> anyhow::Result<()> {
        info!("Stopping embedded PostgreSQL...");
        self.postgres
            .stop()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to stop embedded PostgreSQL: {}", e))?;
        info!("Embedded PostgreSQL stopped");
        Ok(())
    }
}

#[cfg(not(feature = "embedded-db"))]
pub struct EmbeddedDatabase;

#[cfg(not(feature = "embedded-db"))]
impl EmbeddedDatabase {
    pub async fn start(_data_dir: Option<std::path::PathBuf>, _persistent: bool) -> anyhow::Result<Self> {
        anyhow::bail!(
            "Embedded database is configured but the feature is not enabled. \
             Rebuild with --features embedded-db to use embedded database."
        )
    }

    pub fn connection_string(&self) -> &str {
        ""
    }

    pub async fn stop(self) -> anyhow::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
#[cfg(not(feature = "embedded-db"))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_start_without_feature_explains_how_to_enable_it() {
        let err = EmbeddedDatabase::start(None, false).await.err().unwrap();
        assert!(err.to_string().contains("--features embedded-db"));
    }
}
