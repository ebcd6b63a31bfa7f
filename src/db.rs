//! Database credentials and transaction scope.
//!
//! This module provides:
//! - [`Credentials`] read from an INI file (`config/creds.ini`, section `[mysql]`)
//! - [`Database`], a pooled connection over `sqlx`'s Any driver
//! - [`Database::with_transaction`], which commits when the body succeeds and
//!   rolls back when it fails
//!
//! # Example
//!
//! ```no_run
//! use toolbelt::db::{Database, DbError};
//!
//! # async fn example() -> Result<(), DbError> {
//! let db = Database::from_default_credentials().await?;
//! db.with_transaction(|conn| {
//!     Box::pin(async move {
//!         sqlx::query("UPDATE jobs SET done = 1 WHERE id = 7")
//!             .execute(&mut *conn)
//!             .await?;
//!         Ok::<_, DbError>(())
//!     })
//! })
//! .await?;
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use config::{Config, File, FileFormat};
use futures_util::future::BoxFuture;
use serde::Deserialize;
use sqlx::{AnyConnection, AnyPool};
use sqlx::any::{AnyPoolOptions, install_default_drivers};
use thiserror::Error;
use tracing::{debug, instrument, warn};
use url::Url;

/// Credentials file read by [`Credentials::load_default`].
pub const DEFAULT_CREDENTIALS_PATH: &str = "config/creds.ini";

/// INI section holding the connection settings.
pub const CREDENTIALS_SECTION: &str = "mysql";

/// Default maximum number of connections in the pool.
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Database-related errors.
#[derive(Error, Debug)]
pub enum DbError {
    /// The credentials file is missing, malformed or lacks a key.
    #[error("failed to read credentials from {path}: {source}")]
    Credentials {
        /// The credentials file.
        path: PathBuf,
        /// The underlying config error.
        #[source]
        source: config::ConfigError,
    },

    /// The credentials cannot be turned into a connection URL.
    #[error("invalid connection settings: {0}")]
    InvalidSettings(String),

    /// Failed to connect to the database.
    #[error("failed to connect to database: {0}")]
    Connection(#[source] sqlx::Error),

    /// Failed to start a transaction.
    #[error("failed to begin transaction: {0}")]
    Begin(#[source] sqlx::Error),

    /// Failed to commit a transaction whose body succeeded.
    #[error("failed to commit transaction: {0}")]
    Commit(#[source] sqlx::Error),

    /// A statement inside a transaction failed.
    #[error("query failed: {0}")]
    Query(#[from] sqlx::Error),
}

/// MySQL connection settings.
///
/// `Debug` output never includes the password.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct Credentials {
    /// Login name.
    pub user: String,
    /// Password (INI key `pw`).
    #[serde(rename = "pw")]
    pub password: String,
    /// Database name (INI key `db`).
    #[serde(rename = "db")]
    pub database: String,
    /// Server host, optionally `host:port`.
    pub host: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("database", &self.database)
            .field("host", &self.host)
            .finish()
    }
}

impl Credentials {
    /// Reads the `[mysql]` section of an INI file.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Credentials`] if the file cannot be read or a key is missing.
    pub fn from_ini(path: &Path) -> Result<Self, DbError> {
        let to_error = |source| DbError::Credentials {
            path: path.to_path_buf(),
            source,
        };

        let settings = Config::builder()
            .add_source(File::from(path).format(FileFormat::Ini))
            .build()
            .map_err(to_error)?;

        settings.get::<Self>(CREDENTIALS_SECTION).map_err(to_error)
    }

    /// Reads [`DEFAULT_CREDENTIALS_PATH`] relative to the working directory.
    ///
    /// # Errors
    ///
    /// See [`Credentials::from_ini`].
    pub fn load_default() -> Result<Self, DbError> {
        Self::from_ini(Path::new(DEFAULT_CREDENTIALS_PATH))
    }

    /// Builds a `mysql://` URL with percent-encoded user and password and a UTF-8 charset.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::InvalidSettings`] if the host is not a valid host name.
    pub fn connection_url(&self) -> Result<String, DbError> {
        let invalid = |what: &str| DbError::InvalidSettings(format!("{what} in credentials"));

        let mut url = Url::parse("mysql://localhost").map_err(|_| invalid("base URL"))?;

        let (host, port) = match self.host.rsplit_once(':') {
            Some((host, port)) if !host.is_empty() => {
                let port = port.parse::<u16>().map_err(|_| invalid("bad port"))?;
                (host, Some(port))
            }
            _ => (self.host.as_str(), None),
        };
        url.set_host(Some(host)).map_err(|_| invalid("bad host"))?;
        url.set_port(port).map_err(|()| invalid("bad port"))?;
        url.set_username(&self.user)
            .map_err(|()| invalid("bad user"))?;
        url.set_password(Some(&self.password))
            .map_err(|()| invalid("bad password"))?;
        url.set_path(&self.database);
        url.set_query(Some("charset=utf8mb4"));

        Ok(url.into())
    }
}

/// Pooled database connection.
#[derive(Debug, Clone)]
pub struct Database {
    pool: AnyPool,
}

impl Database {
    /// Connects to the database at `url` (`mysql://…`, `sqlite:…`).
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Connection`] if the connection fails.
    #[instrument(skip(url))]
    pub async fn connect(url: &str) -> Result<Self, DbError> {
        install_default_drivers();
        let pool = AnyPoolOptions::new()
            .max_connections(DEFAULT_MAX_CONNECTIONS)
            .connect(url)
            .await
            .map_err(DbError::Connection)?;
        debug!("database pool ready");
        Ok(Self { pool })
    }

    /// Connects using the given credentials.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::InvalidSettings`] or [`DbError::Connection`].
    pub async fn from_credentials(credentials: &Credentials) -> Result<Self, DbError> {
        Self::connect(&credentials.connection_url()?).await
    }

    /// Connects using `config/creds.ini`.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Credentials`], [`DbError::InvalidSettings`] or [`DbError::Connection`].
    pub async fn from_default_credentials() -> Result<Self, DbError> {
        Self::from_credentials(&Credentials::load_default()?).await
    }

    /// Creates a single-connection in-memory SQLite database.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Connection`] if the connection fails.
    #[instrument]
    pub async fn new_in_memory() -> Result<Self, DbError> {
        install_default_drivers();
        let pool = AnyPoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .map_err(DbError::Connection)?;
        Ok(Self { pool })
    }

    /// Returns a reference to the underlying connection pool.
    #[must_use]
    pub fn pool(&self) -> &AnyPool {
        &self.pool
    }

    /// Runs `body` inside a transaction.
    ///
    /// The transaction is committed if `body` returns `Ok` and rolled back if
    /// it returns `Err` (or panics). The connection goes back to the pool on
    /// every path.
    ///
    /// # Errors
    ///
    /// Returns the body's error, or [`DbError::Begin`] / [`DbError::Commit`]
    /// converted into `E`.
    #[instrument(skip_all)]
    pub async fn with_transaction<T, E, F>(&self, body: F) -> Result<T, E>
    where
        F: for<'c> FnOnce(&'c mut AnyConnection) -> BoxFuture<'c, Result<T, E>>,
        E: From<DbError>,
    {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| E::from(DbError::Begin(e)))?;

        match body(&mut *tx).await {
            Ok(value) => {
                tx.commit()
                    .await
                    .map_err(|e| E::from(DbError::Commit(e)))?;
                debug!("transaction committed");
                Ok(value)
            }
            Err(err) => {
                match tx.rollback().await {
                    Ok(()) => debug!("transaction rolled back"),
                    Err(rollback) => warn!(error = %rollback, "rollback failed"),
                }
                Err(err)
            }
        }
    }

    /// Gracefully closes all connections in the pool.
    #[instrument(skip(self))]
    pub async fn close(self) {
        self.pool.close().await;
    }
}
