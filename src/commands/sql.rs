//! SQL command handler: one statement, one transaction.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info;

use toolbelt::db::{Credentials, DEFAULT_CREDENTIALS_PATH, Database, DbError};

use crate::app_config::FileConfig;
use crate::cli::SqlArgs;

pub async fn run_sql_command(args: &SqlArgs, config: &FileConfig) -> Result<()> {
    let creds_path = args
        .creds
        .clone()
        .or_else(|| config.creds_path.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CREDENTIALS_PATH));

    let credentials = Credentials::from_ini(&creds_path)?;
    let db = Database::from_credentials(&credentials)
        .await
        .with_context(|| format!("Failed to connect as {}@{}", credentials.user, credentials.host))?;

    let statement = args.statement.clone();
    let affected = db
        .with_transaction(move |conn| {
            Box::pin(async move {
                let result = sqlx::query(&statement).execute(&mut *conn).await?;
                Ok::<_, DbError>(result.rows_affected())
            })
        })
        .await;
    db.close().await;

    let affected = affected?;
    info!(affected, "statement committed");
    println!("{affected} row(s) affected");
    Ok(())
}
