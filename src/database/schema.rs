use crate::config::DbSettings;
use crate::database::connection::{connect, connect_maintenance};
use crate::error::{Error, Result};
use sqlx::{Connection, Executor};
use tracing::{info, instrument};

const CREATE_EMPLOYERS: &str = r#"
    CREATE TABLE employers (
        employer_id BIGINT PRIMARY KEY,
        employer_name VARCHAR(300) NOT NULL,
        employer_url TEXT
    )
"#;

const CREATE_VACANCIES: &str = r#"
    CREATE TABLE vacancies (
        vacancy_id BIGINT PRIMARY KEY,
        employer_id BIGINT NOT NULL REFERENCES employers(employer_id),
        vacancy_name TEXT NOT NULL,
        vacancy_url TEXT,
        city VARCHAR(100),
        publish_date DATE,
        schedule VARCHAR(100),
        salary_from INT NULL DEFAULT NULL,
        salary_to INT NULL DEFAULT NULL
    )
"#;

/// Database names are interpolated into DDL, so only plain identifiers are accepted.
pub fn validate_database_name(name: &str) -> Result<()> {
    let mut chars = name.chars();
    let valid_start = chars
        .next()
        .map(|c| c.is_ascii_alphabetic() || c == '_')
        .unwrap_or(false);
    if valid_start && chars.all(|c| c.is_ascii_alphanumeric() || c == '_') && name.len() <= 63 {
        Ok(())
    } else {
        Err(Error::Validation(format!("Invalid database name: {:?}", name)))
    }
}

/// Drops and recreates the target database, then creates the `employers` and
/// `vacancies` tables. Everything previously stored under that name is lost.
#[instrument(skip(settings), fields(database = %settings.database))]
pub async fn create_database(settings: &DbSettings) -> Result<()> {
    validate_database_name(&settings.database)?;

    // Plain `&str` statements go over the simple query protocol, outside any transaction block.
    let mut conn = connect_maintenance(settings).await?;
    conn.execute(format!("DROP DATABASE IF EXISTS \"{}\"", settings.database).as_str())
        .await?;
    conn.execute(format!("CREATE DATABASE \"{}\"", settings.database).as_str())
        .await?;
    conn.close().await?;

    let mut conn = connect(settings).await?;
    let mut tx = conn.begin().await?;
    sqlx::query(CREATE_EMPLOYERS).execute(&mut *tx).await?;
    sqlx::query(CREATE_VACANCIES).execute(&mut *tx).await?;
    tx.commit().await?;
    conn.close().await?;

    info!("Database recreated");
    Ok(())
}
