use crate::config::DbSettings;
use crate::error::Result;
use sqlx::postgres::{PgConnectOptions, PgConnection};
use sqlx::Connection;

fn options(settings: &DbSettings, database: &str) -> PgConnectOptions {
    PgConnectOptions::new()
        .host(&settings.host)
        .port(settings.port)
        .username(&settings.user)
        .password(&settings.password)
        .database(database)
}

/// Opens a dedicated connection to the target database. Callers close it when done.
pub async fn connect(settings: &DbSettings) -> Result<PgConnection> {
    Ok(PgConnection::connect_with(&options(settings, &settings.database)).await?)
}

/// Opens a connection to the maintenance database used for `CREATE`/`DROP DATABASE`.
pub async fn connect_maintenance(settings: &DbSettings) -> Result<PgConnection> {
    Ok(PgConnection::connect_with(&options(settings, &settings.maintenance_database)).await?)
}
