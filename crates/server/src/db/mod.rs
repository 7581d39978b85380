pub mod favorites;
pub mod reports;
pub mod users;
pub mod workspaces;

use sqlx::{PgPool, migrate::MigrateError};

pub(crate) static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

pub async fn run_migrations(pool: &PgPool) -> Result<(), MigrateError> {
    MIGRATOR.run(pool).await
}
