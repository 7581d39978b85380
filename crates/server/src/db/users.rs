use api_types::SessionUser;
use sqlx::{Executor, Postgres};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UserError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub struct UserRepository;

impl UserRepository {
    /// Mirrors the session user into `users` so rows referencing it satisfy their foreign
    /// keys. The identity provider stays the source of truth for the profile fields.
    pub async fn upsert<'e, E>(executor: E, user: &SessionUser) -> Result<(), UserError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            r#"
            INSERT INTO users (id, email, name)
            VALUES ($1, $2, $3)
            ON CONFLICT (id) DO UPDATE SET
                email      = COALESCE(EXCLUDED.email, users.email),
                name       = COALESCE(EXCLUDED.name, users.name),
                updated_at = NOW()
            "#,
        )
        .bind(user.id)
        .bind(user.email.as_deref())
        .bind(user.name.as_deref())
        .execute(executor)
        .await?;

        Ok(())
    }
}
