use api_types::{Favorite, FavoriteWorkspace};
use sqlx::{Executor, PgPool, Postgres};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum FavoriteError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub struct FavoriteRepository;

impl FavoriteRepository {
    pub async fn find(
        pool: &PgPool,
        user_id: Uuid,
        workspace_id: Uuid,
    ) -> Result<Option<Favorite>, FavoriteError> {
        let record = sqlx::query_as::<_, Favorite>(
            r#"
            SELECT id, user_id, workspace_id, created_at
            FROM favorites
            WHERE user_id = $1 AND workspace_id = $2
            "#,
        )
        .bind(user_id)
        .bind(workspace_id)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    pub async fn is_favorited(
        pool: &PgPool,
        user_id: Uuid,
        workspace_id: Uuid,
    ) -> Result<bool, FavoriteError> {
        Ok(Self::find(pool, user_id, workspace_id).await?.is_some())
    }

    /// Flips the favorite state of `(user_id, workspace_id)` in one statement and returns
    /// whether the pair is favorited afterwards.
    ///
    /// An existing row is deleted; otherwise a row is inserted. `UNIQUE (user_id,
    /// workspace_id)` keeps concurrent toggles from creating duplicates: an insert that loses
    /// the race hits `ON CONFLICT DO NOTHING` and the pair is still favorited.
    pub async fn toggle<'e, E>(
        executor: E,
        user_id: Uuid,
        workspace_id: Uuid,
    ) -> Result<bool, FavoriteError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let favorited: bool = sqlx::query_scalar(
            r#"
            WITH removed AS (
                DELETE FROM favorites
                WHERE user_id = $1 AND workspace_id = $2
                RETURNING id
            ),
            inserted AS (
                INSERT INTO favorites (id, user_id, workspace_id)
                SELECT $3, $1, $2
                WHERE NOT EXISTS (SELECT 1 FROM removed)
                ON CONFLICT (user_id, workspace_id) DO NOTHING
                RETURNING id
            )
            SELECT NOT EXISTS (SELECT 1 FROM removed)
            "#,
        )
        .bind(user_id)
        .bind(workspace_id)
        .bind(Uuid::new_v4())
        .fetch_one(executor)
        .await?;

        Ok(favorited)
    }

    /// The user's favorited workspaces, most recently favorited first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: Uuid,
    ) -> Result<Vec<FavoriteWorkspace>, FavoriteError> {
        let records = sqlx::query_as::<_, FavoriteWorkspace>(
            r#"
            SELECT
                w.id,
                w.name,
                w.address,
                w.latitude,
                w.longitude,
                w.venue_type,
                w.amenities,
                w.created_by_id,
                w.created_at,
                w.updated_at,
                f.id AS favorite_id
            FROM favorites f
            INNER JOIN workspaces w ON w.id = f.workspace_id
            WHERE f.user_id = $1
            ORDER BY f.created_at DESC, f.id
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(records)
    }
}
