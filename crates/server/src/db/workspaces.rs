use api_types::{Amenities, VenueType, Workspace};
use sqlx::{Executor, PgPool, Postgres, types::Json};
use thiserror::Error;
use uuid::Uuid;

use crate::geo::{BoundingBox, EARTH_RADIUS_KM};
use crate::validation::NearbyFilter;

#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub struct CreateWorkspaceParams {
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub venue_type: VenueType,
    pub amenities: Amenities,
    pub created_by_id: Option<Uuid>,
}

const WORKSPACE_COLUMNS: &str = r#"
    id,
    name,
    address,
    latitude,
    longitude,
    venue_type,
    amenities,
    created_by_id,
    created_at,
    updated_at
"#;

/// Escapes `LIKE` metacharacters so user input only matches literally.
fn like_pattern(query: &str) -> String {
    let mut escaped = String::with_capacity(query.len() + 2);
    escaped.push('%');
    for c in query.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

fn venue_type_filter(venue_types: &[VenueType]) -> Option<Vec<String>> {
    if venue_types.is_empty() {
        None
    } else {
        Some(venue_types.iter().map(|v| v.as_str().to_string()).collect())
    }
}

pub struct WorkspaceRepository;

impl WorkspaceRepository {
    pub async fn create<'e, E>(
        executor: E,
        params: CreateWorkspaceParams,
    ) -> Result<Workspace, WorkspaceError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let CreateWorkspaceParams {
            name,
            address,
            latitude,
            longitude,
            venue_type,
            amenities,
            created_by_id,
        } = params;

        let sql = format!(
            r#"
            INSERT INTO workspaces (id, name, address, latitude, longitude, venue_type, amenities, created_by_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {WORKSPACE_COLUMNS}
            "#
        );
        let record = sqlx::query_as::<_, Workspace>(&sql)
            .bind(Uuid::new_v4())
            .bind(name)
            .bind(address)
            .bind(latitude)
            .bind(longitude)
            .bind(venue_type)
            .bind(Json(amenities))
            .bind(created_by_id)
            .fetch_one(executor)
            .await?;

        Ok(record)
    }

    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Workspace>, WorkspaceError> {
        let sql = format!("SELECT {WORKSPACE_COLUMNS} FROM workspaces WHERE id = $1");
        let record = sqlx::query_as::<_, Workspace>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(record)
    }

    pub async fn exists(pool: &PgPool, id: Uuid) -> Result<bool, WorkspaceError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM workspaces WHERE id = $1)")
                .bind(id)
                .fetch_one(pool)
                .await?;
        Ok(exists)
    }

    /// Workspaces within `filter.radius_km` of the center, nearest first.
    ///
    /// The bounding box narrows candidates via the coordinate index; the exact great-circle
    /// distance decides inclusion (`<=`) and order.
    pub async fn list_nearby(
        pool: &PgPool,
        filter: NearbyFilter,
        venue_types: &[VenueType],
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Workspace>, WorkspaceError> {
        let bbox = BoundingBox::around(filter.center, filter.radius_km);
        let sql = format!(
            r#"
            SELECT {WORKSPACE_COLUMNS}
            FROM (
                SELECT
                    w.*,
                    {EARTH_RADIUS_KM} * acos(LEAST(1.0, GREATEST(-1.0,
                        cos(radians($1)) * cos(radians(w.latitude))
                            * cos(radians(w.longitude) - radians($2))
                        + sin(radians($1)) * sin(radians(w.latitude))
                    ))) AS distance_km
                FROM workspaces w
                WHERE w.latitude BETWEEN $3 AND $4
                  AND w.longitude BETWEEN $5 AND $6
                  AND ($7::text[] IS NULL OR w.venue_type::text = ANY($7))
            ) nearby
            WHERE distance_km <= $8
            ORDER BY distance_km ASC, created_at DESC, id
            LIMIT $9 OFFSET $10
            "#
        );

        let records = sqlx::query_as::<_, Workspace>(&sql)
            .bind(filter.center.latitude)
            .bind(filter.center.longitude)
            .bind(bbox.min_latitude)
            .bind(bbox.max_latitude)
            .bind(bbox.min_longitude)
            .bind(bbox.max_longitude)
            .bind(venue_type_filter(venue_types))
            .bind(filter.radius_km)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?;

        Ok(records)
    }

    /// Newest workspaces first, ties broken by id so paging is stable; used when no center
    /// point is given.
    pub async fn list_recent(
        pool: &PgPool,
        venue_types: &[VenueType],
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Workspace>, WorkspaceError> {
        let sql = format!(
            r#"
            SELECT {WORKSPACE_COLUMNS}
            FROM workspaces
            WHERE ($1::text[] IS NULL OR venue_type::text = ANY($1))
            ORDER BY created_at DESC, id
            LIMIT $2 OFFSET $3
            "#
        );

        let records = sqlx::query_as::<_, Workspace>(&sql)
            .bind(venue_type_filter(venue_types))
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?;

        Ok(records)
    }

    /// Case-insensitive substring match on name or address, in storage order.
    pub async fn search(
        pool: &PgPool,
        query: &str,
        limit: i64,
    ) -> Result<Vec<Workspace>, WorkspaceError> {
        let sql = format!(
            r#"
            SELECT {WORKSPACE_COLUMNS}
            FROM workspaces
            WHERE name ILIKE $1 OR address ILIKE $1
            LIMIT $2
            "#
        );

        let records = sqlx::query_as::<_, Workspace>(&sql)
            .bind(like_pattern(query))
            .bind(limit)
            .fetch_all(pool)
            .await?;

        Ok(records)
    }
}
