use api_types::{Level, Report};
use sqlx::{Executor, PgPool, Postgres};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub struct CreateReportParams {
    pub workspace_id: Uuid,
    pub user_id: Uuid,
    pub crowd_level: Level,
    pub noise_level: Level,
    pub wifi_speed: Option<f64>,
    pub notes: Option<String>,
}

const REPORT_COLUMNS: &str = r#"
    id,
    workspace_id,
    user_id,
    crowd_level,
    noise_level,
    wifi_speed,
    notes,
    reported_at
"#;

pub struct ReportRepository;

impl ReportRepository {
    pub async fn create<'e, E>(executor: E, params: CreateReportParams) -> Result<Report, ReportError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let CreateReportParams {
            workspace_id,
            user_id,
            crowd_level,
            noise_level,
            wifi_speed,
            notes,
        } = params;

        let sql = format!(
            r#"
            INSERT INTO workspace_reports (id, workspace_id, user_id, crowd_level, noise_level, wifi_speed, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {REPORT_COLUMNS}
            "#
        );
        let record = sqlx::query_as::<_, Report>(&sql)
            .bind(Uuid::new_v4())
            .bind(workspace_id)
            .bind(user_id)
            .bind(i16::from(crowd_level))
            .bind(i16::from(noise_level))
            .bind(wifi_speed)
            .bind(notes)
            .fetch_one(executor)
            .await?;

        Ok(record)
    }

    /// The `limit` most recent reports for a workspace, newest first.
    pub async fn list_recent(
        pool: &PgPool,
        workspace_id: Uuid,
        limit: i64,
    ) -> Result<Vec<Report>, ReportError> {
        let sql = format!(
            r#"
            SELECT {REPORT_COLUMNS}
            FROM workspace_reports
            WHERE workspace_id = $1
            ORDER BY reported_at DESC, id
            LIMIT $2
            "#
        );
        let records = sqlx::query_as::<_, Report>(&sql)
            .bind(workspace_id)
            .bind(limit)
            .fetch_all(pool)
            .await?;

        Ok(records)
    }
}
