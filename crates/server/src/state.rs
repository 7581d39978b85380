use std::sync::Arc;

use sqlx::PgPool;

use crate::auth::SessionProvider;

#[derive(Clone)]
pub struct AppState {
    pool: PgPool,
    sessions: Arc<dyn SessionProvider>,
}

impl AppState {
    pub fn new(pool: PgPool, sessions: Arc<dyn SessionProvider>) -> Self {
        Self { pool, sessions }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn sessions(&self) -> &dyn SessionProvider {
        self.sessions.as_ref()
    }
}
