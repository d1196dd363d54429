use axum::extract::FromRef;
use sea_orm::DatabaseConnection;
use sqlx::PgPool;

use crate::middleware::auth::AuthKeys;

#[derive(Clone)]
pub struct AppState {
    pub orm: DatabaseConnection,
    pub auth: AuthKeys,
}

impl AppState {
    pub fn new(orm: DatabaseConnection, auth: AuthKeys) -> Self {
        Self { orm, auth }
    }

    /// The sqlx pool behind the ORM connection, for hand-written read queries.
    pub fn pool(&self) -> &PgPool {
        self.orm.get_postgres_connection_pool()
    }
}

impl FromRef<AppState> for AuthKeys {
    fn from_ref(state: &AppState) -> Self {
        state.auth.clone()
    }
}
