#![allow(dead_code)]

use std::time::Duration;

use pet_adoption_api::{
    db::{create_orm_conn, run_migrations},
    entity::enums::Role,
    middleware::auth::{AuthContext, AuthKeys},
    services::user_service,
    state::AppState,
};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DbBackend, Statement};
use uuid::Uuid;

pub const TEST_SECRET: &[u8] = b"integration-test-secret";

/// Arbitrary key shared by every test binary so migrations never run concurrently.
const MIGRATION_LOCK: i64 = 0x5045_5453;

pub fn database_url() -> Option<String> {
    match std::env::var("TEST_DATABASE_URL").or_else(|_| std::env::var("DATABASE_URL")) {
        Ok(url) => Some(url),
        Err(_) => {
            eprintln!("Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run database tests.");
            None
        }
    }
}

pub fn keys() -> AuthKeys {
    AuthKeys::from_secret(TEST_SECRET)
}

/// Connects and migrates, or returns `None` when no database is configured.
pub async fn setup_state() -> anyhow::Result<Option<AppState>> {
    let Some(url) = database_url() else {
        return Ok(None);
    };

    migrate_serialized(&url).await?;
    let orm = create_orm_conn(&url).await?;
    Ok(Some(AppState::new(orm, keys())))
}

async fn migrate_serialized(url: &str) -> anyhow::Result<()> {
    let mut options = ConnectOptions::new(url.to_owned());
    options
        .max_connections(1)
        .acquire_timeout(Duration::from_secs(30))
        .sqlx_logging(false);
    let conn = Database::connect(options).await?;

    conn.execute(Statement::from_sql_and_values(
        DbBackend::Postgres,
        "SELECT pg_advisory_lock($1)",
        [MIGRATION_LOCK.into()],
    ))
    .await?;
    let result = run_migrations(&conn).await;
    conn.execute(Statement::from_sql_and_values(
        DbBackend::Postgres,
        "SELECT pg_advisory_unlock($1)",
        [MIGRATION_LOCK.into()],
    ))
    .await?;
    result
}

/// A fresh identity with the given role persisted in `user_roles`.
pub async fn account(state: &AppState, role: Role) -> anyhow::Result<AuthContext> {
    let user_id = Uuid::new_v4();
    user_service::set_role(&state.orm, user_id, role).await?;
    Ok(AuthContext {
        user_id,
        email: Some(format!("{user_id}@example.test")),
        role,
    })
}

pub async fn insert_pet(state: &AppState, name: &str) -> anyhow::Result<Uuid> {
    let id = Uuid::new_v4();
    sqlx::query(
        "INSERT INTO pets (id, name, species, breed, age, size, status) \
         VALUES ($1, $2, 'dog', 'Mixed', 4, 'medium', 'available')",
    )
    .bind(id)
    .bind(name)
    .execute(state.pool())
    .await?;
    Ok(id)
}

pub async fn insert_product(state: &AppState, price: i64, stock: i32) -> anyhow::Result<Uuid> {
    let id = Uuid::new_v4();
    sqlx::query(
        "INSERT INTO store_products (id, name, price, category, stock) \
         VALUES ($1, $2, $3, 'toys', $4)",
    )
    .bind(id)
    .bind(format!("Test product {id}"))
    .bind(price)
    .bind(stock)
    .execute(state.pool())
    .await?;
    Ok(id)
}

pub async fn product_stock(state: &AppState, id: Uuid) -> anyhow::Result<i32> {
    let stock: i32 = sqlx::query_scalar("SELECT stock FROM store_products WHERE id = $1")
        .bind(id)
        .fetch_one(state.pool())
        .await?;
    Ok(stock)
}
