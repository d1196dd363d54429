use chrono::Utc;
use sea_orm::{
    ActiveValue::Set, ConnectionTrait, DatabaseConnection, DbBackend, EntityTrait,
    FromQueryResult, Statement, sea_query::OnConflict,
};
use uuid::Uuid;

use crate::{
    audit,
    dto::profile::{ProfileWithRole, UpdateProfileRequest, UserList, UserWithRole},
    entity::{
        Profiles, UserRoles,
        enums::Role,
        profiles::Model as ProfileModel,
        user_roles::{ActiveModel as RoleActive, Column as RoleCol},
    },
    error::{AppError, AppResult},
    middleware::auth::AuthContext,
    response::{ApiResponse, Meta},
    routes::params::Pagination,
    state::AppState,
};

/// Role of a user; a user without a role row is a plain adopter.
pub async fn resolve_role(conn: &DatabaseConnection, user_id: Uuid) -> AppResult<Role> {
    let row = UserRoles::find_by_id(user_id).one(conn).await?;
    Ok(row.map(|r| r.role).unwrap_or_default())
}

/// Inserts or updates a profile. Fields left as `None` keep their stored value.
pub async fn upsert_profile<C: ConnectionTrait>(
    conn: &C,
    user_id: Uuid,
    email: Option<&str>,
    changes: &UpdateProfileRequest,
) -> AppResult<ProfileModel> {
    let stmt = Statement::from_sql_and_values(
        DbBackend::Postgres,
        r#"
        INSERT INTO profiles (id, email, first_name, last_name, phone, address)
        VALUES ($1, $2, $3, $4, $5, $6)
        ON CONFLICT (id) DO UPDATE SET
            email = COALESCE(EXCLUDED.email, profiles.email),
            first_name = COALESCE(EXCLUDED.first_name, profiles.first_name),
            last_name = COALESCE(EXCLUDED.last_name, profiles.last_name),
            phone = COALESCE(EXCLUDED.phone, profiles.phone),
            address = COALESCE(EXCLUDED.address, profiles.address),
            updated_at = NOW()
        RETURNING *
        "#,
        [
            user_id.into(),
            email.map(str::to_owned).into(),
            changes.first_name.clone().into(),
            changes.last_name.clone().into(),
            changes.phone.clone().into(),
            changes.address.clone().into(),
        ],
    );

    Profiles::find()
        .from_raw_sql(stmt)
        .one(conn)
        .await?
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("profile upsert returned no row")))
}

pub async fn get_profile(
    state: &AppState,
    ctx: &AuthContext,
) -> AppResult<ApiResponse<ProfileWithRole>> {
    let profile = match Profiles::find_by_id(ctx.user_id).one(&state.orm).await? {
        Some(p) => p,
        None => {
            upsert_profile(
                &state.orm,
                ctx.user_id,
                ctx.email.as_deref(),
                &UpdateProfileRequest::default(),
            )
            .await?
        }
    };

    Ok(ApiResponse::success(
        "Profile",
        ProfileWithRole {
            profile: profile.into(),
            role: ctx.role,
        },
        Some(Meta::empty()),
    ))
}

pub async fn update_profile(
    state: &AppState,
    ctx: &AuthContext,
    payload: UpdateProfileRequest,
) -> AppResult<ApiResponse<ProfileWithRole>> {
    let profile = upsert_profile(&state.orm, ctx.user_id, ctx.email.as_deref(), &payload).await?;

    Ok(ApiResponse::success(
        "Profile updated",
        ProfileWithRole {
            profile: profile.into(),
            role: ctx.role,
        },
        Some(Meta::empty()),
    ))
}

pub async fn list_users(
    state: &AppState,
    pagination: Pagination,
) -> AppResult<ApiResponse<UserList>> {
    let window = pagination.normalize();
    let stmt = Statement::from_sql_and_values(
        DbBackend::Postgres,
        r#"
        SELECT p.id, p.email, p.first_name, p.last_name,
               COALESCE(ur.role, 'user') AS role, p.created_at
        FROM profiles p
        LEFT JOIN user_roles ur ON ur.user_id = p.id
        ORDER BY p.created_at DESC
        LIMIT $1 OFFSET $2
        "#,
        [window.per_page.into(), window.offset.into()],
    );
    let items = UserWithRole::find_by_statement(stmt).all(&state.orm).await?;

    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM profiles")
        .fetch_one(state.pool())
        .await?;

    Ok(ApiResponse::paged(
        "Users",
        UserList { items },
        &window,
        total as u64,
    ))
}

pub async fn set_role<C: ConnectionTrait>(conn: &C, user_id: Uuid, role: Role) -> AppResult<()> {
    let active = RoleActive {
        user_id: Set(user_id),
        role: Set(role),
        updated_at: Set(Utc::now().into()),
    };
    UserRoles::insert(active)
        .on_conflict(
            OnConflict::column(RoleCol::UserId)
                .update_columns([RoleCol::Role, RoleCol::UpdatedAt])
                .to_owned(),
        )
        .exec(conn)
        .await?;
    Ok(())
}

pub async fn update_role(
    state: &AppState,
    ctx: &AuthContext,
    user_id: Uuid,
    role: Role,
) -> AppResult<ApiResponse<UserWithRole>> {
    set_role(&state.orm, user_id, role).await?;
    tracing::info!(admin = %ctx.user_id, user_id = %user_id, role = %role, "role updated");

    audit::record(
        &state.orm,
        ctx.user_id,
        "role_update",
        "user_roles",
        serde_json::json!({ "user_id": user_id, "role": role }),
    )
    .await;

    let profile = Profiles::find_by_id(user_id).one(&state.orm).await?;
    let user = UserWithRole {
        id: user_id,
        email: profile.as_ref().and_then(|p| p.email.clone()),
        first_name: profile.as_ref().and_then(|p| p.first_name.clone()),
        last_name: profile.as_ref().and_then(|p| p.last_name.clone()),
        role,
        created_at: profile
            .map(|p| p.created_at.with_timezone(&Utc))
            .unwrap_or_else(Utc::now),
    };

    Ok(ApiResponse::success("Role updated", user, Some(Meta::empty())))
}
