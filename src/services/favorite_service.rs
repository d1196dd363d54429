use sea_orm::{
    ActiveValue::NotSet, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait, sea_query::OnConflict,
};
use uuid::Uuid;

use crate::{
    audit,
    dto::favorites::{FavoriteIds, FavoritePetList, FavoriteState},
    entity::{
        Pets, UserFavorites,
        user_favorites::{ActiveModel as FavoriteActive, Column as FavoriteCol},
    },
    error::{AppError, AppResult},
    middleware::auth::AuthContext,
    models::Pet,
    response::{ApiResponse, Meta},
    routes::params::Pagination,
    state::AppState,
};

async fn ensure_pet_exists(state: &AppState, pet_id: Uuid) -> AppResult<()> {
    match Pets::find_by_id(pet_id).one(&state.orm).await? {
        Some(_) => Ok(()),
        None => Err(AppError::NotFound),
    }
}

pub async fn list_favorites(
    state: &AppState,
    ctx: &AuthContext,
    pagination: Pagination,
) -> AppResult<ApiResponse<FavoritePetList>> {
    let window = pagination.normalize();
    let finder = Pets::find()
        .inner_join(UserFavorites)
        .filter(FavoriteCol::UserId.eq(ctx.user_id))
        .order_by_desc(FavoriteCol::CreatedAt);

    let total = finder.clone().count(&state.orm).await?;
    let items = finder
        .limit(window.limit())
        .offset(window.skip())
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Pet::from)
        .collect();

    Ok(ApiResponse::paged(
        "Favorites",
        FavoritePetList { items },
        &window,
        total,
    ))
}

/// Ids of every favorited pet, for marking hearts in the pet browser.
pub async fn favorite_ids(state: &AppState, ctx: &AuthContext) -> AppResult<ApiResponse<FavoriteIds>> {
    let items: Vec<Uuid> = sqlx::query_scalar(
        "SELECT pet_id FROM user_favorites WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(ctx.user_id)
    .fetch_all(state.pool())
    .await?;

    Ok(ApiResponse::success(
        "Favorite ids",
        FavoriteIds { items },
        Some(Meta::empty()),
    ))
}

pub async fn add_favorite(
    state: &AppState,
    ctx: &AuthContext,
    pet_id: Uuid,
) -> AppResult<ApiResponse<FavoriteState>> {
    ensure_pet_exists(state, pet_id).await?;

    let inserted = sqlx::query(
        r#"
        INSERT INTO user_favorites (id, user_id, pet_id)
        VALUES ($1, $2, $3)
        ON CONFLICT (user_id, pet_id) DO NOTHING
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(ctx.user_id)
    .bind(pet_id)
    .execute(state.pool())
    .await?
    .rows_affected();

    if inserted > 0 {
        audit::record(
            &state.orm,
            ctx.user_id,
            "favorite_add",
            "user_favorites",
            serde_json::json!({ "pet_id": pet_id }),
        )
        .await;
    }

    Ok(ApiResponse::success(
        "Added to favorites",
        FavoriteState {
            pet_id,
            favorited: true,
        },
        Some(Meta::empty()),
    ))
}

pub async fn remove_favorite(
    state: &AppState,
    ctx: &AuthContext,
    pet_id: Uuid,
) -> AppResult<ApiResponse<FavoriteState>> {
    let removed = UserFavorites::delete_many()
        .filter(FavoriteCol::UserId.eq(ctx.user_id))
        .filter(FavoriteCol::PetId.eq(pet_id))
        .exec(&state.orm)
        .await?
        .rows_affected;

    if removed > 0 {
        audit::record(
            &state.orm,
            ctx.user_id,
            "favorite_remove",
            "user_favorites",
            serde_json::json!({ "pet_id": pet_id }),
        )
        .await;
    }

    Ok(ApiResponse::success(
        "Removed from favorites",
        FavoriteState {
            pet_id,
            favorited: false,
        },
        Some(Meta::empty()),
    ))
}

/// Flips membership in one transaction and reports the resulting state.
pub async fn toggle_favorite(
    state: &AppState,
    ctx: &AuthContext,
    pet_id: Uuid,
) -> AppResult<ApiResponse<FavoriteState>> {
    ensure_pet_exists(state, pet_id).await?;

    let txn = state.orm.begin().await?;

    let removed = UserFavorites::delete_many()
        .filter(FavoriteCol::UserId.eq(ctx.user_id))
        .filter(FavoriteCol::PetId.eq(pet_id))
        .exec(&txn)
        .await?
        .rows_affected;

    let favorited = if removed > 0 {
        false
    } else {
        UserFavorites::insert(FavoriteActive {
            id: Set(Uuid::new_v4()),
            user_id: Set(ctx.user_id),
            pet_id: Set(pet_id),
            created_at: NotSet,
        })
        .on_conflict(
            OnConflict::columns([FavoriteCol::UserId, FavoriteCol::PetId])
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(&txn)
        .await?;
        true
    };

    txn.commit().await?;

    audit::record(
        &state.orm,
        ctx.user_id,
        if favorited { "favorite_add" } else { "favorite_remove" },
        "user_favorites",
        serde_json::json!({ "pet_id": pet_id }),
    )
    .await;

    let message = if favorited {
        "Added to favorites"
    } else {
        "Removed from favorites"
    };
    Ok(ApiResponse::success(
        message,
        FavoriteState { pet_id, favorited },
        Some(Meta::empty()),
    ))
}
