use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ConnectionTrait, DbBackend, EntityTrait,
    FromQueryResult, QuerySelect, Set, Statement, TransactionTrait, sea_query::LockType,
};
use uuid::Uuid;

use crate::{
    audit,
    dto::feedback::{CreateFeedbackRequest, FeedbackList, FeedbackView},
    entity::{
        AdoptionApplications, enums::ApplicationStatus,
        pet_feedback::ActiveModel as FeedbackActive,
    },
    error::{AppError, AppResult},
    middleware::auth::AuthContext,
    models::Feedback,
    response::{ApiResponse, Meta},
    routes::params::{PageWindow, Pagination},
    state::AppState,
};

/// Feedback joined with pet and author names, optionally for a single pet.
pub(crate) async fn fetch_views<C: ConnectionTrait>(
    conn: &C,
    pet_id: Option<Uuid>,
    window: &PageWindow,
) -> AppResult<Vec<FeedbackView>> {
    let stmt = Statement::from_sql_and_values(
        DbBackend::Postgres,
        r#"
        SELECT f.id, f.adoption_application_id, f.pet_id, p.name AS pet_name,
               f.user_id, pr.first_name, pr.last_name, f.rating, f.comment, f.created_at
        FROM pet_feedback f
        JOIN pets p ON p.id = f.pet_id
        LEFT JOIN profiles pr ON pr.id = f.user_id
        WHERE ($1::uuid IS NULL OR f.pet_id = $1)
        ORDER BY f.created_at DESC
        LIMIT $2 OFFSET $3
        "#,
        [pet_id.into(), window.per_page.into(), window.offset.into()],
    );
    Ok(FeedbackView::find_by_statement(stmt).all(conn).await?)
}

async fn count(state: &AppState, pet_id: Option<Uuid>) -> AppResult<i64> {
    let total: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM pet_feedback WHERE ($1::uuid IS NULL OR pet_id = $1)",
    )
    .bind(pet_id)
    .fetch_one(state.pool())
    .await?;
    Ok(total)
}

pub async fn list_for_pet(
    state: &AppState,
    pet_id: Uuid,
    pagination: Pagination,
) -> AppResult<ApiResponse<FeedbackList>> {
    let window = pagination.normalize();
    let (items, total) = tokio::try_join!(
        fetch_views(&state.orm, Some(pet_id), &window),
        count(state, Some(pet_id)),
    )?;
    Ok(ApiResponse::paged(
        "Feedback",
        FeedbackList { items },
        &window,
        total as u64,
    ))
}

pub async fn list_all(
    state: &AppState,
    pagination: Pagination,
) -> AppResult<ApiResponse<FeedbackList>> {
    let window = pagination.normalize();
    let (items, total) = tokio::try_join!(
        fetch_views(&state.orm, None, &window),
        count(state, None),
    )?;
    Ok(ApiResponse::paged(
        "Feedback",
        FeedbackList { items },
        &window,
        total as u64,
    ))
}

/// Records the adopter's feedback on a completed adoption.
pub async fn create(
    state: &AppState,
    ctx: &AuthContext,
    application_id: Uuid,
    payload: CreateFeedbackRequest,
) -> AppResult<ApiResponse<Feedback>> {
    payload.validate()?;

    let txn = state.orm.begin().await?;
    let application = AdoptionApplications::find_by_id(application_id)
        .lock(LockType::Update)
        .one(&txn)
        .await?;
    let application = match application {
        Some(a) => a,
        None => return Err(AppError::NotFound),
    };

    if application.user_id != ctx.user_id {
        return Err(AppError::Forbidden);
    }
    if application.status != ApplicationStatus::Approved {
        return Err(AppError::BadRequest(
            "Feedback can only be left for approved adoptions".into(),
        ));
    }

    let inserted = FeedbackActive {
        id: Set(Uuid::new_v4()),
        adoption_application_id: Set(application.id),
        pet_id: Set(application.pet_id),
        user_id: Set(ctx.user_id),
        rating: Set(payload.rating),
        comment: Set(payload.comment.trim().to_owned()),
        created_at: NotSet,
    }
    .insert(&txn)
    .await
    .map_err(AppError::from);

    let feedback = match inserted {
        Ok(f) => f,
        Err(err) if err.is_unique_violation() => {
            return Err(AppError::Conflict(
                "Feedback was already submitted for this adoption".into(),
            ));
        }
        Err(err) => return Err(err),
    };
    txn.commit().await?;

    audit::record(
        &state.orm,
        ctx.user_id,
        "feedback_create",
        "pet_feedback",
        serde_json::json!({ "application_id": application.id, "rating": feedback.rating }),
    )
    .await;

    Ok(ApiResponse::success(
        "Thank you for your feedback",
        feedback.into(),
        Some(Meta::empty()),
    ))
}
