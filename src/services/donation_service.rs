use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, DbBackend, FromQueryResult, Set, Statement,
};
use uuid::Uuid;

use crate::{
    audit,
    dto::donations::{CreateDonationRequest, DonationList, DonationView},
    entity::donations::ActiveModel as DonationActive,
    error::{AppError, AppResult},
    middleware::auth::AuthContext,
    models::Donation,
    response::{ApiResponse, Meta},
    routes::params::Pagination,
    state::AppState,
};

pub async fn create(
    state: &AppState,
    ctx: &AuthContext,
    payload: CreateDonationRequest,
) -> AppResult<ApiResponse<Donation>> {
    payload.validate()?;

    let donation = DonationActive {
        id: Set(Uuid::new_v4()),
        user_id: Set(ctx.user_id),
        amount: Set(payload.amount),
        donation_type: Set(payload.donation_type),
        message: Set(payload.message),
        is_anonymous: Set(payload.is_anonymous),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    audit::record(
        &state.orm,
        ctx.user_id,
        "donation_create",
        "donations",
        serde_json::json!({ "donation_id": donation.id, "amount": donation.amount }),
    )
    .await;

    Ok(ApiResponse::success(
        "Thank you for your donation",
        donation.into(),
        Some(Meta::empty()),
    ))
}

/// Admin listing; anonymous donors are returned without identifying fields.
pub async fn list_all(
    state: &AppState,
    pagination: Pagination,
) -> AppResult<ApiResponse<DonationList>> {
    let window = pagination.normalize();
    let stmt = Statement::from_sql_and_values(
        DbBackend::Postgres,
        r#"
        SELECT d.id, d.amount, d.donation_type, d.message, d.is_anonymous,
               CASE WHEN d.is_anonymous THEN NULL ELSE pr.email END AS donor_email,
               CASE WHEN d.is_anonymous THEN NULL ELSE pr.first_name END AS donor_first_name,
               CASE WHEN d.is_anonymous THEN NULL ELSE pr.last_name END AS donor_last_name,
               d.created_at
        FROM donations d
        LEFT JOIN profiles pr ON pr.id = d.user_id
        ORDER BY d.created_at DESC
        LIMIT $1 OFFSET $2
        "#,
        [window.per_page.into(), window.offset.into()],
    );

    let (items, totals) = tokio::try_join!(
        async { Ok::<_, AppError>(DonationView::find_by_statement(stmt).all(&state.orm).await?) },
        async {
            let totals: (i64, i64) = sqlx::query_as(
                "SELECT COUNT(*), COALESCE(SUM(amount), 0)::BIGINT FROM donations",
            )
            .fetch_one(state.pool())
            .await?;
            Ok::<_, AppError>(totals)
        },
    )?;
    let (count, total_amount) = totals;

    Ok(ApiResponse::paged(
        "Donations",
        DonationList {
            items,
            total_amount,
        },
        &window,
        count as u64,
    ))
}
