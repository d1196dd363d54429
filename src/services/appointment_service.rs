use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, Condition, ConnectionTrait, DbBackend,
    EntityTrait, FromQueryResult, PaginatorTrait, QueryFilter, QuerySelect, Set, Statement,
    TransactionTrait, sea_query::LockType,
};
use uuid::Uuid;

use crate::{
    audit,
    dto::appointments::{
        AppointmentList, AppointmentView, CreateAppointmentRequest,
        UpdateAppointmentStatusRequest,
    },
    entity::{
        Pets, VetAppointments,
        enums::AppointmentStatus,
        vet_appointments::{ActiveModel as AppointmentActive, Column as AppointmentCol},
    },
    error::{AppError, AppResult},
    middleware::auth::AuthContext,
    models::Appointment,
    response::{ApiResponse, Meta},
    routes::params::{AppointmentListQuery, PageWindow},
    state::AppState,
};

/// Filters for joined appointment listings.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct AppointmentFilter {
    pub user_id: Option<Uuid>,
    pub status: Option<AppointmentStatus>,
    pub from: Option<DateTime<Utc>>,
}

pub(crate) async fn fetch_views<C: ConnectionTrait>(
    conn: &C,
    filter: AppointmentFilter,
    window: &PageWindow,
) -> AppResult<Vec<AppointmentView>> {
    let stmt = Statement::from_sql_and_values(
        DbBackend::Postgres,
        r#"
        SELECT va.id, va.pet_id, p.name AS pet_name, va.user_id,
               pr.email AS owner_email, pr.first_name AS owner_first_name,
               pr.last_name AS owner_last_name, va.appointment_date, va.appointment_type,
               va.reason, va.notes, va.status, va.created_at
        FROM vet_appointments va
        JOIN pets p ON p.id = va.pet_id
        LEFT JOIN profiles pr ON pr.id = va.user_id
        WHERE ($1::uuid IS NULL OR va.user_id = $1)
          AND ($2::text IS NULL OR va.status = $2)
          AND ($3::timestamptz IS NULL OR va.appointment_date >= $3)
        ORDER BY va.appointment_date ASC
        LIMIT $4 OFFSET $5
        "#,
        [
            filter.user_id.into(),
            filter.status.map(|s| s.to_string()).into(),
            filter.from.into(),
            window.per_page.into(),
            window.offset.into(),
        ],
    );
    Ok(AppointmentView::find_by_statement(stmt).all(conn).await?)
}

async fn count(state: &AppState, filter: AppointmentFilter) -> AppResult<u64> {
    let mut condition = Condition::all();
    if let Some(user_id) = filter.user_id {
        condition = condition.add(AppointmentCol::UserId.eq(user_id));
    }
    if let Some(status) = filter.status {
        condition = condition.add(AppointmentCol::Status.eq(status));
    }
    if let Some(from) = filter.from {
        condition = condition.add(AppointmentCol::AppointmentDate.gte(from));
    }
    Ok(VetAppointments::find()
        .filter(condition)
        .count(&state.orm)
        .await?)
}

async fn list_with(
    state: &AppState,
    filter: AppointmentFilter,
    window: PageWindow,
) -> AppResult<ApiResponse<AppointmentList>> {
    let (items, total) = tokio::try_join!(
        fetch_views(&state.orm, filter, &window),
        count(state, filter),
    )?;
    Ok(ApiResponse::paged(
        "Appointments",
        AppointmentList { items },
        &window,
        total,
    ))
}

pub async fn create(
    state: &AppState,
    ctx: &AuthContext,
    payload: CreateAppointmentRequest,
) -> AppResult<ApiResponse<Appointment>> {
    payload.validate(Utc::now())?;

    if Pets::find_by_id(payload.pet_id).one(&state.orm).await?.is_none() {
        return Err(AppError::NotFound);
    }

    let appointment = AppointmentActive {
        id: Set(Uuid::new_v4()),
        pet_id: Set(payload.pet_id),
        user_id: Set(ctx.user_id),
        appointment_date: Set(payload.appointment_date.into()),
        appointment_type: Set(payload.appointment_type),
        reason: Set(payload.reason),
        notes: Set(None),
        status: Set(AppointmentStatus::Scheduled),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    audit::record(
        &state.orm,
        ctx.user_id,
        "appointment_create",
        "vet_appointments",
        serde_json::json!({ "appointment_id": appointment.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Appointment scheduled",
        appointment.into(),
        Some(Meta::empty()),
    ))
}

pub async fn list_mine(
    state: &AppState,
    ctx: &AuthContext,
    query: AppointmentListQuery,
) -> AppResult<ApiResponse<AppointmentList>> {
    let filter = AppointmentFilter {
        user_id: Some(ctx.user_id),
        status: query.status,
        from: None,
    };
    list_with(state, filter, query.window()).await
}

pub async fn list_all(
    state: &AppState,
    query: AppointmentListQuery,
) -> AppResult<ApiResponse<AppointmentList>> {
    let filter = AppointmentFilter {
        status: query.status,
        ..Default::default()
    };
    list_with(state, filter, query.window()).await
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusChange {
    Unchanged,
    Apply,
}

pub fn plan_status_change(
    from: AppointmentStatus,
    to: AppointmentStatus,
) -> AppResult<StatusChange> {
    use AppointmentStatus::*;

    match (from, to) {
        _ if from == to => Ok(StatusChange::Unchanged),
        (Scheduled, Completed | Cancelled) => Ok(StatusChange::Apply),
        _ => Err(AppError::BadRequest(format!(
            "Cannot change appointment status from {from} to {to}"
        ))),
    }
}

/// Owner cancellation. Cancelling twice is harmless.
pub async fn cancel(
    state: &AppState,
    ctx: &AuthContext,
    id: Uuid,
) -> AppResult<ApiResponse<Appointment>> {
    let txn = state.orm.begin().await?;

    let appointment = VetAppointments::find_by_id(id)
        .lock(LockType::Update)
        .one(&txn)
        .await?;
    let appointment = match appointment {
        Some(a) => a,
        None => return Err(AppError::NotFound),
    };

    if appointment.user_id != ctx.user_id {
        return Err(AppError::Forbidden);
    }

    let appointment = match plan_status_change(appointment.status, AppointmentStatus::Cancelled)? {
        StatusChange::Unchanged => appointment,
        StatusChange::Apply => {
            let mut active: AppointmentActive = appointment.into();
            active.status = Set(AppointmentStatus::Cancelled);
            active.updated_at = Set(Utc::now().into());
            active.update(&txn).await?
        }
    };

    txn.commit().await?;

    audit::record(
        &state.orm,
        ctx.user_id,
        "appointment_cancel",
        "vet_appointments",
        serde_json::json!({ "appointment_id": appointment.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Appointment cancelled",
        appointment.into(),
        Some(Meta::empty()),
    ))
}

pub async fn update_status(
    state: &AppState,
    ctx: &AuthContext,
    id: Uuid,
    payload: UpdateAppointmentStatusRequest,
) -> AppResult<ApiResponse<Appointment>> {
    let txn = state.orm.begin().await?;

    let appointment = VetAppointments::find_by_id(id)
        .lock(LockType::Update)
        .one(&txn)
        .await?;
    let appointment = match appointment {
        Some(a) => a,
        None => return Err(AppError::NotFound),
    };

    let from = appointment.status;
    let change = plan_status_change(from, payload.status)?;

    if change == StatusChange::Unchanged && payload.notes.is_none() {
        txn.commit().await?;
        return Ok(ApiResponse::success(
            "Status unchanged",
            appointment.into(),
            Some(Meta::empty()),
        ));
    }

    let mut active: AppointmentActive = appointment.into();
    active.status = Set(payload.status);
    if let Some(notes) = payload.notes {
        active.notes = Set(Some(notes));
    }
    active.updated_at = Set(Utc::now().into());
    let appointment = active.update(&txn).await?;

    txn.commit().await?;

    if change == StatusChange::Apply {
        tracing::info!(
            appointment_id = %appointment.id,
            %from,
            to = %appointment.status,
            actor = %ctx.user_id,
            "appointment status changed"
        );
    }
    audit::record(
        &state.orm,
        ctx.user_id,
        "appointment_status",
        "vet_appointments",
        serde_json::json!({ "appointment_id": appointment.id, "status": appointment.status }),
    )
    .await;

    Ok(ApiResponse::success(
        "Appointment updated",
        appointment.into(),
        Some(Meta::empty()),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use AppointmentStatus::*;

    #[test]
    fn scheduled_appointments_can_finish_or_cancel() {
        assert_eq!(plan_status_change(Scheduled, Completed).unwrap(), StatusChange::Apply);
        assert_eq!(plan_status_change(Scheduled, Cancelled).unwrap(), StatusChange::Apply);
        assert_eq!(
            plan_status_change(Cancelled, Cancelled).unwrap(),
            StatusChange::Unchanged
        );
    }

    #[test]
    fn finished_appointments_are_final() {
        for (from, to) in [
            (Completed, Scheduled),
            (Completed, Cancelled),
            (Cancelled, Scheduled),
            (Cancelled, Completed),
        ] {
            assert!(matches!(
                plan_status_change(from, to),
                Err(AppError::BadRequest(_))
            ));
        }
    }
}
