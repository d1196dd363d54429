use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, ConnectionTrait, DbBackend, EntityTrait,
    FromQueryResult, QueryFilter, QueryOrder, Set, Statement,
};
use uuid::Uuid;

use crate::{
    audit,
    dto::medical::{CreateMedicalRecordRequest, CreateReminderRequest, MedicalRecordList, ReminderView},
    entity::{
        MedicalRecords, Pets,
        enums::ReminderStatus,
        medical_records::{ActiveModel as RecordActive, Column as RecordCol},
        vaccination_reminders::ActiveModel as ReminderActive,
    },
    error::{AppError, AppResult},
    middleware::auth::AuthContext,
    models::{MedicalRecord, VaccinationReminder},
    response::{ApiResponse, Meta},
    state::AppState,
};

async fn ensure_pet(state: &AppState, pet_id: Uuid) -> AppResult<()> {
    match Pets::find_by_id(pet_id).one(&state.orm).await? {
        Some(_) => Ok(()),
        None => Err(AppError::NotFound),
    }
}

pub async fn list_for_pet(
    state: &AppState,
    pet_id: Uuid,
) -> AppResult<ApiResponse<MedicalRecordList>> {
    ensure_pet(state, pet_id).await?;

    let items = MedicalRecords::find()
        .filter(RecordCol::PetId.eq(pet_id))
        .order_by_desc(RecordCol::Date)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(MedicalRecord::from)
        .collect();

    Ok(ApiResponse::success(
        "Medical records",
        MedicalRecordList { items },
        Some(Meta::empty()),
    ))
}

pub async fn create(
    state: &AppState,
    ctx: &AuthContext,
    pet_id: Uuid,
    payload: CreateMedicalRecordRequest,
) -> AppResult<ApiResponse<MedicalRecord>> {
    payload.validate()?;
    ensure_pet(state, pet_id).await?;

    let record = RecordActive {
        id: Set(Uuid::new_v4()),
        pet_id: Set(pet_id),
        record_type: Set(payload.record_type),
        description: Set(payload.description.trim().to_owned()),
        date: Set(payload.date),
        veterinarian: Set(payload.veterinarian),
        created_by: Set(Some(ctx.user_id)),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    audit::record(
        &state.orm,
        ctx.user_id,
        "medical_record_create",
        "medical_records",
        serde_json::json!({ "pet_id": pet_id, "record_id": record.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Medical record added",
        record.into(),
        Some(Meta::empty()),
    ))
}

pub async fn create_reminder(
    state: &AppState,
    ctx: &AuthContext,
    pet_id: Uuid,
    payload: CreateReminderRequest,
) -> AppResult<ApiResponse<VaccinationReminder>> {
    payload.validate(Utc::now().date_naive())?;
    ensure_pet(state, pet_id).await?;

    let reminder = ReminderActive {
        id: Set(Uuid::new_v4()),
        pet_id: Set(pet_id),
        user_id: Set(payload.user_id),
        vaccine_name: Set(payload.vaccine_name.trim().to_owned()),
        due_date: Set(payload.due_date),
        status: Set(ReminderStatus::Pending),
        created_by: Set(Some(ctx.user_id)),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    audit::record(
        &state.orm,
        ctx.user_id,
        "vaccination_reminder_create",
        "vaccination_reminders",
        serde_json::json!({ "pet_id": pet_id, "reminder_id": reminder.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Vaccination reminder added",
        reminder.into(),
        Some(Meta::empty()),
    ))
}

/// Pending reminders for `user_id` due on or after `from`, soonest first.
pub(crate) async fn fetch_upcoming_reminders<C: ConnectionTrait>(
    conn: &C,
    user_id: Uuid,
    from: NaiveDate,
    limit: i64,
) -> AppResult<Vec<ReminderView>> {
    let stmt = Statement::from_sql_and_values(
        DbBackend::Postgres,
        r#"
        SELECT r.id, r.pet_id, p.name AS pet_name, r.vaccine_name, r.due_date, r.status
        FROM vaccination_reminders r
        JOIN pets p ON p.id = r.pet_id
        WHERE r.user_id = $1 AND r.status = 'pending' AND r.due_date >= $2
        ORDER BY r.due_date ASC
        LIMIT $3
        "#,
        [user_id.into(), from.into(), limit.into()],
    );
    Ok(ReminderView::find_by_statement(stmt).all(conn).await?)
}
