mod common;

use chrono::{Days, Utc};
use pet_adoption_api::{
    dto::medical::CreateReminderRequest,
    entity::enums::{ReminderStatus, Role},
    error::AppError,
    services::{dashboard_service, medical_service},
};
use uuid::Uuid;

#[tokio::test]
async fn dashboard_lists_upcoming_pending_reminders() -> anyhow::Result<()> {
    let Some(state) = common::setup_state().await? else {
        return Ok(());
    };
    let owner = common::account(&state, Role::User).await?;
    let vet = common::account(&state, Role::Vet).await?;
    let pet_id = common::insert_pet(&state, "Tofu").await?;
    let today = Utc::now().date_naive();
    let next_week = today + Days::new(7);

    let later = medical_service::create_reminder(
        &state,
        &vet,
        pet_id,
        CreateReminderRequest {
            user_id: owner.user_id,
            vaccine_name: "Rabies".into(),
            due_date: next_week,
        },
    )
    .await?;
    assert_eq!(later.data.expect("reminder").status, ReminderStatus::Pending);

    medical_service::create_reminder(
        &state,
        &vet,
        pet_id,
        CreateReminderRequest {
            user_id: owner.user_id,
            vaccine_name: "Distemper".into(),
            due_date: today + Days::new(1),
        },
    )
    .await?;

    // Completed and overdue reminders stay off the dashboard.
    for (name, due, status) in [
        ("Leptospirosis", next_week, "completed"),
        ("Bordetella", today - Days::new(3), "pending"),
    ] {
        sqlx::query(
            "INSERT INTO vaccination_reminders (id, pet_id, user_id, vaccine_name, due_date, status) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(Uuid::new_v4())
        .bind(pet_id)
        .bind(owner.user_id)
        .bind(name)
        .bind(due)
        .bind(status)
        .execute(state.pool())
        .await?;
    }

    let dashboard = dashboard_service::dashboard(&state, &owner).await?;
    let reminders = dashboard.data.expect("dashboard").vaccination_reminders;
    let names: Vec<&str> = reminders.iter().map(|r| r.vaccine_name.as_str()).collect();
    assert_eq!(names, ["Distemper", "Rabies"]);
    assert!(reminders.iter().all(|r| r.pet_name == "Tofu"));

    let stranger = common::account(&state, Role::User).await?;
    let other = dashboard_service::dashboard(&state, &stranger).await?;
    assert!(other.data.expect("dashboard").vaccination_reminders.is_empty());
    Ok(())
}

#[tokio::test]
async fn reminders_reject_past_dates_and_missing_pets() -> anyhow::Result<()> {
    let Some(state) = common::setup_state().await? else {
        return Ok(());
    };
    let vet = common::account(&state, Role::Vet).await?;
    let pet_id = common::insert_pet(&state, "Miso").await?;
    let today = Utc::now().date_naive();

    let err = medical_service::create_reminder(
        &state,
        &vet,
        pet_id,
        CreateReminderRequest {
            user_id: Uuid::new_v4(),
            vaccine_name: "Rabies".into(),
            due_date: today - Days::new(1),
        },
    )
    .await
    .err()
    .expect("past due date");
    assert!(matches!(err, AppError::Validation(_)));

    let err = medical_service::create_reminder(
        &state,
        &vet,
        Uuid::new_v4(),
        CreateReminderRequest {
            user_id: Uuid::new_v4(),
            vaccine_name: "Rabies".into(),
            due_date: today,
        },
    )
    .await
    .err()
    .expect("missing pet");
    assert!(matches!(err, AppError::NotFound));
    Ok(())
}
