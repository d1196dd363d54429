mod common;

use pet_adoption_api::{
    dto::{applications::CreateApplicationRequest, feedback::CreateFeedbackRequest},
    entity::enums::{ApplicationStatus, PetStatus, Role},
    error::AppError,
    middleware::auth::AuthContext,
    routes::params::Pagination,
    services::{application_service, feedback_service, pet_service},
    state::AppState,
};
use sea_orm::{ConnectionTrait, DbBackend, Statement, TransactionTrait};
use std::time::Duration;
use uuid::Uuid;

fn application_for(pet_id: Uuid) -> CreateApplicationRequest {
    CreateApplicationRequest {
        pet_id,
        home_type: "house".into(),
        has_yard: true,
        has_other_pets: false,
        has_children: true,
        experience: Some("Grew up with dogs".into()),
        reason: "Looking for a running companion".into(),
        first_name: Some("Rosa".into()),
        last_name: Some("Park".into()),
        phone: Some("555-0100".into()),
        address: Some("1 Shelter Lane".into()),
    }
}

fn feedback(rating: i32) -> CreateFeedbackRequest {
    CreateFeedbackRequest {
        rating,
        comment: "Settled in within a week".into(),
    }
}

async fn status_on_reread(
    state: &AppState,
    ctx: &AuthContext,
    id: Uuid,
) -> anyhow::Result<ApplicationStatus> {
    let summary = application_service::get(state, ctx, id).await?;
    Ok(summary.data.expect("summary").status)
}

async fn pet_status(state: &AppState, pet_id: Uuid) -> anyhow::Result<PetStatus> {
    let detail = pet_service::get_pet_detail(state, pet_id).await?;
    Ok(detail.data.expect("detail").pet.status)
}

#[tokio::test]
async fn reviewed_transitions_are_visible_and_gate_feedback() -> anyhow::Result<()> {
    let Some(state) = common::setup_state().await? else {
        return Ok(());
    };
    let applicant = common::account(&state, Role::User).await?;
    let vet = common::account(&state, Role::Vet).await?;
    let pet_id = common::insert_pet(&state, "Juniper").await?;

    let created = application_service::create(&state, &applicant, application_for(pet_id)).await?;
    let application = created.data.expect("application");
    assert_eq!(application.status, ApplicationStatus::Pending);

    // Feedback is only accepted once the adoption is approved.
    let err = feedback_service::create(&state, &applicant, application.id, feedback(5))
        .await
        .err()
        .expect("feedback on pending application");
    assert!(matches!(err, AppError::BadRequest(_)));

    let duplicate = application_service::create(&state, &applicant, application_for(pet_id))
        .await
        .err()
        .expect("second open application");
    assert!(matches!(duplicate, AppError::Conflict(_)));

    let moved = application_service::transition(&state, &vet, application.id, ApplicationStatus::UnderReview).await?;
    assert!(moved.data.expect("outcome").changed);
    assert_eq!(
        status_on_reread(&state, &applicant, application.id).await?,
        ApplicationStatus::UnderReview
    );

    let same = application_service::transition(&state, &vet, application.id, ApplicationStatus::UnderReview).await?;
    assert!(!same.data.expect("outcome").changed);

    application_service::transition(&state, &vet, application.id, ApplicationStatus::Approved).await?;
    assert_eq!(
        status_on_reread(&state, &vet, application.id).await?,
        ApplicationStatus::Approved
    );
    assert_eq!(pet_status(&state, pet_id).await?, PetStatus::Adopted);

    let history = application_service::history(&state, &applicant, application.id).await?;
    let events = history.data.expect("history").items;
    assert_eq!(events.len(), 2);
    assert_eq!(events[1].to_status, ApplicationStatus::Approved);
    assert_eq!(events[1].actor_role, Role::Vet);

    let stranger = common::account(&state, Role::User).await?;
    let err = feedback_service::create(&state, &stranger, application.id, feedback(4))
        .await
        .err()
        .expect("feedback from non-owner");
    assert!(matches!(err, AppError::Forbidden));

    let err = feedback_service::create(&state, &applicant, application.id, feedback(9))
        .await
        .err()
        .expect("rating out of range");
    assert!(matches!(err, AppError::Validation(_)));

    feedback_service::create(&state, &applicant, application.id, feedback(5)).await?;
    let again = feedback_service::create(&state, &applicant, application.id, feedback(4))
        .await
        .err()
        .expect("second feedback");
    assert!(matches!(again, AppError::Conflict(_)));

    let listed = feedback_service::list_for_pet(&state, pet_id, Pagination::default()).await?;
    assert_eq!(listed.data.expect("feedback").items.len(), 1);
    Ok(())
}

#[tokio::test]
async fn only_admins_reset_decisions() -> anyhow::Result<()> {
    let Some(state) = common::setup_state().await? else {
        return Ok(());
    };
    let applicant = common::account(&state, Role::User).await?;
    let vet = common::account(&state, Role::Vet).await?;
    let admin = common::account(&state, Role::Admin).await?;
    let pet_id = common::insert_pet(&state, "Mochi").await?;

    let created = application_service::create(&state, &applicant, application_for(pet_id)).await?;
    let id = created.data.expect("application").id;

    application_service::transition(&state, &admin, id, ApplicationStatus::Approved).await?;

    let err = application_service::transition(&state, &vet, id, ApplicationStatus::Pending)
        .await
        .err()
        .expect("vet reset");
    assert!(matches!(err, AppError::Forbidden));

    let err = application_service::transition(&state, &applicant, id, ApplicationStatus::Rejected)
        .await
        .err()
        .expect("applicant review");
    assert!(matches!(err, AppError::Forbidden));

    application_service::transition(&state, &admin, id, ApplicationStatus::Pending).await?;
    assert_eq!(
        status_on_reread(&state, &admin, id).await?,
        ApplicationStatus::Pending
    );
    assert_eq!(pet_status(&state, pet_id).await?, PetStatus::Available);
    Ok(())
}

#[tokio::test]
async fn approving_an_adopted_pet_conflicts() -> anyhow::Result<()> {
    let Some(state) = common::setup_state().await? else {
        return Ok(());
    };
    let first = common::account(&state, Role::User).await?;
    let second = common::account(&state, Role::User).await?;
    let admin = common::account(&state, Role::Admin).await?;
    let pet_id = common::insert_pet(&state, "Clover").await?;

    let a = application_service::create(&state, &first, application_for(pet_id)).await?;
    let b = application_service::create(&state, &second, application_for(pet_id)).await?;
    let (a, b) = (a.data.expect("a").id, b.data.expect("b").id);

    application_service::transition(&state, &admin, a, ApplicationStatus::Approved).await?;
    let err = application_service::transition(&state, &admin, b, ApplicationStatus::Approved)
        .await
        .err()
        .expect("pet already adopted");
    assert!(matches!(err, AppError::Conflict(_)));

    let err = application_service::get(&state, &first, b)
        .await
        .err()
        .expect("reading someone else's application");
    assert!(matches!(err, AppError::Forbidden));
    Ok(())
}

#[tokio::test]
async fn every_allowed_transition_persists() -> anyhow::Result<()> {
    use ApplicationStatus::*;

    let Some(state) = common::setup_state().await? else {
        return Ok(());
    };
    let admin = common::account(&state, Role::Admin).await?;
    let pairs = [
        (Pending, UnderReview),
        (Pending, Approved),
        (Pending, Rejected),
        (UnderReview, Approved),
        (UnderReview, Rejected),
        (Approved, Pending),
        (Rejected, Pending),
    ];

    for (from, to) in pairs {
        let applicant = common::account(&state, Role::User).await?;
        let pet_id = common::insert_pet(&state, "Rowan").await?;
        let created = application_service::create(&state, &applicant, application_for(pet_id)).await?;
        let id = created.data.expect("application").id;

        let mut expected_events = 0;
        if from != Pending {
            application_service::transition(&state, &admin, id, from).await?;
            expected_events += 1;
        }
        assert_eq!(status_on_reread(&state, &applicant, id).await?, from);

        let outcome = application_service::transition(&state, &admin, id, to).await?;
        assert!(outcome.data.expect("outcome").changed, "{from} -> {to}");
        expected_events += 1;

        assert_eq!(status_on_reread(&state, &applicant, id).await?, to, "{from} -> {to}");
        let history = application_service::history(&state, &applicant, id).await?;
        let events = history.data.expect("history").items;
        assert_eq!(events.len(), expected_events, "{from} -> {to}");
        let last = events.last().expect("event");
        assert_eq!(last.to_status, to);
        assert_eq!(last.actor_role, Role::Admin);
    }
    Ok(())
}

#[tokio::test]
async fn feedback_waits_for_a_concurrent_reset() -> anyhow::Result<()> {
    let Some(state) = common::setup_state().await? else {
        return Ok(());
    };
    let applicant = common::account(&state, Role::User).await?;
    let admin = common::account(&state, Role::Admin).await?;
    let pet_id = common::insert_pet(&state, "Hazel").await?;

    let created = application_service::create(&state, &applicant, application_for(pet_id)).await?;
    let id = created.data.expect("application").id;
    application_service::transition(&state, &admin, id, ApplicationStatus::Approved).await?;

    // Hold the row while it is moved back to pending.
    let reset = state.orm.begin().await?;
    reset
        .execute(Statement::from_sql_and_values(
            DbBackend::Postgres,
            "UPDATE adoption_applications SET status = 'pending' WHERE id = $1",
            [id.into()],
        ))
        .await?;

    let pending = tokio::spawn({
        let state = state.clone();
        let applicant = applicant.clone();
        async move { feedback_service::create(&state, &applicant, id, feedback(5)).await }
    });
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert!(!pending.is_finished());

    reset.commit().await?;
    let err = pending
        .await?
        .err()
        .expect("feedback after reset");
    assert!(matches!(err, AppError::BadRequest(_)));
    Ok(())
}
