mod common;

use chrono::{Duration, Utc};
use pet_adoption_api::{
    dto::volunteers::{CreateActivityRequest, UpdateVolunteerStatusRequest, VolunteerSignUpRequest},
    entity::enums::{ActivityStatus, AssignmentStatus, Role, VolunteerStatus},
    error::AppError,
    middleware::auth::AuthContext,
    routes::params::Pagination,
    services::{user_service, volunteer_service},
    state::AppState,
};

/// Signs a user up and has `admin` approve them; returns their refreshed context.
async fn approved_volunteer(state: &AppState, admin: &AuthContext) -> anyhow::Result<AuthContext> {
    let user = common::account(state, Role::User).await?;
    let application = volunteer_service::sign_up(
        state,
        &user,
        VolunteerSignUpRequest {
            availability: Some("Saturdays".into()),
            skills: Some("Dog walking".into()),
            experience: None,
        },
    )
    .await?;
    let volunteer = application.data.expect("volunteer");

    let reviewed = volunteer_service::update_status(
        state,
        admin,
        volunteer.id,
        UpdateVolunteerStatusRequest {
            status: VolunteerStatus::Approved,
        },
    )
    .await?;
    let reviewed = reviewed.data.expect("volunteer");
    assert_eq!(reviewed.status, VolunteerStatus::Approved);
    assert!(reviewed.approved_at.is_some());

    let role = user_service::resolve_role(&state.orm, user.user_id).await?;
    assert_eq!(role, Role::Volunteer);
    Ok(AuthContext { role, ..user })
}

#[tokio::test]
async fn full_activity_rejects_further_sign_ups() -> anyhow::Result<()> {
    let Some(state) = common::setup_state().await? else {
        return Ok(());
    };
    let admin = common::account(&state, Role::Admin).await?;

    let activity = volunteer_service::create_activity(
        &state,
        &admin,
        CreateActivityRequest {
            title: "Kennel deep clean".into(),
            description: None,
            date: (Utc::now() + Duration::days(2)).date_naive(),
            time: Some("09:00".into()),
            location: Some("Kennel block B".into()),
            volunteers_needed: 2,
        },
    )
    .await?;
    let activity_id = activity.data.expect("activity").id;

    let first = approved_volunteer(&state, &admin).await?;
    let second = approved_volunteer(&state, &admin).await?;
    let third = approved_volunteer(&state, &admin).await?;

    let assignment = volunteer_service::sign_up_for_activity(&state, &first, activity_id).await?;
    let assignment = assignment.data.expect("assignment");
    assert_eq!(assignment.status, AssignmentStatus::Assigned);

    let twice = volunteer_service::sign_up_for_activity(&state, &first, activity_id)
        .await
        .err()
        .expect("duplicate sign-up");
    assert!(matches!(twice, AppError::Conflict(_)));

    volunteer_service::sign_up_for_activity(&state, &second, activity_id).await?;

    let full = volunteer_service::sign_up_for_activity(&state, &third, activity_id)
        .await
        .err()
        .expect("activity is at capacity");
    assert!(matches!(full, AppError::Conflict(_)));

    let all = volunteer_service::list_all_activities(&state, Pagination::new(Some(1), Some(100))).await?;
    let stored = all
        .data
        .expect("activities")
        .items
        .into_iter()
        .find(|a| a.id == activity_id)
        .expect("activity listed");
    assert_eq!(stored.volunteers_assigned, 2);
    assert_eq!(stored.status, ActivityStatus::Full);

    let completed = volunteer_service::complete_assignment(&state, &first, assignment.id).await?;
    assert_eq!(completed.data.expect("assignment").status, AssignmentStatus::Completed);
    let err = volunteer_service::complete_assignment(&state, &second, assignment.id)
        .await
        .err()
        .expect("completing someone else's assignment");
    assert!(matches!(err, AppError::Forbidden));
    Ok(())
}

#[tokio::test]
async fn pending_volunteers_cannot_sign_up() -> anyhow::Result<()> {
    let Some(state) = common::setup_state().await? else {
        return Ok(());
    };
    let admin = common::account(&state, Role::Admin).await?;
    let user = common::account(&state, Role::Volunteer).await?;

    volunteer_service::sign_up(
        &state,
        &user,
        VolunteerSignUpRequest {
            availability: None,
            skills: None,
            experience: None,
        },
    )
    .await?;

    let again = volunteer_service::sign_up(
        &state,
        &user,
        VolunteerSignUpRequest {
            availability: None,
            skills: None,
            experience: None,
        },
    )
    .await
    .err()
    .expect("one application per user");
    assert!(matches!(again, AppError::Conflict(_)));

    let activity = volunteer_service::create_activity(
        &state,
        &admin,
        CreateActivityRequest {
            title: "Adoption fair setup".into(),
            description: None,
            date: (Utc::now() + Duration::days(4)).date_naive(),
            time: None,
            location: None,
            volunteers_needed: 3,
        },
    )
    .await?;
    let activity_id = activity.data.expect("activity").id;

    let err = volunteer_service::sign_up_for_activity(&state, &user, activity_id)
        .await
        .err()
        .expect("pending volunteer");
    assert!(matches!(err, AppError::Forbidden));
    Ok(())
}
