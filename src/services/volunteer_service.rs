use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, Condition, ConnectionTrait, DbBackend,
    EntityTrait, FromQueryResult, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
    Statement, TransactionTrait, sea_query::LockType,
};
use uuid::Uuid;

use crate::{
    audit,
    dto::volunteers::{
        ActivityCapacity, ActivityList, AssignmentList, AssignmentView, CreateActivityRequest,
        UpdateVolunteerStatusRequest, VolunteerList, VolunteerSignUpRequest, VolunteerView,
    },
    entity::{
        UserRoles, VolunteerActivities, VolunteerAssignments, Volunteers,
        enums::{ActivityStatus, AssignmentStatus, Role, VolunteerStatus},
        volunteer_activities::{ActiveModel as ActivityActive, Column as ActivityCol},
        volunteer_assignments::{ActiveModel as AssignmentActive, Column as AssignmentCol},
        volunteers::{ActiveModel as VolunteerActive, Column as VolunteerCol, Model as VolunteerModel},
    },
    error::{AppError, AppResult},
    middleware::auth::AuthContext,
    models::{Volunteer, VolunteerActivity, VolunteerAssignment},
    response::{ApiResponse, Meta},
    routes::params::{Pagination, VolunteerListQuery},
    services::user_service,
    state::AppState,
};

pub async fn sign_up(
    state: &AppState,
    ctx: &AuthContext,
    payload: VolunteerSignUpRequest,
) -> AppResult<ApiResponse<Volunteer>> {
    let inserted = VolunteerActive {
        id: Set(Uuid::new_v4()),
        user_id: Set(ctx.user_id),
        availability: Set(payload.availability),
        skills: Set(payload.skills),
        experience: Set(payload.experience),
        status: Set(VolunteerStatus::Pending),
        application_date: NotSet,
        approved_at: Set(None),
    }
    .insert(&state.orm)
    .await
    .map_err(AppError::from);

    let volunteer = match inserted {
        Ok(v) => v,
        Err(err) if err.is_unique_violation() => {
            return Err(AppError::Conflict(
                "You have already applied to volunteer".into(),
            ));
        }
        Err(err) => return Err(err),
    };

    audit::record(
        &state.orm,
        ctx.user_id,
        "volunteer_sign_up",
        "volunteers",
        serde_json::json!({ "volunteer_id": volunteer.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Volunteer application submitted",
        volunteer.into(),
        Some(Meta::empty()),
    ))
}

async fn find_by_user<C: ConnectionTrait>(conn: &C, user_id: Uuid) -> AppResult<VolunteerModel> {
    let volunteer = Volunteers::find()
        .filter(VolunteerCol::UserId.eq(user_id))
        .one(conn)
        .await?;
    match volunteer {
        Some(v) => Ok(v),
        None => Err(AppError::NotFound),
    }
}

pub async fn my_application(
    state: &AppState,
    ctx: &AuthContext,
) -> AppResult<ApiResponse<Volunteer>> {
    let volunteer = find_by_user(&state.orm, ctx.user_id).await?;
    Ok(ApiResponse::success(
        "Volunteer application",
        volunteer.into(),
        Some(Meta::empty()),
    ))
}

pub async fn list_volunteers(
    state: &AppState,
    query: VolunteerListQuery,
) -> AppResult<ApiResponse<VolunteerList>> {
    let window = query.window();
    let status = query.status.map(|s| s.to_string());
    let stmt = Statement::from_sql_and_values(
        DbBackend::Postgres,
        r#"
        SELECT v.id, v.user_id, pr.email, pr.first_name, pr.last_name,
               v.availability, v.skills, v.experience, v.status,
               v.application_date, v.approved_at
        FROM volunteers v
        LEFT JOIN profiles pr ON pr.id = v.user_id
        WHERE ($1::text IS NULL OR v.status = $1)
        ORDER BY v.application_date DESC
        LIMIT $2 OFFSET $3
        "#,
        [status.into(), window.per_page.into(), window.offset.into()],
    );

    let mut condition = Condition::all();
    if let Some(status) = query.status {
        condition = condition.add(VolunteerCol::Status.eq(status));
    }

    let (items, total) = tokio::try_join!(
        async { Ok::<_, AppError>(VolunteerView::find_by_statement(stmt).all(&state.orm).await?) },
        async { Ok::<_, AppError>(Volunteers::find().filter(condition).count(&state.orm).await?) },
    )?;

    Ok(ApiResponse::paged(
        "Volunteers",
        VolunteerList { items },
        &window,
        total,
    ))
}

/// Reviews a volunteer application. Approval grants the volunteer role to
/// plain users; staff keep their existing role.
pub async fn update_status(
    state: &AppState,
    ctx: &AuthContext,
    id: Uuid,
    payload: UpdateVolunteerStatusRequest,
) -> AppResult<ApiResponse<Volunteer>> {
    let txn = state.orm.begin().await?;

    let volunteer = Volunteers::find_by_id(id)
        .lock(LockType::Update)
        .one(&txn)
        .await?;
    let volunteer = match volunteer {
        Some(v) => v,
        None => return Err(AppError::NotFound),
    };

    let from = volunteer.status;
    let to = payload.status;
    if from == to {
        txn.commit().await?;
        return Ok(ApiResponse::success(
            "Status unchanged",
            volunteer.into(),
            Some(Meta::empty()),
        ));
    }
    if from != VolunteerStatus::Pending || to == VolunteerStatus::Pending {
        return Err(AppError::BadRequest(format!(
            "Cannot change volunteer status from {from} to {to}"
        )));
    }

    let user_id = volunteer.user_id;
    let mut active: VolunteerActive = volunteer.into();
    active.status = Set(to);
    if to == VolunteerStatus::Approved {
        active.approved_at = Set(Some(Utc::now().into()));
    }
    let volunteer = active.update(&txn).await?;

    if to == VolunteerStatus::Approved {
        let current = UserRoles::find_by_id(user_id).one(&txn).await?;
        if current.map(|r| r.role).unwrap_or_default() == Role::User {
            user_service::set_role(&txn, user_id, Role::Volunteer).await?;
        }
    }

    txn.commit().await?;

    tracing::info!(volunteer_id = %volunteer.id, %from, %to, "volunteer status changed");
    audit::record(
        &state.orm,
        ctx.user_id,
        "volunteer_status",
        "volunteers",
        serde_json::json!({ "volunteer_id": volunteer.id, "status": to }),
    )
    .await;

    Ok(ApiResponse::success(
        "Volunteer status updated",
        volunteer.into(),
        Some(Meta::empty()),
    ))
}

pub async fn create_activity(
    state: &AppState,
    ctx: &AuthContext,
    payload: CreateActivityRequest,
) -> AppResult<ApiResponse<VolunteerActivity>> {
    payload.validate()?;

    let activity = ActivityActive {
        id: Set(Uuid::new_v4()),
        title: Set(payload.title.trim().to_owned()),
        description: Set(payload.description),
        date: Set(payload.date),
        time: Set(payload.time),
        location: Set(payload.location),
        volunteers_needed: Set(payload.volunteers_needed),
        volunteers_assigned: Set(0),
        status: Set(ActivityStatus::Open),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    audit::record(
        &state.orm,
        ctx.user_id,
        "activity_create",
        "volunteer_activities",
        serde_json::json!({ "activity_id": activity.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Activity created",
        activity.into(),
        Some(Meta::empty()),
    ))
}

async fn list_activities_with(
    state: &AppState,
    status: Option<ActivityStatus>,
    pagination: Pagination,
) -> AppResult<ApiResponse<ActivityList>> {
    let window = pagination.normalize();
    let mut finder = VolunteerActivities::find().order_by_asc(ActivityCol::Date);
    if let Some(status) = status {
        finder = finder.filter(ActivityCol::Status.eq(status));
    }

    let total = finder.clone().count(&state.orm).await?;
    let items = finder
        .limit(window.limit())
        .offset(window.skip())
        .all(&state.orm)
        .await?
        .into_iter()
        .map(VolunteerActivity::from)
        .collect();

    Ok(ApiResponse::paged(
        "Activities",
        ActivityList { items },
        &window,
        total,
    ))
}

pub async fn list_all_activities(
    state: &AppState,
    pagination: Pagination,
) -> AppResult<ApiResponse<ActivityList>> {
    list_activities_with(state, None, pagination).await
}

pub async fn list_open_activities(
    state: &AppState,
    pagination: Pagination,
) -> AppResult<ApiResponse<ActivityList>> {
    list_activities_with(state, Some(ActivityStatus::Open), pagination).await
}

pub async fn sign_up_for_activity(
    state: &AppState,
    ctx: &AuthContext,
    activity_id: Uuid,
) -> AppResult<ApiResponse<VolunteerAssignment>> {
    let volunteer = find_by_user(&state.orm, ctx.user_id).await?;
    if volunteer.status != VolunteerStatus::Approved {
        return Err(AppError::Forbidden);
    }

    let txn = state.orm.begin().await?;

    let activity = VolunteerActivities::find_by_id(activity_id)
        .lock(LockType::Update)
        .one(&txn)
        .await?;
    let activity = match activity {
        Some(a) => a,
        None => return Err(AppError::NotFound),
    };

    let next = ActivityCapacity {
        status: activity.status,
        needed: activity.volunteers_needed,
        assigned: activity.volunteers_assigned,
    }
    .admit()?;

    let existing = VolunteerAssignments::find()
        .filter(AssignmentCol::VolunteerId.eq(volunteer.id))
        .filter(AssignmentCol::ActivityId.eq(activity.id))
        .one(&txn)
        .await?;
    if existing.is_some() {
        return Err(AppError::Conflict(
            "You are already signed up for this activity".into(),
        ));
    }

    let assignment = AssignmentActive {
        id: Set(Uuid::new_v4()),
        volunteer_id: Set(volunteer.id),
        activity_id: Set(activity.id),
        status: Set(AssignmentStatus::Assigned),
        assigned_at: NotSet,
        completed_at: Set(None),
    }
    .insert(&txn)
    .await?;

    let mut active: ActivityActive = activity.into();
    active.volunteers_assigned = Set(next.assigned);
    active.status = Set(next.status);
    let activity = active.update(&txn).await?;

    txn.commit().await?;

    tracing::info!(
        activity_id = %activity.id,
        assigned = activity.volunteers_assigned,
        needed = activity.volunteers_needed,
        "volunteer signed up"
    );
    audit::record(
        &state.orm,
        ctx.user_id,
        "activity_sign_up",
        "volunteer_assignments",
        serde_json::json!({ "activity_id": activity.id, "assignment_id": assignment.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Signed up",
        assignment.into(),
        Some(Meta::empty()),
    ))
}

pub async fn my_assignments(
    state: &AppState,
    ctx: &AuthContext,
    pagination: Pagination,
) -> AppResult<ApiResponse<AssignmentList>> {
    let window = pagination.normalize();
    let volunteer = find_by_user(&state.orm, ctx.user_id).await?;

    let stmt = Statement::from_sql_and_values(
        DbBackend::Postgres,
        r#"
        SELECT va.id, va.volunteer_id, va.activity_id, a.title AS activity_title,
               a.date AS activity_date, a.time AS activity_time,
               a.location AS activity_location, va.status, va.assigned_at, va.completed_at
        FROM volunteer_assignments va
        JOIN volunteer_activities a ON a.id = va.activity_id
        WHERE va.volunteer_id = $1
        ORDER BY va.assigned_at DESC
        LIMIT $2 OFFSET $3
        "#,
        [volunteer.id.into(), window.per_page.into(), window.offset.into()],
    );

    let (items, total) = tokio::try_join!(
        async { Ok::<_, AppError>(AssignmentView::find_by_statement(stmt).all(&state.orm).await?) },
        async {
            Ok::<_, AppError>(
                VolunteerAssignments::find()
                    .filter(AssignmentCol::VolunteerId.eq(volunteer.id))
                    .count(&state.orm)
                    .await?,
            )
        },
    )?;

    Ok(ApiResponse::paged(
        "Assignments",
        AssignmentList { items },
        &window,
        total,
    ))
}

pub async fn complete_assignment(
    state: &AppState,
    ctx: &AuthContext,
    id: Uuid,
) -> AppResult<ApiResponse<VolunteerAssignment>> {
    let volunteer = find_by_user(&state.orm, ctx.user_id).await?;

    let assignment = VolunteerAssignments::find_by_id(id).one(&state.orm).await?;
    let assignment = match assignment {
        Some(a) => a,
        None => return Err(AppError::NotFound),
    };
    if assignment.volunteer_id != volunteer.id {
        return Err(AppError::Forbidden);
    }
    if assignment.status == AssignmentStatus::Completed {
        return Ok(ApiResponse::success(
            "Already completed",
            assignment.into(),
            Some(Meta::empty()),
        ));
    }

    let mut active: AssignmentActive = assignment.into();
    active.status = Set(AssignmentStatus::Completed);
    active.completed_at = Set(Some(Utc::now().into()));
    let assignment = active.update(&state.orm).await?;

    audit::record(
        &state.orm,
        ctx.user_id,
        "assignment_complete",
        "volunteer_assignments",
        serde_json::json!({ "assignment_id": assignment.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Assignment completed",
        assignment.into(),
        Some(Meta::empty()),
    ))
}
