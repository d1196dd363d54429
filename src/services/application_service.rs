use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, Condition, ConnectionTrait, DbBackend,
    EntityTrait, FromQueryResult, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
    Statement, TransactionTrait, sea_query::LockType,
};
use uuid::Uuid;

use crate::{
    audit,
    dto::{
        applications::{
            ApplicationHistory, ApplicationList, ApplicationSummary, CreateApplicationRequest,
            TransitionOutcome,
        },
        profile::UpdateProfileRequest,
    },
    entity::{
        AdoptionApplications, ApplicationStatusEvents, Pets,
        adoption_applications::{ActiveModel as ApplicationActive, Column as ApplicationCol},
        application_status_events::{ActiveModel as EventActive, Column as EventCol},
        enums::{ApplicationStatus, PetStatus, Role},
        pets::ActiveModel as PetActive,
    },
    error::{AppError, AppResult},
    middleware::auth::{AdminOnly, AuthContext, Reviewer, RoleRequirement},
    models::AdoptionApplication,
    response::{ApiResponse, Meta},
    routes::params::{ApplicationListQuery, PageWindow, SortOrder},
    services::user_service,
    state::AppState,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Already in the requested status.
    Unchanged,
    Apply {
        from: ApplicationStatus,
        to: ApplicationStatus,
    },
}

/// Decides whether `role` may move an application from `from` to `to`.
pub fn plan_transition(
    from: ApplicationStatus,
    to: ApplicationStatus,
    role: Role,
) -> AppResult<Transition> {
    use ApplicationStatus::*;

    if !Reviewer::allows(role) {
        return Err(AppError::Forbidden);
    }
    if from == to {
        return Ok(Transition::Unchanged);
    }

    match (from, to) {
        (Pending, UnderReview | Approved | Rejected) | (UnderReview, Approved | Rejected) => {
            Ok(Transition::Apply { from, to })
        }
        (Approved | Rejected, Pending) => {
            if AdminOnly::allows(role) {
                Ok(Transition::Apply { from, to })
            } else {
                Err(AppError::Forbidden)
            }
        }
        _ => Err(AppError::BadRequest(format!(
            "Cannot change application status from {from} to {to}"
        ))),
    }
}

const SUMMARY_SELECT: &str = r#"
    SELECT a.id, a.pet_id, p.name AS pet_name, p.species AS pet_species,
           p.image_url AS pet_image_url, a.user_id,
           pr.email AS applicant_email, pr.first_name AS applicant_first_name,
           pr.last_name AS applicant_last_name,
           a.home_type, a.has_yard, a.has_other_pets, a.has_children, a.experience,
           a.reason, a.status, a.submitted_at, a.reviewed_at, a.reviewed_by
    FROM adoption_applications a
    JOIN pets p ON p.id = a.pet_id
    LEFT JOIN profiles pr ON pr.id = a.user_id
"#;

pub(crate) async fn fetch_summaries<C: ConnectionTrait>(
    conn: &C,
    user_id: Option<Uuid>,
    status: Option<ApplicationStatus>,
    sort_order: SortOrder,
    window: &PageWindow,
) -> AppResult<Vec<ApplicationSummary>> {
    let sql = format!(
        "{SUMMARY_SELECT}
        WHERE ($1::uuid IS NULL OR a.user_id = $1)
          AND ($2::text IS NULL OR a.status = $2)
        ORDER BY a.submitted_at {}
        LIMIT $3 OFFSET $4",
        sort_order.as_sql()
    );
    let stmt = Statement::from_sql_and_values(
        DbBackend::Postgres,
        sql,
        [
            user_id.into(),
            status.map(|s| s.to_string()).into(),
            window.per_page.into(),
            window.offset.into(),
        ],
    );
    Ok(ApplicationSummary::find_by_statement(stmt).all(conn).await?)
}

async fn fetch_summary<C: ConnectionTrait>(
    conn: &C,
    id: Uuid,
) -> AppResult<Option<ApplicationSummary>> {
    let stmt = Statement::from_sql_and_values(
        DbBackend::Postgres,
        format!("{SUMMARY_SELECT} WHERE a.id = $1"),
        [id.into()],
    );
    Ok(ApplicationSummary::find_by_statement(stmt).one(conn).await?)
}

async fn count_applications(
    state: &AppState,
    user_id: Option<Uuid>,
    status: Option<ApplicationStatus>,
) -> AppResult<u64> {
    let mut condition = Condition::all();
    if let Some(user_id) = user_id {
        condition = condition.add(ApplicationCol::UserId.eq(user_id));
    }
    if let Some(status) = status {
        condition = condition.add(ApplicationCol::Status.eq(status));
    }
    Ok(AdoptionApplications::find()
        .filter(condition)
        .count(&state.orm)
        .await?)
}

pub async fn create(
    state: &AppState,
    ctx: &AuthContext,
    payload: CreateApplicationRequest,
) -> AppResult<ApiResponse<AdoptionApplication>> {
    payload.validate()?;

    let txn = state.orm.begin().await?;

    let pet = Pets::find_by_id(payload.pet_id).one(&txn).await?;
    let pet = match pet {
        Some(p) => p,
        None => return Err(AppError::NotFound),
    };
    if pet.status == PetStatus::Adopted {
        return Err(AppError::BadRequest(format!(
            "{} has already been adopted",
            pet.name
        )));
    }

    let open = AdoptionApplications::find()
        .filter(ApplicationCol::UserId.eq(ctx.user_id))
        .filter(ApplicationCol::PetId.eq(pet.id))
        .filter(
            ApplicationCol::Status.is_in([ApplicationStatus::Pending, ApplicationStatus::UnderReview]),
        )
        .count(&txn)
        .await?;
    if open > 0 {
        return Err(AppError::Conflict(
            "You already have an open application for this pet".into(),
        ));
    }

    user_service::upsert_profile(
        &txn,
        ctx.user_id,
        ctx.email.as_deref(),
        &UpdateProfileRequest {
            first_name: payload.first_name.clone(),
            last_name: payload.last_name.clone(),
            phone: payload.phone.clone(),
            address: payload.address.clone(),
        },
    )
    .await?;

    let application = ApplicationActive {
        id: Set(Uuid::new_v4()),
        pet_id: Set(pet.id),
        user_id: Set(ctx.user_id),
        home_type: Set(payload.home_type.trim().to_owned()),
        has_yard: Set(payload.has_yard),
        has_other_pets: Set(payload.has_other_pets),
        has_children: Set(payload.has_children),
        experience: Set(payload.experience),
        reason: Set(payload.reason.trim().to_owned()),
        status: Set(ApplicationStatus::Pending),
        submitted_at: NotSet,
        reviewed_at: Set(None),
        reviewed_by: Set(None),
        updated_at: NotSet,
    }
    .insert(&txn)
    .await
    .map_err(AppError::from)
    .map_err(|err| {
        if err.is_unique_violation() {
            AppError::Conflict("You already have an open application for this pet".into())
        } else {
            err
        }
    })?;

    txn.commit().await?;

    tracing::info!(application_id = %application.id, pet_id = %pet.id, "adoption application submitted");
    audit::record(
        &state.orm,
        ctx.user_id,
        "application_create",
        "adoption_applications",
        serde_json::json!({ "application_id": application.id, "pet_id": pet.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Application submitted",
        application.into(),
        Some(Meta::empty()),
    ))
}

pub async fn list_mine(
    state: &AppState,
    ctx: &AuthContext,
    query: ApplicationListQuery,
) -> AppResult<ApiResponse<ApplicationList>> {
    let window = query.window();
    let sort_order = query.sort_order.unwrap_or(SortOrder::Desc);
    let (items, total) = tokio::try_join!(
        fetch_summaries(&state.orm, Some(ctx.user_id), query.status, sort_order, &window),
        count_applications(state, Some(ctx.user_id), query.status),
    )?;
    Ok(ApiResponse::paged(
        "Applications",
        ApplicationList { items },
        &window,
        total,
    ))
}

pub async fn list_for_review(
    state: &AppState,
    query: ApplicationListQuery,
) -> AppResult<ApiResponse<ApplicationList>> {
    let window = query.window();
    let sort_order = query.sort_order.unwrap_or(SortOrder::Desc);
    let (items, total) = tokio::try_join!(
        fetch_summaries(&state.orm, None, query.status, sort_order, &window),
        count_applications(state, None, query.status),
    )?;
    Ok(ApiResponse::paged(
        "Applications",
        ApplicationList { items },
        &window,
        total,
    ))
}

/// An application is visible to its applicant and to reviewers.
fn ensure_can_view(ctx: &AuthContext, owner: Uuid) -> AppResult<()> {
    if owner == ctx.user_id || ctx.is_reviewer() {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}

pub async fn get(
    state: &AppState,
    ctx: &AuthContext,
    id: Uuid,
) -> AppResult<ApiResponse<ApplicationSummary>> {
    let summary = match fetch_summary(&state.orm, id).await? {
        Some(s) => s,
        None => return Err(AppError::NotFound),
    };
    ensure_can_view(ctx, summary.user_id)?;

    Ok(ApiResponse::success("Application", summary, Some(Meta::empty())))
}

pub async fn history(
    state: &AppState,
    ctx: &AuthContext,
    id: Uuid,
) -> AppResult<ApiResponse<ApplicationHistory>> {
    let application = AdoptionApplications::find_by_id(id).one(&state.orm).await?;
    let application = match application {
        Some(a) => a,
        None => return Err(AppError::NotFound),
    };
    ensure_can_view(ctx, application.user_id)?;

    let items = ApplicationStatusEvents::find()
        .filter(EventCol::ApplicationId.eq(id))
        .order_by_asc(EventCol::CreatedAt)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(ApiResponse::success(
        "Application history",
        ApplicationHistory { items },
        Some(Meta::empty()),
    ))
}

pub async fn transition(
    state: &AppState,
    ctx: &AuthContext,
    id: Uuid,
    to: ApplicationStatus,
) -> AppResult<ApiResponse<TransitionOutcome>> {
    let txn = state.orm.begin().await?;

    let application = AdoptionApplications::find_by_id(id)
        .lock(LockType::Update)
        .one(&txn)
        .await?;
    let application = match application {
        Some(a) => a,
        None => return Err(AppError::NotFound),
    };

    let (from, to) = match plan_transition(application.status, to, ctx.role)? {
        Transition::Unchanged => {
            txn.commit().await?;
            return Ok(ApiResponse::success(
                "Status unchanged",
                TransitionOutcome {
                    application: application.into(),
                    changed: false,
                },
                Some(Meta::empty()),
            ));
        }
        Transition::Apply { from, to } => (from, to),
    };

    let pet_id = application.pet_id;
    let now = Utc::now();

    if to == ApplicationStatus::Approved {
        let pet = Pets::find_by_id(pet_id)
            .lock(LockType::Update)
            .one(&txn)
            .await?;
        let pet = match pet {
            Some(p) => p,
            None => return Err(AppError::NotFound),
        };
        if pet.status == PetStatus::Adopted {
            return Err(AppError::Conflict(format!(
                "{} has already been adopted",
                pet.name
            )));
        }
        let mut pet: PetActive = pet.into();
        pet.status = Set(PetStatus::Adopted);
        pet.updated_at = Set(now.into());
        pet.update(&txn).await?;
    } else if from == ApplicationStatus::Approved && to == ApplicationStatus::Pending {
        let pet = Pets::find_by_id(pet_id)
            .lock(LockType::Update)
            .one(&txn)
            .await?;
        if let Some(pet) = pet.filter(|p| p.status == PetStatus::Adopted) {
            let mut pet: PetActive = pet.into();
            pet.status = Set(PetStatus::Available);
            pet.updated_at = Set(now.into());
            pet.update(&txn).await?;
        }
    }

    let mut active: ApplicationActive = application.into();
    active.status = Set(to);
    if to == ApplicationStatus::Pending {
        active.reviewed_at = Set(None);
        active.reviewed_by = Set(None);
    } else {
        active.reviewed_at = Set(Some(now.into()));
        active.reviewed_by = Set(Some(ctx.user_id));
    }
    active.updated_at = Set(now.into());
    let application = active.update(&txn).await?;

    EventActive {
        id: Set(Uuid::new_v4()),
        application_id: Set(application.id),
        from_status: Set(from),
        to_status: Set(to),
        actor_id: Set(ctx.user_id),
        actor_role: Set(ctx.role),
        created_at: NotSet,
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;

    tracing::info!(
        application_id = %application.id,
        %from,
        %to,
        actor = %ctx.user_id,
        role = %ctx.role,
        "application status changed"
    );
    audit::record(
        &state.orm,
        ctx.user_id,
        "application_status",
        "adoption_applications",
        serde_json::json!({ "application_id": application.id, "from": from, "to": to }),
    )
    .await;

    Ok(ApiResponse::success(
        "Application status updated",
        TransitionOutcome {
            application: application.into(),
            changed: true,
        },
        Some(Meta::empty()),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ApplicationStatus::*;

    #[test]
    fn reviewers_move_applications_forward() {
        for role in [Role::Admin, Role::Vet] {
            for (from, to) in [
                (Pending, UnderReview),
                (Pending, Approved),
                (Pending, Rejected),
                (UnderReview, Approved),
                (UnderReview, Rejected),
            ] {
                assert_eq!(
                    plan_transition(from, to, role).unwrap(),
                    Transition::Apply { from, to },
                    "{role}: {from} -> {to}"
                );
            }
        }
    }

    #[test]
    fn only_admins_reset_decisions() {
        for from in [Approved, Rejected] {
            assert!(plan_transition(from, Pending, Role::Admin).is_ok());
            assert!(matches!(
                plan_transition(from, Pending, Role::Vet),
                Err(AppError::Forbidden)
            ));
        }
    }

    #[test]
    fn same_status_is_a_no_op() {
        for status in [Pending, UnderReview, Approved, Rejected] {
            assert_eq!(
                plan_transition(status, status, Role::Vet).unwrap(),
                Transition::Unchanged
            );
        }
    }

    #[test]
    fn other_pairs_are_bad_requests() {
        for (from, to) in [
            (UnderReview, Pending),
            (Approved, Rejected),
            (Rejected, Approved),
            (Approved, UnderReview),
            (Rejected, UnderReview),
        ] {
            let err = plan_transition(from, to, Role::Admin).unwrap_err();
            assert!(matches!(err, AppError::BadRequest(_)), "{from} -> {to}");
        }
    }

    #[test]
    fn adopters_cannot_review() {
        for role in [Role::User, Role::Volunteer] {
            assert!(matches!(
                plan_transition(Pending, Approved, role),
                Err(AppError::Forbidden)
            ));
        }
    }
}
