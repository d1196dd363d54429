use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, Condition, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
    sea_query::{Expr, extension::postgres::PgExpr},
};
use uuid::Uuid;

use crate::{
    audit,
    dto::pets::{CreatePetRequest, PetDetail, PetList, UpdatePetRequest},
    entity::{
        MedicalRecords, Pets,
        enums::PetStatus,
        medical_records::Column as RecordCol,
        pets::{ActiveModel as PetActive, Column as PetCol},
    },
    error::{AppError, AppResult},
    middleware::auth::AuthContext,
    models::Pet,
    response::{ApiResponse, Meta},
    routes::params::{PageWindow, PetQuery, contains_pattern},
    services::feedback_service,
    state::AppState,
};

const DETAIL_FEEDBACK_LIMIT: i64 = 20;

fn pet_condition(query: &PetQuery, default_status: Option<PetStatus>) -> Condition {
    let mut condition = Condition::all();

    if let Some(status) = query.status.or(default_status) {
        condition = condition.add(PetCol::Status.eq(status));
    }
    if let Some(species) = query.species {
        condition = condition.add(PetCol::Species.eq(species));
    }
    if let Some(size) = query.size {
        condition = condition.add(PetCol::Size.eq(size));
    }
    if let Some(group) = query.age_group {
        let (min, max) = group.bounds();
        if let Some(min) = min {
            condition = condition.add(PetCol::Age.gte(min));
        }
        if let Some(max) = max {
            condition = condition.add(PetCol::Age.lte(max));
        }
    }
    if let Some(search) = query.q.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        let pattern = contains_pattern(search);
        condition = condition.add(
            Condition::any()
                .add(Expr::col(PetCol::Name).ilike(pattern.clone()))
                .add(Expr::col(PetCol::Breed).ilike(pattern)),
        );
    }

    condition
}

async fn list_with(
    state: &AppState,
    query: PetQuery,
    default_status: Option<PetStatus>,
) -> AppResult<ApiResponse<PetList>> {
    let window = query.window();
    let finder = Pets::find()
        .filter(pet_condition(&query, default_status))
        .order_by_desc(PetCol::CreatedAt);

    let total = finder.clone().count(&state.orm).await?;

    let items = finder
        .limit(window.limit())
        .offset(window.skip())
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Pet::from)
        .collect();

    Ok(ApiResponse::paged("Pets", PetList { items }, &window, total))
}

/// Public pet browser; only available pets unless a status is requested.
pub async fn list_pets(state: &AppState, query: PetQuery) -> AppResult<ApiResponse<PetList>> {
    list_with(state, query, Some(PetStatus::Available)).await
}

pub async fn list_all_pets(state: &AppState, query: PetQuery) -> AppResult<ApiResponse<PetList>> {
    list_with(state, query, None).await
}

pub async fn get_pet_detail(state: &AppState, id: Uuid) -> AppResult<ApiResponse<PetDetail>> {
    let feedback_window = PageWindow {
        page: 1,
        per_page: DETAIL_FEEDBACK_LIMIT,
        offset: 0,
    };

    let (pet, records, feedback) = tokio::try_join!(
        async { Ok::<_, AppError>(Pets::find_by_id(id).one(&state.orm).await?) },
        async {
            Ok::<_, AppError>(
                MedicalRecords::find()
                    .filter(RecordCol::PetId.eq(id))
                    .order_by_desc(RecordCol::Date)
                    .all(&state.orm)
                    .await?,
            )
        },
        feedback_service::fetch_views(&state.orm, Some(id), &feedback_window),
    )?;

    let pet = match pet {
        Some(p) => p,
        None => return Err(AppError::NotFound),
    };

    Ok(ApiResponse::success(
        "Pet",
        PetDetail {
            pet: pet.into(),
            medical_records: records.into_iter().map(Into::into).collect(),
            feedback,
        },
        Some(Meta::empty()),
    ))
}

pub async fn create_pet(
    state: &AppState,
    ctx: &AuthContext,
    payload: CreatePetRequest,
) -> AppResult<ApiResponse<Pet>> {
    payload.validate()?;

    let pet = PetActive {
        id: Set(Uuid::new_v4()),
        name: Set(payload.name.trim().to_owned()),
        species: Set(payload.species),
        breed: Set(payload.breed),
        age: Set(payload.age),
        gender: Set(payload.gender),
        size: Set(payload.size),
        color: Set(payload.color),
        description: Set(payload.description),
        health_status: Set(payload.health_status),
        vaccination_status: Set(payload.vaccination_status),
        spayed_neutered: Set(payload.spayed_neutered),
        good_with_kids: Set(payload.good_with_kids),
        good_with_pets: Set(payload.good_with_pets),
        energy_level: Set(payload.energy_level),
        image_url: Set(payload.image_url),
        status: Set(payload.status.unwrap_or_default()),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    audit::record(
        &state.orm,
        ctx.user_id,
        "pet_create",
        "pets",
        serde_json::json!({ "pet_id": pet.id }),
    )
    .await;

    Ok(ApiResponse::success("Pet created", pet.into(), Some(Meta::empty())))
}

pub async fn update_pet(
    state: &AppState,
    ctx: &AuthContext,
    id: Uuid,
    payload: UpdatePetRequest,
) -> AppResult<ApiResponse<Pet>> {
    payload.validate()?;

    let existing = Pets::find_by_id(id).one(&state.orm).await?;
    let existing = match existing {
        Some(p) => p,
        None => return Err(AppError::NotFound),
    };
    let previous_status = existing.status;

    let mut active: PetActive = existing.into();
    if let Some(name) = payload.name {
        active.name = Set(name.trim().to_owned());
    }
    if let Some(species) = payload.species {
        active.species = Set(species);
    }
    if let Some(breed) = payload.breed {
        active.breed = Set(Some(breed));
    }
    if let Some(age) = payload.age {
        active.age = Set(Some(age));
    }
    if let Some(gender) = payload.gender {
        active.gender = Set(Some(gender));
    }
    if let Some(size) = payload.size {
        active.size = Set(Some(size));
    }
    if let Some(color) = payload.color {
        active.color = Set(Some(color));
    }
    if let Some(description) = payload.description {
        active.description = Set(Some(description));
    }
    if let Some(health_status) = payload.health_status {
        active.health_status = Set(Some(health_status));
    }
    if let Some(vaccination_status) = payload.vaccination_status {
        active.vaccination_status = Set(Some(vaccination_status));
    }
    if let Some(value) = payload.spayed_neutered {
        active.spayed_neutered = Set(Some(value));
    }
    if let Some(value) = payload.good_with_kids {
        active.good_with_kids = Set(Some(value));
    }
    if let Some(value) = payload.good_with_pets {
        active.good_with_pets = Set(Some(value));
    }
    if let Some(energy_level) = payload.energy_level {
        active.energy_level = Set(Some(energy_level));
    }
    if let Some(image_url) = payload.image_url {
        active.image_url = Set(Some(image_url));
    }
    if let Some(status) = payload.status {
        active.status = Set(status);
    }
    active.updated_at = Set(Utc::now().into());

    let pet = active.update(&state.orm).await?;

    if pet.status != previous_status {
        tracing::info!(pet_id = %pet.id, from = %previous_status, to = %pet.status, "pet status changed");
    }

    audit::record(
        &state.orm,
        ctx.user_id,
        "pet_update",
        "pets",
        serde_json::json!({ "pet_id": pet.id }),
    )
    .await;

    Ok(ApiResponse::success("Updated", pet.into(), Some(Meta::empty())))
}

pub async fn delete_pet(
    state: &AppState,
    ctx: &AuthContext,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let result = Pets::delete_by_id(id).exec(&state.orm).await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    audit::record(
        &state.orm,
        ctx.user_id,
        "pet_delete",
        "pets",
        serde_json::json!({ "pet_id": id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}
