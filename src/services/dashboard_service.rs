use chrono::Utc;
use sea_orm::{
    ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::{
    dto::dashboard::{AdminOverview, Dashboard},
    entity::{
        AdoptionApplications, Pets, StoreOrders, UserFavorites, VetAppointments, Volunteers,
        adoption_applications::Column as ApplicationCol,
        enums::{ApplicationStatus, AppointmentStatus, OrderStatus, PetStatus, VolunteerStatus},
        pets::Column as PetCol,
        store_orders::Column as OrderCol,
        user_favorites::Column as FavoriteCol,
        vet_appointments::Column as AppointmentCol,
        volunteers::Column as VolunteerCol,
    },
    error::{AppError, AppResult},
    middleware::auth::AuthContext,
    models::Pet,
    response::{ApiResponse, Meta},
    routes::params::{PageWindow, SortOrder},
    services::{
        application_service,
        appointment_service::{self, AppointmentFilter},
        medical_service,
    },
    state::AppState,
};

/// Items per dashboard section.
const SECTION_LIMIT: i64 = 5;

pub async fn dashboard(state: &AppState, ctx: &AuthContext) -> AppResult<ApiResponse<Dashboard>> {
    let window = PageWindow {
        page: 1,
        per_page: SECTION_LIMIT,
        offset: 0,
    };
    let upcoming = AppointmentFilter {
        user_id: Some(ctx.user_id),
        status: Some(AppointmentStatus::Scheduled),
        from: Some(Utc::now()),
    };

    let (favorites, applications, upcoming_appointments, vaccination_reminders) = tokio::try_join!(
        async {
            Ok::<_, AppError>(
                Pets::find()
                    .inner_join(UserFavorites)
                    .filter(FavoriteCol::UserId.eq(ctx.user_id))
                    .order_by_desc(FavoriteCol::CreatedAt)
                    .limit(window.limit())
                    .all(&state.orm)
                    .await?,
            )
        },
        application_service::fetch_summaries(
            &state.orm,
            Some(ctx.user_id),
            None,
            SortOrder::Desc,
            &window,
        ),
        appointment_service::fetch_views(&state.orm, upcoming, &window),
        medical_service::fetch_upcoming_reminders(
            &state.orm,
            ctx.user_id,
            Utc::now().date_naive(),
            SECTION_LIMIT,
        ),
    )?;

    Ok(ApiResponse::success(
        "Dashboard",
        Dashboard {
            role: ctx.role,
            favorites: favorites.into_iter().map(Pet::from).collect(),
            applications,
            upcoming_appointments,
            vaccination_reminders,
        },
        Some(Meta::empty()),
    ))
}

pub async fn admin_overview(state: &AppState) -> AppResult<ApiResponse<AdminOverview>> {
    let (
        pending_applications,
        available_pets,
        pending_volunteers,
        scheduled_appointments,
        pending_orders,
    ) = tokio::try_join!(
        AdoptionApplications::find()
            .filter(ApplicationCol::Status.eq(ApplicationStatus::Pending))
            .count(&state.orm),
        Pets::find()
            .filter(PetCol::Status.eq(PetStatus::Available))
            .count(&state.orm),
        Volunteers::find()
            .filter(VolunteerCol::Status.eq(VolunteerStatus::Pending))
            .count(&state.orm),
        VetAppointments::find()
            .filter(AppointmentCol::Status.eq(AppointmentStatus::Scheduled))
            .count(&state.orm),
        StoreOrders::find()
            .filter(OrderCol::Status.eq(OrderStatus::Pending))
            .count(&state.orm),
    )?;

    Ok(ApiResponse::success(
        "Overview",
        AdminOverview {
            pending_applications: pending_applications as i64,
            available_pets: available_pets as i64,
            pending_volunteers: pending_volunteers as i64,
            scheduled_appointments: scheduled_appointments as i64,
            pending_orders: pending_orders as i64,
        },
        Some(Meta::empty()),
    ))
}
