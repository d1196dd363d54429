use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, patch, post, put},
};
use uuid::Uuid;

use crate::{
    dto::{
        appointments::{AppointmentList, UpdateAppointmentStatusRequest},
        articles::{ArticleList, CreateArticleRequest, UpdateArticleRequest},
        auth::UpdateRoleRequest,
        dashboard::AdminOverview,
        donations::DonationList,
        feedback::FeedbackList,
        pets::{CreatePetRequest, PetList, UpdatePetRequest},
        profile::{UserList, UserWithRole},
        store::{
            CreateProductRequest, OrderSummaryList, OrderWithItems, UpdateOrderStatusRequest,
            UpdateProductRequest,
        },
        volunteers::{
            ActivityList, CreateActivityRequest, UpdateVolunteerStatusRequest, VolunteerList,
        },
    },
    error::{AppResult, ResultExt},
    middleware::auth::{AdminOnly, RoleGate},
    models::{Appointment, Article, Order, Pet, Product, Volunteer, VolunteerActivity},
    response::ApiResponse,
    routes::params::{
        AppointmentListQuery, ArticleQuery, OrderListQuery, Pagination, PetQuery,
        VolunteerListQuery,
    },
    services::{
        appointment_service, article_service, dashboard_service, donation_service,
        feedback_service, pet_service, store_service, user_service, volunteer_service,
    },
    state::AppState,
};

type Admin = RoleGate<AdminOnly>;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/overview", get(overview))
        .route("/pets", get(list_pets).post(create_pet))
        .route("/pets/{id}", put(update_pet).delete(delete_pet))
        .route("/articles", get(list_articles).post(create_article))
        .route("/articles/{id}", put(update_article).delete(delete_article))
        .route("/products", post(create_product))
        .route("/products/{id}", put(update_product).delete(delete_product))
        .route("/feedback", get(list_feedback))
        .route("/volunteers", get(list_volunteers))
        .route("/volunteers/{id}/status", patch(update_volunteer_status))
        .route("/activities", get(list_activities).post(create_activity))
        .route("/donations", get(list_donations))
        .route("/users", get(list_users))
        .route("/users/{id}/role", put(update_user_role))
        .route("/appointments", get(list_appointments))
        .route("/appointments/{id}/status", patch(update_appointment_status))
        .route("/orders", get(list_all_orders))
        .route("/orders/{id}", get(get_order_admin))
        .route("/orders/{id}/status", patch(update_order_status))
}

#[utoipa::path(
    get,
    path = "/api/admin/overview",
    responses(
        (status = 200, description = "Counts for the admin landing page", body = ApiResponse<AdminOverview>),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn overview(
    State(state): State<AppState>,
    _admin: Admin,
) -> AppResult<Json<ApiResponse<AdminOverview>>> {
    let resp = dashboard_service::admin_overview(&state)
        .await
        .operation("load admin overview")?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/pets",
    params(PetQuery),
    responses(
        (status = 200, description = "Pets in every status", body = ApiResponse<PetList>),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_pets(
    State(state): State<AppState>,
    _admin: Admin,
    Query(query): Query<PetQuery>,
) -> AppResult<Json<ApiResponse<PetList>>> {
    let resp = pet_service::list_all_pets(&state, query)
        .await
        .operation("list pets")?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/admin/pets",
    request_body = CreatePetRequest,
    responses(
        (status = 200, description = "Pet created", body = ApiResponse<Pet>),
        (status = 403, description = "Forbidden"),
        (status = 422, description = "Validation failed"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn create_pet(
    State(state): State<AppState>,
    admin: Admin,
    Json(payload): Json<CreatePetRequest>,
) -> AppResult<Json<ApiResponse<Pet>>> {
    let resp = pet_service::create_pet(&state, &admin.ctx, payload)
        .await
        .operation("create pet")?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/admin/pets/{id}",
    params(("id" = Uuid, Path, description = "Pet ID")),
    request_body = UpdatePetRequest,
    responses(
        (status = 200, description = "Pet updated", body = ApiResponse<Pet>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found"),
        (status = 422, description = "Validation failed"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn update_pet(
    State(state): State<AppState>,
    admin: Admin,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdatePetRequest>,
) -> AppResult<Json<ApiResponse<Pet>>> {
    let resp = pet_service::update_pet(&state, &admin.ctx, id, payload)
        .await
        .operation("update pet")?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/admin/pets/{id}",
    params(("id" = Uuid, Path, description = "Pet ID")),
    responses(
        (status = 200, description = "Pet deleted"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn delete_pet(
    State(state): State<AppState>,
    admin: Admin,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = pet_service::delete_pet(&state, &admin.ctx, id)
        .await
        .operation("delete pet")?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/articles",
    params(ArticleQuery),
    responses(
        (status = 200, description = "Care articles", body = ApiResponse<ArticleList>),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_articles(
    State(state): State<AppState>,
    _admin: Admin,
    Query(query): Query<ArticleQuery>,
) -> AppResult<Json<ApiResponse<ArticleList>>> {
    let resp = article_service::list_articles(&state, query)
        .await
        .operation("list articles")?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/admin/articles",
    request_body = CreateArticleRequest,
    responses(
        (status = 200, description = "Article created", body = ApiResponse<Article>),
        (status = 403, description = "Forbidden"),
        (status = 422, description = "Validation failed"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn create_article(
    State(state): State<AppState>,
    admin: Admin,
    Json(payload): Json<CreateArticleRequest>,
) -> AppResult<Json<ApiResponse<Article>>> {
    let resp = article_service::create_article(&state, &admin.ctx, payload)
        .await
        .operation("create article")?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/admin/articles/{id}",
    params(("id" = Uuid, Path, description = "Article ID")),
    request_body = UpdateArticleRequest,
    responses(
        (status = 200, description = "Article updated", body = ApiResponse<Article>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn update_article(
    State(state): State<AppState>,
    admin: Admin,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateArticleRequest>,
) -> AppResult<Json<ApiResponse<Article>>> {
    let resp = article_service::update_article(&state, &admin.ctx, id, payload)
        .await
        .operation("update article")?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/admin/articles/{id}",
    params(("id" = Uuid, Path, description = "Article ID")),
    responses(
        (status = 200, description = "Article deleted"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn delete_article(
    State(state): State<AppState>,
    admin: Admin,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = article_service::delete_article(&state, &admin.ctx, id)
        .await
        .operation("delete article")?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/admin/products",
    request_body = CreateProductRequest,
    responses(
        (status = 200, description = "Product created", body = ApiResponse<Product>),
        (status = 403, description = "Forbidden"),
        (status = 409, description = "Product name already exists"),
        (status = 422, description = "Validation failed"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn create_product(
    State(state): State<AppState>,
    admin: Admin,
    Json(payload): Json<CreateProductRequest>,
) -> AppResult<Json<ApiResponse<Product>>> {
    let resp = store_service::create_product(&state, &admin.ctx, payload)
        .await
        .operation("create product")?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/admin/products/{id}",
    params(("id" = Uuid, Path, description = "Product ID")),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Product updated", body = ApiResponse<Product>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found"),
        (status = 422, description = "Validation failed"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn update_product(
    State(state): State<AppState>,
    admin: Admin,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateProductRequest>,
) -> AppResult<Json<ApiResponse<Product>>> {
    let resp = store_service::update_product(&state, &admin.ctx, id, payload)
        .await
        .operation("update product")?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/admin/products/{id}",
    params(("id" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product deleted"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found"),
        (status = 409, description = "Product is referenced by orders"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn delete_product(
    State(state): State<AppState>,
    admin: Admin,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = store_service::delete_product(&state, &admin.ctx, id)
        .await
        .operation("delete product")?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/feedback",
    params(Pagination),
    responses(
        (status = 200, description = "All adopter feedback", body = ApiResponse<FeedbackList>),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_feedback(
    State(state): State<AppState>,
    _admin: Admin,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<FeedbackList>>> {
    let resp = feedback_service::list_all(&state, pagination)
        .await
        .operation("list feedback")?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/volunteers",
    params(VolunteerListQuery),
    responses(
        (status = 200, description = "Volunteer applications", body = ApiResponse<VolunteerList>),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_volunteers(
    State(state): State<AppState>,
    _admin: Admin,
    Query(query): Query<VolunteerListQuery>,
) -> AppResult<Json<ApiResponse<VolunteerList>>> {
    let resp = volunteer_service::list_volunteers(&state, query)
        .await
        .operation("list volunteers")?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/admin/volunteers/{id}/status",
    params(("id" = Uuid, Path, description = "Volunteer ID")),
    request_body = UpdateVolunteerStatusRequest,
    responses(
        (status = 200, description = "Volunteer reviewed", body = ApiResponse<Volunteer>),
        (status = 400, description = "Transition not allowed"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn update_volunteer_status(
    State(state): State<AppState>,
    admin: Admin,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateVolunteerStatusRequest>,
) -> AppResult<Json<ApiResponse<Volunteer>>> {
    let resp = volunteer_service::update_status(&state, &admin.ctx, id, payload)
        .await
        .operation("review volunteer")?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/activities",
    params(Pagination),
    responses(
        (status = 200, description = "Activities in every status", body = ApiResponse<ActivityList>),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_activities(
    State(state): State<AppState>,
    _admin: Admin,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<ActivityList>>> {
    let resp = volunteer_service::list_all_activities(&state, pagination)
        .await
        .operation("list activities")?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/admin/activities",
    request_body = CreateActivityRequest,
    responses(
        (status = 200, description = "Activity created", body = ApiResponse<VolunteerActivity>),
        (status = 403, description = "Forbidden"),
        (status = 422, description = "Validation failed"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn create_activity(
    State(state): State<AppState>,
    admin: Admin,
    Json(payload): Json<CreateActivityRequest>,
) -> AppResult<Json<ApiResponse<VolunteerActivity>>> {
    let resp = volunteer_service::create_activity(&state, &admin.ctx, payload)
        .await
        .operation("create activity")?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/donations",
    params(Pagination),
    responses(
        (status = 200, description = "Donations with running totals", body = ApiResponse<DonationList>),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_donations(
    State(state): State<AppState>,
    _admin: Admin,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<DonationList>>> {
    let resp = donation_service::list_all(&state, pagination)
        .await
        .operation("list donations")?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/users",
    params(Pagination),
    responses(
        (status = 200, description = "Profiles with their role", body = ApiResponse<UserList>),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_users(
    State(state): State<AppState>,
    _admin: Admin,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<UserList>>> {
    let resp = user_service::list_users(&state, pagination)
        .await
        .operation("list users")?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/admin/users/{id}/role",
    params(("id" = Uuid, Path, description = "User ID")),
    request_body = UpdateRoleRequest,
    responses(
        (status = 200, description = "Role assigned", body = ApiResponse<UserWithRole>),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn update_user_role(
    State(state): State<AppState>,
    admin: Admin,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateRoleRequest>,
) -> AppResult<Json<ApiResponse<UserWithRole>>> {
    let resp = user_service::update_role(&state, &admin.ctx, id, payload.role)
        .await
        .operation("assign role")?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/appointments",
    params(AppointmentListQuery),
    responses(
        (status = 200, description = "All appointments", body = ApiResponse<AppointmentList>),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_appointments(
    State(state): State<AppState>,
    _admin: Admin,
    Query(query): Query<AppointmentListQuery>,
) -> AppResult<Json<ApiResponse<AppointmentList>>> {
    let resp = appointment_service::list_all(&state, query)
        .await
        .operation("list appointments")?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/admin/appointments/{id}/status",
    params(("id" = Uuid, Path, description = "Appointment ID")),
    request_body = UpdateAppointmentStatusRequest,
    responses(
        (status = 200, description = "Appointment updated", body = ApiResponse<Appointment>),
        (status = 400, description = "Transition not allowed"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn update_appointment_status(
    State(state): State<AppState>,
    admin: Admin,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateAppointmentStatusRequest>,
) -> AppResult<Json<ApiResponse<Appointment>>> {
    let resp = appointment_service::update_status(&state, &admin.ctx, id, payload)
        .await
        .operation("update appointment")?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/orders",
    params(OrderListQuery),
    responses(
        (status = 200, description = "All orders", body = ApiResponse<OrderSummaryList>),
        (status = 403, description = "Forbidden"),
        (status = 500, description = "Internal Server Error"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_all_orders(
    State(state): State<AppState>,
    _admin: Admin,
    Query(query): Query<OrderListQuery>,
) -> AppResult<Json<ApiResponse<OrderSummaryList>>> {
    let resp = store_service::list_all_orders(&state, query)
        .await
        .operation("list orders")?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/orders/{id}",
    params(("id" = Uuid, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order with items", body = ApiResponse<OrderWithItems>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn get_order_admin(
    State(state): State<AppState>,
    _admin: Admin,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<OrderWithItems>>> {
    let resp = store_service::get_order_admin(&state, id)
        .await
        .operation("load order")?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/admin/orders/{id}/status",
    params(("id" = Uuid, Path, description = "Order ID")),
    request_body = UpdateOrderStatusRequest,
    responses(
        (status = 200, description = "Order status updated", body = ApiResponse<Order>),
        (status = 400, description = "Transition not allowed"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn update_order_status(
    State(state): State<AppState>,
    admin: Admin,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateOrderStatusRequest>,
) -> AppResult<Json<ApiResponse<Order>>> {
    let resp = store_service::update_order_status(&state, &admin.ctx, id, payload)
        .await
        .operation("update order status")?;
    Ok(Json(resp))
}
