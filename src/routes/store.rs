use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, post},
};
use uuid::Uuid;

use crate::{
    dto::store::{CheckoutRequest, OrderList, OrderWithItems, ProductList},
    error::{AppResult, ResultExt},
    middleware::auth::CurrentUser,
    models::Product,
    response::ApiResponse,
    routes::params::{OrderListQuery, ProductQuery},
    services::store_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/products", get(list_products))
        .route("/products/{id}", get(get_product))
        .route("/checkout", post(checkout))
        .route("/orders", get(list_orders))
        .route("/orders/{id}", get(get_order))
}

#[utoipa::path(
    get,
    path = "/api/store/products",
    params(ProductQuery),
    responses(
        (status = 200, description = "List store products", body = ApiResponse<ProductList>),
    ),
    tag = "Store"
)]
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ProductQuery>,
) -> AppResult<Json<ApiResponse<ProductList>>> {
    let resp = store_service::list_products(&state, query)
        .await
        .operation("load products")?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/store/products/{id}",
    params(("id" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Get a product", body = ApiResponse<Product>),
        (status = 404, description = "Not Found"),
    ),
    tag = "Store"
)]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Product>>> {
    let resp = store_service::get_product(&state, id)
        .await
        .operation("load product")?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/store/checkout",
    request_body = CheckoutRequest,
    responses(
        (status = 200, description = "Order placed", body = ApiResponse<OrderWithItems>),
        (status = 400, description = "Unknown product or insufficient stock"),
        (status = 401, description = "Unauthorized"),
        (status = 422, description = "Empty cart or invalid quantity"),
    ),
    security(("bearer_auth" = [])),
    tag = "Store"
)]
pub async fn checkout(
    State(state): State<AppState>,
    CurrentUser(ctx): CurrentUser,
    Json(payload): Json<CheckoutRequest>,
) -> AppResult<Json<ApiResponse<OrderWithItems>>> {
    let resp = store_service::checkout(&state, &ctx, payload)
        .await
        .operation("place order")?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/store/orders",
    params(OrderListQuery),
    responses(
        (status = 200, description = "List my orders", body = ApiResponse<OrderList>),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer_auth" = [])),
    tag = "Store"
)]
pub async fn list_orders(
    State(state): State<AppState>,
    CurrentUser(ctx): CurrentUser,
    Query(query): Query<OrderListQuery>,
) -> AppResult<Json<ApiResponse<OrderList>>> {
    let resp = store_service::list_my_orders(&state, &ctx, query)
        .await
        .operation("load orders")?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/store/orders/{id}",
    params(("id" = Uuid, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Get my order with items", body = ApiResponse<OrderWithItems>),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Store"
)]
pub async fn get_order(
    State(state): State<AppState>,
    CurrentUser(ctx): CurrentUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<OrderWithItems>>> {
    let resp = store_service::get_my_order(&state, &ctx, id)
        .await
        .operation("load order")?;
    Ok(Json(resp))
}
