use std::collections::BTreeMap;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, Condition, ConnectionTrait, DbBackend,
    DbErr, EntityTrait, FromQueryResult, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
    Set, SqlErr, Statement, TransactionTrait,
    sea_query::{Expr, LockType, extension::postgres::PgExpr},
};
use uuid::Uuid;

use crate::{
    audit,
    dto::store::{
        Cart, CheckoutRequest, CreateProductRequest, OrderItemView, OrderList, OrderSummary,
        OrderSummaryList, OrderWithItems, ProductList, UpdateOrderStatusRequest,
        UpdateProductRequest,
    },
    entity::{
        OrderItems, StoreOrders, StoreProducts,
        enums::OrderStatus,
        order_items::{ActiveModel as OrderItemActive, Column as OrderItemCol},
        store_orders::{ActiveModel as OrderActive, Column as OrderCol},
        store_products::{ActiveModel as ProductActive, Column as ProductCol},
    },
    error::{AppError, AppResult},
    middleware::auth::AuthContext,
    models::{Order, Product},
    response::{ApiResponse, Meta},
    routes::params::{OrderListQuery, ProductQuery, SortOrder, contains_pattern},
    state::AppState,
};

pub async fn list_products(
    state: &AppState,
    query: ProductQuery,
) -> AppResult<ApiResponse<ProductList>> {
    let window = query.window();
    let mut condition = Condition::all();

    if let Some(category) = query.category {
        condition = condition.add(ProductCol::Category.eq(category));
    }
    if let Some(search) = query.q.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        let pattern = contains_pattern(search);
        condition = condition.add(
            Condition::any()
                .add(Expr::col(ProductCol::Name).ilike(pattern.clone()))
                .add(Expr::col(ProductCol::Description).ilike(pattern)),
        );
    }

    let finder = StoreProducts::find()
        .filter(condition)
        .order_by_asc(ProductCol::Name);

    let total = finder.clone().count(&state.orm).await?;
    let items = finder
        .limit(window.limit())
        .offset(window.skip())
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Product::from)
        .collect();

    Ok(ApiResponse::paged(
        "Products",
        ProductList { items },
        &window,
        total,
    ))
}

pub async fn get_product(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Product>> {
    let product = StoreProducts::find_by_id(id).one(&state.orm).await?;
    let product = match product {
        Some(p) => p,
        None => return Err(AppError::NotFound),
    };
    Ok(ApiResponse::success("Product", product.into(), None))
}

pub async fn create_product(
    state: &AppState,
    ctx: &AuthContext,
    payload: CreateProductRequest,
) -> AppResult<ApiResponse<Product>> {
    payload.validate()?;

    let product = ProductActive {
        id: Set(Uuid::new_v4()),
        name: Set(payload.name.trim().to_owned()),
        description: Set(payload.description),
        price: Set(payload.price),
        category: Set(payload.category),
        image_url: Set(payload.image_url),
        stock: Set(payload.stock),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    audit::record(
        &state.orm,
        ctx.user_id,
        "product_create",
        "store_products",
        serde_json::json!({ "product_id": product.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Product created",
        product.into(),
        Some(Meta::empty()),
    ))
}

pub async fn update_product(
    state: &AppState,
    ctx: &AuthContext,
    id: Uuid,
    payload: UpdateProductRequest,
) -> AppResult<ApiResponse<Product>> {
    payload.validate()?;

    let existing = StoreProducts::find_by_id(id).one(&state.orm).await?;
    let existing = match existing {
        Some(p) => p,
        None => return Err(AppError::NotFound),
    };

    let mut active: ProductActive = existing.into();
    if let Some(name) = payload.name {
        active.name = Set(name.trim().to_owned());
    }
    if let Some(description) = payload.description {
        active.description = Set(Some(description));
    }
    if let Some(price) = payload.price {
        active.price = Set(price);
    }
    if let Some(category) = payload.category {
        active.category = Set(category);
    }
    if let Some(image_url) = payload.image_url {
        active.image_url = Set(Some(image_url));
    }
    if let Some(stock) = payload.stock {
        active.stock = Set(stock);
    }

    let product = active.update(&state.orm).await?;

    audit::record(
        &state.orm,
        ctx.user_id,
        "product_update",
        "store_products",
        serde_json::json!({ "product_id": product.id }),
    )
    .await;

    Ok(ApiResponse::success("Updated", product.into(), Some(Meta::empty())))
}

pub async fn delete_product(
    state: &AppState,
    ctx: &AuthContext,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let result = match StoreProducts::delete_by_id(id).exec(&state.orm).await {
        Ok(result) => result,
        Err(err) if is_foreign_key_violation(&err) => {
            return Err(AppError::Conflict(
                "Product has been ordered and cannot be deleted".into(),
            ));
        }
        Err(err) => return Err(err.into()),
    };

    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    audit::record(
        &state.orm,
        ctx.user_id,
        "product_delete",
        "store_products",
        serde_json::json!({ "product_id": id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

fn is_foreign_key_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::ForeignKeyConstraintViolation(_)))
}

pub async fn checkout(
    state: &AppState,
    ctx: &AuthContext,
    payload: CheckoutRequest,
) -> AppResult<ApiResponse<OrderWithItems>> {
    let cart = Cart::from_lines(&payload.items)?;

    let txn = state.orm.begin().await?;

    let products: BTreeMap<Uuid, _> = StoreProducts::find()
        .filter(ProductCol::Id.is_in(cart.product_ids()))
        .order_by_asc(ProductCol::Id)
        .lock(LockType::Update)
        .all(&txn)
        .await?
        .into_iter()
        .map(|p| (p.id, p))
        .collect();

    for (product_id, quantity) in cart.lines() {
        let product = match products.get(&product_id) {
            Some(p) => p,
            None => {
                return Err(AppError::BadRequest(format!(
                    "Product {product_id} not found"
                )));
            }
        };
        if product.stock < quantity {
            return Err(AppError::BadRequest(format!(
                "Insufficient stock for {}",
                product.name
            )));
        }
    }

    let prices: BTreeMap<Uuid, i64> = products.iter().map(|(id, p)| (*id, p.price)).collect();
    let total_amount = cart
        .total(&prices)
        .ok_or_else(|| AppError::BadRequest("Order total is out of range".into()))?;

    let order = OrderActive {
        id: Set(Uuid::new_v4()),
        user_id: Set(ctx.user_id),
        total_amount: Set(total_amount),
        status: Set(OrderStatus::Pending),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(&txn)
    .await?;

    let mut items = Vec::new();
    for (product_id, quantity) in cart.lines() {
        let product = &products[&product_id];

        let item = OrderItemActive {
            id: Set(Uuid::new_v4()),
            order_id: Set(order.id),
            product_id: Set(product_id),
            quantity: Set(quantity),
            price: Set(product.price),
            created_at: NotSet,
        }
        .insert(&txn)
        .await?;

        StoreProducts::update_many()
            .col_expr(ProductCol::Stock, Expr::col(ProductCol::Stock).sub(quantity))
            .filter(ProductCol::Id.eq(product_id))
            .exec(&txn)
            .await?;

        items.push(OrderItemView {
            id: item.id,
            product_id,
            product_name: product.name.clone(),
            product_image_url: product.image_url.clone(),
            quantity: item.quantity,
            price: item.price,
        });
    }

    txn.commit().await?;

    tracing::info!(order_id = %order.id, total = total_amount, lines = items.len(), "order placed");
    audit::record(
        &state.orm,
        ctx.user_id,
        "checkout",
        "store_orders",
        serde_json::json!({ "order_id": order.id, "total_amount": total_amount }),
    )
    .await;

    Ok(ApiResponse::success(
        "Order placed",
        OrderWithItems {
            order: order.into(),
            items,
        },
        Some(Meta::empty()),
    ))
}

async fn fetch_items<C: ConnectionTrait>(conn: &C, order_id: Uuid) -> AppResult<Vec<OrderItemView>> {
    let stmt = Statement::from_sql_and_values(
        DbBackend::Postgres,
        r#"
        SELECT oi.id, oi.product_id, sp.name AS product_name,
               sp.image_url AS product_image_url, oi.quantity, oi.price
        FROM order_items oi
        JOIN store_products sp ON sp.id = oi.product_id
        WHERE oi.order_id = $1
        ORDER BY oi.created_at, sp.name
        "#,
        [order_id.into()],
    );
    Ok(OrderItemView::find_by_statement(stmt).all(conn).await?)
}

pub async fn list_my_orders(
    state: &AppState,
    ctx: &AuthContext,
    query: OrderListQuery,
) -> AppResult<ApiResponse<OrderList>> {
    let window = query.window();
    let mut condition = Condition::all().add(OrderCol::UserId.eq(ctx.user_id));
    if let Some(status) = query.status {
        condition = condition.add(OrderCol::Status.eq(status));
    }

    let mut finder = StoreOrders::find().filter(condition);
    finder = match query.sort_order.unwrap_or(SortOrder::Desc) {
        SortOrder::Asc => finder.order_by_asc(OrderCol::CreatedAt),
        SortOrder::Desc => finder.order_by_desc(OrderCol::CreatedAt),
    };

    let total = finder.clone().count(&state.orm).await?;
    let items = finder
        .limit(window.limit())
        .offset(window.skip())
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Order::from)
        .collect();

    Ok(ApiResponse::paged("Orders", OrderList { items }, &window, total))
}

pub async fn get_my_order(
    state: &AppState,
    ctx: &AuthContext,
    id: Uuid,
) -> AppResult<ApiResponse<OrderWithItems>> {
    let order = StoreOrders::find()
        .filter(
            Condition::all()
                .add(OrderCol::UserId.eq(ctx.user_id))
                .add(OrderCol::Id.eq(id)),
        )
        .one(&state.orm)
        .await?;
    let order = match order {
        Some(o) => o,
        None => return Err(AppError::NotFound),
    };

    let items = fetch_items(&state.orm, order.id).await?;

    Ok(ApiResponse::success(
        "OK",
        OrderWithItems {
            order: order.into(),
            items,
        },
        Some(Meta::empty()),
    ))
}

pub async fn list_all_orders(
    state: &AppState,
    query: OrderListQuery,
) -> AppResult<ApiResponse<OrderSummaryList>> {
    let window = query.window();
    let status = query.status.map(|s| s.to_string());
    let sql = format!(
        r#"
        SELECT o.id, o.user_id, pr.email AS customer_email,
               pr.first_name AS customer_first_name, pr.last_name AS customer_last_name,
               o.total_amount, o.status,
               (SELECT COUNT(*) FROM order_items oi WHERE oi.order_id = o.id) AS item_count,
               o.created_at, o.updated_at
        FROM store_orders o
        LEFT JOIN profiles pr ON pr.id = o.user_id
        WHERE ($1::text IS NULL OR o.status = $1)
        ORDER BY o.created_at {}
        LIMIT $2 OFFSET $3
        "#,
        query.sort_order.unwrap_or(SortOrder::Desc).as_sql()
    );
    let stmt = Statement::from_sql_and_values(
        DbBackend::Postgres,
        sql,
        [
            status.clone().into(),
            window.per_page.into(),
            window.offset.into(),
        ],
    );

    let (items, total) = tokio::try_join!(
        async { Ok::<_, AppError>(OrderSummary::find_by_statement(stmt).all(&state.orm).await?) },
        async {
            let total: i64 = sqlx::query_scalar(
                "SELECT COUNT(*) FROM store_orders WHERE ($1::text IS NULL OR status = $1)",
            )
            .bind(status.as_deref())
            .fetch_one(state.pool())
            .await?;
            Ok::<_, AppError>(total)
        },
    )?;

    Ok(ApiResponse::paged(
        "Orders",
        OrderSummaryList { items },
        &window,
        total as u64,
    ))
}

pub async fn get_order_admin(state: &AppState, id: Uuid) -> AppResult<ApiResponse<OrderWithItems>> {
    let order = StoreOrders::find_by_id(id).one(&state.orm).await?;
    let order = match order {
        Some(o) => o,
        None => return Err(AppError::NotFound),
    };

    let items = fetch_items(&state.orm, order.id).await?;

    Ok(ApiResponse::success(
        "OK",
        OrderWithItems {
            order: order.into(),
            items,
        },
        Some(Meta::empty()),
    ))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatusChange {
    Unchanged,
    Apply,
    Cancel,
}

pub fn plan_order_status(from: OrderStatus, to: OrderStatus) -> AppResult<OrderStatusChange> {
    use OrderStatus::*;

    match (from, to) {
        _ if from == to => Ok(OrderStatusChange::Unchanged),
        (Pending, Processing) | (Processing, Delivered) => Ok(OrderStatusChange::Apply),
        (Pending | Processing, Cancelled) => Ok(OrderStatusChange::Cancel),
        _ => Err(AppError::BadRequest(format!(
            "Cannot change order status from {from} to {to}"
        ))),
    }
}

pub async fn update_order_status(
    state: &AppState,
    ctx: &AuthContext,
    id: Uuid,
    payload: UpdateOrderStatusRequest,
) -> AppResult<ApiResponse<Order>> {
    let txn = state.orm.begin().await?;

    let order = StoreOrders::find_by_id(id)
        .lock(LockType::Update)
        .one(&txn)
        .await?;
    let order = match order {
        Some(o) => o,
        None => return Err(AppError::NotFound),
    };

    let from = order.status;
    let change = plan_order_status(from, payload.status)?;
    if change == OrderStatusChange::Unchanged {
        txn.commit().await?;
        return Ok(ApiResponse::success(
            "Status unchanged",
            order.into(),
            Some(Meta::empty()),
        ));
    }

    if change == OrderStatusChange::Cancel {
        let items = OrderItems::find()
            .filter(OrderItemCol::OrderId.eq(order.id))
            .all(&txn)
            .await?;
        for item in items {
            StoreProducts::update_many()
                .col_expr(ProductCol::Stock, Expr::col(ProductCol::Stock).add(item.quantity))
                .filter(ProductCol::Id.eq(item.product_id))
                .exec(&txn)
                .await?;
        }
    }

    let mut active: OrderActive = order.into();
    active.status = Set(payload.status);
    active.updated_at = Set(Utc::now().into());
    let order = active.update(&txn).await?;

    txn.commit().await?;

    tracing::info!(order_id = %order.id, %from, to = %order.status, "order status changed");
    audit::record(
        &state.orm,
        ctx.user_id,
        "order_status",
        "store_orders",
        serde_json::json!({ "order_id": order.id, "from": from, "to": order.status }),
    )
    .await;

    Ok(ApiResponse::success(
        "Order status updated",
        order.into(),
        Some(Meta::empty()),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use OrderStatus::*;

    #[test]
    fn orders_move_forward_or_cancel() {
        assert_eq!(plan_order_status(Pending, Processing).unwrap(), OrderStatusChange::Apply);
        assert_eq!(plan_order_status(Processing, Delivered).unwrap(), OrderStatusChange::Apply);
        assert_eq!(plan_order_status(Pending, Cancelled).unwrap(), OrderStatusChange::Cancel);
        assert_eq!(plan_order_status(Processing, Cancelled).unwrap(), OrderStatusChange::Cancel);
        assert_eq!(plan_order_status(Delivered, Delivered).unwrap(), OrderStatusChange::Unchanged);
    }

    #[test]
    fn closed_orders_do_not_reopen() {
        for (from, to) in [
            (Delivered, Pending),
            (Delivered, Cancelled),
            (Cancelled, Processing),
            (Pending, Delivered),
            (Processing, Pending),
        ] {
            assert!(matches!(plan_order_status(from, to), Err(AppError::BadRequest(_))));
        }
    }
}
