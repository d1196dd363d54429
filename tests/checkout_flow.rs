mod common;

use pet_adoption_api::{
    dto::store::{CheckoutLine, CheckoutRequest, UpdateOrderStatusRequest},
    entity::enums::{OrderStatus, Role},
    error::AppError,
    routes::params::OrderListQuery,
    services::store_service,
};

#[tokio::test]
async fn checkout_totals_lines_and_decrements_stock() -> anyhow::Result<()> {
    let Some(state) = common::setup_state().await? else {
        return Ok(());
    };
    let buyer = common::account(&state, Role::User).await?;
    let admin = common::account(&state, Role::Admin).await?;
    let a = common::insert_product(&state, 1000, 5).await?;
    let b = common::insert_product(&state, 500, 5).await?;

    let placed = store_service::checkout(
        &state,
        &buyer,
        CheckoutRequest {
            items: vec![
                CheckoutLine { product_id: a, quantity: 2 },
                CheckoutLine { product_id: b, quantity: 1 },
            ],
        },
    )
    .await?;
    let placed = placed.data.expect("order");
    assert_eq!(placed.order.total_amount, 2500);
    assert_eq!(placed.order.status, OrderStatus::Pending);
    assert_eq!(placed.items.len(), 2);
    assert_eq!(common::product_stock(&state, a).await?, 3);
    assert_eq!(common::product_stock(&state, b).await?, 4);

    let mine = store_service::get_my_order(&state, &buyer, placed.order.id).await?;
    assert_eq!(mine.data.expect("order").items.len(), 2);

    // Cancelling puts the stock back.
    store_service::update_order_status(
        &state,
        &admin,
        placed.order.id,
        UpdateOrderStatusRequest {
            status: OrderStatus::Cancelled,
        },
    )
    .await?;
    assert_eq!(common::product_stock(&state, a).await?, 5);
    assert_eq!(common::product_stock(&state, b).await?, 5);
    Ok(())
}

#[tokio::test]
async fn failing_line_leaves_no_orphan_order() -> anyhow::Result<()> {
    let Some(state) = common::setup_state().await? else {
        return Ok(());
    };
    let buyer = common::account(&state, Role::User).await?;
    let a = common::insert_product(&state, 1000, 5).await?;
    let b = common::insert_product(&state, 500, 1).await?;

    let err = store_service::checkout(
        &state,
        &buyer,
        CheckoutRequest {
            items: vec![
                CheckoutLine { product_id: a, quantity: 1 },
                CheckoutLine { product_id: b, quantity: 3 },
            ],
        },
    )
    .await
    .err()
    .expect("insufficient stock");
    assert!(matches!(err, AppError::BadRequest(_)));

    let orders: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM store_orders WHERE user_id = $1")
        .bind(buyer.user_id)
        .fetch_one(state.pool())
        .await?;
    assert_eq!(orders, 0);
    assert_eq!(common::product_stock(&state, a).await?, 5);

    let listed = store_service::list_my_orders(&state, &buyer, OrderListQuery::default()).await?;
    assert!(listed.data.expect("orders").items.is_empty());
    Ok(())
}

#[tokio::test]
async fn empty_cart_is_rejected() -> anyhow::Result<()> {
    let Some(state) = common::setup_state().await? else {
        return Ok(());
    };
    let buyer = common::account(&state, Role::User).await?;

    let err = store_service::checkout(&state, &buyer, CheckoutRequest { items: vec![] })
        .await
        .err()
        .expect("empty cart");
    assert!(matches!(err, AppError::Validation(_)));
    Ok(())
}

#[tokio::test]
async fn other_buyers_cannot_read_an_order() -> anyhow::Result<()> {
    let Some(state) = common::setup_state().await? else {
        return Ok(());
    };
    let buyer = common::account(&state, Role::User).await?;
    let other = common::account(&state, Role::User).await?;
    let a = common::insert_product(&state, 250, 2).await?;

    let placed = store_service::checkout(
        &state,
        &buyer,
        CheckoutRequest {
            items: vec![CheckoutLine { product_id: a, quantity: 1 }],
        },
    )
    .await?;
    let order_id = placed.data.expect("order").order.id;

    let err = store_service::get_my_order(&state, &other, order_id)
        .await
        .err()
        .expect("not my order");
    assert!(matches!(err, AppError::NotFound));
    Ok(())
}
