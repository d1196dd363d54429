use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use sea_orm::FromQueryResult;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    dto::{require_non_negative, require_text},
    entity::enums::{OrderStatus, ProductCategory},
    error::{AppError, AppResult},
    models::{Order, Product},
};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateProductRequest {
    pub name: String,
    pub description: Option<String>,
    /// Price in cents
    pub price: i64,
    pub category: ProductCategory,
    pub image_url: Option<String>,
    pub stock: i32,
}

impl CreateProductRequest {
    pub fn validate(&self) -> AppResult<()> {
        require_text("name", &self.name)?;
        require_non_negative("price", self.price)?;
        require_non_negative("stock", self.stock.into())
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<i64>,
    pub category: Option<ProductCategory>,
    pub image_url: Option<String>,
    pub stock: Option<i32>,
}

impl UpdateProductRequest {
    pub fn validate(&self) -> AppResult<()> {
        if let Some(name) = &self.name {
            require_text("name", name)?;
        }
        if let Some(price) = self.price {
            require_non_negative("price", price)?;
        }
        if let Some(stock) = self.stock {
            require_non_negative("stock", stock.into())?;
        }
        Ok(())
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct ProductList {
    #[schema(value_type = Vec<Product>)]
    pub items: Vec<Product>,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, ToSchema)]
pub struct CheckoutLine {
    pub product_id: Uuid,
    pub quantity: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CheckoutRequest {
    pub items: Vec<CheckoutLine>,
}

/// Checkout lines keyed by product id. Quantities are always positive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    lines: BTreeMap<Uuid, i32>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_lines(lines: &[CheckoutLine]) -> AppResult<Self> {
        let mut cart = Cart::new();
        for line in lines {
            if line.quantity <= 0 {
                return Err(AppError::Validation(format!(
                    "quantity for product {} must be greater than zero",
                    line.product_id
                )));
            }
            cart.add(line.product_id, line.quantity);
        }
        if cart.is_empty() {
            return Err(AppError::Validation("cart is empty".into()));
        }
        Ok(cart)
    }

    pub fn add(&mut self, product_id: Uuid, quantity: i32) {
        if quantity <= 0 {
            return;
        }
        let entry = self.lines.entry(product_id).or_insert(0);
        *entry = entry.saturating_add(quantity);
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of price × quantity. `None` if a product has no known price.
    pub fn total(&self, prices: &BTreeMap<Uuid, i64>) -> Option<i64> {
        self.lines.iter().try_fold(0i64, |acc, (id, qty)| {
            let price = prices.get(id)?;
            acc.checked_add(price.checked_mul(i64::from(*qty))?)
        })
    }

    pub fn product_ids(&self) -> Vec<Uuid> {
        self.lines.keys().copied().collect()
    }

    pub fn lines(&self) -> impl Iterator<Item = (Uuid, i32)> + '_ {
        self.lines.iter().map(|(id, qty)| (*id, *qty))
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateOrderStatusRequest {
    pub status: OrderStatus,
}

#[derive(Debug, Clone, Serialize, ToSchema, FromQueryResult)]
pub struct OrderItemView {
    pub id: Uuid,
    pub product_id: Uuid,
    pub product_name: String,
    pub product_image_url: Option<String>,
    pub quantity: i32,
    pub price: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderWithItems {
    pub order: Order,
    pub items: Vec<OrderItemView>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct OrderList {
    #[schema(value_type = Vec<Order>)]
    pub items: Vec<Order>,
}

#[derive(Debug, Clone, Serialize, ToSchema, FromQueryResult)]
pub struct OrderSummary {
    pub id: Uuid,
    pub user_id: Uuid,
    pub customer_email: Option<String>,
    pub customer_first_name: Option<String>,
    pub customer_last_name: Option<String>,
    pub total_amount: i64,
    pub status: OrderStatus,
    pub item_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct OrderSummaryList {
    #[schema(value_type = Vec<OrderSummary>)]
    pub items: Vec<OrderSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_accumulates_and_ignores_non_positive() {
        let a = Uuid::new_v4();
        let mut cart = Cart::new();
        cart.add(a, 0);
        cart.add(a, -3);
        assert!(cart.is_empty());

        cart.add(a, 1);
        cart.add(a, 2);
        assert_eq!(cart.lines().collect::<Vec<_>>(), vec![(a, 3)]);
    }

    #[test]
    fn total_uses_supplied_prices() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let cart = Cart::from_lines(&[
            CheckoutLine {
                product_id: a,
                quantity: 2,
            },
            CheckoutLine {
                product_id: b,
                quantity: 1,
            },
        ])
        .unwrap();

        let prices = BTreeMap::from([(a, 1000), (b, 500)]);
        assert_eq!(cart.total(&prices), Some(2500));

        let partial = BTreeMap::from([(a, 1000)]);
        assert_eq!(cart.total(&partial), None);
    }

    #[test]
    fn repeated_lines_merge() {
        let a = Uuid::new_v4();
        let line = CheckoutLine {
            product_id: a,
            quantity: 2,
        };
        let cart = Cart::from_lines(&[line, line]).unwrap();
        assert_eq!(cart.product_ids(), vec![a]);
        assert_eq!(cart.lines().collect::<Vec<_>>(), vec![(a, 4)]);
    }

    #[test]
    fn invalid_lines_are_rejected() {
        let bad = CheckoutLine {
            product_id: Uuid::new_v4(),
            quantity: 0,
        };
        assert!(matches!(
            Cart::from_lines(&[bad]),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(Cart::from_lines(&[]), Err(AppError::Validation(_))));
    }

    #[test]
    fn product_validation() {
        let req = CreateProductRequest {
            name: "Chew toy".into(),
            description: None,
            price: -1,
            category: ProductCategory::Toys,
            image_url: None,
            stock: 3,
        };
        assert!(req.validate().is_err());
    }
}
