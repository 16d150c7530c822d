//! Shop: product catalogue, cart and checkout.

use serde::{Deserialize, Serialize};

use crate::input::{self, ValidationError};

mod cart;
mod products;

pub use self::{cart::*, products::*};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub product_id: i64,
    pub product_name: String,
    pub price: f64,
    pub qty: i64,
    pub subtotal: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    pub items: Vec<CartItem>,
    pub total: f64,
}

impl Cart {
    /// The number shown on the cart badge.
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|item| item.qty).sum()
    }

    pub fn quantity_of(&self, product_id: i64) -> Option<i64> {
        self.items
            .iter()
            .find(|item| item.product_id == product_id)
            .map(|item| item.qty)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Receipt {
    pub order_id: i64,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewProduct {
    pub name: String,
    pub price: f64,
}

/// Body of both `POST /api/cart/add` and `PATCH /api/cart/item`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CartLine {
    pub product_id: i64,
    pub qty: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductForm {
    pub name: String,
    pub price: String,
}

impl ProductForm {
    pub fn parse(&self) -> Result<NewProduct, ValidationError> {
        Ok(NewProduct {
            name: input::required_text("Name", &self.name)?,
            price: input::parse_price("Price", &self.price)?,
        })
    }
}

/// A quantity typed into the cart, or produced by its -/+ buttons.
pub fn parse_quantity(raw: &str) -> Result<i64, ValidationError> {
    input::parse_int_at_least("Quantity", raw, 1)
}
