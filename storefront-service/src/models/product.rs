//! Product catalog model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thiserror::Error;

/// Violation of a product invariant, caught before a row is written.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidProduct {
    #[error("product name must not be blank")]
    BlankName,

    #[error("product price must not be negative")]
    NegativePrice,

    #[error("product stock must not be negative")]
    NegativeStock,
}

/// A sellable item. The store assigns `id`; nothing mutates a product
/// after seed time.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub brand: String,
    pub category: String,
    pub size: String,
    pub color: String,
    pub price: f64,
    pub stock: i64,
    pub description: String,
}

impl Product {
    pub fn is_available(&self) -> bool {
        self.stock > 0
    }
}

/// Input for inserting a product at seed time.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub brand: String,
    pub category: String,
    pub size: String,
    pub color: String,
    pub price: f64,
    pub stock: i64,
    pub description: String,
}

impl NewProduct {
    /// Invariants: name non-blank, price >= 0, stock >= 0.
    pub fn validate(&self) -> Result<(), InvalidProduct> {
        if self.name.trim().is_empty() {
            return Err(InvalidProduct::BlankName);
        }
        if self.price < 0.0 {
            return Err(InvalidProduct::NegativePrice);
        }
        if self.stock < 0 {
            return Err(InvalidProduct::NegativeStock);
        }
        Ok(())
    }
}

/// Equality filters for catalog search. Empty filter matches everything.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    pub brand: Option<String>,
    pub category: Option<String>,
}

impl ProductFilter {
    pub fn is_empty(&self) -> bool {
        self.brand.is_none() && self.category.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> NewProduct {
        NewProduct {
            name: "Pegasus 40".to_string(),
            brand: "Nike".to_string(),
            category: "Running".to_string(),
            size: "42".to_string(),
            color: "Black".to_string(),
            price: 120.0,
            stock: 8,
            description: "Daily running shoe".to_string(),
        }
    }

    #[test]
    fn valid_product_passes_validation() {
        assert_eq!(sample().validate(), Ok(()));
    }

    #[test]
    fn zero_price_is_allowed() {
        let mut product = sample();
        product.price = 0.0;
        assert_eq!(product.validate(), Ok(()));
    }

    #[test]
    fn blank_name_is_rejected() {
        let mut product = sample();
        product.name = "   ".to_string();
        assert_eq!(product.validate(), Err(InvalidProduct::BlankName));
    }

    #[test]
    fn negative_price_is_rejected() {
        let mut product = sample();
        product.price = -0.01;
        assert_eq!(product.validate(), Err(InvalidProduct::NegativePrice));
    }

    #[test]
    fn negative_stock_is_rejected() {
        let mut product = sample();
        product.stock = -1;
        assert_eq!(product.validate(), Err(InvalidProduct::NegativeStock));
    }

    #[test]
    fn availability_follows_stock() {
        let product = sample();
        let listed = Product {
            id: 1,
            name: product.name,
            brand: product.brand,
            category: product.category,
            size: product.size,
            color: product.color,
            price: product.price,
            stock: product.stock,
            description: product.description,
        };
        assert!(listed.is_available());

        let sold_out = Product { stock: 0, ..listed };
        assert!(!sold_out.is_available());
    }
}
