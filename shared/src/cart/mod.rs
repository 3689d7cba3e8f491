//! Session cart with derived totals
//!
//! A cart is bound to exactly one restaurant at a time. Monetary fields are
//! always derived from the items using `Decimal` internally, then converted
//! to `f64` for storage/serialization; they are recomputed on every
//! mutation and never stored independently of the items.
//!
//! Adding an item from a different restaurant than the current owner is
//! rejected with [`CartError::RestaurantMismatch`], leaving the cart
//! untouched; the caller clears explicitly after confirming with the user.

#[cfg(test)]
mod tests;

use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::{AppError, ErrorCode};

/// Rounding for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Maximum allowed price per item
const MAX_PRICE: f64 = 1_000_000.0;
/// Maximum allowed quantity per line
pub const MAX_QUANTITY: u32 = 999;

/// Cart mutation errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CartError {
    /// The cart already holds items from another restaurant. The caller
    /// must clear the cart before adding; nothing was changed.
    #[error("cart already holds items from {current_name}")]
    RestaurantMismatch {
        current_id: String,
        current_name: String,
    },

    #[error("no such item in cart: {0}")]
    ItemNotFound(String),

    #[error("invalid item: {0}")]
    InvalidItem(String),

    #[error("quantity exceeds maximum allowed ({MAX_QUANTITY}), got {0}")]
    QuantityTooLarge(i64),
}

impl From<CartError> for AppError {
    fn from(err: CartError) -> Self {
        match err {
            CartError::RestaurantMismatch {
                ref current_id,
                ref current_name,
            } => AppError::with_message(ErrorCode::RestaurantMismatch, err.to_string())
                .with_detail("current_restaurant_id", current_id.clone())
                .with_detail("current_restaurant_name", current_name.clone()),
            CartError::ItemNotFound(name) => {
                AppError::with_message(ErrorCode::CartItemNotFound, format!("{name} not in cart"))
            }
            CartError::InvalidItem(msg) => AppError::validation(msg),
            CartError::QuantityTooLarge(_) => {
                AppError::with_message(ErrorCode::QuantityOutOfRange, err.to_string())
            }
        }
    }
}

/// Tax and delivery fee parameters
///
/// Values live in the system config singleton, not in code.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Tax as a percentage of the subtotal (e.g. 5 = 5%)
    pub tax_rate_percent: f64,
    /// Flat delivery fee
    pub delivery_fee: f64,
    /// Subtotals at or above this waive the delivery fee
    pub free_delivery_above: f64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            tax_rate_percent: 5.0,
            delivery_fee: 40.0,
            free_delivery_above: 499.0,
        }
    }
}

/// Item payload for [`Cart::add_item`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItemInput {
    pub name: String,
    pub price: f64,
}

/// One cart line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub name: String,
    pub price: f64,
    pub quantity: u32,
}

/// Session cart
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    pub items: Vec<CartItem>,
    /// The single restaurant this cart is bound to; `None` when empty
    pub restaurant_id: Option<String>,
    pub restaurant_name: Option<String>,
    pub subtotal: f64,
    pub tax: f64,
    pub delivery_fee: f64,
    pub total: f64,
}

impl Cart {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Append the item, or increment the quantity of an existing line with
    /// the same name.
    ///
    /// Fails with [`CartError::RestaurantMismatch`] when the cart is bound
    /// to a different restaurant; the cart is left unchanged.
    pub fn add_item(
        &mut self,
        input: CartItemInput,
        restaurant_id: &str,
        restaurant_name: &str,
        pricing: &PricingConfig,
    ) -> Result<(), CartError> {
        validate_item(&input)?;

        if let (Some(current_id), Some(current_name)) =
            (self.restaurant_id.as_deref(), self.restaurant_name.as_deref())
            && current_id != restaurant_id
        {
            return Err(CartError::RestaurantMismatch {
                current_id: current_id.to_string(),
                current_name: current_name.to_string(),
            });
        }

        match self.items.iter_mut().find(|line| line.name == input.name) {
            Some(line) => {
                if line.quantity >= MAX_QUANTITY {
                    return Err(CartError::QuantityTooLarge(line.quantity as i64 + 1));
                }
                line.quantity += 1;
            }
            None => self.items.push(CartItem {
                name: input.name,
                price: input.price,
                quantity: 1,
            }),
        }

        self.restaurant_id = Some(restaurant_id.to_string());
        self.restaurant_name = Some(restaurant_name.to_string());
        self.recompute(pricing);
        Ok(())
    }

    /// Remove the named line. Removing the last line resets the restaurant
    /// binding so the next add can come from any restaurant.
    pub fn remove_item(&mut self, name: &str, pricing: &PricingConfig) -> Result<(), CartError> {
        let before = self.items.len();
        self.items.retain(|line| line.name != name);
        if self.items.len() == before {
            return Err(CartError::ItemNotFound(name.to_string()));
        }
        if self.items.is_empty() {
            self.restaurant_id = None;
            self.restaurant_name = None;
        }
        self.recompute(pricing);
        Ok(())
    }

    /// Set the quantity of the named line; zero or negative removes it.
    pub fn update_quantity(
        &mut self,
        name: &str,
        quantity: i64,
        pricing: &PricingConfig,
    ) -> Result<(), CartError> {
        if quantity <= 0 {
            return self.remove_item(name, pricing);
        }
        if quantity > MAX_QUANTITY as i64 {
            return Err(CartError::QuantityTooLarge(quantity));
        }
        let line = self
            .items
            .iter_mut()
            .find(|line| line.name == name)
            .ok_or_else(|| CartError::ItemNotFound(name.to_string()))?;
        line.quantity = quantity as u32;
        self.recompute(pricing);
        Ok(())
    }

    /// Empty the cart and reset the restaurant binding.
    pub fn clear(&mut self) {
        self.items.clear();
        self.restaurant_id = None;
        self.restaurant_name = None;
        self.subtotal = 0.0;
        self.tax = 0.0;
        self.delivery_fee = 0.0;
        self.total = 0.0;
    }

    /// Recompute all derived monetary fields from the items.
    ///
    /// Deterministic and idempotent: running it twice in a row yields the
    /// same values. Each component is rounded before the sum so the stored
    /// fields satisfy `total = subtotal + tax + delivery_fee` exactly.
    pub fn recompute(&mut self, pricing: &PricingConfig) {
        let subtotal: Decimal = round(
            self.items
                .iter()
                .map(|line| to_decimal(line.price) * Decimal::from(line.quantity))
                .sum(),
        );

        let tax = round(subtotal * to_decimal(pricing.tax_rate_percent) / Decimal::ONE_HUNDRED);

        let delivery_fee = if subtotal.is_zero()
            || subtotal >= to_decimal(pricing.free_delivery_above)
        {
            Decimal::ZERO
        } else {
            round(to_decimal(pricing.delivery_fee))
        };

        self.subtotal = to_f64(subtotal);
        self.tax = to_f64(tax);
        self.delivery_fee = to_f64(delivery_fee);
        self.total = to_f64(subtotal + tax + delivery_fee);
    }
}

fn validate_item(input: &CartItemInput) -> Result<(), CartError> {
    if input.name.trim().is_empty() {
        return Err(CartError::InvalidItem("item name must not be empty".into()));
    }
    if !input.price.is_finite() {
        return Err(CartError::InvalidItem(format!(
            "price must be a finite number, got {}",
            input.price
        )));
    }
    if input.price < 0.0 {
        return Err(CartError::InvalidItem(format!(
            "price must be non-negative, got {}",
            input.price
        )));
    }
    if input.price > MAX_PRICE {
        return Err(CartError::InvalidItem(format!(
            "price exceeds maximum allowed ({MAX_PRICE}), got {}",
            input.price
        )));
    }
    Ok(())
}

fn round(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or(Decimal::ZERO)
}

fn to_f64(value: Decimal) -> f64 {
    round(value).to_f64().unwrap_or(0.0)
}
