// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shopping cart models.

use super::{Money, Recipe};
use serde::{Deserialize, Serialize};

/// The current user's cart with server-computed totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    #[serde(default)]
    pub items: Vec<CartItem>,
    pub total_amount: Money,
    #[serde(default)]
    pub total_items: u32,
}

/// One cart line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: u64,
    #[serde(default)]
    pub user_id: Option<u64>,
    pub recipe_id: u64,
    pub number_of_people: u32,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub recipe: Option<Recipe>,
    #[serde(default)]
    pub calculated_price: Option<Money>,
}

/// Add-to-cart payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItemCreate {
    pub recipe_id: u64,
    pub number_of_people: u32,
}

/// Cart line update payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItemUpdate {
    pub number_of_people: u32,
}
