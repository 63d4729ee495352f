// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Order models.

use super::{Money, Recipe};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Order lifecycle status, as tracked by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Preparing,
    OutForDelivery,
    Delivered,
    Cancelled,
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Preparing => "preparing",
            OrderStatus::OutForDelivery => "out_for_delivery",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        };
        f.write_str(s)
    }
}

/// Order history entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderSummary {
    pub id: u64,
    pub total_amount: Money,
    pub status: OrderStatus,
    /// Order time (ISO 8601)
    pub order_date: String,
    #[serde(default)]
    pub items_count: u32,
}

/// Full order with its lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: u64,
    #[serde(default)]
    pub user_id: Option<u64>,
    pub total_amount: Money,
    pub status: OrderStatus,
    pub delivery_address: String,
    pub delivery_phone: String,
    #[serde(default)]
    pub special_notes: Option<String>,
    pub order_date: String,
    #[serde(default)]
    pub estimated_delivery: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub order_items: Vec<OrderItem>,
}

/// One order line with the price fixed at checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: u64,
    pub recipe_id: u64,
    pub number_of_people: u32,
    pub unit_price: Money,
    pub calculated_price: Money,
    #[serde(default)]
    pub recipe: Option<Recipe>,
}

/// Checkout payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreate {
    pub delivery_address: String,
    pub delivery_phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_notes: Option<String>,
    pub items: Vec<OrderItemCreate>,
}

/// One requested order line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemCreate {
    pub recipe_id: u64,
    pub number_of_people: u32,
}
