// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Order history and checkout.

use crate::error::Result;
use crate::http::{ApiClient, ApiRequest};
use crate::models::{Order, OrderCreate, OrderSummary};

/// Order endpoints (`/api/orders/*`).
pub struct OrdersApi<'a> {
    client: &'a ApiClient,
}

impl<'a> OrdersApi<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn get_all(&self) -> Result<Vec<OrderSummary>> {
        self.client
            .call(ApiRequest::get("/api/orders/"), "Failed to fetch orders")
            .await
    }

    /// Place an order. Prices are computed by the server.
    pub async fn create(&self, order: &OrderCreate) -> Result<Order> {
        let request = ApiRequest::post("/api/orders/").json(order);
        self.client.call(request, "Failed to create order").await
    }

    pub async fn get_by_id(&self, order_id: u64) -> Result<Order> {
        let request = ApiRequest::get(format!("/api/orders/{}", order_id));
        self.client.call(request, "Failed to fetch order").await
    }
}
