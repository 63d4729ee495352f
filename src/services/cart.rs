// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shopping cart operations. All require a session.

use crate::error::Result;
use crate::http::{ApiClient, ApiRequest};
use crate::models::{Cart, CartItem, CartItemCreate, CartItemUpdate, MessageResponse};

/// Cart endpoints (`/api/cart/*`).
pub struct CartApi<'a> {
    client: &'a ApiClient,
}

impl<'a> CartApi<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn get_items(&self) -> Result<Cart> {
        self.client
            .call(ApiRequest::get("/api/cart/"), "Failed to fetch cart items")
            .await
    }

    pub async fn add_item(&self, item: &CartItemCreate) -> Result<CartItem> {
        let request = ApiRequest::post("/api/cart/").json(item);
        self.client.call(request, "Failed to add item to cart").await
    }

    pub async fn update_item(&self, item_id: u64, update: &CartItemUpdate) -> Result<CartItem> {
        let request = ApiRequest::put(format!("/api/cart/{}", item_id)).json(update);
        self.client.call(request, "Failed to update cart item").await
    }

    /// Remove a cart line. A reply with no body (e.g. `204 No Content`)
    /// still counts as success and yields `None`.
    pub async fn remove_item(&self, item_id: u64) -> Result<Option<MessageResponse>> {
        let request = ApiRequest::delete(format!("/api/cart/{}", item_id));
        self.client
            .call(request, "Failed to remove item from cart")
            .await
    }
}
