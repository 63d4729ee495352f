// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use crate::error::Result;
use crate::http::{ApiClient, ApiRequest};
use crate::models::Category;

/// Category endpoints (`/api/categories/`).
pub struct CategoriesApi<'a> {
    client: &'a ApiClient,
}

impl<'a> CategoriesApi<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn get_all(&self) -> Result<Vec<Category>> {
        self.client
            .call(ApiRequest::get("/api/categories/"), "Failed to fetch categories")
            .await
    }
}
