// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Recipe catalogue operations.

use crate::error::Result;
use crate::http::{ApiClient, ApiRequest};
use crate::models::{Recipe, RecipeFilter, RecipeWithPricing};

/// Recipe endpoints (`/api/recipes/*`).
pub struct RecipesApi<'a> {
    client: &'a ApiClient,
}

impl<'a> RecipesApi<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn get_all(&self, filter: &RecipeFilter) -> Result<Vec<Recipe>> {
        let request = ApiRequest::get("/api/recipes/").query_pairs(filter.to_query());
        self.client.call(request, "Failed to fetch recipes").await
    }

    pub async fn get_by_id(&self, recipe_id: u64) -> Result<Recipe> {
        let request = ApiRequest::get(format!("/api/recipes/{}", recipe_id));
        self.client.call(request, "Failed to fetch recipe").await
    }

    /// Recipe with the server's price for `people` (default 1).
    pub async fn get_with_pricing(
        &self,
        recipe_id: u64,
        people: Option<u32>,
    ) -> Result<RecipeWithPricing> {
        let request = ApiRequest::get(format!("/api/recipes/{}/pricing", recipe_id))
            .query("people", people.unwrap_or(1));
        self.client
            .call(request, "Failed to fetch recipe pricing")
            .await
    }
}
