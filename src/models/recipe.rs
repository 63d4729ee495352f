// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Recipe models and list filters.

use super::{Category, Money};
use serde::{Deserialize, Serialize};

/// Recipe as listed by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Price for one person
    pub base_price: Money,
    #[serde(default)]
    pub prep_time_minutes: Option<u32>,
    /// "easy", "medium" or "hard"
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    pub category_id: u64,
    #[serde(default = "default_available")]
    pub is_available: bool,
    /// Creation time (ISO 8601)
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub category: Option<Category>,
}

fn default_available() -> bool {
    true
}

/// Recipe with a server-computed price for a number of people.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeWithPricing {
    #[serde(flatten)]
    pub recipe: Recipe,
    #[serde(default)]
    pub calculated_price: Option<Money>,
}

/// Filters for the recipe list. Unset fields are not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeFilter {
    pub skip: Option<u32>,
    pub limit: Option<u32>,
    pub category_id: Option<u64>,
    pub difficulty: Option<String>,
}

impl RecipeFilter {
    /// Query parameters for the set fields.
    pub fn to_query(&self) -> Vec<(&'static str, Option<String>)> {
        vec![
            ("skip", self.skip.map(|v| v.to_string())),
            ("limit", self.limit.map(|v| v.to_string())),
            ("category_id", self.category_id.map(|v| v.to_string())),
            ("difficulty", self.difficulty.clone()),
        ]
    }
}
