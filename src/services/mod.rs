// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Endpoint operations grouped by backend area.
//!
//! Every operation forwards to one verb and path, unwraps the body on
//! success, and on failure returns a [`RequestFailure`](crate::error::RequestFailure)
//! whose message is the server's `detail` or the operation's fallback.

pub mod account;
pub mod auth;
pub mod cart;
pub mod categories;
pub mod orders;
pub mod recipes;

pub use account::AccountService;
pub use auth::AuthApi;
pub use cart::CartApi;
pub use categories::CategoriesApi;
pub use orders::OrdersApi;
pub use recipes::RecipesApi;

use crate::http::ApiClient;

impl ApiClient {
    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi::new(self)
    }

    pub fn recipes(&self) -> RecipesApi<'_> {
        RecipesApi::new(self)
    }

    pub fn categories(&self) -> CategoriesApi<'_> {
        CategoriesApi::new(self)
    }

    pub fn cart(&self) -> CartApi<'_> {
        CartApi::new(self)
    }

    pub fn orders(&self) -> OrdersApi<'_> {
        OrdersApi::new(self)
    }
}
