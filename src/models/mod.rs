// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Request and response bodies for the recipe shop API.

pub mod cart;
pub mod category;
pub mod money;
pub mod order;
pub mod recipe;
pub mod user;

pub use cart::{Cart, CartItem, CartItemCreate, CartItemUpdate};
pub use category::Category;
pub use money::Money;
pub use order::{Order, OrderCreate, OrderItem, OrderItemCreate, OrderStatus, OrderSummary};
pub use recipe::{Recipe, RecipeFilter, RecipeWithPricing};
pub use user::{Credentials, LoginResponse, MessageResponse, NewUser, ProfileUpdate, User};
