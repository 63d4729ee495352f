// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared test fixtures: an in-process fake of the recipe shop backend and
//! credential stores with injectable failures.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    extract::{Path, Query, Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use recipe_shop_client::config::{parse_base_url, Config, StoreReadPolicy};
use recipe_shop_client::store::{CredentialStore, MemoryStore, StoreError};
use recipe_shop_client::AppState;
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Password the fake backend accepts for every account.
pub const PASSWORD: &str = "x";

/// One request as the fake backend saw it.
#[derive(Debug, Clone)]
pub struct SeenRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
}

pub struct BackendState {
    seen: Mutex<Vec<SeenRequest>>,
    valid_tokens: Mutex<HashSet<String>>,
    fixed_token: Mutex<Option<String>>,
    delay: Mutex<Option<Duration>>,
    profile: Mutex<Value>,
    cart: Mutex<Vec<Value>>,
    orders: Mutex<Vec<Value>>,
    next_id: AtomicU64,
    empty_deletes: AtomicBool,
    login_extra: Mutex<Option<Value>>,
}

impl Default for BackendState {
    fn default() -> Self {
        Self {
            seen: Mutex::default(),
            valid_tokens: Mutex::default(),
            fixed_token: Mutex::default(),
            delay: Mutex::default(),
            profile: Mutex::new(json!({
                "id": 1,
                "name": "Test Cook",
                "email": "a@b.com",
                "country_code": "+973",
                "is_active": true
            })),
            cart: Mutex::default(),
            orders: Mutex::default(),
            next_id: AtomicU64::new(100),
            empty_deletes: AtomicBool::new(false),
            login_extra: Mutex::default(),
        }
    }
}

/// Fake backend served on an ephemeral local port.
pub struct MockBackend {
    pub addr: SocketAddr,
    pub state: Arc<BackendState>,
}

impl MockBackend {
    pub async fn start() -> Self {
        let state = Arc::new(BackendState::default());
        let app = router(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock backend");
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, state }
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn requests(&self) -> Vec<SeenRequest> {
        self.state.seen.lock().unwrap().clone()
    }

    /// Most recent request to `path`.
    pub fn last_request(&self, path: &str) -> Option<SeenRequest> {
        self.requests().into_iter().rev().find(|r| r.path == path)
    }

    /// Make login hand out this exact token instead of a fresh JWT.
    pub fn issue_fixed_token(&self, token: &str) {
        *self.state.fixed_token.lock().unwrap() = Some(token.to_string());
    }

    /// Accept `token` without a login (e.g. a token persisted earlier).
    pub fn accept_token(&self, token: &str) {
        self.state.valid_tokens.lock().unwrap().insert(token.to_string());
    }

    /// Expire every issued token; further use gets 401 `expired`.
    pub fn revoke_all_tokens(&self) {
        self.state.valid_tokens.lock().unwrap().clear();
    }

    /// Answer successful cart deletes with `204 No Content`.
    pub fn reply_empty_on_delete(&self) {
        self.state.empty_deletes.store(true, Ordering::SeqCst);
    }

    /// Merge `extra` into every login reply (e.g. a `user` object).
    pub fn extend_login_reply(&self, extra: Value) {
        *self.state.login_extra.lock().unwrap() = Some(extra);
    }

    /// Delay replies from the categories endpoint.
    pub fn set_delay(&self, delay: Duration) {
        *self.state.delay.lock().unwrap() = Some(delay);
    }
}

/// Client state pointed at `base_url` with a short timeout.
pub fn app_state(
    base_url: &str,
    store: Arc<dyn CredentialStore>,
    policy: StoreReadPolicy,
) -> AppState {
    let config = Config {
        base_url: parse_base_url(base_url).unwrap(),
        timeout: Duration::from_millis(500),
        store_read_policy: policy,
        ..Config::default()
    };
    AppState::new(config, store).expect("client should build")
}

/// Address nothing is listening on.
pub async fn unused_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

/// Memory store whose reads or deletes can be made to fail.
#[derive(Default)]
pub struct FlakyStore {
    pub inner: MemoryStore,
    pub fail_get: AtomicBool,
    pub fail_delete: AtomicBool,
}

impl FlakyStore {
    pub fn fail_reads(&self, fail: bool) {
        self.fail_get.store(fail, Ordering::SeqCst);
    }

    pub fn fail_deletes(&self, fail: bool) {
        self.fail_delete.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl CredentialStore for FlakyStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        if self.fail_get.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("secure storage locked".into()));
        }
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.inner.set(key, value).await
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("secure storage locked".into()));
        }
        self.inner.delete(key).await
    }
}

// ─── Fake backend ────────────────────────────────────────────────────────────

type Shared = State<Arc<BackendState>>;

fn router(state: Arc<BackendState>) -> Router {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/me", get(me))
        .route("/auth/profile", put(update_profile))
        .route("/api/recipes/", get(list_recipes))
        .route("/api/recipes/{id}", get(get_recipe))
        .route("/api/recipes/{id}/pricing", get(recipe_pricing))
        .route("/api/categories/", get(list_categories))
        .route("/api/cart/", get(get_cart).post(add_cart_item))
        .route("/api/cart/{id}", put(update_cart_item).delete(remove_cart_item))
        .route("/api/orders/", get(list_orders).post(create_order))
        .route("/api/orders/{id}", get(get_order))
        .layer(middleware::from_fn_with_state(state.clone(), record))
        .with_state(state)
}

async fn record(State(state): Shared, request: Request, next: Next) -> Response {
    let seen = SeenRequest {
        method: request.method().to_string(),
        path: request.uri().path().to_string(),
        query: request.uri().query().map(str::to_string),
        authorization: request
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
    };
    state.seen.lock().unwrap().push(seen);
    next.run(request).await
}

fn detail(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "detail": message }))).into_response()
}

fn require_token(state: &BackendState, headers: &HeaderMap) -> Result<(), Response> {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .ok_or_else(|| detail(StatusCode::UNAUTHORIZED, "Not authenticated"))?;

    if state.valid_tokens.lock().unwrap().contains(token) {
        Ok(())
    } else {
        Err(detail(StatusCode::UNAUTHORIZED, "expired"))
    }
}

/// Mint a signed session token the way a real backend would.
fn mint_jwt(subject: &str) -> String {
    use jsonwebtoken::{encode, EncodingKey, Header};

    #[derive(Serialize)]
    struct Claims {
        sub: String,
        exp: usize,
        iat: usize,
    }

    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as usize;

    encode(
        &Header::default(),
        &Claims {
            sub: subject.to_string(),
            exp: now + 3600,
            iat: now,
        },
        &EncodingKey::from_secret(b"mock-backend-signing-key"),
    )
    .unwrap()
}

async fn register(State(state): Shared, Json(body): Json<Value>) -> Response {
    let email = body["email"].as_str().unwrap_or_default();
    if email == "taken@example.com" {
        return detail(StatusCode::BAD_REQUEST, "Username or email already exists");
    }

    let user = json!({
        "id": state.next_id.fetch_add(1, Ordering::SeqCst),
        "name": body["name"],
        "email": email,
        "is_active": true
    });
    *state.profile.lock().unwrap() = user.clone();
    Json(user).into_response()
}

async fn login(State(state): Shared, Json(body): Json<Value>) -> Response {
    if body["password"] != PASSWORD {
        return detail(StatusCode::BAD_REQUEST, "Invalid username or password");
    }

    let email = body["email"].as_str().unwrap_or_default();
    let token = state
        .fixed_token
        .lock()
        .unwrap()
        .clone()
        .unwrap_or_else(|| mint_jwt(email));
    state.valid_tokens.lock().unwrap().insert(token.clone());

    let mut reply = json!({ "token": token, "message": "Login successful" });
    if let Some(Value::Object(extra)) = state.login_extra.lock().unwrap().clone() {
        for (key, value) in extra {
            reply[key] = value;
        }
    }
    Json(reply).into_response()
}

async fn me(State(state): Shared, headers: HeaderMap) -> Response {
    if let Err(rejection) = require_token(&state, &headers) {
        return rejection;
    }
    Json(state.profile.lock().unwrap().clone()).into_response()
}

async fn update_profile(State(state): Shared, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    if let Err(rejection) = require_token(&state, &headers) {
        return rejection;
    }

    let mut profile = state.profile.lock().unwrap();
    if let (Some(profile), Some(update)) = (profile.as_object_mut(), body.as_object()) {
        for (key, value) in update {
            profile.insert(key.clone(), value.clone());
        }
    }
    Json(profile.clone()).into_response()
}

fn recipe(id: u64) -> Option<Value> {
    let (name, price, category) = match id {
        4 => ("Chicken Machboos", "4.500", 2),
        5 => ("Balaleet", "2.250", 1),
        _ => return None,
    };
    Some(json!({
        "id": id,
        "name": name,
        "description": "Recipe kit",
        "base_price": price,
        "prep_time_minutes": 45,
        "difficulty": "medium",
        "image_url": null,
        "category_id": category,
        "is_available": true,
        "created_at": "2025-01-01T10:00:00"
    }))
}

async fn list_recipes() -> Response {
    Json(json!([recipe(5), recipe(4)])).into_response()
}

async fn get_recipe(Path(id): Path<u64>) -> Response {
    match recipe(id) {
        Some(recipe) => Json(recipe).into_response(),
        None => detail(StatusCode::NOT_FOUND, "Recipe not found"),
    }
}

async fn recipe_pricing(Path(id): Path<u64>, Query(params): Query<HashMap<String, String>>) -> Response {
    let Some(mut recipe) = recipe(id) else {
        return detail(StatusCode::NOT_FOUND, "Recipe not found");
    };
    let people: u32 = params
        .get("people")
        .and_then(|p| p.parse().ok())
        .unwrap_or(1);
    let base: f64 = recipe["base_price"].as_str().unwrap().parse().unwrap();
    recipe["calculated_price"] = json!(format!("{:.3}", base * people as f64));
    Json(recipe).into_response()
}

async fn list_categories(State(state): Shared) -> Response {
    let delay = *state.delay.lock().unwrap();
    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }
    Json(json!([
        { "id": 1, "name": "Breakfast", "is_active": true, "display_order": 1,
          "created_at": "2025-01-01T10:00:00" },
        { "id": 2, "name": "Traditional", "is_active": true, "display_order": 2,
          "created_at": "2025-01-01T10:00:00" }
    ]))
    .into_response()
}

async fn get_cart(State(state): Shared, headers: HeaderMap) -> Response {
    if let Err(rejection) = require_token(&state, &headers) {
        return rejection;
    }
    let items = state.cart.lock().unwrap().clone();
    let total: f64 = items
        .iter()
        .map(|i| i["calculated_price"].as_str().unwrap().parse::<f64>().unwrap())
        .sum();
    Json(json!({
        "items": items,
        "total_amount": format!("{:.3}", total),
        "total_items": items.len()
    }))
    .into_response()
}

fn cart_line(id: u64, recipe_id: u64, people: u64) -> Option<Value> {
    let recipe = recipe(recipe_id)?;
    let base: f64 = recipe["base_price"].as_str().unwrap().parse().unwrap();
    Some(json!({
        "id": id,
        "user_id": 1,
        "recipe_id": recipe_id,
        "number_of_people": people,
        "created_at": "2025-01-02T10:00:00",
        "updated_at": "2025-01-02T10:00:00",
        "recipe": recipe,
        "calculated_price": format!("{:.3}", base * people as f64)
    }))
}

async fn add_cart_item(State(state): Shared, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    if let Err(rejection) = require_token(&state, &headers) {
        return rejection;
    }
    let id = state.next_id.fetch_add(1, Ordering::SeqCst);
    let recipe_id = body["recipe_id"].as_u64().unwrap_or_default();
    let people = body["number_of_people"].as_u64().unwrap_or(1);
    match cart_line(id, recipe_id, people) {
        Some(line) => {
            state.cart.lock().unwrap().push(line.clone());
            Json(line).into_response()
        }
        None => detail(StatusCode::NOT_FOUND, "Recipe not found"),
    }
}

async fn update_cart_item(
    State(state): Shared,
    headers: HeaderMap,
    Path(id): Path<u64>,
    Json(body): Json<Value>,
) -> Response {
    if let Err(rejection) = require_token(&state, &headers) {
        return rejection;
    }
    let mut cart = state.cart.lock().unwrap();
    let Some(line) = cart.iter_mut().find(|l| l["id"] == id) else {
        return detail(StatusCode::NOT_FOUND, "Cart item not found");
    };
    let recipe_id = line["recipe_id"].as_u64().unwrap();
    let people = body["number_of_people"].as_u64().unwrap_or(1);
    *line = cart_line(id, recipe_id, people).unwrap();
    Json(line.clone()).into_response()
}

async fn remove_cart_item(State(state): Shared, headers: HeaderMap, Path(id): Path<u64>) -> Response {
    if let Err(rejection) = require_token(&state, &headers) {
        return rejection;
    }
    let mut cart = state.cart.lock().unwrap();
    let before = cart.len();
    cart.retain(|l| l["id"] != id);
    if cart.len() == before {
        return detail(StatusCode::NOT_FOUND, "Cart item not found");
    }
    if state.empty_deletes.load(Ordering::SeqCst) {
        return StatusCode::NO_CONTENT.into_response();
    }
    Json(json!({ "message": "Item removed from cart successfully" })).into_response()
}

async fn list_orders(State(state): Shared, headers: HeaderMap) -> Response {
    if let Err(rejection) = require_token(&state, &headers) {
        return rejection;
    }
    let summaries: Vec<Value> = state
        .orders
        .lock()
        .unwrap()
        .iter()
        .map(|o| {
            json!({
                "id": o["id"],
                "total_amount": o["total_amount"],
                "status": o["status"],
                "order_date": o["order_date"],
                "items_count": o["order_items"].as_array().map(Vec::len).unwrap_or(0)
            })
        })
        .collect();
    Json(summaries).into_response()
}

async fn create_order(State(state): Shared, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    if let Err(rejection) = require_token(&state, &headers) {
        return rejection;
    }
    let Some(items) = body["items"].as_array().filter(|i| !i.is_empty()) else {
        return detail(StatusCode::BAD_REQUEST, "Order must contain at least 1 item");
    };

    let mut total = 0.0;
    let mut lines = Vec::new();
    for item in items {
        let recipe_id = item["recipe_id"].as_u64().unwrap_or_default();
        let people = item["number_of_people"].as_u64().unwrap_or(1);
        let Some(recipe) = recipe(recipe_id) else {
            return detail(StatusCode::NOT_FOUND, "Recipe not found");
        };
        let unit: f64 = recipe["base_price"].as_str().unwrap().parse().unwrap();
        total += unit * people as f64;
        lines.push(json!({
            "id": state.next_id.fetch_add(1, Ordering::SeqCst),
            "recipe_id": recipe_id,
            "number_of_people": people,
            "unit_price": unit,
            "calculated_price": unit * people as f64,
            "recipe": recipe
        }));
    }

    let order = json!({
        "id": state.next_id.fetch_add(1, Ordering::SeqCst),
        "user_id": 1,
        "total_amount": total,
        "status": "pending",
        "delivery_address": body["delivery_address"],
        "delivery_phone": body["delivery_phone"],
        "special_notes": body.get("special_notes").cloned().unwrap_or(Value::Null),
        "order_date": "2025-02-01T09:00:00",
        "estimated_delivery": null,
        "created_at": "2025-02-01T09:00:00",
        "order_items": lines
    });
    state.orders.lock().unwrap().push(order.clone());
    (StatusCode::CREATED, Json(order)).into_response()
}

async fn get_order(State(state): Shared, headers: HeaderMap, Path(id): Path<u64>) -> Response {
    if let Err(rejection) = require_token(&state, &headers) {
        return rejection;
    }
    if id == 500 {
        return (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response();
    }
    let orders = state.orders.lock().unwrap();
    match orders.iter().find(|o| o["id"] == id) {
        Some(order) => Json(order.clone()).into_response(),
        None => detail(StatusCode::NOT_FOUND, "Order not found"),
    }
}
