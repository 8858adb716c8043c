//! Shared fixtures for the catalog SDK integration tests.
//!
//! `MockApi::start()` runs an in-process axum server that behaves like a
//! small json-server: a `products` and a `comments` collection, ids
//! assigned on create, `?productId=` filtering on comments. Setting
//! `fail_requests(true)` makes every route answer 500.

#![allow(dead_code)]

use std::collections::HashMap;
use std::future;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, put};
use axum::{Json, Router};
use chrono::NaiveDate;
use serde_json::{json, Value};

use catalog_sdk::{
    Catalog, CatalogError, FixedClock, NewProduct, Product, ProductId, ProductResource, Result,
    Size,
};

// ---------------------------------------------------------------------------
// Mock REST server
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct ApiState {
    pub products: Vec<Value>,
    pub comments: Vec<Value>,
    pub next_id: u64,
    pub failing: bool,
    pub requests: usize,
}

type Shared = Arc<Mutex<ApiState>>;

pub struct MockApi {
    pub base: String,
    state: Shared,
}

impl MockApi {
    pub async fn start(products: Vec<Value>, comments: Vec<Value>) -> MockApi {
        let next_id = products
            .iter()
            .chain(comments.iter())
            .filter_map(|v| v["id"].as_u64())
            .max()
            .unwrap_or(0)
            + 1;
        let state: Shared = Arc::new(Mutex::new(ApiState {
            products,
            comments,
            next_id,
            ..ApiState::default()
        }));

        let app = Router::new()
            .route("/products", get(list_products).post(create_product))
            .route("/products/{id}", put(update_product).delete(delete_product))
            .route("/comments", get(list_comments).post(create_comment))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        MockApi {
            base: format!("http://{addr}"),
            state,
        }
    }

    pub async fn empty() -> MockApi {
        Self::start(Vec::new(), Vec::new()).await
    }

    pub fn products_url(&self) -> String {
        format!("{}/products", self.base)
    }

    pub fn comments_url(&self) -> String {
        format!("{}/comments", self.base)
    }

    /// A catalog pointed at this server, dating comments 14:05 on 2024-03-01.
    pub fn catalog(&self) -> Catalog {
        Catalog::builder()
            .products_url(self.products_url())
            .comments_url(self.comments_url())
            .clock(fixed_clock())
            .build()
            .unwrap()
    }

    pub fn fail_requests(&self, failing: bool) {
        self.state.lock().unwrap().failing = failing;
    }

    pub fn set_next_id(&self, id: u64) {
        self.state.lock().unwrap().next_id = id;
    }

    pub fn request_count(&self) -> usize {
        self.state.lock().unwrap().requests
    }

    pub fn server_products(&self) -> Vec<Value> {
        self.state.lock().unwrap().products.clone()
    }

    pub fn server_comments(&self) -> Vec<Value> {
        self.state.lock().unwrap().comments.clone()
    }
}

/// Count the request and bail out with 500 when failure injection is on.
fn enter(state: &Shared) -> std::result::Result<std::sync::MutexGuard<'_, ApiState>, StatusCode> {
    let mut guard = state.lock().unwrap();
    guard.requests += 1;
    if guard.failing {
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }
    Ok(guard)
}

fn assign_id(api: &mut ApiState, mut body: Value) -> Value {
    body["id"] = json!(api.next_id);
    api.next_id += 1;
    body
}

type Reply = std::result::Result<Json<Value>, StatusCode>;

async fn list_products(State(state): State<Shared>) -> Reply {
    let api = enter(&state)?;
    Ok(Json(Value::Array(api.products.clone())))
}

async fn create_product(State(state): State<Shared>, Json(body): Json<Value>) -> Reply {
    let mut api = enter(&state)?;
    let created = assign_id(&mut api, body);
    api.products.push(created.clone());
    Ok(Json(created))
}

/// Replaces the stored product when present and echoes the body either way.
async fn update_product(
    State(state): State<Shared>,
    Path(id): Path<u64>,
    Json(mut body): Json<Value>,
) -> Reply {
    let mut api = enter(&state)?;
    body["id"] = json!(id);
    if let Some(slot) = api.products.iter_mut().find(|p| p["id"] == json!(id)) {
        *slot = body.clone();
    }
    Ok(Json(body))
}

async fn delete_product(State(state): State<Shared>, Path(id): Path<u64>) -> Reply {
    let mut api = enter(&state)?;
    api.products.retain(|p| p["id"] != json!(id));
    Ok(Json(json!({})))
}

async fn list_comments(
    State(state): State<Shared>,
    Query(params): Query<HashMap<String, String>>,
) -> Reply {
    let api = enter(&state)?;
    let wanted = params.get("productId").and_then(|v| v.parse::<u64>().ok());
    let comments = api
        .comments
        .iter()
        .filter(|c| wanted.map_or(true, |pid| c["productId"] == json!(pid)))
        .cloned()
        .collect();
    Ok(Json(Value::Array(comments)))
}

async fn create_comment(State(state): State<Shared>, Json(body): Json<Value>) -> Reply {
    let mut api = enter(&state)?;
    let created = assign_id(&mut api, body);
    api.comments.push(created.clone());
    Ok(Json(created))
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub fn fixed_clock() -> FixedClock {
    FixedClock(
        NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(14, 5, 0)
            .unwrap(),
    )
}

pub fn product_json(id: u64, name: &str, count: u32) -> Value {
    json!({
        "id": id,
        "imageUrl": format!("https://img.example.com/{id}.png"),
        "name": name,
        "count": count,
        "size": { "width": 200, "height": 200 },
        "weight": "200g"
    })
}

pub fn comment_json(id: u64, product_id: u64, description: &str) -> Value {
    json!({
        "id": id,
        "productId": product_id,
        "description": description,
        "date": "09:30 15.02.2024"
    })
}

pub fn product(id: ProductId, name: &str, count: u32) -> Product {
    serde_json::from_value(product_json(id, name, count)).unwrap()
}

pub fn draft(name: &str, count: u32) -> NewProduct {
    NewProduct {
        image_url: "https://img.example.com/new.png".into(),
        name: name.into(),
        count,
        size: Size {
            width: 10.0,
            height: 20.0,
        },
        weight: "1kg".into(),
    }
}

/// Base URL of a port that was just released, so connections are refused.
pub async fn unreachable_base() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

// ---------------------------------------------------------------------------
// HangingProducts — reads and writes never complete, deletes fail blankly
// ---------------------------------------------------------------------------

pub struct HangingProducts;

impl ProductResource for HangingProducts {
    async fn list(&self) -> Result<Vec<Product>> {
        future::pending().await
    }

    async fn create(&self, _draft: &NewProduct) -> Result<Product> {
        future::pending().await
    }

    async fn update(&self, _product: &Product) -> Result<Product> {
        future::pending().await
    }

    async fn delete(&self, _id: ProductId) -> Result<()> {
        Err(CatalogError::Status {
            status: 500,
            message: String::new(),
        })
    }
}
