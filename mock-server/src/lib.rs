//! In-memory stand-in for the storefront backend.
//!
//! Serves every operation under `/api/{operation}` wrapped in the standard
//! envelope. GET operations answer with fixtures, POST operations echo the
//! request body as `data`. Requests without an `Authorization` header get
//! HTTP 401. Tests can script any operation's answer through [`MockState`].

use std::{collections::HashMap, sync::Arc};

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header::AUTHORIZATION, HeaderMap},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};

pub use axum::http::StatusCode;

/// A canned answer for one operation.
#[derive(Clone, Debug)]
pub enum Scripted {
    /// HTTP 200 with this body, typically an envelope.
    Body(Value),
    /// This HTTP status with an empty body.
    Status(StatusCode),
}

#[derive(Clone, Default)]
pub struct MockState {
    overrides: Arc<RwLock<HashMap<String, Scripted>>>,
}

impl MockState {
    /// Answer `operation` (e.g. `"CategoryAD"`) with `scripted` from now on.
    pub async fn script(&self, operation: &str, scripted: Scripted) {
        self.overrides
            .write()
            .await
            .insert(operation.to_string(), scripted);
    }

    pub async fn clear(&self, operation: &str) {
        self.overrides.write().await.remove(operation);
    }
}

/// Wrap `data` in a success envelope.
pub fn envelope(data: Value) -> Value {
    json!({ "code": 200, "redirect": null, "data": data, "token": null })
}

/// A rejecting envelope with `code` and an optional reason.
pub fn rejection(code: i64, redirect: Option<&str>) -> Value {
    json!({ "code": code, "redirect": redirect, "data": null, "token": null })
}

pub fn app() -> Router {
    app_with_state(MockState::default())
}

pub fn app_with_state(state: MockState) -> Router {
    Router::new()
        .route("/api/{operation}", get(fetch).post(search))
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

pub async fn run_with_state(listener: TcpListener, state: MockState) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with_state(state)).await
}

async fn fetch(
    State(state): State<MockState>,
    Path(operation): Path<String>,
    headers: HeaderMap,
) -> Response {
    if let Some(rejected) = precheck(&state, &operation, &headers).await {
        return rejected;
    }
    match fixture(&operation) {
        Some(data) => Json(envelope(data)).into_response(),
        None => {
            tracing::debug!(%operation, "unknown operation");
            StatusCode::NOT_FOUND.into_response()
        }
    }
}

async fn search(
    State(state): State<MockState>,
    Path(operation): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    if let Some(rejected) = precheck(&state, &operation, &headers).await {
        return rejected;
    }
    if !matches!(operation.as_str(), "SearchOrder" | "SearchOrderDetail") {
        return StatusCode::METHOD_NOT_ALLOWED.into_response();
    }
    let criteria: Value = if body.is_empty() {
        Value::Null
    } else {
        match serde_json::from_slice(&body) {
            Ok(value) => value,
            Err(_) => return Json(rejection(400, Some("malformed search criteria"))).into_response(),
        }
    };
    let echoed_headers: serde_json::Map<String, Value> = headers
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|value| (name.as_str().to_string(), Value::from(value)))
        })
        .collect();
    Json(envelope(json!({
        "operation": operation,
        "criteria": criteria,
        "headers": echoed_headers,
    })))
    .into_response()
}

/// Authorization check and scripted overrides, in that order.
async fn precheck(state: &MockState, operation: &str, headers: &HeaderMap) -> Option<Response> {
    let authorized = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| !value.is_empty());
    if !authorized {
        tracing::debug!(%operation, "missing authorization");
        return Some(StatusCode::UNAUTHORIZED.into_response());
    }
    let scripted = state.overrides.read().await.get(operation).cloned()?;
    Some(match scripted {
        Scripted::Body(body) => Json(body).into_response(),
        Scripted::Status(status) => status.into_response(),
    })
}

/// Fixture `data` for a GET operation, shaped like the real backend.
pub fn fixture(operation: &str) -> Option<Value> {
    let data = match operation {
        "MarqueeList" => json!([
            {
                "subject": "Free shipping over 499",
                "app": { "category_id": null, "keyword": "shipping", "type": "search" },
                "subject_url": "https://www.vivatv.com.tw/event/shipping"
            },
            { "subject": "Live show tonight 8pm", "app": null, "subject_url": null }
        ]),
        "CampaignLink" => json!([
            {
                "url": "https://www.vivatv.com.tw/campaign/spring",
                "app": { "category_id": "31", "keyword": null, "type": "category" },
                "campaign_name": "Spring sale",
                "url_mobile": "https://m.vivatv.com.tw/campaign/spring",
                "ad_title": "Spring",
                "ad_name": "spring-2024"
            }
        ]),
        "SwpMainAD" => json!({
            "AD1": [
                {
                    "name": "Main banner 1",
                    "sort": 1,
                    "img_url": "https://cdn.vivatv.com.tw/ad/main1.jpg",
                    "img_url_m": "https://cdn.vivatv.com.tw/ad/main1_m.jpg",
                    "ad_name": "main-1",
                    "ad_title": "Weekly deals"
                },
                {
                    "name": "Main banner 2",
                    "sort": 2,
                    "img_url_m": "https://cdn.vivatv.com.tw/ad/main2_m.jpg",
                    "ad_name": "main-2",
                    "ad_title": "New arrivals"
                }
            ]
        }),
        "FlagshipStoreAd" => json!({
            "CategoryCenterAD": [
                { "name": "Flagship", "flagshipstore_id": "F01", "flagshipstore_name": "Tea House" }
            ],
            "AD3": [ { "name": "Flagship AD3", "head_id4": 7 } ]
        }),
        "CategoryMidAD" => json!({
            "AD2": [ { "name": "Mid banner", "campaign_id": "C88" } ]
        }),
        "MiddleCategoryCenterAD" => json!([
            { "name": "Center 1", "category_name": "Kitchen", "head_id": 3 },
            { "name": "Center 2", "category_name": "Beauty", "head_id": 4 }
        ]),
        "CategoryAD" => json!([
            {
                "name": "Kitchen",
                "theme": "orange",
                "url": "https://www.vivatv.com.tw/category/kitchen",
                "app": { "category_id": "12", "keyword": null, "type": "category" },
                "img_url": "https://cdn.vivatv.com.tw/cat/kitchen.png",
                "ad_name": "cat-kitchen",
                "ad_title": "Kitchen"
            }
        ]),
        "SwpPortraitAD" => json!([
            {
                "name": "Portrait 1",
                "url": null,
                "app": { "category_id": null, "keyword": "tea", "type": "search" },
                "campaign_id": "C12",
                "img_url": "https://cdn.vivatv.com.tw/ad/portrait1.jpg",
                "ad_name": "portrait-1",
                "ad_title": "Tea"
            }
        ]),
        _ => return None,
    };
    Some(data)
}
