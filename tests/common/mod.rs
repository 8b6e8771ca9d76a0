// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::NaiveDate;
use serde_json::{json, Value};
use snow_report::config::Config;
use snow_report::db::MemorySnapshotStore;
use snow_report::routes::create_router;
use snow_report::services::ResortCatalog;
use snow_report::time_utils::{Clock, FixedClock};
use snow_report::AppState;
use std::sync::Arc;
use tower::ServiceExt;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Small reference catalog used by the weather route tests.
#[allow(dead_code)]
pub const TEST_CATALOG: &str = r#"[
    {"name": "Vail", "countries": "United States", "regions": "Colorado", "lat": 39.6061, "lng": -106.355},
    {"name": "Aspen Snowmass", "countries": "United States", "regions": "Colorado", "lat": 39.2084, "lng": -106.9490},
    {"name": "Whistler Blackcomb", "countries": "Canada", "regions": "British Columbia", "lat": 50.1163, "lng": -122.9574},
    {"name": "Mystery Hill", "countries": "United States", "regions": "Colorado"}
]"#;

/// A test app wired to a wiremock upstream and a simulated clock.
#[allow(dead_code)]
pub struct TestApp {
    pub router: axum::Router,
    pub state: Arc<AppState>,
    pub clock: Arc<FixedClock>,
    pub store: MemorySnapshotStore,
    pub server: MockServer,
}

#[allow(dead_code)]
pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Create a test app whose clock starts at `today`.
#[allow(dead_code)]
pub async fn create_test_app(today: NaiveDate) -> TestApp {
    let server = MockServer::start().await;

    let mut config = Config::test_default();
    config.snow_api_base_url = server.uri();
    config.weather_archive_url = format!("{}/v1/archive", server.uri());

    let clock = Arc::new(FixedClock::at_day(today));
    let dyn_clock: Arc<dyn Clock> = clock.clone();
    let store = MemorySnapshotStore::new(dyn_clock.clone());
    let catalog = ResortCatalog::load_from_json(TEST_CATALOG).unwrap();

    let state = Arc::new(AppState::new(
        config,
        Arc::new(store.clone()),
        dyn_clock,
        catalog,
    ));

    TestApp {
        router: create_router(state.clone()),
        state,
        clock,
        store,
        server,
    }
}

/// Colorado conditions as the snow API reports them.
#[allow(dead_code)]
pub fn colorado_payload() -> Value {
    json!([
        {"id": "vail", "resort": "Vail", "state": "Colorado",
         "open_lifts": "31/31", "open_trails": "195/195", "base_depth": "40\"", "snowfall24h": "6\""},
        {"id": "aspen", "resort": "Aspen Snowmass", "state": "Colorado",
         "open_lifts": "20/40", "open_trails": "50/100", "snowfall24h": "0"},
        {"id": "loveland", "resort": "Loveland", "state": "Colorado",
         "open_lifts": "n/a", "open_trails": "n/a"}
    ])
}

/// Mount `get_snow_by_state` for `state`, expecting exactly `calls` requests.
#[allow(dead_code)]
pub async fn mount_snow(server: &MockServer, state: &str, body: Value, calls: u64) {
    Mock::given(method("GET"))
        .and(path("/get_snow_by_state"))
        .and(query_param("state", state))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(calls)
        .mount(server)
        .await;
}

/// GET `uri` and decode the JSON body (`Value::Null` for non-JSON bodies).
#[allow(dead_code)]
pub async fn get_json(router: &axum::Router, uri: &str) -> (StatusCode, Value) {
    let response = router
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}
