//! In-process fake of the operations service

#![allow(dead_code)]

use anyhow::Result;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use opload_core::{SharedGateway, SharedSink};
use opload_http::{ClientConfig, InstrumentedGateway, OperationsClient};
use opload_runtime::{RunSettings, WaitTime};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, Once};
use std::time::Duration;
use tokio::net::TcpListener;

static INIT: Once = Once::new();

pub fn init_test_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_target(false)
            .without_time()
            .try_init();
    });
}

#[derive(Default)]
struct BankState {
    operations: BTreeMap<i64, Value>,
    next_id: i64,
    fail_creates_after: Option<usize>,
    list_calls: usize,
    get_calls: Vec<i64>,
}

/// Handle on a running fake bank
#[derive(Clone, Default)]
pub struct FakeBank {
    state: Arc<Mutex<BankState>>,
}

impl FakeBank {
    /// Answer creates with 500 once `count` operations exist
    pub fn failing_creates_after(count: usize) -> Self {
        let bank = Self::default();
        bank.state.lock().unwrap().fail_creates_after = Some(count);
        bank
    }

    pub fn created_ids(&self) -> Vec<i64> {
        self.state.lock().unwrap().operations.keys().copied().collect()
    }

    pub fn get_calls(&self) -> Vec<i64> {
        self.state.lock().unwrap().get_calls.clone()
    }

    pub fn list_calls(&self) -> usize {
        self.state.lock().unwrap().list_calls
    }

    /// Serve on an ephemeral local port and return the base URL
    pub async fn start(&self) -> Result<String> {
        let app = Router::new()
            .route("/api/v1/operations", get(list_operations).post(create_operation))
            .route("/api/v1/operations/{operation_id}", get(get_operation))
            .with_state(self.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr: SocketAddr = listener.local_addr()?;

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Ok(format!("http://{}", addr))
    }
}

async fn create_operation(
    State(bank): State<FakeBank>,
    Json(request): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let mut state = bank.state.lock().unwrap();
    if state
        .fail_creates_after
        .is_some_and(|limit| state.operations.len() >= limit)
    {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "message": "ledger unavailable" })),
        );
    }

    state.next_id += 1;
    let id = state.next_id;
    let mut operation = request;
    operation["id"] = json!(id);
    state.operations.insert(id, operation.clone());
    (StatusCode::CREATED, Json(operation))
}

async fn list_operations(State(bank): State<FakeBank>) -> Json<Value> {
    let mut state = bank.state.lock().unwrap();
    state.list_calls += 1;
    Json(Value::Array(state.operations.values().cloned().collect()))
}

async fn get_operation(
    State(bank): State<FakeBank>,
    Path(operation_id): Path<i64>,
) -> Result<Json<Value>, StatusCode> {
    let mut state = bank.state.lock().unwrap();
    state.get_calls.push(operation_id);
    state
        .operations
        .get(&operation_id)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

/// Plain client for seeding
pub fn client(base_url: &str) -> SharedGateway {
    let config = ClientConfig::new(base_url).with_timeout(Duration::from_secs(5));
    Arc::new(OperationsClient::new(config).unwrap())
}

/// Client reporting every call to `sink`
pub fn instrumented(client: SharedGateway, sink: SharedSink) -> SharedGateway {
    Arc::new(InstrumentedGateway::new(client, sink))
}

/// Fast settings: no think-time and a per-user task cap
pub fn capped_settings(users: usize, iterations: u64) -> RunSettings {
    RunSettings {
        users,
        spawn_rate: 50.0,
        run_time: Some(Duration::from_secs(30)),
        iterations: Some(iterations),
        wait_time: WaitTime::none(),
        report_interval: Duration::from_secs(60),
        rng_seed: Some(7),
    }
}
