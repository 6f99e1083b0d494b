#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::thread;

use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use serde_json::{json, Value};

pub const APP: &str = "django_ansible_inventory";
pub const COOKIE: &str = "sessionid=s3ss; csrftoken=tok%2B1";

#[derive(Clone, Default)]
struct MockState {
    calls: Arc<Mutex<Vec<String>>>,
    tokens: Arc<Mutex<Vec<Option<String>>>>,
}

/// Stand-in for the inventory web application, served on a background thread.
///
/// Records `reserve:<id>` / `release:<id>` / `lookup:<vlan>:<selected>` in
/// arrival order. Address 7 is always refused as already taken.
pub struct MockInventory {
    addr: SocketAddr,
    state: MockState,
}

impl MockInventory {
    pub fn start() -> Self {
        let state = MockState::default();
        let app = Router::new()
            .route("/inventory/get-available-ips/", get(available_ips))
            .route(&format!("/admin/{APP}/host/reserve-ip/"), post(reserve_ip))
            .route(&format!("/admin/{APP}/host/release-ip/"), post(release_ip))
            .with_state(state.clone());

        let (tx, rx) = std::sync::mpsc::channel();
        thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("mock runtime");
            runtime.block_on(async move {
                let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                    .await
                    .expect("bind mock inventory");
                tx.send(listener.local_addr().expect("local addr"))
                    .expect("send addr");
                axum::serve(listener, app).await.expect("serve mock inventory");
            });
        });
        let addr = rx.recv().expect("mock inventory address");

        Self { addr, state }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.calls.lock().expect("calls").clone()
    }

    pub fn csrf_tokens(&self) -> Vec<Option<String>> {
        self.state.tokens.lock().expect("tokens").clone()
    }
}

async fn available_ips(
    State(state): State<MockState>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    let vlan = params.get("vlan").cloned().unwrap_or_default();
    let selected = params.get("selected_ip").cloned();
    state.calls.lock().expect("calls").push(format!(
        "lookup:{vlan}:{}",
        selected.clone().unwrap_or_default()
    ));

    let mut ips = match vlan.as_str() {
        "10" => vec![
            json!({"id": 1, "ip_address": "10.0.0.1"}),
            json!({"id": 2, "ip_address": "10.0.0.2"}),
            json!({"id": 5, "ip_address": "10.0.0.5"}),
            json!({"id": 7, "ip_address": "10.0.0.7"}),
        ],
        "20" => vec![json!({"id": 21, "ip_address": "10.0.1.21"})],
        _ => Vec::new(),
    };
    // Like the real view: an already-assigned selected address is appended.
    if let Some(id) = selected.filter(|id| id == "9") {
        ips.push(json!({"id": id.parse::<u64>().expect("numeric"), "ip_address": "10.0.0.9"}));
    }
    Json(json!({ "available_ips": ips }))
}

async fn reserve_ip(
    State(state): State<MockState>,
    headers: HeaderMap,
    Form(form): Form<HashMap<String, String>>,
) -> Json<Value> {
    let ip = record(&state, "reserve", &headers, &form);
    if ip == "7" {
        Json(json!({"success": false, "message": "Already taken"}))
    } else {
        Json(json!({"success": true}))
    }
}

async fn release_ip(
    State(state): State<MockState>,
    headers: HeaderMap,
    Form(form): Form<HashMap<String, String>>,
) -> Json<Value> {
    record(&state, "release", &headers, &form);
    Json(json!({"success": true}))
}

fn record(
    state: &MockState,
    action: &str,
    headers: &HeaderMap,
    form: &HashMap<String, String>,
) -> String {
    let ip = form.get("ip_id").cloned().unwrap_or_default();
    let token = headers
        .get("x-csrftoken")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    state
        .calls
        .lock()
        .expect("calls")
        .push(format!("{action}:{ip}"));
    state.tokens.lock().expect("tokens").push(token);
    ip
}
