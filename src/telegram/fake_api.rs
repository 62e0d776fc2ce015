//! Local stand-in for the Bot API used by tests

use axum::extract::{Path, State};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

#[derive(Default)]
pub struct FakeBotApi {
    calls: Mutex<Vec<(String, Value)>>,
    pending_updates: Mutex<Vec<Value>>,
    rejection: Mutex<Option<String>>,
}

impl FakeBotApi {
    /// Every call except `getUpdates`, in arrival order
    pub fn calls(&self) -> Vec<(String, Value)> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(method, _)| method != "getUpdates")
            .cloned()
            .collect()
    }

    /// From now on every call fails with `{"ok": false, "description": ...}`
    pub fn reject_with(&self, description: impl Into<String>) {
        *self.rejection.lock().unwrap() = Some(description.into());
    }

    pub fn get_updates_bodies(&self) -> Vec<Value> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(method, _)| method == "getUpdates")
            .map(|(_, body)| body.clone())
            .collect()
    }
}

async fn dispatch(
    State(api): State<Arc<FakeBotApi>>,
    Path((_bot, method)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> Json<Value> {
    api.calls.lock().unwrap().push((method.clone(), body));

    if let Some(description) = api.rejection.lock().unwrap().clone() {
        return Json(json!({ "ok": false, "error_code": 401, "description": description }));
    }

    let result = match method.as_str() {
        "sendMessage" => json!({ "message_id": 1 }),
        "getUpdates" => Value::Array(std::mem::take(&mut *api.pending_updates.lock().unwrap())),
        _ => json!(true),
    };

    Json(json!({ "ok": true, "result": result }))
}

/// Serve on an ephemeral port; the first `getUpdates` drains `updates`.
pub async fn spawn(updates: Vec<Value>) -> (String, Arc<FakeBotApi>) {
    let api = Arc::new(FakeBotApi {
        calls: Mutex::new(Vec::new()),
        pending_updates: Mutex::new(updates),
        rejection: Mutex::new(None),
    });

    let app = Router::new()
        .route("/:bot/:method", post(dispatch))
        .with_state(api.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), api)
}
