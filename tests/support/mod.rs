// In-process stand-in for the Airtable metadata API used by integration tests.
use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri, header::AUTHORIZATION},
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};
use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

pub const TEST_TOKEN: &str = "patTEST";

// One request as the mock server saw it.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub body: Option<Value>,
}

#[derive(Clone, Default)]
struct MockState {
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

pub struct MockAirtable {
    // Base URL including the `/v0` prefix, ready for `AirtableClient::new`.
    pub base_url: String,
    state: MockState,
}

impl MockAirtable {
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state
            .requests
            .lock()
            .expect("requests mutex poisoned")
            .clone()
    }

    pub fn last_request(&self) -> RecordedRequest {
        self.requests()
            .pop()
            .expect("mock should have received a request")
    }
}

// Start the mock on an ephemeral port inside the current test runtime.
pub async fn spawn_mock_airtable() -> MockAirtable {
    let state = MockState::default();
    let app = Router::new().fallback(handle).with_state(state.clone());

    // Bind to an ephemeral port to avoid collisions with local services.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral test port");
    let addr = listener.local_addr().expect("get local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("mock server failed");
    });

    MockAirtable {
        base_url: format!("http://{addr}/v0"),
        state,
    }
}

// An address nothing listens on, for transport failure tests.
pub async fn closed_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral test port");
    let addr = listener.local_addr().expect("get local addr");
    drop(listener);
    format!("http://{addr}/v0")
}

async fn handle(
    State(state): State<MockState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let authorization = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    let body = serde_json::from_slice::<Value>(&body).ok();

    state
        .requests
        .lock()
        .expect("requests mutex poisoned")
        .push(RecordedRequest {
            method: method.clone(),
            path: uri.path().to_string(),
            query: uri.query().map(str::to_string),
            authorization: authorization.clone(),
            body: body.clone(),
        });

    let expected = format!("Bearer {TEST_TOKEN}");
    if authorization.as_deref() != Some(expected.as_str()) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "error": {"type": "AUTHENTICATION_REQUIRED", "message": "Authentication required"}
            })),
        )
            .into_response();
    }

    let segments: Vec<&str> = uri.path().trim_matches('/').split('/').collect();
    match (&method, segments.as_slice()) {
        (&Method::GET, ["v0", "meta", "bases"]) => list_bases(uri.query()).await,
        (&Method::GET, ["v0", "meta", "bases", base_id, "tables"]) => base_schema(base_id).await,
        (&Method::POST, ["v0", "meta", "bases"]) => create_base(body),
        _ => (StatusCode::NOT_FOUND, Json(json!({"error": "NOT_FOUND"}))).into_response(),
    }
}

async fn list_bases(query: Option<&str>) -> Response {
    match query {
        Some("offset=slow") => {
            tokio::time::sleep(Duration::from_secs(2)).await;
            Json(json!({"bases": []})).into_response()
        }
        None => Json(json!({
            "bases": [
                {"id": "appLkNDICXNqxSDhG", "name": "Apartment Hunting", "permissionLevel": "create"},
                {"id": "appSW9R5uCNmRmfl6", "name": "Project Tracker", "permissionLevel": "edit"}
            ],
            "offset": "itr23sEjsdfEr3282/appSW9R5uCNmRmfl6"
        }))
        .into_response(),
        Some("offset=itr23sEjsdfEr3282%2FappSW9R5uCNmRmfl6") => Json(json!({
            "bases": [
                {"id": "appQ8v2pVtPk6dcWq", "name": "Content Calendar", "permissionLevel": "read"}
            ]
        }))
        .into_response(),
        Some(_) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({"error": {"type": "LIST_BASES_ITERATOR_INVALID", "message": "Invalid offset"}})),
        )
            .into_response(),
    }
}

async fn base_schema(base_id: &str) -> Response {
    match base_id {
        "appMissing" => (
            StatusCode::NOT_FOUND,
            Json(json!({"error": {"type": "NOT_FOUND", "message": "Could not find base"}})),
        )
            .into_response(),
        "appBroken" => Json(json!({"tables": "not-a-list"})).into_response(),
        "appSlow" => {
            tokio::time::sleep(Duration::from_secs(2)).await;
            Json(json!({"tables": []})).into_response()
        }
        _ => Json(json!({
            "tables": [{
                "id": "tbltp8DGLhqbUmjK1",
                "name": "Apartments",
                "description": "Apartments to track.",
                "primaryFieldId": "fld1VnoyuotSTyxW1",
                "fields": [
                    {"id": "fld1VnoyuotSTyxW1", "name": "Name", "type": "singleLineText"},
                    {
                        "id": "fldoaIqdn5szURHpw",
                        "name": "Visited",
                        "type": "checkbox",
                        "options": {"color": "greenBright", "icon": "check"}
                    }
                ],
                "views": [{"id": "viwQpsuEDqHFqegkp", "name": "Grid view", "type": "grid"}]
            }]
        }))
        .into_response(),
    }
}

fn create_base(body: Option<Value>) -> Response {
    let Some(body) = body else {
        return (StatusCode::BAD_REQUEST, Json(json!({"error": "INVALID_REQUEST_BODY"})))
            .into_response();
    };
    if body.get("workspaceId").and_then(Value::as_str) == Some("wspForbidden") {
        return (
            StatusCode::FORBIDDEN,
            Json(json!({"error": "INVALID_PERMISSIONS_OR_MODEL_NOT_FOUND"})),
        )
            .into_response();
    }

    // Echo the tables back with server-assigned ids.
    let tables: Vec<Value> = body
        .get("tables")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default()
        .into_iter()
        .enumerate()
        .map(|(index, mut table)| {
            table["id"] = json!(format!("tblNew{index}"));
            table
        })
        .collect();

    Json(json!({"id": "appNewBase0000001", "tables": tables})).into_response()
}
