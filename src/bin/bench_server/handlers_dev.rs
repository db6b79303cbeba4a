//! Test controls. Unauthenticated; this server is for development only.

use super::*;

#[derive(Debug, serde::Deserialize)]
pub(super) struct SeedUserRequest {
    email: String,
    password: String,

    #[serde(default = "default_true")]
    active: bool,

    /// Extra profile fields (names, `accessible_companies`, `company_id`, ...), reported verbatim
    /// by `/api/auth/users/me/`.
    #[serde(default)]
    profile: serde_json::Map<String, serde_json::Value>,
}

fn default_true() -> bool {
    true
}

pub(super) async fn seed_user(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SeedUserRequest>,
) -> Response {
    let mut db = state.db.write().await;
    if db.user_by_email(&body.email).is_some() {
        return field_error("email", "user with this email already exists.");
    }
    let user = db.insert_user(&body.email, &body.password, body.active, body.profile);
    (StatusCode::CREATED, Json(user.to_json())).into_response()
}

/// Stores a resource request verbatim, assigning an `id` when the body has none.
pub(super) async fn seed_resource_request(
    State(state): State<Arc<AppState>>,
    Json(body): Json<serde_json::Value>,
) -> Response {
    let Some(mut obj) = body.as_object().cloned() else {
        return field_error("non_field_errors", "Expected an object.");
    };
    let mut db = state.db.write().await;
    let id = match obj.get("id").and_then(|v| v.as_u64()) {
        Some(id) => id,
        None => {
            db.next_request_id += 1;
            while db.requests.contains_key(&db.next_request_id) {
                db.next_request_id += 1;
            }
            db.next_request_id
        }
    };
    obj.insert("id".to_string(), serde_json::json!(id));
    obj.entry("status".to_string())
        .or_insert_with(|| serde_json::json!("pending"));
    obj.entry("created_at".to_string())
        .or_insert_with(|| serde_json::json!(now_ts()));
    let record = serde_json::Value::Object(obj);
    db.requests.insert(id, record.clone());
    (StatusCode::CREATED, Json(record)).into_response()
}

/// Invalidates every issued access token.
pub(super) async fn expire_access(State(state): State<Arc<AppState>>) -> Response {
    let mut db = state.db.write().await;
    let n = db.access_tokens.len();
    db.access_tokens.clear();
    info!(expired = n, "access tokens expired");
    Json(serde_json::json!({"expired": n})).into_response()
}

pub(super) async fn revoke_refresh(State(state): State<Arc<AppState>>) -> Response {
    let mut db = state.db.write().await;
    let mut n = 0;
    for grant in db.refresh_tokens.values_mut() {
        if !grant.revoked {
            grant.revoked = true;
            n += 1;
        }
    }
    info!(revoked = n, "refresh tokens revoked");
    Json(serde_json::json!({"revoked": n})).into_response()
}

#[derive(Debug, serde::Deserialize)]
pub(super) struct RejectAccessRequest {
    enabled: bool,
}

pub(super) async fn reject_access(
    State(state): State<Arc<AppState>>,
    Json(body): Json<RejectAccessRequest>,
) -> Response {
    let mut db = state.db.write().await;
    db.reject_all_access = body.enabled;
    Json(serde_json::json!({"enabled": body.enabled})).into_response()
}

pub(super) async fn hits(State(state): State<Arc<AppState>>) -> Response {
    let db = state.db.read().await;
    Json(db.hits.clone()).into_response()
}
