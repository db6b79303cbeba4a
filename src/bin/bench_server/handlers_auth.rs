use super::*;

const MIN_PASSWORD_LEN: usize = 8;

fn required_str<'a>(
    body: &'a serde_json::Value,
    field: &str,
    errors: &mut BTreeMap<String, Vec<String>>,
) -> Option<&'a str> {
    match body.get(field).and_then(|v| v.as_str()).map(str::trim) {
        Some(s) if !s.is_empty() => Some(s),
        _ => {
            errors
                .entry(field.to_string())
                .or_default()
                .push("This field is required.".to_string());
            None
        }
    }
}

pub(super) async fn login(
    State(state): State<Arc<AppState>>,
    Json(body): Json<serde_json::Value>,
) -> Response {
    let mut errors = BTreeMap::new();
    let email = required_str(&body, "email", &mut errors);
    let password = required_str(&body, "password", &mut errors);
    let (Some(email), Some(password)) = (email, password) else {
        return field_errors(errors);
    };

    let mut db = state.db.write().await;
    let Some(user) = db.user_by_email(email).cloned() else {
        return field_error(
            "non_field_errors",
            "Unable to log in with provided credentials.",
        );
    };
    if user.password_hash != hash_secret(password) {
        return field_error(
            "non_field_errors",
            "Unable to log in with provided credentials.",
        );
    }
    if !user.active {
        return (
            StatusCode::FORBIDDEN,
            Json(serde_json::json!({"detail": "Account is not activated."})),
        )
            .into_response();
    }

    match issue_pair(&mut db, user.id) {
        Ok((access, refresh)) => {
            debug!(user_id = user.id, "issued token pair");
            Json(serde_json::json!({"access": access, "refresh": refresh})).into_response()
        }
        Err(err) => internal_error(err),
    }
}

pub(super) async fn register(
    State(state): State<Arc<AppState>>,
    Json(body): Json<serde_json::Value>,
) -> Response {
    let mut errors = BTreeMap::new();
    let email = required_str(&body, "email", &mut errors);
    let password = required_str(&body, "password", &mut errors);
    if let Some(email) = email
        && !email.contains('@')
    {
        errors
            .entry("email".to_string())
            .or_default()
            .push("Enter a valid email address.".to_string());
    }
    if let Some(password) = password
        && password.chars().count() < MIN_PASSWORD_LEN
    {
        errors.entry("password".to_string()).or_default().push(format!(
            "This password is too short. It must contain at least {} characters.",
            MIN_PASSWORD_LEN
        ));
    }

    let mut db = state.db.write().await;
    if let Some(email) = email
        && db.user_by_email(email).is_some()
    {
        errors
            .entry("email".to_string())
            .or_default()
            .push("user with this email already exists.".to_string());
    }
    let (Some(email), Some(password)) = (email, password) else {
        return field_errors(errors);
    };
    if !errors.is_empty() {
        return field_errors(errors);
    }

    let mut profile = body.as_object().cloned().unwrap_or_default();
    for key in ["email", "password", "id"] {
        profile.remove(key);
    }
    let user = db.insert_user(email, password, !state.require_activation, profile);
    info!(user_id = user.id, "account registered");
    (StatusCode::CREATED, Json(user.to_json())).into_response()
}

pub(super) async fn refresh(
    State(state): State<Arc<AppState>>,
    Json(body): Json<serde_json::Value>,
) -> Response {
    let mut errors = BTreeMap::new();
    let Some(refresh) = required_str(&body, "refresh", &mut errors) else {
        return field_errors(errors);
    };

    let mut db = state.db.write().await;
    let grant = db.refresh_tokens.get(&hash_secret(refresh)).cloned();
    let Some(grant) = grant.filter(|g| !g.revoked) else {
        return (
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({
                "detail": "Token is invalid or expired",
                "code": "token_not_valid",
            })),
        )
            .into_response();
    };

    match issue_access(&mut db, grant.user_id) {
        Ok(access) => Json(serde_json::json!({"access": access})).into_response(),
        Err(err) => internal_error(err),
    }
}

pub(super) async fn me(
    State(state): State<Arc<AppState>>,
    Extension(subject): Extension<Subject>,
) -> Response {
    let db = state.db.read().await;
    match db.users.get(&subject.user_id) {
        Some(user) => Json(user.to_json()).into_response(),
        None => unauthorized(),
    }
}
