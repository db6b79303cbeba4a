use super::*;

pub(super) fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(serde_json::json!({
            "detail": "Given token not valid for any token type",
            "code": "token_not_valid",
        })),
    )
        .into_response()
}

pub(super) fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({"detail": "Not found."})),
    )
        .into_response()
}

/// `{field: [message]}` for a single field.
pub(super) fn field_error(field: &str, message: &str) -> Response {
    field_errors(BTreeMap::from([(
        field.to_string(),
        vec![message.to_string()],
    )]))
}

pub(super) fn field_errors(errors: BTreeMap<String, Vec<String>>) -> Response {
    (StatusCode::BAD_REQUEST, Json(errors)).into_response()
}

pub(super) fn internal_error(err: anyhow::Error) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({"detail": err.to_string()})),
    )
        .into_response()
}
