use super::*;

pub(super) async fn list_resource_requests(State(state): State<Arc<AppState>>) -> Response {
    let db = state.db.read().await;
    let results: Vec<serde_json::Value> = db.requests.values().cloned().collect();
    Json(serde_json::json!({
        "count": results.len(),
        "next": null,
        "previous": null,
        "results": results,
    }))
    .into_response()
}

pub(super) async fn get_resource_request(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Response {
    let db = state.db.read().await;
    match db.requests.get(&id) {
        Some(r) => Json(r.clone()).into_response(),
        None => not_found(),
    }
}
