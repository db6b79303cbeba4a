use super::*;

fn authed_router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/auth/users/me/", get(me))
        .route("/api/resource-requests/", get(list_resource_requests))
        .route("/api/resource-requests/:id/", get(get_resource_request))
        .layer(middleware::from_fn_with_state(state, require_bearer))
}

fn dev_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/dev/users", post(seed_user))
        .route("/dev/resource-requests", post(seed_resource_request))
        .route("/dev/expire-access", post(expire_access))
        .route("/dev/revoke-refresh", post(revoke_refresh))
        .route("/dev/reject-access", post(reject_access))
        .route("/dev/hits", get(hits))
}

pub(super) fn build_app_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/api/auth/login/", post(login))
        .route("/api/auth/register/", post(register))
        .route("/api/auth/token/refresh/", post(refresh))
        .merge(authed_router(state.clone()))
        .merge(dev_router())
        .layer(middleware::from_fn_with_state(state.clone(), count_hits))
        .with_state(state)
}
