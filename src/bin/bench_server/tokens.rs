use super::*;

pub(super) fn hash_secret(secret: &str) -> String {
    blake3::hash(secret.as_bytes()).to_hex().to_string()
}

pub(super) fn new_token() -> Result<String> {
    let mut bytes = [0u8; 32];
    getrandom::getrandom(&mut bytes).map_err(|e| anyhow::anyhow!("getrandom: {:?}", e))?;
    let mut out = String::with_capacity(64);
    for b in &bytes {
        out.push_str(&format!("{:02x}", b));
    }
    Ok(out)
}

/// Issues a fresh access/refresh pair for `user_id`.
pub(super) fn issue_pair(db: &mut Db, user_id: u64) -> Result<(String, String)> {
    let access = issue_access(db, user_id)?;
    let refresh = new_token()?;
    db.refresh_tokens.insert(
        hash_secret(&refresh),
        RefreshGrant {
            user_id,
            revoked: false,
        },
    );
    Ok((access, refresh))
}

pub(super) fn issue_access(db: &mut Db, user_id: u64) -> Result<String> {
    let access = new_token()?;
    db.access_tokens.insert(hash_secret(&access), user_id);
    Ok(access)
}

pub(super) async fn require_bearer(
    State(state): State<Arc<AppState>>,
    mut req: axum::extract::Request,
    next: Next,
) -> Response {
    let Some(value) = req.headers().get(header::AUTHORIZATION) else {
        return unauthorized();
    };
    let Ok(value) = value.to_str() else {
        return unauthorized();
    };
    let Some(token) = value.strip_prefix("Bearer ") else {
        return unauthorized();
    };

    let user_id = {
        let db = state.db.read().await;
        if db.reject_all_access {
            return unauthorized();
        }
        let Some(user_id) = db.access_tokens.get(&hash_secret(token)).copied() else {
            return unauthorized();
        };
        if !db.users.contains_key(&user_id) {
            return unauthorized();
        }
        user_id
    };

    req.extensions_mut().insert(Subject { user_id });
    next.run(req).await
}

/// Counts every request by path, authenticated or not.
pub(super) async fn count_hits(
    State(state): State<Arc<AppState>>,
    req: axum::extract::Request,
    next: Next,
) -> Response {
    let path = req.uri().path().to_string();
    {
        let mut db = state.db.write().await;
        *db.hits.entry(path).or_insert(0) += 1;
    }
    next.run(req).await
}
