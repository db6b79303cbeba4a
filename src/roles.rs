//! Decides which side of a resource request the current user is looking at.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use crate::errors::{ApiError, ResolveError};
use crate::model::{RequestId, ResourceRequest, User};
use crate::nav::{NavMode, Navigator, Perspective, Route};
use crate::remote::ApiClient;

/// Places to send a user who is not a party to the request.
pub const ACCESS_DENIED_ACTIONS: [Route; 2] = [Route::RequestList, Route::Dashboard];

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Resolution {
    Redirect {
        perspective: Perspective,
        route: Route,
    },
    AccessDenied {
        actions: [Route; 2],
    },
}

/// Owner wins when the user's companies sit on both sides of the request.
pub fn classify(request: &ResourceRequest, user: &User) -> Option<Perspective> {
    let is_owner = user.is_member_of(request.resource_company);
    let is_requester = user.is_member_of(request.requesting_company);
    match (is_owner, is_requester) {
        (true, _) => Some(Perspective::Owner),
        (false, true) => Some(Perspective::Requester),
        (false, false) => None,
    }
}

pub fn resolution_for(request: &ResourceRequest, user: &User) -> Resolution {
    match classify(request, user) {
        Some(perspective) => Resolution::Redirect {
            perspective,
            route: Route::RequestView {
                id: request.id,
                perspective,
            },
        },
        None => Resolution::AccessDenied {
            actions: ACCESS_DENIED_ACTIONS,
        },
    }
}

pub struct RoleResolver {
    client: Arc<ApiClient>,
    navigator: Arc<dyn Navigator>,
}

impl RoleResolver {
    pub fn new(client: Arc<ApiClient>) -> Self {
        let navigator = client.navigator().clone();
        Self { client, navigator }
    }

    /// Fetches the request and classifies `user` against it. A resolved perspective also issues a
    /// replacing navigation to that perspective's view of the same request.
    pub fn resolve(&self, id: RequestId, user: &User) -> Result<Resolution, ResolveError> {
        let request = self
            .client
            .get_resource_request(id)
            .map_err(|err| match err {
                ApiError::SessionInvalid { .. } => ResolveError::SessionInvalid(err),
                other => ResolveError::Fetch(other),
            })?;

        let resolution = resolution_for(&request, user);
        match &resolution {
            Resolution::Redirect { perspective, route } => {
                info!(request = %id, perspective = perspective.as_str(), "resource request resolved");
                self.navigator.navigate(*route, NavMode::Replace);
            }
            Resolution::AccessDenied { .. } => {
                debug!(
                    request = %id,
                    requesting = %request.requesting_company,
                    resource = %request.resource_company,
                    "user is not a party to the resource request"
                );
            }
        }
        Ok(resolution)
    }

    /// [`RoleResolver::resolve`] for the session's cached user.
    pub fn resolve_current(&self, id: RequestId) -> Result<Resolution, ResolveError> {
        let user = self.client.session().current_user().ok_or_else(|| {
            ResolveError::SessionInvalid(ApiError::SessionInvalid {
                status: reqwest::StatusCode::UNAUTHORIZED,
                reason: "no current user".to_string(),
            })
        })?;
        self.resolve(id, &user)
    }
}

#[cfg(test)]
#[path = "tests/roles_tests.rs"]
mod tests;
