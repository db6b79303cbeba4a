//! Navigation targets and the seam through which session and resolver code issues redirects.

use std::sync::Mutex;

use serde::Serialize;

use crate::model::RequestId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Perspective {
    Requester,
    Owner,
}

impl Perspective {
    pub fn as_str(&self) -> &'static str {
        match self {
            Perspective::Requester => "requester",
            Perspective::Owner => "owner",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "route", rename_all = "snake_case")]
pub enum Route {
    /// Unauthenticated landing page.
    Landing,
    Login,
    /// Authenticated landing page.
    Dashboard,
    RequestList,
    RequestView {
        id: RequestId,
        perspective: Perspective,
    },
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Landing => "/".to_string(),
            Route::Login => "/login".to_string(),
            Route::Dashboard => "/dashboard".to_string(),
            Route::RequestList => "/resource-requests".to_string(),
            Route::RequestView { id, perspective } => {
                format!("/resource-requests/{}/{}", id, perspective.as_str())
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NavMode {
    /// New history entry.
    Push,
    /// Replace the current history entry.
    Replace,
    /// Full reload; drops in-memory view state.
    Hard,
}

pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route, mode: NavMode);
}

/// Keeps every navigation in order. Used when nothing renders the routes (tests, embedding).
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    history: Mutex<Vec<(Route, NavMode)>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn history(&self) -> Vec<(Route, NavMode)> {
        self.history
            .lock()
            .map(|h| h.clone())
            .unwrap_or_default()
    }

    pub fn last(&self) -> Option<(Route, NavMode)> {
        self.history().last().copied()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: Route, mode: NavMode) {
        if let Ok(mut h) = self.history.lock() {
            h.push((route, mode));
        }
    }
}

#[cfg(test)]
#[path = "tests/nav_tests.rs"]
mod tests;
