use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::CompanyId;

/// A company as it appears inside other payloads: either a bare id or an `{id, ...}` object.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum CompanyRef {
    Id(CompanyId),
    Object { id: CompanyId },
}

impl CompanyRef {
    pub fn id(&self) -> CompanyId {
        match self {
            CompanyRef::Id(id) => *id,
            CompanyRef::Object { id } => *id,
        }
    }
}

/// Wire shape of `/api/auth/users/me/`.
///
/// Different backend versions report memberships through different fields; they are folded into
/// one set by [`User::from`] and never consulted again.
#[derive(Debug, Deserialize)]
struct UserWire {
    id: serde_json::Value,

    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    first_name: Option<String>,
    #[serde(default)]
    last_name: Option<String>,
    #[serde(default)]
    role: Option<String>,

    // Untyped until `resolve_memberships` picks one.
    #[serde(default)]
    accessible_companies: Option<serde_json::Value>,
    #[serde(default)]
    managed_companies: Option<serde_json::Value>,
    #[serde(default)]
    company_id: Option<serde_json::Value>,
    #[serde(default)]
    company: Option<serde_json::Value>,
    // Already-normalized form, as written by `User`'s own serializer.
    #[serde(default)]
    company_memberships: Option<serde_json::Value>,

    #[serde(flatten)]
    extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "UserWire")]
pub struct User {
    pub id: serde_json::Value,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    pub company_memberships: BTreeSet<CompanyId>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl User {
    pub fn is_member_of(&self, company: CompanyId) -> bool {
        self.company_memberships.contains(&company)
    }

    pub fn display_name(&self) -> String {
        let full = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .filter(|s| !s.trim().is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        if !full.is_empty() {
            return full;
        }
        self.email.clone().unwrap_or_else(|| self.id.to_string())
    }
}

/// Ids named by one membership source: a list of ids/objects, or a single id/object. Entries
/// that do not name an id are skipped.
fn company_ids(source: &serde_json::Value) -> BTreeSet<CompanyId> {
    match source {
        serde_json::Value::Array(items) => items.iter().filter_map(CompanyId::from_value).collect(),
        other => CompanyId::from_value(other).into_iter().collect(),
    }
}

/// First populated source wins; sources are not merged. A source counts as populated when it
/// yields at least one id.
fn resolve_memberships(wire: &mut UserWire) -> BTreeSet<CompanyId> {
    [
        wire.accessible_companies.take(),
        wire.managed_companies.take(),
        wire.company_id.take(),
        wire.company.take(),
        wire.company_memberships.take(),
    ]
    .into_iter()
    .flatten()
    .map(|source| company_ids(&source))
    .find(|ids| !ids.is_empty())
    .unwrap_or_default()
}

impl From<UserWire> for User {
    fn from(mut wire: UserWire) -> Self {
        let company_memberships = resolve_memberships(&mut wire);
        User {
            id: wire.id,
            email: wire.email,
            first_name: wire.first_name,
            last_name: wire.last_name,
            role: wire.role,
            company_memberships,
            extra: wire.extra,
        }
    }
}

#[cfg(test)]
#[path = "../tests/model/user_tests.rs"]
mod tests;
