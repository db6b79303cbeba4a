use serde::{Deserialize, Serialize};

use super::{CompanyId, CompanyRef, RequestId};

#[derive(Debug, Deserialize)]
struct ResourceRequestWire {
    id: RequestId,
    requesting_company: CompanyRef,
    resource_company: CompanyRef,

    #[serde(default)]
    status: Option<String>,

    #[serde(flatten)]
    extra: serde_json::Map<String, serde_json::Value>,
}

/// A resource request as seen by the client. Everything beyond the two parties and the status is
/// passed through untouched.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "ResourceRequestWire")]
pub struct ResourceRequest {
    pub id: RequestId,
    pub requesting_company: CompanyId,
    pub resource_company: CompanyId,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl From<ResourceRequestWire> for ResourceRequest {
    fn from(wire: ResourceRequestWire) -> Self {
        ResourceRequest {
            id: wire.id,
            requesting_company: wire.requesting_company.id(),
            resource_company: wire.resource_company.id(),
            status: wire.status,
            extra: wire.extra,
        }
    }
}

/// List endpoints answer with either a bare array or a paginated envelope.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Listing<T> {
    Page { results: Vec<T> },
    Plain(Vec<T>),
}

impl<T> Listing<T> {
    pub fn into_items(self) -> Vec<T> {
        match self {
            Listing::Page { results } => results,
            Listing::Plain(items) => items,
        }
    }
}
