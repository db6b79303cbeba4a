use crate::model::{Listing, RequestId, ResourceRequest};

use super::*;

impl ApiClient {
    pub fn get_resource_request(&self, id: RequestId) -> Result<ResourceRequest, ApiError> {
        let label = "get resource request";
        let resp = self.send_authorized(label, |c| {
            c.get(self.url(&format!("/api/resource-requests/{}/", id)))
        })?;
        let resp = self.ensure_ok(resp, label)?;
        self.decode(resp, label)
    }

    pub fn list_resource_requests(&self) -> Result<Vec<ResourceRequest>, ApiError> {
        let label = "list resource requests";
        let resp = self.send_authorized(label, |c| c.get(self.url("/api/resource-requests/")))?;
        let resp = self.ensure_ok(resp, label)?;
        let listing: Listing<ResourceRequest> = self.decode(resp, label)?;
        Ok(listing.into_items())
    }
}
