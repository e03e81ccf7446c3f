use reqwest::Method;

use super::{ApiClient, ApiResult};
use crate::models::{ContactReply, ContactRequest};

impl ApiClient {
    /// `POST /api/contact`
    pub async fn send_contact(&self, request: &ContactRequest) -> ApiResult<ContactReply> {
        self.send_json(Method::POST, "/api/contact", request).await
    }
}
