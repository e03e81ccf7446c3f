use reqwest::Method;

use super::{ApiClient, ApiResult};
use crate::models::{AdminCredentials, AdminLogin, AdminStats};

impl ApiClient {
    /// `POST /api/admin/login`
    pub async fn login_admin(&self, credentials: &AdminCredentials) -> ApiResult<AdminLogin> {
        tracing::debug!("Logging in admin {}", credentials.admin_id);
        self.send_json(Method::POST, "/api/admin/login", credentials)
            .await
    }

    /// `GET /api/admin/stats`
    pub async fn admin_stats(&self) -> ApiResult<AdminStats> {
        self.get_json("/api/admin/stats").await
    }
}
