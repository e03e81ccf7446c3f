use reqwest::Method;

use super::{ApiClient, ApiResult};
use crate::models::{Program, ProgramInput};

impl ApiClient {
    /// `GET /api/programs`
    pub async fn list_programs(&self) -> ApiResult<Vec<Program>> {
        self.get_json("/api/programs").await
    }

    /// `POST /api/programs`
    pub async fn create_program(&self, program: &ProgramInput) -> ApiResult<Program> {
        self.send_json(Method::POST, "/api/programs", program).await
    }

    /// `PUT /api/programs/{id}`
    pub async fn update_program(&self, id: i64, program: &ProgramInput) -> ApiResult<Program> {
        self.send_json(Method::PUT, &format!("/api/programs/{}", id), program)
            .await
    }

    /// `DELETE /api/programs/{id}`
    pub async fn delete_program(&self, id: i64) -> ApiResult<()> {
        self.send_unit::<()>(Method::DELETE, &format!("/api/programs/{}", id), None)
            .await
    }
}
