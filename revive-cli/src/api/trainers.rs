use reqwest::Method;

use super::{ApiClient, ApiResult};
use crate::models::{Trainer, TrainerInput};

impl ApiClient {
    /// `GET /api/trainers`
    pub async fn list_trainers(&self) -> ApiResult<Vec<Trainer>> {
        self.get_json("/api/trainers").await
    }

    /// `POST /api/trainers`
    pub async fn create_trainer(&self, trainer: &TrainerInput) -> ApiResult<Trainer> {
        self.send_json(Method::POST, "/api/trainers", trainer).await
    }

    /// `PUT /api/trainers/{id}`
    pub async fn update_trainer(&self, id: i64, trainer: &TrainerInput) -> ApiResult<Trainer> {
        self.send_json(Method::PUT, &format!("/api/trainers/{}", id), trainer)
            .await
    }

    /// `DELETE /api/trainers/{id}`
    pub async fn delete_trainer(&self, id: i64) -> ApiResult<()> {
        self.send_unit::<()>(Method::DELETE, &format!("/api/trainers/{}", id), None)
            .await
    }
}
