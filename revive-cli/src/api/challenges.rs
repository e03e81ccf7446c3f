use reqwest::Method;
use serde_json::Value;

use super::{ApiClient, ApiError, ApiResult};
use crate::models::{Challenge, ChallengeInput};

impl ApiClient {
    /// `GET /api/current-challenges`
    ///
    /// Older backends answer with a list; the first entry is the current one.
    pub async fn current_challenge(&self) -> ApiResult<Option<Challenge>> {
        let value: Value = self.get_json("/api/current-challenges").await?;

        let current = match value {
            Value::Null => return Ok(None),
            Value::Array(items) => match items.into_iter().next() {
                Some(first) => first,
                None => return Ok(None),
            },
            other => other,
        };

        serde_json::from_value(current)
            .map(Some)
            .map_err(|e| ApiError::MalformedResponse(e.to_string()))
    }

    /// `GET /api/current-challenges/all`
    pub async fn all_challenges(&self) -> ApiResult<Vec<Challenge>> {
        self.get_json("/api/current-challenges/all").await
    }

    /// `POST /api/current-challenges`
    pub async fn create_challenge(&self, challenge: &ChallengeInput) -> ApiResult<Challenge> {
        self.send_json(Method::POST, "/api/current-challenges", challenge)
            .await
    }

    /// `PUT /api/current-challenges/{id}`
    pub async fn update_challenge(&self, id: i64, challenge: &ChallengeInput) -> ApiResult<Challenge> {
        self.send_json(
            Method::PUT,
            &format!("/api/current-challenges/{}", id),
            challenge,
        )
        .await
    }

    /// `DELETE /api/current-challenges/{id}`
    pub async fn delete_challenge(&self, id: i64) -> ApiResult<()> {
        self.send_unit::<()>(
            Method::DELETE,
            &format!("/api/current-challenges/{}", id),
            None,
        )
        .await
    }

    /// `PUT /api/current-challenges/{id}/set-current`
    pub async fn set_current_challenge(&self, id: i64) -> ApiResult<Challenge> {
        let response = self
            .request(
                Method::PUT,
                &format!("/api/current-challenges/{}/set-current", id),
            )
            .send()
            .await?;

        super::read_json(response).await
    }
}
