use reqwest::multipart::{Form, Part};
use reqwest::Method;

use super::{read_json, ApiClient, ApiResult};
use crate::models::{Challenge, Member, MemberCredentials, MemberLogin, NewMember, PhotoUpload, Program};

/// A profile photo picked from disk
#[derive(Debug, Clone, PartialEq)]
pub struct PhotoFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl PhotoFile {
    pub fn mime_type(&self) -> &'static str {
        let ext = self
            .file_name
            .rsplit('.')
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();

        match ext.as_str() {
            "png" => "image/png",
            "jpg" | "jpeg" => "image/jpeg",
            "gif" => "image/gif",
            "webp" => "image/webp",
            _ => "application/octet-stream",
        }
    }
}

impl ApiClient {
    /// `POST /api/members`
    pub async fn create_member(&self, member: &NewMember) -> ApiResult<Member> {
        self.send_json(Method::POST, "/api/members", member).await
    }

    /// `POST /api/members/login`
    pub async fn login_member(&self, credentials: &MemberCredentials) -> ApiResult<MemberLogin> {
        tracing::debug!("Logging in member {}", credentials.email);
        self.send_json(Method::POST, "/api/members/login", credentials)
            .await
    }

    /// `GET /api/members`
    pub async fn list_members(&self) -> ApiResult<Vec<Member>> {
        self.get_json("/api/members").await
    }

    /// `GET /api/members/{id}`
    pub async fn get_member(&self, id: i64) -> ApiResult<Member> {
        self.get_json(&format!("/api/members/{}", id)).await
    }

    /// `PUT /api/members/{id}`
    pub async fn update_member(&self, member: &Member) -> ApiResult<Member> {
        self.send_json(Method::PUT, &format!("/api/members/{}", member.id), member)
            .await
    }

    /// `GET /api/members/{id}/programs`
    pub async fn member_programs(&self, member_id: i64) -> ApiResult<Vec<Program>> {
        self.get_json(&format!("/api/members/{}/programs", member_id))
            .await
    }

    /// `PUT /api/members/{id}/programs` with the full list of enrolled program ids
    pub async fn replace_member_programs(&self, member_id: i64, program_ids: &[i64]) -> ApiResult<()> {
        self.send_unit(
            Method::PUT,
            &format!("/api/members/{}/programs", member_id),
            Some(program_ids),
        )
        .await
    }

    /// `POST /api/members/{id}/programs/{programId}`
    pub async fn join_program(&self, member_id: i64, program_id: i64) -> ApiResult<()> {
        self.send_unit::<()>(
            Method::POST,
            &format!("/api/members/{}/programs/{}", member_id, program_id),
            None,
        )
        .await
    }

    /// `DELETE /api/members/{id}/programs/{programId}`
    pub async fn leave_program(&self, member_id: i64, program_id: i64) -> ApiResult<()> {
        self.send_unit::<()>(
            Method::DELETE,
            &format!("/api/members/{}/programs/{}", member_id, program_id),
            None,
        )
        .await
    }

    /// `GET /api/members/{id}/challenges`
    pub async fn member_challenges(&self, member_id: i64) -> ApiResult<Vec<Challenge>> {
        self.get_json(&format!("/api/members/{}/challenges", member_id))
            .await
    }

    /// `POST /api/members/{id}/challenges/{challengeId}`
    pub async fn join_challenge(&self, member_id: i64, challenge_id: i64) -> ApiResult<()> {
        self.send_unit::<()>(
            Method::POST,
            &format!("/api/members/{}/challenges/{}", member_id, challenge_id),
            None,
        )
        .await
    }

    /// `DELETE /api/members/{id}/challenges/{challengeId}`
    pub async fn leave_challenge(&self, member_id: i64, challenge_id: i64) -> ApiResult<()> {
        self.send_unit::<()>(
            Method::DELETE,
            &format!("/api/members/{}/challenges/{}", member_id, challenge_id),
            None,
        )
        .await
    }

    /// `POST /api/members/{id}/upload-photo` as multipart, field `file`
    pub async fn upload_photo(&self, member_id: i64, photo: PhotoFile) -> ApiResult<PhotoUpload> {
        let mime = photo.mime_type();
        let part = Part::bytes(photo.bytes)
            .file_name(photo.file_name)
            .mime_str(mime)?;
        let form = Form::new().part("file", part);

        let response = self
            .request(Method::POST, &format!("/api/members/{}/upload-photo", member_id))
            .multipart(form)
            .send()
            .await?;

        read_json(response).await
    }
}
