use super::{ApiClient, ApiResult};
use crate::models::AttendanceRecord;

impl ApiClient {
    /// `GET /api/attendance/member/{id}`
    pub async fn member_attendance(&self, member_id: i64) -> ApiResult<Vec<AttendanceRecord>> {
        self.get_json(&format!("/api/attendance/member/{}", member_id))
            .await
    }
}
