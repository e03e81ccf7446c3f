use std::collections::BTreeSet;
use std::time::Duration;

use anyhow::Result;

use super::auth::avatar_url;
use crate::api::{ApiClient, ApiResult, OrEmpty, PhotoFile};
use crate::models::{Member, Program};
use crate::routes::Route;
use crate::session::{GateState, MemberSession, Session};
use crate::sync::{Liveness, PageState, StatusSlot};

pub const PROFILE_LOAD_FAILED: &str = "Failed to load data";
pub const PROFILE_SAVED: &str = "Profile updated successfully!";
pub const PROFILE_SAVE_FAILED: &str = "Failed to update profile. Please try again.";
const AVATAR_SIZE: u32 = 200;

/// Editable profile fields and the enrollment toggles
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileForm {
    pub name: String,
    pub photo_url: String,
    pub photo_file: Option<PhotoFile>,
    pub program_ids: BTreeSet<i64>,
}

impl ProfileForm {
    pub fn from_member(member: &Member) -> Self {
        Self {
            name: member.name.clone(),
            photo_url: member.profile_photo_url.clone().unwrap_or_default(),
            photo_file: None,
            program_ids: BTreeSet::new(),
        }
    }

    /// Replace the photo with a generated avatar; drops any picked file
    pub fn generate_avatar(&mut self) {
        self.photo_url = avatar_url(&self.name, Some(AVATAR_SIZE));
        self.photo_file = None;
    }

    /// Pick a file to upload; the URL field is cleared so the two never conflict
    pub fn choose_file(&mut self, file: PhotoFile) {
        self.photo_file = Some(file);
        self.photo_url.clear();
    }

    pub fn set_photo_url(&mut self, url: impl Into<String>) {
        self.photo_url = url.into();
        self.photo_file = None;
    }

    /// Returns whether the program is now selected
    pub fn toggle_program(&mut self, program_id: i64) -> bool {
        if self.program_ids.remove(&program_id) {
            false
        } else {
            self.program_ids.insert(program_id);
            true
        }
    }

    pub fn program_ids(&self) -> Vec<i64> {
        self.program_ids.iter().copied().collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileData {
    pub programs: Vec<Program>,
}

pub struct ProfileEditPage {
    api: ApiClient,
    member: Member,
    live: Liveness,
    state: PageState<ProfileData>,
    pub form: ProfileForm,
    status: StatusSlot,
}

impl ProfileEditPage {
    pub fn new(api: ApiClient, session: MemberSession, status_ttl: Duration) -> Self {
        let form = ProfileForm::from_member(&session.member);
        Self {
            api,
            member: session.member,
            live: Liveness::new(),
            state: PageState::Idle,
            form,
            status: StatusSlot::new(status_ttl),
        }
    }

    pub fn from_gate(api: ApiClient, gate: GateState, status_ttl: Duration) -> Result<Self, Route> {
        super::member_from_gate(gate).map(|session| Self::new(api, session, status_ttl))
    }

    pub fn member(&self) -> &Member {
        &self.member
    }

    pub fn state(&self) -> &PageState<ProfileData> {
        &self.state
    }

    pub fn status(&mut self) -> &mut StatusSlot {
        &mut self.status
    }

    pub fn unmount(&self) {
        self.live.unmount();
    }

    /// Catalog plus the member's enrolled ids, which seed the toggles
    pub async fn load(&mut self) {
        self.state.begin_loading();

        let (all, enrolled) = futures::join!(
            self.api.list_programs(),
            self.api.member_programs(self.member.id)
        );

        let outcome = match (all.or_empty("programs"), enrolled.or_empty("enrolled programs")) {
            (Ok(programs), Ok(enrolled)) => Ok((programs, enrolled)),
            (Err(e), _) | (_, Err(e)) => {
                tracing::error!("Profile data failed to load: {}", e);
                Err(e.user_message(PROFILE_LOAD_FAILED))
            }
        };

        self.live.guard(|| match outcome {
            Ok((programs, enrolled)) => {
                self.form.program_ids = enrolled.iter().map(|p| p.id).collect();
                self.state.settle(Ok(ProfileData { programs }));
            }
            Err(message) => self.state.settle(Err(message)),
        });
    }

    /// Upload the photo if one was picked, then save the member, then the enrollment list.
    ///
    /// Stops at the first failed step. On success the stored session gets the returned
    /// member and the caller should move on to `/membership`.
    pub async fn submit(&mut self, session: &Session) -> Result<Option<Route>> {
        match self.save().await {
            Ok(updated) => {
                session.update_member(updated.clone())?;
                self.live.guard(|| {
                    self.member = updated;
                    self.form.photo_file = None;
                    self.status.success(PROFILE_SAVED);
                });
                Ok(Some(Route::Membership))
            }
            Err(e) => {
                tracing::warn!("Profile update failed: {}", e);
                self.live.guard(|| self.status.error(PROFILE_SAVE_FAILED));
                Ok(None)
            }
        }
    }

    async fn save(&self) -> ApiResult<Member> {
        let photo_url = match &self.form.photo_file {
            Some(file) => self.api.upload_photo(self.member.id, file.clone()).await?.photo_url,
            None => self.form.photo_url.clone(),
        };

        let mut member = self.member.clone();
        member.name = self.form.name.clone();
        member.profile_photo_url = Some(photo_url).filter(|url| !url.is_empty());

        let updated = self.api.update_member(&member).await?;
        self.api
            .replace_member_programs(self.member.id, &self.form.program_ids())
            .await?;

        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member() -> Member {
        Member {
            id: 11,
            name: "Tom Hale".to_string(),
            email: "tom@example.com".to_string(),
            join_date: None,
            profile_photo_url: Some("https://img/tom.png".to_string()),
        }
    }

    #[test]
    fn test_avatar_and_file_are_exclusive() {
        let mut form = ProfileForm::from_member(&member());
        assert_eq!(form.photo_url, "https://img/tom.png");

        form.choose_file(PhotoFile {
            file_name: "me.png".to_string(),
            bytes: vec![1, 2, 3],
        });
        assert!(form.photo_url.is_empty());

        form.generate_avatar();
        assert!(form.photo_file.is_none());
        assert_eq!(
            form.photo_url,
            "https://ui-avatars.com/api/?name=Tom+Hale&background=ffcc00&color=000&size=200"
        );
    }

    #[test]
    fn test_program_toggles() {
        let mut form = ProfileForm::default();
        assert!(form.toggle_program(3));
        assert!(form.toggle_program(1));
        assert!(!form.toggle_program(3));
        assert_eq!(form.program_ids(), vec![1]);
    }
}
