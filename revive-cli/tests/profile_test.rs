use anyhow::Result;
use chrono::{NaiveDate, Utc};
use mockito::Matcher;
use serde_json::json;
use std::time::Duration;

use revive_cli::api::ApiClient;
use revive_cli::config::Config;
use revive_cli::models::Member;
use revive_cli::pages::auth::EMAIL_TAKEN;
use revive_cli::pages::{ProfileEditPage, SignupError, SignupForm};
use revive_cli::routes::Route;
use revive_cli::session::{Identity, MemberSession, Session, SessionPolicy};
use revive_cli::storage::SessionStore;

fn client_for(server: &mockito::ServerGuard) -> Result<ApiClient> {
    let mut config = Config::default();
    config.api.base_url = server.url();
    config.api.max_retries = 1;
    ApiClient::new(&config)
}

fn signed_in() -> Result<(Session, MemberSession)> {
    let session = Session::new(SessionStore::temporary()?, SessionPolicy::default());
    let member = MemberSession {
        member: Member {
            id: 3,
            name: "Ana Ruiz".to_string(),
            email: "ana@example.com".to_string(),
            join_date: NaiveDate::from_ymd_opt(2024, 2, 1),
            profile_photo_url: None,
        },
        token: Some("tok-3".to_string()),
        login_time: Some(Utc::now()),
    };
    session.store_identity(&Identity::Member(member.clone()))?;
    Ok((session, member))
}

#[tokio::test]
async fn test_profile_save_updates_member_then_programs() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let _catalog = server
        .mock("GET", "/api/programs")
        .with_status(200)
        .with_body(r#"[{"id": 1, "name": "HIIT"}, {"id": 2, "name": "Yoga"}]"#)
        .create_async()
        .await;
    let _enrolled = server
        .mock("GET", "/api/members/3/programs")
        .with_status(200)
        .with_body(r#"[{"id": 1, "name": "HIIT"}]"#)
        .create_async()
        .await;
    let put_member = server
        .mock("PUT", "/api/members/3")
        .match_body(Matcher::PartialJson(json!({
            "id": 3,
            "name": "Ana R.",
            "profilePhotoUrl": "https://img/ana.png"
        })))
        .with_status(200)
        .with_body(
            json!({
                "id": 3,
                "name": "Ana R.",
                "email": "ana@example.com",
                "joinDate": "2024-02-01",
                "profilePhotoUrl": "https://img/ana.png"
            })
            .to_string(),
        )
        .expect(1)
        .create_async()
        .await;
    let put_programs = server
        .mock("PUT", "/api/members/3/programs")
        .match_body(Matcher::Json(json!([1, 2])))
        .with_status(200)
        .expect(1)
        .create_async()
        .await;

    let (session, member) = signed_in()?;
    let mut page = ProfileEditPage::new(client_for(&server)?, member, Duration::from_secs(5));
    page.load().await;
    assert_eq!(page.form.program_ids(), vec![1]);

    page.form.name = "Ana R.".to_string();
    page.form.set_photo_url("https://img/ana.png");
    assert!(page.form.toggle_program(2));

    let next = page.submit(&session).await?;
    assert_eq!(next, Some(Route::Membership));
    put_member.assert_async().await;
    put_programs.assert_async().await;

    let stored = session.current_member()?.expect("member still signed in");
    assert_eq!(stored.member.name, "Ana R.");
    assert_eq!(stored.token.as_deref(), Some("tok-3"));

    Ok(())
}

#[tokio::test]
async fn test_failed_member_update_skips_program_list() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let _catalog = server
        .mock("GET", "/api/programs")
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;
    let _enrolled = server
        .mock("GET", "/api/members/3/programs")
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;
    let _put_member = server
        .mock("PUT", "/api/members/3")
        .with_status(500)
        .create_async()
        .await;
    let put_programs = server
        .mock("PUT", "/api/members/3/programs")
        .expect(0)
        .create_async()
        .await;

    let (session, member) = signed_in()?;
    let mut page = ProfileEditPage::new(client_for(&server)?, member, Duration::from_secs(5));
    page.load().await;

    page.form.name = "Changed".to_string();
    assert_eq!(page.submit(&session).await?, None);
    put_programs.assert_async().await;

    let stored = session.current_member()?.expect("member still signed in");
    assert_eq!(stored.member.name, "Ana Ruiz");
    assert!(page.status().current().is_some_and(|b| b.is_error()));

    Ok(())
}

#[tokio::test]
async fn test_signup_posts_member_and_maps_duplicate_email() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let _create = server
        .mock("POST", "/api/members")
        .match_body(Matcher::PartialJson(json!({
            "name": "Li Wei",
            "email": "li@example.com",
            "joinDate": "2024-05-06"
        })))
        .with_status(400)
        .with_body(r#"{"message":"Member with this email already exists"}"#)
        .expect(1)
        .create_async()
        .await;

    let form = SignupForm {
        name: "Li Wei".to_string(),
        email: "li@example.com".to_string(),
        password: "Strong#Pass1".to_string(),
        confirm: "Strong#Pass1".to_string(),
        ..SignupForm::default()
    };
    let today = NaiveDate::from_ymd_opt(2024, 5, 6).expect("valid date");

    let result = form.submit(&client_for(&server)?, today).await;
    assert_eq!(result.err(), Some(SignupError::Rejected(EMAIL_TAKEN.to_string())));

    Ok(())
}

#[tokio::test]
async fn test_admin_signup_is_refused_without_request() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let create = server
        .mock("POST", "/api/members")
        .expect(0)
        .create_async()
        .await;

    let form = SignupForm {
        as_admin: true,
        admin_id: "ADM-9".to_string(),
        password: "Strong#Pass1".to_string(),
        confirm: "Strong#Pass1".to_string(),
        ..SignupForm::default()
    };
    let today = NaiveDate::from_ymd_opt(2024, 5, 6).expect("valid date");

    let result = form.submit(&client_for(&server)?, today).await;
    assert_eq!(result.err(), Some(SignupError::AdminUnavailable));
    create.assert_async().await;

    Ok(())
}
