use anyhow::Result;
use chrono::Utc;
use mockito::Matcher;
use serde_json::json;

use revive_cli::api::ApiClient;
use revive_cli::config::Config;
use revive_cli::pages::LoginForm;
use revive_cli::routes::Route;
use revive_cli::session::{
    IdentityKind, LoginError, Session, SessionPolicy, ADMIN_FIELDS_REQUIRED, MEMBER_LOGIN_FALLBACK,
};
use revive_cli::storage::SessionStore;

fn client_for(server: &mockito::ServerGuard) -> Result<ApiClient> {
    let mut config = Config::default();
    config.api.base_url = server.url();
    config.api.max_retries = 1;
    ApiClient::new(&config)
}

fn session() -> Result<Session> {
    Ok(Session::new(SessionStore::temporary()?, SessionPolicy::default()))
}

#[tokio::test]
async fn test_member_login_stores_identity_with_login_time() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/members/login")
        .match_body(Matcher::Json(json!({
            "email": "grace@example.com",
            "password": "Secret#123"
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "id": 4,
                "name": "Grace Kim",
                "email": "grace@example.com",
                "joinDate": "2024-01-15",
                "token": "tok-4"
            })
            .to_string(),
        )
        .create_async()
        .await;

    let api = client_for(&server)?;
    let session = session()?;
    let before = Utc::now();

    let form = LoginForm::new("  grace@example.com ", "Secret#123");
    let (member, next) = form.submit_member(&session, &api).await?;

    mock.assert_async().await;
    assert_eq!(next, Route::Membership);
    assert_eq!(member.member.name, "Grace Kim");
    assert_eq!(member.token.as_deref(), Some("tok-4"));

    let stored = session.current_member()?.expect("member should be stored");
    assert_eq!(stored.member.id, 4);
    assert!(stored.login_time.is_some_and(|t| t >= before));

    Ok(())
}

#[tokio::test]
async fn test_rejected_member_login_shows_fallback_and_stores_nothing() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/api/members/login")
        .with_status(401)
        .with_body(r#"{"error":"Bad credentials"}"#)
        .create_async()
        .await;

    let api = client_for(&server)?;
    let session = session()?;

    let result = LoginForm::new("grace@example.com", "wrong")
        .submit_member(&session, &api)
        .await;

    match result {
        Err(LoginError::Rejected(message)) => assert_eq!(message, MEMBER_LOGIN_FALLBACK),
        other => panic!("unexpected result: {:?}", other.map(|(m, _)| m.member.id)),
    }
    assert!(session.current_member()?.is_none());

    Ok(())
}

#[tokio::test]
async fn test_admin_login_requires_both_fields_before_any_request() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/admin/login")
        .expect(0)
        .create_async()
        .await;

    let api = client_for(&server)?;
    let session = session()?;

    let result = LoginForm::new("ADM-1", "   ").submit_admin(&session, &api).await;

    assert!(matches!(result, Err(LoginError::Invalid(ref m)) if m == ADMIN_FIELDS_REQUIRED));
    mock.assert_async().await;

    Ok(())
}

#[tokio::test]
async fn test_admin_login_then_logout() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/api/admin/login")
        .with_status(200)
        .with_body(r#"{"adminId":"ADM-1","token":"adm-tok","role":"ADMIN"}"#)
        .create_async()
        .await;

    let api = client_for(&server)?;
    let session = session()?;

    let (admin, next) = LoginForm::new("ADM-1", "pw").submit_admin(&session, &api).await?;
    assert_eq!(next, Route::AdminDashboard);
    assert_eq!(admin.admin.token.as_deref(), Some("adm-tok"));

    let check = session.check(IdentityKind::Admin)?;
    assert!(check.valid);

    assert_eq!(session.logout(IdentityKind::Admin)?, Route::AdminLogin);
    assert!(!session.check(IdentityKind::Admin)?.valid);

    Ok(())
}

#[tokio::test]
async fn test_admin_login_surfaces_server_message() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/api/admin/login")
        .with_status(401)
        .with_body(r#"{"error":"Admin account locked"}"#)
        .create_async()
        .await;

    let api = client_for(&server)?;
    let session = session()?;

    let result = LoginForm::new("ADM-1", "pw").submit_admin(&session, &api).await;
    assert!(matches!(result, Err(LoginError::Rejected(ref m)) if m == "Admin account locked"));
    assert!(session.current_identity()?.is_none());

    Ok(())
}
