use anyhow::Result;
use chrono::Utc;
use serde_json::json;
use std::time::Duration;

use revive_cli::api::ApiClient;
use revive_cli::config::Config;
use revive_cli::models::{AdminLogin, ProgramInput};
use revive_cli::pages::admin::ADMIN_LOAD_FAILED;
use revive_cli::pages::AdminDashboardPage;
use revive_cli::session::AdminSession;

fn page_for(server: &mockito::ServerGuard) -> Result<AdminDashboardPage> {
    let mut config = Config::default();
    config.api.base_url = server.url();
    config.api.max_retries = 1;

    let admin = AdminSession {
        admin: AdminLogin {
            admin_id: "ADM-1".to_string(),
            token: Some("adm-tok".to_string()),
            name: None,
            email: None,
            role: None,
        },
        login_time: Utc::now(),
    };
    let api = ApiClient::new(&config)?.with_token(admin.admin.token.clone());
    Ok(AdminDashboardPage::new(api, admin, Duration::from_secs(3)))
}

async fn get(server: &mut mockito::ServerGuard, path: &str, body: serde_json::Value) -> mockito::Mock {
    server
        .mock("GET", path)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .create_async()
        .await
}

/// Admin lists without the counters endpoint, which the backend does not serve
async fn mock_lists(server: &mut mockito::ServerGuard) -> Vec<mockito::Mock> {
    vec![
        get(
            server,
            "/api/members",
            json!([
                {"id": 1, "name": "Grace Kim", "email": "grace@example.com"},
                {"id": 2, "name": "Omar Diaz", "email": "omar@revive.fit"}
            ]),
        )
        .await,
        get(server, "/api/programs", json!([{"id": 5, "name": "HIIT"}])).await,
        get(server, "/api/trainers", json!([{"id": 9, "name": "Sam", "achievements": null}])).await,
        get(
            server,
            "/api/current-challenges/all",
            json!([
                {"id": 1, "title": "Plank Month"},
                {"id": 2, "title": "Spring 10K"},
                {"id": 3, "title": "Step Up"}
            ]),
        )
        .await,
        get(server, "/api/current-challenges", json!({"id": 2, "title": "Spring 10K"})).await,
    ]
}

#[tokio::test]
async fn test_load_counts_locally_without_stats_endpoint() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let _lists = mock_lists(&mut server).await;
    let _stats = server
        .mock("GET", "/api/admin/stats")
        .with_status(404)
        .create_async()
        .await;

    let mut page = page_for(&server)?;
    page.load().await;

    let data = page.state().ready().expect("admin data should load");
    assert_eq!(data.stats.total_members, 2);
    assert_eq!(data.stats.total_programs, 1);
    assert_eq!(data.stats.total_trainers, 1);
    assert_eq!(data.stats.total_challenges, 3);
    assert_eq!(data.challenges.current().map(|c| c.id), Some(2));

    page.set_search("grace");
    assert_eq!(page.visible_members().len(), 1);

    Ok(())
}

#[tokio::test]
async fn test_failed_list_fails_the_dashboard() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let _members = server
        .mock("GET", "/api/members")
        .with_status(500)
        .create_async()
        .await;

    let mut page = page_for(&server)?;
    page.load().await;

    assert_eq!(page.state().error(), Some(ADMIN_LOAD_FAILED));

    Ok(())
}

#[tokio::test]
async fn test_deleting_current_challenge_promotes_the_next_one() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let _lists = mock_lists(&mut server).await;
    let delete = server
        .mock("DELETE", "/api/current-challenges/2")
        .with_status(204)
        .expect(1)
        .create_async()
        .await;

    let mut page = page_for(&server)?;
    page.load().await;

    assert!(page.delete_challenge(2).await);
    delete.assert_async().await;

    let data = page.state().ready().expect("admin data should stay loaded");
    let ids: Vec<i64> = data.challenges.all().iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![1, 3]);
    assert_eq!(data.challenges.current().map(|c| c.id), Some(3));
    assert_eq!(data.stats.total_challenges, 2);

    let banner = page.status().current().cloned().expect("success banner");
    assert!(!banner.is_error());

    Ok(())
}

#[tokio::test]
async fn test_created_program_lands_in_the_list() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let _lists = mock_lists(&mut server).await;
    let _create = server
        .mock("POST", "/api/programs")
        .match_header("authorization", "Bearer adm-tok")
        .with_status(201)
        .with_body(r#"{"id": 6, "name": "Yoga", "duration": "8 weeks"}"#)
        .create_async()
        .await;

    let mut page = page_for(&server)?;
    page.load().await;

    let input = ProgramInput {
        name: "Yoga".to_string(),
        duration: Some("8 weeks".to_string()),
        ..ProgramInput::default()
    };
    assert!(page.create_program(&input).await);

    let data = page.state().ready().expect("admin data should stay loaded");
    assert!(data.programs.contains(6));
    assert_eq!(data.stats.total_programs, 2);

    Ok(())
}

#[tokio::test]
async fn test_rejected_update_surfaces_server_message() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let _lists = mock_lists(&mut server).await;
    let _update = server
        .mock("PUT", "/api/trainers/9")
        .with_status(400)
        .with_body(r#"{"message":"Trainer name must be unique"}"#)
        .create_async()
        .await;

    let mut page = page_for(&server)?;
    page.load().await;
    let before = page.state().clone();

    let input = revive_cli::models::TrainerInput {
        name: "Sam".to_string(),
        ..Default::default()
    };
    assert!(!page.update_trainer(9, &input).await);
    assert_eq!(page.state(), &before);
    assert_eq!(
        page.status().current().map(|b| b.text.clone()),
        Some("Trainer name must be unique".to_string())
    );

    Ok(())
}
