use anyhow::Result;
use mockito::Matcher;
use serde_json::json;
use std::time::Duration;

use revive_cli::api::ApiClient;
use revive_cli::config::Config;
use revive_cli::pages::contact::{CONTACT_FAILED, CONTACT_OFFLINE, CONTACT_SENT};
use revive_cli::pages::{ContactForm, ContactPage};

fn page_for(base_url: &str) -> Result<ContactPage> {
    let mut config = Config::default();
    config.api.base_url = base_url.to_string();
    config.api.max_retries = 1;
    Ok(ContactPage::new(ApiClient::new(&config)?, Duration::from_secs(5)))
}

fn filled(phone: &str) -> ContactForm {
    ContactForm {
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        email: "ada@example.com".to_string(),
        phone: phone.to_string(),
        message: "Do you offer trial classes?".to_string(),
    }
}

#[tokio::test]
async fn test_contact_sends_exactly_one_request_with_phone() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/contact")
        .match_body(Matcher::Json(json!({
            "name": "Ada Lovelace",
            "email": "ada@example.com",
            "subject": "New Contact from Revive Fitness Website",
            "message": "Phone: 555-0100\n\nDo you offer trial classes?"
        })))
        .with_status(200)
        .with_body(r#"{"message":"Message sent successfully!"}"#)
        .expect(1)
        .create_async()
        .await;

    let mut page = page_for(&server.url())?;
    page.form = filled("555-0100");

    assert!(page.submit().await?);
    mock.assert_async().await;

    assert_eq!(page.form, ContactForm::default());
    assert_eq!(page.status().current().map(|b| b.text.clone()), Some(CONTACT_SENT.to_string()));

    Ok(())
}

#[tokio::test]
async fn test_missing_phone_uses_placeholder() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/contact")
        .match_body(Matcher::PartialJson(json!({
            "message": "Phone: Not provided\n\nDo you offer trial classes?"
        })))
        .with_status(200)
        .with_body("ok")
        .expect(1)
        .create_async()
        .await;

    let mut page = page_for(&server.url())?;
    page.form = filled("  ");

    assert!(page.submit().await?);
    mock.assert_async().await;

    Ok(())
}

#[tokio::test]
async fn test_invalid_form_sends_nothing() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/contact")
        .expect(0)
        .create_async()
        .await;

    let mut page = page_for(&server.url())?;
    page.form = ContactForm {
        message: String::new(),
        ..filled("")
    };

    assert!(page.submit().await.is_err());
    mock.assert_async().await;

    Ok(())
}

#[tokio::test]
async fn test_server_failure_keeps_the_form() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/api/contact")
        .with_status(500)
        .with_body("")
        .expect(1)
        .create_async()
        .await;

    let mut page = page_for(&server.url())?;
    page.form = filled("");

    assert!(!page.submit().await?);
    assert_eq!(page.form, filled(""));

    let banner = page.status().current().cloned().expect("error banner");
    assert!(banner.is_error());
    assert_eq!(banner.text, CONTACT_FAILED);

    Ok(())
}

#[tokio::test]
async fn test_unreachable_server_reports_connectivity() -> Result<()> {
    // Nothing listens on port 9 of localhost in the test environment
    let mut page = page_for("http://127.0.0.1:9")?;
    page.form = filled("");

    assert!(!page.submit().await?);
    assert_eq!(
        page.status().current().map(|b| b.text.clone()),
        Some(CONTACT_OFFLINE.to_string())
    );

    Ok(())
}
