use std::time::Duration;

use super::ValidationError;
use crate::api::{ApiClient, ApiError, OrEmpty};
use crate::models::ContactRequest;
use crate::sync::StatusSlot;

pub const CONTACT_SUBJECT: &str = "New Contact from Revive Fitness Website";
pub const PHONE_FALLBACK: &str = "Not provided";
pub const CONTACT_SENT: &str = "Thank you for contacting us! We'll get back to you soon.";
pub const CONTACT_FAILED: &str = "Failed to send message. Please try again.";
pub const CONTACT_OFFLINE: &str = "Failed to connect to the server. Please check your network.";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}

impl ContactForm {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let required = [
            ("First name", &self.first_name),
            ("Last name", &self.last_name),
            ("Email", &self.email),
            ("Message", &self.message),
        ];

        match required.iter().find(|(_, value)| value.trim().is_empty()) {
            Some((field, _)) => Err(ValidationError::Required(*field)),
            None => Ok(()),
        }
    }

    pub fn to_request(&self) -> ContactRequest {
        let phone = match self.phone.trim() {
            "" => PHONE_FALLBACK,
            phone => phone,
        };

        ContactRequest {
            name: format!("{} {}", self.first_name, self.last_name),
            email: self.email.clone(),
            subject: CONTACT_SUBJECT.to_string(),
            message: format!("Phone: {}\n\n{}", phone, self.message),
        }
    }
}

/// Contact page: one form, one status line that clears itself
pub struct ContactPage {
    api: ApiClient,
    pub form: ContactForm,
    status: StatusSlot,
}

impl ContactPage {
    pub fn new(api: ApiClient, status_ttl: Duration) -> Self {
        Self {
            api,
            form: ContactForm::default(),
            status: StatusSlot::new(status_ttl),
        }
    }

    pub fn status(&mut self) -> &mut StatusSlot {
        &mut self.status
    }

    /// Send the form as exactly one request.
    ///
    /// Validation failures return early and send nothing. Delivery failures end up in
    /// the status line; the form is cleared only on success.
    pub async fn submit(&mut self) -> Result<bool, ValidationError> {
        self.form.validate()?;

        let request = self.form.to_request();
        match self.api.send_contact(&request).await.or_empty("contact reply") {
            Ok(reply) => {
                tracing::info!(
                    "Contact message accepted: {}",
                    reply.message.as_deref().unwrap_or("ok")
                );
                self.status.success(CONTACT_SENT);
                self.form = ContactForm::default();
                Ok(true)
            }
            Err(ApiError::Network(reason)) => {
                tracing::warn!("Contact submission failed: {}", reason);
                self.status.error(CONTACT_OFFLINE);
                Ok(false)
            }
            Err(e) => {
                self.status.error(e.user_message(CONTACT_FAILED));
                Ok(false)
            }
        }
    }
}
