use std::{
    sync::mpsc::{self, Receiver, TryRecvError},
    thread,
    time::Duration,
};

use reqwest::blocking::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{config::ContactConfig, error::ContactError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    pub message: String,
}

impl ContactRequest {
    pub fn new(name: &str, email: &str, subject: &str, message: &str) -> Self {
        let subject = subject.trim();
        Self {
            name: name.to_string(),
            email: email.to_string(),
            subject: (!subject.is_empty()).then(|| subject.to_string()),
            message: message.to_string(),
        }
    }

    pub fn mail_subject(&self) -> String {
        format!("New message from {}", self.name)
    }

    pub fn mail_text(&self) -> String {
        let body = format!("Email: {}\n\nMessage:\n{}", self.email, self.message);
        match &self.subject {
            Some(subject) => format!("Subject: {}\n{}", subject, body),
            None => body,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactOutcome {
    Sent,
    Failed,
}

impl ContactOutcome {
    pub fn message(self) -> &'static str {
        match self {
            ContactOutcome::Sent => "Message sent successfully!",
            ContactOutcome::Failed => "Failed to send message.",
        }
    }
}

impl From<&Result<(), ContactError>> for ContactOutcome {
    fn from(result: &Result<(), ContactError>) -> Self {
        match result {
            Ok(()) => ContactOutcome::Sent,
            Err(_) => ContactOutcome::Failed,
        }
    }
}

pub trait MailRelay: Send + Sync {
    fn send(&self, request: &ContactRequest) -> Result<(), ContactError>;
}

#[derive(Serialize)]
struct OutgoingEmail<'a> {
    from: &'a str,
    to: &'a str,
    subject: String,
    text: String,
}

pub struct ResendRelay {
    client: Client,
    endpoint: String,
    api_key: String,
    from: String,
    to: String,
}

impl ResendRelay {
    pub fn from_config(config: &ContactConfig) -> Result<Self, ContactError> {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| ContactError::MissingApiKey(config.api_key_env.clone()))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            api_key,
            from: config.from.clone(),
            to: config.to.clone(),
        })
    }
}

impl MailRelay for ResendRelay {
    fn send(&self, request: &ContactRequest) -> Result<(), ContactError> {
        let email = OutgoingEmail {
            from: &self.from,
            to: &self.to,
            subject: request.mail_subject(),
            text: request.mail_text(),
        };

        let response = self
            .client
            .post(&self.endpoint)
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
            .header(CONTENT_TYPE, "application/json")
            .json(&email)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(ContactError::Rejected(status.as_u16()));
        }
        Ok(())
    }
}

pub struct UnavailableRelay {
    reason: String,
}

impl UnavailableRelay {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl MailRelay for UnavailableRelay {
    fn send(&self, _request: &ContactRequest) -> Result<(), ContactError> {
        Err(ContactError::Network(self.reason.clone()))
    }
}

pub fn build_relay(config: &ContactConfig) -> Box<dyn MailRelay> {
    match ResendRelay::from_config(config) {
        Ok(relay) => Box::new(relay),
        Err(e) => {
            warn!(error = %e, "mail relay unavailable");
            Box::new(UnavailableRelay::new(e.to_string()))
        }
    }
}

pub fn send_blocking(relay: &dyn MailRelay, request: &ContactRequest) -> ContactOutcome {
    let result = relay.send(request);
    match &result {
        Ok(()) => info!(name = %request.name, "contact message relayed"),
        Err(e) => warn!(error = %e, "contact message failed"),
    }
    ContactOutcome::from(&result)
}

/// An in-flight submission. Dropping it discards the result.
pub struct PendingSend {
    receiver: Receiver<ContactOutcome>,
}

impl PendingSend {
    pub fn spawn(relay: std::sync::Arc<dyn MailRelay>, request: ContactRequest) -> Self {
        let (sender, receiver) = mpsc::channel();
        thread::spawn(move || {
            let outcome = send_blocking(relay.as_ref(), &request);
            // receiver gone means the app already exited
            let _ = sender.send(outcome);
        });
        Self { receiver }
    }

    pub fn poll(&self) -> Option<ContactOutcome> {
        match self.receiver.try_recv() {
            Ok(outcome) => Some(outcome),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                warn!(error = %ContactError::Disconnected, "contact worker vanished");
                Some(ContactOutcome::Failed)
            }
        }
    }
}
