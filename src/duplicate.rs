//! Duplicate-check client for the email and nickname availability
//! endpoints.

use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

#[cfg(feature = "async")]
use std::sync::Arc;

#[cfg(feature = "async")]
use tokio::sync::mpsc;

#[cfg(feature = "async")]
use crate::form::CheckTicket;

pub const CHECK_EMAIL_PATH: &str = "/member/check-email";
pub const CHECK_NICKNAME_PATH: &str = "/member/check-nickname";

/// Shown when the check itself failed, as opposed to "already taken".
pub const GENERIC_FAILURE_MESSAGE: &str = "An error occurred while checking for duplicates.";

/// Backend reply: `success` means the value is available.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CheckOutcome {
    pub success: bool,
    pub message: String,
    /// Set when the request failed before the backend answered.
    #[serde(skip)]
    pub transport_failure: bool,
}

impl CheckOutcome {
    pub fn available(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            transport_failure: false,
        }
    }

    pub fn taken(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            transport_failure: false,
        }
    }

    pub fn failure() -> Self {
        Self {
            success: false,
            message: GENERIC_FAILURE_MESSAGE.to_string(),
            transport_failure: true,
        }
    }
}

#[derive(Error, Debug)]
pub enum CheckError {
    #[error("Duplicate-check request failed: {0}")]
    Transport(String),
    #[error("Duplicate-check returned HTTP {code}: {body}")]
    Status { code: u16, body: String },
    #[error("Failed to decode duplicate-check response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Failed to read duplicate-check response: {0}")]
    Read(#[from] std::io::Error),
}

/// Which availability endpoint to query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckKind {
    Email,
    Nickname,
}

impl CheckKind {
    pub fn path(&self) -> &'static str {
        match self {
            CheckKind::Email => CHECK_EMAIL_PATH,
            CheckKind::Nickname => CHECK_NICKNAME_PATH,
        }
    }

    /// Form field name in the request body.
    pub fn field(&self) -> &'static str {
        match self {
            CheckKind::Email => "email",
            CheckKind::Nickname => "nickname",
        }
    }
}

/// Trait for availability backends, so the form can be driven without a
/// network.
pub trait DuplicateChecker {
    fn check(&self, kind: CheckKind, value: &str) -> CheckOutcome;

    fn check_email(&self, email: &str) -> CheckOutcome {
        self.check(CheckKind::Email, email)
    }

    fn check_nickname(&self, nickname: &str) -> CheckOutcome {
        self.check(CheckKind::Nickname, nickname)
    }
}

/// Blocking HTTP client, one request per check, no retry.
pub struct HttpDuplicateChecker {
    base_url: String,
    agent: ureq::Agent,
    timeout: Option<Duration>,
}

impl HttpDuplicateChecker {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            agent: ureq::Agent::new(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn url(&self, kind: CheckKind) -> String {
        format!("{}{}", self.base_url, kind.path())
    }

    /// Sends `<field>=<urlencoded value>` and decodes `{success, message}`.
    pub fn try_check(&self, kind: CheckKind, value: &str) -> Result<CheckOutcome, CheckError> {
        let url = self.url(kind);

        #[cfg(feature = "tracing")]
        tracing::debug!("Duplicate check: POST {}", url);

        let mut request = self.agent.post(&url);
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        let resp = request.send_form(&[(kind.field(), value)]);

        match resp {
            Ok(r) => {
                let body = r.into_string()?;
                let outcome: CheckOutcome = serde_json::from_str(&body)?;
                Ok(outcome)
            }
            Err(ureq::Error::Status(code, resp)) => {
                let body = resp.into_string().unwrap_or_default();
                Err(CheckError::Status { code, body })
            }
            Err(e) => Err(CheckError::Transport(e.to_string())),
        }
    }

    pub fn try_check_email(&self, email: &str) -> Result<CheckOutcome, CheckError> {
        self.try_check(CheckKind::Email, email)
    }

    pub fn try_check_nickname(&self, nickname: &str) -> Result<CheckOutcome, CheckError> {
        self.try_check(CheckKind::Nickname, nickname)
    }
}

impl DuplicateChecker for HttpDuplicateChecker {
    fn check(&self, kind: CheckKind, value: &str) -> CheckOutcome {
        match self.try_check(kind, value) {
            Ok(outcome) => outcome,
            Err(_e) => {
                #[cfg(feature = "tracing")]
                tracing::warn!("Duplicate check for {} failed: {}", kind.field(), _e);
                CheckOutcome::failure()
            }
        }
    }
}

/// Runs one check on the blocking pool and sends `(ticket, outcome)` via
/// channel. Responses may arrive out of order; the form discards stale
/// tickets.
#[cfg(feature = "async")]
pub async fn check_tx<C>(
    checker: Arc<C>,
    ticket: CheckTicket,
    tx: mpsc::Sender<(CheckTicket, CheckOutcome)>,
) where
    C: DuplicateChecker + Send + Sync + 'static,
{
    let kind = ticket.kind;
    let value = ticket.value.clone();
    let outcome = tokio::task::spawn_blocking(move || checker.check(kind, &value))
        .await
        .unwrap_or_else(|_e| {
            #[cfg(feature = "tracing")]
            tracing::error!("Duplicate check task failed: {}", _e);
            CheckOutcome::failure()
        });

    if let Err(_e) = tx.send((ticket, outcome)).await {
        #[cfg(feature = "tracing")]
        tracing::error!("Failed to send duplicate-check result: {}", _e);
    }
}


#[cfg(all(test, feature = "async"))]
mod async_tests {
    use super::*;
    use crate::form::RegisterForm;

    struct AlwaysAvailable;

    impl DuplicateChecker for AlwaysAvailable {
        fn check(&self, kind: CheckKind, value: &str) -> CheckOutcome {
            CheckOutcome::available(format!("{} {} is available", kind.field(), value))
        }
    }

    #[tokio::test]
    async fn test_check_tx_sends_ticket_and_outcome() {
        let mut form = RegisterForm::default();
        form.input_email("kim@example.com");
        let ticket = form.begin_check(CheckKind::Email).expect("valid email");

        let (tx, mut rx) = mpsc::channel(1);
        check_tx(Arc::new(AlwaysAvailable), ticket.clone(), tx).await;

        let (got_ticket, outcome) = rx.recv().await.expect("Should receive outcome");
        assert_eq!(got_ticket, ticket);
        assert_eq!(outcome.message, "email kim@example.com is available");
        assert!(form.complete_check(&got_ticket, outcome));
        assert!(form.check_state(CheckKind::Email).is_available());
    }

    #[tokio::test]
    async fn test_check_tx_out_of_order_responses() {
        let mut form = RegisterForm::default();
        form.input_nickname("neo");
        let older = form.begin_check(CheckKind::Nickname).expect("valid nickname");
        let newer = form.begin_check(CheckKind::Nickname).expect("valid nickname");

        let (tx, mut rx) = mpsc::channel(2);
        check_tx(Arc::new(AlwaysAvailable), newer, tx.clone()).await;
        check_tx(Arc::new(AlwaysAvailable), older, tx).await;

        let mut applied = Vec::new();
        while let Some((ticket, outcome)) = rx.recv().await {
            applied.push(form.complete_check(&ticket, outcome));
        }
        assert_eq!(applied, vec![true, false]);
    }
}
