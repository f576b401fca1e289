use serde::{Deserialize, Serialize};

use crate::error::ScenarioError;

/// Placeholder field identifier the target's seeded forms expect in update
/// payloads.
const UPDATE_FIELD_ID: &str = "02bed0c2-b715-4e35-9c94-24a193856d74";

/// Sign-in payload. The password convention (username + "!") is fixed by the
/// target system's seeded load-test accounts.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl LoginRequest {
    #[must_use]
    pub fn for_user(username: &str) -> Self {
        Self {
            username: username.to_owned(),
            password: format!("{}!", username),
        }
    }
}

/// Fixed-shape update payload. The target validates shape, not meaning, so
/// the values are deliberate placeholders.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateRequest {
    pub due: String,
    pub field1: String,
    pub lines: Vec<String>,
    pub quarter: String,
    pub subject: String,
    pub year: String,
}

impl UpdateRequest {
    #[must_use]
    pub fn fixed() -> Self {
        Self {
            due: "0001-01-01T00:00:00".to_owned(),
            field1: UPDATE_FIELD_ID.to_owned(),
            lines: Vec::new(),
            quarter: "1".to_owned(),
            subject: "A".to_owned(),
            year: "2020".to_owned(),
        }
    }
}

/// Login reply; only the form list matters to the scenario and it may be
/// absent entirely.
#[derive(Debug, Deserialize)]
pub struct LoginReply {
    #[serde(default)]
    pub forms: Vec<FormRef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FormRef {
    pub name: String,
}

/// Compose reply. The id is required: without it the chain has no message to
/// operate on.
#[derive(Debug, Deserialize)]
pub struct ComposeReply {
    pub id: String,
}

/// Update reply. The version is required; continuing with a stale version
/// would silently corrupt the chain.
#[derive(Debug, Deserialize)]
pub struct UpdateReply {
    pub version: u64,
}

/// Submit reply: the advanced version plus the recipient chain the message
/// was routed to.
#[derive(Debug, Deserialize)]
pub struct SubmitReply {
    pub version: u64,
    #[serde(default)]
    pub recipients: Vec<Recipient>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Recipient {
    pub id: String,
}

impl SubmitReply {
    /// The next signer is always the second recipient; the first entry is the
    /// submitting user.
    ///
    /// # Errors
    ///
    /// Returns an error when the reply carries fewer than two recipients.
    pub fn next_recipient(&self, message_id: &str) -> Result<&Recipient, ScenarioError> {
        self.recipients
            .get(1)
            .ok_or_else(|| ScenarioError::MissingNextRecipient {
                id: message_id.to_owned(),
            })
    }
}
