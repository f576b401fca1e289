use std::num::{NonZeroU64, NonZeroUsize};

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// One step of the mail/approval workflow. Declaration order is the fixed
/// execution order within an iteration; enabling order never changes it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize,
)]
#[serde(rename_all = "lowercase")]
pub enum StepId {
    Login,
    Refresh,
    Dashboard,
    Inbox,
    Compose,
    Message,
    Update,
    Submit,
    Approve,
}

impl StepId {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            StepId::Login => "login",
            StepId::Refresh => "refresh",
            StepId::Dashboard => "dashboard",
            StepId::Inbox => "inbox",
            StepId::Compose => "compose",
            StepId::Message => "message",
            StepId::Update => "update",
            StepId::Submit => "submit",
            StepId::Approve => "approve",
        }
    }

    /// Tag code used by the legacy k6 script; accepted for compatibility.
    #[must_use]
    pub const fn legacy_code(self) -> &'static str {
        match self {
            StepId::Login => "P01",
            StepId::Refresh => "G02",
            StepId::Dashboard => "G03",
            StepId::Inbox => "G04",
            StepId::Compose => "P02",
            StepId::Message => "G05",
            StepId::Update => "U01",
            StepId::Submit => "U02",
            StepId::Approve => "U03",
        }
    }

    /// All steps that honor the enabled-step gate. Login is absent because it
    /// runs unconditionally at the start of every iteration.
    #[must_use]
    pub fn gated() -> Vec<StepId> {
        vec![
            StepId::Refresh,
            StepId::Dashboard,
            StepId::Inbox,
            StepId::Compose,
            StepId::Message,
            StepId::Update,
            StepId::Submit,
            StepId::Approve,
        ]
    }

    /// Sub-steps of the compose chain; enabling any of them (or Compose
    /// itself) makes the chain run.
    #[must_use]
    pub fn compose_chain() -> Vec<StepId> {
        vec![
            StepId::Compose,
            StepId::Message,
            StepId::Update,
            StepId::Submit,
            StepId::Approve,
        ]
    }
}

impl std::fmt::Display for StepId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl std::str::FromStr for StepId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim();
        let by_code = match normalized.to_ascii_uppercase().as_str() {
            "P01" => Some(StepId::Login),
            "G02" => Some(StepId::Refresh),
            "G03" => Some(StepId::Dashboard),
            "G04" => Some(StepId::Inbox),
            "P02" => Some(StepId::Compose),
            "G05" => Some(StepId::Message),
            "U01" => Some(StepId::Update),
            "U02" => Some(StepId::Submit),
            "U03" => Some(StepId::Approve),
            _ => None,
        };
        if let Some(step) = by_code {
            return Ok(step);
        }
        match normalized.to_ascii_lowercase().as_str() {
            "login" => Ok(StepId::Login),
            "refresh" => Ok(StepId::Refresh),
            "dashboard" => Ok(StepId::Dashboard),
            "inbox" => Ok(StepId::Inbox),
            "compose" => Ok(StepId::Compose),
            "message" => Ok(StepId::Message),
            "update" => Ok(StepId::Update),
            "submit" => Ok(StepId::Submit),
            "approve" => Ok(StepId::Approve),
            _ => Err(ValidationError::InvalidStepName {
                value: s.to_owned(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositiveU64(NonZeroU64);

impl PositiveU64 {
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0.get()
    }

    pub(crate) fn try_from_u64(value: u64) -> Result<Self, ValidationError> {
        NonZeroU64::new(value)
            .map(Self)
            .ok_or_else(|| ValidationError::ZeroCount {
                value: value.to_string(),
            })
    }
}

impl std::str::FromStr for PositiveU64 {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: u64 = s
            .trim()
            .parse()
            .map_err(|err| ValidationError::InvalidCount {
                value: s.to_owned(),
                source: err,
            })?;
        Self::try_from_u64(value)
    }
}

impl std::fmt::Display for PositiveU64 {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.get())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositiveUsize(NonZeroUsize);

impl PositiveUsize {
    #[must_use]
    pub const fn get(self) -> usize {
        self.0.get()
    }

    pub(crate) fn try_from_usize(value: usize) -> Result<Self, ValidationError> {
        NonZeroUsize::new(value)
            .map(Self)
            .ok_or_else(|| ValidationError::ZeroCount {
                value: value.to_string(),
            })
    }
}

impl std::str::FromStr for PositiveUsize {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: usize = s
            .trim()
            .parse()
            .map_err(|err| ValidationError::InvalidCount {
                value: s.to_owned(),
                source: err,
            })?;
        Self::try_from_usize(value)
    }
}

impl std::fmt::Display for PositiveUsize {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.get())
    }
}
