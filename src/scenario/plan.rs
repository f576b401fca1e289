use std::collections::BTreeSet;
use std::time::Duration;

use url::Url;

use crate::args::{DriverArgs, StepId};
use crate::error::{AppError, AppResult, HttpError, ValidationError};

/// Immutable description of one load run. Built once from the merged
/// invocation arguments and shared read-only by every virtual user.
#[derive(Debug, Clone)]
pub struct ScenarioPlan {
    pub base_url: Url,
    pub enabled: BTreeSet<StepId>,
    /// Total iterations, shared across all virtual users.
    pub iterations: u64,
    pub vus: usize,
    pub forms: Vec<String>,
    pub user_prefix: String,
    pub think_time: Duration,
    pub update_think_time: Duration,
}

impl ScenarioPlan {
    /// Builds the plan from parsed arguments.
    ///
    /// # Errors
    ///
    /// Returns an error when no target is given or the target does not parse
    /// as a URL.
    pub fn from_args(args: &DriverArgs) -> AppResult<Self> {
        let base_url = resolve_base_url(args)?;
        let enabled: BTreeSet<StepId> = args.execute.iter().copied().collect();
        Ok(Self {
            base_url,
            enabled,
            iterations: args.iterations.get(),
            vus: args.vus.get(),
            forms: args.forms.clone(),
            user_prefix: args.user_prefix.clone(),
            think_time: args.think_time,
            update_think_time: args.update_think_time.unwrap_or(args.think_time),
        })
    }

    /// Login is unconditional; every other step honors the enabled set.
    #[must_use]
    pub fn runs_step(&self, step: StepId) -> bool {
        matches!(step, StepId::Login) || self.enabled.contains(&step)
    }

    /// The compose chain runs when Compose or any of its sub-steps is enabled.
    #[must_use]
    pub fn compose_chain_enabled(&self) -> bool {
        StepId::compose_chain()
            .iter()
            .any(|step| self.enabled.contains(step))
    }

    /// Splits the shared iteration budget across virtual users. The first
    /// `iterations % vus` users take one extra iteration, so the shares
    /// always sum to the configured total.
    #[must_use]
    pub fn iteration_shares(&self) -> Vec<u64> {
        let vus = u64::try_from(self.vus).unwrap_or(u64::MAX).max(1);
        let base = self.iterations.checked_div(vus).unwrap_or(0);
        let extra = self.iterations.checked_rem(vus).unwrap_or(0);
        (0..vus)
            .map(|index| {
                if index < extra {
                    base.saturating_add(1)
                } else {
                    base
                }
            })
            .collect()
    }
}

fn resolve_base_url(args: &DriverArgs) -> AppResult<Url> {
    if let Some(raw) = args.base_url.as_deref() {
        // A trailing slash keeps Url::join from clobbering the last path segment.
        let normalized = if raw.ends_with('/') {
            raw.to_owned()
        } else {
            format!("{}/", raw)
        };
        return Url::parse(&normalized).map_err(|err| {
            AppError::http(HttpError::InvalidBaseUrl {
                url: raw.to_owned(),
                source: err,
            })
        });
    }

    let hostname = args
        .hostname
        .as_deref()
        .ok_or_else(|| AppError::validation(ValidationError::MissingTarget))?;
    let candidate = format!("https://{}/", hostname.trim_end_matches('/'));
    Url::parse(&candidate).map_err(|err| {
        AppError::http(HttpError::InvalidHostname {
            value: hostname.to_owned(),
            source: err,
        })
    })
}
