use crate::error::{DashboardError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, info, warn};

pub const MIN_PASSWORD_LEN: usize = 8;

/// Where a successful sign-up lands
pub const AFTER_SIGNUP_ROUTE: &str = "/dashboard";

/// Sign-up form as typed by the user
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegistrationForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub accept_terms: bool,
}

/// A form that passed validation
#[derive(Debug, Clone)]
pub struct ValidatedRegistration {
    pub name: String,
    pub email: String,
}

impl RegistrationForm {
    pub fn validate(&self) -> Result<ValidatedRegistration> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(DashboardError::invalid("name", "full name is required"));
        }

        let email = self.email.trim();
        if !is_plausible_email(email) {
            return Err(DashboardError::invalid("email", format!("'{}' is not an email address", email)));
        }

        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(DashboardError::invalid(
                "password",
                format!("must be at least {} characters", MIN_PASSWORD_LEN),
            ));
        }

        if !self.accept_terms {
            return Err(DashboardError::invalid("terms", "terms of service must be accepted"));
        }

        Ok(ValidatedRegistration {
            name: name.to_string(),
            email: email.to_lowercase(),
        })
    }
}

fn is_plausible_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !email.contains(char::is_whitespace)
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
}

/// Result of creating an account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupOutcome {
    pub email: String,
    pub redirect_to: String,
}

/// Backend that accepts new accounts
#[async_trait]
pub trait AccountGateway {
    async fn create_account(&self, registration: &ValidatedRegistration) -> Result<SignupOutcome>;
}

/// Stands in for a network round trip: waits, then always succeeds
pub struct SimulatedGateway {
    delay: Duration,
}

impl SimulatedGateway {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl AccountGateway for SimulatedGateway {
    async fn create_account(&self, registration: &ValidatedRegistration) -> Result<SignupOutcome> {
        debug!("Simulating account creation for {} ({:?})", registration.email, self.delay);
        tokio::time::sleep(self.delay).await;

        Ok(SignupOutcome {
            email: registration.email.clone(),
            redirect_to: AFTER_SIGNUP_ROUTE.to_string(),
        })
    }
}

/// Validate the form and submit it, giving up with `Canceled` if `cancel`
/// resolves first (the form was torn down).
pub async fn submit_registration<G, C>(
    gateway: &G,
    form: &RegistrationForm,
    cancel: C,
) -> Result<SignupOutcome>
where
    G: AccountGateway + Sync + ?Sized,
    C: Future<Output = ()>,
{
    let registration = form.validate().map_err(|e| {
        warn!("Registration rejected: {}", e);
        e
    })?;

    info!("Creating account for {}", registration.email);

    tokio::select! {
        outcome = gateway.create_account(&registration) => {
            let outcome = outcome?;
            info!("Account created, redirecting to {}", outcome.redirect_to);
            Ok(outcome)
        }
        _ = cancel => {
            warn!("Registration for {} canceled", registration.email);
            Err(DashboardError::Canceled)
        }
    }
}
