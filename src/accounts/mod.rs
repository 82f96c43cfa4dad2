pub mod registration;

use crate::billing::{Subscription, SubscriptionStatus};
use crate::error::{DashboardError, Result};
use crate::format::get_initials;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UserRole {
    User,
    Admin,
}

impl UserRole {
    pub fn is_admin(&self) -> bool {
        *self == Self::Admin
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub last_login: DateTime<Utc>,
    pub subscription: Subscription,
}

impl User {
    pub fn initials(&self) -> String {
        get_initials(&self.name)
    }

    /// Case-insensitive substring match against name or email.
    /// `needle` must already be lowercase.
    fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle) || self.email.to_lowercase().contains(needle)
    }
}

/// Users whose name or email contains `query`, ignoring case, in original order.
/// An empty query matches everyone.
pub fn filter_users<'a>(users: &'a [User], query: &str) -> Vec<&'a User> {
    let needle = query.to_lowercase();
    users.iter().filter(|u| u.matches(&needle)).collect()
}

pub fn find_user<'a>(users: &'a [User], id: &str) -> Result<&'a User> {
    users
        .iter()
        .find(|u| u.id == id)
        .ok_or_else(|| DashboardError::UserNotFound(id.to_string()))
}

/// Number of users in each subscription status, zero counts included
pub fn status_breakdown(users: &[User]) -> BTreeMap<&'static str, usize> {
    let mut counts: BTreeMap<&'static str, usize> = SubscriptionStatus::ALL
        .iter()
        .map(|status| (status.label(), 0))
        .collect();

    for user in users {
        *counts.entry(user.subscription.status.label()).or_insert(0) += 1;
    }
    counts
}
