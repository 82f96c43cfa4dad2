pub mod limits;
pub mod plans;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

pub use limits::{UsageLevel, UsageMeter};
pub use plans::PlanCatalog;

/// Plan tiers available
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanTier {
    Starter,
    Pro,
    Enterprise,
}

impl PlanTier {
    pub fn id(&self) -> &'static str {
        match self {
            Self::Starter => "starter",
            Self::Pro => "pro",
            Self::Enterprise => "enterprise",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Starter => "Starter",
            Self::Pro => "Pro",
            Self::Enterprise => "Enterprise",
        }
    }
}

impl fmt::Display for PlanTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Billing interval for subscriptions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillingInterval {
    Monthly,
    Yearly,
}

impl BillingInterval {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Monthly => "Monthly",
            Self::Yearly => "Yearly",
        }
    }

    /// Suffix used after a price, e.g. "$79/month"
    pub fn per(&self) -> &'static str {
        match self {
            Self::Monthly => "month",
            Self::Yearly => "year",
        }
    }
}

/// Badge style a status renders with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeVariant {
    Success,
    Warning,
    Destructive,
    Info,
    Secondary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    Active,
    Canceled,
    PastDue,
    Trialing,
}

impl SubscriptionStatus {
    pub const ALL: [SubscriptionStatus; 4] = [
        Self::Active,
        Self::Trialing,
        Self::PastDue,
        Self::Canceled,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Canceled => "Canceled",
            Self::PastDue => "Past Due",
            Self::Trialing => "Trialing",
        }
    }

    pub fn badge(&self) -> BadgeVariant {
        match self {
            Self::Active => BadgeVariant::Success,
            Self::PastDue => BadgeVariant::Warning,
            Self::Canceled => BadgeVariant::Destructive,
            Self::Trialing => BadgeVariant::Info,
        }
    }
}

/// A user's subscription
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub id: String,
    pub plan: PlanTier,
    pub status: SubscriptionStatus,
    pub current_period_start: DateTime<Utc>,
    pub current_period_end: DateTime<Utc>,
    pub cancel_at_period_end: bool,
    pub amount: f64,
    pub interval: BillingInterval,
}

impl Subscription {
    pub fn is_active(&self) -> bool {
        matches!(self.status, SubscriptionStatus::Active | SubscriptionStatus::Trialing)
    }

    pub fn needs_payment_update(&self) -> bool {
        self.status == SubscriptionStatus::PastDue
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Paid,
    Pending,
    Overdue,
    Draft,
}

impl InvoiceStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Paid => "Paid",
            Self::Pending => "Pending",
            Self::Overdue => "Overdue",
            Self::Draft => "Draft",
        }
    }

    pub fn badge(&self) -> BadgeVariant {
        match self {
            Self::Paid => BadgeVariant::Success,
            Self::Pending => BadgeVariant::Warning,
            Self::Overdue => BadgeVariant::Destructive,
            Self::Draft => BadgeVariant::Secondary,
        }
    }
}

/// Invoice information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: String,
    pub number: String,
    pub amount: f64,
    pub status: InvoiceStatus,
    pub date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_at: Option<DateTime<Utc>>,
    pub description: String,
}

/// Numeric quotas granted by a plan. Storage and bandwidth are in GB.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanLimits {
    pub api_calls: u64,
    pub storage: u64,
    pub bandwidth: u64,
    pub team_members: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    pub id: PlanTier,
    pub name: String,
    pub description: String,
    pub monthly_price: f64,
    pub yearly_price: f64,
    pub features: Vec<String>,
    pub limits: PlanLimits,
    pub popular: bool,
}

/// Used/limit pair as stored in the dataset
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UsagePair {
    pub used: f64,
    pub limit: f64,
}

/// Usage statistics for the current period
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageSnapshot {
    pub api_calls: UsagePair,
    pub storage: UsagePair,
    pub bandwidth: UsagePair,
    pub team_members: UsagePair,
}

impl UsageSnapshot {
    /// The four meters in display order
    pub fn meters(&self) -> [UsageMeter; 4] {
        [
            UsageMeter::new("API Calls", self.api_calls, "calls"),
            UsageMeter::new("Storage", self.storage, "GB"),
            UsageMeter::new("Bandwidth", self.bandwidth, "GB"),
            UsageMeter::new("Team Members", self.team_members, "members"),
        ]
    }
}
