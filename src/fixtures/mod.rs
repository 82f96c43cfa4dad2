use crate::accounts::{find_user, User};
use crate::analytics::{
    ActivityItem, AdminMetrics, DistributionSlice, RevenuePoint, SignupPoint, UsageHistoryPoint,
};
use crate::billing::{Invoice, Plan, PlanCatalog, UsageSnapshot};
use crate::error::Result;
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

const BUILTIN_DATASET: &str = include_str!("dataset.json");

static BUILTIN: OnceCell<Fixtures> = OnceCell::new();

/// Every collection the console reads from. Loaded once, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fixtures {
    pub plans: Vec<Plan>,
    pub users: Vec<User>,
    pub usage: UsageSnapshot,
    pub invoices: Vec<Invoice>,
    pub revenue: Vec<RevenuePoint>,
    pub recent_activity: Vec<ActivityItem>,
    pub admin_metrics: AdminMetrics,
    pub subscription_distribution: Vec<DistributionSlice>,
    pub daily_signups: Vec<SignupPoint>,
    pub usage_history: Vec<UsageHistoryPoint>,
}

impl Fixtures {
    pub fn from_json(json: &str) -> Result<Self> {
        let fixtures: Fixtures = serde_json::from_str(json)?;
        debug!(
            "Parsed dataset: {} plans, {} users, {} invoices",
            fixtures.plans.len(),
            fixtures.users.len(),
            fixtures.invoices.len()
        );
        Ok(fixtures)
    }

    /// The dataset compiled into the binary, parsed on first use
    pub fn builtin() -> Result<&'static Fixtures> {
        BUILTIN.get_or_try_init(|| Self::from_json(BUILTIN_DATASET))
    }

    /// Read a replacement dataset from disk
    pub async fn load_file(path: &Path) -> Result<Self> {
        info!("Loading dataset from {}", path.display());
        let json = tokio::fs::read_to_string(path).await?;
        Self::from_json(&json)
    }

    /// The file at `path` if given, otherwise the builtin dataset
    pub async fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_file(path).await,
            None => Ok(Self::builtin()?.clone()),
        }
    }

    pub fn catalog(&self) -> PlanCatalog {
        PlanCatalog::new(self.plans.clone())
    }

    pub fn user(&self, id: &str) -> Result<&User> {
        find_user(&self.users, id)
    }
}
