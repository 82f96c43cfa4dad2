use super::{BillingInterval, Plan, PlanTier, Subscription};
use crate::error::{DashboardError, Result};
use tracing::warn;

impl Plan {
    pub fn price_for(&self, interval: BillingInterval) -> f64 {
        match interval {
            BillingInterval::Monthly => self.monthly_price,
            BillingInterval::Yearly => self.yearly_price,
        }
    }

    /// What a year of monthly billing costs over the yearly price
    pub fn yearly_savings(&self) -> f64 {
        self.monthly_price * 12.0 - self.yearly_price
    }

    /// Yearly discount as a whole percentage of twelve monthly payments
    pub fn yearly_discount_percent(&self) -> u32 {
        let full_year = self.monthly_price * 12.0;
        if full_year <= 0.0 {
            return 0;
        }
        (self.yearly_savings() / full_year * 100.0).round().max(0.0) as u32
    }

    pub fn call_to_action(&self) -> &'static str {
        match self.id {
            PlanTier::Enterprise => "Contact Sales",
            _ => "Get Started",
        }
    }
}

/// The ordered set of plans on offer
#[derive(Debug, Clone, Default)]
pub struct PlanCatalog {
    plans: Vec<Plan>,
}

impl PlanCatalog {
    pub fn new(plans: Vec<Plan>) -> Self {
        Self { plans }
    }

    pub fn plans(&self) -> &[Plan] {
        &self.plans
    }

    /// Find the plan for a tier. Exactly one match is expected.
    pub fn find(&self, tier: PlanTier) -> Result<&Plan> {
        self.plans.iter().find(|p| p.id == tier).ok_or_else(|| {
            warn!("No plan defined for tier {}", tier.id());
            DashboardError::PlanNotFound(tier.id().to_string())
        })
    }

    /// The plan a subscription is billed under
    pub fn for_subscription(&self, subscription: &Subscription) -> Result<&Plan> {
        self.find(subscription.plan)
    }
}
