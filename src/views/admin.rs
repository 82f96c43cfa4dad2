use super::DashboardContext;
use crate::accounts::{filter_users, status_breakdown, User};
use crate::analytics::{distribution_shares, top_n};
use crate::billing::BadgeVariant;
use crate::format::{format_currency, format_day, format_number};
use crate::shell::SearchField;
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct UserRow {
    pub initials: String,
    pub name: String,
    pub email: String,
    pub plan: &'static str,
    pub status: &'static str,
    pub badge: BadgeVariant,
    pub amount: String,
    pub joined: String,
}

impl From<&User> for UserRow {
    fn from(user: &User) -> Self {
        let subscription = &user.subscription;
        Self {
            initials: user.initials(),
            name: user.name.clone(),
            email: user.email.clone(),
            plan: subscription.plan.display_name(),
            status: subscription.status.label(),
            badge: subscription.status.badge(),
            amount: format!("{}/mo", format_currency(subscription.amount)),
            joined: format_day(&user.created_at),
        }
    }
}

impl fmt::Display for UserRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "  [{:<2}] {:<16} {:<22} {:<10} {:<9} {:>8}  {}",
            self.initials, self.name, self.email, self.plan, self.status, self.amount, self.joined
        )
    }
}

pub struct AdminOverviewView {
    pub metrics: Vec<(&'static str, String)>,
    pub distribution: Vec<(String, u64, u32)>,
    pub recent_users: Vec<UserRow>,
}

impl AdminOverviewView {
    pub fn build(ctx: &DashboardContext<'_>) -> Self {
        let m = &ctx.data.admin_metrics;
        let metrics = vec![
            ("Total Users", format_number(m.total_users as i64)),
            ("MRR", format_currency(m.mrr)),
            ("Churn Rate", format!("{}%", m.churn_rate)),
            ("Conversion Rate", format!("{}%", m.conversion_rate)),
        ];

        let slices = &ctx.data.subscription_distribution;
        let distribution = slices
            .iter()
            .zip(distribution_shares(slices))
            .map(|(slice, (_, share))| (slice.name.clone(), slice.value, share))
            .collect();

        Self {
            metrics,
            distribution,
            recent_users: top_n(&ctx.data.users, ctx.config.recent_users)
                .iter()
                .map(UserRow::from)
                .collect(),
        }
    }
}

impl fmt::Display for AdminOverviewView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (title, value) in &self.metrics {
            writeln!(f, "{:<16} {:>10}", title, value)?;
        }
        writeln!(f, "\nPlan Distribution")?;
        for (name, count, share) in &self.distribution {
            writeln!(f, "  {:<11} {:>4}  {:>3}%", name, count, share)?;
        }
        writeln!(f, "\nRecent Users")?;
        for row in &self.recent_users {
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}

pub struct AdminUsersView {
    pub query: String,
    pub total: usize,
    pub rows: Vec<UserRow>,
}

impl AdminUsersView {
    pub fn build(ctx: &DashboardContext<'_>, search: &SearchField) -> Self {
        let users = &ctx.data.users;
        let query = search.text();
        Self {
            query: query.to_string(),
            total: users.len(),
            rows: filter_users(users, query).into_iter().map(UserRow::from).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl fmt::Display for AdminUsersView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.query.is_empty() {
            writeln!(f, "Search: {:?}  ({} of {} users)\n", self.query, self.rows.len(), self.total)?;
        }
        if self.is_empty() {
            return writeln!(f, "No users found matching your search");
        }
        for row in &self.rows {
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}

pub struct AdminSubscriptionsView {
    pub breakdown: BTreeMap<&'static str, usize>,
    /// Active or trialing subscriptions
    pub active: usize,
    /// Names of users whose payment method must be updated
    pub needs_payment: Vec<String>,
    pub rows: Vec<UserRow>,
}

impl AdminSubscriptionsView {
    pub fn build(ctx: &DashboardContext<'_>) -> Self {
        let users = &ctx.data.users;
        Self {
            breakdown: status_breakdown(users),
            active: users.iter().filter(|u| u.subscription.is_active()).count(),
            needs_payment: users
                .iter()
                .filter(|u| u.subscription.needs_payment_update())
                .map(|u| u.name.clone())
                .collect(),
            rows: users.iter().map(UserRow::from).collect(),
        }
    }
}

impl fmt::Display for AdminSubscriptionsView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (status, count) in &self.breakdown {
            writeln!(f, "{:<10} {}", status, count)?;
        }
        writeln!(f, "\n{} of {} subscriptions active", self.active, self.rows.len())?;
        for name in &self.needs_payment {
            writeln!(f, "  ! {} needs a payment method update", name)?;
        }
        writeln!(f)?;
        for row in &self.rows {
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}

pub struct AdminReportsView {
    pub arr: String,
    pub revenue: Vec<(String, String, String)>,
    pub signups_total: u64,
    pub signups: Vec<(String, u64)>,
}

impl AdminReportsView {
    pub fn build(ctx: &DashboardContext<'_>) -> Self {
        let data = ctx.data;
        Self {
            arr: format_currency(data.admin_metrics.arr),
            revenue: data
                .revenue
                .iter()
                .map(|p| (p.month.clone(), format_currency(p.revenue), format_number(p.users as i64)))
                .collect(),
            signups_total: data.daily_signups.iter().map(|p| p.signups).sum(),
            signups: data
                .daily_signups
                .iter()
                .map(|p| (p.date.clone(), p.signups))
                .collect(),
        }
    }
}

impl fmt::Display for AdminReportsView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ARR: {}\n", self.arr)?;
        writeln!(f, "Revenue & Users")?;
        for (month, revenue, users) in &self.revenue {
            writeln!(f, "  {:<4} {:>10} {:>6} users", month, revenue, users)?;
        }
        writeln!(f, "\nDaily Signups ({} total)", self.signups_total)?;
        for (date, count) in &self.signups {
            writeln!(f, "  {:<7} {:>3}", date, count)?;
        }
        Ok(())
    }
}
