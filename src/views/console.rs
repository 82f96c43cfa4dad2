use super::DashboardContext;
use crate::analytics::{format_change, latest_change, top_n, UsageHistoryPoint};
use crate::billing::limits::UsageLevel;
use crate::billing::{BadgeVariant, BillingInterval, Invoice, Plan};
use crate::error::Result;
use crate::format::{
    format_compact, format_currency, format_day, format_decimal, format_number, relative_time,
};
use crate::shell::{default_notification_preferences, NotificationPreference};
use std::fmt;

pub const REGISTER_BLURB: &str = "14-day free trial included\nNo credit card required\nCancel anytime\n";

const HIGH_USAGE_HINT: &str = "Approaching limit, consider upgrading your plan";
const EXCEEDED_USAGE_HINT: &str = "Limit exceeded, upgrade your plan to restore full service";

#[derive(Debug, Clone, PartialEq)]
pub struct StatCard {
    pub title: &'static str,
    pub value: String,
    pub change: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActivityLine {
    pub message: String,
    pub when: String,
}

pub struct OverviewView {
    pub greeting: String,
    pub stats: Vec<StatCard>,
    pub revenue: Vec<(String, String)>,
    pub activity: Vec<ActivityLine>,
}

impl OverviewView {
    pub fn build(ctx: &DashboardContext<'_>) -> Result<Self> {
        let data = ctx.data;
        let latest = data.revenue.last();
        let usage = &data.usage;

        let stats = vec![
            StatCard {
                title: "Monthly Revenue",
                value: format_currency(latest.map_or(0.0, |p| p.revenue)),
                change: latest_change(&data.revenue, |p| p.revenue).map(format_change),
            },
            StatCard {
                title: "Active Users",
                value: format_number(latest.map_or(0, |p| p.users) as i64),
                change: latest_change(&data.revenue, |p| p.users as f64).map(format_change),
            },
            StatCard {
                title: "API Calls",
                value: format_compact(usage.api_calls.used),
                change: latest_change(&data.usage_history, |p| p.api_calls as f64).map(format_change),
            },
            StatCard {
                title: "Storage Used",
                value: format!("{} GB", format_decimal(usage.storage.used)),
                change: latest_change(&data.usage_history, |p| p.storage).map(format_change),
            },
        ];

        let revenue = data
            .revenue
            .iter()
            .map(|p| (p.month.clone(), format_currency(p.revenue)))
            .collect();

        let activity = data
            .recent_activity
            .iter()
            .map(|item| ActivityLine {
                message: item.message.clone(),
                when: relative_time(&item.timestamp, &ctx.now),
            })
            .collect();

        let first_name = ctx.current_user.name.split_whitespace().next().unwrap_or("there");

        Ok(Self {
            greeting: format!("Welcome back, {}", first_name),
            stats,
            revenue,
            activity,
        })
    }
}

impl fmt::Display for OverviewView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}\n", self.greeting)?;
        for stat in &self.stats {
            writeln!(
                f,
                "{:<16} {:>10}  {}",
                stat.title,
                stat.value,
                stat.change.as_deref().unwrap_or("")
            )?;
        }

        writeln!(f, "\nRevenue Overview")?;
        for (month, amount) in &self.revenue {
            writeln!(f, "  {:<4} {:>10}", month, amount)?;
        }

        writeln!(f, "\nRecent Activity")?;
        for line in &self.activity {
            writeln!(f, "  {}  ({})", line.message, line.when)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MeterLine {
    pub label: &'static str,
    pub summary: String,
    pub percentage: u32,
    pub bar_fill: u32,
    pub level: UsageLevel,
}

pub struct UsageView {
    pub meters: Vec<MeterLine>,
    pub history: Vec<UsageHistoryPoint>,
}

impl UsageView {
    pub fn build(ctx: &DashboardContext<'_>) -> Self {
        let threshold = ctx.config.high_usage_threshold;
        let meters = ctx
            .data
            .usage
            .meters()
            .iter()
            .map(|meter| MeterLine {
                label: meter.label,
                summary: meter.summary(),
                percentage: meter.percentage(),
                bar_fill: meter.bar_fill(),
                level: meter.level(threshold),
            })
            .collect();

        Self {
            meters,
            history: ctx.data.usage_history.clone(),
        }
    }
}

impl fmt::Display for UsageView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for meter in &self.meters {
            let filled = (meter.bar_fill / 5) as usize;
            writeln!(
                f,
                "{:<13} {:<24} [{:<20}] {}%",
                meter.label,
                meter.summary,
                "#".repeat(filled),
                meter.percentage
            )?;
            match meter.level {
                UsageLevel::Normal => {}
                UsageLevel::High(_) => writeln!(f, "              ! {}", HIGH_USAGE_HINT)?,
                UsageLevel::Exceeded(_) => writeln!(f, "              !! {}", EXCEEDED_USAGE_HINT)?,
            }
        }

        writeln!(f, "\nWeekly history")?;
        for point in &self.history {
            writeln!(
                f,
                "  {:<7} {:>7} calls  {:>6} GB stored  {:>4} GB transferred",
                point.date,
                format_number(point.api_calls as i64),
                format_decimal(point.storage),
                format_decimal(point.bandwidth)
            )?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceLine {
    pub number: String,
    pub description: String,
    pub date: String,
    pub amount: String,
    pub status: &'static str,
    pub badge: BadgeVariant,
}

impl From<&Invoice> for InvoiceLine {
    fn from(invoice: &Invoice) -> Self {
        Self {
            number: invoice.number.clone(),
            description: invoice.description.clone(),
            date: format_day(&invoice.date),
            amount: format_currency(invoice.amount),
            status: invoice.status.label(),
            badge: invoice.status.badge(),
        }
    }
}

fn write_invoices(f: &mut fmt::Formatter<'_>, invoices: &[InvoiceLine]) -> fmt::Result {
    for line in invoices {
        writeln!(
            f,
            "  {:<13} {:<30} {:<13} {:>8}  {}",
            line.number, line.description, line.date, line.amount, line.status
        )?;
    }
    Ok(())
}

pub struct BillingView {
    pub plan_name: String,
    pub price: String,
    pub renews_on: String,
    pub cancel_at_period_end: bool,
    pub highlights: Vec<String>,
    pub recent_invoices: Vec<InvoiceLine>,
}

impl BillingView {
    pub fn build(ctx: &DashboardContext<'_>) -> Result<Self> {
        let subscription = &ctx.current_user.subscription;
        let plan = ctx.catalog.for_subscription(subscription)?;

        Ok(Self {
            plan_name: plan.name.clone(),
            price: format!(
                "{}/{}",
                format_currency(plan.price_for(subscription.interval)),
                subscription.interval.per()
            ),
            renews_on: format_day(&subscription.current_period_end),
            cancel_at_period_end: subscription.cancel_at_period_end,
            highlights: top_n(&plan.features, 4).to_vec(),
            recent_invoices: top_n(&ctx.data.invoices, ctx.config.recent_invoices)
                .iter()
                .map(InvoiceLine::from)
                .collect(),
        })
    }
}

impl fmt::Display for BillingView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let renewal = if self.cancel_at_period_end { "Ends on" } else { "Renews on" };
        writeln!(f, "{} Plan  {}  {} {}", self.plan_name, self.price, renewal, self.renews_on)?;
        for feature in &self.highlights {
            writeln!(f, "  + {}", feature)?;
        }
        writeln!(f, "\nRecent Invoices")?;
        write_invoices(f, &self.recent_invoices)
    }
}

pub struct InvoicesView {
    pub invoices: Vec<InvoiceLine>,
    pub total_paid: String,
}

impl InvoicesView {
    pub fn build(ctx: &DashboardContext<'_>) -> Self {
        let invoices = &ctx.data.invoices;
        let total_paid: f64 = invoices
            .iter()
            .filter(|i| i.paid_at.is_some())
            .map(|i| i.amount)
            .sum();

        Self {
            invoices: invoices.iter().map(InvoiceLine::from).collect(),
            total_paid: format_currency(total_paid),
        }
    }
}

impl fmt::Display for InvoicesView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_invoices(f, &self.invoices)?;
        writeln!(f, "\nTotal paid: {}", self.total_paid)
    }
}

pub struct SettingsView {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub notifications: Vec<NotificationPreference>,
}

impl SettingsView {
    pub fn build(ctx: &DashboardContext<'_>) -> Self {
        let user = ctx.current_user;
        let (first_name, last_name) = user
            .name
            .split_once(' ')
            .map(|(first, last)| (first.to_string(), last.trim().to_string()))
            .unwrap_or_else(|| (user.name.clone(), String::new()));

        Self {
            first_name,
            last_name,
            email: user.email.clone(),
            notifications: default_notification_preferences(),
        }
    }
}

impl fmt::Display for SettingsView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "First Name:    {}", self.first_name)?;
        writeln!(f, "Last Name:     {}", self.last_name)?;
        writeln!(f, "Email Address: {}", self.email)?;
        writeln!(f, "\nNotifications")?;
        for pref in &self.notifications {
            let state = if pref.enabled { "on " } else { "off" };
            writeln!(f, "  [{}] {:<20} {}", state, pref.title, pref.description)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlanCard {
    pub name: String,
    pub description: String,
    pub price: String,
    pub savings: Option<String>,
    pub popular: bool,
    pub call_to_action: &'static str,
    pub features: Vec<String>,
}

impl PlanCard {
    fn new(plan: &Plan, interval: BillingInterval) -> Self {
        let savings = match interval {
            BillingInterval::Yearly => Some(format!("{} saved annually", format_currency(plan.yearly_savings()))),
            BillingInterval::Monthly => None,
        };

        Self {
            name: plan.name.clone(),
            description: plan.description.clone(),
            price: format!("{}/{}", format_currency(plan.price_for(interval)), interval.per()),
            savings,
            popular: plan.popular,
            call_to_action: plan.call_to_action(),
            features: plan.features.clone(),
        }
    }
}

pub struct PricingView {
    pub interval: BillingInterval,
    pub discount_percent: u32,
    pub cards: Vec<PlanCard>,
}

impl PricingView {
    pub fn build(ctx: &DashboardContext<'_>, interval: BillingInterval) -> Self {
        let plans = ctx.catalog.plans();
        let discount_percent = plans
            .iter()
            .map(Plan::yearly_discount_percent)
            .max()
            .unwrap_or(0);

        Self {
            interval,
            discount_percent,
            cards: plans.iter().map(|p| PlanCard::new(p, interval)).collect(),
        }
    }
}

impl fmt::Display for PricingView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Billing: {} (yearly saves {}%)\n", self.interval.display_name(), self.discount_percent)?;
        for card in &self.cards {
            let badge = if card.popular { "  * Most Popular" } else { "" };
            writeln!(f, "{}{}", card.name, badge)?;
            writeln!(f, "  {}", card.description)?;
            writeln!(f, "  {}", card.price)?;
            if let Some(savings) = &card.savings {
                writeln!(f, "  {}", savings)?;
            }
            for feature in &card.features {
                writeln!(f, "  + {}", feature)?;
            }
            writeln!(f, "  [{}]\n", card.call_to_action)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::fixtures::Fixtures;
    use crate::format::parse_timestamp;

    fn config() -> Config {
        Config {
            reference_time: Some(parse_timestamp("2026-02-22T12:00:00Z").unwrap()),
            ..Config::default()
        }
    }

    #[test]
    fn test_overview_stats() {
        let config = config();
        let ctx = DashboardContext::new(Fixtures::builtin().unwrap(), &config).unwrap();
        let view = OverviewView::build(&ctx).unwrap();

        assert_eq!(view.greeting, "Welcome back, Alex");
        assert_eq!(view.stats[0].value, "$52,400");
        assert_eq!(view.stats[0].change.as_deref(), Some("+8.7%"));
        assert_eq!(view.stats[1].value, "742");
        assert_eq!(view.stats[2].value, "32.5K");
        assert_eq!(view.stats[3].value, "67.3 GB");
        assert_eq!(view.activity[0].when, "2 hours ago");
        assert_eq!(view.activity[3].when, "21 days ago");
    }

    #[test]
    fn test_usage_meters() {
        let config = config();
        let ctx = DashboardContext::new(Fixtures::builtin().unwrap(), &config).unwrap();
        let view = UsageView::build(&ctx);

        let percentages: Vec<u32> = view.meters.iter().map(|m| m.percentage).collect();
        assert_eq!(percentages, vec![65, 67, 47, 70]);
        assert!(view.meters.iter().all(|m| !m.level.is_warning()));
        assert!(!view.to_string().contains(HIGH_USAGE_HINT));
    }

    #[test]
    fn test_usage_hint_follows_threshold() {
        let config = Config {
            high_usage_threshold: 60,
            ..config()
        };
        let ctx = DashboardContext::new(Fixtures::builtin().unwrap(), &config).unwrap();
        let view = UsageView::build(&ctx);

        let high: Vec<&str> = view
            .meters
            .iter()
            .filter(|m| m.level.is_warning())
            .map(|m| m.label)
            .collect();
        assert_eq!(high, vec!["API Calls", "Storage", "Team Members"]);
        assert_eq!(view.to_string().matches(HIGH_USAGE_HINT).count(), 3);
    }

    #[test]
    fn test_usage_over_limit_is_marked_exceeded() {
        let config = config();
        let mut data = Fixtures::builtin().unwrap().clone();
        data.usage.api_calls.used = 75000.0;
        data.usage.team_members.used = 9.0;
        let ctx = DashboardContext::new(&data, &config).unwrap();
        let view = UsageView::build(&ctx);

        assert_eq!(view.meters[0].percentage, 150);
        assert_eq!(view.meters[0].bar_fill, 100);
        assert_eq!(view.meters[0].level, UsageLevel::Exceeded(150));
        assert_eq!(view.meters[3].level, UsageLevel::High(90));

        let page = view.to_string();
        assert_eq!(page.matches(EXCEEDED_USAGE_HINT).count(), 1);
        assert_eq!(page.matches(HIGH_USAGE_HINT).count(), 1);
    }

    #[test]
    fn test_billing_view() {
        let config = config();
        let ctx = DashboardContext::new(Fixtures::builtin().unwrap(), &config).unwrap();
        let view = BillingView::build(&ctx).unwrap();

        assert_eq!(view.plan_name, "Pro");
        assert_eq!(view.price, "$79/month");
        assert_eq!(view.renews_on, "Mar 1, 2026");
        assert_eq!(view.highlights.len(), 4);
        let numbers: Vec<&str> = view.recent_invoices.iter().map(|i| i.number.as_str()).collect();
        assert_eq!(numbers, vec!["INV-2026-001", "INV-2026-002", "INV-2025-012"]);
    }

    #[test]
    fn test_invoices_view() {
        let config = config();
        let ctx = DashboardContext::new(Fixtures::builtin().unwrap(), &config).unwrap();
        let view = InvoicesView::build(&ctx);

        assert_eq!(view.invoices.len(), 6);
        assert_eq!(view.invoices[0].date, "Feb 1, 2026");
        assert_eq!(view.invoices[0].badge, BadgeVariant::Success);
        assert_eq!(view.total_paid, "$374");
    }

    #[test]
    fn test_pricing_view() {
        let config = config();
        let ctx = DashboardContext::new(Fixtures::builtin().unwrap(), &config).unwrap();

        let monthly = PricingView::build(&ctx, BillingInterval::Monthly);
        assert_eq!(monthly.cards[1].price, "$79/month");
        assert!(monthly.cards[1].popular);
        assert!(monthly.cards[0].savings.is_none());

        let yearly = PricingView::build(&ctx, BillingInterval::Yearly);
        assert_eq!(yearly.discount_percent, 17);
        assert_eq!(yearly.cards[2].price, "$1,990/year");
        assert_eq!(yearly.cards[2].savings.as_deref(), Some("$398 saved annually"));
        assert_eq!(yearly.cards[2].call_to_action, "Contact Sales");
    }

    #[test]
    fn test_settings_view() {
        let config = config();
        let ctx = DashboardContext::new(Fixtures::builtin().unwrap(), &config).unwrap();
        let view = SettingsView::build(&ctx);

        assert_eq!(view.first_name, "Alex");
        assert_eq!(view.last_name, "Johnson");
        assert_eq!(view.notifications.len(), 4);
    }
}
