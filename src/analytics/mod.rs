//! Time series, the activity feed and the aggregate numbers shown on the
//! admin pages, plus the small derivations computed over them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenuePoint {
    pub month: String,
    pub revenue: f64,
    pub users: u64,
    pub mrr: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignupPoint {
    pub date: String,
    pub signups: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageHistoryPoint {
    pub date: String,
    pub api_calls: u64,
    pub storage: f64,
    pub bandwidth: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Subscription,
    Payment,
    User,
    System,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityItem {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminMetrics {
    pub total_users: u64,
    pub active_subscriptions: u64,
    pub mrr: f64,
    pub arr: f64,
    pub churn_rate: f64,
    pub ltv: f64,
    pub avg_revenue_per_user: f64,
    pub new_users_this_month: u64,
    pub conversion_rate: f64,
    pub trial_conversions: u64,
}

/// One slice of the plan distribution chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionSlice {
    pub name: String,
    pub value: u64,
    pub color: String,
}

/// The first `n` records in their existing order
pub fn top_n<T>(items: &[T], n: usize) -> &[T] {
    &items[..n.min(items.len())]
}

/// Relative change from `previous` to `current` in percent.
/// `None` when there is no baseline.
pub fn percent_change(previous: f64, current: f64) -> Option<f64> {
    if previous == 0.0 {
        return None;
    }
    Some((current - previous) / previous * 100.0)
}

/// Change between the last two points of a series
pub fn latest_change<T>(series: &[T], value: impl Fn(&T) -> f64) -> Option<f64> {
    match series {
        [.., previous, current] => percent_change(value(previous), value(current)),
        _ => None,
    }
}

/// Signed percentage with one decimal, e.g. "+8.2%" or "-0.3%"
pub fn format_change(change: f64) -> String {
    let rounded = (change * 10.0).round() / 10.0;
    if rounded > 0.0 {
        format!("+{:.1}%", rounded)
    } else if rounded < 0.0 {
        format!("{:.1}%", rounded)
    } else {
        "0.0%".to_string()
    }
}

/// Each slice's share of the total, rounded to whole percent
pub fn distribution_shares(slices: &[DistributionSlice]) -> Vec<(&str, u32)> {
    let total: u64 = slices.iter().map(|s| s.value).sum();
    slices
        .iter()
        .map(|s| {
            let share = if total == 0 {
                0
            } else {
                (s.value as f64 / total as f64 * 100.0).round() as u32
            };
            (s.name.as_str(), share)
        })
        .collect()
}
