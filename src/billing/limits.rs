use super::UsagePair;
use crate::format::format_decimal;
use serde::Serialize;

/// Percentage above which a meter is flagged as high
pub const DEFAULT_HIGH_THRESHOLD: u32 = 80;

/// Round `used / limit * 100` to the nearest whole percent.
///
/// Values above 100 are kept. A non-positive limit counts as fully used.
pub fn usage_percentage(used: f64, limit: f64) -> u32 {
    if limit <= 0.0 {
        return 100;
    }
    (used / limit * 100.0).round().max(0.0) as u32
}

pub fn is_high(percentage: u32, threshold: u32) -> bool {
    percentage > threshold
}

/// Warning level derived from a usage percentage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UsageLevel {
    Normal,
    High(u32),
    Exceeded(u32),
}

impl UsageLevel {
    pub fn from_percentage(percentage: u32, threshold: u32) -> Self {
        if percentage > 100 {
            Self::Exceeded(percentage)
        } else if is_high(percentage, threshold) {
            Self::High(percentage)
        } else {
            Self::Normal
        }
    }

    pub fn is_warning(&self) -> bool {
        !matches!(self, Self::Normal)
    }
}

/// A labeled used/limit pair rendered as a percentage bar
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct UsageMeter {
    pub label: &'static str,
    pub used: f64,
    pub limit: f64,
    pub unit: &'static str,
}

impl UsageMeter {
    pub fn new(label: &'static str, pair: UsagePair, unit: &'static str) -> Self {
        Self {
            label,
            used: pair.used,
            limit: pair.limit,
            unit,
        }
    }

    pub fn percentage(&self) -> u32 {
        usage_percentage(self.used, self.limit)
    }

    pub fn level(&self, threshold: u32) -> UsageLevel {
        UsageLevel::from_percentage(self.percentage(), threshold)
    }

    /// Progress bar fill, clamped to 0..=100
    pub fn bar_fill(&self) -> u32 {
        self.percentage().min(100)
    }

    /// "32,450 / 50,000 calls"
    pub fn summary(&self) -> String {
        format!(
            "{} / {} {}",
            format_decimal(self.used),
            format_decimal(self.limit),
            self.unit
        )
    }
}
