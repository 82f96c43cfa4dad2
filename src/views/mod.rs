pub mod admin;
pub mod console;

use crate::accounts::User;
use crate::billing::limits::usage_percentage;
use crate::billing::{BillingInterval, PlanCatalog};
use crate::config::Config;
use crate::error::{DashboardError, Result};
use crate::fixtures::Fixtures;
use crate::shell::{navigation_for, NavItem, RouteGuard, SearchField, SidebarState};
use chrono::{DateTime, Utc};
use std::fmt;
use tracing::debug;

/// Every page the console can show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Overview,
    Usage,
    Billing,
    Invoices,
    Settings,
    AdminOverview,
    AdminUsers,
    AdminSubscriptions,
    AdminReports,
    Pricing,
    Register,
}

impl Route {
    pub const ALL: [Route; 11] = [
        Self::Overview,
        Self::Usage,
        Self::Billing,
        Self::Invoices,
        Self::Settings,
        Self::AdminOverview,
        Self::AdminUsers,
        Self::AdminSubscriptions,
        Self::AdminReports,
        Self::Pricing,
        Self::Register,
    ];

    pub fn parse(path: &str) -> Result<Self> {
        let trimmed = match path.trim_end_matches('/') {
            "" => "/",
            rest => rest,
        };
        Self::ALL
            .into_iter()
            .find(|route| route.path() == trimmed)
            .ok_or_else(|| DashboardError::UnknownRoute(path.to_string()))
    }

    pub fn path(&self) -> &'static str {
        match self {
            Self::Overview => "/dashboard",
            Self::Usage => "/dashboard/usage",
            Self::Billing => "/dashboard/billing",
            Self::Invoices => "/dashboard/invoices",
            Self::Settings => "/dashboard/settings",
            Self::AdminOverview => "/admin",
            Self::AdminUsers => "/admin/users",
            Self::AdminSubscriptions => "/admin/subscriptions",
            Self::AdminReports => "/admin/reports",
            Self::Pricing => "/pricing",
            Self::Register => "/register",
        }
    }

    /// Header title and subtitle
    pub fn heading(&self) -> (&'static str, &'static str) {
        match self {
            Self::Overview => ("Dashboard", "Your account at a glance"),
            Self::Usage => ("Usage", "Monitor your resource consumption"),
            Self::Billing => ("Billing", "Manage your subscription and payment details"),
            Self::Invoices => ("Invoices", "View and download your billing history"),
            Self::Settings => ("Settings", "Manage your account preferences"),
            Self::AdminOverview => ("Admin Dashboard", "Platform-wide metrics and insights"),
            Self::AdminUsers => ("User Management", "View and manage all users"),
            Self::AdminSubscriptions => ("Subscriptions", "Monitor all active subscriptions"),
            Self::AdminReports => ("Reports", "Revenue and growth analytics"),
            Self::Pricing => ("Pricing", "Simple, transparent pricing"),
            Self::Register => ("Create your account", "Get started with your free 14-day trial"),
        }
    }

    /// Pages rendered inside the sidebar shell
    pub fn has_shell(&self) -> bool {
        !matches!(self, Self::Pricing | Self::Register)
    }
}

/// Everything a page needs to derive its values
pub struct DashboardContext<'a> {
    pub data: &'a Fixtures,
    pub catalog: PlanCatalog,
    pub config: &'a Config,
    pub current_user: &'a User,
    pub now: DateTime<Utc>,
}

impl<'a> DashboardContext<'a> {
    pub fn new(data: &'a Fixtures, config: &'a Config) -> Result<Self> {
        let current_user = data.user(&config.current_user_id)?;
        Ok(Self {
            data,
            catalog: data.catalog(),
            config,
            current_user,
            now: config.now(),
        })
    }
}

/// Sidebar and header around a page
#[derive(Debug, Clone)]
pub struct ShellView {
    pub collapsed: bool,
    pub width_px: u32,
    pub items: Vec<(NavItem, bool)>,
    pub plan_card: Option<(String, u32)>,
    pub user_initials: String,
    pub user_name: String,
    pub user_email: String,
    pub title: &'static str,
    pub subtitle: &'static str,
}

impl ShellView {
    pub fn build(ctx: &DashboardContext<'_>, route: Route, sidebar: SidebarState) -> Result<Self> {
        let user = ctx.current_user;
        let items = navigation_for(user.role)
            .into_iter()
            .map(|item| (item, item.is_active(route.path())))
            .collect();

        let plan_card = if sidebar.shows_labels() {
            let plan = ctx.catalog.for_subscription(&user.subscription)?;
            let api = ctx.data.usage.api_calls;
            Some((plan.name.clone(), usage_percentage(api.used, api.limit)))
        } else {
            None
        };

        let (title, subtitle) = route.heading();
        Ok(Self {
            collapsed: sidebar.is_collapsed(),
            width_px: sidebar.width_px(),
            items,
            plan_card,
            user_initials: user.initials(),
            user_name: user.name.clone(),
            user_email: user.email.clone(),
            title,
            subtitle,
        })
    }
}

impl fmt::Display for ShellView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut section = None;
        for (item, active) in &self.items {
            if !self.collapsed && section != Some(item.section) {
                writeln!(f, "{}", item.section.title().to_uppercase())?;
                section = Some(item.section);
            }
            let marker = if *active { ">" } else { " " };
            if self.collapsed {
                writeln!(f, "{} {}", marker, item.label.chars().next().unwrap_or(' '))?;
            } else {
                writeln!(f, "{} {:<18} {}", marker, item.label, item.href)?;
            }
        }

        if let Some((plan, api)) = &self.plan_card {
            writeln!(f, "Current Plan: {}  (API Calls {}%)", plan, api)?;
        }
        if self.collapsed {
            writeln!(f, "[{}]", self.user_initials)?;
        } else {
            writeln!(f, "[{}] {} <{}>", self.user_initials, self.user_name, self.user_email)?;
        }

        writeln!(f, "{}", "=".repeat(60))?;
        writeln!(f, "{}", self.title)?;
        writeln!(f, "{}", self.subtitle)?;
        writeln!(f, "{}", "-".repeat(60))
    }
}

/// Options a page render can take from the command line
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    pub search: SearchField,
    pub interval: Option<BillingInterval>,
    pub sidebar: SidebarState,
}

/// Render a route to text
pub fn render_route(ctx: &DashboardContext<'_>, route: Route, options: &RenderOptions) -> Result<String> {
    let decision = RouteGuard.check(route.path());
    debug!("Rendering {:?} ({:?})", route, decision);

    let body = match route {
        Route::Overview => console::OverviewView::build(ctx)?.to_string(),
        Route::Usage => console::UsageView::build(ctx).to_string(),
        Route::Billing => console::BillingView::build(ctx)?.to_string(),
        Route::Invoices => console::InvoicesView::build(ctx).to_string(),
        Route::Settings => console::SettingsView::build(ctx).to_string(),
        Route::Pricing => {
            console::PricingView::build(ctx, options.interval.unwrap_or(BillingInterval::Monthly)).to_string()
        }
        Route::Register => console::REGISTER_BLURB.to_string(),
        Route::AdminOverview => admin::AdminOverviewView::build(ctx).to_string(),
        Route::AdminUsers => admin::AdminUsersView::build(ctx, &options.search).to_string(),
        Route::AdminSubscriptions => admin::AdminSubscriptionsView::build(ctx).to_string(),
        Route::AdminReports => admin::AdminReportsView::build(ctx).to_string(),
    };

    if route.has_shell() {
        let shell = ShellView::build(ctx, route, options.sidebar)?;
        Ok(format!("{}{}", shell, body))
    } else {
        let (title, subtitle) = route.heading();
        Ok(format!("{}\n{}\n{}\n{}", title, subtitle, "-".repeat(60), body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_parse() {
        assert_eq!(Route::parse("/dashboard").unwrap(), Route::Overview);
        assert_eq!(Route::parse("/dashboard/usage/").unwrap(), Route::Usage);
        assert_eq!(Route::parse("/admin").unwrap(), Route::AdminOverview);
        assert!(matches!(Route::parse("/login"), Err(DashboardError::UnknownRoute(_))));
        assert!(Route::parse("/").is_err());
    }

    #[test]
    fn test_every_route_round_trips() {
        for route in Route::ALL {
            assert_eq!(Route::parse(route.path()).unwrap(), route);
        }
    }

    #[test]
    fn test_shell_marks_active_entry() {
        let data = Fixtures::builtin().unwrap();
        let config = Config::default();
        let ctx = DashboardContext::new(data, &config).unwrap();

        let shell = ShellView::build(&ctx, Route::Usage, SidebarState::new()).unwrap();
        let active: Vec<&str> = shell.items.iter().filter(|(_, a)| *a).map(|(i, _)| i.label).collect();
        assert_eq!(active, vec!["Usage"]);
        assert_eq!(shell.plan_card, Some(("Pro".to_string(), 65)));
        assert_eq!(shell.user_initials, "AJ");
    }

    #[test]
    fn test_collapsed_shell_hides_plan_card() {
        let data = Fixtures::builtin().unwrap();
        let config = Config::default();
        let ctx = DashboardContext::new(data, &config).unwrap();

        let mut sidebar = SidebarState::new();
        sidebar.toggle();
        let shell = ShellView::build(&ctx, Route::Overview, sidebar).unwrap();
        assert!(shell.plan_card.is_none());
        assert_eq!(shell.width_px, 72);
    }

    #[test]
    fn test_unknown_current_user() {
        let data = Fixtures::builtin().unwrap();
        let config = Config {
            current_user_id: "usr_404".to_string(),
            ..Config::default()
        };
        assert!(matches!(
            DashboardContext::new(data, &config),
            Err(DashboardError::UserNotFound(_))
        ));
    }
}
