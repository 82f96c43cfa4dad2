//! Console chrome: sidebar, navigation, route guard and the header search box.
//! Nothing here feeds back into the dataset.

use crate::accounts::UserRole;
use serde::Serialize;
use tracing::debug;

pub const EXPANDED_WIDTH_PX: u32 = 256;
pub const COLLAPSED_WIDTH_PX: u32 = 72;

/// Path prefixes the guard considers protected
pub const PROTECTED_PREFIXES: [&str; 2] = ["/dashboard", "/admin"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NavSection {
    Dashboard,
    Admin,
}

impl NavSection {
    pub fn title(&self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Admin => "Admin",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub href: &'static str,
    pub label: &'static str,
    pub section: NavSection,
}

const fn item(href: &'static str, label: &'static str, section: NavSection) -> NavItem {
    NavItem { href, label, section }
}

pub const DASHBOARD_ITEMS: [NavItem; 5] = [
    item("/dashboard", "Overview", NavSection::Dashboard),
    item("/dashboard/usage", "Usage", NavSection::Dashboard),
    item("/dashboard/billing", "Billing", NavSection::Dashboard),
    item("/dashboard/invoices", "Invoices", NavSection::Dashboard),
    item("/dashboard/settings", "Settings", NavSection::Dashboard),
];

pub const ADMIN_ITEMS: [NavItem; 4] = [
    item("/admin", "Admin Dashboard", NavSection::Admin),
    item("/admin/users", "Users", NavSection::Admin),
    item("/admin/subscriptions", "Subscriptions", NavSection::Admin),
    item("/admin/reports", "Reports", NavSection::Admin),
];

impl NavItem {
    /// Exact path equality; "/dashboard" is not active on "/dashboard/usage"
    pub fn is_active(&self, current_path: &str) -> bool {
        self.href == current_path
    }
}

/// Entries visible to a role, dashboard section first
pub fn navigation_for(role: UserRole) -> Vec<NavItem> {
    let mut items = DASHBOARD_ITEMS.to_vec();
    if role.is_admin() {
        items.extend_from_slice(&ADMIN_ITEMS);
    }
    items
}

/// The entry matching `current_path`, if any
pub fn active_item(items: &[NavItem], current_path: &str) -> Option<NavItem> {
    items.iter().copied().find(|item| item.is_active(current_path))
}

/// Collapsible sidebar
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SidebarState {
    collapsed: bool,
}

impl SidebarState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle(&mut self) {
        self.collapsed = !self.collapsed;
        debug!("Sidebar {}", if self.collapsed { "collapsed" } else { "expanded" });
    }

    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    pub fn width_px(&self) -> u32 {
        if self.collapsed {
            COLLAPSED_WIDTH_PX
        } else {
            EXPANDED_WIDTH_PX
        }
    }

    /// Labels, section titles and the plan card only show when expanded
    pub fn shows_labels(&self) -> bool {
        !self.collapsed
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    /// Request proceeds. `protected` records whether a prefix matched.
    Allow { protected: bool },
}

/// Route gate for the console paths. Runs in pass-through mode: it classifies
/// but never blocks.
#[derive(Debug, Clone, Copy, Default)]
pub struct RouteGuard;

impl RouteGuard {
    pub fn is_protected(path: &str) -> bool {
        PROTECTED_PREFIXES.iter().any(|prefix| {
            path == *prefix
                || path
                    .strip_prefix(prefix)
                    .is_some_and(|rest| rest.starts_with('/'))
        })
    }

    pub fn check(&self, path: &str) -> RouteDecision {
        let protected = Self::is_protected(path);
        debug!("Route {} (protected: {}) allowed", path, protected);
        RouteDecision::Allow { protected }
    }
}

/// Text typed into a search box
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchField {
    text: String,
}

impl SearchField {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Replace the current value with what was typed
    pub fn set(&mut self, text: impl Into<String>) {
        self.text = text.into();
        debug!("Search text now {:?}", self.text);
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// A toggle on the settings page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationPreference {
    pub title: &'static str,
    pub description: &'static str,
    pub enabled: bool,
}

impl NotificationPreference {
    pub fn toggle(&mut self) {
        self.enabled = !self.enabled;
    }
}

pub fn default_notification_preferences() -> Vec<NotificationPreference> {
    let pref = |title, description, enabled| NotificationPreference {
        title,
        description,
        enabled,
    };
    vec![
        pref("Email Notifications", "Receive billing and account emails", true),
        pref("Usage Alerts", "Get notified when usage reaches 80%", true),
        pref("Product Updates", "News about new features and updates", false),
        pref("Marketing", "Tips and promotional offers", false),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sidebar_toggle() {
        let mut sidebar = SidebarState::new();
        assert!(!sidebar.is_collapsed());
        assert_eq!(sidebar.width_px(), 256);

        sidebar.toggle();
        assert!(sidebar.is_collapsed());
        assert_eq!(sidebar.width_px(), 72);
        assert!(!sidebar.shows_labels());

        sidebar.toggle();
        assert_eq!(sidebar, SidebarState::new());
    }

    #[test]
    fn test_active_route_is_exact() {
        let items = navigation_for(UserRole::Admin);

        assert_eq!(active_item(&items, "/dashboard/usage").unwrap().label, "Usage");
        assert_eq!(active_item(&items, "/dashboard").unwrap().label, "Overview");
        assert!(active_item(&items, "/dashboard/usage/").is_none());
        assert!(active_item(&items, "/pricing").is_none());

        let active: Vec<_> = items.iter().filter(|i| i.is_active("/admin/users")).collect();
        assert_eq!(active.len(), 1);
    }

    #[test]
    fn test_admin_section_is_role_gated() {
        assert_eq!(navigation_for(UserRole::User).len(), 5);
        let admin = navigation_for(UserRole::Admin);
        assert_eq!(admin.len(), 9);
        assert_eq!(admin[5].section, NavSection::Admin);
    }

    #[test]
    fn test_guard_allows_everything() {
        let guard = RouteGuard;
        assert_eq!(guard.check("/dashboard/billing"), RouteDecision::Allow { protected: true });
        assert_eq!(guard.check("/admin"), RouteDecision::Allow { protected: true });
        assert_eq!(guard.check("/pricing"), RouteDecision::Allow { protected: false });
        assert_eq!(guard.check("/administrator"), RouteDecision::Allow { protected: false });
    }

    #[test]
    fn test_search_field() {
        let mut search = SearchField::default();
        assert_eq!(search.text(), "");
        search.set("sarah");
        assert_eq!(search.text(), "sarah");
        search.set(" Chen");
        assert_eq!(search.text(), " Chen");
        assert_eq!(SearchField::new("x"), SearchField { text: "x".to_string() });
    }

    #[test]
    fn test_notification_preferences() {
        let mut prefs = default_notification_preferences();
        assert_eq!(prefs.iter().filter(|p| p.enabled).count(), 2);
        prefs[3].toggle();
        assert!(prefs[3].enabled);
    }
}
