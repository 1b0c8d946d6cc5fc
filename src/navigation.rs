//! Navigation Controller
//!
//! Maps an opaque page identifier to the top-level screen to show. Nothing here
//! is persisted; the current screen lives in memory only.

use serde::{Deserialize, Serialize};

pub const ADMIN: &str = "admin";
pub const HOME: &str = "home";

const MANAGE_PREFIX: &str = "manage-";

/// Admin area sub-view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdminSection {
    Blogs,
    Projects,
    Journals,
    Messages,
}

impl AdminSection {
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "blogs" => Some(AdminSection::Blogs),
            "projects" => Some(AdminSection::Projects),
            "journals" => Some(AdminSection::Journals),
            "messages" => Some(AdminSection::Messages),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "view", rename_all = "kebab-case")]
pub enum Screen {
    Public { page: String },
    AdminLogin,
    AdminDashboard {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        section: Option<AdminSection>,
    },
}

impl Screen {
    pub fn home() -> Self {
        Screen::Public {
            page: HOME.to_string(),
        }
    }

    pub fn is_admin(&self) -> bool {
        !matches!(self, Screen::Public { .. })
    }
}

impl Default for Screen {
    fn default() -> Self {
        Screen::home()
    }
}

/// Public pages with a view behind them. Anything else renders the not-found view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublicPage {
    Home,
    About,
    Blogs,
    Projects,
    Journals,
    Contact,
    Missing,
}

impl PublicPage {
    pub fn parse(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "home" => PublicPage::Home,
            "about" => PublicPage::About,
            "blogs" => PublicPage::Blogs,
            "projects" => PublicPage::Projects,
            "journals" => PublicPage::Journals,
            "contact" => PublicPage::Contact,
            _ => PublicPage::Missing,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Navigator {
    screen: Screen,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resumes from a screen reported by the client.
    pub fn at(screen: Screen) -> Self {
        Self { screen }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn select(&mut self, page: &str, authenticated: bool) -> &Screen {
        let admin_target = if page == ADMIN {
            Some(None)
        } else {
            page.strip_prefix(MANAGE_PREFIX)
                .map(AdminSection::parse)
        };

        self.screen = match admin_target {
            Some(_) if !authenticated => Screen::AdminLogin,
            Some(section) => Screen::AdminDashboard { section },
            None => Screen::Public {
                page: page.to_string(),
            },
        };
        tracing::debug!(page, screen = ?self.screen, "navigation");
        &self.screen
    }

    /// Reacts to a session transition.
    pub fn session_changed(&mut self, authenticated: bool) -> &Screen {
        match (&self.screen, authenticated) {
            (Screen::AdminLogin, true) => {
                self.screen = Screen::AdminDashboard { section: None };
            }
            (screen, false) if screen.is_admin() => {
                self.screen = Screen::home();
            }
            _ => {}
        }
        &self.screen
    }

    pub fn logout(&mut self) -> &Screen {
        self.screen = Screen::home();
        &self.screen
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_admin_requires_session() {
        let mut nav = Navigator::new();
        assert_eq!(nav.select(ADMIN, false), &Screen::AdminLogin);
        assert_eq!(
            nav.select(ADMIN, true),
            &Screen::AdminDashboard { section: None }
        );
    }

    #[test]
    fn test_sign_in_on_login_reveals_dashboard() {
        let mut nav = Navigator::new();
        nav.select(ADMIN, false);
        assert_eq!(
            nav.session_changed(true),
            &Screen::AdminDashboard { section: None }
        );
    }

    #[test]
    fn test_sign_in_elsewhere_does_not_move() {
        let mut nav = Navigator::new();
        nav.select("blogs", false);
        assert_eq!(
            nav.session_changed(true),
            &Screen::Public {
                page: "blogs".into()
            }
        );
    }

    #[test]
    fn test_public_page_clears_admin_state() {
        let mut nav = Navigator::new();
        nav.select(ADMIN, true);
        assert_eq!(
            nav.select("projects", true),
            &Screen::Public {
                page: "projects".into()
            }
        );
    }

    #[test]
    fn test_manage_sections() {
        let mut nav = Navigator::new();
        assert_eq!(nav.select("manage-blogs", false), &Screen::AdminLogin);
        assert_eq!(
            nav.select("manage-messages", true),
            &Screen::AdminDashboard {
                section: Some(AdminSection::Messages)
            }
        );
        assert_eq!(
            nav.select("manage-recipes", true),
            &Screen::AdminDashboard { section: None }
        );
    }

    #[test]
    fn test_losing_session_on_admin_goes_home() {
        let mut nav = Navigator::new();
        nav.select("manage-projects", true);
        assert_eq!(nav.session_changed(false), &Screen::home());

        let mut nav = Navigator::new();
        nav.select("about", true);
        nav.session_changed(false);
        assert_eq!(
            nav.screen(),
            &Screen::Public {
                page: "about".into()
            }
        );
    }

    #[test]
    fn test_logout_returns_home() {
        let mut nav = Navigator::at(Screen::AdminDashboard { section: None });
        assert_eq!(nav.logout(), &Screen::home());
    }

    #[test]
    fn test_screen_wire_shape() {
        assert_eq!(
            serde_json::to_value(Screen::AdminDashboard {
                section: Some(AdminSection::Blogs)
            })
            .unwrap(),
            json!({ "view": "admin-dashboard", "section": "blogs" })
        );
        let screen: Screen =
            serde_json::from_value(json!({ "view": "public", "page": "about" })).unwrap();
        assert_eq!(
            screen,
            Screen::Public {
                page: "about".into()
            }
        );
        assert_eq!(PublicPage::parse("nope"), PublicPage::Missing);
        assert_eq!(PublicPage::parse("Home"), PublicPage::Home);
        assert_eq!(PublicPage::parse(" BLOGS "), PublicPage::Blogs);
    }
}
