//! Admin dashboard.

use serde::Serialize;
use std::future::Future;

use super::Loadable;
use crate::db::DataClient;
use crate::navigation::AdminSection;
use crate::stats::{self, DashboardStats};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuickAction {
    pub label: &'static str,
    pub action: &'static str,
}

pub static QUICK_ACTIONS: [QuickAction; 4] = [
    QuickAction {
        label: "New Blog Post",
        action: "manage-blogs",
    },
    QuickAction {
        label: "Add Project",
        action: "manage-projects",
    },
    QuickAction {
        label: "New Journal",
        action: "manage-journals",
    },
    QuickAction {
        label: "View Messages",
        action: "manage-messages",
    },
];

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub email: Option<String>,
    pub section: Option<AdminSection>,
    pub loading: bool,
    pub stats: DashboardStats,
    pub quick_actions: &'static [QuickAction],
}

impl DashboardView {
    pub fn new(email: Option<String>, section: Option<AdminSection>) -> Self {
        Self {
            email,
            section,
            loading: true,
            stats: DashboardStats::default(),
            quick_actions: &QUICK_ACTIONS,
        }
    }
}

impl Loadable for DashboardView {
    type Output = DashboardStats;

    fn fetch(client: DataClient) -> impl Future<Output = DashboardStats> + Send + 'static {
        async move { stats::collect(&client).await }
    }

    fn receive(&mut self, output: DashboardStats) {
        self.stats = output;
        self.loading = false;
    }
}
