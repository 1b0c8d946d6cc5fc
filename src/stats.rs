//! Dashboard statistics: concurrent counts reduced into one summary.

use serde::Serialize;

use crate::db::{models::PageAnalytic, Collection, DataClient, DataError, Query};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_blogs: u64,
    pub published_blogs: u64,
    pub total_projects: u64,
    pub total_journals: u64,
    pub unread_messages: u64,
    pub total_views: u64,
}

/// A failed metric is logged and reported as zero.
fn or_zero(metric: &'static str, result: Result<u64, DataError>) -> u64 {
    result.unwrap_or_else(|e| {
        tracing::error!(metric, error = %e, "failed to fetch dashboard metric");
        0
    })
}

/// Runs every query concurrently and waits for all of them; one failure never
/// blocks the others.
pub async fn collect(client: &DataClient) -> DashboardStats {
    let all = Query::new();
    let unread = Query::new().eq("is_read", false);
    let published = Query::new().eq("is_published", true);

    let (blogs, projects, journals, messages, analytics, published_blogs) = tokio::join!(
        client.count(Collection::Blogs, &all),
        client.count(Collection::Projects, &all),
        client.count(Collection::Journals, &all),
        client.count(Collection::ContactMessages, &unread),
        client.fetch::<PageAnalytic>(&all),
        client.count(Collection::Blogs, &published),
    );

    let total_views = analytics.map(|rows| {
        rows.iter()
            .map(|row| row.visit_count.max(0) as u64)
            .sum::<u64>()
    });

    let stats = DashboardStats {
        total_blogs: or_zero("total_blogs", blogs),
        published_blogs: or_zero("published_blogs", published_blogs),
        total_projects: or_zero("total_projects", projects),
        total_journals: or_zero("total_journals", journals),
        unread_messages: or_zero("unread_messages", messages),
        total_views: or_zero("total_views", total_views),
    };
    tracing::debug!(?stats, "dashboard statistics collected");
    stats
}
