//! Project showcase.

use serde::Serialize;
use std::future::Future;
use uuid::Uuid;

use super::{listing::Listing, Loadable};
use crate::db::{
    models::{Project, ProjectTier},
    DataClient, DataError, Direction, Query,
};
use crate::filter::CategoryFilter;

pub type ProjectsPage = Listing<Project>;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectCard {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub short_description: String,
    pub tech_stack: Vec<String>,
    pub github_url: Option<String>,
    pub demo_url: Option<String>,
    pub image_url: Option<String>,
    pub tier: ProjectTier,
    pub view_count: i64,
}

impl From<&Project> for ProjectCard {
    fn from(project: &Project) -> Self {
        Self {
            id: project.id,
            title: project.title.clone(),
            slug: project.slug.clone(),
            description: project.description.clone(),
            short_description: project.short_description.clone(),
            tech_stack: project.tech_stack.clone(),
            github_url: project.github_url.clone(),
            demo_url: project.demo_url.clone(),
            image_url: project.image_url.clone(),
            tier: project.tier(),
            view_count: project.view_count,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectsView {
    pub loading: bool,
    pub selected_tier: CategoryFilter<ProjectTier>,
    pub query: String,
    pub items: Vec<ProjectCard>,
}

impl Loadable for ProjectsPage {
    type Output = Result<Vec<Project>, DataError>;

    fn fetch(client: DataClient) -> impl Future<Output = Self::Output> + Send + 'static {
        async move {
            client
                .fetch::<Project>(
                    &Query::new()
                        .order("display_order", Direction::Ascending)
                        .order("created_at", Direction::Ascending),
                )
                .await
        }
    }

    fn receive(&mut self, output: Self::Output) {
        self.receive_result("projects", output);
    }
}

impl ProjectsPage {
    pub fn render(&self) -> ProjectsView {
        ProjectsView {
            loading: self.loading(),
            selected_tier: self.filter().category(),
            query: self.filter().query().to_string(),
            items: self.visible().map(ProjectCard::from).collect(),
        }
    }
}
