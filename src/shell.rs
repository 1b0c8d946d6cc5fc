//! Application shell: the explicitly passed root that ties the session, the
//! navigator and the data client together and mounts the current view.

use serde_json::Value;
use tokio::sync::watch;

use crate::auth::{Session, SessionContext};
use crate::db::DataClient;
use crate::navigation::{Navigator, PublicPage, Screen};
use crate::views::{
    pages, BlogsPage, ContactForm, DashboardView, JournalsPage, LoginForm, Mounted, ProjectsPage,
};

/// The mounted top-level view.
pub enum View {
    Static(Value),
    Blogs(Mounted<BlogsPage>),
    Projects(Mounted<ProjectsPage>),
    Journals(Mounted<JournalsPage>),
    Contact(ContactForm),
    NotFound(String),
    Login(LoginForm),
    Dashboard(Mounted<DashboardView>),
}

pub struct Shell {
    session: SessionContext,
    session_rx: watch::Receiver<Option<Session>>,
    navigator: Navigator,
    data: DataClient,
}

impl Shell {
    pub fn new(session: SessionContext, data: DataClient) -> Self {
        let session_rx = session.subscribe();
        Self {
            session,
            session_rx,
            navigator: Navigator::new(),
            data,
        }
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub fn screen(&self) -> &Screen {
        self.navigator.screen()
    }

    /// Applies any session transition since the last call.
    pub fn sync(&mut self) -> &Screen {
        if self.session_rx.has_changed().unwrap_or(false) {
            let authenticated = self.session_rx.borrow_and_update().is_some();
            self.navigator.session_changed(authenticated);
        }
        self.navigator.screen()
    }

    pub fn navigate(&mut self, page: &str) -> &Screen {
        self.sync();
        let authenticated = self.session.is_authenticated();
        self.navigator.select(page, authenticated)
    }

    /// Submits the login form; on success the navigator moves to the dashboard.
    pub async fn sign_in(&mut self, form: &mut LoginForm) -> bool {
        let ok = form.submit(&self.session).await.is_ok();
        self.sync();
        ok
    }

    pub async fn logout(&mut self) -> &Screen {
        self.session.sign_out().await;
        self.session_rx.borrow_and_update();
        self.navigator.logout()
    }

    /// Mounts the view for the current screen. Data-backed views start their
    /// fetch immediately; dropping the returned view cancels it.
    pub fn mount(&mut self) -> View {
        let screen = self.sync().clone();
        match screen {
            Screen::Public { page } => match PublicPage::parse(&page) {
                PublicPage::Home | PublicPage::About => match pages::static_content(&page) {
                    Some(content) => View::Static(content),
                    None => View::NotFound(page),
                },
                PublicPage::Blogs => View::Blogs(Mounted::mount(BlogsPage::default(), &self.data)),
                PublicPage::Projects => {
                    View::Projects(Mounted::mount(ProjectsPage::default(), &self.data))
                }
                PublicPage::Journals => {
                    View::Journals(Mounted::mount(JournalsPage::default(), &self.data))
                }
                PublicPage::Contact => View::Contact(ContactForm::default()),
                PublicPage::Missing => View::NotFound(page),
            },
            Screen::AdminLogin => View::Login(LoginForm::default()),
            Screen::AdminDashboard { section } => {
                let session = self.session.current();
                let client = session
                    .as_ref()
                    .map(|s| self.data.with_access_token(&s.access_token))
                    .unwrap_or_else(|| self.data.clone());
                let email = session.and_then(|s| s.user.email);
                View::Dashboard(Mounted::mount(DashboardView::new(email, section), &client))
            }
        }
    }
}
