//! View Composition Layer
//!
//! View models built from the data client, the content filter and the session.
//! Each view owns only UI-local state: field values plus loading and error flags.

pub mod blogs;
pub mod contact;
pub mod dashboard;
pub mod journals;
pub mod listing;
pub mod login;
pub mod pages;
pub mod projects;
pub mod scope;

pub use blogs::{BlogsPage, BlogsView};
pub use contact::ContactForm;
pub use dashboard::DashboardView;
pub use journals::{JournalsPage, JournalsView};
pub use login::LoginForm;
pub use projects::{ProjectsPage, ProjectsView};
pub use scope::{Loadable, Mounted, Slot, ViewScope};
