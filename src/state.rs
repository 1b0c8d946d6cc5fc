use std::sync::Arc;

use reqwest::Client;

use crate::auth::{gotrue::GoTrueProvider, IdentityProvider};
use crate::config::Config;
use crate::db::{rest::RestStore, DataClient};

/// Shared handles every request starts from. Sessions are never stored here;
/// each admin request carries its own bearer token.
#[derive(Clone)]
pub struct AppState {
    pub data: DataClient,
    pub identity: Arc<dyn IdentityProvider>,
}

impl AppState {
    pub fn new(data: DataClient, identity: Arc<dyn IdentityProvider>) -> Self {
        Self { data, identity }
    }

    /// Clients for the hosted data and identity APIs, sharing one connection pool.
    pub fn from_config(config: &Config) -> Self {
        let http = Client::new();
        let store = RestStore::new(http.clone(), &config.supabase_url, &config.anon_key);
        let identity = GoTrueProvider::new(http, &config.supabase_url, &config.anon_key);
        Self {
            data: DataClient::new(Arc::new(store)),
            identity: Arc::new(identity),
        }
    }
}
