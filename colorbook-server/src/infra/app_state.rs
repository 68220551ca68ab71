use std::fmt;
use std::sync::Arc;

use colorbook_core::catalog::{CategoryService, KeywordService, PageService, ThemeParkService};
use colorbook_core::CatalogStore;

use crate::infra::config::Config;
use crate::net::client_ip::ClientIpResolver;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: Arc<CatalogStore>,
    pub categories: CategoryService,
    pub parks: ThemeParkService,
    pub keywords: KeywordService,
    pub pages: PageService,
    pub http: reqwest::Client,
    pub client_ip: Arc<ClientIpResolver>,
}

impl AppState {
    pub fn new(config: Config, store: CatalogStore) -> Self {
        let config = Arc::new(config);
        let store = Arc::new(store);
        let http = reqwest::Client::new();
        let client_ip = Arc::new(ClientIpResolver::new(
            http.clone(),
            config.ip_echo_primary.clone(),
            config.ip_echo_fallback.clone(),
        ));

        Self {
            categories: CategoryService::new(store.clone()),
            parks: ThemeParkService::new(store.clone()),
            keywords: KeywordService::new(store.clone()),
            pages: PageService::new(store.clone()),
            config,
            store,
            http,
            client_ip,
        }
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}
