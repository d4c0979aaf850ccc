use std::sync::Arc;

use crate::application::ports::account_repository::AccountRepository;
use crate::application::ports::session_store::SessionStore;
use crate::application::ports::user_repository::UserRepository;
use crate::bootstrap::config::Config;

#[derive(Clone)]
pub struct AppContext {
    pub cfg: Config,
    services: Arc<AppServices>,
}

#[derive(Clone)]
pub struct AppServices {
    account_repo: Arc<dyn AccountRepository>,
    user_repo: Arc<dyn UserRepository>,
    session_store: Arc<dyn SessionStore>,
}

impl AppServices {
    pub fn new(
        account_repo: Arc<dyn AccountRepository>,
        user_repo: Arc<dyn UserRepository>,
        session_store: Arc<dyn SessionStore>,
    ) -> Self {
        Self {
            account_repo,
            user_repo,
            session_store,
        }
    }
}

impl AppContext {
    pub fn new(cfg: Config, services: AppServices) -> Self {
        Self {
            cfg,
            services: Arc::new(services),
        }
    }

    pub fn account_repo(&self) -> Arc<dyn AccountRepository> {
        self.services.account_repo.clone()
    }

    pub fn user_repo(&self) -> Arc<dyn UserRepository> {
        self.services.user_repo.clone()
    }

    pub fn session_store(&self) -> Arc<dyn SessionStore> {
        self.services.session_store.clone()
    }
}
