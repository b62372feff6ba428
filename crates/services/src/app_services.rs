use std::sync::Arc;

use storage::repository::Storage;
use storage::session_store::SessionStore;

use crate::Clock;
use crate::account_service::AccountService;
use crate::api::{Endpoints, PortalApi, ReqwestTransport, Transport};
use crate::catalog_service::CatalogService;
use crate::config::PortalConfig;
use crate::error::AppServicesError;
use crate::profile_service::ProfileService;
use crate::quiz_service::QuizLoopService;
use crate::results_service::ResultsService;

/// Assembles app-facing services over one transport and one session store.
#[derive(Clone)]
pub struct AppServices {
    clock: Clock,
    api: PortalApi,
    session: SessionStore,
    account: Arc<AccountService>,
    catalog: Arc<CatalogService>,
    quiz_loop: Arc<QuizLoopService>,
    results: Arc<ResultsService>,
    profile: Arc<ProfileService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage and the HTTP backend.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails, the API
    /// domain is not a valid URL, or the HTTP client cannot be built.
    pub async fn new_sqlite(
        db_url: &str,
        config: &PortalConfig,
        clock: Clock,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        let endpoints = Endpoints::parse(&config.api_domain)?;
        let transport = Arc::new(ReqwestTransport::new(config.http_timeout)?);
        tracing::info!(api = %endpoints.domain(), "services ready");
        Ok(Self::from_parts(storage, transport, endpoints, clock))
    }

    /// Build services over an in-memory store; used by tests and previews.
    #[must_use]
    pub fn in_memory(transport: Arc<dyn Transport>, endpoints: Endpoints, clock: Clock) -> Self {
        Self::from_parts(Storage::in_memory(), transport, endpoints, clock)
    }

    #[must_use]
    pub fn from_parts(
        storage: Storage,
        transport: Arc<dyn Transport>,
        endpoints: Endpoints,
        clock: Clock,
    ) -> Self {
        let session = SessionStore::new(Arc::clone(&storage.local));
        let api = PortalApi::new(transport, endpoints);

        let account = Arc::new(AccountService::new(clock, api.clone(), session.clone()));
        let catalog = Arc::new(CatalogService::new(api.clone(), session.clone()));
        let quiz_loop = Arc::new(QuizLoopService::new(api.clone(), session.clone()));
        let results = Arc::new(ResultsService::new(api.clone(), session.clone()));
        let profile = Arc::new(ProfileService::new(api.clone(), session.clone()));

        Self {
            clock,
            api,
            session,
            account,
            catalog,
            quiz_loop,
            results,
            profile,
        }
    }

    /// Replace the quiz service, e.g. to disable option shuffling.
    #[must_use]
    pub fn with_quiz_loop(mut self, quiz_loop: QuizLoopService) -> Self {
        self.quiz_loop = Arc::new(quiz_loop);
        self
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    #[must_use]
    pub fn api(&self) -> &PortalApi {
        &self.api
    }

    #[must_use]
    pub fn session(&self) -> SessionStore {
        self.session.clone()
    }

    #[must_use]
    pub fn account(&self) -> Arc<AccountService> {
        Arc::clone(&self.account)
    }

    #[must_use]
    pub fn catalog(&self) -> Arc<CatalogService> {
        Arc::clone(&self.catalog)
    }

    #[must_use]
    pub fn quiz_loop(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz_loop)
    }

    #[must_use]
    pub fn results(&self) -> Arc<ResultsService> {
        Arc::clone(&self.results)
    }

    #[must_use]
    pub fn profile(&self) -> Arc<ProfileService> {
        Arc::clone(&self.profile)
    }
}
