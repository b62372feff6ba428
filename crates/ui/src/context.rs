use std::path::{Path, PathBuf};
use std::sync::Arc;

use services::{
    AccountService, CatalogService, Clock, ProfileService, QuizLoopService, ResultsService,
};
use url::Url;

pub trait UiApp: Send + Sync {
    fn clock(&self) -> Clock;
    /// Base URL that relative media paths (logos, covers, diagrams) hang off.
    fn media_domain(&self) -> Url;
    /// Where exported certificates are written.
    fn certificate_dir(&self) -> PathBuf;

    fn account(&self) -> Arc<AccountService>;
    fn catalog(&self) -> Arc<CatalogService>;
    fn quiz_loop(&self) -> Arc<QuizLoopService>;
    fn results(&self) -> Arc<ResultsService>;
    fn profile(&self) -> Arc<ProfileService>;
}

#[derive(Clone)]
pub struct AppContext {
    clock: Clock,
    media_domain: Url,
    certificate_dir: PathBuf,

    account: Arc<AccountService>,
    catalog: Arc<CatalogService>,
    quiz_loop: Arc<QuizLoopService>,
    results: Arc<ResultsService>,
    profile: Arc<ProfileService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            clock: app.clock(),
            media_domain: app.media_domain(),
            certificate_dir: app.certificate_dir(),
            account: app.account(),
            catalog: app.catalog(),
            quiz_loop: app.quiz_loop(),
            results: app.results(),
            profile: app.profile(),
        }
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    #[must_use]
    pub fn media_domain(&self) -> &Url {
        &self.media_domain
    }

    #[must_use]
    pub fn certificate_dir(&self) -> &Path {
        &self.certificate_dir
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

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
