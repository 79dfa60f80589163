use std::sync::Arc;

use folio_auth::TokenService;
use folio_jobs::JobQueue;
use folio_kernel::settings::{Environment, Settings};

use crate::modules::books;
use crate::modules::books::store::{Catalog, MemoryCatalog};
use crate::modules::users::{MemoryDirectory, User, UserDirectory};

/// Shared application state handed to module routers.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn Catalog>,
    pub users: Arc<dyn UserDirectory>,
    pub tokens: TokenService,
    pub jobs: JobQueue,
}

impl AppState {
    /// Wire up stores, the token service, and the job worker from settings.
    pub fn from_settings(settings: &Settings) -> Self {
        let users = Arc::new(MemoryDirectory::new());

        // Outside production, make sure freshly minted tokens resolve to a
        // real user without any extra setup.
        if settings.environment != Environment::Production {
            users.insert(User {
                id: settings.auth.seed_user_id,
                name: "seed user".to_string(),
            });
            tracing::info!(user_id = settings.auth.seed_user_id, "seeded user");
        }

        let jobs = JobQueue::builder()
            .handler(books::UPDATE_SKU_JOB, books::update_sku)
            .spawn(settings.jobs.queue_capacity);

        Self {
            catalog: Arc::new(MemoryCatalog::new()),
            users,
            tokens: TokenService::new(&settings.auth.secret),
            jobs,
        }
    }
}
