pub mod models;
pub mod representer;
pub mod routes;
pub mod store;

use async_trait::async_trait;
use axum::routing::{delete, get};
use axum::Router;
use folio_kernel::{InitCtx, Module};

use crate::state::AppState;

/// Job submitted after every successful create; refreshes the external SKU
/// index entry for the new title.
pub const UPDATE_SKU_JOB: &str = "books.update_sku";

/// Worker-side handler for [`UPDATE_SKU_JOB`].
pub async fn update_sku(args: serde_json::Value) -> anyhow::Result<()> {
    let title = args
        .get("title")
        .and_then(|value| value.as_str())
        .ok_or_else(|| anyhow::anyhow!("update_sku args missing title"))?;

    // The SKU index lives in an external system; the call goes here.
    tracing::info!(%title, "refreshing sku index entry");
    Ok(())
}

/// Books module: the catalog's public HTTP surface.
pub struct BooksModule {
    state: AppState,
}

impl BooksModule {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "books"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        Router::new()
            .route("/", get(routes::index).post(routes::create))
            .route("/{id}", delete(routes::destroy))
            .with_state(self.state.clone())
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module stopped");
        Ok(())
    }
}

/// Create a new instance of the books module
pub fn create_module(state: AppState) -> std::sync::Arc<dyn Module> {
    std::sync::Arc::new(BooksModule::new(state))
}
