use anyhow::Context;
use folio::modules;
use folio::state::AppState;
use folio_kernel::settings::Settings;
use folio_kernel::{InitCtx, ModuleRegistry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().with_context(|| "failed to load folio settings")?;

    folio_telemetry::init(&settings.telemetry);

    tracing::info!(env = ?settings.environment, "folio bootstrap starting");

    let state = AppState::from_settings(&settings);

    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry, state);

    let ctx = InitCtx {
        settings: &settings,
    };
    registry.init_all(&ctx).await?;
    registry.start_all(&ctx).await?;

    tracing::info!("folio bootstrap complete");

    folio_http::start_server(&registry, &settings).await?;

    registry.stop_all().await?;

    Ok(())
}
