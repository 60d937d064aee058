use mimalloc::MiMalloc;
use resource_images::config::{Config, DEFAULT_LOGLEVEL};
use tracing::error;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::from_filename(".env.local").ok();
    dotenvy::dotenv().ok();

    let cfg = Config::load();
    init_tracing(cfg.as_ref().map_or(DEFAULT_LOGLEVEL, |c| c.loglevel.as_str()));
    let cfg = cfg.inspect_err(|e| error!(error = %e, "Invalid configuration"))?;

    let mut stdout = std::io::stdout().lock();
    resource_images::run(&cfg, &mut stdout)
        .await
        .inspect_err(|e| error!(error = %e, "Report failed"))?;
    Ok(())
}

fn init_tracing(loglevel: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(loglevel));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_level(true)
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}
