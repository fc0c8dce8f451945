//! fibpool entry point.
//!
//! The first argument selects the run mode (`--block`, `--crash`, `--test`);
//! everything else is configured through `FIBPOOL_*` environment variables.
//! Worker output goes to stdout, diagnostics go to stderr.

use fibpool::{Harness, HarnessConfig, RunMode};
use fibpool_core::Reporter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr (stdout is the report stream)
    tracing_subscriber::registry()
        .with(
            EnvFilter::from_default_env()
                .add_directive("fibpool=info".parse()?)
                .add_directive("fibpool_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mode = RunMode::from_args(std::env::args().skip(1));

    let config = HarnessConfig::from_env();
    tracing::info!(?config, %mode, "Configuration loaded");
    config.validate()?;

    let harness = Harness::new(config, Reporter::stdout());
    let outcome = harness.run(mode).await?;

    tracing::info!(?outcome, "Harness finished");
    Ok(())
}
