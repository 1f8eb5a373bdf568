use clap::Args;
use tracing::info;

use crate::config::validation::ConfigValidator;
use crate::config::Config;
use crate::error::Result;
use crate::services::AppServices;

#[derive(Args)]
pub struct ServeArgs {
    /// Address to bind (overrides configuration)
    #[arg(short, long)]
    bind: Option<String>,

    /// Port to listen on (overrides configuration)
    #[arg(short, long)]
    port: Option<u16>,

    /// Number of worker threads (overrides configuration)
    #[arg(short, long)]
    workers: Option<usize>,
}

pub async fn execute(args: ServeArgs, mut config: Config) -> Result<()> {
    if let Some(bind) = args.bind {
        config.bind_address = bind;
    }
    if let Some(port) = args.port {
        ConfigValidator::validate_range(port, 1, u16::MAX, "port")?;
        config.port = port;
    }
    if let Some(workers) = args.workers {
        ConfigValidator::validate_range(workers, 1, 256, "workers")?;
        config.workers = Some(workers);
    }

    info!("Starting songscreen v{}", env!("CARGO_PKG_VERSION"));
    let services = AppServices::new(config)?;
    crate::http::run_server(services).await?;

    info!("Server stopped");
    Ok(())
}
