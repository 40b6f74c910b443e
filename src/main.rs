use anyhow::Context;
use clap::Parser;

use scanreport::cli::Cli;
use scanreport::config::{Config, CredentialStatus};
use scanreport::server::{init_tracing, ReportServer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let path = cli.config_path();
    let mut config = Config::load_from(&path)
        .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
    cli.apply_overrides(&mut config);
    config.validate()?;

    let credential = config.model.resolve_credential();

    if cli.check_config {
        print_summary(&config, &credential);
        return Ok(());
    }

    if let CredentialStatus::Unconfigured { reason } = &credential {
        tracing::warn!(reason = %reason, "Model API key missing; analyses will fail until it is set");
    }

    let mut server = ReportServer::new(&config, credential)?;
    let addr = server.try_bind(&config.server.bind_addr).await?;
    eprintln!("scanreport listening on http://{}", addr);

    server.run().await?;
    Ok(())
}

fn print_summary(config: &Config, credential: &CredentialStatus) {
    println!("Configuration OK");
    println!("  bind address:     {}", config.server.bind_addr);
    println!("  max upload bytes: {}", config.server.max_upload_bytes);
    println!("  model:            {}", config.model.model);
    println!("  model base url:   {}", config.model.base_url);
    match credential {
        CredentialStatus::Configured(key) => println!("  api key:          {}", key),
        CredentialStatus::Unconfigured { reason } => println!("  api key:          missing ({})", reason),
    }
}
