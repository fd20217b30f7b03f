use std::fs;

use anyhow::{Context, Result};
use clap::Parser;
use price_feed::providers::{
    PriceProvider, alpaca_rest::provider::AlpacaProvider, json_file::JsonFileProvider,
};
use seasonal_returns::{
    cli::{AnalyzeArgs, Cli, Commands, OutputFormat},
    config::{AppConfig, ProviderKind},
    run_analysis,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn build_provider(config: &AppConfig) -> Result<Box<dyn PriceProvider>> {
    let provider: Box<dyn PriceProvider> = match config.provider.kind {
        ProviderKind::Alpaca => Box::new(
            AlpacaProvider::with_settings(&config.provider.alpaca)
                .context("failed to set up the Alpaca provider")?,
        ),
        ProviderKind::JsonFile => Box::new(JsonFileProvider::new(config.provider.json_path()?)),
    };
    Ok(provider)
}

async fn analyze(config: AppConfig, args: AnalyzeArgs) -> Result<()> {
    let config = args.apply(config);
    let request = args.request(&config)?;
    let provider = build_provider(&config)?;

    let report = run_analysis(provider.as_ref(), &request)
        .await
        .with_context(|| format!("analysis of {} failed", request.symbol.trim()))?;

    if let Some(path) = &args.plot_json {
        fs::write(path, report.to_json()?)
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!(path = %path.display(), "wrote plot data");
    }

    match args.format {
        OutputFormat::Text => print!("{report}"),
        OutputFormat::Json => println!("{}", report.to_json()?),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config = AppConfig::load_or_default(cli.config.as_deref())?;

    match cli.command {
        Commands::Analyze(args) => analyze(config, args).await,
    }
}
