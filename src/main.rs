use bizfun::adapter::inbound::cli::command::{Cli, Commands};
use bizfun::adapter::inbound::cli::output::{self, OutputConfig};
use bizfun::adapter::inbound::cli::{allowance, create, validate};
use bizfun::infrastructure::config::settings::Config;
use clap::Parser;
use miette::IntoDiagnostic;
use tracing::info;

#[tokio::main]
async fn main() -> miette::Result<()> {
    let _ = dotenvy::dotenv();
    let _ = rustls::crypto::ring::default_provider().install_default();

    let cli = Cli::parse();
    output::configure(OutputConfig::new(cli.json, cli.quiet));

    if let Commands::Validate(args) = &cli.command {
        return validate::execute(&args.proposal);
    }

    let config = Config::load(&cli.config).into_diagnostic()?;
    config.init_logging();
    output::header(env!("CARGO_PKG_VERSION"));
    info!(config = %cli.config.display(), "bizfun starting");

    match cli.command {
        Commands::Validate(_) => Ok(()),
        Commands::Allowance(args) => allowance::execute(&config, &args.proposal).await,
        Commands::Create(args) => create::execute(&config, &args.proposal, args.yes).await,
    }
}
