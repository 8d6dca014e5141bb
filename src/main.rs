use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use fairness_evaluator::datamodel::validate_file;
use fairness_evaluator::server;
use fairness_evaluator::service::ValidationService;

mod cli;

use cli::{Cli, Commands};

fn init_tracing() {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    // RUST_LOG takes precedence
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("info")
            .add_directive("fairness_evaluator=debug".parse().unwrap())
            .add_directive("tower_http=debug".parse().unwrap())
    });

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .compact()
        .with_line_number(false)
        .with_file(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve(args) => {
            let config = args.to_config().context("invalid server configuration")?;
            info!("[Server] starting with {:?}", config);
            server::serve(config, ValidationService::default())
                .await
                .context("server failed")?;
        }
        Commands::Validate { file, json } => {
            let verdict = validate_file(&file)
                .with_context(|| format!("failed to validate {}", file.display()))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&verdict)?);
            } else if verdict.is_valid() {
                println!("{}", verdict.message());
            } else {
                println!("Validation failed: {}", verdict.message());
            }
            if !verdict.is_valid() {
                std::process::exit(1);
            }
        }
    }
    Ok(())
}
