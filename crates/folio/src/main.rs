//! Folio CLI binary.
//!
//! This binary provides command-line access to Folio:
//! - Create, clear and inspect Worlds
//! - Run single continuation rounds or a loop until the work ends
//! - Serve the HTTP transport

use clap::Parser;
use folio_core::FolioConfig;
use folio_error::FolioResult;
use folio_models::OpenAICompatibleClient;
use folio_narrative::ContinuationExecutor;
use folio_storage::FileSystemWorldStore;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

mod cli;

fn load_config(cli: &cli::Cli) -> FolioResult<FolioConfig> {
    match &cli.config {
        Some(path) => FolioConfig::from_file(path),
        None => FolioConfig::load(),
    }
}

fn build_executor(
    config: &FolioConfig,
    store: Arc<FileSystemWorldStore>,
    args: Option<&cli::GenerateArgs>,
) -> FolioResult<ContinuationExecutor<OpenAICompatibleClient>> {
    let client = OpenAICompatibleClient::from_provider_config(config.provider())?;
    let executor = ContinuationExecutor::from_config(client, store, config)?;
    Ok(match args.and_then(|a| a.protocol) {
        Some(protocol) => executor.with_protocol(protocol),
        None => executor,
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{
        Cli, Commands, RunOptions, build_request, clear_worlds, continue_once, create_world,
        handle_serve, read_description, run_story, show_world,
    };

    // Parse command-line arguments
    let cli = Cli::parse();

    // Initialize tracing; RUST_LOG wins over --verbose
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    dotenvy::dotenv().ok();

    let config = load_config(&cli)?;
    let store = Arc::new(FileSystemWorldStore::new(config.storage().data_dir())?);

    // Execute the requested command
    match cli.command {
        Commands::Create {
            name,
            description,
            description_file,
        } => {
            let description = read_description(description.as_deref(), description_file.as_deref())?;
            create_world(store.as_ref(), &name, description).await?;
        }

        Commands::Clear { name, all } => {
            clear_worlds(store.as_ref(), name.as_deref(), all).await?;
        }

        Commands::Show { name, raw } => {
            show_world(store.as_ref(), &name, raw).await?;
        }

        Commands::Continue(args) => {
            let executor = build_executor(&config, store, Some(&args))?;
            continue_once(&executor, &build_request(&args)?).await?;
        }

        Commands::Run {
            generate,
            output,
            fresh,
            pause,
            max_rounds,
            works,
        } => {
            let executor = build_executor(&config, store, Some(&generate))?;
            let options = RunOptions {
                output,
                fresh,
                pause,
                max_rounds,
                works,
            };
            run_story(&executor, &build_request(&generate)?, &options).await?;
        }

        Commands::Serve { bind } => {
            let executor = build_executor(&config, store, None)?;
            handle_serve(executor, &config, bind).await?;
        }
    }

    Ok(())
}
