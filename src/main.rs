//! boardop - companion CLI for a local task-board API

use clap::Parser;

mod cli;
mod client;
mod config;
mod error;
mod output;
mod store;

use cli::{Cli, CommandContext, Commands, StageCommands, TaskCommands};
use config::Config;
use error::Result;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins; the config-file log level is the fallback filter
    let log_level = Config::load_at(cli.config.as_deref())
        .map(|config| config.log_level)
        .unwrap_or_else(|_| "warn".to_string());
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&log_level)).init();

    match cli.command {
        Commands::Init => cli::init::run(cli.config.as_deref()).await,
        Commands::Version => {
            println!("boardop version {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::Status => {
            let ctx = CommandContext::new(cli.format, cli.base_url.as_deref(), cli.config.as_deref())?;
            cli::status::run(&ctx, cli.config.as_deref()).await
        }
        Commands::Board => {
            let ctx = CommandContext::new(cli.format, cli.base_url.as_deref(), cli.config.as_deref())?;
            cli::board::run(&ctx).await
        }
        Commands::Stage(stage_cmd) => {
            let ctx = CommandContext::new(cli.format, cli.base_url.as_deref(), cli.config.as_deref())?;
            match stage_cmd {
                StageCommands::List => cli::stage::list(&ctx).await,
                StageCommands::Get { id } => cli::stage::get(&ctx, id).await,
                StageCommands::Create { name, position } => {
                    cli::stage::create(&ctx, name, position).await
                }
                StageCommands::Update { id, name, position } => {
                    cli::stage::update(&ctx, id, name, position).await
                }
                StageCommands::Delete { id, yes } => cli::stage::delete(&ctx, id, yes).await,
            }
        }
        Commands::Task(task_cmd) => {
            let ctx = CommandContext::new(cli.format, cli.base_url.as_deref(), cli.config.as_deref())?;
            match task_cmd {
                TaskCommands::List { historized } => cli::task::list(&ctx, historized).await,
                TaskCommands::Get { id } => cli::task::get(&ctx, id).await,
                TaskCommands::Create {
                    stage_id,
                    title,
                    description,
                    version,
                    position,
                    redmine,
                } => {
                    cli::task::create(&ctx, stage_id, title, description, version, position, redmine)
                        .await
                }
                TaskCommands::Update {
                    id,
                    title,
                    description,
                    version,
                    position,
                    redmine,
                } => cli::task::update(&ctx, id, title, description, version, position, redmine).await,
                TaskCommands::Move { id, stage } => cli::task::r#move(&ctx, id, stage).await,
                TaskCommands::Reorder { stage_id, task_ids } => {
                    cli::task::reorder(&ctx, stage_id, task_ids).await
                }
                TaskCommands::Archive { id } => cli::task::archive(&ctx, id).await,
                TaskCommands::Delete { id, yes } => cli::task::delete(&ctx, id, yes).await,
            }
        }
    }
}
