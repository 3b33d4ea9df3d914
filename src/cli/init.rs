//! Init command implementation

use colored::Colorize;
use dialoguer::{Confirm, Input, theme::ColorfulTheme};

use crate::client::api::StageApi;
use crate::client::HttpBoardClient;
use crate::config::Config;
use crate::error::Result;

/// Run the init command: prompt for the board API address, optionally probe
/// it, and write the config file.
pub async fn run(config_path: Option<&str>) -> Result<()> {
    println!("{}", "Welcome to boardop!".bold().green());
    println!("Let's point the CLI at your board API.\n");

    let mut config = Config::load_at(config_path)?;

    let base_url: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Board API base URL")
        .default(config.base_url.clone())
        .interact_text()?;
    config.base_url = base_url.trim_end_matches('/').to_string();

    let probe = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt("Check that the API is reachable now?")
        .default(true)
        .interact()?;

    if probe {
        println!("\n{}", "Probing the board API...".cyan());
        let client = HttpBoardClient::new(config.base_url.clone())?;
        match client.list_stages().await {
            Ok(stages) => println!("{} Found {} stages", "✓".green(), stages.len()),
            Err(err) => {
                println!("{} Probe failed: {}", "⚠".yellow(), err);
                println!("  Saving the configuration anyway.");
            }
        }
    }

    config.save_at(config_path)?;

    let path = Config::resolve_path(config_path)?;
    println!("\n{} Configuration saved to: {}", "✓".green(), path.display());

    println!("\n{}", "You're all set! Try running:".bold());
    println!("  {} - Show the board", "boardop board".cyan());
    println!("  {} - List active tasks", "boardop task list".cyan());

    Ok(())
}
