//! Status command implementation

use colored::Colorize;

use crate::cli::CommandContext;
use crate::config::Config;
use crate::error::Result;

/// Run the status command to display configuration and connectivity
pub async fn run(ctx: &CommandContext, config_path: Option<&str>) -> Result<()> {
    println!("{}\n", "boardop Configuration Status".bold());

    let path = Config::resolve_path(config_path)?;
    if path.exists() {
        println!("Config file: {}", path.display().to_string().cyan());
    } else {
        println!(
            "Config file: {} {}",
            path.display().to_string().cyan(),
            "(not created yet, using defaults)".dimmed()
        );
    }

    println!("Board API: {}", ctx.config.base_url.cyan());
    println!("Cache TTL: {}s", ctx.config.cache_ttl_secs);

    // One listing call doubles as the connectivity probe
    match ctx.stores.stages.load_all().await {
        Ok(stages) => println!(
            "{} API reachable ({} {})",
            "✓".green(),
            stages.len(),
            if stages.len() == 1 { "stage" } else { "stages" }
        ),
        Err(err) => {
            println!("{} API unreachable: {}", "✗".red(), err);
            println!("  → Check that the board application is running");
        }
    }

    Ok(())
}
