//! Board view: stages in order with their active tasks

use colored::Colorize;
use tabled::Tabled;

use crate::cli::{CommandContext, OutputFormat};
use crate::client::models::Task;
use crate::error::Result;
use crate::output::{json, table};

/// Compact card row for the per-stage tables
#[derive(Tabled)]
struct CardDisplay {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "TITLE")]
    title: String,
    #[tabled(rename = "VERSION")]
    version: String,
    #[tabled(rename = "REDMINE")]
    redmine: String,
}

impl From<&Task> for CardDisplay {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id,
            title: task.title.clone(),
            version: task.version.clone(),
            redmine: task
                .redmine
                .map(|r| r.to_string())
                .unwrap_or_else(|| "-".to_string()),
        }
    }
}

/// Run the board command.
///
/// One stage fetch populates both stores: the task store is seeded from the
/// nested payload, so the active projection below costs no extra round trip.
pub async fn run(ctx: &CommandContext) -> Result<()> {
    let stages = ctx.stores.stages.load_all().await?;
    let tasks = ctx.stores.tasks.active_tasks().unwrap_or_default();

    match ctx.format {
        OutputFormat::Json => {
            println!("{}", json::format_json(&stages)?);
        }
        OutputFormat::Table => {
            if stages.is_empty() {
                println!("The board has no stages yet. Try `boardop stage create`.");
                return Ok(());
            }

            for stage in &stages {
                let cards: Vec<CardDisplay> = tasks
                    .iter()
                    .filter(|t| t.stage_id == stage.id)
                    .map(CardDisplay::from)
                    .collect();

                println!(
                    "\n{} ({} {})",
                    stage.name.bold(),
                    cards.len(),
                    if cards.len() == 1 { "task" } else { "tasks" }
                );
                println!("{}", table::format_table(&cards));
            }
        }
    }

    Ok(())
}
