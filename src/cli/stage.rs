//! Stage command implementations

use colored::Colorize;
use tabled::Tabled;

use crate::cli::{CommandContext, OutputFormat};
use crate::client::models::{CreateStage, Stage};
use crate::error::Result;
use crate::output::{json, table};

/// Stage row for table display
#[derive(Tabled)]
struct StageDisplay {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "POSITION")]
    position: i64,
    #[tabled(rename = "TASKS")]
    tasks: usize,
}

impl From<&Stage> for StageDisplay {
    fn from(stage: &Stage) -> Self {
        Self {
            id: stage.id,
            name: stage.name.clone(),
            position: stage.position,
            tasks: stage.tasks.len(),
        }
    }
}

/// Run the stage list command
pub async fn list(ctx: &CommandContext) -> Result<()> {
    let stages = ctx.stores.stages.load_all().await?;

    match ctx.format {
        OutputFormat::Table => {
            let rows: Vec<StageDisplay> = stages.iter().map(StageDisplay::from).collect();
            println!("{}", table::format_table(&rows));
        }
        OutputFormat::Json => println!("{}", json::format_json(&stages)?),
    }

    Ok(())
}

/// Run the stage get command
pub async fn get(ctx: &CommandContext, id: i64) -> Result<()> {
    let stage = ctx.stores.stages.fetch_one(id).await?;

    match ctx.format {
        OutputFormat::Table => {
            let rows = vec![StageDisplay::from(&stage)];
            println!("{}", table::format_table(&rows));
        }
        OutputFormat::Json => println!("{}", json::format_json(&stage)?),
    }

    Ok(())
}

/// Run the stage create command
pub async fn create(ctx: &CommandContext, name: String, position: i64) -> Result<()> {
    let created = ctx
        .stores
        .stages
        .create(&CreateStage { name, position })
        .await?;

    match ctx.format {
        OutputFormat::Table => println!(
            "{} Created stage {} ({})",
            "✓".green(),
            created.name.bold(),
            created.id
        ),
        OutputFormat::Json => println!("{}", json::format_json(&created)?),
    }

    Ok(())
}

/// Run the stage update command
pub async fn update(
    ctx: &CommandContext,
    id: i64,
    name: Option<String>,
    position: Option<i64>,
) -> Result<()> {
    let mut stage = ctx.stores.stages.fetch_one(id).await?;
    if let Some(name) = name {
        stage.name = name;
    }
    if let Some(position) = position {
        stage.position = position;
    }

    let updated = ctx.stores.stages.update(&stage).await?;

    match ctx.format {
        OutputFormat::Table => println!(
            "{} Updated stage {} ({})",
            "✓".green(),
            updated.name.bold(),
            updated.id
        ),
        OutputFormat::Json => println!("{}", json::format_json(&updated)?),
    }

    Ok(())
}

/// Run the stage delete command
pub async fn delete(ctx: &CommandContext, id: i64, yes: bool) -> Result<()> {
    if !yes {
        let confirmed = dialoguer::Confirm::new()
            .with_prompt(format!("Delete stage {id} permanently?"))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("Aborted.");
            return Ok(());
        }
    }

    ctx.stores.stages.delete(id).await?;
    println!("{} Deleted stage {id}", "✓".green());

    Ok(())
}
