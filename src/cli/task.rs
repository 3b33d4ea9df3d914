//! Task command implementations

use colored::Colorize;
use tabled::Tabled;

use crate::cli::{CommandContext, OutputFormat};
use crate::client::models::{CreateTask, Task};
use crate::error::{Error, Result};
use crate::output::{json, table};

/// Task row for table display
#[derive(Tabled)]
struct TaskDisplay {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "TITLE")]
    title: String,
    #[tabled(rename = "STAGE")]
    stage: String,
    #[tabled(rename = "VERSION")]
    version: String,
    #[tabled(rename = "POSITION")]
    position: i64,
    #[tabled(rename = "REDMINE")]
    redmine: String,
    #[tabled(rename = "ARCHIVED")]
    archived: String,
}

impl From<&Task> for TaskDisplay {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id,
            title: task.title.clone(),
            stage: task.stage.clone(),
            version: task.version.clone(),
            position: task.position,
            redmine: task
                .redmine
                .map(|r| r.to_string())
                .unwrap_or_else(|| "-".to_string()),
            archived: task
                .historization_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| "-".to_string()),
        }
    }
}

fn print_tasks(ctx: &CommandContext, tasks: &[Task]) -> Result<()> {
    match ctx.format {
        OutputFormat::Table => {
            let rows: Vec<TaskDisplay> = tasks.iter().map(TaskDisplay::from).collect();
            println!("{}", table::format_table(&rows));
        }
        OutputFormat::Json => println!("{}", json::format_json(tasks)?),
    }
    Ok(())
}

/// Run the task list command; shows the active or historized projection
pub async fn list(ctx: &CommandContext, historized: bool) -> Result<()> {
    ctx.stores.tasks.load_all().await?;

    let tasks = if historized {
        ctx.stores.tasks.historized_tasks()
    } else {
        ctx.stores.tasks.active_tasks()
    }
    .unwrap_or_default();

    print_tasks(ctx, &tasks)
}

/// Run the task get command
pub async fn get(ctx: &CommandContext, id: i64) -> Result<()> {
    let task = ctx.stores.tasks.fetch_one(id).await?;

    match ctx.format {
        OutputFormat::Table => {
            let rows = vec![TaskDisplay::from(&task)];
            println!("{}", table::format_table(&rows));
        }
        OutputFormat::Json => println!("{}", json::format_json(&task)?),
    }

    Ok(())
}

/// Run the task create command
#[allow(clippy::too_many_arguments)]
pub async fn create(
    ctx: &CommandContext,
    stage_id: i64,
    title: String,
    description: String,
    version: String,
    position: i64,
    redmine: Option<i64>,
) -> Result<()> {
    // resolve the stage display label from the stage store
    let stage = ctx.stores.stages.fetch_one(stage_id).await?;

    let created = ctx
        .stores
        .tasks
        .create(&CreateTask {
            stage_id,
            stage: stage.name.clone(),
            version,
            description,
            title,
            position,
            redmine,
        })
        .await?;

    match ctx.format {
        OutputFormat::Table => println!(
            "{} Created task {} ({}) in stage {}",
            "✓".green(),
            created.title.bold(),
            created.id,
            stage.name
        ),
        OutputFormat::Json => println!("{}", json::format_json(&created)?),
    }

    Ok(())
}

/// Run the task update command
pub async fn update(
    ctx: &CommandContext,
    id: i64,
    title: Option<String>,
    description: Option<String>,
    version: Option<String>,
    position: Option<i64>,
    redmine: Option<i64>,
) -> Result<()> {
    let mut task = ctx.stores.tasks.fetch_one(id).await?;
    if let Some(title) = title {
        task.title = title;
    }
    if let Some(description) = description {
        task.description = description;
    }
    if let Some(version) = version {
        task.version = version;
    }
    if let Some(position) = position {
        task.position = position;
    }
    if let Some(redmine) = redmine {
        task.redmine = Some(redmine);
    }

    let updated = ctx.stores.tasks.update(&task).await?;

    match ctx.format {
        OutputFormat::Table => println!(
            "{} Updated task {} ({})",
            "✓".green(),
            updated.title.bold(),
            updated.id
        ),
        OutputFormat::Json => println!("{}", json::format_json(&updated)?),
    }

    Ok(())
}

/// Run the task move command: reassign the owning stage
pub async fn r#move(ctx: &CommandContext, id: i64, stage_id: i64) -> Result<()> {
    let target = ctx.stores.stages.fetch_one(stage_id).await?;

    let mut task = ctx.stores.tasks.fetch_one(id).await?;
    task.stage_id = target.id;
    task.stage = target.name.clone();

    let updated = ctx.stores.tasks.update(&task).await?;

    match ctx.format {
        OutputFormat::Table => println!(
            "{} Moved task {} ({}) to {}",
            "✓".green(),
            updated.title.bold(),
            updated.id,
            target.name.bold()
        ),
        OutputFormat::Json => println!("{}", json::format_json(&updated)?),
    }

    Ok(())
}

/// Run the task reorder command: positions follow the given id order
pub async fn reorder(ctx: &CommandContext, stage_id: i64, task_ids: Vec<i64>) -> Result<()> {
    let all = ctx.stores.tasks.load_all().await?;

    let mut batch = Vec::with_capacity(task_ids.len());
    for (index, id) in task_ids.iter().enumerate() {
        let Some(task) = all.iter().find(|t| t.id == *id) else {
            return Err(Error::Other(format!("task {id} not found")));
        };
        if task.stage_id != stage_id {
            return Err(Error::Other(format!(
                "task {id} is not in stage {stage_id}"
            )));
        }
        let mut task = task.clone();
        task.position = index as i64;
        batch.push(task);
    }

    let updated = ctx.stores.tasks.update_batch(&batch).await?;

    match ctx.format {
        OutputFormat::Table => {
            println!("{} Reordered {} tasks in stage {stage_id}", "✓".green(), updated.len())
        }
        OutputFormat::Json => println!("{}", json::format_json(&updated)?),
    }

    Ok(())
}

/// Run the task archive command
pub async fn archive(ctx: &CommandContext, id: i64) -> Result<()> {
    let archived = ctx.stores.tasks.archive(id).await?;

    match ctx.format {
        OutputFormat::Table => println!(
            "{} Archived task {} ({})",
            "✓".green(),
            archived.title.bold(),
            archived.id
        ),
        OutputFormat::Json => println!("{}", json::format_json(&archived)?),
    }

    Ok(())
}

/// Run the task delete command
pub async fn delete(ctx: &CommandContext, id: i64, yes: bool) -> Result<()> {
    if !yes {
        let confirmed = dialoguer::Confirm::new()
            .with_prompt(format!("Delete task {id} permanently?"))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("Aborted.");
            return Ok(());
        }
    }

    ctx.stores.tasks.delete(id).await?;
    println!("{} Deleted task {id}", "✓".green());

    Ok(())
}
