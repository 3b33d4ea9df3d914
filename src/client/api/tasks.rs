//! Task API operations

use async_trait::async_trait;

use crate::client::models::{CreateTask, Task};
use crate::error::Result;

/// CRUD and historization operations for tasks (board cards)
#[async_trait]
pub trait TaskApi: Send + Sync {
    /// List all tasks
    async fn list_tasks(&self) -> Result<Vec<Task>>;

    /// Fetch one task by ID
    async fn get_task(&self, id: i64) -> Result<Task>;

    /// Create a task; the server assigns the ID and starts it un-historized
    async fn create_task(&self, task: &CreateTask) -> Result<Task>;

    /// Update a task with its full object
    async fn update_task(&self, task: &Task) -> Result<Task>;

    /// Batch-update tasks in one call.
    ///
    /// The response must be an array of updated tasks each carrying an `id`
    /// field; anything else is a format error.
    async fn update_tasks(&self, tasks: &[Task]) -> Result<Vec<Task>>;

    /// Mark a task historized server-side
    async fn historize_task(&self, id: i64) -> Result<()>;

    /// Delete a task permanently
    async fn delete_task(&self, id: i64) -> Result<()>;
}
