//! Stage API operations

use async_trait::async_trait;

use crate::client::models::{CreateStage, Stage};
use crate::error::Result;

/// CRUD operations for stages (board columns)
#[async_trait]
pub trait StageApi: Send + Sync {
    /// List all stages with their nested tasks, ordered by id then position
    async fn list_stages(&self) -> Result<Vec<Stage>>;

    /// Fetch one stage by ID (without nested tasks)
    async fn get_stage(&self, id: i64) -> Result<Stage>;

    /// Create a stage; the server assigns the ID
    async fn create_stage(&self, stage: &CreateStage) -> Result<Stage>;

    /// Update a stage's name and position
    async fn update_stage(&self, stage: &Stage) -> Result<Stage>;

    /// Delete a stage permanently
    async fn delete_stage(&self, id: i64) -> Result<()>;
}
