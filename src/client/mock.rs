//! Mock board API client for testing
//!
//! In-memory implementation of the API traits so store behavior can be
//! exercised without a network. Call counters let tests assert exactly how
//! many round trips an operation performed.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use super::api::{StageApi, TaskApi};
use super::models::{CreateStage, CreateTask, Stage, Task};
use crate::error::{ApiError, Result};

/// Mock API client holding server-side state in memory.
///
/// Configure fixtures via builder methods, then assert on
/// [`MockBoardClient::call_counts`].
pub struct MockBoardClient {
    stages: Mutex<Vec<Stage>>,
    tasks: Mutex<Vec<Task>>,
    /// Overrides the echo behavior of `update_tasks` when set
    batch_response: Mutex<Option<Vec<Task>>>,
    /// Error to return on the next call, consumed on first use
    error: Mutex<Option<ApiError>>,
    next_id: Mutex<i64>,
    calls: Mutex<CallCounts>,
}

/// API call counts for test verification
#[derive(Debug, Default, Clone)]
pub struct CallCounts {
    pub list_stages: usize,
    pub get_stage: usize,
    pub create_stage: usize,
    pub update_stage: usize,
    pub delete_stage: usize,
    pub list_tasks: usize,
    pub get_task: usize,
    pub create_task: usize,
    pub update_task: usize,
    pub update_tasks: usize,
    pub historize_task: usize,
    pub delete_task: usize,
}

impl Default for MockBoardClient {
    fn default() -> Self {
        Self {
            stages: Mutex::new(Vec::new()),
            tasks: Mutex::new(Vec::new()),
            batch_response: Mutex::new(None),
            error: Mutex::new(None),
            next_id: Mutex::new(1000),
            calls: Mutex::new(CallCounts::default()),
        }
    }
}

impl MockBoardClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stages(self, stages: Vec<Stage>) -> Self {
        *self.stages.lock().unwrap() = stages;
        self
    }

    pub fn with_tasks(self, tasks: Vec<Task>) -> Self {
        *self.tasks.lock().unwrap() = tasks;
        self
    }

    pub fn with_batch_response(self, tasks: Vec<Task>) -> Self {
        *self.batch_response.lock().unwrap() = Some(tasks);
        self
    }

    pub fn with_error(self, error: ApiError) -> Self {
        *self.error.lock().unwrap() = Some(error);
        self
    }

    pub fn call_counts(&self) -> CallCounts {
        self.calls.lock().unwrap().clone()
    }

    fn take_error(&self) -> Result<()> {
        if let Some(err) = self.error.lock().unwrap().take() {
            return Err(err.into());
        }
        Ok(())
    }

    fn not_found(what: &str) -> ApiError {
        ApiError::Transport {
            status: 404,
            status_text: "Not Found".to_string(),
            body: format!(r#"{{"error":"{what} not found"}}"#),
        }
    }

    fn assign_id(&self) -> i64 {
        let mut next = self.next_id.lock().unwrap();
        let id = *next;
        *next += 1;
        id
    }
}

#[async_trait]
impl StageApi for MockBoardClient {
    async fn list_stages(&self) -> Result<Vec<Stage>> {
        self.calls.lock().unwrap().list_stages += 1;
        self.take_error()?;
        Ok(self.stages.lock().unwrap().clone())
    }

    async fn get_stage(&self, id: i64) -> Result<Stage> {
        self.calls.lock().unwrap().get_stage += 1;
        self.take_error()?;
        self.stages
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or_else(|| Self::not_found("Stage").into())
    }

    async fn create_stage(&self, stage: &CreateStage) -> Result<Stage> {
        self.calls.lock().unwrap().create_stage += 1;
        self.take_error()?;
        let created = Stage {
            id: self.assign_id(),
            name: stage.name.clone(),
            position: stage.position,
            tasks: Vec::new(),
        };
        self.stages.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn update_stage(&self, stage: &Stage) -> Result<Stage> {
        self.calls.lock().unwrap().update_stage += 1;
        self.take_error()?;
        let mut stages = self.stages.lock().unwrap();
        if let Some(existing) = stages.iter_mut().find(|s| s.id == stage.id) {
            *existing = stage.clone();
        }
        Ok(stage.clone())
    }

    async fn delete_stage(&self, id: i64) -> Result<()> {
        self.calls.lock().unwrap().delete_stage += 1;
        self.take_error()?;
        self.stages.lock().unwrap().retain(|s| s.id != id);
        Ok(())
    }
}

#[async_trait]
impl TaskApi for MockBoardClient {
    async fn list_tasks(&self) -> Result<Vec<Task>> {
        self.calls.lock().unwrap().list_tasks += 1;
        self.take_error()?;
        Ok(self.tasks.lock().unwrap().clone())
    }

    async fn get_task(&self, id: i64) -> Result<Task> {
        self.calls.lock().unwrap().get_task += 1;
        self.take_error()?;
        self.tasks
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or_else(|| Self::not_found("Task").into())
    }

    async fn create_task(&self, task: &CreateTask) -> Result<Task> {
        self.calls.lock().unwrap().create_task += 1;
        self.take_error()?;
        let created = Task {
            id: self.assign_id(),
            stage_id: task.stage_id,
            stage: task.stage.clone(),
            version: task.version.clone(),
            description: task.description.clone(),
            title: task.title.clone(),
            position: task.position,
            redmine: task.redmine,
            is_historized: false,
            historization_date: None,
        };
        self.tasks.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn update_task(&self, task: &Task) -> Result<Task> {
        self.calls.lock().unwrap().update_task += 1;
        self.take_error()?;
        let mut tasks = self.tasks.lock().unwrap();
        if let Some(existing) = tasks.iter_mut().find(|t| t.id == task.id) {
            *existing = task.clone();
        }
        Ok(task.clone())
    }

    async fn update_tasks(&self, tasks: &[Task]) -> Result<Vec<Task>> {
        self.calls.lock().unwrap().update_tasks += 1;
        self.take_error()?;
        if let Some(response) = self.batch_response.lock().unwrap().clone() {
            return Ok(response);
        }
        Ok(tasks.to_vec())
    }

    async fn historize_task(&self, id: i64) -> Result<()> {
        self.calls.lock().unwrap().historize_task += 1;
        self.take_error()?;
        let mut tasks = self.tasks.lock().unwrap();
        if let Some(existing) = tasks.iter_mut().find(|t| t.id == id) {
            existing.is_historized = true;
            existing.historization_date = Some(Utc::now());
        }
        Ok(())
    }

    async fn delete_task(&self, id: i64) -> Result<()> {
        self.calls.lock().unwrap().delete_task += 1;
        self.take_error()?;
        self.tasks.lock().unwrap().retain(|t| t.id != id);
        Ok(())
    }
}
