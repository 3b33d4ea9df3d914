//! HTTP implementation of the board API traits

use async_trait::async_trait;
use serde_json::{Value, json};

use super::api::{StageApi, TaskApi};
use super::gateway::ApiGateway;
use super::models::{CreateStage, CreateTask, DeleteResponse, Stage, Task};
use crate::error::{ApiError, Result};

/// Board API client backed by the HTTP gateway
#[derive(Debug, Clone)]
pub struct HttpBoardClient {
    gateway: ApiGateway,
}

impl HttpBoardClient {
    /// Create a client against the given base URL
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Ok(Self {
            gateway: ApiGateway::new(base_url)?,
        })
    }

    /// The configured base URL
    pub fn base_url(&self) -> &str {
        self.gateway.base_url()
    }
}

#[async_trait]
impl StageApi for HttpBoardClient {
    async fn list_stages(&self) -> Result<Vec<Stage>> {
        self.gateway.get("/stages").await
    }

    async fn get_stage(&self, id: i64) -> Result<Stage> {
        self.gateway.get(&format!("/stages/{id}")).await
    }

    async fn create_stage(&self, stage: &CreateStage) -> Result<Stage> {
        self.gateway.post("/stages", stage).await
    }

    async fn update_stage(&self, stage: &Stage) -> Result<Stage> {
        // The stage schema accepts name and position only; the nested
        // tasks are owned by the task endpoints.
        let body = json!({
            "name": stage.name,
            "position": stage.position,
        });
        self.gateway.patch(&format!("/stages/{}", stage.id), &body).await
    }

    async fn delete_stage(&self, id: i64) -> Result<()> {
        let _: DeleteResponse = self.gateway.delete(&format!("/stages/{id}")).await?;
        Ok(())
    }
}

#[async_trait]
impl TaskApi for HttpBoardClient {
    async fn list_tasks(&self) -> Result<Vec<Task>> {
        self.gateway.get("/tasks").await
    }

    async fn get_task(&self, id: i64) -> Result<Task> {
        self.gateway.get(&format!("/tasks/{id}")).await
    }

    async fn create_task(&self, task: &CreateTask) -> Result<Task> {
        self.gateway.post("/tasks", task).await
    }

    async fn update_task(&self, task: &Task) -> Result<Task> {
        self.gateway.patch(&format!("/tasks/{}", task.id), task).await
    }

    async fn update_tasks(&self, tasks: &[Task]) -> Result<Vec<Task>> {
        let raw: Vec<Value> = self.gateway.patch("/tasks/batch", tasks).await?;

        raw.into_iter()
            .enumerate()
            .map(|(index, value)| {
                if value.get("id").and_then(Value::as_i64).is_none() {
                    return Err(ApiError::Format(format!(
                        "batch element {index} is missing an id field"
                    ))
                    .into());
                }
                serde_json::from_value(value).map_err(|e| {
                    ApiError::InvalidResponse(format!("batch element {index}: {e}")).into()
                })
            })
            .collect()
    }

    async fn historize_task(&self, id: i64) -> Result<()> {
        // The store derives the historized value from its own cache; the
        // response body is irrelevant beyond confirming success.
        let _: Value = self.gateway.put(&format!("/tasks/{id}")).await?;
        Ok(())
    }

    async fn delete_task(&self, id: i64) -> Result<()> {
        let _: DeleteResponse = self.gateway.delete(&format!("/tasks/{id}")).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn task_json(id: i64, title: &str) -> Value {
        json!({
            "id": id,
            "stageId": 1,
            "stage": "Backlog",
            "version": "1.0",
            "description": "",
            "title": title,
            "position": 0,
            "isHistorized": false
        })
    }

    #[tokio::test]
    async fn test_list_stages_decodes_nested_tasks() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/stages")
            .with_status(200)
            .with_body(
                json!([
                    {"id": 1, "name": "Backlog", "position": 0, "tasks": [task_json(10, "First")]},
                    {"id": 2, "name": "Done", "position": 1, "tasks": []}
                ])
                .to_string(),
            )
            .create_async()
            .await;

        let client = HttpBoardClient::new(server.url()).expect("client");
        let stages = client.list_stages().await.expect("list");
        assert_eq!(stages.len(), 2);
        assert_eq!(stages[0].tasks[0].title, "First");
    }

    #[tokio::test]
    async fn test_update_stage_sends_partial_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PATCH", "/stages/3")
            .match_body(mockito::Matcher::Json(json!({
                "name": "Review",
                "position": 1
            })))
            .with_status(200)
            .with_body(json!({"id": 3, "name": "Review", "position": 1}).to_string())
            .create_async()
            .await;

        let client = HttpBoardClient::new(server.url()).expect("client");
        let stage = Stage {
            id: 3,
            name: "Review".to_string(),
            position: 1,
            tasks: Vec::new(),
        };
        let updated = client.update_stage(&stage).await.expect("update");
        assert_eq!(updated.name, "Review");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_update_tasks_rejects_element_without_id() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("PATCH", "/tasks/batch")
            .with_status(200)
            .with_body(json!([{"title": "no id here"}]).to_string())
            .create_async()
            .await;

        let client = HttpBoardClient::new(server.url()).expect("client");
        let task: Task = serde_json::from_value(task_json(1, "a")).expect("fixture");
        let err = client.update_tasks(&[task]).await.unwrap_err();

        assert!(matches!(err, Error::Api(ApiError::Format(_))));
    }

    #[tokio::test]
    async fn test_update_tasks_decodes_updated_collection() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("PATCH", "/tasks/batch")
            .with_status(200)
            .with_body(json!([task_json(1, "a2"), task_json(2, "b2")]).to_string())
            .create_async()
            .await;

        let client = HttpBoardClient::new(server.url()).expect("client");
        let tasks: Vec<Task> = vec![
            serde_json::from_value(task_json(1, "a")).expect("fixture"),
            serde_json::from_value(task_json(2, "b")).expect("fixture"),
        ];
        let updated = client.update_tasks(&tasks).await.expect("batch");
        assert_eq!(updated[0].title, "a2");
        assert_eq!(updated[1].title, "b2");
    }

    #[tokio::test]
    async fn test_delete_task_decodes_message() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("DELETE", "/tasks/9")
            .with_status(200)
            .with_body(json!({"message": "Tâche supprimée"}).to_string())
            .create_async()
            .await;

        let client = HttpBoardClient::new(server.url()).expect("client");
        client.delete_task(9).await.expect("delete");
    }

    #[tokio::test]
    async fn test_not_found_surfaces_transport_error() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/tasks/404")
            .with_status(404)
            .with_body(json!({"error": "Tâche non trouvée"}).to_string())
            .create_async()
            .await;

        let client = HttpBoardClient::new(server.url()).expect("client");
        let err = client.get_task(404).await.unwrap_err();

        match err {
            Error::Api(api_err) => assert_eq!(api_err.status(), Some(404)),
            other => panic!("expected API error, got: {other:?}"),
        }
    }
}
