//! Wire models for the board API

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A task card on the board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Server-assigned task ID
    pub id: i64,

    /// ID of the owning stage
    #[serde(rename = "stageId")]
    pub stage_id: i64,

    /// Display label of the owning stage
    pub stage: String,

    /// Version tag the task targets
    pub version: String,

    /// Free-form description
    pub description: String,

    /// Card title
    pub title: String,

    /// Display position within the stage
    pub position: i64,

    /// Optional external Redmine ticket reference
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redmine: Option<i64>,

    /// Whether the task has been archived (soft-deleted from the active view)
    #[serde(rename = "isHistorized", default)]
    pub is_historized: bool,

    /// When the task was archived, if it has been
    #[serde(
        rename = "historizationDate",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub historization_date: Option<DateTime<Utc>>,
}

/// A stage (column) on the board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stage {
    /// Server-assigned stage ID
    pub id: i64,

    /// Column name
    pub name: String,

    /// Display position on the board
    pub position: i64,

    /// Tasks owned by this stage; populated on the list endpoint only
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tasks: Vec<Task>,
}

/// Payload for creating a stage; the server assigns the ID
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateStage {
    pub name: String,
    pub position: i64,
}

/// Payload for creating a task; the server assigns the ID and
/// initializes the historization fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTask {
    #[serde(rename = "stageId")]
    pub stage_id: i64,
    pub stage: String,
    pub version: String,
    pub description: String,
    pub title: String,
    pub position: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redmine: Option<i64>,
}

/// Confirmation body returned by the delete endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct DeleteResponse {
    #[allow(dead_code)]
    pub message: String,
}
