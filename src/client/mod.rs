//! Board API client

pub mod api;
pub mod gateway;
pub mod http;
pub mod models;

#[cfg(test)]
pub mod mock;

pub use api::{BoardApi, StageApi, TaskApi};
pub use gateway::ApiGateway;
pub use http::HttpBoardClient;
pub use models::{CreateStage, CreateTask, Stage, Task};

#[cfg(test)]
#[allow(unused_imports)]
pub use mock::MockBoardClient;
