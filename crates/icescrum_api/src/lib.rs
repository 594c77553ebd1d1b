//! Typed iceScrum task web service client used by the task connector.

pub mod client;
pub mod config;
pub mod dates;
pub mod error;
pub mod mapper;
pub mod models;

pub use client::IceScrumClient;
pub use config::ClientConfig;
pub use dates::parse_timestamp;
pub use error::{IceScrumError, Result};
pub use mapper::map_task;
pub use models::{Classification, MissingField, NormalizedTask, RawTaskRecord, TaskStatus};
