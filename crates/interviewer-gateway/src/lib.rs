//! interviewer-gateway: the session data gateway.
//!
//! Implements the `InterviewGateway` trait over HTTP, plus a scripted
//! in-memory gateway for tests, and loads client configuration.

pub mod config;
pub mod error;
pub mod http;
pub mod scripted;

pub use config::{create_gateway, load_config_from, InterviewerConfig};
pub use http::HttpGateway;
pub use scripted::ScriptedGateway;
