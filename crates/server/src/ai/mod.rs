//! Model access: completion client and the fallback-aware gateway

pub mod client;
pub mod gateway;

pub use client::{CompletionClient, CompletionError};
pub use gateway::ModelGateway;
