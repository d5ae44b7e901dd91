//! Shared domain types for chatrelay.
//!
//! This crate contains the types shared by the conversation core, the
//! provider adapters and the Discord/HTTP front-ends: turns and user keys,
//! LLM request/response shapes, configuration, settings and their errors.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror, secrecy.

pub mod chat;
pub mod config;
pub mod error;
pub mod llm;
pub mod settings;
pub mod status;
