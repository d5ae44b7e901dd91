//! Infrastructure layer for chatrelay.
//!
//! Contains the implementations behind the ports defined in
//! `chatrelay-core`: the OpenAI-compatible LLM provider (OpenAI and Gemini)
//! and the layered configuration loader.

pub mod config;
pub mod llm;
