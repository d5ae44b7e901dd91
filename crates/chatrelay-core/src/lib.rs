//! Conversation core for chatrelay.
//!
//! Holds the only stateful, rule-bearing logic of the relay: bounded
//! per-user conversation memory, prompt assembly, splitting of long replies
//! for the chat transport, gateway liveness, and the dispatcher that ties
//! them to an LLM provider. It depends only on `chatrelay-types` -- never on
//! `chatrelay-infra` or any network/IO crate. Provider implementations plug
//! in through [`llm::provider::LlmProvider`].

pub mod chat;
pub mod llm;
pub mod memory;
pub mod settings;
pub mod status;
