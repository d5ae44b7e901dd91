//! Per-user conversation memory.
//!
//! - `ConversationStore`: bounded, FIFO-evicting history keyed by `UserKey`

pub mod store;
