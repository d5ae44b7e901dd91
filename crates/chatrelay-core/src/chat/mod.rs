//! The conversation exchange: prompt assembly, reply dispatch, and splitting
//! of long replies into transport-sized chunks.

pub mod dispatcher;
pub mod prompt;
pub mod splitter;
