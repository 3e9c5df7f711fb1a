//! Shared helpers with no domain state.

pub mod code_generator;
pub mod retry;
pub mod target_url;
