//! Domain types for codechat: the conversation log, editor context capture,
//! configuration and credential seams.

pub mod config;
pub mod context;
pub mod conversation;
pub mod error;
pub mod secret;

// Re-export common error type
pub use error::CodechatError;
