//! Application layer for codechat.
//!
//! Coordinates the conversation log, editor context capture and the model
//! client into the send cycle a front-end drives.

pub mod chat_session;

pub use chat_session::{ChatSession, SendOutcome, SendPhase, THINKING_PLACEHOLDER};
