//! Shared state and messaging between background work and the reader UI
//!
//! This module provides thread-safe shared state and message passing
//! for decode, recognition and lexicon warm-up results.

pub mod state;
pub mod messages;

pub use state::SharedAppState;
pub use messages::{reader_channel, MessageSender, ReaderMessage};
