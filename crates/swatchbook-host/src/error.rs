// ABOUTME: Error type for the host session and its message channels
// ABOUTME: Store failures and malformed messages surface here, never as panics

use swatchbook_core::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HostError {
    #[error("Host response channel closed")]
    ChannelClosed,

    #[error("Malformed host message: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Variable store error: {0}")]
    Store(#[from] StoreError),

    #[error("Request handler failed: {message}")]
    HandlerFailed { message: String },
}

impl HostError {
    pub fn handler_failed<S: Into<String>>(message: S) -> Self {
        Self::HandlerFailed {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, HostError>;
