//! Error types for the weather client and voice capture

use thiserror::Error;

use crate::state::FetchError;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("location not found: {0}")]
    NotFound(String),

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("provider error {code}: {message}")]
    Provider { code: i64, message: String },

    #[error("missing credential for {0}")]
    MissingCredential(&'static str),
}

impl ClientError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

impl From<ClientError> for FetchError {
    /// Anything but "not found" is a failed flow; provider codes other than
    /// 200/404 display like an unreachable service.
    fn from(error: ClientError) -> Self {
        match error {
            ClientError::Malformed(msg) => FetchError::Malformed(msg),
            other => FetchError::Transport(other.to_string()),
        }
    }
}

#[derive(Error, Debug)]
pub enum VoiceError {
    #[error("voice command is empty")]
    EmptyCommand,

    #[error("could not start voice command: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("voice command exited with {0}")]
    Exit(std::process::ExitStatus),

    #[error("no speech recognised")]
    NoTranscript,
}
