use thiserror::Error;

/// Failures that abort building an episode page.
///
/// Mapping a raw episode either yields a complete view model or exactly one
/// of these; there is no partially mapped episode.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EpisodeError {
    #[error("Invalid publication date: {value}")]
    InvalidDate { value: String },

    #[error("Invalid episode duration: {value}")]
    InvalidDuration { value: String },

    #[error("Episode API unavailable: {reason}")]
    UpstreamUnavailable { reason: String },
}

impl EpisodeError {
    /// Wraps a transport or decode failure as an upstream outage.
    pub fn upstream(reason: impl std::fmt::Display) -> Self {
        EpisodeError::UpstreamUnavailable {
            reason: reason.to_string(),
        }
    }
}

pub type PageResult<T> = Result<T, EpisodeError>;
