//! Error taxonomy for a posting attempt.

use crate::llm::provider::DraftError;
use crate::pipeline::RejectReason;

#[derive(Debug, thiserror::Error)]
pub enum PosterError {
    /// The draft request never produced text. Passed through from the LLM
    /// layer without interpretation.
    #[error("draft request failed: {0}")]
    Network(#[from] DraftError),

    /// No persona memory exists for the requested scene, not even the base
    /// fallback.
    #[error("no persona memory available for scene '{scene}'")]
    PersonaUnavailable { scene: String },

    /// The repaired candidate failed the final validation gate.
    #[error("generated content rejected: {reason:?}")]
    ContentInvalid { reason: RejectReason },

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl PosterError {
    /// Whether requesting a fresh draft upstream could plausibly succeed.
    /// Persona and database problems won't be fixed by another model call.
    pub fn should_retry(&self) -> bool {
        matches!(self, Self::Network(_) | Self::ContentInvalid { .. })
    }
}
