use thiserror::Error;

/// Errors surfaced by gateway operations.
///
/// The taxonomy is deliberately flat: callers only ever distinguish
/// "storage was never configured" from "the downstream call failed".
/// There is no transient/permanent split and no retry at this layer.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Object storage settings are absent or incomplete. The message names
    /// the missing settings so the caller sees a descriptive failure
    /// instead of a crash at startup.
    #[error("object storage is not configured: {0}")]
    NotConfigured(String),

    /// Storage settings are present but unusable (bad region, bad
    /// credentials format).
    #[error("invalid object storage configuration: {0}")]
    Config(String),

    /// The downstream storage call failed.
    #[error("object storage request failed: {0}")]
    Upstream(String),
}

pub type GatewayResult<T> = Result<T, GatewayError>;
