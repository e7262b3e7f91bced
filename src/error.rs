//! Error types
//!
//! Illegal commands are ignored, never errors. Only invalid configuration
//! (world bounds, gap that cannot fit) and best-score storage can fail.

/// Configuration errors surfaced synchronously when a run cannot start
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GameError {
    #[error("invalid world bounds {width}x{height}: both dimensions must be positive")]
    InvalidWorld { width: f32, height: f32 },

    #[error("gap of {gap_height} does not fit: only {available} of playable height after obstacle margins")]
    GapDoesNotFit { gap_height: f32, available: f32 },
}

/// Best-score store failures (never affect the simulation)
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}
