use std::path::PathBuf;

use crate::modules::direction::Position;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to parse {}; {hint}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        hint: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("scene places two blocks at {0}")]
    DuplicatePosition(Position),

    #[error("no block at {0}")]
    EmptyCell(Position),

    #[error("block at {0} is not a native emitter")]
    NotAnEmitter(Position),

    #[error("invalid scene: {0}")]
    InvalidScene(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
