//! World-boundary error type.

use thiserror::Error;

use va_core::{BlockPos, CoreError, HostileId, Material};

/// Errors produced by `va-world`.
#[derive(Debug, Error)]
pub enum WorldError {
    #[error("block {0} is outside the world's height range")]
    OutOfBounds(BlockPos),

    #[error("{0} is an item, not a block")]
    NotABlock(Material),

    #[error("hostile {0} not found")]
    HostileNotFound(HostileId),

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type WorldResult<T> = Result<T, WorldError>;
