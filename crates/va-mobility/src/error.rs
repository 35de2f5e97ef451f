use thiserror::Error;

use va_core::CoreError;
use va_world::WorldError;

#[derive(Debug, Error)]
pub enum MobilityError {
    #[error("world rejected a step: {0}")]
    World(#[from] WorldError),

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type MobilityResult<T> = Result<T, MobilityError>;
