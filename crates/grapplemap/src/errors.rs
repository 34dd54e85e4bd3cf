use grapplemap_core::errors::{ConfigError, DatabaseError, ParseError, PathError, RandomPathError};
use thiserror::Error;

/// Anything that can stop a drill from being set up
#[derive(Debug, Error)]
pub enum DrillError {
    #[error(transparent)]
    Database(#[from] DatabaseError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("invalid path link: {0}")]
    Link(#[from] ParseError),
    #[error("invalid drill: {0}")]
    Path(#[from] PathError),
    #[error("could not generate a random drill: {0}")]
    RandomPath(#[from] RandomPathError),
    #[error("pass either --path or --random")]
    NoDrill,
}
