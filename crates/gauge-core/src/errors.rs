//! Errors shared by the store and its callers. Provider and probe failures
//! live next to the code that absorbs them.

use thiserror::Error;

use crate::EntityId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("{entity} {id} does not exist")]
    NotFound { entity: &'static str, id: EntityId },

    /// Caller-supplied data rejected before it reached storage.
    #[error("invalid input: {0}")]
    Validation(String),
}
