use thiserror::Error;

use spotlight_core::DomainError;

use crate::store::StoreError;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Failure of a front-desk operation.
///
/// Domain errors are recoverable: nothing was written and the caller can fix
/// the input and retry. A persistence error means memory and disk may disagree;
/// every operation reloads the collections from disk, so the next call starts
/// from what was actually stored.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("persistence failed: {0}")]
    Persistence(#[from] StoreError),
}

impl ServiceError {
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ServiceError::Domain(_))
    }

    pub fn domain(&self) -> Option<&DomainError> {
        match self {
            ServiceError::Domain(err) => Some(err),
            ServiceError::Persistence(_) => None,
        }
    }
}
