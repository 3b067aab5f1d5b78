//! Type conversions for ImportError

use super::types::ImportError;
use tokio::task::JoinError;

impl From<JoinError> for ImportError {
    fn from(err: JoinError) -> Self {
        if err.is_panic() {
            ImportError::Internal(format!("Import task panicked: {}", err))
        } else {
            ImportError::Internal(format!("Import task was cancelled: {}", err))
        }
    }
}
