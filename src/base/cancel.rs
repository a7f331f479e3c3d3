pub use tokio_util::sync::CancellationToken;

use super::AnalysisError;

/// Returns [`AnalysisError::Cancelled`] once `token` has been cancelled.
///
/// Long-running passes call this between top-level declarations.
pub fn check_cancelled(token: Option<&CancellationToken>) -> Result<(), AnalysisError> {
    match token {
        Some(token) if token.is_cancelled() => Err(AnalysisError::Cancelled),
        _ => Ok(()),
    }
}
