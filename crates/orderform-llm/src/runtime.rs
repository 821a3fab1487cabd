//! Bridge from the synchronous provider trait to async HTTP clients

use crate::LlmError;
use std::future::Future;
use tokio::runtime::{Builder, Handle};

/// Drive `fut` to completion from synchronous code
///
/// On a tokio blocking-pool thread (where the extractor calls providers) the
/// ambient runtime is reused; outside any runtime a current-thread runtime is
/// built for the call. Must not be called from inside an async task.
pub(crate) fn block_on<F: Future>(fut: F) -> Result<F::Output, LlmError> {
    match Handle::try_current() {
        Ok(handle) => Ok(handle.block_on(fut)),
        Err(_) => {
            let runtime = Builder::new_current_thread()
                .enable_all()
                .build()
                .map_err(|e| LlmError::Other(format!("Failed to start runtime: {}", e)))?;
            Ok(runtime.block_on(fut))
        }
    }
}
