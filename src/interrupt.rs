//! Ctrl+C handling.
//!
//! The first Ctrl+C cancels the run's token so the loop can print its final
//! statistics. A second one exits immediately with status 130.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use log::info;
use tokio_util::sync::CancellationToken;

/// Installs the process-wide Ctrl+C handler that cancels `token`.
///
/// # Errors
/// Returns an error if a handler is already registered or the signal cannot be hooked.
pub fn install(token: CancellationToken) -> Result<(), ctrlc::Error> {
    let seen = Arc::new(AtomicBool::new(false));
    ctrlc::set_handler(move || {
        if seen.swap(true, Ordering::SeqCst) {
            std::process::exit(130);
        }
        info!("interrupt received");
        token.cancel();
    })
}
