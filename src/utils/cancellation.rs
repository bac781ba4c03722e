//! Cooperative interruption
//!
//! The first Control-C cancels the given [`CancellationToken`]; the
//! orchestrator checks it between steps so the step in flight always
//! finishes and is reported. A second Control-C exits immediately.

use super::exit_codes::INTERRUPTED;
use tokio_util::sync::CancellationToken;
use tracing::warn;

/// Cancel `token` on Control-C; must be called inside a tokio runtime
pub fn install_ctrl_c_handler(token: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_err() {
            return;
        }
        warn!("interrupt received; stopping after the current step");
        token.cancel();

        if tokio::signal::ctrl_c().await.is_ok() {
            std::process::exit(INTERRUPTED);
        }
    });
}
