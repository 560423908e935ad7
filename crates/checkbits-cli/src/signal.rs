//! Ctrl-C handling
//!
//! The first interrupt asks the running pass to stop after the current file,
//! so the work done so far is saved. A second one exits immediately; the
//! manifest on disk is still whole because it is only ever replaced by an
//! atomic rename.

use checkbits_core::CancellationToken;
use colored::Colorize;

use crate::commands::EXIT_INTERRUPTED;

/// Listen for interrupts on a background thread and cancel `token` on the
/// first one.
pub fn install(token: CancellationToken) {
    let spawned = std::thread::Builder::new()
        .name("checkbits-signal".into())
        .spawn(move || {
            let runtime = match tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            {
                Ok(runtime) => runtime,
                Err(e) => {
                    tracing::warn!("Interrupt handling unavailable: {}", e);
                    return;
                }
            };
            runtime.block_on(listen(token));
        });

    if let Err(e) = spawned {
        tracing::warn!("Could not start interrupt listener: {}", e);
    }
}

async fn listen(token: CancellationToken) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Interrupt handling unavailable: {}", e);
        return;
    }
    eprintln!(
        "{} finishing the current file and saving progress (press Ctrl-C again to abort)",
        "Interrupted:".yellow().bold()
    );
    token.cancel();

    if tokio::signal::ctrl_c().await.is_ok() {
        std::process::exit(EXIT_INTERRUPTED);
    }
}
