//! Viewer execution logic with reconnection support.

use std::time::Duration;

use crate::{error::ClientError, identity::IdentityStore, reconciler::Reconciler, ui};

use super::{
    TerminalPlatform, TerminalPresentation, ViewerConfig,
    session::{ViewerSession, run_viewer_session},
};

const MAX_RECONNECT_ATTEMPTS: u32 = 5;
const RECONNECT_INTERVAL_SECS: u64 = 5;

/// Run the viewer with reconnection logic
///
/// Each connection gets a fresh reconciler; the previous one is torn down
/// first, and the new one converges from the greeting snapshot.
pub async fn run_viewer(config: ViewerConfig) -> Result<(), ClientError> {
    let store = IdentityStore::new(&config.identity_file);
    let mut name = store.resolve(config.name.clone());
    let mut input_rx = ui::spawn_line_reader(name.clone().unwrap_or_else(|| "viewer".to_string()));
    let mut reconnect_count = 0;

    loop {
        tracing::info!(
            "Attempting to connect to {} as '{}' (attempt {}/{})",
            config.url,
            name.as_deref().unwrap_or("Anonymous"),
            reconnect_count + 1,
            MAX_RECONNECT_ATTEMPTS
        );

        let reconciler = Reconciler::new(
            Box::new(TerminalPlatform::new()),
            Box::new(TerminalPresentation),
            config.viewport,
        );
        let mut session = ViewerSession::new(reconciler, store.clone());

        let result = run_viewer_session(&config, &mut session, name.clone(), &mut input_rx).await;
        session.teardown();

        match result {
            Ok(()) => {
                tracing::info!("Viewer session ended normally");
                // If connection ended normally (user exit), don't reconnect
                break;
            }
            Err(e) => {
                tracing::warn!("Connection lost: {}", e);
                reconnect_count += 1;

                if reconnect_count >= MAX_RECONNECT_ATTEMPTS {
                    tracing::error!(
                        "Failed to reconnect after {} attempts. Exiting.",
                        MAX_RECONNECT_ATTEMPTS
                    );
                    return Err(e);
                }

                tracing::info!(
                    "Reconnecting in {} seconds... (attempt {}/{})",
                    RECONNECT_INTERVAL_SECS,
                    reconnect_count + 1,
                    MAX_RECONNECT_ATTEMPTS
                );

                tokio::time::sleep(Duration::from_secs(RECONNECT_INTERVAL_SECS)).await;
                // Pick up a name changed with /name during the lost session
                name = store.resolve(None).or(name);
            }
        }
    }

    Ok(())
}
