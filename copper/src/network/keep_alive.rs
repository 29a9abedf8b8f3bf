//! The per-session keep-alive task.

use std::sync::{
    Arc,
    atomic::{AtomicI64, Ordering},
};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use copper_protocol::packets::game::CKeepAlive;
use tokio::select;
use tokio_util::sync::CancellationToken;

use crate::network::Connection;

/// Interval between keep-alive probes.
const KEEP_ALIVE_INTERVAL: Duration = Duration::from_secs(10);

/// Spawns the keep-alive sender; returns the slot holding the id the
/// client is expected to echo.
pub fn spawn(connection: Arc<Connection>, cancel: CancellationToken) -> Arc<AtomicI64> {
    let last_id = Arc::new(AtomicI64::new(0));
    let task_last_id = Arc::clone(&last_id);

    tokio::spawn(async move {
        let mut interval = tokio::time::interval(KEEP_ALIVE_INTERVAL);
        // The first tick fires immediately; the client does not need a
        // probe right after login.
        interval.tick().await;

        loop {
            select! {
                () = cancel.cancelled() => break,
                _ = interval.tick() => {
                    let id = SystemTime::now()
                        .duration_since(UNIX_EPOCH)
                        .unwrap_or_default()
                        .as_millis() as i64;
                    task_last_id.store(id, Ordering::SeqCst);

                    log::trace!("Client {}: keep alive {id}", connection.id);
                    connection.send_bare_packet(&CKeepAlive { id }).await;
                }
            }
        }
    });

    last_id
}
