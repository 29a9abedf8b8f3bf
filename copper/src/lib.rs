//! # Copper
//!
//! A from-scratch Minecraft Java Edition 1.21.10 server: offline mode,
//! one overworld, flat or noise terrain, item physics and inventories.

use std::sync::Arc;

use tokio::{net::TcpListener, select};
use tokio_util::{sync::CancellationToken, task::TaskTracker};

use crate::{network::Connection, server::Server};

pub mod config;
pub mod network;
pub mod server;

/// The accept loop and everything a running server owns.
pub struct CopperServer {
    tcp_listener: TcpListener,
    cancel_token: CancellationToken,
    client_id: u64,
    server: Arc<Server>,
    task_tracker: TaskTracker,
}

impl CopperServer {
    /// Binds the listener.
    ///
    /// # Errors
    /// - If the configured address cannot be bound.
    pub async fn new(
        server: Arc<Server>,
        cancel_token: CancellationToken,
    ) -> std::io::Result<Self> {
        let address = server.config.server_address;
        let tcp_listener = TcpListener::bind(address).await?;
        log::info!("Listening on {address}");

        Ok(Self {
            tcp_listener,
            cancel_token,
            client_id: 0,
            server,
            task_tracker: TaskTracker::new(),
        })
    }

    /// Accepts connections until the cancellation token fires, then waits
    /// for every session to wind down.
    pub async fn run(&mut self) {
        loop {
            select! {
                () = self.cancel_token.cancelled() => break,
                accept_result = self.tcp_listener.accept() => {
                    let Ok((stream, address)) = accept_result else {
                        continue;
                    };
                    if let Err(err) = stream.set_nodelay(true) {
                        log::warn!("Failed to set TCP_NODELAY: {err}");
                    }

                    let id = self.client_id;
                    self.client_id = self.client_id.wrapping_add(1);
                    log::info!("Accepted connection from {address} (client {id})");

                    let (connection, reader) = Connection::new(
                        stream,
                        address,
                        id,
                        self.cancel_token.child_token(),
                        Arc::clone(&self.server),
                    );

                    self.task_tracker.spawn(async move {
                        connection.run(reader).await;
                    });
                }
            }
        }

        self.task_tracker.close();
        self.task_tracker.wait().await;
        log::info!("All sessions closed");
    }
}
