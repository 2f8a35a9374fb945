// Server module entry point
// Listener setup, accept loop, connection handling, and shutdown signals

pub mod connection;
pub mod listener;
pub mod signal;

pub use listener::create_listener;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::config::Config;
use crate::logger;
use signal::SignalHandler;

/// Accept connections until a shutdown signal arrives.
///
/// Each accepted connection is served in its own task; the loop itself only
/// tracks the active connection count for the `max_connections` limit.
pub async fn run(
    listener: TcpListener,
    config: Arc<Config>,
    signals: &SignalHandler,
) -> Result<(), Box<dyn std::error::Error>> {
    let active_connections = Arc::new(AtomicUsize::new(0));

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        connection::accept_connection(
                            stream,
                            peer_addr,
                            &config,
                            &active_connections,
                        );
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            () = signals.shutdown.notified() => {
                logger::log_shutdown(active_connections.load(Ordering::SeqCst));
                break;
            }
        }
    }

    Ok(())
}
