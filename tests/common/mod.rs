// tests/common/mod.rs

#![allow(dead_code)]

use std::time::Duration;

use ardour_surface_rpc::{
    //
    create_memory_transport,
    decode,
    ArdourClient,
    ClientConfig,
    MemoryServer,
    Message,
    Notification,
};
use tokio::sync::broadcast;
use tokio::time::timeout;

pub const WAIT: Duration = Duration::from_secs(2);

/// Client wired to an in-memory server.
pub async fn connect(config: ClientConfig) -> (ArdourClient, MemoryServer) {
    // ---
    init_logging();

    let (transport, server) = create_memory_transport(16);
    let client = ArdourClient::with_transport(transport, config)
        .await
        .expect("failed to create client");

    (client, server)
}

/// Next frame the client wrote, decoded.
pub async fn next_sent(server: &mut MemoryServer) -> Message {
    // ---
    let frame = timeout(WAIT, server.recv())
        .await
        .expect("timed out waiting for client frame")
        .expect("client closed the link");

    decode(&frame).expect("client wrote an undecodable frame")
}

/// Next push notification.
pub async fn next_push(rx: &mut broadcast::Receiver<Notification>) -> Notification {
    // ---
    timeout(WAIT, rx.recv())
        .await
        .expect("timed out waiting for push notification")
        .expect("push channel closed")
}

#[cfg(feature = "logging")]
mod imp {
    use std::sync::Once;

    use tracing_subscriber::EnvFilter;

    static INIT: Once = Once::new();

    pub fn init() {
        INIT.call_once(|| {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(EnvFilter::from_default_env())
                .with_test_writer()
                .try_init();
        });
    }
}

#[cfg(not(feature = "logging"))]
mod imp {
    #[inline]
    pub fn init() {}
}

pub fn init_logging() {
    imp::init();
}
