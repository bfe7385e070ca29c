//! Query and change the tempo against an in-process stand-in for the mixer.
//!
//! Run with `RUST_LOG=ardour_surface_rpc=trace` to see every frame.

use ardour_surface_rpc::{
    //
    create_memory_transport,
    decode,
    encode,
    ArdourClient,
    ClientConfig,
    Message,
    Node,
    Notification,
    Result,
    TypedValue,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // ---
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(true)
        .with_line_number(false)
        .init();

    let (transport, mut server) = create_memory_transport(16);

    // Fake mixer: remembers the tempo, answers queries, and echoes every
    // change back as a push notification the way the real surface does.
    let mixer = tokio::spawn(async move {
        // ---
        let mut bpm = 120.0;
        while let Some(frame) = server.recv().await {
            let Ok(msg) = decode(&frame) else { continue };
            if msg.node() != Node::TransportTempo {
                continue;
            }
            if let Some(new_bpm) = msg.val().first().and_then(TypedValue::as_f64) {
                bpm = new_bpm;
            }
            let state = Message::new(Node::TransportTempo, msg.addr().clone(), vec![bpm.into()]);
            match encode(&state) {
                Ok(text) => {
                    if server.push(text).await.is_err() {
                        break;
                    }
                }
                Err(_) => break,
            }
        }
    });

    let client = ArdourClient::with_transport(transport, ClientConfig::default()).await?;
    let mut push = client.subscribe();

    println!("tempo: {} bpm", client.tempo().await?);

    client.set_tempo(98.5).await?;
    if let Ok(Notification::Message(msg)) = push.recv().await {
        println!("push: {msg}");
    }

    println!("tempo: {} bpm", client.tempo().await?);

    client.close().await?;
    let _ = mixer.await;
    Ok(())
}
