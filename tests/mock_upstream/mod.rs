//! Scripted WebSocket mock for the upstream Xunfei TTS service.
//!
//! Accepts a single connection, captures the synthesis request frame the
//! client sends, then plays back a fixed frame script.

use futures_util::{SinkExt, StreamExt};
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio_tungstenite::{accept_async, tungstenite::Message};

pub enum UpstreamScript {
    /// Reply with the given frames after the request frame, then close.
    Frames(Vec<Value>),
    /// Read the request frame, then close without replying.
    CloseWithoutReply,
}

/// Spawn a single-connection scripted upstream.
///
/// Returns the `ws://` URL to hand to the client and a receiver yielding
/// the request frame the client sent.
pub async fn spawn_upstream(script: UpstreamScript) -> (String, oneshot::Receiver<Value>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (request_tx, request_rx) = oneshot::channel();

    tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let ws_stream = accept_async(stream).await.unwrap();
        let (mut write, mut read) = ws_stream.split();

        // The first inbound text frame is the synthesis request.
        let request = loop {
            match read.next().await {
                Some(Ok(Message::Text(text))) => {
                    break serde_json::from_str::<Value>(&text).unwrap();
                }
                Some(Ok(_)) => continue,
                other => panic!("Expected a request frame, got {other:?}"),
            }
        };
        let _ = request_tx.send(request);

        match script {
            UpstreamScript::Frames(frames) => {
                for frame in frames {
                    if write
                        .send(Message::Text(frame.to_string().into()))
                        .await
                        .is_err()
                    {
                        // Client went away mid-script.
                        return;
                    }
                }
                let _ = write.send(Message::Close(None)).await;
            }
            UpstreamScript::CloseWithoutReply => {
                let _ = write.send(Message::Close(None)).await;
            }
        }
    });

    (format!("ws://{addr}/v2/tts"), request_rx)
}
