//! End-to-end gateway tests against a local WebSocket server

use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::Utc;
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpListener;
use tokio_tungstenite::accept_async;
use tokio_tungstenite::tungstenite::Message;

use textlands_client::gateway::{self, GatewayState, GatewayStateObserver, PushEvent};
use textlands_protocol::{LandId, RequestError, RequestPayload, ResponseResult, ServerEvent};

async fn wait_for_state(observer: &GatewayStateObserver, target: GatewayState) {
    tokio::time::timeout(Duration::from_secs(10), async {
        loop {
            if observer.state() == target {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .unwrap_or_else(|_| panic!("timed out waiting for {target:?}"));
}

fn event_json(event: &ServerEvent) -> Message {
    Message::Text(serde_json::to_string(event).expect("serialize event"))
}

#[tokio::test]
async fn events_flow_in_order_and_requests_correlate() {
    let _ = tracing_subscriber::fmt().with_env_filter("info").try_init();

    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");

    // Server: once the request frame arrives, push three land-chat events
    // and then the response. The events precede the response on the wire,
    // so by the time the request resolves they must have been dispatched.
    tokio::spawn(async move {
        let (stream, _) = listener.accept().await.expect("accept");
        let mut ws = accept_async(stream).await.expect("handshake");

        while let Some(Ok(frame)) = ws.next().await {
            if let Message::Text(text) = frame {
                let value: serde_json::Value = serde_json::from_str(&text).expect("client frame");
                if value["type"] == "request" {
                    let land_id = LandId::new();
                    for text in ["one", "two", "three"] {
                        let event = ServerEvent::LandChatMessage {
                            land_id,
                            sender: "mira".into(),
                            text: text.into(),
                            sent_at: Utc::now(),
                        };
                        ws.send(event_json(&event)).await.expect("send event");
                    }

                    let request_id = value["request_id"].as_str().expect("request id").to_string();
                    let response = ServerEvent::Response {
                        request_id,
                        result: ResponseResult::success_empty(),
                    };
                    ws.send(event_json(&response)).await.expect("send response");
                }
            }
        }
    });

    let gateway = gateway::connect(&format!("ws://{addr}")).expect("gateway");
    wait_for_state(&gateway.state_observer, GatewayState::Connected).await;

    let seen = Arc::new(Mutex::new(Vec::new()));
    let seen_clone = Arc::clone(&seen);
    gateway
        .event_bus
        .subscribe(move |event| {
            if let PushEvent::Chat { text, .. } = event {
                seen_clone
                    .lock()
                    .unwrap_or_else(|p| p.into_inner())
                    .push(text);
            }
        })
        .await;

    let result = gateway
        .command_bus
        .request_with_timeout(
            RequestPayload::SubmitCommand {
                command: "look".into(),
            },
            5_000,
        )
        .await
        .expect("response");
    assert!(result.is_success());

    // The bridge processes frames sequentially: the resolved response
    // proves all three events went through dispatch first, in order.
    let texts = seen.lock().unwrap_or_else(|p| p.into_inner()).clone();
    assert_eq!(texts, vec!["one", "two", "three"]);

    gateway.handle.disconnect();
    wait_for_state(&gateway.state_observer, GatewayState::Disconnected).await;
}

#[tokio::test]
async fn disconnect_cancels_pending_and_fails_later_sends() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");

    // Server: accept and read frames but never answer.
    tokio::spawn(async move {
        let (stream, _) = listener.accept().await.expect("accept");
        let mut ws = accept_async(stream).await.expect("handshake");
        while let Some(Ok(_)) = ws.next().await {}
    });

    let gateway = gateway::connect(&format!("ws://{addr}")).expect("gateway");
    wait_for_state(&gateway.state_observer, GatewayState::Connected).await;

    let bus = gateway.command_bus.clone();
    let pending =
        tokio::spawn(async move { bus.request(RequestPayload::LeaveWorld).await });

    // Give the request time to hit the wire before tearing down.
    tokio::time::sleep(Duration::from_millis(100)).await;
    gateway.handle.disconnect();
    wait_for_state(&gateway.state_observer, GatewayState::Disconnected).await;

    // At-most-once: the caller learns the action is unconfirmed.
    assert_eq!(
        pending.await.expect("join"),
        Err(RequestError::Cancelled)
    );

    // Sends after teardown fail fast.
    assert_eq!(
        gateway
            .command_bus
            .send(textlands_protocol::ClientMessage::Heartbeat),
        Err(RequestError::NotConnected)
    );
}

#[tokio::test]
async fn reconnects_after_unexpected_close() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");

    // Server: drop the first connection immediately, keep the second.
    tokio::spawn(async move {
        let (stream, _) = listener.accept().await.expect("accept first");
        let ws = accept_async(stream).await.expect("handshake");
        drop(ws);

        let (stream, _) = listener.accept().await.expect("accept second");
        let mut ws = accept_async(stream).await.expect("handshake");
        while let Some(Ok(_)) = ws.next().await {}
    });

    let gateway = gateway::connect(&format!("ws://{addr}")).expect("gateway");

    // The first connection's Connected window is too short to poll for;
    // Reconnecting spans the whole backoff sleep, so it is the first state
    // this test can reliably observe. Connected after it means the second
    // connection is up.
    wait_for_state(&gateway.state_observer, GatewayState::Reconnecting).await;
    wait_for_state(&gateway.state_observer, GatewayState::Connected).await;

    gateway.handle.disconnect();
    wait_for_state(&gateway.state_observer, GatewayState::Disconnected).await;
}
