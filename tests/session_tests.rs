//! Session tests: user events and sandbox messages through one loop.

use std::time::Duration;

use jsx_live_preview::prelude::*;
use jsx_live_preview::{ParentPort, SessionHandle};

/// Helper to start a session over an attached frame.
fn start(config: PreviewConfig) -> (
    tokio::task::JoinHandle<PreviewHost<MemoryFrame>>,
    SessionHandle,
    ParentPort,
    MemoryFrame,
) {
    let (port, subscription) = error_channel();
    let frame = MemoryFrame::attached().with_parent(port.clone());
    let viewer = frame.clone();
    let host = PreviewHost::new(config, frame).unwrap();
    let (session, handle) = PreviewSession::new(host, subscription);
    (tokio::spawn(session.run()), handle, port, viewer)
}

/// A posted error is published to the session handle.
#[tokio::test]
async fn test_error_message_reaches_host() {
    let (task, mut handle, port, _viewer) = start(PreviewConfig::default());

    assert!(
        handle
            .send(HostEvent::Edit(
                "function App(){ throw new Error(\"boom\"); }".into()
            ))
            .await
    );
    port.post_compile_error("Error: boom");

    let shown = tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            match handle.error_changed().await {
                Some(ErrorDisplay::Showing(message)) => break message,
                Some(ErrorDisplay::Clear) => continue,
                None => panic!("session stopped"),
            }
        }
    })
    .await
    .expect("error should be published");
    assert_eq!(shown, "Error: boom");
    assert_eq!(handle.error(), ErrorDisplay::Showing("Error: boom".into()));

    drop(handle);
    let host = task.await.unwrap();
    assert_eq!(host.error().message(), Some("Error: boom"));
}

/// Messages posted before shutdown are still applied.
#[tokio::test]
async fn test_pending_messages_drain_on_shutdown() {
    let (task, handle, port, _viewer) = start(PreviewConfig::default());

    handle
        .send(HostEvent::Edit("function App() { return x; }".into()))
        .await;
    port.post(serde_json::json!({ "type": "LOG", "text": "noise" }));
    port.post_compile_error("ReferenceError: x is not defined");
    drop(handle);

    let host = task.await.unwrap();
    assert_eq!(
        host.error().message(),
        Some("ReferenceError: x is not defined")
    );
    // the subscription is released with the session
    assert!(!port.is_connected());
}

/// Repeated compile events with unchanged source reload once.
#[tokio::test]
async fn test_manual_mode_through_session() {
    let config = PreviewConfig::builder().auto_compile(false).build();
    let (task, handle, _port, viewer) = start(config);

    let edited = "function App() { return <p>later</p>; }";
    handle.send(HostEvent::Edit(edited.into())).await;
    handle.send(HostEvent::Compile).await;
    handle.send(HostEvent::Compile).await;
    drop(handle);

    let host = task.await.unwrap();
    assert_eq!(host.display_code(), edited);
    // mount plus exactly one compile that changed the source
    assert_eq!(viewer.generation(), 2);
    assert!(viewer.document().unwrap().contains("<p>later</p>"));
}

/// Pasting import-bearing code recompiles and notifies.
#[test]
fn test_paste_event_with_imports() {
    tokio_test::block_on(async {
        let (port, subscription) = error_channel();
        let host = PreviewHost::new(
            PreviewConfig::default(),
            MemoryFrame::attached().with_parent(port),
        )
        .unwrap();
        let (session, handle) = PreviewSession::new(host, subscription);

        let pasted = "import { useState } from 'react';\nfunction App() { return <b/>; }";
        handle.send(HostEvent::Paste(pasted.into())).await;
        drop(handle);

        let mut host = session.run().await;
        assert_eq!(host.display_code(), pasted);
        let document = host.sandbox().document().unwrap();
        assert!(document.contains("\"import { useState } from 'react';\""));
        assert!(host
            .take_notifications()
            .iter()
            .any(|n| n.title == "Code Pasted"));
    });
}
