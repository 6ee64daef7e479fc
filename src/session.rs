//! Async driver for a preview host.
//!
//! A session is the host's single thread of control: user events and sandbox
//! messages are applied one at a time from a single `select!` loop, so the
//! clear/assemble/load sequence never interleaves with an incoming error.

use tokio::sync::{mpsc, watch};

use crate::channel::Subscription;
use crate::host::{ErrorDisplay, PreviewHost};
use crate::sandbox::Sandbox;

/// A user action on the preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    /// The editor text changed.
    Edit(String),
    /// Text was pasted into the editor.
    Paste(String),
    /// The explicit compile action.
    Compile,
    /// A template was picked.
    SelectTemplate(String),
    /// The auto-compile switch was flipped.
    ToggleAutoCompile,
}

/// Sending half of a session.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    events: mpsc::Sender<HostEvent>,
    errors: watch::Receiver<ErrorDisplay>,
}

impl SessionHandle {
    /// Queue a user event. Returns `false` if the session has stopped.
    pub async fn send(&self, event: HostEvent) -> bool {
        self.events.send(event).await.is_ok()
    }

    /// The error display as of the last processed event or message.
    pub fn error(&self) -> ErrorDisplay {
        self.errors.borrow().clone()
    }

    /// Wait until the error display changes.
    pub async fn error_changed(&mut self) -> Option<ErrorDisplay> {
        self.errors.changed().await.ok()?;
        Some(self.errors.borrow_and_update().clone())
    }
}

/// A host together with its event queue and error subscription.
pub struct PreviewSession<S> {
    host: PreviewHost<S>,
    events: mpsc::Receiver<HostEvent>,
    messages: Subscription,
    errors: watch::Sender<ErrorDisplay>,
}

impl<S: Sandbox> PreviewSession<S> {
    /// Wrap `host`, listening for sandbox errors on `messages`.
    pub fn new(host: PreviewHost<S>, messages: Subscription) -> (Self, SessionHandle) {
        let (event_tx, event_rx) = mpsc::channel(64);
        let (error_tx, error_rx) = watch::channel(host.error().clone());
        let session = Self {
            host,
            events: event_rx,
            messages,
            errors: error_tx,
        };
        let handle = SessionHandle {
            events: event_tx,
            errors: error_rx,
        };
        (session, handle)
    }

    /// Mount the host and process events until every handle is dropped.
    ///
    /// Sandbox messages already posted at that point are still applied;
    /// then the subscription is released and the host is handed back.
    pub async fn run(mut self) -> PreviewHost<S> {
        self.host.mount();
        self.publish();

        let mut messages_open = true;
        loop {
            tokio::select! {
                biased;
                event = self.events.recv() => match event {
                    Some(event) => self.apply(event),
                    None => break,
                },
                message = self.messages.recv(), if messages_open => match message {
                    Some(error) => self.host.report(error),
                    None => messages_open = false,
                },
            }
            self.publish();
        }

        while let Some(error) = self.messages.try_recv() {
            self.host.report(error);
        }
        self.publish();

        let Self { host, messages, .. } = self;
        drop(messages);
        host
    }

    fn apply(&mut self, event: HostEvent) {
        match event {
            HostEvent::Edit(code) => self.host.edit(code),
            HostEvent::Paste(text) => {
                if !self.host.paste(&text) {
                    self.host.edit(text);
                }
            }
            HostEvent::Compile => self.host.compile(),
            HostEvent::SelectTemplate(key) => {
                if let Err(_err) = self.host.select_template(&key) {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(error = %_err, "ignoring template selection");
                }
            }
            HostEvent::ToggleAutoCompile => {
                self.host.toggle_auto_compile();
            }
        }
    }

    fn publish(&self) {
        self.errors.send_if_modified(|current| {
            if current == self.host.error() {
                false
            } else {
                *current = self.host.error().clone();
                true
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::error_channel;
    use crate::sandbox::config::PreviewConfig;
    use crate::sandbox::frame::MemoryFrame;

    #[tokio::test]
    async fn test_events_drive_host() {
        let (port, subscription) = error_channel();
        let frame = MemoryFrame::attached().with_parent(port);
        let host = PreviewHost::new(PreviewConfig::default(), frame).unwrap();
        let (session, handle) = PreviewSession::new(host, subscription);
        let task = tokio::spawn(session.run());

        assert!(handle.send(HostEvent::SelectTemplate("fetchData".into())).await);
        assert!(handle.send(HostEvent::ToggleAutoCompile).await);
        drop(handle);

        let host = task.await.unwrap();
        assert_eq!(host.selected_template(), "fetchData");
        assert!(!host.auto_compile());
        assert_eq!(host.loads(), 2);
    }

    #[tokio::test]
    async fn test_unknown_template_event_is_ignored() {
        let (_port, subscription) = error_channel();
        let host = PreviewHost::new(PreviewConfig::default(), MemoryFrame::attached()).unwrap();
        let (session, handle) = PreviewSession::new(host, subscription);
        let task = tokio::spawn(session.run());

        handle.send(HostEvent::SelectTemplate("missing".into())).await;
        drop(handle);

        let host = task.await.unwrap();
        assert_eq!(host.selected_template(), "counter");
    }
}
