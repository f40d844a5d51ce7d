//! Event handling for the TUI.

use crossterm::event::{KeyEvent, KeyEventKind};
use futures::{FutureExt, StreamExt};
use std::time::Duration;
use tokio::sync::{mpsc, watch};

/// Events that can occur in the application.
#[derive(Debug, Clone)]
pub enum Event {
    /// A key was pressed
    Key(KeyEvent),
    /// A tick occurred (for animations/updates)
    Tick,
    /// Dashboard state changed; snapshots are stale
    Refresh,
}

/// Handles events from various sources.
pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<Event>,
    _tx: mpsc::UnboundedSender<Event>,
}

impl EventHandler {
    /// Create a new event handler.
    ///
    /// `revision` is the dashboard's change counter; every change is
    /// forwarded as [`Event::Refresh`] so the UI re-renders from a fresh
    /// snapshot (run completions arrive this way).
    pub fn new(mut revision: watch::Receiver<u64>) -> Self {
        let tick_rate = Duration::from_millis(100);
        let (tx, rx) = mpsc::unbounded_channel();
        let event_tx = tx.clone();

        // Spawn the event polling task
        tokio::spawn(async move {
            let mut reader = crossterm::event::EventStream::new();
            let mut interval = tokio::time::interval(tick_rate);

            loop {
                let crossterm_event = reader.next().fuse();
                let tick = interval.tick();

                tokio::select! {
                    maybe_event = crossterm_event => {
                        match maybe_event {
                            Some(Ok(evt)) => {
                                if let crossterm::event::Event::Key(key) = evt {
                                    // Only handle key press events, not release
                                    if key.kind == KeyEventKind::Press
                                        && event_tx.send(Event::Key(key)).is_err()
                                    {
                                        break;
                                    }
                                }
                            }
                            Some(Err(_)) => {}
                            None => break,
                        }
                    }
                    changed = revision.changed() => {
                        if changed.is_err() || event_tx.send(Event::Refresh).is_err() {
                            break;
                        }
                    }
                    _ = tick => {
                        if event_tx.send(Event::Tick).is_err() {
                            break;
                        }
                    }
                }
            }
        });

        Self { rx, _tx: tx }
    }

    /// Get the next event.
    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }
}
