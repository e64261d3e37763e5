use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind};
use tokio::sync::{mpsc, watch};

/// Application events
#[derive(Debug)]
pub enum Event {
    /// Terminal key press
    Key(KeyEvent),
    /// Periodic tick for query polling
    Tick,
    /// A mutation invalidated the product list
    ProductsInvalidated,
}

/// Merges terminal input, a tick timer and cache invalidations into one stream
pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<Event>,
}

impl EventHandler {
    pub fn new(tick_rate: Duration, mut invalidations: watch::Receiver<u64>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        // crossterm polling blocks, keep it off the runtime workers
        let input_tx = tx.clone();
        tokio::task::spawn_blocking(move || {
            loop {
                let event = match event::poll(tick_rate) {
                    Ok(true) => match event::read() {
                        Ok(CrosstermEvent::Key(key)) if key.kind == KeyEventKind::Press => {
                            Event::Key(key)
                        }
                        Ok(_) => continue,
                        Err(e) => {
                            tracing::warn!(error = %e, "failed to read terminal event");
                            continue;
                        }
                    },
                    Ok(false) => Event::Tick,
                    Err(e) => {
                        tracing::error!(error = %e, "terminal event polling failed");
                        break;
                    }
                };
                if input_tx.send(event).is_err() {
                    break;
                }
            }
        });

        tokio::spawn(async move {
            while invalidations.changed().await.is_ok() {
                if tx.send(Event::ProductsInvalidated).is_err() {
                    break;
                }
            }
        });

        Self { rx }
    }

    /// Receive the next event
    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }
}
