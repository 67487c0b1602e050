//! Session runtime integration.
//!
//! Bridges the synchronous UI loop with the async connection: the receive
//! loop runs on a private tokio runtime, events come back through an
//! unbounded queue that only the UI loop drains, and submissions are written
//! synchronously from the UI thread.

use arrayvec::ArrayVec;
use tokio::io::WriteHalf;
use tokio::net::TcpStream;
use tokio::runtime::Runtime;
use tokio::sync::mpsc::error::TryRecvError;
use tokio::sync::{mpsc, oneshot};
use tracing::debug;

use crate::config::ClientConfig;
use crate::connection::{Connection, ConnectionManager, LinkStatus};
use crate::core::{apply_event, EntrySubmission, SessionEvent, SessionState, UiAdapter};
use crate::error::SessionError;
use crate::receive_loop::run_receive_loop;
use crate::submitter::PlayerEntrySubmitter;
use crate::types::PlayerRecord;

/// Upper bound on events applied per UI frame.
pub const MAX_EVENTS_PER_PUMP: usize = 32;

/// Result of draining the event queue once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PumpOutcome {
    Idle,
    Updated,
    Closed(String),
}

/// Running session.
pub struct Session {
    rt: Runtime,
    connection: Connection,
    events: mpsc::UnboundedReceiver<SessionEvent>,
    submitter: PlayerEntrySubmitter<WriteHalf<TcpStream>>,
    shutdown: Option<oneshot::Sender<()>>,
    closed: bool,
}

impl Session {
    /// Connect and start the receive loop.
    ///
    /// On failure nothing has been started: no state exists and no event
    /// will ever be posted.
    pub fn connect(config: &ClientConfig) -> Result<Self, SessionError> {
        let rt = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("gamemng-net")
            .enable_all()
            .build()
            .map_err(SessionError::Runtime)?;

        let manager = rt.block_on(ConnectionManager::connect(
            &config.host,
            config.port,
            config.connect_timeout,
        ))?;
        let connection = manager.connection().clone();
        let (inbound, outbound) = manager.split();

        let mut state = SessionState::new();
        state.mark_connected();

        let (event_tx, event_rx) = mpsc::unbounded_channel::<SessionEvent>();
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let framing = config.framing;

        rt.spawn(async move {
            let state = run_receive_loop(inbound, framing, state, event_tx, shutdown_rx).await;
            debug!(status = ?state.status(), "receive loop finished");
        });

        Ok(Self {
            rt,
            connection,
            events: event_rx,
            submitter: PlayerEntrySubmitter::new(outbound, framing),
            shutdown: Some(shutdown_tx),
            closed: false,
        })
    }

    pub fn connection(&self) -> &Connection {
        &self.connection
    }

    pub fn link_status(&self) -> LinkStatus {
        self.connection.status()
    }

    /// Take up to [`MAX_EVENTS_PER_PUMP`] pending events without blocking.
    ///
    /// If the receive task is gone without having reported a close, a
    /// synthetic `Closed` event is returned once.
    pub fn drain_events(&mut self) -> ArrayVec<SessionEvent, MAX_EVENTS_PER_PUMP> {
        let mut out = ArrayVec::new();
        while !out.is_full() {
            match self.events.try_recv() {
                Ok(event) => {
                    if matches!(event, SessionEvent::Closed { .. }) {
                        self.closed = true;
                    }
                    out.push(event);
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if !self.closed {
                        self.closed = true;
                        out.push(SessionEvent::Closed {
                            reason: "receive loop stopped".to_string(),
                        });
                    }
                    break;
                }
            }
        }
        out
    }

    /// Apply pending events to the UI adapter.
    pub fn pump<U: UiAdapter + ?Sized>(&mut self, ui: &mut U) -> PumpOutcome {
        let batch = self.drain_events();
        if batch.is_empty() {
            return PumpOutcome::Idle;
        }
        let mut outcome = PumpOutcome::Updated;
        for event in batch {
            if let Some(reason) = apply_event(ui, event) {
                outcome = PumpOutcome::Closed(reason);
            }
        }
        outcome
    }

    /// Send one entry from the UI thread. Blocks until the write returns.
    pub fn submit(&mut self, entry: &EntrySubmission) -> Result<PlayerRecord, SessionError> {
        let submitter = &mut self.submitter;
        self.rt
            .block_on(submitter.submit(&entry.name, &entry.team, &entry.difficulty))
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}
