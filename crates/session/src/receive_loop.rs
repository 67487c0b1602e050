//! Receive loop - the background half of the session.
//!
//! Reads chunks, cuts them into units, decodes, drives [`SessionState`] and
//! posts the resulting [`SessionEvent`]s to the UI queue. It never touches UI
//! state directly.

use tokio::io::AsyncRead;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use crate::codec::{decode, Framer};
use crate::config::Framing;
use crate::connection::{Connection, Inbound};
use crate::core::{SessionEvent, SessionState};
use crate::error::SessionError;
use crate::types::{Command, RECV_CHUNK_BYTES};

/// Run until the connection fails or `shutdown` fires (or its sender is dropped).
///
/// Returns the final state. After a failure it is `Closed`, and a
/// [`SessionEvent::Closed`] has been posted as the last event.
pub async fn run_receive_loop<R: AsyncRead + Unpin>(
    mut inbound: Inbound<R>,
    framing: Framing,
    mut state: SessionState,
    events: mpsc::UnboundedSender<SessionEvent>,
    mut shutdown: oneshot::Receiver<()>,
) -> SessionState {
    let mut framer = Framer::new(framing);
    let post = |notes: crate::core::Notifications| {
        for event in notes {
            // A gone UI loop is not an error for the reader.
            let _ = events.send(event);
        }
    };

    loop {
        let received = tokio::select! {
            _ = &mut shutdown => {
                debug!("receive loop cancelled");
                return state;
            }
            r = inbound.receive(RECV_CHUNK_BYTES) => r,
        };

        let outcome = match received {
            Ok(chunk) => {
                debug!(bytes = chunk.len(), "received chunk");
                framer.push(chunk, |unit| {
                    let command = decode(unit)?;
                    match &command {
                        Command::GameStart => info!("game started, entry locked"),
                        Command::StatusText(text) => debug!(%text, "status"),
                    }
                    post(state.apply(command));
                    Ok(())
                })
            }
            Err(e) => Err(e),
        };

        if let Err(e) = outcome {
            inbound.connection().mark_closed();
            report_fatal(inbound.connection(), &e);
            post(state.close(e.to_string()));
            return state;
        }
    }
}

fn report_fatal(connection: &Connection, e: &SessionError) {
    let (host, port) = (connection.host(), connection.port());
    match e {
        SessionError::PeerClosed => info!(host, port, "server closed the connection"),
        _ => warn!(host, port, error = %e, "receive loop terminated"),
    }
}
