//! Game management client (default binary).
//!
//! Connects to the game-control server once, then runs the player-entry form
//! in the terminal until the user quits or the connection ends. Losing the
//! connection is fatal: the terminal is restored and the reason is printed.

use std::fs::OpenOptions;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use gamemng::core::{EntryForm, FormOutcome, UiAdapter};
use gamemng::input::handle_key_event;
use gamemng::session::{ClientConfig, PumpOutcome, Session};
use gamemng::term::{FormView, FrameBuffer, Screen, Viewport};

const WINDOW_TITLE: &str = "Game Management - Trinity Bullet";

/// Input poll interval; also bounds how late a server message is shown.
const POLL_MS: u64 = 50;

fn main() -> Result<()> {
    let config = ClientConfig::from_env();
    init_tracing(config.log_path.as_deref())?;

    println!("Connecting... host: {} port: {}", config.host, config.port);
    let mut session = Session::connect(&config)
        .with_context(|| format!("cannot connect to server at {}", config.endpoint()))?;
    println!("Connect! host: {} port: {}", config.host, config.port);
    tracing::info!(endpoint = %config.endpoint(), framing = ?config.framing, "session started");

    let mut screen = Screen::new();
    screen.enter(WINDOW_TITLE)?;

    let result = run(&mut screen, &mut session);

    // Always try to restore terminal state.
    let _ = screen.leave();
    result
}

fn run(screen: &mut Screen, session: &mut Session) -> Result<()> {
    let view = FormView::new();
    let mut form = EntryForm::new();
    let mut fb = FrameBuffer::new(0, 0);
    let mut drawn: Option<u64> = None;

    loop {
        // Server events first so a lock lands before the next key is handled.
        if let PumpOutcome::Closed(reason) = session.pump(&mut form) {
            tracing::error!(%reason, "session closed");
            bail!("connection to server lost: {}", reason);
        }

        if drawn != Some(form.revision()) {
            let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
            view.render_into(&form, Viewport::new(w, h), &mut fb);
            screen.present(&mut fb)?;
            drawn = Some(form.revision());
        }

        if !event::poll(Duration::from_millis(POLL_MS))? {
            continue;
        }

        match event::read()? {
            Event::Key(key) if key.kind != KeyEventKind::Release => {
                let Some(action) = handle_key_event(key) else {
                    continue;
                };
                match form.apply(action) {
                    FormOutcome::Quit => return Ok(()),
                    FormOutcome::Submit(entry) => {
                        if let Err(e) = session.submit(&entry) {
                            form.set_status_text(&format!("Send failed: {}", e));
                        }
                    }
                    FormOutcome::Changed | FormOutcome::Unchanged => {}
                }
            }
            Event::Resize(..) => {
                screen.invalidate();
                drawn = None;
            }
            _ => {}
        }
    }
}

/// Send tracing output to `log_path`. Without a path nothing is installed,
/// since stdout/stderr belong to the form while it runs.
fn init_tracing(log_path: Option<&str>) -> Result<()> {
    let Some(path) = log_path else {
        return Ok(());
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("cannot open log file {}", path))?;

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gamemng=info,gamemng_session=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();
    Ok(())
}
