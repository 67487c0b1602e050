use std::io;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::{mpsc, oneshot};

use gamemng::core::{apply_event, EntryForm, SessionEvent, SessionState};
use gamemng::session::{
    run_receive_loop, ConnectionManager, ErrorKind, Framing, PlayerEntrySubmitter, SessionError,
};

fn connected_state() -> SessionState {
    let mut state = SessionState::new();
    state.mark_connected();
    state
}

async fn apply_next(
    rx: &mut mpsc::UnboundedReceiver<SessionEvent>,
    form: &mut EntryForm,
) -> Option<String> {
    let event = tokio::time::timeout(Duration::from_secs(2), rx.recv())
        .await
        .expect("no session event in time")
        .expect("event queue closed");
    apply_event(form, event)
}

#[tokio::test]
async fn server_text_drives_form_and_entry_is_sent_verbatim() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let accept = tokio::spawn(async move { listener.accept().await.unwrap().0 });

    let manager = ConnectionManager::connect("127.0.0.1", port, Some(Duration::from_secs(2)))
        .await
        .expect("connect failed");
    let mut server = accept.await.unwrap();
    let (inbound, outbound) = manager.split();

    let (tx, mut rx) = mpsc::unbounded_channel();
    let (_stop_tx, stop_rx) = oneshot::channel();
    let task = tokio::spawn(run_receive_loop(
        inbound,
        Framing::Raw,
        connected_state(),
        tx,
        stop_rx,
    ));
    let mut form = EntryForm::new();

    // status text
    server.write_all(b"Welcome").await.unwrap();
    assert!(apply_next(&mut rx, &mut form).await.is_none());
    assert!(apply_next(&mut rx, &mut form).await.is_none());
    assert_eq!(form.status_text(), "Welcome");
    assert!(form.input_enabled());

    // entry with a non-ASCII name
    let mut submitter = PlayerEntrySubmitter::new(outbound, Framing::Raw);
    submitter.submit("たろう", "Blue", "Lunatic").await.unwrap();

    let mut buf = vec![0u8; 1024];
    let n = tokio::time::timeout(Duration::from_secs(2), server.read(&mut buf))
        .await
        .unwrap()
        .unwrap();
    let text = std::str::from_utf8(&buf[..n]).unwrap();
    assert!(text.contains("\"name\":\"たろう\""), "name escaped: {text}");
    let v: serde_json::Value = serde_json::from_str(text).unwrap();
    assert_eq!(
        v,
        serde_json::json!({"startFlag": true, "name": "たろう", "team": 3, "difficulty": 4})
    );

    // sentinel
    server.write_all(b"esp_gamestart").await.unwrap();
    assert!(apply_next(&mut rx, &mut form).await.is_none());
    assert!(apply_next(&mut rx, &mut form).await.is_none());
    assert_eq!(form.status_text(), "esp_gamestart");
    assert!(!form.input_enabled());

    // peer close
    drop(server);
    let reason = loop {
        if let Some(reason) = apply_next(&mut rx, &mut form).await {
            break reason;
        }
    };
    assert!(!reason.is_empty());
    assert!(form.status_text().starts_with("Disconnected: "));

    let state = task.await.unwrap();
    assert!(state.is_closed());

    let err = submitter.submit("late", "Red", "Easy").await.unwrap_err();
    assert!(matches!(err, SessionError::SendOnClosed));
    assert_eq!(err.kind(), ErrorKind::Send);
}

#[tokio::test]
async fn socket_reset_locks_form_with_reason() {
    let mock = tokio_test::io::Builder::new()
        .read(b"Welcome")
        .read_error(io::Error::new(io::ErrorKind::ConnectionReset, "reset"))
        .build();
    let (inbound, mut outbound) = ConnectionManager::from_stream("127.0.0.1", 50000, mock).split();
    let (tx, mut rx) = mpsc::unbounded_channel();
    let (_stop_tx, stop_rx) = oneshot::channel();

    let state = run_receive_loop(inbound, Framing::Raw, connected_state(), tx, stop_rx).await;
    assert!(state.is_closed());

    let mut form = EntryForm::new();
    let mut reason = None;
    while let Ok(event) = rx.try_recv() {
        if let Some(r) = apply_event(&mut form, event) {
            reason = Some(r);
        }
    }

    let reason = reason.expect("session should report a close");
    assert!(reason.contains("reset"));
    assert!(!form.input_enabled());
    assert_eq!(form.status_text(), format!("Disconnected: {}", reason));

    assert!(matches!(
        outbound.send(b"{}").await,
        Err(SessionError::SendOnClosed)
    ));
}
