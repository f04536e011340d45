//! Delivery integration tests against a real Unix socket listener.

use island_common::{SessionState, SessionStatus, send_state_to};
use std::io::Read;
use std::os::unix::net::UnixListener;
use std::thread;

fn sample_state() -> SessionState {
    SessionState {
        session_id: "550e8400-e29b-41d4-a716-446655440000".into(),
        cwd: "/home/u/project".into(),
        event: "preToolUse".into(),
        agent_type: "pi".into(),
        status: SessionStatus::RunningTool,
        transcript_path: Some("/home/u/sessions/s.jsonl".into()),
        tool: Some("Shell".into()),
        tool_input: Some(serde_json::json!({"command": "ls"})),
        tool_use_id: Some("toolu_01".into()),
        tool_display: Some("Bash".into()),
    }
}

#[test]
fn listener_receives_one_raw_json_object() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("island-test.sock");
    let listener = UnixListener::bind(&path).unwrap();

    let reader = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut buf = Vec::new();
        stream.read_to_end(&mut buf).unwrap();
        buf
    });

    let state = sample_state();
    send_state_to(&path, &state).unwrap();

    let received = reader.join().unwrap();
    // No framing: the bytes are exactly one serialized object
    let parsed: SessionState = serde_json::from_slice(&received).unwrap();
    assert_eq!(parsed, state);
}

#[test]
fn missing_socket_is_an_error_not_a_panic() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.sock");

    let result = send_state_to(&path, &sample_state());
    assert!(result.is_err());
}
