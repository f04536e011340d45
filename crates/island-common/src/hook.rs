//! The shared hook pipeline.
//!
//! Each hook binary is this pipeline parameterized by its compiled-in
//! source profile: read stdin, extract, normalize, send. Every failure is
//! recovered locally; the binaries own the exit/output contract.

use crate::extract::extract_object;
use crate::ipc::send_state;
use crate::profile::SourceProfile;
use crate::state::SessionState;
use std::io::Read;
use tracing::debug;

/// Extract and normalize one raw payload.
///
/// This is the core processing logic, split from stdin and socket I/O for
/// testability. Returns `None` when no object is recoverable.
pub fn process_input(input: &str, profile: &SourceProfile) -> Option<SessionState> {
    let raw = extract_object(input)?;
    Some(profile.normalize(&raw))
}

/// Run the whole pipeline for one invocation.
///
/// Unreadable stdin and unextractable payloads short-circuit to "nothing
/// to deliver"; delivery failures are logged and dropped.
pub fn run(profile: &SourceProfile) {
    let mut input = String::new();
    if std::io::stdin().read_to_string(&mut input).is_err() {
        debug!("stdin unreadable, nothing to deliver");
        return;
    }

    let Some(state) = process_input(&input, profile) else {
        debug!("no object recoverable from input");
        return;
    };

    if let Err(e) = send_state(&state) {
        debug!("delivery dropped: {e}");
    }
}
