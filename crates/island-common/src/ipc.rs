//! Fire-and-forget delivery to the status display.
//!
//! One raw JSON object per connection, no framing, no acknowledgement,
//! no retry. The display is a best-effort status surface, not a system
//! of record, so a failed send is simply dropped.

use crate::state::SessionState;
use std::io::Write;
use std::os::unix::net::UnixStream;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Socket name the status display listens on
pub const SOCKET_NAME: &str = "claude-island.sock";

/// Bound on the connect-and-write call
pub const SEND_TIMEOUT: Duration = Duration::from_secs(5);

/// Fixed, well-known socket path of the display process.
pub fn socket_path() -> PathBuf {
    std::env::temp_dir().join(SOCKET_NAME)
}

/// Why a send did not happen. Callers log and drop it.
#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("failed to serialize state: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("display socket unavailable: {0}")]
    Socket(#[from] std::io::Error),
}

/// Send one state record to the display socket.
pub fn send_state(state: &SessionState) -> Result<(), DeliveryError> {
    send_state_to(&socket_path(), state)
}

/// Send to an explicit socket path. Split out so tests can bind their own
/// listener.
pub fn send_state_to(path: &Path, state: &SessionState) -> Result<(), DeliveryError> {
    let payload = serde_json::to_vec(state)?;

    let mut stream = UnixStream::connect(path)?;
    stream.set_read_timeout(Some(SEND_TIMEOUT))?;
    stream.set_write_timeout(Some(SEND_TIMEOUT))?;
    stream.write_all(&payload)?;
    stream.flush()?;

    Ok(())
}
