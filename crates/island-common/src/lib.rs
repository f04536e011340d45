//! Shared types for Island hook adapters
//!
//! Each supported coding agent gets its own hook binary. The binary is
//! invoked once per lifecycle event, reads the event payload from stdin,
//! recovers a JSON object from it (even when the pipeline mangles it),
//! normalizes it into a canonical session state, and sends that state to
//! the Island status display over a Unix socket.
//!
//! - extract: best-effort JSON extraction
//! - profile: per-agent field extraction rules
//! - state: canonical session state and status derivation
//! - ipc: fire-and-forget socket delivery
//! - hook: the shared pipeline the binaries call into

mod extract;
mod hook;
mod ipc;
mod profile;
mod state;

pub use extract::*;
pub use hook::*;
pub use ipc::*;
pub use profile::*;
pub use state::*;
