//! Island Hook Handler — Pi coding agent
//!
//! Invoked by Pi once per hook event. Reads the event payload from stdin,
//! normalizes it with the Pi source profile, and sends the result to the
//! status display via Unix socket.
//!
//! Contract with the hook pipeline: always print `{}` to stdout, always
//! exit 0, never write to stderr.

use island_common::{PI, run};
use std::io::Write;
use tracing_subscriber::{EnvFilter, fmt};

/// Logging must never touch stderr, so the subscriber writes to the file
/// named by `ISLAND_HOOK_LOG` when set and to a sink otherwise.
fn init_tracing() {
    let filter = EnvFilter::try_from_env("ISLAND_HOOK_LOG_FILTER")
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let log_file = std::env::var("ISLAND_HOOK_LOG").ok().and_then(|path| {
        std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .ok()
    });

    match log_file {
        Some(file) => fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_ansi(false)
            .with_writer(std::sync::Mutex::new(file))
            .init(),
        None => fmt()
            .with_env_filter(filter)
            .with_writer(std::io::sink)
            .init(),
    }
}

fn main() {
    // The calling pipeline treats any panic message on stderr, non-empty
    // output, or non-zero exit as a hook failure.
    std::panic::set_hook(Box::new(|_| {}));
    init_tracing();

    let _ = std::panic::catch_unwind(|| run(&PI));

    let mut stdout = std::io::stdout();
    let _ = stdout.write_all(b"{}\n");
    let _ = stdout.flush();
}
