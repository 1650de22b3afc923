//! Diagnostic logger — routes `log` records to stderr.
//!
//! Stdout is reserved for the single `Watermarked: <path>` line, so every
//! diagnostic goes to stderr. The default filter is `warn`; set `RUST_LOG`
//! (e.g. `RUST_LOG=debug`) to see font probing, canvas geometry and timings.
//!
//! Line format: `[2026-01-31T12:00:00Z] [LEVEL] message` (UTC, RFC 3339).

use std::io::Write;

use env_logger::Env;

/// Install the stderr logger. Safe to call more than once; later calls are no-ops.
pub fn init() {
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("warn"));
    builder.format(|buf, record| {
        let ts = buf.timestamp_seconds();
        writeln!(buf, "[{}] [{}] {}", ts, record.level(), record.args())
    });
    let _ = builder.try_init();
}
