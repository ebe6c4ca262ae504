//! Logging bootstrap.
//!
//! Library code logs through the `log` facade; binaries and tests that
//! want output call [`init`] once. Honors `RUST_LOG`, defaulting to
//! `info`.

use std::sync::Once;

static INIT: Once = Once::new();

/// Install the `env_logger` backend. Safe to call more than once.
pub fn init() {
    INIT.call_once(|| {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
            .format_timestamp_millis()
            .init();
    });
}
