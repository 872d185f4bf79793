use std::sync::Once;

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

static INIT: Once = Once::new();

/// Install the global subscriber.
///
/// Levels come from `RESONANCE_LOG` (e.g. `RESONANCE_LOG=resonance=debug`),
/// falling back to info for the library and the server binary. Safe to
/// call more than once.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env("RESONANCE_LOG")
            .unwrap_or_else(|_| EnvFilter::new("resonance=info,server=info"));

        tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .with(filter)
            .init();
    });
}
