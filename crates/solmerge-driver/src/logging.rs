//! Logging configuration for solmerge
//!
//! The library logs through the `log` facade; binaries and tests pick the
//! backend by calling one of the initializers here (backed by `env_logger`).
//!
//! Levels:
//!
//! - `info!` - one line per merged root
//! - `debug!` - visited files, resolved imports
//! - `trace!` - skipped edges, deduplicated or suppressed items
//!
//! `RUST_LOG` takes precedence over the level passed by the caller:
//!
//! ```bash
//! RUST_LOG=debug solmerge merge contracts/Token.sol
//! RUST_LOG=solmerge_driver::walker=trace solmerge merge contracts/Token.sol
//! ```

use env_logger::{Builder, Env};
use log::LevelFilter;
use std::io::Write;
use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize logging at `Warn`. Subsequent calls are no-ops.
pub fn init() {
    init_with_level(LevelFilter::Warn);
}

/// Initialize logging with a default level, overridable through `RUST_LOG`.
///
/// This only initializes once; subsequent calls are no-ops.
pub fn init_with_level(level: LevelFilter) {
    INIT.call_once(|| {
        Builder::new()
            .filter_level(level)
            .parse_env(Env::default())
            .format(|buf, record| {
                writeln!(
                    buf,
                    "[{:5}] {} - {}",
                    record.level(),
                    record.target(),
                    record.args()
                )
            })
            .init();
    });
}

/// Maps a `-v` count to a level: 0 → warn, 1 → info, 2 → debug, 3+ → trace.
pub fn level_from_verbosity(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}
