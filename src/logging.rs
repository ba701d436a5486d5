//! Browser console logging.
//!
//! The crate logs through the `log` facade; in the browser `console_log` is the
//! backend. Native builds (tests, tools) never call [`init`], so log macros
//! there are no-ops unless the host installs its own logger.

use log::{Level, LevelFilter};

/// Route `log` output to the console. Safe to call more than once; later calls
/// only adjust the level.
pub fn init(level: LevelFilter) {
    // the backend accepts everything, `set_max_level` does the filtering
    if console_log::init_with_level(Level::Trace).is_err() {
        log::debug!("console logger already installed");
    }
    log::set_max_level(level);
}
